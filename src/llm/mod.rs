pub mod provider;
pub mod scripted;

pub use provider::{GeneratedTurn, ReplyGenerator, ReplyRequest};
pub use scripted::ScriptedGenerator;
