//! Intake session management
//!
//! This module provides `IntakeSession`, the driver that runs turns for the
//! active agent, plus the shared state it owns, its configuration and
//! persistence of completed intakes.

pub mod config;
pub mod events;
pub mod metadata;
pub mod session;
pub mod state;
pub mod storage;

pub use config::SessionConfig;
pub use events::{create_event_channel, drain_events, EventReceiver, EventSender};
pub use metadata::IntakeRecord;
pub use session::IntakeSession;
pub use state::{AgentRegistry, SessionState};
pub use storage::IntakeStorage;
