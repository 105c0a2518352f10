//! Core types for the intake framework
//!
//! This module provides the fundamental types used throughout the framework:
//! - `SessionEvent` - Events streamed from a running session
//! - `SessionPhase` - Lifecycle of a session
//! - `FrameworkError` - Error types

pub mod error;
pub mod output;
pub mod state;

pub use error::{FrameworkError, FrameworkResult};
pub use output::SessionEvent;
pub use state::SessionPhase;
