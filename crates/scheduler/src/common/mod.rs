//! Common types used throughout the scheduling simulator.
//!
//! This module provides the building blocks shared by every component:
//! 1. **Process Identity:** A strong type for process ids, which double as table indices.
//! 2. **Error Handling:** Configuration errors and simulation invariant violations.

/// Error types for configuration and simulation failures.
pub mod error;

/// Process identifier type.
pub mod pid;

pub use error::{ConfigError, SimError};
pub use pid::Pid;
