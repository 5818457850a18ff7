//! Shared helpers for scheduler tests.

/// Simulation harness around `Scheduler` and `TraceLog`.
pub mod harness;
