//! Scheduler core tests.

/// Whole-run properties over generated programs.
pub mod invariants;
