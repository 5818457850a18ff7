//! Reporting: the per-tick trace and the pre-run instruction listing.

/// Instruction listing and policy description.
pub mod listing;

/// Tick records and trace sinks.
pub mod trace;

pub use listing::write_listing;
pub use trace::{NullTrace, ProcessCell, TableReporter, TickRecord, TraceLog, TraceSink};
