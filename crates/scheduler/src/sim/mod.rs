//! Simulation setup and execution.
//!
//! Ties the program loader to the scheduler: a [`Simulator`] loads a workload once,
//! can print the instruction listing, and then runs the scheduler to completion.

pub mod simulator;

pub use simulator::Simulator;
