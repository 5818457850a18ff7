//! Configuration and simulation error definitions.
//!
//! This module defines the two failure families of the simulator:
//! 1. **Configuration Errors:** Malformed program descriptors, unknown opcodes or policies,
//!    and unreadable configuration files. These are user errors reported before a run starts.
//! 2. **Simulation Errors:** Guarded state transitions whose precondition does not hold and
//!    other invariant violations. These indicate a logic defect and abort the run.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

use super::pid::Pid;
use crate::sched::ProcessState;

/// Errors raised while turning user input into a runnable workload.
///
/// Every message names the expected format so the CLI can print it verbatim.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicit program token started with something other than `c` or `i`.
    #[error("bad opcode {opcode:?} in token {token:?} (should be c or i)")]
    BadOpcode {
        /// The offending opcode letter.
        opcode: char,
        /// The full token it came from.
        token: String,
    },

    /// A `c<N>` token whose count is missing or not a non-negative integer.
    #[error("bad compute burst {token:?}: expected c<N> where N is a non-negative integer")]
    BadComputeCount {
        /// The offending token.
        token: String,
    },

    /// An `i` token carrying trailing characters.
    #[error("bad io token {token:?}: an I/O is written as a bare i")]
    BadIoToken {
        /// The offending token.
        token: String,
    },

    /// An explicit program contained an empty token (e.g. `c3,,i` or an empty program).
    #[error("empty token in program {program:?}: expected tokens like c<N> or i separated by commas")]
    EmptyToken {
        /// The program string containing the empty token.
        program: String,
    },

    /// A randomized descriptor that is not exactly `<count>:<percent>`.
    #[error(
        "bad description ({descriptor}): must be <x:y> where x is the number of instructions \
         and y is the percent chance that an instruction is CPU not IO"
    )]
    BadDescriptor {
        /// The offending descriptor.
        descriptor: String,
    },

    /// The instruction count of a randomized descriptor is not a non-negative integer.
    #[error("bad instruction count {value:?} in description {descriptor:?}: expected a non-negative integer")]
    BadInstructionCount {
        /// The offending field.
        value: String,
        /// The full descriptor.
        descriptor: String,
    },

    /// The CPU percentage of a randomized descriptor is not a finite number.
    #[error("bad cpu percent {value:?} in description {descriptor:?}: expected a number from 0 to 100")]
    BadPercent {
        /// The offending field.
        value: String,
        /// The full descriptor.
        descriptor: String,
    },

    /// A switch policy name that is neither `SWITCH_ON_IO` nor `SWITCH_ON_END`.
    #[error("unknown switch policy {0:?}: expected SWITCH_ON_IO or SWITCH_ON_END")]
    UnknownSwitchPolicy(String),

    /// An I/O-completion policy name that is neither `IO_RUN_LATER` nor `IO_RUN_IMMEDIATE`.
    #[error("unknown io completion policy {0:?}: expected IO_RUN_LATER or IO_RUN_IMMEDIATE")]
    UnknownIoDonePolicy(String),

    /// Neither an explicit program list nor a randomized process list was given.
    #[error("no processes given: use --program (e.g. c3,i:c2) or --processlist (e.g. 5:50,5:50)")]
    EmptyWorkload,

    /// The configuration file could not be read.
    #[error("cannot read config file {path}: {source}")]
    ConfigFile {
        /// Path that was attempted.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: io::Error,
    },

    /// The configuration file is not valid JSON for [`Config`](crate::config::Config).
    #[error("invalid config: {0}")]
    ConfigParse(#[from] serde_json::Error),
}

/// Top-level error type of the simulator.
#[derive(Debug, Error)]
pub enum SimError {
    /// Invalid user-supplied configuration; reported before any simulation starts.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// A guarded state change whose precondition did not hold.
    ///
    /// This is a modeling defect, never a user error.
    #[error("invalid transition for process {pid}: expected {expected}, found {actual} (target {target})")]
    InvalidTransition {
        /// Process whose state was being changed.
        pid: Pid,
        /// State the caller asserted the process was in.
        expected: ProcessState,
        /// State the process was actually in.
        actual: ProcessState,
        /// State the caller asked for.
        target: ProcessState,
    },

    /// A process id that does not exist in the process table.
    #[error("unknown process {0}")]
    UnknownProcess(Pid),

    /// An instruction was popped from an exhausted program.
    #[error("process {0} has no instructions left")]
    EmptyProgram(Pid),

    /// Active processes remain but nothing runs and no I/O is outstanding.
    #[error("scheduler stalled at tick {tick}: {active} active process(es) but none runnable and no I/O outstanding")]
    Stalled {
        /// Tick at which the stall was detected.
        tick: u64,
        /// Number of processes not yet done.
        active: usize,
    },

    /// An I/O completion tick does not fit in the clock.
    #[error("io issued at tick {tick} with length {io_length} overflows the clock")]
    ClockOverflow {
        /// Tick at which the I/O was issued.
        tick: u64,
        /// Configured I/O length.
        io_length: u64,
    },

    /// A trace reporter failed to write its output.
    #[error("trace output failed: {0}")]
    Trace(#[from] io::Error),
}

impl SimError {
    /// Returns `true` for user-facing configuration errors.
    pub const fn is_config(&self) -> bool {
        matches!(self, Self::Config(_))
    }
}
