//! Program descriptor parsing.
//!
//! A process's program is described in one of two grammars:
//! 1. **Explicit:** comma-separated tokens, `c<N>` for N ticks of CPU work and `i` for one I/O
//!    (e.g. `c7,i,c1,i`).
//! 2. **Randomized:** `<count>:<percent>`, `count` instructions each of which is CPU work with
//!    probability `percent`/100 and an I/O otherwise (e.g. `10:50`).
//!
//! Parsing only validates and records the shape; the [`ProgramLoader`](super::ProgramLoader)
//! expands a descriptor into opcodes.

use tracing::warn;

use crate::common::ConfigError;

/// One token of an explicit program.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Burst {
    /// `c<N>`: N consecutive compute instructions.
    Compute(usize),
    /// `i`: an I/O start followed by its completion slot.
    Io,
}

/// A parsed per-process program description.
#[derive(Debug, Clone, PartialEq)]
pub enum ProgramDescriptor {
    /// Explicit burst list.
    Explicit(Vec<Burst>),
    /// Randomized instruction mix.
    Randomized {
        /// Number of instructions to draw.
        count: usize,
        /// Chance, in percent, that a drawn instruction is CPU work rather than I/O.
        cpu_percent: f64,
    },
}

impl ProgramDescriptor {
    /// Parses an explicit program such as `c3,i,c2`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for empty tokens, unknown opcode letters, or
    /// non-numeric compute counts.
    pub fn parse_explicit(program: &str) -> Result<Self, ConfigError> {
        let bursts = program
            .split(',')
            .map(|token| parse_burst(token.trim(), program))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::Explicit(bursts))
    }

    /// Parses a randomized descriptor such as `10:50`.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] unless the descriptor is exactly two fields, a
    /// non-negative integer count and a finite percentage.
    pub fn parse_randomized(descriptor: &str) -> Result<Self, ConfigError> {
        let fields: Vec<&str> = descriptor.split(':').collect();
        let [count, percent] = fields.as_slice() else {
            return Err(ConfigError::BadDescriptor {
                descriptor: descriptor.to_string(),
            });
        };

        let count = count
            .trim()
            .parse::<usize>()
            .map_err(|_| ConfigError::BadInstructionCount {
                value: (*count).to_string(),
                descriptor: descriptor.to_string(),
            })?;

        let cpu_percent = percent
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|p| p.is_finite())
            .ok_or_else(|| ConfigError::BadPercent {
                value: (*percent).to_string(),
                descriptor: descriptor.to_string(),
            })?;

        if !(0.0..=100.0).contains(&cpu_percent) {
            warn!(
                descriptor,
                cpu_percent, "cpu percent outside 0..=100; program will be all CPU or all I/O"
            );
        }

        Ok(Self::Randomized { count, cpu_percent })
    }

    /// Number of opcodes this descriptor expands to, when known without drawing.
    ///
    /// Randomized descriptors return `None`: each I/O draw adds two opcodes.
    pub fn explicit_len(&self) -> Option<usize> {
        match self {
            Self::Explicit(bursts) => Some(
                bursts
                    .iter()
                    .map(|b| match b {
                        Burst::Compute(n) => *n,
                        Burst::Io => 2,
                    })
                    .sum(),
            ),
            Self::Randomized { .. } => None,
        }
    }
}

fn parse_burst(token: &str, program: &str) -> Result<Burst, ConfigError> {
    let mut chars = token.chars();
    let Some(opcode) = chars.next() else {
        return Err(ConfigError::EmptyToken {
            program: program.to_string(),
        });
    };
    let rest = chars.as_str();

    match opcode {
        'c' => rest
            .parse::<usize>()
            .map(Burst::Compute)
            .map_err(|_| ConfigError::BadComputeCount {
                token: token.to_string(),
            }),
        'i' if rest.is_empty() => Ok(Burst::Io),
        'i' => Err(ConfigError::BadIoToken {
            token: token.to_string(),
        }),
        other => Err(ConfigError::BadOpcode {
            opcode: other,
            token: token.to_string(),
        }),
    }
}

/// The ordered list of process descriptors for one run.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Workload {
    descriptors: Vec<ProgramDescriptor>,
}

impl Workload {
    /// Creates a workload from already-parsed descriptors.
    pub const fn new(descriptors: Vec<ProgramDescriptor>) -> Self {
        Self { descriptors }
    }

    /// Parses a colon-separated list of explicit programs (`c3,i:c5`), one process each.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn from_programs(programs: &str) -> Result<Self, ConfigError> {
        programs
            .split(':')
            .map(ProgramDescriptor::parse_explicit)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Parses a comma-separated list of randomized descriptors (`5:50,10:100`), one process each.
    ///
    /// # Errors
    ///
    /// Returns the first [`ConfigError`] encountered.
    pub fn from_process_list(list: &str) -> Result<Self, ConfigError> {
        list.split(',')
            .map(ProgramDescriptor::parse_randomized)
            .collect::<Result<Vec<_>, _>>()
            .map(Self::new)
    }

    /// Picks the workload the way the command line does: a non-empty explicit
    /// program list wins, otherwise the randomized process list is used.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::EmptyWorkload`] if both are empty, or the parse error
    /// of whichever list was chosen.
    pub fn select(programs: &str, process_list: &str) -> Result<Self, ConfigError> {
        if !programs.is_empty() {
            Self::from_programs(programs)
        } else if !process_list.is_empty() {
            Self::from_process_list(process_list)
        } else {
            Err(ConfigError::EmptyWorkload)
        }
    }

    /// The descriptors in process-id order.
    pub fn descriptors(&self) -> &[ProgramDescriptor] {
        &self.descriptors
    }

    /// Number of processes this workload creates.
    pub fn len(&self) -> usize {
        self.descriptors.len()
    }

    /// Returns `true` if the workload creates no processes.
    pub fn is_empty(&self) -> bool {
        self.descriptors.is_empty()
    }
}
