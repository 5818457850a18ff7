//! Process instruction opcodes.

use std::fmt;

/// One instruction slot of a simulated process.
///
/// `IoStart` and `IoDone` always appear as an adjacent pair: the first issues the
/// I/O, the second is the CPU slot consumed when the process resumes afterwards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Opcode {
    /// One tick of CPU work.
    Compute,
    /// Issue an I/O; the process blocks until it completes.
    IoStart,
    /// Handle the completion of the preceding I/O; no further I/O side effect.
    IoDone,
}

impl Opcode {
    /// Short name used in listings and the trace (`cpu`, `io`, `io_done`).
    pub const fn mnemonic(self) -> &'static str {
        match self {
            Self::Compute => "cpu",
            Self::IoStart => "io",
            Self::IoDone => "io_done",
        }
    }

    /// Returns `true` if executing this opcode starts an I/O.
    #[inline]
    pub const fn starts_io(self) -> bool {
        matches!(self, Self::IoStart)
    }
}

impl fmt::Display for Opcode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.mnemonic())
    }
}
