//! Process identifier.
//!
//! Ids are handed out sequentially from zero by the process table and are never
//! reused, so a `Pid` is also the index of its process in the table.

use std::fmt;

/// Identifier of a simulated process.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pid(pub usize);

impl Pid {
    /// Returns the raw index of this process in the process table.
    #[inline]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl From<usize> for Pid {
    fn from(index: usize) -> Self {
        Self(index)
    }
}

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
