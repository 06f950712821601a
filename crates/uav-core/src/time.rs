//! Discrete simulation time.
//!
//! A run is a fixed number of slots, executed exactly once each in ascending
//! order.  Slots carry no wall-clock mapping.

use std::fmt;

/// An absolute simulation slot counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(serde::Serialize, serde::Deserialize)]
pub struct Slot(pub u64);

impl Slot {
    pub const ZERO: Slot = Slot(0);

    /// The slot immediately after `self`.
    #[inline]
    pub fn next(self) -> Slot {
        Slot(self.0 + 1)
    }

    /// Position of this slot inside a cycle of length `len`.
    ///
    /// Used to index cyclic patrol paths.  `len` must be non-zero.
    #[inline]
    pub fn cycle_index(self, len: usize) -> usize {
        (self.0 % len as u64) as usize
    }
}

impl std::ops::Add<u64> for Slot {
    type Output = Slot;
    #[inline]
    fn add(self, rhs: u64) -> Slot {
        Slot(self.0 + rhs)
    }
}

impl fmt::Display for Slot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "S{}", self.0)
    }
}
