//! Cell cost values with an explicit unresolved sentinel.
//!
//! Out-of-band reads, virtual cells beyond the boundary frame, and in-band
//! slots that no alignment has reached yet all report [`Cost::Infinite`].
//! Arithmetic saturates so `Infinite + k` stays `Infinite` and can never
//! wrap into a small finite value.

use std::fmt;

/// A cell cost: a finite unit-edit count, or the unresolved sentinel.
///
/// The derived ordering puts `Finite(_) < Infinite`, so taking the minimum
/// over recurrence candidates behaves like ordinary integer `min` with an
/// adjoined +inf.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Cost {
    Finite(usize),
    Infinite,
}

impl Cost {
    pub const ZERO: Cost = Cost::Finite(0);

    /// Whether this cost carries a finite edit count.
    #[inline]
    pub fn is_finite(self) -> bool {
        matches!(self, Cost::Finite(_))
    }

    /// The finite edit count, if resolved.
    #[inline]
    pub fn finite(self) -> Option<usize> {
        match self {
            Cost::Finite(v) => Some(v),
            Cost::Infinite => None,
        }
    }

    /// Add `edits` further operations. `Infinite` is absorbing.
    #[inline]
    pub fn saturating_add(self, edits: usize) -> Cost {
        match self {
            Cost::Finite(v) => Cost::Finite(v.saturating_add(edits)),
            Cost::Infinite => Cost::Infinite,
        }
    }
}

impl From<usize> for Cost {
    fn from(v: usize) -> Self {
        Cost::Finite(v)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cost::Finite(v) => write!(f, "{v}"),
            Cost::Infinite => write!(f, "inf"),
        }
    }
}
