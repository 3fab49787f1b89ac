//! Track identifier policies.
//!
//! [`WrappingIdAllocator`] reproduces the small wrap-around counter used by
//! deployed consumers: identifiers cycle through `1..=ceiling`, so two live
//! tracks can share an identifier once more than `ceiling` tracks have been
//! created. [`MonotonicIdAllocator`] never repeats within `u64`.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
pub struct TrackId(pub u64);

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

pub trait IdAllocator: fmt::Debug {
    fn next_id(&mut self) -> TrackId;
}

/*-----------------------------------------------------------------------------
WrappingIdAllocator
-----------------------------------------------------------------------------*/

pub const DEFAULT_ID_CEILING: u64 = 10;

#[derive(Debug, Clone)]
pub struct WrappingIdAllocator {
    ceiling: u64,
    last: u64,
}

impl WrappingIdAllocator {
    /// `ceiling` must be at least 1; `TrackerConfig::validate` enforces it.
    pub fn new(ceiling: u64) -> Self {
        Self { ceiling, last: 0 }
    }
}

impl Default for WrappingIdAllocator {
    fn default() -> Self {
        Self::new(DEFAULT_ID_CEILING)
    }
}

impl IdAllocator for WrappingIdAllocator {
    fn next_id(&mut self) -> TrackId {
        self.last = if self.last >= self.ceiling {
            1
        } else {
            self.last + 1
        };
        TrackId(self.last)
    }
}

/*-----------------------------------------------------------------------------
MonotonicIdAllocator
-----------------------------------------------------------------------------*/

#[derive(Debug, Clone, Default)]
pub struct MonotonicIdAllocator {
    last: u64,
}

impl MonotonicIdAllocator {
    pub fn new() -> Self {
        Self::default()
    }
}

impl IdAllocator for MonotonicIdAllocator {
    fn next_id(&mut self) -> TrackId {
        self.last = self.last.wrapping_add(1).max(1);
        TrackId(self.last)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wrapping_repeats_at_eleventh_creation() {
        let mut ids = WrappingIdAllocator::default();
        let issued: Vec<u64> = (0..12).map(|_| ids.next_id().0).collect();

        assert_eq!(issued, vec![1, 2, 3, 4, 5, 6, 7, 8, 9, 10, 1, 2]);
    }

    #[test]
    fn test_wrapping_custom_ceiling() {
        let mut ids = WrappingIdAllocator::new(2);
        let issued: Vec<u64> = (0..5).map(|_| ids.next_id().0).collect();

        assert_eq!(issued, vec![1, 2, 1, 2, 1]);
    }

    #[test]
    fn test_monotonic_never_repeats() {
        let mut ids = MonotonicIdAllocator::new();
        let issued: Vec<u64> = (0..25).map(|_| ids.next_id().0).collect();

        assert_eq!(issued, (1..=25).collect::<Vec<u64>>());
    }

    #[test]
    fn test_track_id_display() {
        assert_eq!(TrackId(7).to_string(), "T7");
    }
}
