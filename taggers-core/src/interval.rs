//! Half-open token intervals
//!
//! Every annotation spans a contiguous run of token positions expressed as
//! a half-open interval `[start, end)`. Intervals never split a token: the
//! unit of position is the token index, not the character offset.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A half-open span `[start, end)` over token positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Interval {
    start: usize,
    end: usize,
}

impl Interval {
    /// Create the interval `[start, end)`.
    ///
    /// # Panics
    ///
    /// Panics if `start > end`.
    pub fn open(start: usize, end: usize) -> Self {
        assert!(
            start <= end,
            "interval start {start} must not exceed end {end}"
        );
        Self { start, end }
    }

    /// The canonical empty interval `[0, 0)`.
    pub fn empty() -> Self {
        Self { start: 0, end: 0 }
    }

    pub fn start(&self) -> usize {
        self.start
    }

    pub fn end(&self) -> usize {
        self.end
    }

    /// Number of tokens covered.
    pub fn len(&self) -> usize {
        self.end - self.start
    }

    pub fn is_empty(&self) -> bool {
        self.start == self.end
    }

    /// True iff `other` lies entirely within this interval.
    ///
    /// This is non-strict containment: every interval is a superset of
    /// itself. Containment over intervals forms a partial order.
    pub fn superset(&self, other: &Interval) -> bool {
        other.start >= self.start && other.end <= self.end
    }

    /// True iff the two intervals share at least one position.
    pub fn intersects(&self, other: &Interval) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// True iff this interval ends at or before `other` begins.
    ///
    /// Used only for ordering annotations left to right, not for
    /// adjacency tests.
    pub fn left_of(&self, other: &Interval) -> bool {
        self.end <= other.start
    }

    /// True iff this interval begins at or after `other` ends.
    pub fn right_of(&self, other: &Interval) -> bool {
        self.start >= other.end
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {})", self.start, self.end)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn open_and_accessors() {
        let i = Interval::open(2, 5);
        assert_eq!(i.start(), 2);
        assert_eq!(i.end(), 5);
        assert_eq!(i.len(), 3);
        assert!(!i.is_empty());
    }

    #[test]
    #[should_panic]
    fn open_rejects_inverted_bounds() {
        let _ = Interval::open(5, 2);
    }

    #[test]
    fn empty_interval() {
        let e = Interval::empty();
        assert!(e.is_empty());
        assert_eq!(e.len(), 0);
    }

    #[test]
    fn superset_basics() {
        let outer = Interval::open(1, 6);
        let inner = Interval::open(2, 4);
        assert!(outer.superset(&inner));
        assert!(!inner.superset(&outer));
        assert!(outer.superset(&outer));
    }

    #[test]
    fn intersects_and_ordering() {
        let a = Interval::open(0, 3);
        let b = Interval::open(2, 5);
        let c = Interval::open(3, 6);
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
        assert!(a.left_of(&c));
        assert!(c.right_of(&a));
        assert!(!a.left_of(&b));
    }

    fn arb_interval() -> impl Strategy<Value = Interval> {
        (0usize..20, 0usize..20).prop_map(|(a, b)| {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            Interval::open(lo, hi)
        })
    }

    proptest! {
        #[test]
        fn superset_is_reflexive(a in arb_interval()) {
            prop_assert!(a.superset(&a));
        }

        #[test]
        fn superset_is_antisymmetric(a in arb_interval(), b in arb_interval()) {
            if a.superset(&b) && b.superset(&a) {
                prop_assert_eq!(a, b);
            }
        }

        #[test]
        fn superset_is_transitive(
            a in arb_interval(),
            b in arb_interval(),
            c in arb_interval(),
        ) {
            if a.superset(&b) && b.superset(&c) {
                prop_assert!(a.superset(&c));
            }
        }

        #[test]
        fn intersects_is_symmetric(a in arb_interval(), b in arb_interval()) {
            prop_assert_eq!(a.intersects(&b), b.intersects(&a));
        }
    }
}
