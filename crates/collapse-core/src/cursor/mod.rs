//! Splittable pull-based cursors.
//!
//! A [`Cursor`] is an ordered sequence that can be advanced one element at a
//! time and divided into a prefix and a suffix. Division is entirely the
//! cursor's own policy: callers ask, the cursor decides where (and whether) to
//! cut. The collapse engine both consumes and implements this contract, so
//! collapsing composes into sequential or parallel pipelines unchanged.

pub mod iter;
pub mod slice;
pub mod vec;

pub use iter::IterCursor;
pub use slice::SliceCursor;
pub use vec::VecCursor;

use std::fmt;

use bitflags::bitflags;

/// Smallest segment the built-in cursors agree to split.
pub const DEFAULT_MIN_SPLIT_LEN: usize = 2;

bitflags! {
    /// Structural guarantees a cursor makes about the elements it yields.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Characteristics: u8 {
        /// Elements have a defined encounter order that splitting preserves.
        const ORDERED = 1 << 0;
        /// `estimate_size` is exact before traversal starts.
        const SIZED = 1 << 1;
        /// Every cursor produced by `try_split` is itself `SIZED`.
        const SUBSIZED = 1 << 2;
        /// The backing storage cannot change during traversal.
        const IMMUTABLE = 1 << 3;
    }
}

impl fmt::Display for Characteristics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let names: Vec<&str> = self.iter_names().map(|(name, _)| name).collect();
        write!(f, "{}", names.join(" | "))
    }
}

/// An ordered, splittable, pull-based sequence.
pub trait Cursor {
    type Item;

    /// Yields the next element, or `None` once the cursor is exhausted.
    ///
    /// After the first `None` every further call returns `None`.
    fn try_advance(&mut self) -> Option<Self::Item>;

    /// Splits off a prefix of the remaining elements.
    ///
    /// On success the returned cursor covers the prefix and `self` keeps the
    /// suffix, so draining the returned cursor first and then `self`
    /// reproduces the unsplit order. Returns `None` when the cursor declines.
    fn try_split(&mut self) -> Option<Self>
    where
        Self: Sized;

    /// Upper bound on the remaining elements (`usize::MAX` when unknown).
    fn estimate_size(&self) -> usize;

    fn characteristics(&self) -> Characteristics;

    /// Remaining element count when the cursor is `SIZED`.
    fn exact_size(&self) -> Option<usize> {
        if self.characteristics().contains(Characteristics::SIZED) {
            Some(self.estimate_size())
        } else {
            None
        }
    }

    /// Feeds every remaining element to `action`, in order.
    fn for_each_remaining<F>(&mut self, mut action: F)
    where
        F: FnMut(Self::Item),
    {
        while let Some(item) = self.try_advance() {
            action(item);
        }
    }

    /// Feeds remaining elements to a fallible `action`, stopping at the first
    /// error. The element handed to the failing call counts as delivered.
    fn try_for_each_remaining<E, F>(&mut self, mut action: F) -> Result<(), E>
    where
        F: FnMut(Self::Item) -> Result<(), E>,
    {
        while let Some(item) = self.try_advance() {
            action(item)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn characteristics_set_operations() {
        let flags = Characteristics::ORDERED | Characteristics::SIZED;
        assert!(flags.contains(Characteristics::ORDERED));
        assert!(flags.contains(Characteristics::SIZED));
        assert!(!flags.contains(Characteristics::SUBSIZED));
        assert_eq!(
            flags.difference(Characteristics::SIZED),
            Characteristics::ORDERED
        );
        assert_eq!(flags & Characteristics::SIZED, Characteristics::SIZED);
        assert!(Characteristics::empty().contains(Characteristics::empty()));
    }

    #[test]
    fn characteristics_display_lists_flags() {
        let flags = Characteristics::ORDERED | Characteristics::SUBSIZED;
        assert_eq!(flags.to_string(), "ORDERED | SUBSIZED");
        assert_eq!(Characteristics::empty().to_string(), "");
    }

    #[test]
    fn try_for_each_remaining_stops_at_first_error() {
        let mut cursor = VecCursor::new(vec![1, 2, 3, 4]);
        let mut seen = Vec::new();
        let outcome = cursor.try_for_each_remaining(|x| {
            seen.push(x);
            if x == 2 {
                Err("boom")
            } else {
                Ok(())
            }
        });

        assert_eq!(outcome, Err("boom"));
        assert_eq!(seen, vec![1, 2]);
        // The failing element is not handed out again.
        assert_eq!(cursor.try_advance(), Some(3));
    }
}
