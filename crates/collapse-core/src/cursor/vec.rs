use std::collections::VecDeque;

use super::{Characteristics, Cursor, DEFAULT_MIN_SPLIT_LEN};

/// Cursor over owned elements, split by halving.
#[derive(Debug, Clone)]
pub struct VecCursor<T> {
    items: VecDeque<T>,
    min_split_len: usize,
}

impl<T> VecCursor<T> {
    pub fn new(items: Vec<T>) -> Self {
        Self::with_min_split_len(items, DEFAULT_MIN_SPLIT_LEN)
    }

    /// Creates a cursor that refuses to split segments shorter than
    /// `min_split_len` elements. Segments of one element never split.
    pub fn with_min_split_len(items: Vec<T>, min_split_len: usize) -> Self {
        Self {
            items: items.into(),
            min_split_len: min_split_len.max(DEFAULT_MIN_SPLIT_LEN),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

impl<T> From<Vec<T>> for VecCursor<T> {
    fn from(items: Vec<T>) -> Self {
        Self::new(items)
    }
}

impl<T> Cursor for VecCursor<T> {
    type Item = T;

    fn try_advance(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn try_split(&mut self) -> Option<Self> {
        let len = self.items.len();
        if len < self.min_split_len {
            return None;
        }
        let suffix = self.items.split_off(len / 2);
        let prefix = std::mem::replace(&mut self.items, suffix);
        Some(Self {
            items: prefix,
            min_split_len: self.min_split_len,
        })
    }

    fn estimate_size(&self) -> usize {
        self.items.len()
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED | Characteristics::SIZED | Characteristics::SUBSIZED
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn drain<T>(cursor: &mut VecCursor<T>) -> Vec<T> {
        let mut out = Vec::new();
        cursor.for_each_remaining(|x| out.push(x));
        out
    }

    #[test]
    fn split_returns_prefix_and_keeps_suffix() {
        let mut suffix = VecCursor::new(vec![1, 2, 3, 4, 5]);
        let mut prefix = suffix.try_split().unwrap();

        assert_eq!(drain(&mut prefix), vec![1, 2]);
        assert_eq!(drain(&mut suffix), vec![3, 4, 5]);
    }

    #[test]
    fn refuses_to_split_short_segments() {
        let mut cursor = VecCursor::with_min_split_len(vec![1, 2, 3], 4);
        assert!(cursor.try_split().is_none());

        let mut single = VecCursor::with_min_split_len(vec![1], 0);
        assert!(single.try_split().is_none());
        assert_eq!(single.len(), 1);
    }

    #[test]
    fn reports_exact_size() {
        let mut cursor = VecCursor::new(vec!['a', 'b', 'c']);
        assert_eq!(cursor.exact_size(), Some(3));
        cursor.try_advance();
        assert_eq!(cursor.estimate_size(), 2);
        assert!(cursor
            .characteristics()
            .contains(Characteristics::ORDERED | Characteristics::SUBSIZED));
    }

    #[test]
    fn exhausted_cursor_stays_exhausted() {
        let mut cursor = VecCursor::new(vec![7]);
        assert_eq!(cursor.try_advance(), Some(7));
        assert_eq!(cursor.try_advance(), None);
        assert_eq!(cursor.try_advance(), None);
        assert!(cursor.is_empty());
    }
}
