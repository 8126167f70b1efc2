use super::{Characteristics, Cursor, DEFAULT_MIN_SPLIT_LEN};

/// Cursor over a borrowed slice, yielding references.
#[derive(Debug, Clone, Copy)]
pub struct SliceCursor<'a, T> {
    slice: &'a [T],
    min_split_len: usize,
}

impl<'a, T> SliceCursor<'a, T> {
    pub fn new(slice: &'a [T]) -> Self {
        Self::with_min_split_len(slice, DEFAULT_MIN_SPLIT_LEN)
    }

    pub fn with_min_split_len(slice: &'a [T], min_split_len: usize) -> Self {
        Self {
            slice,
            min_split_len: min_split_len.max(DEFAULT_MIN_SPLIT_LEN),
        }
    }

    /// The elements not yet yielded.
    pub fn as_slice(&self) -> &'a [T] {
        self.slice
    }
}

impl<'a, T> Cursor for SliceCursor<'a, T> {
    type Item = &'a T;

    fn try_advance(&mut self) -> Option<&'a T> {
        let (first, rest) = self.slice.split_first()?;
        self.slice = rest;
        Some(first)
    }

    fn try_split(&mut self) -> Option<Self> {
        if self.slice.len() < self.min_split_len {
            return None;
        }
        let (prefix, suffix) = self.slice.split_at(self.slice.len() / 2);
        self.slice = suffix;
        Some(Self {
            slice: prefix,
            min_split_len: self.min_split_len,
        })
    }

    fn estimate_size(&self) -> usize {
        self.slice.len()
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED
            | Characteristics::SIZED
            | Characteristics::SUBSIZED
            | Characteristics::IMMUTABLE
    }
}
