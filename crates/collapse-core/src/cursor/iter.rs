use std::iter::Fuse;

use super::{Characteristics, Cursor};

/// Adapts any iterator into a cursor that never splits.
#[derive(Debug, Clone)]
pub struct IterCursor<I: Iterator> {
    iter: Fuse<I>,
}

impl<I: Iterator> IterCursor<I> {
    pub fn new<T>(iter: T) -> Self
    where
        T: IntoIterator<IntoIter = I>,
    {
        Self {
            iter: iter.into_iter().fuse(),
        }
    }
}

impl<I: Iterator> Cursor for IterCursor<I> {
    type Item = I::Item;

    fn try_advance(&mut self) -> Option<I::Item> {
        self.iter.next()
    }

    fn try_split(&mut self) -> Option<Self> {
        None
    }

    fn estimate_size(&self) -> usize {
        self.iter.size_hint().1.unwrap_or(usize::MAX)
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED
    }
}
