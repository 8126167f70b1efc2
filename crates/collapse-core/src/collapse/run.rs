use crate::contract::Adjacency;

/// First and last raw element of a run. Single-element runs keep one copy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Ends<T> {
    One(T),
    Two(T, T),
}

impl<T> Ends<T> {
    pub(crate) fn first(&self) -> &T {
        match self {
            Ends::One(only) => only,
            Ends::Two(first, _) => first,
        }
    }

    pub(crate) fn last(&self) -> &T {
        match self {
            Ends::One(only) => only,
            Ends::Two(_, last) => last,
        }
    }

    /// Appends `next`; the previous last element is dropped.
    pub(crate) fn push(self, next: T) -> Self {
        match self {
            Ends::One(first) | Ends::Two(first, _) => Ends::Two(first, next),
        }
    }

    /// Ends of `self` followed immediately by `right`.
    pub(crate) fn join(self, right: Ends<T>) -> Self {
        let last = match right {
            Ends::One(last) | Ends::Two(_, last) => last,
        };
        self.push(last)
    }
}

/// A partially or fully folded run of adjacent elements.
///
/// The raw ends are kept next to the accumulator because the adjacency test
/// at a split point needs elements, and the accumulator may not retain them.
#[derive(Debug, Clone)]
pub(crate) struct Run<T, A> {
    pub(crate) acc: A,
    pub(crate) ends: Ends<T>,
}

impl<T, A> Run<T, A> {
    pub(crate) fn start<C>(contract: &C, first: T) -> Self
    where
        C: Adjacency<T, Acc = A>,
    {
        Self {
            acc: contract.seed(&first),
            ends: Ends::One(first),
        }
    }

    /// Folds `next` into the run if it is adjacent, otherwise hands it back.
    pub(crate) fn extend<C>(self, contract: &C, next: T) -> Result<Self, (Self, T)>
    where
        C: Adjacency<T, Acc = A>,
    {
        if !contract.adjacent(self.ends.last(), &next) {
            return Err((self, next));
        }
        Ok(Self {
            acc: contract.fold(self.acc, &next),
            ends: self.ends.push(next),
        })
    }

    pub(crate) fn continues_into<C>(&self, right: &Run<T, A>, contract: &C) -> bool
    where
        C: Adjacency<T, Acc = A>,
    {
        contract.adjacent(self.ends.last(), right.ends.first())
    }

    pub(crate) fn merge<C>(self, right: Run<T, A>, contract: &C) -> Self
    where
        C: Adjacency<T, Acc = A>,
    {
        Self {
            acc: contract.combine(self.acc, right.acc),
            ends: self.ends.join(right.ends),
        }
    }
}
