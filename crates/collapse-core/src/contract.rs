//! Caller-supplied grouping and folding semantics.

use std::fmt;

/// Defines what a group is and how its elements reduce to one value.
///
/// `adjacent` is only ever asked about consecutive elements; it is a pairwise
/// relation and the engine never assumes it is transitive across a run.
/// All four functions must be pure: when two sibling cursors meet at a split
/// point, the side that resolves the boundary may call them on elements the
/// other side already inspected.
pub trait Adjacency<T> {
    type Acc;

    /// Whether `next` continues the run that `prev` belongs to.
    fn adjacent(&self, prev: &T, next: &T) -> bool;

    /// Starts a run at `first`.
    fn seed(&self, first: &T) -> Self::Acc;

    /// Extends a run with its next element.
    fn fold(&self, acc: Self::Acc, next: &T) -> Self::Acc;

    /// Joins two partial runs, `left` immediately preceding `right`.
    fn combine(&self, left: Self::Acc, right: Self::Acc) -> Self::Acc;
}

/// Closure bundle implementing [`Adjacency`].
#[derive(Clone)]
pub struct FnAdjacency<P, S, F, C> {
    adjacent: P,
    seed: S,
    fold: F,
    combine: C,
}

/// Builds a contract from four closures.
///
/// ```
/// use collapse_core::contract::{adjacency, Adjacency};
///
/// let sums = adjacency(
///     |a: &i32, b: &i32| a == b,
///     |x: &i32| *x,
///     |acc: i32, x: &i32| acc + x,
///     |a: i32, b: i32| a + b,
/// );
/// assert_eq!(sums.fold(sums.seed(&2), &2), 4);
/// ```
pub fn adjacency<T, A, P, S, F, C>(adjacent: P, seed: S, fold: F, combine: C) -> FnAdjacency<P, S, F, C>
where
    P: Fn(&T, &T) -> bool,
    S: Fn(&T) -> A,
    F: Fn(A, &T) -> A,
    C: Fn(A, A) -> A,
{
    FnAdjacency {
        adjacent,
        seed,
        fold,
        combine,
    }
}

impl<T, A, P, S, F, C> Adjacency<T> for FnAdjacency<P, S, F, C>
where
    P: Fn(&T, &T) -> bool,
    S: Fn(&T) -> A,
    F: Fn(A, &T) -> A,
    C: Fn(A, A) -> A,
{
    type Acc = A;

    fn adjacent(&self, prev: &T, next: &T) -> bool {
        (self.adjacent)(prev, next)
    }

    fn seed(&self, first: &T) -> A {
        (self.seed)(first)
    }

    fn fold(&self, acc: A, next: &T) -> A {
        (self.fold)(acc, next)
    }

    fn combine(&self, left: A, right: A) -> A {
        (self.combine)(left, right)
    }
}

impl<P, S, F, C> fmt::Debug for FnAdjacency<P, S, F, C> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnAdjacency").finish_non_exhaustive()
    }
}
