//! The collapse cursor: adjacent-run reduction that survives splitting.
//!
//! A [`CollapseCursor`] turns a cursor of elements into a cursor of group
//! results, one per maximal run of adjacent elements. It can be split like
//! any other cursor; each split inserts a boundary cell between the two
//! children so that a run crossing the cut is still reduced to exactly one
//! result, whichever child reaches the cut first and on whatever thread.
//! Draining every leaf and concatenating the outputs left to right yields the
//! same results as draining the unsplit cursor.

mod boundary;
mod run;

pub use boundary::BoundaryState;

use std::collections::VecDeque;
use std::fmt;
use std::iter::FusedIterator;
use std::sync::Arc;

use crate::contract::Adjacency;
use crate::cursor::{Characteristics, Cursor};
use boundary::{BoundaryCell, Handoff, Post};
use run::Run;

type CellRef<T, A> = Arc<BoundaryCell<T, A>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Nothing pulled yet; a pending left boundary is still unresolved.
    Init,
    Accumulating,
    Exhausted,
}

/// Cursor over the results of collapsing runs of adjacent elements.
pub struct CollapseCursor<S, C>
where
    S: Cursor,
    C: Adjacency<S::Item>,
{
    source: S,
    contract: Arc<C>,
    left: Option<CellRef<S::Item, C::Acc>>,
    right: Option<CellRef<S::Item, C::Acc>>,
    /// Element that closed the previous run and starts the next one.
    seed: Option<S::Item>,
    /// Finished results not yet handed out, in order.
    ready: VecDeque<C::Acc>,
    phase: Phase,
}

impl<S, C> CollapseCursor<S, C>
where
    S: Cursor,
    C: Adjacency<S::Item>,
{
    pub fn new(source: S, contract: C) -> Self {
        Self::with_shared(source, Arc::new(contract))
    }

    /// Creates a cursor around a contract that is already shared.
    pub fn with_shared(source: S, contract: Arc<C>) -> Self {
        Self {
            source,
            contract,
            left: None,
            right: None,
            seed: None,
            ready: VecDeque::new(),
            phase: Phase::Init,
        }
    }

    pub fn contract(&self) -> &C {
        &self.contract
    }

    /// State of the boundary shared with the preceding sibling, while this
    /// cursor still has to resolve it.
    pub fn left_boundary(&self) -> Option<BoundaryState> {
        self.left.as_ref().map(|cell| cell.state())
    }

    /// State of the boundary shared with the following sibling.
    pub fn right_boundary(&self) -> Option<BoundaryState> {
        self.right.as_ref().map(|cell| cell.state())
    }

    pub fn is_exhausted(&self) -> bool {
        self.phase == Phase::Exhausted && self.ready.is_empty()
    }

    /// Pulls the next run out of the source segment.
    ///
    /// Returns the run and whether it was closed by a non-adjacent element
    /// (which is kept as the next seed) rather than by the end of the segment.
    fn scan_run(&mut self) -> Option<(Run<S::Item, C::Acc>, bool)> {
        let first = self.seed.take().or_else(|| self.source.try_advance())?;
        let mut run = Run::start(&*self.contract, first);
        while let Some(next) = self.source.try_advance() {
            match run.extend(&*self.contract, next) {
                Ok(extended) => run = extended,
                Err((closed, next)) => {
                    self.seed = Some(next);
                    return Some((closed, true));
                }
            }
        }
        Some((run, false))
    }

    /// Puts `left` and `right` in order, merging them when they touch.
    fn absorb(
        &mut self,
        left: Option<Run<S::Item, C::Acc>>,
        right: Option<Run<S::Item, C::Acc>>,
    ) -> Option<Run<S::Item, C::Acc>> {
        match (left, right) {
            (Some(left), Some(right)) => {
                if left.continues_into(&right, &*self.contract) {
                    Some(left.merge(right, &*self.contract))
                } else {
                    self.ready.push_back(left.acc);
                    Some(right)
                }
            }
            (left, None) => left,
            (None, right) => right,
        }
    }

    /// Settles the boundary with the preceding sibling using our first run.
    fn resolve_left(&mut self, cell: CellRef<S::Item, C::Acc>) {
        let (head, closed) = match self.scan_run() {
            Some((run, closed)) => (Some(run), closed),
            None => (None, false),
        };
        // A head that reaches our right boundary (or an empty segment) is
        // handed over together with that boundary.
        let bridges = !closed && self.right.is_some();
        let forward = if bridges { self.right.take() } else { None };

        match cell.post_head(Handoff { head, forward }) {
            Post::Parked => {
                if bridges {
                    self.phase = Phase::Exhausted;
                }
            }
            Post::Claimed { mine, theirs } => {
                // Only a bridging head took the right boundary with it.
                if bridges {
                    self.right = mine.forward;
                }
                let run = self.absorb(theirs, mine.head);
                if closed {
                    if let Some(run) = run {
                        self.ready.push_back(run.acc);
                    }
                } else {
                    self.close_tail(run);
                }
            }
        }
    }

    /// Emits or hands over the final run of the segment, following forwarded
    /// boundaries until the run is known to be complete.
    fn close_tail(&mut self, mut tail: Option<Run<S::Item, C::Acc>>) {
        while let Some(cell) = self.right.take() {
            match cell.post_tail(tail) {
                Post::Parked => {
                    self.phase = Phase::Exhausted;
                    return;
                }
                Post::Claimed { mine, theirs } => {
                    tail = self.absorb(mine, theirs.head);
                    self.right = theirs.forward;
                }
            }
        }
        if let Some(run) = tail {
            self.ready.push_back(run.acc);
        }
        self.phase = Phase::Exhausted;
    }

    fn step(&mut self) {
        match self.scan_run() {
            Some((run, true)) => self.ready.push_back(run.acc),
            Some((run, false)) => self.close_tail(Some(run)),
            None => self.close_tail(None),
        }
    }
}

impl<S, C> Cursor for CollapseCursor<S, C>
where
    S: Cursor,
    C: Adjacency<S::Item>,
{
    type Item = C::Acc;

    fn try_advance(&mut self) -> Option<C::Acc> {
        loop {
            if let Some(result) = self.ready.pop_front() {
                return Some(result);
            }
            match self.phase {
                Phase::Exhausted => return None,
                Phase::Init => {
                    self.phase = Phase::Accumulating;
                    if let Some(cell) = self.left.take() {
                        self.resolve_left(cell);
                    }
                }
                Phase::Accumulating => self.step(),
            }
        }
    }

    /// Splits off a prefix, linking the two halves through a new boundary.
    ///
    /// Also works mid-traversal: results already held and the buffered seed
    /// belong to the prefix, and this cursor restarts at the cut.
    fn try_split(&mut self) -> Option<Self> {
        if self.phase == Phase::Exhausted {
            return None;
        }
        let source = self.source.try_split()?;
        let cell = Arc::new(BoundaryCell::new());
        log::trace!(
            "split: boundary #{} created ({} elements left of it, {} right)",
            cell.id(),
            source.estimate_size(),
            self.source.estimate_size()
        );

        let prefix = Self {
            source,
            contract: Arc::clone(&self.contract),
            left: self.left.take(),
            right: Some(Arc::clone(&cell)),
            seed: self.seed.take(),
            ready: std::mem::take(&mut self.ready),
            phase: self.phase,
        };
        self.left = Some(cell);
        self.phase = Phase::Init;
        Some(prefix)
    }

    fn estimate_size(&self) -> usize {
        let boundaries = usize::from(self.left.is_some()) + usize::from(self.right.is_some());
        self.source
            .estimate_size()
            .saturating_add(usize::from(self.seed.is_some()))
            .saturating_add(self.ready.len())
            .saturating_add(boundaries)
    }

    fn characteristics(&self) -> Characteristics {
        self.source.characteristics() & Characteristics::ORDERED
    }
}

impl<S, C> Iterator for CollapseCursor<S, C>
where
    S: Cursor,
    C: Adjacency<S::Item>,
{
    type Item = C::Acc;

    fn next(&mut self) -> Option<C::Acc> {
        self.try_advance()
    }
}

impl<S, C> FusedIterator for CollapseCursor<S, C>
where
    S: Cursor,
    C: Adjacency<S::Item>,
{
}

impl<S, C> fmt::Debug for CollapseCursor<S, C>
where
    S: Cursor,
    C: Adjacency<S::Item>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CollapseCursor")
            .field("phase", &self.phase)
            .field("left", &self.left)
            .field("right", &self.right)
            .field("ready", &self.ready.len())
            .finish_non_exhaustive()
    }
}

/// Adds `.collapse(contract)` to every cursor.
pub trait CollapseExt: Cursor + Sized {
    fn collapse<C>(self, contract: C) -> CollapseCursor<Self, C>
    where
        C: Adjacency<Self::Item>,
    {
        CollapseCursor::new(self, contract)
    }
}

impl<S: Cursor> CollapseExt for S {}
