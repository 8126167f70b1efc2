//! Handoff cell shared by the two cursors on either side of a split point.
//!
//! Each side contributes at most once: the left side its trailing run (the
//! "tail"), the right side its leading run (the "head"). Whichever side
//! arrives first parks its contribution and walks away; the side that arrives
//! second claims both and decides, through the adjacency test, whether they
//! form one group or two. The decision is made by exactly one
//! compare-and-swap on the state tag, so there is never a moment where both
//! sides, or neither, own the merge.
//!
//! This makes the cell symmetric. A right side that arrives first does not
//! consume the cell; it parks its head in `RightWaiting`, the mirror of the
//! left side's `LeftWaiting`.
//!
//! A right side whose whole segment is one run touching both edges (or is
//! empty) cannot know how its run ends until its own right neighbour is
//! resolved. It parks its run together with its right cell; whoever claims
//! the handoff inherits that cell and carries the run onwards.

use std::fmt;
use std::sync::atomic::{AtomicU64, AtomicU8, Ordering};
use std::sync::Arc;

use parking_lot::Mutex;

use super::run::Run;

const EMPTY: u8 = 0;
const LEFT_WAITING: u8 = 1;
const RIGHT_WAITING: u8 = 2;
const CONSUMED: u8 = 3;

static NEXT_CELL_ID: AtomicU64 = AtomicU64::new(0);

/// Observable state of a boundary cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BoundaryState {
    /// Neither side has arrived.
    Empty,
    /// The left side parked its tail.
    LeftWaiting,
    /// The right side parked its head.
    RightWaiting,
    /// The second side claimed the parked contribution.
    Consumed,
}

impl BoundaryState {
    fn from_tag(tag: u8) -> Self {
        match tag {
            EMPTY => BoundaryState::Empty,
            LEFT_WAITING => BoundaryState::LeftWaiting,
            RIGHT_WAITING => BoundaryState::RightWaiting,
            _ => BoundaryState::Consumed,
        }
    }
}

/// What the right side leaves behind.
pub(crate) struct Handoff<T, A> {
    pub(crate) head: Option<Run<T, A>>,
    /// Set when `head` reaches the far edge of its segment too; the claimer
    /// becomes the left side of this cell.
    pub(crate) forward: Option<Arc<BoundaryCell<T, A>>>,
}

impl<T, A> Default for Handoff<T, A> {
    fn default() -> Self {
        Self {
            head: None,
            forward: None,
        }
    }
}

/// Outcome of posting a contribution.
pub(crate) enum Post<Mine, Theirs> {
    /// Our contribution is parked; the other side will resolve it.
    Parked,
    /// The other side was first: we get our contribution back with theirs.
    Claimed { mine: Mine, theirs: Theirs },
}

pub(crate) struct BoundaryCell<T, A> {
    id: u64,
    state: AtomicU8,
    tail: Mutex<Option<Run<T, A>>>,
    head: Mutex<Handoff<T, A>>,
}

impl<T, A> BoundaryCell<T, A> {
    pub(crate) fn new() -> Self {
        Self {
            id: NEXT_CELL_ID.fetch_add(1, Ordering::Relaxed),
            state: AtomicU8::new(EMPTY),
            tail: Mutex::new(None),
            head: Mutex::new(Handoff::default()),
        }
    }

    pub(crate) fn id(&self) -> u64 {
        self.id
    }

    pub(crate) fn state(&self) -> BoundaryState {
        BoundaryState::from_tag(self.state.load(Ordering::Acquire))
    }

    /// Called by the left side with its trailing run, if any.
    pub(crate) fn post_tail(&self, tail: Option<Run<T, A>>) -> Post<Option<Run<T, A>>, Handoff<T, A>> {
        *self.tail.lock() = tail;
        match self
            .state
            .compare_exchange(EMPTY, LEFT_WAITING, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                log::trace!("boundary #{}: left side parked its tail", self.id);
                Post::Parked
            }
            Err(observed) => {
                debug_assert_eq!(observed, RIGHT_WAITING, "left side arrived twice at boundary #{}", self.id);
                self.state.store(CONSUMED, Ordering::Release);
                let handoff = std::mem::take(&mut *self.head.lock());
                log::trace!(
                    "boundary #{}: left side claimed head (forwarded boundary: {:?})",
                    self.id,
                    handoff.forward.as_ref().map(|cell| cell.id)
                );
                Post::Claimed {
                    mine: self.tail.lock().take(),
                    theirs: handoff,
                }
            }
        }
    }

    /// Called by the right side once it has scanned its leading run.
    pub(crate) fn post_head(&self, handoff: Handoff<T, A>) -> Post<Handoff<T, A>, Option<Run<T, A>>> {
        *self.head.lock() = handoff;
        match self
            .state
            .compare_exchange(EMPTY, RIGHT_WAITING, Ordering::AcqRel, Ordering::Acquire)
        {
            Ok(_) => {
                log::trace!("boundary #{}: right side parked its head", self.id);
                Post::Parked
            }
            Err(observed) => {
                debug_assert_eq!(observed, LEFT_WAITING, "right side arrived twice at boundary #{}", self.id);
                self.state.store(CONSUMED, Ordering::Release);
                log::trace!("boundary #{}: right side claimed tail", self.id);
                Post::Claimed {
                    mine: std::mem::take(&mut *self.head.lock()),
                    theirs: self.tail.lock().take(),
                }
            }
        }
    }
}

impl<T, A> fmt::Debug for BoundaryCell<T, A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BoundaryCell")
            .field("id", &self.id)
            .field("state", &self.state())
            .finish()
    }
}
