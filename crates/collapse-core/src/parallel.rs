//! Fork-join draining of splittable cursors.
//!
//! The driver halves a cursor recursively and drains the halves through a
//! [`Strategy`]: [`Sequential`] runs them one after the other, [`Parallel`]
//! hands them to rayon. Collapse cursors never wait on their siblings, so
//! either strategy yields the same, order-preserving output.

use std::sync::Arc;

use rayon::{ThreadPool, ThreadPoolBuilder};

use crate::cursor::Cursor;
use crate::error::Result;
use crate::settings::CollapseSettings;

pub trait Strategy: Clone + Send + Sync {
    fn join<L, LO, R, RO>(&self, left: L, right: R) -> (LO, RO)
    where
        L: FnOnce() -> LO + Send,
        R: FnOnce() -> RO + Send,
        LO: Send,
        RO: Send;
}

#[derive(Default, Debug, Clone)]
pub struct Sequential;

impl Strategy for Sequential {
    fn join<L, LO, R, RO>(&self, left: L, right: R) -> (LO, RO)
    where
        L: FnOnce() -> LO + Send,
        R: FnOnce() -> RO + Send,
        LO: Send,
        RO: Send,
    {
        (left(), right())
    }
}

/// Runs on a dedicated pool, or on rayon's global pool when none is given.
#[derive(Default, Debug, Clone)]
pub struct Parallel {
    thread_pool: Option<Arc<ThreadPool>>,
}

impl Parallel {
    pub const fn global() -> Self {
        Self { thread_pool: None }
    }

    pub const fn new(thread_pool: Arc<ThreadPool>) -> Self {
        Self {
            thread_pool: Some(thread_pool),
        }
    }

    pub fn with_threads(threads: usize) -> Result<Self> {
        let pool = ThreadPoolBuilder::new().num_threads(threads).build()?;
        Ok(Self::new(Arc::new(pool)))
    }
}

impl From<Arc<ThreadPool>> for Parallel {
    fn from(thread_pool: Arc<ThreadPool>) -> Self {
        Self::new(thread_pool)
    }
}

impl Strategy for Parallel {
    fn join<L, LO, R, RO>(&self, left: L, right: R) -> (LO, RO)
    where
        L: FnOnce() -> LO + Send,
        R: FnOnce() -> RO + Send,
        LO: Send,
        RO: Send,
    {
        match &self.thread_pool {
            Some(pool) => pool.install(|| rayon::join(left, right)),
            None => rayon::join(left, right),
        }
    }
}

/// Drains `cursor` after splitting it up to `max_depth` times.
///
/// Each level asks the cursor for a prefix; the prefix and the remainder are
/// drained through `strategy` and their outputs concatenated in order.
pub fn drain_split<St, Cu>(strategy: &St, mut cursor: Cu, max_depth: usize) -> Vec<Cu::Item>
where
    St: Strategy,
    Cu: Cursor + Send,
    Cu::Item: Send,
{
    if max_depth > 0 {
        if let Some(prefix) = cursor.try_split() {
            let (mut left, right) = strategy.join(
                || drain_split(strategy, prefix, max_depth - 1),
                || drain_split(strategy, cursor, max_depth - 1),
            );
            left.extend(right);
            return left;
        }
    }
    let mut out = Vec::new();
    cursor.for_each_remaining(|item| out.push(item));
    out
}

/// Drains `cursor` the way `settings` asks for.
pub fn collect<Cu>(cursor: Cu, settings: &CollapseSettings) -> Result<Vec<Cu::Item>>
where
    Cu: Cursor + Send,
    Cu::Item: Send,
{
    settings.validate()?;
    if !settings.parallel {
        log::debug!("draining sequentially");
        return Ok(drain_split(&Sequential, cursor, 0));
    }
    let strategy = match settings.threads {
        Some(threads) => Parallel::with_threads(threads)?,
        None => Parallel::global(),
    };
    log::debug!(
        "draining in parallel (max split depth {}, threads {:?})",
        settings.max_split_depth,
        settings.threads
    );
    Ok(drain_split(&strategy, cursor, settings.max_split_depth))
}
