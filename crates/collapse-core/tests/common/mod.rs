//! Helpers shared by the integration tests.
#![allow(dead_code)]

use std::collections::VecDeque;

use collapse_core::{Characteristics, Cursor};

/// Small deterministic generator so failures replay exactly.
#[derive(Debug, Clone)]
pub struct Lcg(u64);

impl Lcg {
    pub fn new(seed: u64) -> Self {
        Self(seed ^ 0x9E37_79B9_7F4A_7C15)
    }

    pub fn next_u64(&mut self) -> u64 {
        self.0 = self
            .0
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);
        self.0 >> 33
    }

    /// Uniform-ish value in `0..bound`.
    pub fn below(&mut self, bound: usize) -> usize {
        (self.next_u64() % bound as u64) as usize
    }

    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        for i in (1..items.len()).rev() {
            let j = self.below(i + 1);
            items.swap(i, j);
        }
    }
}

/// Source that cuts at unpredictable positions, including the very ends, so
/// splits can produce empty segments. Reports no size guarantees.
#[derive(Debug, Clone)]
pub struct SkewedCursor<T> {
    items: VecDeque<T>,
    rng: Lcg,
}

impl<T> SkewedCursor<T> {
    pub fn new(items: Vec<T>, seed: u64) -> Self {
        Self {
            items: items.into(),
            rng: Lcg::new(seed),
        }
    }
}

impl<T> Cursor for SkewedCursor<T> {
    type Item = T;

    fn try_advance(&mut self) -> Option<T> {
        self.items.pop_front()
    }

    fn try_split(&mut self) -> Option<Self> {
        if self.items.is_empty() {
            return None;
        }
        let cut = self.rng.below(self.items.len() + 1);
        let suffix = self.items.split_off(cut);
        let prefix = std::mem::replace(&mut self.items, suffix);
        let seed = self.rng.next_u64();
        Some(Self {
            items: prefix,
            rng: Lcg::new(seed),
        })
    }

    fn estimate_size(&self) -> usize {
        self.items.len()
    }

    fn characteristics(&self) -> Characteristics {
        Characteristics::ORDERED
    }
}

/// Drains a cursor through repeated single advances.
pub fn drain<Cu: Cursor>(cursor: &mut Cu) -> Vec<Cu::Item> {
    let mut out = Vec::new();
    while let Some(item) = cursor.try_advance() {
        out.push(item);
    }
    out
}

/// Splits leaves picked by `picks`, keeping the leaves in left-to-right order.
pub fn split_leaves<Cu: Cursor>(root: Cu, picks: &[usize]) -> Vec<Cu> {
    let mut leaves = vec![root];
    for &pick in picks {
        let idx = pick % leaves.len();
        if let Some(prefix) = leaves[idx].try_split() {
            leaves.insert(idx, prefix);
        }
    }
    leaves
}

/// Turns arbitrary picks into a permutation of `0..len`.
pub fn permutation(len: usize, picks: &[usize]) -> Vec<usize> {
    let mut pool: Vec<usize> = (0..len).collect();
    let mut order = Vec::with_capacity(len);
    let mut picks = picks.iter().cycle();
    while !pool.is_empty() {
        let pick = picks.next().copied().unwrap_or(0);
        order.push(pool.remove(pick % pool.len()));
    }
    order
}
