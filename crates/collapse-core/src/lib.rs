//! Split-aware collapsing of adjacent runs.
//!
//! ```
//! use collapse_core::{ops, CollapseExt, Cursor, VecCursor};
//!
//! let mut right = VecCursor::new(vec![0, 0, 1, 1, 1, 1, 4, 6, 6, 3, 3, 10]).collapse(ops::dedup());
//! let left = right.try_split().unwrap();
//!
//! let mut out: Vec<i32> = left.collect();
//! out.extend(right);
//! assert_eq!(out, vec![0, 1, 4, 6, 3, 10]);
//! ```

pub mod collapse;
pub mod contract;
pub mod cursor;
pub mod error;
pub mod ops;
pub mod parallel;
pub mod settings;

pub use error::{CollapseError, Result};

pub use collapse::{BoundaryState, CollapseCursor, CollapseExt};
pub use contract::{adjacency, Adjacency, FnAdjacency};
pub use cursor::{Characteristics, Cursor, IterCursor, SliceCursor, VecCursor};
pub use parallel::{collect, drain_split, Parallel, Sequential, Strategy};
pub use settings::CollapseSettings;
