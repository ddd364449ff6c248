// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_rtree --heading-base-level=0

//! Understory R-Tree: a dynamic 2D R-tree over axis-aligned rectangles.
//!
//! - Insert values tagged with a rectangle.
//! - Query every value whose rectangle overlaps a window, or contains a point.
//! - Nodes live in a growable arena and refer to their children by handle.
//!
//! It is generic over the scalar type `T` (`f32`, `f64`, `i64`) and does not depend on any
//! geometry crate. Areas are compared in a widened accumulator (f32→f64, f64→f64, i64→i128).
//!
//! # Example
//!
//! ```rust
//! use understory_rtree::{RTree, Rect};
//!
//! let mut tree: RTree<f64, u32> = RTree::new();
//! tree.insert(Rect::new(0.0, 0.0, 5.0, 5.0), 1);
//! tree.insert(Rect::new(6.0, 6.0, 10.0, 10.0), 2);
//!
//! let mut hits: Vec<u32> = tree
//!     .range_query(&Rect::new(0.0, 0.0, 10.0, 10.0))
//!     .into_iter()
//!     .copied()
//!     .collect();
//! hits.sort();
//! assert_eq!(hits, [1, 2]);
//!
//! // Rectangles that only share an edge with the query do not overlap it.
//! assert!(tree.range_query(&Rect::new(10.0, 0.0, 20.0, 10.0)).is_empty());
//! ```
//!
//! Fanout is fixed per tree at construction:
//!
//! ```rust
//! use understory_rtree::{Fanout, RTree, Rect};
//!
//! let fanout = Fanout::new(4, 16).unwrap();
//! let mut tree: RTree<i64, &str> = RTree::with_fanout(fanout);
//! tree.insert(Rect::new(0, 0, 10, 10), "a");
//! assert!(tree.try_insert(Rect::new(10, 0, 0, 10), "inverted").is_err());
//! assert_eq!(tree.len(), 1);
//! ```
//!
//! ## How insertion works
//!
//! - Descend from the root, at each level picking the entry whose bounding box grows least
//!   to cover the new rectangle (first entry wins ties) and expanding it on the way down.
//! - Append the value to the leaf reached. If the leaf now holds more than
//!   [`Fanout::max_entries`] entries, split it.
//! - A split seeds two groups with the pair of entries that would waste the most area
//!   together, then hands each remaining entry to the group whose box grows less.
//!   The original node keeps the first group; a new node gets the second and is linked
//!   into the parent, which may overflow and split in turn. Splitting the root grows a
//!   new root.
//!
//! Splits do not rebalance groups, so a node may end up with fewer than
//! [`Fanout::min_entries`] entries.
//!
//! ## Limits
//!
//! There is no removal. Nodes are only ever appended to the arena, so memory grows with
//! the number of insertions. The tree has no internal synchronization; mutation takes
//! `&mut self`.
//!
//! Splits and root growth are reported through the [`log`] facade at `trace` and `debug`
//! level.
//!
//! ### Float semantics
//!
//! This crate assumes no NaNs for floating-point coordinates.
//! [`Rect::try_new`] and [`RTree::try_insert`] reject them along with inverted rectangles.

#![no_std]

extern crate alloc;

pub mod config;
pub mod error;
pub mod node;
pub mod tree;
pub mod types;

pub use config::Fanout;
pub use error::Error;
pub use node::{Entry, Node, NodeId};
pub use tree::{RTree, RTreeF32, RTreeF64, RTreeI64};
pub use types::{Rect, Scalar};
