// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena-backed R-tree with least-enlargement descent and quadratic splits.

use alloc::vec;
use alloc::vec::Vec;
use core::fmt::Debug;

use crate::config::Fanout;
use crate::error::Error;
use crate::node::{Entry, Node, NodeId};
use crate::types::{Rect, Scalar, ScalarAcc};

/// Dynamic R-tree mapping rectangles to values.
///
/// Nodes live in a growable arena and reference children by [`NodeId`]. Nodes are
/// appended as splits happen and never freed, so the arena only grows.
pub struct RTree<T: Scalar, V> {
    fanout: Fanout,
    root: NodeId,
    arena: Vec<Node<T, V>>,
    // Parallel to `arena`; `None` only for the root.
    parents: Vec<Option<NodeId>>,
    len: usize,
}

/// Result of partitioning an overfull entry list in two.
struct Split<T, C> {
    left: Vec<Entry<T, C>>,
    left_bbox: Rect<T>,
    right: Vec<Entry<T, C>>,
    right_bbox: Rect<T>,
}

impl<T: Scalar, V> Default for RTree<T, V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Scalar, V> RTree<T, V> {
    /// Create an empty tree with the default fanout (2 to 4 entries per node).
    pub fn new() -> Self {
        Self::with_fanout(Fanout::DEFAULT)
    }

    /// Create an empty tree with the given fanout.
    ///
    /// The tree starts with a single empty leaf as its root.
    pub fn with_fanout(fanout: Fanout) -> Self {
        Self {
            fanout,
            root: NodeId::new(0),
            arena: vec![Node::Leaf(Vec::new())],
            parents: vec![None],
            len: 0,
        }
    }

    /// The fanout this tree was built with.
    pub fn fanout(&self) -> Fanout {
        self.fanout
    }

    /// Number of stored values.
    pub fn len(&self) -> usize {
        self.len
    }

    /// Whether no values are stored.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of nodes allocated in the arena. Never decreases.
    pub fn node_count(&self) -> usize {
        self.arena.len()
    }

    /// Handle of the current root node.
    pub fn root(&self) -> NodeId {
        self.root
    }

    /// Look up a node by handle.
    pub fn node(&self, id: NodeId) -> Option<&Node<T, V>> {
        self.arena.get(id.index())
    }

    /// Number of levels, counting the leaf level. A tree whose root is a leaf has height 1.
    pub fn height(&self) -> usize {
        let mut height = 1;
        let mut id = self.root;
        while let Node::Internal(entries) = &self.arena[id.index()] {
            let Some(first) = entries.first() else {
                break;
            };
            height += 1;
            id = first.content;
        }
        height
    }

    /// Minimum bounding rectangle of everything stored, or `None` if empty.
    pub fn bounds(&self) -> Option<Rect<T>> {
        self.arena[self.root.index()].mbr()
    }

    /// Insert `value` at `rect`.
    ///
    /// `rect` must be well ordered (`min <= max` on both axes); this is not checked.
    /// Use [`RTree::try_insert`] for untrusted rectangles.
    pub fn insert(&mut self, rect: Rect<T>, value: V) {
        let leaf = self.choose_leaf(&rect);
        match &mut self.arena[leaf.index()] {
            Node::Leaf(entries) => entries.push(Entry::new(rect, value)),
            Node::Internal(_) => unreachable!("choose_leaf stops at a leaf"),
        }
        self.len += 1;

        let mut overfull = leaf;
        while self.arena[overfull.index()].len() > self.fanout.max_entries() {
            match self.split_node(overfull) {
                Some(parent) => overfull = parent,
                None => break,
            }
        }
    }

    /// Insert `value` at `rect`, rejecting malformed rectangles.
    ///
    /// On error the tree is left unchanged.
    pub fn try_insert(&mut self, rect: Rect<T>, value: V) -> Result<(), Error> {
        if !rect.is_valid() {
            return Err(Error::InvalidGeometry);
        }
        self.insert(rect, value);
        Ok(())
    }

    /// Values whose rectangle overlaps `rect`, in depth-first entry order.
    ///
    /// Rectangles that only touch `rect` along an edge are not reported.
    pub fn range_query(&self, rect: &Rect<T>) -> Vec<&V> {
        let mut out = Vec::new();
        self.range_query_with(rect, |_, v| out.push(v));
        out
    }

    /// Visit every stored `(rect, value)` overlapping `rect`, in the same order as
    /// [`RTree::range_query`], without collecting.
    pub fn range_query_with<'a, F>(&'a self, rect: &Rect<T>, visit: F)
    where
        F: FnMut(&'a Rect<T>, &'a V),
    {
        self.walk(|bbox| bbox.overlaps(rect), visit);
    }

    /// Values whose rectangle contains the point. Bounds are inclusive.
    pub fn query_point(&self, x: T, y: T) -> Vec<&V> {
        let mut out = Vec::new();
        self.walk(|bbox| bbox.contains_point(x, y), |_, v| out.push(v));
        out
    }

    /// Every stored `(rect, value)` in depth-first order.
    pub fn iter(&self) -> impl Iterator<Item = (&Rect<T>, &V)> + '_ {
        let mut out = Vec::with_capacity(self.len);
        self.walk(|_| true, |r, v| out.push((r, v)));
        out.into_iter()
    }

    /// Depth-first traversal descending only into entries accepted by `keep`.
    fn walk<'a, K, F>(&'a self, mut keep: K, mut visit: F)
    where
        K: FnMut(&Rect<T>) -> bool,
        F: FnMut(&'a Rect<T>, &'a V),
    {
        let mut stack = vec![self.root];
        while let Some(id) = stack.pop() {
            match &self.arena[id.index()] {
                Node::Leaf(entries) => {
                    for e in entries {
                        if keep(&e.bbox) {
                            visit(&e.bbox, &e.content);
                        }
                    }
                }
                Node::Internal(entries) => {
                    // Reversed so the first entry is popped first.
                    for e in entries.iter().rev() {
                        if keep(&e.bbox) {
                            stack.push(e.content);
                        }
                    }
                }
            }
        }
    }

    /// Descend to the leaf that should receive `rect`, expanding every entry on the
    /// path to cover it.
    fn choose_leaf(&mut self, rect: &Rect<T>) -> NodeId {
        let mut id = self.root;
        loop {
            let Node::Internal(entries) = &mut self.arena[id.index()] else {
                return id;
            };
            let best = least_enlargement(entries, rect);
            let entry = &mut entries[best];
            entry.bbox.expand(rect);
            id = entry.content;
        }
    }

    /// Split an overfull node in two and link the new half into the parent, growing a
    /// new root if `id` is the root.
    ///
    /// Returns the parent that received the new entry, which may itself be overfull now.
    fn split_node(&mut self, id: NodeId) -> Option<NodeId> {
        let node = core::mem::replace(&mut self.arena[id.index()], Node::Leaf(Vec::new()));
        let (kept, moved, kept_bbox, moved_bbox) = match node {
            Node::Leaf(entries) => {
                let s = quadratic_split(entries);
                (
                    Node::Leaf(s.left),
                    Node::Leaf(s.right),
                    s.left_bbox,
                    s.right_bbox,
                )
            }
            Node::Internal(entries) => {
                let s = quadratic_split(entries);
                (
                    Node::Internal(s.left),
                    Node::Internal(s.right),
                    s.left_bbox,
                    s.right_bbox,
                )
            }
        };
        log::trace!(
            "split node {} into {} + {} entries",
            id.index(),
            kept.len(),
            moved.len()
        );
        self.arena[id.index()] = kept;
        let sibling = self.alloc(moved);
        if let Node::Internal(entries) = &self.arena[sibling.index()] {
            for e in entries {
                self.parents[e.content.index()] = Some(sibling);
            }
        }

        if id == self.root {
            let root = self.alloc(Node::Internal(vec![
                Entry::new(kept_bbox, id),
                Entry::new(moved_bbox, sibling),
            ]));
            self.parents[id.index()] = Some(root);
            self.parents[sibling.index()] = Some(root);
            self.root = root;
            log::debug!(
                "root split: new root {} (height {}, {} nodes)",
                root.index(),
                self.height(),
                self.arena.len()
            );
            return None;
        }

        let parent = self.parent_of(id);
        let Node::Internal(entries) = &mut self.arena[parent.index()] else {
            panic!("parent {} of node {} is a leaf", parent.index(), id.index());
        };
        let link = entries
            .iter_mut()
            .find(|e| e.content == id)
            .expect("parent holds an entry for each of its children");
        link.bbox = kept_bbox;
        entries.push(Entry::new(moved_bbox, sibling));
        self.parents[sibling.index()] = Some(parent);
        Some(parent)
    }

    fn parent_of(&self, id: NodeId) -> NodeId {
        match self.parents.get(id.index()).copied().flatten() {
            Some(parent) => parent,
            None => panic!("non-root node {} has no parent", id.index()),
        }
    }

    fn alloc(&mut self, node: Node<T, V>) -> NodeId {
        let id = NodeId::new(self.arena.len());
        self.arena.push(node);
        self.parents.push(None);
        id
    }
}

/// Index of the entry whose bounding box grows least to cover `rect`; the first wins ties.
fn least_enlargement<T: Scalar, C>(entries: &[Entry<T, C>], rect: &Rect<T>) -> usize {
    let mut best_idx = 0_usize;
    let mut best_cost: Option<ScalarAcc<T>> = None;
    for (i, e) in entries.iter().enumerate() {
        let cost = e.bbox.enlargement(rect);
        if best_cost.map(|bc| cost < bc).unwrap_or(true) {
            best_cost = Some(cost);
            best_idx = i;
        }
    }
    best_idx
}

/// The pair `(i, j)`, `i < j`, wasting the most area if grouped together:
/// `area(union) - area(i) - area(j)`. The first pair wins ties.
fn pick_seeds<T: Scalar, C>(entries: &[Entry<T, C>]) -> (usize, usize) {
    debug_assert!(entries.len() >= 2, "a split needs at least two entries");
    let mut best = (0, 1);
    let mut best_waste: Option<ScalarAcc<T>> = None;
    for (i, a) in entries.iter().enumerate() {
        for (j, b) in entries.iter().enumerate().skip(i + 1) {
            let waste = a.bbox.union(&b.bbox).area() - a.bbox.area() - b.bbox.area();
            if best_waste.map(|bw| waste > bw).unwrap_or(true) {
                best_waste = Some(waste);
                best = (i, j);
            }
        }
    }
    best
}

/// Quadratic split: seed two groups with [`pick_seeds`], then hand each remaining
/// entry, in order, to the group whose bounding box grows less (left on ties).
///
/// Group sizes are not rebalanced, so a group may end up below the fanout minimum.
fn quadratic_split<T: Scalar, C>(mut entries: Vec<Entry<T, C>>) -> Split<T, C> {
    let (i, j) = pick_seeds(&entries);
    // Remove the later seed first so `i` stays valid.
    let seed_right = entries.remove(j);
    let seed_left = entries.remove(i);

    let mut left_bbox = seed_left.bbox;
    let mut right_bbox = seed_right.bbox;
    let mut left = Vec::with_capacity(entries.len() + 1);
    let mut right = Vec::with_capacity(entries.len() + 1);
    left.push(seed_left);
    right.push(seed_right);

    for e in entries {
        if left_bbox.enlargement(&e.bbox) <= right_bbox.enlargement(&e.bbox) {
            left_bbox.expand(&e.bbox);
            left.push(e);
        } else {
            right_bbox.expand(&e.bbox);
            right.push(e);
        }
    }

    Split {
        left,
        left_bbox,
        right,
        right_bbox,
    }
}

impl<T: Scalar, V> Debug for RTree<T, V> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("RTree")
            .field("fanout", &self.fanout)
            .field("len", &self.len)
            .field("arena_nodes", &self.arena.len())
            .field("root", &self.root)
            .field("height", &self.height())
            .finish_non_exhaustive()
    }
}

/// Convenience type aliases.
/// R-tree with i64 coordinates and i128 metrics.
pub type RTreeI64<V> = RTree<i64, V>;

/// R-tree with f32 coordinates and f64 metrics.
pub type RTreeF32<V> = RTree<f32, V>;

/// R-tree with f64 coordinates and f64 metrics.
pub type RTreeF64<V> = RTree<f64, V>;
