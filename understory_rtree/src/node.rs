// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Arena node and entry types.

use alloc::vec::Vec;

use crate::types::Rect;

/// Handle of a node in the tree's arena.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NodeId(usize);

impl NodeId {
    pub(crate) const fn new(i: usize) -> Self {
        Self(i)
    }

    /// Position of the node in the arena.
    pub const fn index(self) -> usize {
        self.0
    }
}

/// A bounding rectangle paired with its content.
///
/// Leaf entries carry the stored value (`C = V`); internal entries carry the
/// handle of the child node they summarize (`C = NodeId`).
#[derive(Clone, Debug, PartialEq)]
pub struct Entry<T, C> {
    pub(crate) bbox: Rect<T>,
    pub(crate) content: C,
}

impl<T: Copy, C> Entry<T, C> {
    pub(crate) const fn new(bbox: Rect<T>, content: C) -> Self {
        Self { bbox, content }
    }

    /// The entry's bounding rectangle.
    ///
    /// For a leaf entry this is the inserted rectangle; for an internal entry it is
    /// the minimum bounding rectangle of the child's entries.
    pub fn bbox(&self) -> Rect<T> {
        self.bbox
    }

    /// The stored value (leaf) or child handle (internal).
    pub fn content(&self) -> &C {
        &self.content
    }
}

impl<T: Copy> Entry<T, NodeId> {
    /// The child node this entry summarizes.
    pub fn child(&self) -> NodeId {
        self.content
    }
}

/// A node in the arena: an ordered list of entries, either all leaf entries or all
/// internal entries.
#[derive(Clone, Debug, PartialEq)]
pub enum Node<T, V> {
    /// Entries hold stored values.
    Leaf(Vec<Entry<T, V>>),
    /// Entries reference child nodes.
    Internal(Vec<Entry<T, NodeId>>),
}

impl<T, V> Node<T, V> {
    /// Whether the node's entries hold values directly.
    pub fn is_leaf(&self) -> bool {
        matches!(self, Self::Leaf(_))
    }

    /// Number of entries in the node.
    pub fn len(&self) -> usize {
        match self {
            Self::Leaf(e) => e.len(),
            Self::Internal(e) => e.len(),
        }
    }

    /// Whether the node has no entries. Only a fresh root is ever empty.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Leaf entries, or `None` for an internal node.
    pub fn leaf_entries(&self) -> Option<&[Entry<T, V>]> {
        match self {
            Self::Leaf(e) => Some(e),
            Self::Internal(_) => None,
        }
    }

    /// Internal entries, or `None` for a leaf.
    pub fn internal_entries(&self) -> Option<&[Entry<T, NodeId>]> {
        match self {
            Self::Leaf(_) => None,
            Self::Internal(e) => Some(e),
        }
    }
}

impl<T: Copy + PartialOrd, V> Node<T, V> {
    /// Minimum bounding rectangle of all entries, or `None` if empty.
    pub fn mbr(&self) -> Option<Rect<T>> {
        match self {
            Self::Leaf(e) => mbr_of(e),
            Self::Internal(e) => mbr_of(e),
        }
    }
}

/// Minimum bounding rectangle of a run of entries.
fn mbr_of<T: Copy + PartialOrd, C>(entries: &[Entry<T, C>]) -> Option<Rect<T>> {
    let mut it = entries.iter();
    let first = it.next()?.bbox;
    Some(it.fold(first, |acc, e| acc.union(&e.bbox)))
}
