// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Construction-time fanout configuration.

use crate::error::Error;

/// Bounds on the number of entries per node.
///
/// `max_entries` is enforced: a node holding more entries after an insertion is split.
/// `min_entries` is the intended fill after a split; it is advisory and splits may
/// leave a node below it.
///
/// Construction is deliberately tighter than the advisory role of `min_entries`
/// requires: [`Fanout::new`] rejects `min_entries > max_entries / 2`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Fanout {
    min_entries: usize,
    max_entries: usize,
}

impl Fanout {
    /// Fanout used by [`RTree::new`](crate::RTree::new): 2 to 4 entries per node.
    pub const DEFAULT: Self = Self {
        min_entries: 2,
        max_entries: 4,
    };

    /// Create a fanout configuration.
    ///
    /// Requires `max_entries >= 2` and `1 <= min_entries <= max_entries / 2`.
    ///
    /// The upper bound on `min_entries` is stricter than the tree needs: splits never
    /// enforce the minimum. It is rejected anyway because no split of `max_entries + 1`
    /// entries could fill both halves to a larger minimum, so `(3, 4)` is an error.
    pub const fn new(min_entries: usize, max_entries: usize) -> Result<Self, Error> {
        if max_entries < 2 || min_entries == 0 || min_entries > max_entries / 2 {
            return Err(Error::InvalidFanout {
                min_entries,
                max_entries,
            });
        }
        Ok(Self {
            min_entries,
            max_entries,
        })
    }

    /// Intended lower bound on entries per non-root node.
    pub const fn min_entries(&self) -> usize {
        self.min_entries
    }

    /// Upper bound on entries per node before a split is triggered.
    pub const fn max_entries(&self) -> usize {
        self.max_entries
    }
}

impl Default for Fanout {
    fn default() -> Self {
        Self::DEFAULT
    }
}
