// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Errors reported for rejected input.
//!
//! Structural corruption inside the tree is not represented here; it panics.

use thiserror::Error;

/// Errors returned by checked constructors and insertion.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Error)]
pub enum Error {
    /// A rectangle has a minimum greater than its maximum on some axis (or NaN bounds).
    #[error("invalid geometry: rectangle minimum exceeds maximum")]
    InvalidGeometry,

    /// A fanout configuration the tree cannot split with.
    #[error("invalid fanout: min_entries={min_entries}, max_entries={max_entries}")]
    InvalidFanout {
        /// Requested lower bound.
        min_entries: usize,
        /// Requested upper bound.
        max_entries: usize,
    },
}
