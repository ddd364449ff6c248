// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Basic usage of Understory R-Tree: insert, grow through splits, and query.
//!
//! Run with `RUST_LOG=trace` to see splits as they happen.

use understory_rtree::{RTreeF32, Rect};

fn main() {
    env_logger::init();

    let mut tree: RTreeF32<u32> = RTreeF32::new();
    tree.insert(Rect::new(0.0, 0.0, 5.0, 5.0), 1);
    tree.insert(Rect::new(6.0, 6.0, 10.0, 10.0), 2);
    tree.insert(Rect::new(11.0, 11.0, 15.0, 15.0), 3);
    tree.insert(Rect::new(16.0, 16.0, 20.0, 20.0), 4);

    let hits = tree.range_query(&Rect::new(10.0, 10.0, 20.0, 20.0));
    println!("hits in (10,10)-(20,20): {:?}", hits);

    // A fifth box overflows the root leaf and splits it.
    tree.insert(Rect::new(2.0, 12.0, 4.0, 14.0), 5);
    println!("{:?}", tree);

    for (rect, value) in tree.iter() {
        println!("{value}: {rect:?}");
    }
}
