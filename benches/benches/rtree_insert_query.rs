// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use understory_rtree::{Fanout, RTree, Rect};

fn gen_grid_rects(n: usize, cell: f64) -> Vec<Rect<f64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as f64 * cell;
            let y0 = y as f64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

fn gen_grid_rects_i64(n: usize, cell: i64) -> Vec<Rect<i64>> {
    let mut out = Vec::with_capacity(n * n);
    for y in 0..n {
        for x in 0..n {
            let x0 = x as i64 * cell;
            let y0 = y as i64 * cell;
            out.push(Rect::new(x0, y0, x0 + cell, y0 + cell));
        }
    }
    out
}

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_random_rects(count: usize, extent: f64, side: f64) -> Vec<Rect<f64>> {
    let mut out = Vec::with_capacity(count);
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    for _ in 0..count {
        let x0 = rng.next_f64() * (extent - side).max(1.0);
        let y0 = rng.next_f64() * (extent - side).max(1.0);
        out.push(Rect::new(x0, y0, x0 + side, y0 + side));
    }
    out
}

fn gen_clustered_rects(n_clusters: usize, per_cluster: usize, spread: f64) -> Vec<Rect<f64>> {
    let mut out = Vec::with_capacity(n_clusters * per_cluster);
    let mut rng = Rng::new(0xC1A5_7E55_9999_ABCD);
    let mut centers = Vec::with_capacity(n_clusters);
    for _ in 0..n_clusters {
        centers.push((rng.next_f64() * 2000.0, rng.next_f64() * 2000.0));
    }
    for (cx, cy) in centers {
        for _ in 0..per_cluster {
            let x0 = cx + (rng.next_f64() - 0.5) * spread;
            let y0 = cy + (rng.next_f64() - 0.5) * spread;
            out.push(Rect::new(x0, y0, x0 + 12.0, y0 + 12.0));
        }
    }
    out
}

fn bench_insert_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_f64_grid");
    for &n in &[16usize, 32, 64] {
        let rects = gen_grid_rects(n, 10.0);
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("insert_query_n{}", n), |b| {
            b.iter_batched(
                RTree::<f64, u32>::new,
                |mut tree| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        tree.insert(r, i as u32);
                    }
                    let hits = tree
                        .range_query(&Rect::new(100.0, 100.0, 300.0, 300.0))
                        .len();
                    black_box(hits);
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_insert_i64(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_i64_grid");
    let rects = gen_grid_rects_i64(48, 10);
    group.throughput(Throughput::Elements(rects.len() as u64));
    group.bench_function("insert_query", |b| {
        b.iter_batched(
            RTree::<i64, u32>::new,
            |mut tree| {
                for (i, r) in rects.iter().copied().enumerate() {
                    tree.insert(r, i as u32);
                }
                let hits = tree.range_query(&Rect::new(100, 100, 300, 300)).len();
                black_box(hits);
            },
            BatchSize::SmallInput,
        )
    });
    group.finish();
}

fn bench_fanouts(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_f64_fanout");
    let rects = gen_random_rects(2048, 2000.0, 12.0);
    group.throughput(Throughput::Elements(rects.len() as u64));
    for &(min, max) in &[(2usize, 4usize), (4, 8), (8, 16), (16, 32)] {
        let fanout = Fanout::new(min, max).expect("valid fanout");
        group.bench_function(format!("insert_random_m{}_M{}", min, max), |b| {
            b.iter_batched(
                || RTree::<f64, u32>::with_fanout(fanout),
                |mut tree| {
                    for (i, r) in rects.iter().copied().enumerate() {
                        tree.insert(r, i as u32);
                    }
                    black_box(tree.node_count());
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_query_heavy(c: &mut Criterion) {
    let mut group = c.benchmark_group("rtree_f64_query_heavy");
    let rects = gen_clustered_rects(32, 64, 200.0);
    let mut tree = RTree::<f64, u32>::with_fanout(Fanout::new(4, 8).expect("valid fanout"));
    for (i, r) in rects.iter().copied().enumerate() {
        tree.insert(r, i as u32);
    }
    group.bench_function("many_window_queries", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..256 {
                let x = (q % 16) as f64 * 125.0;
                let y = (q / 16) as f64 * 125.0;
                total += tree
                    .range_query(&Rect::new(x, y, x + 150.0, y + 150.0))
                    .len();
            }
            black_box(total);
        })
    });
    group.bench_function("many_point_queries", |b| {
        b.iter(|| {
            let mut total = 0usize;
            for q in 0..1024 {
                let x = (q % 32) as f64 * 62.5;
                let y = (q / 32) as f64 * 62.5;
                total += tree.query_point(x, y).len();
            }
            black_box(total);
        })
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_insert_grid,
    bench_insert_i64,
    bench_fanouts,
    bench_query_heavy
);
criterion_main!(benches);
