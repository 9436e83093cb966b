//! Criterion benchmarks for the packed bit-set bulk operations.
//!
//! Two sizes: a 256-bit set (typical per-unit flag block) and a 65536-bit
//! set (world-scale occupancy mask). The word-at-a-time paths should stay
//! well under a microsecond for the small size.

use std::hint::black_box;

use criterion::{Criterion, criterion_group, criterion_main};
use tally_bits::BitSet;

fn make_pair(len: usize) -> (BitSet, BitSet) {
    let a = BitSet::from_bits((0..len).map(|i| i % 3 == 0));
    let b = BitSet::from_bits((0..len).map(|i| i % 5 == 0));
    (a, b)
}

fn bench_bulk_ops(c: &mut Criterion) {
    for len in [256usize, 65_536] {
        let (a, b) = make_pair(len);

        c.bench_function(&format!("or/{len}"), |bencher| {
            bencher.iter(|| {
                let mut s = a.clone();
                s.or(black_box(&b)).unwrap();
                s
            })
        });

        c.bench_function(&format!("count_ones/{len}"), |bencher| {
            bencher.iter(|| black_box(&a).count_ones())
        });

        c.bench_function(&format!("coincides/{len}"), |bencher| {
            bencher.iter(|| black_box(&a).coincides(black_box(&b)).unwrap())
        });

        c.bench_function(&format!("invert/{len}"), |bencher| {
            bencher.iter(|| {
                let mut s = a.clone();
                s.invert();
                s
            })
        });
    }
}

fn bench_cursor_walk(c: &mut Criterion) {
    let (a, _) = make_pair(65_536);
    c.bench_function("cursor_walk/65536", |bencher| {
        bencher.iter(|| {
            let mut cursor = a.cursor();
            let mut ones = 0usize;
            while let Some(bit) = cursor.next(&a).unwrap() {
                ones += bit as usize;
            }
            ones
        })
    });
}

criterion_group!(benches, bench_bulk_ops, bench_cursor_walk);
criterion_main!(benches);
