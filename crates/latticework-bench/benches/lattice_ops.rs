//! Criterion micro-benchmarks for lattice construction and traversal.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use latticework_core::CoordVector;
use latticework_space::{Boundary, LatticeBuilder};
use latticework_test_utils::torus;

/// Benchmark: Build a 100x100 cyclic grid from a single cell.
fn bench_build_torus_10k(c: &mut Criterion) {
    c.bench_function("build_torus_10k", |b| {
        b.iter(|| {
            let mut builder = LatticeBuilder::new(0u8, 1).unwrap();
            builder.add_dimension(100, Boundary::Cyclic).unwrap();
            builder.add_dimension(100, Boundary::Cyclic).unwrap();
            black_box(builder.into_lattice());
        });
    });
}

/// Benchmark: Build a 20x20x20 grid with mixed boundaries.
fn bench_build_mixed_8k(c: &mut Criterion) {
    c.bench_function("build_mixed_8k", |b| {
        b.iter(|| {
            let mut builder = LatticeBuilder::new(0u8, 1).unwrap();
            builder.add_dimension(20, Boundary::Linear).unwrap();
            builder.add_dimension(20, Boundary::Cyclic).unwrap();
            builder.add_dimension(20, Boundary::Linear).unwrap();
            black_box(builder.into_lattice());
        });
    });
}

/// Benchmark: Breadth-first traversal over all 10K cells.
fn bench_traverse_torus_10k(c: &mut Criterion) {
    let lattice = torus(0u8, 100, 2).unwrap();

    c.bench_function("traverse_torus_10k", |b| {
        b.iter(|| {
            let n = lattice.iter().count();
            black_box(n);
        });
    });
}

/// Benchmark: relative_cell() for 1000 deterministic offsets on a 100x100 torus.
fn bench_relative_cell_torus(c: &mut Criterion) {
    let lattice = torus(0u8, 100, 2).unwrap();
    let origin = lattice.origin();

    let offsets: Vec<[i32; 2]> = (0u64..1000)
        .map(|i| {
            let x = (i.wrapping_mul(6364136223846793007) % 200) as i32 - 100;
            let y = (i.wrapping_mul(1442695040888963407) % 200) as i32 - 100;
            [x, y]
        })
        .collect();

    c.bench_function("relative_cell_torus", |b| {
        b.iter(|| {
            for off in &offsets {
                black_box(lattice.relative_cell(origin, off).unwrap());
            }
        });
    });
}

/// Benchmark: Coordinate lookup of the far corner on a 30x30 torus.
fn bench_cell_by_coord(c: &mut Criterion) {
    let lattice = torus(0u8, 30, 2).unwrap();
    let corner = CoordVector::from_slice(&[29, 29]);

    c.bench_function("cell_by_coord_900", |b| {
        b.iter(|| black_box(lattice.cell_by_coord(&corner)));
    });
}

criterion_group!(
    benches,
    bench_build_torus_10k,
    bench_build_mixed_8k,
    bench_traverse_torus_10k,
    bench_relative_cell_torus,
    bench_cell_by_coord
);
criterion_main!(benches);
