// Copyright 2025 Neuraville Inc.
// SPDX-License-Identifier: Apache-2.0

//! # Rule Kernel Benchmarks
//!
//! Sequential vs row-parallel CPU evaluation on random soups, to find where
//! the parallel row threshold pays off. Includes the WGPU kernel when built
//! with `gpu` and an adapter is present.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::{rngs::StdRng, Rng, SeedableRng};
use scrollife_engine::{CellMatrix, CpuKernel, RuleKernel};
use scrollife_structures::{GridBoundingRectangle, GridVector2};

/// Square soup of `side` x `side` cells at 30% density.
fn create_soup(side: i32) -> CellMatrix {
    let mut rng = StdRng::seed_from_u64(side as u64);
    let cells: Vec<GridVector2> = (0..side)
        .flat_map(|y| (0..side).map(move |x| GridVector2::new(x, y)))
        .filter(|_| rng.gen_bool(0.3))
        .collect();
    let bounds = GridBoundingRectangle::new(0, 0, side, side).unwrap();
    CellMatrix::from_cells(&bounds, &cells)
}

fn bench_cpu_kernel(c: &mut Criterion) {
    let mut group = c.benchmark_group("cpu_kernel");

    let test_sizes = vec![(64, "64"), (256, "256"), (1024, "1K"), (2048, "2K")];

    for (side, label) in test_sizes {
        let soup = create_soup(side);
        group.throughput(Throughput::Elements((side * side) as u64));

        group.bench_with_input(BenchmarkId::new("sequential", label), &soup, |b, soup| {
            let kernel = CpuKernel::sequential();
            b.iter(|| kernel.next_generation(black_box(soup)));
        });

        group.bench_with_input(BenchmarkId::new("parallel", label), &soup, |b, soup| {
            let kernel = CpuKernel::new(1);
            b.iter(|| kernel.next_generation(black_box(soup)));
        });
    }

    group.finish();
}

#[cfg(feature = "gpu")]
fn bench_gpu_kernel(c: &mut Criterion) {
    use scrollife_engine::WgpuKernel;

    let kernel = match WgpuKernel::new() {
        Ok(kernel) => kernel,
        Err(e) => {
            println!("GPU not available, skipping GPU benchmarks: {}", e);
            return;
        }
    };

    let mut group = c.benchmark_group("gpu_kernel");
    for (side, label) in [(256, "256"), (1024, "1K"), (2048, "2K")] {
        let soup = create_soup(side);
        group.throughput(Throughput::Elements((side * side) as u64));
        group.bench_with_input(BenchmarkId::new("wgpu", label), &soup, |b, soup| {
            b.iter(|| kernel.next_generation(black_box(soup)));
        });
    }
    group.finish();
}

#[cfg(feature = "gpu")]
criterion_group!(benches, bench_cpu_kernel, bench_gpu_kernel);
#[cfg(not(feature = "gpu"))]
criterion_group!(benches, bench_cpu_kernel);
criterion_main!(benches);
