//! Benchmarks for stack partitioning and full arrangement.
//!
//! Run with: cargo bench -p stagger-layout

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use stagger_layout::balancer::{Selector, partition_with};
use stagger_layout::{Arrangement, Size, StackConfig};
use std::hint::black_box;

/// Deterministic pseudo-random extents in `[20, 220)`.
fn extents(count: usize) -> Vec<f64> {
    let mut state = 0x9E37_79B9_7F4A_7C15_u64;
    (0..count)
        .map(|_| {
            state ^= state << 13;
            state ^= state >> 7;
            state ^= state << 17;
            20.0 + (state % 200) as f64
        })
        .collect()
}

fn bench_partition(c: &mut Criterion) {
    let mut group = c.benchmark_group("balancer/partition");

    for items in [100, 10_000] {
        let input = extents(items);
        for stacks in [4, 64] {
            for (name, selector) in [("linear", Selector::Linear), ("heap", Selector::Heap)] {
                group.bench_with_input(
                    BenchmarkId::new(name, format!("{items}x{stacks}")),
                    &input,
                    |b, input| b.iter(|| black_box(partition_with(input, stacks, selector))),
                );
            }
        }
    }

    group.finish();
}

fn bench_arrange(c: &mut Criterion) {
    let mut group = c.benchmark_group("balancer/arrange");

    for items in [100, 10_000] {
        let desired: Vec<Size> = extents(items)
            .into_iter()
            .map(|u| Size::new(u, 0.0))
            .collect();
        for width in [60.0, 240.0] {
            let config = StackConfig::new()
                .with_stack_width(Some(width))
                .expect("no count set");
            group.bench_with_input(
                BenchmarkId::new("stack_width", format!("{items}@{width}")),
                &desired,
                |b, desired| {
                    b.iter(|| {
                        black_box(Arrangement::compute(
                            &config,
                            Size::new(1920.0, 1080.0),
                            desired,
                        ))
                    })
                },
            );
        }
    }

    group.finish();
}

criterion_group!(benches, bench_partition, bench_arrange);
criterion_main!(benches);
