//! Criterion micro-benchmarks for validation and index operations.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use voxbot_bench::{line_graph, slab_graph, wide_bounds};
use voxbot_core::{Face, ModuleId};
use voxbot_engine::MovementValidator;
use voxbot_grid::AdjacencyIndex;

/// Benchmark: validate moving a full 32×32 plate one cell along +Z.
fn bench_validate_slab_move(c: &mut Criterion) {
    let graph = slab_graph(32);
    let selection: Vec<ModuleId> = (1..=32u64 * 32).map(ModuleId).collect();

    c.bench_function("validate_slab_32x32_full_move", |b| {
        b.iter(|| {
            let validator = MovementValidator::new(&graph, wide_bounds());
            let receipt = validator.validate(&selection, Face::PosZ);
            black_box(receipt);
        });
    });
}

/// Benchmark: validate detaching the midpoint of a 1024-module chain —
/// the worst case for the post-move connectivity traversal.
fn bench_validate_chain_split(c: &mut Criterion) {
    let graph = line_graph(1024);
    let validator = MovementValidator::new(&graph, wide_bounds());
    let selection = [ModuleId(512)];

    c.bench_function("validate_chain_1024_split_rejection", |b| {
        b.iter(|| {
            let receipt = validator.validate(black_box(&selection), Face::PosY);
            black_box(receipt);
        });
    });
}

/// Benchmark: rebuild the adjacency index for a 32×32 plate.
fn bench_adjacency_rebuild(c: &mut Criterion) {
    let graph = slab_graph(32);

    c.bench_function("adjacency_rebuild_32x32", |b| {
        b.iter(|| {
            let index = AdjacencyIndex::build(graph.placements());
            black_box(&index);
        });
    });
}

criterion_group!(
    benches,
    bench_validate_slab_move,
    bench_validate_chain_split,
    bench_adjacency_rebuild
);
criterion_main!(benches);
