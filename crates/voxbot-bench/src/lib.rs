//! Benchmark profiles and utilities for the voxbot engine.
//!
//! Provides deterministic synthetic structures for benchmarking:
//!
//! - [`line_graph`]: a 1×n chain of modules along +X
//! - [`slab_graph`]: an n×n single-layer plate
//! - [`wide_bounds`]: a workspace large enough for either

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use voxbot_core::{ConnectionMeta, Face, GridVec, Module, ModuleId};
use voxbot_engine::ConnectivityGraph;
use voxbot_grid::Bounds;

/// A workspace cuboid large enough for the synthetic structures.
pub fn wide_bounds() -> Bounds {
    Bounds::new(
        GridVec::new(-50_000, -50_000, -50_000),
        GridVec::new(50_000, 50_000, 50_000),
    )
    .expect("static corners are ordered")
}

/// Build a straight chain of `n` modules along +X, rigidly connected.
pub fn line_graph(n: u64) -> ConnectivityGraph {
    let mut graph = ConnectivityGraph::new();
    for i in 0..n {
        graph.add_module(Module::new(
            ModuleId(i + 1),
            GridVec::new(i as i32 * 50, 0, 0),
        ));
    }
    for i in 1..n {
        graph.connect(
            ModuleId(i),
            ModuleId(i + 1),
            Face::PosX,
            ConnectionMeta::rigid(),
        );
    }
    graph
}

/// Build an `n`×`n` single-layer plate of modules in the XY plane,
/// rigidly connected along both axes.
pub fn slab_graph(n: u64) -> ConnectivityGraph {
    let mut graph = ConnectivityGraph::new();
    let id = |x: u64, y: u64| ModuleId(y * n + x + 1);
    for y in 0..n {
        for x in 0..n {
            graph.add_module(Module::new(
                id(x, y),
                GridVec::new(x as i32 * 50, y as i32 * 50, 0),
            ));
        }
    }
    for y in 0..n {
        for x in 0..n {
            if x + 1 < n {
                graph.connect(id(x, y), id(x + 1, y), Face::PosX, ConnectionMeta::rigid());
            }
            if y + 1 < n {
                graph.connect(id(x, y), id(x, y + 1), Face::PosY, ConnectionMeta::rigid());
            }
        }
    }
    graph
}
