#![allow(clippy::needless_range_loop)]

/// Dense grid of bucket chains with windowed range queries.
pub mod grid;
/// Structure-of-arrays particle storage with index views.
pub mod soa;
/// Some logging and generation utilities.
pub mod util;

mod bucket;
mod cell_box;
mod particle;
mod shape;
mod stats;
#[cfg(test)]
mod test;
mod types;

pub use crate::{
    bucket::{BucketChain, Iter as BucketIter},
    cell_box::{CellBox, CellBoxIter},
    grid::{select_linear, Grid},
    particle::{Located, Particle},
    shape::{Cell, Shape},
    stats::OccupancyStats,
    types::{CellIdx, ElementIdx},
};

/// Parameters for the select benchmark.
///
/// Since these are not used in inner loops they are simple variables instead of template arguments.
#[derive(Clone, Copy, Debug)]
pub struct BenchParams {
    /// Number of elements per cell.
    pub nppc: usize,
    /// Number of random query boxes.
    pub num_boxes: usize,
    /// Smallest query box side length.
    pub min_size: usize,
    /// Largest query box side length.
    pub max_size: usize,
    /// Seed for element and box generation.
    pub seed: u64,
    /// Print the cell occupancy histogram after filling the grid.
    pub print_stats: bool,
}

impl Default for BenchParams {
    fn default() -> Self {
        Self {
            nppc: 100,
            num_boxes: 10,
            min_size: 5,
            max_size: 10,
            seed: 31415,
            print_stats: false,
        }
    }
}

// Externally visible aliases for convenience.

/// Bucket size used by the particle benchmarks.
pub const DEFAULT_BUCKET_SIZE: usize = 200;

/// A 2D grid with the default bucket size.
pub type Grid2 = Grid<2, DEFAULT_BUCKET_SIZE>;

/// A 3D grid with the default bucket size.
pub type Grid3 = Grid<3, DEFAULT_BUCKET_SIZE>;
