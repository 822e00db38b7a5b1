//! # gridnear
//!
//! `gridnear` finds the nearest neighbor of every point in a 2D point set, designed to be
//! used in Rust as well as compiled to WebAssembly (WASM). It runs two searches side by side
//! and tells you where they disagree.
//!
//! ## Features
//!
//! - **Brute Force**: exact O(N²) all-pairs scan.
//! - **Uniform Grid**: points are binned into a configurable grid and each point only looks at
//!   its own cell and the eight around it, with a full scan for points left isolated.
//! - **Consistency Checking**: index-by-index comparison of the two, so the accuracy cost of a
//!   coarse or fine grid is measured instead of hidden.
//! - **Surveys**: many independent seeded queries run in parallel to estimate mismatch rates.
//!
//! Both searches break ties between equally distant neighbors in favour of the lowest index.
//!
//! ## Example
//!
//! ```
//! use gridnear::{brute_force_nearest, build_grid, compare, grid_nearest, BoundingBox, GridConfig, PointSet};
//!
//! let points = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (100.0, 100.0)]).unwrap();
//! let config = GridConfig::new(&BoundingBox::from_size(200.0, 200.0), 2, 2).unwrap();
//!
//! let brute = brute_force_nearest(&points);
//! let grid = build_grid(&points, config);
//! let fast = grid_nearest(&points, &grid).unwrap();
//!
//! assert_eq!(brute.as_slice(), &[Some(1), Some(0), Some(1)]);
//! assert!(compare(&brute, &fast).unwrap().is_consistent());
//! ```
//!
//! ## Main Interface
//!
//! [`NeighborQuery`] runs a complete query (generate points, search both ways, compare) and
//! returns a [`QueryReport`] carrying everything a renderer needs.

mod algorithm;
mod bounds;
mod config;
mod consistency;
mod error;
mod grid;
mod neighbors;
mod point;
mod query;
mod survey;
mod wasm;

pub use algorithm::{brute_force_nearest, grid_nearest, BruteForce, GridSearch, NeighborSearch};
pub use bounds::BoundingBox;
pub use config::QueryConfig;
pub use consistency::{compare, ConsistencyReport, Mismatch};
pub use error::{NearestError, Result};
pub use grid::{build_grid, cell_parity, occupancy_alpha, GridConfig, GridIndex};
pub use neighbors::NeighborResult;
pub use point::{default_seed, Point, PointSet, RadiusBand};
pub use query::{NeighborQuery, QueryReport, Segment, SegmentKind};
pub use survey::{survey, SurveyReport};
pub use wasm::NeighborQueryWASM;
