use crate::algorithm::{BruteForce, GridSearch, NeighborSearch};
use crate::config::QueryConfig;
use crate::consistency::{compare, ConsistencyReport};
use crate::error::Result;
use crate::grid::{build_grid, occupancy_alpha, GridConfig};
use crate::neighbors::NeighborResult;
use crate::point::{PointSet, RadiusBand};
use log::{info, warn};

/// One self-contained nearest-neighbor computation.
///
/// Each run generates (or takes) its own [`PointSet`], builds its own grid,
/// runs both searches and compares them. Nothing is shared between runs, so
/// separate runs may execute on separate threads.
#[derive(Clone, Copy, Debug)]
pub struct NeighborQuery {
    config: QueryConfig,
    grid_config: GridConfig,
    band: RadiusBand,
}

impl NeighborQuery {
    /// Validates `config` up front so no run can fail halfway.
    pub fn new(config: QueryConfig) -> Result<Self> {
        let grid_config = config.grid_config()?;
        let band = config.radius_band()?;
        Ok(Self { config, grid_config, band })
    }

    pub fn config(&self) -> &QueryConfig {
        &self.config
    }

    pub fn grid_config(&self) -> &GridConfig {
        &self.grid_config
    }

    /// Random point set for `seed`, placed over the configured region.
    pub fn generate(&self, seed: u64) -> PointSet {
        PointSet::random_seeded(self.config.point_count, &self.config.bounds, self.band, seed)
    }

    /// Runs on freshly generated points using the configured seed.
    pub fn run(&self) -> Result<QueryReport> {
        self.run_seeded(self.config.seed())
    }

    /// Runs on freshly generated points using `seed`.
    pub fn run_seeded(&self, seed: u64) -> Result<QueryReport> {
        self.run_on(self.generate(seed))
    }

    /// Runs both searches over `points` and compares them.
    pub fn run_on(&self, points: PointSet) -> Result<QueryReport> {
        let brute = BruteForce.search(&points)?;

        let grid = build_grid(&points, self.grid_config);
        let grid_result = GridSearch::new(&grid).search(&points)?;
        let occupancy = grid.occupancy();

        let consistency = compare(&brute, &grid_result)?;
        for (n, m) in consistency.mismatches().iter().enumerate() {
            warn!("mismatch {}: point {} brute {:?} grid {:?}", n + 1, m.index, m.left, m.right);
        }
        info!(
            "{} points: brute {} comparisons, grid {} comparisons ({} unresolved), {} mismatches",
            points.len(),
            brute.comparisons(),
            grid_result.comparisons(),
            grid_result.unresolved(),
            consistency.mismatch_count()
        );

        Ok(QueryReport { points, grid_config: self.grid_config, occupancy, brute, grid: grid_result, consistency })
    }
}

/// How a neighbor segment relates to the two searches.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SegmentKind {
    /// Both searches chose this neighbor.
    Agree,
    /// Only brute force chose it.
    BruteOnly,
    /// Only the grid chose it.
    GridOnly,
}

/// Line from a point to one of its reported neighbors.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Segment {
    pub from: usize,
    pub to: usize,
    pub kind: SegmentKind,
}

/// Everything a renderer needs from one query. Read-only.
#[derive(Clone, Debug)]
pub struct QueryReport {
    points: PointSet,
    grid_config: GridConfig,
    occupancy: Vec<usize>,
    brute: NeighborResult,
    grid: NeighborResult,
    consistency: ConsistencyReport,
}

impl QueryReport {
    pub fn points(&self) -> &PointSet {
        &self.points
    }

    pub fn grid_config(&self) -> &GridConfig {
        &self.grid_config
    }

    /// Points per grid cell, row-major.
    pub fn occupancy(&self) -> &[usize] {
        &self.occupancy
    }

    /// Heat-map shade of cell `(ix, iy)`, or `None` outside the grid.
    pub fn cell_alpha(&self, ix: usize, iy: usize) -> Option<f64> {
        let bin = self.grid_config.checked_bin_index(ix, iy)?;
        Some(occupancy_alpha(self.occupancy[bin]))
    }

    pub fn brute(&self) -> &NeighborResult {
        &self.brute
    }

    pub fn grid(&self) -> &NeighborResult {
        &self.grid
    }

    pub fn consistency(&self) -> &ConsistencyReport {
        &self.consistency
    }

    /// Neighbor lines to draw: one `Agree` segment per point where the
    /// searches agree, and a `BruteOnly`/`GridOnly` pair where they do not.
    pub fn segments(&self) -> Vec<Segment> {
        let mut segments = Vec::with_capacity(self.points.len());
        for (from, (&b, &g)) in self.brute.as_slice().iter().zip(self.grid.as_slice()).enumerate() {
            if b == g {
                if let Some(to) = b {
                    segments.push(Segment { from, to, kind: SegmentKind::Agree });
                }
                continue;
            }
            if let Some(to) = b {
                segments.push(Segment { from, to, kind: SegmentKind::BruteOnly });
            }
            if let Some(to) = g {
                segments.push(Segment { from, to, kind: SegmentKind::GridOnly });
            }
        }
        segments
    }
}
