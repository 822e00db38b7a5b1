use crate::algorithm::brute_force::scan_all;
use crate::algorithm::{Candidate, NeighborSearch};
use crate::error::{NearestError, Result};
use crate::grid::GridIndex;
use crate::neighbors::NeighborResult;
use crate::point::PointSet;
use log::debug;

/// Grid-restricted search over a prebuilt [`GridIndex`].
#[derive(Clone, Copy, Debug)]
pub struct GridSearch<'a> {
    grid: &'a GridIndex,
}

impl<'a> GridSearch<'a> {
    pub fn new(grid: &'a GridIndex) -> Self {
        Self { grid }
    }
}

impl NeighborSearch for GridSearch<'_> {
    fn name(&self) -> &'static str {
        "grid"
    }

    fn search(&self, points: &PointSet) -> Result<NeighborResult> {
        grid_nearest(points, self.grid)
    }
}

/// Nearest neighbor of every point, looking only at the point's own cell and
/// the (up to) eight cells around it.
///
/// Cells are visited in row-major order. A point with no other point in its
/// 3x3 block is left unresolved by that pass and then scanned against the
/// whole set, so every point gets a neighbor whenever `N >= 2`.
///
/// The result can differ from [`brute_force_nearest`](crate::brute_force_nearest)
/// when a point's true nearest neighbor sits outside its 3x3 block while some
/// farther point sits inside it. Use [`compare`](crate::compare) to measure that.
///
/// # Errors
/// [`NearestError::PointCountMismatch`] if `grid` was built from a point set
/// of a different size.
pub fn grid_nearest(points: &PointSet, grid: &GridIndex) -> Result<NeighborResult> {
    let n = points.len();
    if grid.point_count() != n {
        return Err(NearestError::PointCountMismatch { grid: grid.point_count(), points: n });
    }

    let mut best = vec![Candidate::NONE; n];
    let mut comparisons = 0;

    for (ix, iy, residents) in grid.cells() {
        for &i in residents {
            let p = &points[i];
            let candidate = &mut best[i];
            for bin in grid.neighborhood(ix, iy) {
                for &j in bin {
                    if i == j {
                        continue;
                    }
                    comparisons += 1;
                    candidate.offer(j, p.dist_sq(&points[j]));
                }
            }
        }
    }

    // Isolated points: nothing in the 3x3 block, scan everything.
    let mut unresolved = 0;
    let mut fallback_comparisons = 0;
    for (i, candidate) in best.iter_mut().enumerate() {
        if candidate.index.is_none() {
            unresolved += 1;
            let (found, count) = scan_all(points, i);
            *candidate = found;
            fallback_comparisons += count;
        }
    }
    comparisons += fallback_comparisons;

    debug!(
        "grid search: {} points, {} comparisons, {} unresolved ({} fallback comparisons)",
        n, comparisons, unresolved, fallback_comparisons
    );

    let nearest = best.into_iter().map(|c| c.index).collect();
    Ok(NeighborResult::new(nearest, comparisons).with_fallback(unresolved, fallback_comparisons))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;
    use crate::grid::{build_grid, GridConfig};

    fn grid_for(points: &PointSet, w: f64, h: f64, nx: usize, ny: usize) -> GridIndex {
        let config = GridConfig::new(&BoundingBox::from_size(w, h), nx, ny).unwrap();
        build_grid(points, config)
    }

    #[test]
    fn test_diagonal_neighbor_cell() {
        let points = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (100.0, 100.0)]).unwrap();
        let grid = grid_for(&points, 200.0, 200.0, 2, 2);
        let result = grid_nearest(&points, &grid).unwrap();

        assert_eq!(result.as_slice(), &[Some(1), Some(0), Some(1)]);
        assert_eq!(result.unresolved(), 0);
        assert_eq!(result.comparisons(), 6);
    }

    #[test]
    fn test_tie_ignores_cell_order() {
        // Point 1 sits between 0 and 2; row-major order reaches 2 first.
        let points = PointSet::from_coords(&[(0.5, 10.0), (0.5, 5.0), (0.5, 0.0)]).unwrap();
        let grid = grid_for(&points, 1.0, 20.0, 1, 4);
        let result = grid_nearest(&points, &grid).unwrap();
        assert_eq!(result[1], Some(0));
    }

    #[test]
    fn test_isolated_points_fall_back() {
        // Each point alone, with empty cells between them.
        let points = PointSet::from_coords(&[(0.5, 0.5), (4.5, 0.5), (9.5, 9.5)]).unwrap();
        let grid = grid_for(&points, 10.0, 10.0, 10, 10);
        let result = grid_nearest(&points, &grid).unwrap();

        assert_eq!(result.as_slice(), &[Some(1), Some(0), Some(1)]);
        assert_eq!(result.unresolved(), 3);
        assert_eq!(result.fallback_comparisons(), 6);
        assert_eq!(result.comparisons(), 6);
    }

    #[test]
    fn test_singleton_stays_unresolved() {
        let points = PointSet::from_coords(&[(1.0, 1.0)]).unwrap();
        let grid = grid_for(&points, 10.0, 10.0, 3, 3);
        let result = grid_nearest(&points, &grid).unwrap();

        assert_eq!(result.as_slice(), &[None]);
        assert_eq!(result.unresolved(), 1);
        assert_eq!(result.fallback_comparisons(), 0);
    }

    #[test]
    fn test_empty() {
        let points = PointSet::default();
        let grid = grid_for(&points, 10.0, 10.0, 3, 3);
        let result = grid_nearest(&points, &grid).unwrap();
        assert!(result.is_empty());
        assert_eq!(result.comparisons(), 0);
    }

    #[test]
    fn test_grid_from_other_point_set() {
        let a = PointSet::from_coords(&[(1.0, 1.0), (2.0, 2.0)]).unwrap();
        let b = PointSet::from_coords(&[(1.0, 1.0)]).unwrap();
        let grid = grid_for(&a, 10.0, 10.0, 3, 3);

        let err = grid_nearest(&b, &grid).unwrap_err();
        assert_eq!(err, NearestError::PointCountMismatch { grid: 2, points: 1 });
    }

    #[test]
    fn test_trait_object_dispatch() {
        let points = PointSet::from_coords(&[(1.0, 1.0), (2.0, 2.0), (8.0, 8.0)]).unwrap();
        let grid = grid_for(&points, 10.0, 10.0, 1, 1);
        let search = GridSearch::new(&grid);
        let strategy: &dyn NeighborSearch = &search;

        assert_eq!(strategy.name(), "grid");
        let result = strategy.search(&points).unwrap();
        assert_eq!(result.as_slice(), &[Some(1), Some(0), Some(1)]);
    }
}
