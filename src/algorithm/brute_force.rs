use crate::algorithm::{Candidate, NeighborSearch};
use crate::error::Result;
use crate::neighbors::NeighborResult;
use crate::point::PointSet;
use log::debug;

/// All-pairs scan. O(N²), always exact.
#[derive(Clone, Copy, Debug, Default)]
pub struct BruteForce;

impl NeighborSearch for BruteForce {
    fn name(&self) -> &'static str {
        "brute"
    }

    fn search(&self, points: &PointSet) -> Result<NeighborResult> {
        Ok(brute_force_nearest(points))
    }
}

/// Nearest neighbor of every point by scanning every other point.
///
/// Makes exactly `N * (N - 1)` distance evaluations. Equal distances resolve
/// to the lowest index.
pub fn brute_force_nearest(points: &PointSet) -> NeighborResult {
    let mut nearest = Vec::with_capacity(points.len());
    let mut comparisons = 0;

    for i in 0..points.len() {
        let (best, count) = scan_all(points, i);
        nearest.push(best.index);
        comparisons += count;
    }

    debug!("brute force: {} points, {} comparisons", points.len(), comparisons);
    NeighborResult::new(nearest, comparisons)
}

/// Scans every point except `i` in ascending index order.
pub(crate) fn scan_all(points: &PointSet, i: usize) -> (Candidate, usize) {
    let p = &points[i];
    let mut best = Candidate::NONE;
    let mut count = 0;
    for (j, q) in points.iter().enumerate() {
        if i == j {
            continue;
        }
        count += 1;
        best.offer(j, p.dist_sq(q));
    }
    (best, count)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_three_points() {
        let points = PointSet::from_coords(&[(0.0, 0.0), (1.0, 0.0), (100.0, 100.0)]).unwrap();
        let result = brute_force_nearest(&points);

        assert_eq!(result.as_slice(), &[Some(1), Some(0), Some(1)]);
        assert_eq!(result.comparisons(), 6);
        assert_eq!(result.unresolved(), 0);
        assert_eq!(result.get(2), Some(1));
        assert_eq!(result.get(3), None);
    }

    #[test]
    fn test_tie_goes_to_lowest_index() {
        let points = PointSet::from_coords(&[(0.0, 0.0), (5.0, 0.0), (10.0, 0.0)]).unwrap();
        let result = brute_force_nearest(&points);
        assert_eq!(result[1], Some(0));
    }

    #[test]
    fn test_empty_and_singleton() {
        let empty = brute_force_nearest(&PointSet::default());
        assert!(empty.is_empty());
        assert_eq!(empty.comparisons(), 0);

        let single = brute_force_nearest(&PointSet::from_coords(&[(3.0, 4.0)]).unwrap());
        assert_eq!(single.as_slice(), &[None]);
        assert_eq!(single.comparisons(), 0);
    }

    #[test]
    fn test_coincident_points() {
        let points = PointSet::from_coords(&[(2.0, 2.0); 4]).unwrap();
        let result = brute_force_nearest(&points);
        assert_eq!(result.as_slice(), &[Some(1), Some(0), Some(0), Some(0)]);
    }
}
