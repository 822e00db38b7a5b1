use crate::error::Result;
use crate::neighbors::NeighborResult;
use crate::point::PointSet;

pub mod brute_force;
pub mod grid_search;

pub use brute_force::{brute_force_nearest, BruteForce};
pub use grid_search::{grid_nearest, GridSearch};

/// Trait defining a nearest-neighbor strategy.
/// This allows running brute force and the grid side by side on the same points.
pub trait NeighborSearch {
    /// Short label used in logs and reports.
    fn name(&self) -> &'static str;

    /// Find the nearest neighbor of every point in `points`.
    fn search(&self, points: &PointSet) -> Result<NeighborResult>;
}

/// Best candidate seen so far for one query point.
///
/// Equal distances go to the lower index, whatever order candidates arrive in.
#[derive(Clone, Copy, Debug)]
pub(crate) struct Candidate {
    pub(crate) dist_sq: f64,
    pub(crate) index: Option<usize>,
}

impl Candidate {
    pub(crate) const NONE: Candidate = Candidate { dist_sq: f64::INFINITY, index: None };

    #[inline]
    pub(crate) fn offer(&mut self, j: usize, dist_sq: f64) {
        let better = match self.index {
            None => true,
            Some(current) => dist_sq < self.dist_sq || (dist_sq == self.dist_sq && j < current),
        };
        if better {
            self.dist_sq = dist_sq;
            self.index = Some(j);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_candidate_prefers_lower_index_on_tie() {
        let mut c = Candidate::NONE;
        c.offer(5, 4.0);
        c.offer(2, 4.0);
        c.offer(3, 4.0);
        assert_eq!(c.index, Some(2));

        c.offer(9, 1.0);
        assert_eq!(c.index, Some(9));
        assert_eq!(c.dist_sq, 1.0);
    }

    #[test]
    fn test_candidate_accepts_first_offer() {
        let mut c = Candidate::NONE;
        c.offer(7, f64::MAX);
        assert_eq!(c.index, Some(7));
    }
}
