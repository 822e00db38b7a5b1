use crate::point::PointSet;

/// Nearest neighbor of every point in a [`PointSet`], plus the work it took.
///
/// `nearest[i]` is `None` only when no other point exists (N <= 1).
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct NeighborResult {
    nearest: Vec<Option<usize>>,
    /// Distance evaluations, fallback included.
    comparisons: usize,
    /// Points the grid pass could not resolve.
    unresolved: usize,
    /// Distance evaluations spent in the brute-force fallback.
    fallback_comparisons: usize,
}

impl NeighborResult {
    pub fn new(nearest: Vec<Option<usize>>, comparisons: usize) -> Self {
        Self { nearest, comparisons, unresolved: 0, fallback_comparisons: 0 }
    }

    pub(crate) fn with_fallback(mut self, unresolved: usize, fallback_comparisons: usize) -> Self {
        self.unresolved = unresolved;
        self.fallback_comparisons = fallback_comparisons;
        self
    }

    pub fn len(&self) -> usize {
        self.nearest.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nearest.is_empty()
    }

    /// Nearest neighbor of point `index`. `None` for an out of range index
    /// or a point without neighbors.
    pub fn get(&self, index: usize) -> Option<usize> {
        self.nearest.get(index).copied().flatten()
    }

    pub fn as_slice(&self) -> &[Option<usize>] {
        &self.nearest
    }

    pub fn comparisons(&self) -> usize {
        self.comparisons
    }

    pub fn unresolved(&self) -> usize {
        self.unresolved
    }

    pub fn fallback_comparisons(&self) -> usize {
        self.fallback_comparisons
    }

    /// Whether every point has a neighbor.
    pub fn is_complete(&self) -> bool {
        self.nearest.iter().all(Option::is_some)
    }

    /// Squared distance from each point to its reported neighbor.
    pub fn distances_sq(&self, points: &PointSet) -> Vec<Option<f64>> {
        self.nearest
            .iter()
            .enumerate()
            .map(|(i, n)| n.map(|j| points[i].dist_sq(&points[j])))
            .collect()
    }

    /// Flat form for foreign callers: `-1` marks a point without neighbor.
    pub fn to_signed(&self) -> Vec<i32> {
        self.nearest.iter().map(|n| n.map_or(-1, |j| j as i32)).collect()
    }
}

impl std::ops::Index<usize> for NeighborResult {
    type Output = Option<usize>;

    fn index(&self, index: usize) -> &Option<usize> {
        &self.nearest[index]
    }
}
