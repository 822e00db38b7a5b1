use crate::error::{NearestError, Result};
use crate::neighbors::NeighborResult;

/// One index where two results disagree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Mismatch {
    pub index: usize,
    /// Neighbor reported by the first result.
    pub left: Option<usize>,
    /// Neighbor reported by the second result.
    pub right: Option<usize>,
}

/// Outcome of comparing two neighbor results index by index.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ConsistencyReport {
    len: usize,
    mismatches: Vec<Mismatch>,
}

impl ConsistencyReport {
    pub fn mismatch_count(&self) -> usize {
        self.mismatches.len()
    }

    /// Differing indices in ascending order.
    pub fn mismatches(&self) -> &[Mismatch] {
        &self.mismatches
    }

    pub fn is_consistent(&self) -> bool {
        self.mismatches.is_empty()
    }

    /// Number of points compared.
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Fraction of points whose neighbors differ; 0 for empty results.
    pub fn mismatch_rate(&self) -> f64 {
        if self.len == 0 {
            0.0
        } else {
            self.mismatches.len() as f64 / self.len as f64
        }
    }

    /// Mismatch at point `index`, if any.
    pub fn mismatch_at(&self, index: usize) -> Option<&Mismatch> {
        self.mismatches
            .binary_search_by_key(&index, |m| m.index)
            .ok()
            .map(|pos| &self.mismatches[pos])
    }
}

/// Compares two results of equal length index by index.
///
/// # Errors
/// [`NearestError::LengthMismatch`] when the lengths differ.
pub fn compare(left: &NeighborResult, right: &NeighborResult) -> Result<ConsistencyReport> {
    if left.len() != right.len() {
        return Err(NearestError::LengthMismatch { left: left.len(), right: right.len() });
    }

    let mismatches = left
        .as_slice()
        .iter()
        .zip(right.as_slice())
        .enumerate()
        .filter(|(_, (a, b))| a != b)
        .map(|(index, (&a, &b))| Mismatch { index, left: a, right: b })
        .collect();

    Ok(ConsistencyReport { len: left.len(), mismatches })
}
