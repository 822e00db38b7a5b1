use crate::config::QueryConfig;
use crate::error::Result;
use crate::query::NeighborQuery;
use log::info;
use rayon::prelude::*;

/// Aggregate disagreement between grid and brute force over many queries.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SurveyReport {
    pub trials: usize,
    pub points_per_trial: usize,
    /// Mismatching points summed over all trials.
    pub total_mismatches: usize,
    /// Trials with at least one mismatch.
    pub trials_with_mismatch: usize,
    pub mean_brute_comparisons: f64,
    pub mean_grid_comparisons: f64,
    /// Mean number of points the grid pass left for the fallback.
    pub mean_unresolved: f64,
}

impl SurveyReport {
    /// Fraction of all surveyed points whose neighbors disagree.
    pub fn mismatch_rate(&self) -> f64 {
        let total = self.trials * self.points_per_trial;
        if total == 0 { 0.0 } else { self.total_mismatches as f64 / total as f64 }
    }

    /// Grid comparisons as a fraction of brute-force comparisons.
    pub fn comparison_ratio(&self) -> f64 {
        if self.mean_brute_comparisons == 0.0 {
            0.0
        } else {
            self.mean_grid_comparisons / self.mean_brute_comparisons
        }
    }
}

#[derive(Clone, Copy, Default)]
struct Tally {
    mismatches: usize,
    with_mismatch: usize,
    brute: usize,
    grid: usize,
    unresolved: usize,
}

/// Runs `trials` independent queries, seeded `base_seed`, `base_seed + 1`, ...
///
/// Trials run in parallel; each owns its point set and grid. The report only
/// depends on the configuration, the trial count and `base_seed`.
pub fn survey(config: QueryConfig, trials: usize, base_seed: u64) -> Result<SurveyReport> {
    let query = NeighborQuery::new(config)?;

    let tally = (0..trials)
        .into_par_iter()
        .map(|t| -> Result<Tally> {
            let report = query.run_seeded(base_seed.wrapping_add(t as u64))?;
            let mismatches = report.consistency().mismatch_count();
            Ok(Tally {
                mismatches,
                with_mismatch: usize::from(mismatches > 0),
                brute: report.brute().comparisons(),
                grid: report.grid().comparisons(),
                unresolved: report.grid().unresolved(),
            })
        })
        .try_reduce(Tally::default, |a, b| {
            Ok(Tally {
                mismatches: a.mismatches + b.mismatches,
                with_mismatch: a.with_mismatch + b.with_mismatch,
                brute: a.brute + b.brute,
                grid: a.grid + b.grid,
                unresolved: a.unresolved + b.unresolved,
            })
        })?;

    let mean = |sum: usize| if trials == 0 { 0.0 } else { sum as f64 / trials as f64 };
    let report = SurveyReport {
        trials,
        points_per_trial: config.point_count,
        total_mismatches: tally.mismatches,
        trials_with_mismatch: tally.with_mismatch,
        mean_brute_comparisons: mean(tally.brute),
        mean_grid_comparisons: mean(tally.grid),
        mean_unresolved: mean(tally.unresolved),
    };

    info!(
        "survey: {} trials of {} points on {}x{} grid, mismatch rate {:.4}, comparison ratio {:.3}",
        trials,
        config.point_count,
        config.grid_cells[0],
        config.grid_cells[1],
        report.mismatch_rate(),
        report.comparison_ratio()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bounds::BoundingBox;

    #[test]
    fn test_survey_is_deterministic() {
        let config = QueryConfig::default().with_point_count(40);
        let a = survey(config, 8, 1000).unwrap();
        let b = survey(config, 8, 1000).unwrap();
        assert_eq!(a, b);
        assert_eq!(a.trials, 8);
        assert_eq!(a.mean_brute_comparisons, (40 * 39) as f64);
    }

    #[test]
    fn test_single_cell_never_mismatches() {
        let config = QueryConfig::new(30, BoundingBox::from_size(100.0, 100.0), 1, 1);
        let report = survey(config, 5, 3).unwrap();
        assert_eq!(report.total_mismatches, 0);
        assert_eq!(report.trials_with_mismatch, 0);
        assert_eq!(report.comparison_ratio(), 1.0);
    }

    #[test]
    fn test_zero_trials() {
        let report = survey(QueryConfig::default(), 0, 0).unwrap();
        assert_eq!(report.trials, 0);
        assert_eq!(report.mismatch_rate(), 0.0);
        assert_eq!(report.mean_grid_comparisons, 0.0);
    }

    #[test]
    fn test_invalid_config() {
        assert!(survey(QueryConfig::default().with_grid_cells(0, 1), 3, 0).is_err());
    }
}
