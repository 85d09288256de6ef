//! Statistics Calculator Module
//! Best/worst configuration, improvement percentage and time range.

use crate::data::{ExperimentRow, ExperimentTable};

/// Aggregate figures for one experiment table.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentStats {
    pub count: usize,
    /// Row with the minimum execution time (first one on ties).
    pub best: ExperimentRow,
    /// Row with the maximum execution time (first one on ties).
    pub worst: ExperimentRow,
    /// `(worst - best) / worst * 100`
    pub improvement_pct: f64,
    /// `worst - best`, in seconds
    pub range_seconds: f64,
}

/// Handles the aggregate calculations behind the charts and the summary.
pub struct StatsCalculator;

impl StatsCalculator {
    /// Compute statistics for a table. Returns `None` for an empty table.
    pub fn compute(table: &ExperimentTable) -> Option<ExperimentStats> {
        let best = Self::best_row(&table.rows)?;
        let worst = Self::worst_row(&table.rows)?;

        Some(ExperimentStats {
            count: table.rows.len(),
            best,
            worst,
            improvement_pct: Self::improvement_pct(best.time_seconds, worst.time_seconds),
            range_seconds: worst.time_seconds - best.time_seconds,
        })
    }

    /// Row with the smallest `time_seconds`.
    pub fn best_row(rows: &[ExperimentRow]) -> Option<ExperimentRow> {
        rows.iter().copied().reduce(|best, row| {
            if row.time_seconds < best.time_seconds {
                row
            } else {
                best
            }
        })
    }

    /// Row with the largest `time_seconds`.
    pub fn worst_row(rows: &[ExperimentRow]) -> Option<ExperimentRow> {
        rows.iter().copied().reduce(|worst, row| {
            if row.time_seconds > worst.time_seconds {
                row
            } else {
                worst
            }
        })
    }

    /// Relative reduction from `worst` to `best`, in percent.
    pub fn improvement_pct(best: f64, worst: f64) -> f64 {
        if worst == 0.0 || best == worst {
            return 0.0;
        }
        (worst - best) / worst * 100.0
    }
}
