//! Summary Report Module
//! Console summary of both experiments (row count, fastest, slowest, range).

use crate::config::ExperimentKind;
use crate::data::{DataLoader, ExperimentTable};
use crate::stats::StatsCalculator;
use std::fmt::Write;
use std::path::Path;

/// Width of the `=` rules framing the summary.
pub const RULE_WIDTH: usize = 60;

pub fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// Builds the experiment summary.
pub struct SummaryReporter;

impl SummaryReporter {
    /// Summary text for whichever of the two tables exist.
    pub fn build_summary(reducer_csv: &Path, slowstart_csv: &Path) -> String {
        let mut out = String::new();
        let _ = writeln!(out, "\n{}", rule());
        let _ = writeln!(out, "QUERY 4 EXPERIMENT SUMMARY");
        let _ = writeln!(out, "{}", rule());

        for (kind, path) in [
            (ExperimentKind::Reducers, reducer_csv),
            (ExperimentKind::Slowstart, slowstart_csv),
        ] {
            if !path.exists() {
                continue;
            }
            match DataLoader::load_experiment(kind, path) {
                Ok(table) => out.push_str(&Self::section(&table)),
                Err(err) => {
                    log::warn!("summary skipped {}: {}", path.display(), err);
                    let _ = writeln!(out, "\n⚠️  {}: {}", kind.summary_heading(), err);
                }
            }
        }

        let _ = writeln!(out, "\n{}", rule());
        out
    }

    /// One experiment's block of the summary.
    pub fn section(table: &ExperimentTable) -> String {
        let mut out = String::new();
        let Some(stats) = StatsCalculator::compute(table) else {
            return out;
        };
        let kind = table.kind;

        let _ = writeln!(out, "\n📊 {}:", kind.summary_heading());
        let _ = writeln!(out, "   Configurations tested: {}", stats.count);
        let _ = writeln!(
            out,
            "   Fastest: {:.0}s with {}",
            stats.best.time_seconds,
            kind.describe_key_inline(stats.best.key)
        );
        let _ = writeln!(
            out,
            "   Slowest: {:.0}s with {}",
            stats.worst.time_seconds,
            kind.describe_key_inline(stats.worst.key)
        );
        let _ = writeln!(out, "   Range: {:.0}s difference", stats.range_seconds);
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{REDUCER_CSV, SLOWSTART_CSV};
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn reducer_section() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(REDUCER_CSV);
        fs::write(&path, "num_reducers,time_seconds\n2,120\n4,80\n8,95\n").unwrap();

        let table = DataLoader::load_experiment(ExperimentKind::Reducers, &path).unwrap();
        assert_eq!(
            SummaryReporter::section(&table),
            "\n📊 Reducer Experiment:\n\
             \x20  Configurations tested: 3\n\
             \x20  Fastest: 80s with 4 reducers\n\
             \x20  Slowest: 120s with 2 reducers\n\
             \x20  Range: 40s difference\n"
        );
    }

    #[test]
    fn slowstart_section_uses_fraction() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join(SLOWSTART_CSV);
        fs::write(
            &path,
            "slowstart_fraction,time_seconds\n0.05,110\n0.5,90\n1.0,100\n",
        )
        .unwrap();

        let table = DataLoader::load_experiment(ExperimentKind::Slowstart, &path).unwrap();
        let section = SummaryReporter::section(&table);
        assert!(section.contains("Slow Start Experiment"));
        assert!(section.contains("Fastest: 90s with slowstart=0.5"));
        assert!(section.contains("Slowest: 110s with slowstart=0.05"));
        assert!(section.contains("Range: 20s difference"));
    }

    #[test]
    fn missing_tables_are_omitted() {
        let dir = TempDir::new().unwrap();
        let slowstart = dir.path().join(SLOWSTART_CSV);
        fs::write(&slowstart, "slowstart_fraction,time_seconds\n0.5,90\n").unwrap();

        let summary = SummaryReporter::build_summary(&dir.path().join(REDUCER_CSV), &slowstart);
        assert!(summary.contains("QUERY 4 EXPERIMENT SUMMARY"));
        assert!(summary.contains("Slow Start Experiment"));
        assert!(!summary.contains("Reducer Experiment"));
    }

    #[test]
    fn unreadable_table_becomes_a_warning() {
        let dir = TempDir::new().unwrap();
        let reducers = dir.path().join(REDUCER_CSV);
        fs::write(&reducers, "wrong,header\n1,2\n").unwrap();

        let summary =
            SummaryReporter::build_summary(&reducers, &dir.path().join(SLOWSTART_CSV));
        assert!(summary.contains("⚠️  Reducer Experiment"));
        assert!(!summary.contains("Configurations tested"));
    }
}
