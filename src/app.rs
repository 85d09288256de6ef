//! Plot generation and the top-level run sequence.

use crate::charts::StaticChartRenderer;
use crate::config::{ExperimentKind, FigureSettings, REDUCER_CSV, SLOWSTART_CSV};
use crate::data::DataLoader;
use crate::report::{rule, SummaryReporter};
use crate::stats::{ExperimentStats, StatsCalculator};
use anyhow::{anyhow, Context, Result};
use std::path::{Path, PathBuf};

/// Load, sort, and chart one experiment table.
///
/// Returns the statistics shown in the chart overlay.
pub fn plot_experiment(
    kind: ExperimentKind,
    csv_file: &Path,
    output_file: &Path,
    figure: &FigureSettings,
) -> Result<ExperimentStats> {
    let table = DataLoader::load_experiment(kind, csv_file)
        .with_context(|| format!("loading {}", csv_file.display()))?
        .sorted();
    let stats = StatsCalculator::compute(&table)
        .ok_or_else(|| anyhow!("{} has no rows", csv_file.display()))?;

    StaticChartRenderer::render(&table, &stats, figure, output_file)
        .with_context(|| format!("rendering {}", output_file.display()))?;
    Ok(stats)
}

/// Plot one experiment, reporting the outcome on the console.
fn plot_and_report(
    kind: ExperimentKind,
    csv_file: &Path,
    output_file: &Path,
    figure: &FigureSettings,
) -> bool {
    if !csv_file.exists() {
        println!("Error: {} not found!", csv_file.display());
        return false;
    }

    match plot_experiment(kind, csv_file, output_file, figure) {
        Ok(_) => {
            println!("✓ Saved: {}", display_name(output_file));
            true
        }
        Err(err) => {
            log::error!("{} plot failed: {:#}", kind, err);
            println!("Error: could not generate {}: {:#}", display_name(output_file), err);
            false
        }
    }
}

/// Execution time vs number of reducers.
pub fn plot_reducer_experiment(
    csv_file: &Path,
    output_file: &Path,
    figure: &FigureSettings,
) -> bool {
    plot_and_report(ExperimentKind::Reducers, csv_file, output_file, figure)
}

/// Execution time vs slow-start fraction.
pub fn plot_slowstart_experiment(
    csv_file: &Path,
    output_file: &Path,
    figure: &FigureSettings,
) -> bool {
    plot_and_report(ExperimentKind::Slowstart, csv_file, output_file, figure)
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}

/// Result of a full run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunOutcome {
    pub exit_code: i32,
    /// Images written during this run.
    pub generated: Vec<PathBuf>,
    /// Summary text, printed when at least one plot was generated.
    pub summary: Option<String>,
}

/// Check inputs, plot whatever is present, then summarise.
///
/// All file names are resolved against `work_dir`.
pub fn run(work_dir: &Path) -> RunOutcome {
    run_with(work_dir, &FigureSettings::default())
}

pub fn run_with(work_dir: &Path, figure: &FigureSettings) -> RunOutcome {
    println!("{}", rule());
    println!("Query 4 Performance Analysis - Plot Generator");
    println!("(Most Popular Nightlife Spots 8PM-2AM)");
    println!("{}", rule());

    let reducer_csv = work_dir.join(REDUCER_CSV);
    let slowstart_csv = work_dir.join(SLOWSTART_CSV);
    let present: Vec<ExperimentKind> = ExperimentKind::ALL
        .into_iter()
        .filter(|kind| work_dir.join(kind.csv_file()).exists())
        .collect();

    if present.is_empty() {
        log::warn!("no experiment CSVs in {}", work_dir.display());
        println!("\n❌ Error: No CSV files found!");
        println!("Please run ./run_experiments.sh first to generate the data.");
        return RunOutcome {
            exit_code: 1,
            generated: Vec::new(),
            summary: None,
        };
    }

    println!("\nGenerating plots...");
    if !StaticChartRenderer::text_rendering_available() {
        log::warn!("no font found for chart text, plots will fail");
    }

    let mut success = true;
    let mut generated = Vec::new();
    for kind in ExperimentKind::ALL {
        if !present.contains(&kind) {
            log::warn!("{} CSV missing, skipping", kind);
            println!("⚠️  Skipping {} plot (CSV not found)", kind.short_name());
            continue;
        }

        let csv_file = work_dir.join(kind.csv_file());
        let output_file = work_dir.join(kind.plot_file());
        let plotted = match kind {
            ExperimentKind::Reducers => plot_reducer_experiment(&csv_file, &output_file, figure),
            ExperimentKind::Slowstart => plot_slowstart_experiment(&csv_file, &output_file, figure),
        };
        if plotted {
            generated.push(output_file);
        } else {
            success = false;
        }
    }

    let summary = if generated.is_empty() {
        None
    } else {
        let summary = SummaryReporter::build_summary(&reducer_csv, &slowstart_csv);
        print!("{}", summary);
        Some(summary)
    };

    if !success {
        println!("\n⚠️  Some plots could not be generated");
        return RunOutcome {
            exit_code: 1,
            generated,
            summary,
        };
    }

    println!("\n✅ All plots generated successfully!");
    println!("\nGenerated files:");
    for path in &generated {
        println!("  - {}", display_name(path));
    }

    RunOutcome {
        exit_code: 0,
        generated,
        summary,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{REDUCER_PLOT, SLOWSTART_PLOT};
    use std::fs;
    use tempfile::TempDir;

    fn small_figure() -> FigureSettings {
        FigureSettings {
            dpi: 40,
            ..FigureSettings::default()
        }
    }

    #[test]
    fn no_inputs_exits_nonzero_without_images() {
        let dir = TempDir::new().unwrap();
        let outcome = run_with(dir.path(), &small_figure());

        assert_eq!(outcome.exit_code, 1);
        assert!(outcome.generated.is_empty());
        assert!(outcome.summary.is_none());
        assert!(!dir.path().join(REDUCER_PLOT).exists());
        assert!(!dir.path().join(SLOWSTART_PLOT).exists());
    }

    fn skip_without_fonts(test: &str) -> bool {
        if StaticChartRenderer::text_rendering_available() {
            return false;
        }
        eprintln!("skipping {test}: no font for chart text");
        true
    }

    #[test]
    fn only_slowstart_input_never_writes_reducer_plot() {
        if skip_without_fonts("only_slowstart_input_never_writes_reducer_plot") {
            return;
        }
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(SLOWSTART_CSV),
            "slowstart_fraction,time_seconds\n1.0,100\n0.05,120\n0.5,90\n",
        )
        .unwrap();

        let outcome = run_with(dir.path(), &small_figure());
        let slowstart_plot = dir.path().join(SLOWSTART_PLOT);

        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.generated, vec![slowstart_plot.clone()]);
        assert!(slowstart_plot.exists());
        assert!(!dir.path().join(REDUCER_PLOT).exists());

        let summary = outcome.summary.unwrap();
        assert!(summary.contains("Slow Start Experiment"));
        assert!(!summary.contains("Reducer Experiment"));
    }

    #[test]
    fn both_inputs_produce_both_charts_and_summary() {
        if skip_without_fonts("both_inputs_produce_both_charts_and_summary") {
            return;
        }
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(REDUCER_CSV),
            "num_reducers,time_seconds\n8,95\n2,120\n4,80\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(SLOWSTART_CSV),
            "slowstart_fraction,time_seconds\n0.05,110\n0.5,90\n1.0,100\n",
        )
        .unwrap();

        let outcome = run(dir.path());
        let reducer_plot = dir.path().join(REDUCER_PLOT);
        let slowstart_plot = dir.path().join(SLOWSTART_PLOT);

        assert_eq!(outcome.exit_code, 0);
        assert_eq!(outcome.generated, vec![reducer_plot.clone(), slowstart_plot.clone()]);
        assert_eq!(image::image_dimensions(&reducer_plot).unwrap(), (3600, 2100));
        assert_eq!(image::image_dimensions(&slowstart_plot).unwrap(), (3600, 2100));

        let summary = outcome.summary.unwrap();
        assert!(summary.contains("Fastest: 80s with 4 reducers"));
        assert!(summary.contains("Slowest: 120s with 2 reducers"));
        assert!(summary.contains("Fastest: 90s with slowstart=0.5"));
    }

    #[test]
    fn summary_still_printed_when_one_plot_fails() {
        if skip_without_fonts("summary_still_printed_when_one_plot_fails") {
            return;
        }
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(REDUCER_CSV),
            "num_reducers,time_seconds\n2,120\nfour,80\n",
        )
        .unwrap();
        fs::write(
            dir.path().join(SLOWSTART_CSV),
            "slowstart_fraction,time_seconds\n0.05,110\n0.5,90\n",
        )
        .unwrap();

        let outcome = run_with(dir.path(), &small_figure());

        assert_eq!(outcome.exit_code, 1);
        assert_eq!(outcome.generated, vec![dir.path().join(SLOWSTART_PLOT)]);
        assert!(!dir.path().join(REDUCER_PLOT).exists());

        let summary = outcome.summary.unwrap();
        assert!(summary.contains("QUERY 4 EXPERIMENT SUMMARY"));
        assert!(summary.contains("Fastest: 90s with slowstart=0.5"));
        assert!(summary.contains("⚠️  Reducer Experiment"));
    }

    #[test]
    fn overlay_uses_sorted_rows() {
        if skip_without_fonts("overlay_uses_sorted_rows") {
            return;
        }
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join(REDUCER_CSV);
        let output = dir.path().join(REDUCER_PLOT);
        // 8 and 4 tie on time; after sorting 4 comes first and wins the tie.
        fs::write(&csv, "num_reducers,time_seconds\n8,80\n2,120\n4,80\n").unwrap();

        let stats =
            plot_experiment(ExperimentKind::Reducers, &csv, &output, &small_figure()).unwrap();

        assert_eq!(stats.best.key, 4.0);
        assert_eq!(stats.worst.key, 2.0);
        assert!((stats.improvement_pct - 33.333_333).abs() < 1e-4);
        assert!(output.exists());
    }

    #[test]
    fn malformed_input_fails_the_run() {
        let dir = TempDir::new().unwrap();
        fs::write(
            dir.path().join(REDUCER_CSV),
            "num_reducers,time_seconds\n2,120\nfour,80\n",
        )
        .unwrap();

        let outcome = run_with(dir.path(), &small_figure());
        assert_eq!(outcome.exit_code, 1);
        assert!(outcome.summary.is_none());
        assert!(!dir.path().join(REDUCER_PLOT).exists());
    }

    #[test]
    fn missing_csv_fails_the_plot() {
        let dir = TempDir::new().unwrap();
        let ok = plot_reducer_experiment(
            &dir.path().join(REDUCER_CSV),
            &dir.path().join(REDUCER_PLOT),
            &small_figure(),
        );
        assert!(!ok);
        assert!(!dir.path().join(REDUCER_PLOT).exists());
    }

    #[test]
    fn plot_experiment_reports_load_errors() {
        let dir = TempDir::new().unwrap();
        let csv = dir.path().join(SLOWSTART_CSV);
        fs::write(&csv, "slowstart_fraction,time_seconds\n").unwrap();

        let err = plot_experiment(
            ExperimentKind::Slowstart,
            &csv,
            &dir.path().join(SLOWSTART_PLOT),
            &small_figure(),
        )
        .unwrap_err();
        assert!(format!("{:#}", err).contains("loading"));
    }
}
