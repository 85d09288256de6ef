//! Experiment Configuration Module
//! Fixed file names, column names and labels for the two Query 4 experiments.

use std::fmt;

/// Input table written by the reducer-count experiment.
pub const REDUCER_CSV: &str = "reducer_experiment_results.csv";
/// Input table written by the slow-start experiment.
pub const SLOWSTART_CSV: &str = "slowstart_experiment_results.csv";
/// Chart produced from [`REDUCER_CSV`].
pub const REDUCER_PLOT: &str = "q4_reducers_plot.png";
/// Chart produced from [`SLOWSTART_CSV`].
pub const SLOWSTART_PLOT: &str = "q4_slowstart_plot.png";

/// Column holding the measured execution time in both tables.
pub const TIME_COLUMN: &str = "time_seconds";

/// The independent variable an experiment varies.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExperimentKind {
    /// `num_reducers` vs execution time
    Reducers,
    /// `slowstart_fraction` vs execution time
    Slowstart,
}

impl ExperimentKind {
    pub const ALL: [ExperimentKind; 2] = [ExperimentKind::Reducers, ExperimentKind::Slowstart];

    /// Default CSV file name, relative to the working directory.
    pub fn csv_file(self) -> &'static str {
        match self {
            ExperimentKind::Reducers => REDUCER_CSV,
            ExperimentKind::Slowstart => SLOWSTART_CSV,
        }
    }

    /// Default image file name, relative to the working directory.
    pub fn plot_file(self) -> &'static str {
        match self {
            ExperimentKind::Reducers => REDUCER_PLOT,
            ExperimentKind::Slowstart => SLOWSTART_PLOT,
        }
    }

    /// Name of the key column (the independent variable).
    pub fn key_column(self) -> &'static str {
        match self {
            ExperimentKind::Reducers => "num_reducers",
            ExperimentKind::Slowstart => "slowstart_fraction",
        }
    }

    /// Short name used in skip warnings.
    pub fn short_name(self) -> &'static str {
        match self {
            ExperimentKind::Reducers => "reducer",
            ExperimentKind::Slowstart => "slowstart",
        }
    }

    /// Section heading used by the summary report.
    pub fn summary_heading(self) -> &'static str {
        match self {
            ExperimentKind::Reducers => "Reducer Experiment",
            ExperimentKind::Slowstart => "Slow Start Experiment",
        }
    }

    pub fn x_label(self) -> &'static str {
        match self {
            ExperimentKind::Reducers => "Number of Reducers",
            ExperimentKind::Slowstart => {
                "Slow Start Fraction (mapreduce.job.reduce.slowstart.completedmaps)"
            }
        }
    }

    pub fn y_label(self) -> &'static str {
        "Execution Time (seconds)"
    }

    /// Two-line chart title.
    pub fn title(self) -> [&'static str; 2] {
        let first = match self {
            ExperimentKind::Reducers => "Query 4: Execution Time vs Number of Reducers",
            ExperimentKind::Slowstart => "Query 4: Execution Time vs Slow Start Parameter",
        };
        [first, "(Nightlife Spots 8PM-2AM - NYC Taxi 2013)"]
    }

    /// Describe a key value the way the chart overlay shows it.
    pub fn describe_key(self, key: f64) -> String {
        match self {
            ExperimentKind::Reducers => format!("{} reducers", key.round() as i64),
            ExperimentKind::Slowstart => format!("Slowstart = {}", format_value(key)),
        }
    }

    /// Describe a key value the way the summary report shows it.
    pub fn describe_key_inline(self, key: f64) -> String {
        match self {
            ExperimentKind::Reducers => format!("{} reducers", key.round() as i64),
            ExperimentKind::Slowstart => format!("slowstart={}", format_value(key)),
        }
    }
}

impl fmt::Display for ExperimentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.short_name())
    }
}

/// Format a number without a trailing `.0` for whole values.
pub fn format_value(value: f64) -> String {
    if value.is_finite() && value.fract() == 0.0 {
        format!("{:.0}", value)
    } else {
        format!("{}", value)
    }
}

/// Figure geometry shared by both charts.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FigureSettings {
    pub width_in: f64,
    pub height_in: f64,
    pub dpi: u32,
    pub title_pt: f64,
    pub axis_label_pt: f64,
    pub tick_pt: f64,
    pub annotation_pt: f64,
    pub overlay_pt: f64,
}

impl Default for FigureSettings {
    fn default() -> Self {
        Self {
            width_in: 12.0,
            height_in: 7.0,
            dpi: 300,
            title_pt: 16.0,
            axis_label_pt: 14.0,
            tick_pt: 11.0,
            annotation_pt: 9.0,
            overlay_pt: 10.0,
        }
    }
}

impl FigureSettings {
    /// Output image size in pixels.
    pub fn pixel_size(&self) -> (u32, u32) {
        (
            (self.width_in * self.dpi as f64).round() as u32,
            (self.height_in * self.dpi as f64).round() as u32,
        )
    }

    /// Convert a size in points (1/72 inch) to pixels at the figure DPI.
    pub fn pt(&self, points: f64) -> u32 {
        (points * self.dpi as f64 / 72.0).round().max(1.0) as u32
    }
}
