//! Stats module - aggregate figures for experiment tables

mod calculator;

pub use calculator::{ExperimentStats, StatsCalculator};
