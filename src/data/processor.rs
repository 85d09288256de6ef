//! Data Processor Module
//! Turns loaded DataFrames into typed experiment rows and orders them.

use crate::config::{ExperimentKind, TIME_COLUMN};
use polars::prelude::*;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Missing column `{0}`")]
    MissingColumn(String),
    #[error("Malformed value in column `{column}` at row {row}")]
    MalformedValue { column: String, row: usize },
}

/// One tested configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ExperimentRow {
    /// Independent variable (reducer count or slow-start fraction).
    pub key: f64,
    pub time_seconds: f64,
}

/// Read-only view of one experiment's results.
#[derive(Debug, Clone, PartialEq)]
pub struct ExperimentTable {
    pub kind: ExperimentKind,
    pub rows: Vec<ExperimentRow>,
}

impl ExperimentTable {
    /// Copy of this table ordered by key, ascending.
    pub fn sorted(&self) -> ExperimentTable {
        ExperimentTable {
            kind: self.kind,
            rows: DataProcessor::sort_by_key(&self.rows),
        }
    }

    pub fn keys(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.key).collect()
    }

    pub fn times(&self) -> Vec<f64> {
        self.rows.iter().map(|row| row.time_seconds).collect()
    }
}

/// Handles column extraction and ordering.
pub struct DataProcessor;

impl DataProcessor {
    /// Extract `(key_column, time_seconds)` pairs from a DataFrame.
    ///
    /// Rows with an empty cell in either column are skipped.
    pub fn extract_rows(
        df: &DataFrame,
        key_column: &str,
    ) -> Result<Vec<ExperimentRow>, ProcessorError> {
        let keys = Self::numeric_column(df, key_column)?;
        let times = Self::numeric_column(df, TIME_COLUMN)?;

        let mut rows = Vec::with_capacity(keys.len());
        for (row, (key, time_seconds)) in keys.into_iter().zip(times).enumerate() {
            match (key, time_seconds) {
                (Some(key), Some(time_seconds)) => {
                    rows.push(ExperimentRow { key, time_seconds })
                }
                _ => log::warn!("row {} has an empty cell, skipped", row),
            }
        }
        Ok(rows)
    }

    /// Cast a column to Float64. Empty cells become `None`; a cell that is
    /// present but does not parse as a number is an error.
    fn numeric_column(
        df: &DataFrame,
        name: &str,
    ) -> Result<Vec<Option<f64>>, ProcessorError> {
        let column = df
            .column(name)
            .map_err(|_| ProcessorError::MissingColumn(name.to_string()))?;
        let empty = column.as_materialized_series().is_null();
        let values = column.cast(&DataType::Float64)?;
        let values = values.f64()?;

        values
            .into_iter()
            .zip(&empty)
            .enumerate()
            .map(|(row, (value, empty))| match (value, empty) {
                (Some(value), _) => Ok(Some(value)),
                (None, Some(true)) => Ok(None),
                (None, _) => Err(ProcessorError::MalformedValue {
                    column: name.to_string(),
                    row,
                }),
            })
            .collect()
    }

    /// Stable sort by key; rows with equal keys keep their file order.
    pub fn sort_by_key(rows: &[ExperimentRow]) -> Vec<ExperimentRow> {
        let mut sorted = rows.to_vec();
        sorted.sort_by(|a, b| a.key.total_cmp(&b.key));
        sorted
    }
}
