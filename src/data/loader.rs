//! CSV Data Loader Module
//! Handles experiment CSV loading using Polars.

use crate::config::ExperimentKind;
use crate::data::{DataProcessor, ExperimentTable, ProcessorError};
use polars::prelude::*;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("{} not found", .0.display())]
    NotFound(PathBuf),
    #[error("Failed to load CSV: {0}")]
    CsvError(#[from] PolarsError),
    #[error(transparent)]
    Processor(#[from] ProcessorError),
    #[error("{} has no rows", .0.display())]
    Empty(PathBuf),
}

/// Loads experiment result tables with Polars.
pub struct DataLoader;

impl DataLoader {
    /// Load a raw CSV file into a DataFrame.
    pub fn load_csv(file_path: &Path) -> Result<DataFrame, LoaderError> {
        if !file_path.exists() {
            return Err(LoaderError::NotFound(file_path.to_path_buf()));
        }

        let df = LazyCsvReader::new(file_path)
            .with_has_header(true)
            .with_infer_schema_length(Some(10000))
            .finish()?
            .collect()?;

        Ok(df)
    }

    /// Load an experiment table, keeping rows in file order.
    pub fn load_experiment(
        kind: ExperimentKind,
        file_path: &Path,
    ) -> Result<ExperimentTable, LoaderError> {
        let df = Self::load_csv(file_path)?;
        let rows = DataProcessor::extract_rows(&df, kind.key_column())?;
        if rows.is_empty() {
            return Err(LoaderError::Empty(file_path.to_path_buf()));
        }

        log::debug!(
            "loaded {} {} rows from {}",
            rows.len(),
            kind,
            file_path.display()
        );
        Ok(ExperimentTable { kind, rows })
    }
}
