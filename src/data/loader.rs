//! CSV Data Loader Module
//! Opens the input file and parses it into a record table.

use super::RecordTable;
use crate::pipeline::RunStatus;
use polars::prelude::PolarsError;
use std::fs::File;
use std::io;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum LoaderError {
    #[error("Problems reading file: {0}")]
    Io(#[from] io::Error),
    #[error("Read invalid data: {0}")]
    InvalidData(#[from] PolarsError),
}

impl LoaderError {
    /// Process status reported for this failure.
    pub fn status(&self) -> RunStatus {
        match self {
            LoaderError::Io(_) => RunStatus::IoError,
            LoaderError::InvalidData(_) => RunStatus::InvalidData,
        }
    }
}

/// Loads the printer usage CSV.
pub struct DataLoader {
    file_path: PathBuf,
}

impl DataLoader {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
        }
    }

    /// Read and parse the file. I/O problems (missing file, permissions, a
    /// directory at the path) are kept apart from malformed content.
    pub fn load(&self) -> Result<RecordTable, LoaderError> {
        info!(path = %self.file_path.display(), "loading csv");

        let file = File::open(&self.file_path)?;
        if file.metadata()?.is_dir() {
            return Err(LoaderError::Io(io::Error::other(format!(
                "{} is a directory",
                self.file_path.display()
            ))));
        }

        let table = RecordTable::read_csv(file)?;
        debug!(
            rows = table.height(),
            columns = table.column_names().len(),
            "parsed csv"
        );
        Ok(table)
    }
}
