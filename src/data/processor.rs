//! Data Processor Module
//! Cleans the printer records and exports the key data.

use super::{CsvLayout, RecordTable};
use crate::config::{DROPPED_COLUMNS, KEPT_COLUMNS};
use polars::prelude::PolarsError;
use std::fs::File;
use std::io::{self, BufWriter};
use std::path::Path;
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum ProcessorError {
    #[error("Polars error: {0}")]
    PolarsError(#[from] PolarsError),
    #[error("Failed to write key data: {0}")]
    Io(#[from] io::Error),
}

/// Column projection and incomplete-row filtering.
pub struct DataProcessor;

impl DataProcessor {
    /// Keep the duplex, simplex and location columns and drop every row
    /// missing one of them. Row order is preserved.
    pub fn clean(table: &RecordTable) -> Result<RecordTable, ProcessorError> {
        let cleaned = table.project(&KEPT_COLUMNS)?.drop_incomplete()?;
        debug!(
            input_rows = table.height(),
            kept_rows = cleaned.height(),
            dropped_columns = ?DROPPED_COLUMNS,
            "dropped incomplete rows"
        );
        Ok(cleaned)
    }

    /// Clean `table` and write the result, with its source index, to `key_data_path`.
    pub fn clean_and_export(
        table: &RecordTable,
        key_data_path: &Path,
    ) -> Result<RecordTable, ProcessorError> {
        let cleaned = Self::clean(table)?;

        let mut writer = BufWriter::new(File::create(key_data_path)?);
        cleaned.write_csv(&mut writer, CsvLayout::INDEXED)?;
        io::Write::flush(&mut writer)?;

        info!(path = %key_data_path.display(), rows = cleaned.height(), "wrote key data");
        Ok(cleaned)
    }
}
