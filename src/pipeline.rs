//! Pipeline Module
//! Runs loader, cleaner and renderer in sequence for one input file.

use crate::charts::{ChartData, StaticChartRenderer};
use crate::config::RunConfig;
use crate::data::{CsvLayout, DataLoader, DataProcessor, LoaderError, RecordTable};
use anyhow::{Context, Result};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use tracing::info;

/// Process outcome, reported as the exit code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunStatus {
    Success,
    InvalidData,
    IoError,
    /// Failure after the input was loaded.
    Failed,
}

impl RunStatus {
    pub fn code(self) -> u8 {
        match self {
            RunStatus::Success => 0,
            RunStatus::InvalidData => 1,
            RunStatus::IoError => 2,
            RunStatus::Failed => 3,
        }
    }
}

impl From<RunStatus> for ExitCode {
    fn from(status: RunStatus) -> Self {
        ExitCode::from(status.code())
    }
}

/// Files produced by a successful run.
#[derive(Debug, Clone)]
pub struct RunOutputs {
    pub key_data: PathBuf,
    pub stats_csv: PathBuf,
    pub chart: PathBuf,
    pub rows: usize,
}

pub fn load(config: &RunConfig) -> Result<RecordTable, LoaderError> {
    DataLoader::new(&config.input).load()
}

/// Clean the table, export the key data and the header-less stats CSV.
pub fn clean_and_export(config: &RunConfig, table: &RecordTable) -> Result<RecordTable> {
    let cleaned = DataProcessor::clean_and_export(table, &config.key_data)
        .with_context(|| format!("cleaning into {}", config.key_data.display()))?;

    let stats_csv = config.stats_csv_path();
    write_values_csv(&cleaned, &stats_csv)
        .with_context(|| format!("writing {}", stats_csv.display()))?;
    println!("Wrote file: {}", stats_csv.display());

    Ok(cleaned)
}

pub fn render_chart(config: &RunConfig, cleaned: &RecordTable) -> Result<PathBuf> {
    let chart_path = config.chart_path();
    let data = ChartData::from_table(cleaned).context("preparing chart data")?;
    StaticChartRenderer::render_png(&data, &chart_path)
        .with_context(|| format!("rendering {}", chart_path.display()))?;
    Ok(chart_path)
}

/// Everything after loading: cleaner then renderer.
pub fn process(config: &RunConfig, table: &RecordTable) -> Result<RunOutputs> {
    let cleaned = clean_and_export(config, table)?;
    let chart = render_chart(config, &cleaned)?;

    info!(rows = cleaned.height(), "pipeline finished");
    Ok(RunOutputs {
        key_data: config.key_data.clone(),
        stats_csv: config.stats_csv_path(),
        chart,
        rows: cleaned.height(),
    })
}

fn write_values_csv(table: &RecordTable, path: &Path) -> Result<()> {
    let mut writer = BufWriter::new(File::create(path)?);
    table.write_csv(&mut writer, CsvLayout::VALUES)?;
    writer.flush()?;
    Ok(())
}
