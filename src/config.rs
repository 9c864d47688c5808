//! Run Configuration Module
//! Process-wide constants and command line parsing.

use clap::Parser;
use std::path::PathBuf;

/// Input file read when `--csv_data_file` is not given.
pub const DEFAULT_DATA_FILE: &str = "data/printer_data.csv";

/// Cleaned output, always written next to the default input.
pub const KEY_DATA_FILE: &str = "data/key_data.csv";

/// Suffix appended to the input base name for the stats outputs.
pub const STATS_SUFFIX: &str = "_stats";

/// Columns projected away by the cleaner.
pub const DROPPED_COLUMNS: [&str; 6] = [
    "Printer Name",
    "Color Pages",
    "Grayscale Pages",
    "Jobs",
    "Avg. Pages",
    "Total Printed Pages",
];

pub const DUPLEX_COL: &str = "Duplex Pages";
pub const SIMPLEX_COL: &str = "Simplex Pages";
pub const LOCATION_COL: &str = "Location / Department";

/// Columns kept by the cleaner, in output order.
pub const KEPT_COLUMNS: [&str; 3] = [DUPLEX_COL, SIMPLEX_COL, LOCATION_COL];

/// Command line interface.
#[derive(Parser, Debug, Clone)]
#[command(
    name = "printer_stats",
    version,
    about = "Reads in a csv. There must be the same number of values in each row."
)]
pub struct Cli {
    /// The location (directory and file name) of the csv file with data to analyze
    #[arg(short = 'c', long = "csv_data_file", default_value = DEFAULT_DATA_FILE)]
    pub csv_data_file: PathBuf,
}

/// Resolved file locations for a single run.
#[derive(Debug, Clone)]
pub struct RunConfig {
    pub input: PathBuf,
    pub key_data: PathBuf,
    pub output_dir: PathBuf,
}

impl RunConfig {
    /// Paths used by the command line tool: key data under `data/`,
    /// stats outputs in the working directory.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            input: cli.csv_data_file.clone(),
            key_data: PathBuf::from(KEY_DATA_FILE),
            output_dir: PathBuf::from("."),
        }
    }

    /// Paths rooted at `dir`, laid out like a command line run from there.
    #[cfg(test)]
    pub fn rooted_at(dir: &std::path::Path) -> Self {
        Self {
            input: dir.join(DEFAULT_DATA_FILE),
            key_data: dir.join(KEY_DATA_FILE),
            output_dir: dir.to_path_buf(),
        }
    }

    /// `<input file stem>_stats`, without directory or extension.
    pub fn base_output_name(&self) -> String {
        let stem = self
            .input
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_default();
        format!("{stem}{STATS_SUFFIX}")
    }

    pub fn stats_csv_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.csv", self.base_output_name()))
    }

    pub fn chart_path(&self) -> PathBuf {
        self.output_dir
            .join(format!("{}.png", self.base_output_name()))
    }
}
