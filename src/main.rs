//! Printer Stats - printer usage CSV cleaner & chart generator
//!
//! Reads printer usage records, keeps the duplex/simplex page counts per
//! location, and plots them as a stacked bar chart.

mod charts;
mod config;
mod data;
mod pipeline;

use clap::{CommandFactory, Parser};
use config::{Cli, RunConfig};
use pipeline::RunStatus;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::{fmt, EnvFilter};

fn warning(message: impl std::fmt::Display) {
    eprintln!("WARNING: {message}");
}

fn main() -> ExitCode {
    let env = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    fmt::Subscriber::builder()
        .with_env_filter(env)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = RunConfig::from_cli(&cli);

    let table = match pipeline::load(&config) {
        Ok(table) => table,
        Err(e) => {
            warning(&e);
            Cli::command().print_help().ok();
            return e.status().into();
        }
    };

    match pipeline::process(&config, &table) {
        Ok(outputs) => {
            info!(
                key_data = %outputs.key_data.display(),
                stats = %outputs.stats_csv.display(),
                chart = %outputs.chart.display(),
                rows = outputs.rows,
                "done"
            );
            RunStatus::Success.into()
        }
        Err(e) => {
            eprintln!("ERROR: {e:#}");
            RunStatus::Failed.into()
        }
    }
}
