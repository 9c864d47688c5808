//! Data module - CSV loading, cleaning and export

mod loader;
mod processor;
mod table;

pub use loader::{DataLoader, LoaderError};
pub use processor::DataProcessor;
pub use table::{CsvLayout, RecordTable};
