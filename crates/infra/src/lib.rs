//! Infrastructure layer: backing file, configuration.

pub mod config;
pub mod error;
pub mod flat_file;

pub use config::{ConfigError, MalformedLinePolicy, StockroomConfig};
pub use error::StorageError;
pub use flat_file::{FlatFileSource, LoadReport, SkippedLine};
