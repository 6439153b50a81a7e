//! Flat delimited-text backing file for the inventory.

pub mod codec;
pub mod source;

pub use codec::HEADER;
pub use source::{FlatFileSource, LoadReport, SkippedLine};
