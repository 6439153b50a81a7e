//! Inventory domain module.
//!
//! This crate contains the stock record and the in-memory inventory,
//! implemented purely as deterministic domain logic (no file IO, no terminal).

pub mod item;
pub mod store;

pub use item::{ItemCode, StockItem, format_cost};
pub use store::{Extremum, Inventory};
