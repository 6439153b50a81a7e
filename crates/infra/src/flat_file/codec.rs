//! Line format of the backing file.
//!
//! ```text
//! Country,Code,Product,Cost,Quantity
//! <origin>,<code>,<name>,<unit_cost>,<quantity>
//! ```
//!
//! Fields are separated by plain commas; there is no quoting, so a field can
//! never contain a comma.

use stockroom_core::{DomainError, DomainResult};
use stockroom_inventory::{StockItem, format_cost};

/// Fixed first line of every inventory file.
pub const HEADER: &str = "Country,Code,Product,Cost,Quantity";

const FIELD_COUNT: usize = 5;

pub fn parse_line(line: &str) -> DomainResult<StockItem> {
    let fields: Vec<&str> = line.trim().split(',').collect();
    let [origin, code, name, cost, quantity] = fields.as_slice() else {
        return Err(DomainError::malformed(format!(
            "expected {FIELD_COUNT} comma-separated fields, found {}",
            fields.len()
        )));
    };
    StockItem::from_fields(origin, code, name, cost, quantity)
}

/// Canonical (lower-case) line for an item, without the trailing newline.
pub fn format_line(item: &StockItem) -> String {
    format!(
        "{},{},{},{},{}",
        item.origin(),
        item.code().as_str(),
        item.name(),
        format_cost(item.unit_cost()),
        item.quantity()
    )
}
