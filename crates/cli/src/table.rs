//! Grid table rendering of the inventory.

use stockroom_inventory::{Inventory, StockItem, format_cost};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
enum Align {
    Left,
    Right,
}

const COLUMNS: [(&str, Align); 5] = [
    ("Country", Align::Left),
    ("Code", Align::Left),
    ("Product", Align::Left),
    ("Cost", Align::Right),
    ("Quantity", Align::Right),
];

const VALUE_COLUMN: (&str, Align) = ("Value", Align::Right);

/// Render every item as a bordered grid; `with_value` adds a stock value column.
pub fn render(inventory: &Inventory, with_value: bool) -> String {
    let mut columns = COLUMNS.to_vec();
    if with_value {
        columns.push(VALUE_COLUMN);
    }

    let rows: Vec<Vec<String>> = inventory.iter().map(|item| row(item, with_value)).collect();

    let widths: Vec<usize> = columns
        .iter()
        .enumerate()
        .map(|(i, (header, _))| {
            rows.iter()
                .map(|r| r[i].chars().count())
                .chain(std::iter::once(header.chars().count()))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let headers: Vec<String> = columns.iter().map(|(h, _)| h.to_string()).collect();
    let header_aligns = vec![Align::Left; columns.len()];
    let aligns: Vec<Align> = columns.iter().map(|(_, a)| *a).collect();

    let mut out = String::new();
    out.push_str(&border(&widths, '-'));
    out.push_str(&line(&headers, &widths, &header_aligns));
    out.push_str(&border(&widths, '='));
    for r in &rows {
        out.push_str(&line(r, &widths, &aligns));
        out.push_str(&border(&widths, '-'));
    }
    out
}

fn row(item: &StockItem, with_value: bool) -> Vec<String> {
    let mut cells = vec![
        item.origin().to_string(),
        item.code().to_string(),
        item.display_name(),
        format_cost(item.unit_cost()),
        item.quantity().to_string(),
    ];
    if with_value {
        cells.push(format!("{:.2}", item.total_value()));
    }
    cells
}

fn border(widths: &[usize], fill: char) -> String {
    let mut s = String::from("+");
    for w in widths {
        s.extend(std::iter::repeat(fill).take(w + 2));
        s.push('+');
    }
    s.push('\n');
    s
}

fn line(cells: &[String], widths: &[usize], aligns: &[Align]) -> String {
    let mut s = String::from("|");
    for ((cell, &width), align) in cells.iter().zip(widths).zip(aligns) {
        match align {
            Align::Left => s.push_str(&format!(" {cell:<width$} |")),
            Align::Right => s.push_str(&format!(" {cell:>width$} |")),
        }
    }
    s.push('\n');
    s
}
