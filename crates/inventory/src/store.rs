//! In-memory inventory: an ordered, owned sequence of stock items.

use stockroom_core::{DomainError, DomainResult};

use crate::item::StockItem;

/// Which end of the quantity range to look for.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Extremum {
    Min,
    Max,
}

/// Ordered collection of stock items.
///
/// Insertion order is file order followed by append order. An inventory that
/// was never loaded behaves exactly like a loaded but empty one: queries return
/// `None` rather than failing.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    items: Vec<StockItem>,
}

impl Inventory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &StockItem> {
        self.items.iter()
    }

    pub fn get(&self, index: usize) -> Option<&StockItem> {
        self.items.get(index)
    }

    /// Replace the whole contents (used when loading from the backing file).
    pub fn replace_all(&mut self, items: Vec<StockItem>) {
        self.items = items;
    }

    pub fn clear(&mut self) {
        self.items.clear();
    }

    /// Append an item at the end. Duplicate codes are accepted.
    pub fn append(&mut self, item: StockItem) {
        if self.find_by_code(item.code().as_str()).is_some() {
            tracing::warn!(code = %item.code(), "appending item with a duplicate code");
        }
        self.items.push(item);
    }

    /// First item whose code matches `code`, ignoring case.
    pub fn find_by_code(&self, code: &str) -> Option<&StockItem> {
        self.items.iter().find(|item| item.code().matches(code))
    }

    /// Index of the item with the lowest or highest quantity.
    ///
    /// Ties go to the earliest item in insertion order.
    pub fn position_extremal(&self, by: Extremum) -> Option<usize> {
        let mut best: Option<(usize, u64)> = None;
        for (index, item) in self.items.iter().enumerate() {
            let quantity = item.quantity();
            let better = match (best, by) {
                (None, _) => true,
                (Some((_, current)), Extremum::Min) => quantity < current,
                (Some((_, current)), Extremum::Max) => quantity > current,
            };
            if better {
                best = Some((index, quantity));
            }
        }
        best.map(|(index, _)| index)
    }

    /// Item with the lowest or highest quantity (first one on ties).
    pub fn find_extremal(&self, by: Extremum) -> Option<&StockItem> {
        self.position_extremal(by).and_then(|index| self.items.get(index))
    }

    /// Restock the item at `index`, returning the updated item.
    pub fn restock_at(&mut self, index: usize, amount: u64) -> DomainResult<&StockItem> {
        let item = self.items.get_mut(index).ok_or_else(DomainError::not_found)?;
        item.restock(amount)?;
        Ok(item)
    }

    /// Restock the first item whose code matches `code`.
    pub fn restock(&mut self, code: &str, amount: u64) -> DomainResult<&StockItem> {
        let index = self
            .items
            .iter()
            .position(|item| item.code().matches(code))
            .ok_or_else(DomainError::not_found)?;
        self.restock_at(index, amount)
    }

    /// Sum of every item's stock value.
    pub fn total_value(&self) -> f64 {
        self.items.iter().map(StockItem::total_value).sum()
    }
}
