//! Main menu entries.

pub const MENU: &str = "\
Stock Inventory Management System
1. View All Items
2. Search Item by Code
3. Restock Item with Lowest Quantity
4. Calculate Value per Item
5. Show Item with Highest Quantity (For Sale)
6. Capture New Item
7. Exit";

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum MenuChoice {
    ViewAll,
    Search,
    Restock,
    ValuePerItem,
    HighestQuantity,
    Capture,
    Exit,
}

impl MenuChoice {
    pub fn parse(input: &str) -> Option<Self> {
        match input.trim() {
            "1" => Some(MenuChoice::ViewAll),
            "2" => Some(MenuChoice::Search),
            "3" => Some(MenuChoice::Restock),
            "4" => Some(MenuChoice::ValuePerItem),
            "5" => Some(MenuChoice::HighestQuantity),
            "6" => Some(MenuChoice::Capture),
            "7" => Some(MenuChoice::Exit),
            _ => None,
        }
    }
}
