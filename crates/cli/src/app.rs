//! Interactive menu over an inventory and its backing file.
//!
//! The inventory is read once in [`App::open`]; every mutation (capture,
//! restock) is followed by a full save. Queries never touch the file.

use std::io::{BufRead, Write};

use anyhow::Context;

use stockroom_infra::FlatFileSource;
use stockroom_inventory::{Extremum, Inventory, StockItem};

use crate::menu::{MENU, MenuChoice};
use crate::prompt::{PromptError, Prompter};
use crate::table;

const EMPTY_INVENTORY: &str = "No items in inventory.";

pub struct App<R, W> {
    inventory: Inventory,
    source: FlatFileSource,
    prompter: Prompter<R, W>,
}

impl<R: BufRead, W: Write> App<R, W> {
    /// Load the inventory from `source`.
    ///
    /// A missing file is reported and the app starts empty; skipped lines are
    /// listed. Any other load failure is returned.
    pub fn open(source: FlatFileSource, mut prompter: Prompter<R, W>) -> anyhow::Result<Self> {
        let mut inventory = Inventory::new();

        match source.load(&mut inventory) {
            Ok(report) => {
                for skipped in &report.skipped {
                    writeln!(
                        prompter.output(),
                        "Skipped malformed line {}: {}",
                        skipped.line,
                        skipped.reason
                    )?;
                }
            }
            Err(err) if err.is_recoverable() => {
                writeln!(
                    prompter.output(),
                    "Error: {} not found. Starting with an empty inventory.",
                    source.path().display()
                )?;
            }
            Err(err) => {
                return Err(anyhow::Error::new(err).context("failed to load inventory"));
            }
        }

        Ok(Self {
            inventory,
            source,
            prompter,
        })
    }

    pub fn inventory(&self) -> &Inventory {
        &self.inventory
    }

    pub fn into_output(self) -> W {
        self.prompter.into_output()
    }

    /// Show the menu until the user exits or input ends.
    pub fn run(&mut self) -> Result<(), PromptError> {
        loop {
            writeln!(self.prompter.output(), "\n{MENU}")?;

            let outcome = match self.prompter.read_line("Enter your choice: ") {
                Ok(answer) => match MenuChoice::parse(&answer) {
                    Some(MenuChoice::Exit) => break,
                    Some(choice) => self.dispatch(choice),
                    None => writeln!(self.prompter.output(), "Invalid choice. Please try again.")
                        .map_err(PromptError::from),
                },
                Err(err) => Err(err),
            };

            match outcome {
                Ok(()) => {}
                Err(PromptError::Closed) => {
                    writeln!(self.prompter.output())?;
                    break;
                }
                Err(err) => return Err(err),
            }
        }

        writeln!(self.prompter.output(), "Goodbye!")?;
        Ok(())
    }

    pub fn dispatch(&mut self, choice: MenuChoice) -> Result<(), PromptError> {
        match choice {
            MenuChoice::ViewAll => self.view_all(),
            MenuChoice::Search => self.search(),
            MenuChoice::Restock => self.restock_lowest(),
            MenuChoice::ValuePerItem => self.value_per_item(),
            MenuChoice::HighestQuantity => self.highest_quantity(),
            MenuChoice::Capture => self.capture(),
            MenuChoice::Exit => Ok(()),
        }
    }

    fn view_all(&mut self) -> Result<(), PromptError> {
        if self.inventory.is_empty() {
            writeln!(self.prompter.output(), "{EMPTY_INVENTORY}")?;
            return Ok(());
        }
        let rendered = table::render(&self.inventory, false);
        write!(self.prompter.output(), "{rendered}")?;
        Ok(())
    }

    fn search(&mut self) -> Result<(), PromptError> {
        let code = self.prompter.read_line("Enter the product code: ")?;
        let message = match self.inventory.find_by_code(&code) {
            Some(item) => item.to_string(),
            None => format!("No product found with code {}.", code.to_uppercase()),
        };
        writeln!(self.prompter.output(), "{message}")?;
        Ok(())
    }

    fn restock_lowest(&mut self) -> Result<(), PromptError> {
        let Some(index) = self.inventory.position_extremal(Extremum::Min) else {
            writeln!(self.prompter.output(), "{EMPTY_INVENTORY}")?;
            return Ok(());
        };
        let (summary, name) = match self.inventory.get(index) {
            Some(item) => (item.to_string(), item.display_name()),
            None => return Ok(()),
        };

        writeln!(self.prompter.output(), "Product with the lowest quantity: {summary}")?;
        let amount = self
            .prompter
            .read_quantity(&format!("Enter quantity to restock for {name}: "))?;

        match self.inventory.restock_at(index, amount) {
            Ok(item) => {
                tracing::info!(code = %item.code(), amount, quantity = item.quantity(), "restocked");
                let message = format!("{} now has {} in stock.", name, item.quantity());
                writeln!(self.prompter.output(), "{message}")?;
                self.persist()
            }
            Err(err) => {
                writeln!(self.prompter.output(), "Could not restock {name}: {err}")?;
                Ok(())
            }
        }
    }

    fn value_per_item(&mut self) -> Result<(), PromptError> {
        if self.inventory.is_empty() {
            writeln!(self.prompter.output(), "{EMPTY_INVENTORY}")?;
            return Ok(());
        }
        let rendered = table::render(&self.inventory, true);
        let total = self.inventory.total_value();
        write!(self.prompter.output(), "{rendered}")?;
        writeln!(self.prompter.output(), "Total stock value: {total:.2}")?;
        Ok(())
    }

    fn highest_quantity(&mut self) -> Result<(), PromptError> {
        let message = match self.inventory.find_extremal(Extremum::Max) {
            Some(item) => format!(
                "Product with the highest quantity (For Sale): {}",
                item.display_name()
            ),
            None => EMPTY_INVENTORY.to_string(),
        };
        writeln!(self.prompter.output(), "{message}")?;
        Ok(())
    }

    fn capture(&mut self) -> Result<(), PromptError> {
        let origin = self.prompter.read_text("Enter the country: ")?;
        let code = self.prompter.read_code("Enter the code: ")?;
        let name = self.prompter.read_name("Enter the product name: ")?;
        let cost = self.prompter.read_cost("Enter the cost: ")?;
        // read_quantity only yields values parsed from an i64.
        let quantity = self.prompter.read_quantity("Enter the quantity: ")? as i64;

        match StockItem::new(&origin, &code, &name, cost, quantity) {
            Ok(item) => {
                let message = format!("Captured {item}.");
                tracing::info!(code = %item.code(), "item captured");
                self.inventory.append(item);
                writeln!(self.prompter.output(), "{message}")?;
                self.persist()
            }
            Err(err) => {
                writeln!(self.prompter.output(), "Could not capture item: {err}")?;
                Ok(())
            }
        }
    }

    /// Save after a mutation. A failed save keeps the in-memory state and is
    /// only reported.
    fn persist(&mut self) -> Result<(), PromptError> {
        if let Err(err) = self.source.save(&self.inventory) {
            tracing::error!(error = %err, "failed to save inventory");
            writeln!(
                self.prompter.output(),
                "An error occurred while updating the file: {err}"
            )?;
        }
        Ok(())
    }
}
