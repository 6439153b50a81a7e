//! Text menu front-end for the stockroom inventory.

pub mod app;
pub mod menu;
pub mod prompt;
pub mod table;

pub use app::App;
pub use menu::MenuChoice;
pub use prompt::{PromptError, Prompter};
