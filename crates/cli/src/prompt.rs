//! Line-oriented prompts that re-ask until the answer is valid.
//!
//! None of the accepted text shapes can contain a comma, so captured values
//! always fit the backing file format.

use std::io::{self, BufRead, Write};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum PromptError {
    /// Input reached end-of-file (e.g. Ctrl-D).
    #[error("input closed")]
    Closed,

    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
}

pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Where prompts and reports are written.
    pub fn output(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// Print `label` and return the next input line, trimmed.
    pub fn read_line(&mut self, label: &str) -> Result<String, PromptError> {
        write!(self.output, "{label}")?;
        self.output.flush()?;

        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Err(PromptError::Closed);
        }
        Ok(buf.trim().to_string())
    }

    /// Letters and spaces, at least one letter (e.g. a country name).
    pub fn read_text(&mut self, label: &str) -> Result<String, PromptError> {
        self.read_until(label, "Invalid input! Please enter letters only (no numbers).", |v| {
            v.chars().any(char::is_alphabetic)
                && v.chars().all(|c| c.is_alphabetic() || c == ' ')
        })
    }

    /// Letters, digits and spaces, at least one letter (e.g. a product name).
    pub fn read_name(&mut self, label: &str) -> Result<String, PromptError> {
        self.read_until(label, "Invalid input! Please use letters, numbers and spaces only.", |v| {
            v.chars().any(char::is_alphabetic)
                && v.chars().all(|c| c.is_alphanumeric() || c == ' ')
        })
    }

    /// Letters and digits only, no spaces (an item code).
    pub fn read_code(&mut self, label: &str) -> Result<String, PromptError> {
        self.read_until(label, "Invalid input! Please enter letters and numbers only.", |v| {
            !v.is_empty() && v.chars().all(char::is_alphanumeric)
        })
    }

    /// A finite, non-negative real number.
    pub fn read_cost(&mut self, label: &str) -> Result<f64, PromptError> {
        loop {
            let answer = self.read_line(label)?;
            match answer.parse::<f64>() {
                Ok(value) if value.is_finite() && value >= 0.0 => return Ok(value),
                Ok(value) if value < 0.0 => writeln!(
                    self.output,
                    "Cost cannot be negative. Please enter a positive number."
                )?,
                _ => writeln!(self.output, "Invalid input! Please enter a valid number.")?,
            }
        }
    }

    /// A non-negative whole number.
    pub fn read_quantity(&mut self, label: &str) -> Result<u64, PromptError> {
        loop {
            let answer = self.read_line(label)?;
            match answer.parse::<i64>() {
                Ok(value) if value >= 0 => return Ok(value as u64),
                Ok(_) => writeln!(
                    self.output,
                    "Quantity cannot be negative. Please enter a positive number."
                )?,
                Err(_) => writeln!(self.output, "Invalid input! Please enter a valid integer.")?,
            }
        }
    }

    fn read_until<F>(&mut self, label: &str, complaint: &str, valid: F) -> Result<String, PromptError>
    where
        F: Fn(&str) -> bool,
    {
        loop {
            let answer = self.read_line(label)?;
            if valid(&answer) {
                return Ok(answer);
            }
            writeln!(self.output, "{complaint}")?;
        }
    }
}
