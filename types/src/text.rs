//! Text that is safe to store in a single delimited cell.
//!
//! Rows are split on [`DELIMITER`](crate::DELIMITER) and files are split on
//! line breaks, so a value containing either would shift or split the row it
//! is written into. Control characters are refused as well since every cell
//! is eventually echoed back to a terminal.

use std::fmt;
use std::ops::Deref;

use thiserror::Error;

use crate::DELIMITER;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum FieldTextError {
    #[error("value must not be empty")]
    Empty,
    #[error("value must not contain ','")]
    Delimiter,
    #[error("value must not contain line breaks")]
    LineBreak,
    #[error("value must not contain control characters")]
    Control,
}

fn check_cell(value: &str) -> Result<(), FieldTextError> {
    for c in value.chars() {
        if c == DELIMITER {
            return Err(FieldTextError::Delimiter);
        }
        if c == '\n' || c == '\r' {
            return Err(FieldTextError::LineBreak);
        }
        // C0, DEL and C1 ranges
        if c.is_control() {
            return Err(FieldTextError::Control);
        }
    }
    Ok(())
}

/// Delimiter-free text for a single cell. May be empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct CellText(String);

impl CellText {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldTextError> {
        let value = value.into();
        check_cell(&value)?;
        Ok(Self(value))
    }

    #[must_use]
    pub fn empty() -> Self {
        Self(String::new())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Deref for CellText {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for CellText {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for CellText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// A [`CellText`] guaranteed to be non-empty (after trimming).
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyCell(CellText);

impl NonEmptyCell {
    pub fn new(value: impl Into<String>) -> Result<Self, FieldTextError> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(FieldTextError::Empty);
        }
        CellText::new(value).map(Self)
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl Deref for NonEmptyCell {
    type Target = str;

    fn deref(&self) -> &Self::Target {
        self.as_str()
    }
}

impl AsRef<str> for NonEmptyCell {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for NonEmptyCell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
