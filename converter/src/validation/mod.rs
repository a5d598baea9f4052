//! Row validation.
//!
//! Checks run in a fixed order and the first failure wins:
//!
//! 1. **Empty row** - every cell under a column is empty: the row is skipped
//! 2. **Required fields** - a non-nullable column is empty: fatal
//! 3. **Duplicate keys** - a composite key was seen before: fatal
//!
//! Key insertion is a side effect, so it runs last. A row rejected for a
//! missing field never reaches the key index.

pub mod keys;

use crate::error::ValidationError;
use crate::models::Row;
use crate::schema::SchemaRegistry;

pub use keys::{composite_key, KeyIndex, KEY_DELIMITER};

/// Outcome of a row that did not halt the run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Accepted,
    Skipped,
}

/// Validates rows in source order against one registry.
#[derive(Debug)]
pub struct RowValidator<'a> {
    registry: &'a SchemaRegistry,
    keys: KeyIndex,
}

impl<'a> RowValidator<'a> {
    pub fn new(registry: &'a SchemaRegistry) -> Self {
        Self {
            registry,
            keys: KeyIndex::new(registry),
        }
    }

    /// Validate the `row_number`-th data row (1-based).
    pub fn validate(&mut self, row: &Row, row_number: usize) -> Result<Verdict, ValidationError> {
        if is_empty_row(row, self.registry.columns().len()) {
            return Ok(Verdict::Skipped);
        }

        check_required(row, row_number, self.registry)?;
        self.keys.check_and_insert(row)?;

        Ok(Verdict::Accepted)
    }

    pub fn keys(&self) -> &KeyIndex {
        &self.keys
    }
}

/// True when the first `width` cells are all empty. Cells past the column
/// list are not looked at.
pub fn is_empty_row(row: &Row, width: usize) -> bool {
    (0..width).all(|i| row.get(i).is_empty())
}

/// First non-nullable column (in column order) whose cell is empty.
pub fn check_required(
    row: &Row,
    row_number: usize,
    registry: &SchemaRegistry,
) -> Result<(), ValidationError> {
    let missing = registry
        .columns()
        .iter()
        .enumerate()
        .find(|(i, column)| !column.nullable && row.get(*i).is_empty());

    match missing {
        Some((_, column)) => Err(ValidationError::MissingRequiredField {
            label: column.label.clone(),
            line: registry.source_line(row_number),
        }),
        None => Ok(()),
    }
}
