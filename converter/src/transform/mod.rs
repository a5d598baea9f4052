//! Row transformation and the conversion pipeline.
//!
//! - [`transform`] turns an accepted row into SQL literals
//! - [`pipeline`] drives validation, transformation, formatting and output

pub mod pipeline;

use crate::models::{Cell, DataType, Row, TransformedRow};
use crate::schema::SchemaRegistry;

pub use pipeline::*;

/// SQL literal for one cell.
///
/// Strings are wrapped in single quotes as-is. Embedded quotes are NOT
/// escaped: a value like `O'Neil` produces invalid SQL. Numbers are passed
/// through unquoted and unchecked.
pub fn sql_literal(cell: &Cell, data_type: DataType) -> String {
    match (data_type, cell) {
        (DataType::String, Cell::Empty) => "''".to_string(),
        (DataType::String, value) => format!("'{}'", value),
        (DataType::Number, Cell::Empty) => "NULL".to_string(),
        (DataType::Number, value) => value.to_string(),
    }
}

/// Map every column of `row` to its SQL literal, in column order.
pub fn transform(row: &Row, registry: &SchemaRegistry) -> TransformedRow {
    let mut out = TransformedRow::new();
    for (i, column) in registry.columns().iter().enumerate() {
        out.push(column.name.clone(), sql_literal(row.get(i), column.data_type));
    }
    out
}
