//! Domain models for the spreadsheet to SQL conversion.
//!
//! - [`Cell`] - A raw spreadsheet cell (text, number or empty)
//! - [`Row`] - One source row, positions aligned with the column list
//! - [`DataType`] - How a column is rendered as a SQL literal
//! - [`ColumnSpec`] - One output column
//! - [`TableMeta`] - Target table name, header offset and statement prefix
//! - [`TransformedRow`] - Column name to SQL literal mapping for one row

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// Cells and rows
// =============================================================================

/// A single cell value as read from the source sheet.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Text(String),
    Number(f64),
    Empty,
}

impl Cell {
    /// Build a text cell; an empty string becomes [`Cell::Empty`].
    pub fn text(value: impl Into<String>) -> Self {
        let value = value.into();
        if value.is_empty() {
            Cell::Empty
        } else {
            Cell::Text(value)
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Cell::Empty)
    }
}

impl fmt::Display for Cell {
    /// Renders the value the way a spreadsheet shows it (`1`, `37.5`, `Seoul`).
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Cell::Text(s) => f.write_str(s),
            Cell::Number(n) => write!(f, "{}", n),
            Cell::Empty => Ok(()),
        }
    }
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Cell::text(value)
    }
}

impl From<String> for Cell {
    fn from(value: String) -> Self {
        Cell::text(value)
    }
}

impl From<f64> for Cell {
    fn from(value: f64) -> Self {
        Cell::Number(value)
    }
}

impl From<i64> for Cell {
    fn from(value: i64) -> Self {
        Cell::Number(value as f64)
    }
}

impl From<i32> for Cell {
    fn from(value: i32) -> Self {
        Cell::Number(value as f64)
    }
}

impl<T: Into<Cell>> From<Option<T>> for Cell {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Cell::Empty)
    }
}

static EMPTY_CELL: Cell = Cell::Empty;

/// One source row. Position `i` holds the value for column `i`.
///
/// Rows read from a sheet can be shorter than the column list; missing
/// trailing cells read as [`Cell::Empty`].
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: Vec<Cell>,
}

impl Row {
    pub fn new(cells: Vec<Cell>) -> Self {
        Self { cells }
    }

    /// Cell at `position`, or [`Cell::Empty`] past the end of the row.
    pub fn get(&self, position: usize) -> &Cell {
        self.cells.get(position).unwrap_or(&EMPTY_CELL)
    }

    pub fn len(&self) -> usize {
        self.cells.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }
}

impl From<Vec<Cell>> for Row {
    fn from(cells: Vec<Cell>) -> Self {
        Self::new(cells)
    }
}

/// Build a [`Row`] from mixed literals: `row!["Seoul", 2, 37.5, None::<&str>]`.
#[macro_export]
macro_rules! row {
    ($($cell:expr),* $(,)?) => {
        $crate::models::Row::new(vec![$($crate::models::Cell::from($cell)),*])
    };
}

// =============================================================================
// Column schema
// =============================================================================

/// SQL rendering of a column.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    /// Single-quoted literal, `''` when empty.
    String,
    /// Raw unquoted value, `NULL` when empty.
    Number,
}

/// Definition of one output column.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ColumnSpec {
    /// Identifier used by the value formatter.
    pub name: String,
    /// Human-readable name used in diagnostics.
    pub label: String,
    pub data_type: DataType,
    #[serde(default)]
    pub nullable: bool,
    /// Columns sharing a tag form one composite uniqueness key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub key_group: Option<String>,
}

impl ColumnSpec {
    pub fn new(name: impl Into<String>, label: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            label: label.into(),
            data_type,
            nullable: false,
            key_group: None,
        }
    }

    pub fn string(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, DataType::String)
    }

    pub fn number(name: impl Into<String>, label: impl Into<String>) -> Self {
        Self::new(name, label, DataType::Number)
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn key_group(mut self, tag: impl Into<String>) -> Self {
        self.key_group = Some(tag.into());
        self
    }
}

pub(crate) fn default_header_row_offset() -> usize {
    1
}

/// Target table metadata.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TableMeta {
    /// Rows before this index are header/preamble and are skipped.
    #[serde(default = "default_header_row_offset")]
    pub header_row_offset: usize,
    /// Used as the output file name prefix.
    pub table_name: String,
    /// Raw SQL placed before the value tuples, e.g. `INSERT INTO t (a, b) VALUES `.
    pub statement_prefix: String,
}

impl TableMeta {
    /// Metadata with the default header offset of one row.
    pub fn new(table_name: impl Into<String>, statement_prefix: impl Into<String>) -> Self {
        Self {
            header_row_offset: default_header_row_offset(),
            table_name: table_name.into(),
            statement_prefix: statement_prefix.into(),
        }
    }

    pub fn with_header_row_offset(mut self, offset: usize) -> Self {
        self.header_row_offset = offset;
        self
    }
}

// =============================================================================
// Transformed row
// =============================================================================

/// SQL-ready values of one accepted row, in column order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransformedRow {
    fields: Vec<(String, String)>,
}

impl TransformedRow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, name: impl Into<String>, literal: impl Into<String>) {
        self.fields.push((name.into(), literal.into()));
    }

    /// Literal for column `name`.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.as_str())
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.fields.iter().map(|(n, v)| (n.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}
