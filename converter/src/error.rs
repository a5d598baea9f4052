//! Error types for the conversion pipeline.
//!
//! - [`SheetError`] - Reading the input spreadsheet
//! - [`SchemaError`] - Loading a schema configuration file
//! - [`ValidationError`] - A row that halts the run
//! - [`PipelineError`] - Top-level fatal conditions
//!
//! Every variant is fatal. Lower-level errors convert into [`PipelineError`]
//! via `From`, so `?` works across stage boundaries and the binary handles
//! them in one place.

use std::path::PathBuf;
use thiserror::Error;

// =============================================================================
// Sheet Reading Errors
// =============================================================================

/// Errors while reading the input spreadsheet.
#[derive(Debug, Error)]
pub enum SheetError {
    /// Failed to read file.
    #[error("Failed to read file: {0}")]
    Io(#[from] std::io::Error),

    /// Workbook could not be opened or decoded.
    #[error("Cannot read workbook: {0}")]
    Workbook(#[from] calamine::Error),

    /// Delimited text could not be parsed.
    #[error("Invalid CSV format: {0}")]
    Csv(#[from] csv::Error),

    /// Workbook contains no sheets.
    #[error("Workbook has no sheets")]
    NoSheets,
}

// =============================================================================
// Schema Configuration Errors
// =============================================================================

/// Errors while loading a schema configuration file.
#[derive(Debug, Error)]
pub enum SchemaError {
    #[error("Cannot read schema file: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid schema JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Schema defines no columns")]
    NoColumns,

    #[error("Column name is empty at position {0}")]
    EmptyColumnName(usize),

    #[error("Duplicate column name: {0}")]
    DuplicateColumn(String),

    /// Tuple template references a column that does not exist.
    #[error("Tuple template references unknown column '{0}'")]
    UnknownPlaceholder(String),
}

// =============================================================================
// Row Validation Errors
// =============================================================================

/// A row that stops the run.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    /// A non-nullable column is empty.
    #[error("Required field '{label}' is empty. Line: {line}")]
    MissingRequiredField { label: String, line: usize },

    /// A composite key was already seen earlier in the sheet.
    #[error("Duplicate key [{key}] in key group '{group}'")]
    DuplicateKey { group: String, key: String },
}

// =============================================================================
// Pipeline Errors (top-level)
// =============================================================================

/// Top-level fatal conditions. No variant leaves partial output behind.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// Command line could not be interpreted.
    #[error("Usage: {0}")]
    Usage(String),

    /// Input could not be read.
    #[error("Sheet error: {0}")]
    Sheet(#[from] SheetError),

    /// Schema configuration could not be loaded.
    #[error("Schema error: {0}")]
    Schema(#[from] SchemaError),

    /// Input has no data rows beyond the header.
    #[error("Malformed input: expected a header row and at least one data row, found {rows} row(s)")]
    MalformedInput { rows: usize },

    /// A row failed validation.
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// Every data row was empty.
    #[error("No valid data rows in the input")]
    NoValidData,

    /// Output file could not be written.
    #[error("Failed to write '{}': {source}", .path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

// =============================================================================
// Result Type Aliases
// =============================================================================

/// Result type for sheet reading.
pub type SheetResult<T> = Result<T, SheetError>;

/// Result type for schema loading.
pub type SchemaResult<T> = Result<T, SchemaError>;

/// Result type for pipeline operations.
pub type PipelineResult<T> = Result<T, PipelineError>;
