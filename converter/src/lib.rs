//! # excel2sql - spreadsheet rows to one SQL `INSERT` statement
//!
//! Reads the first sheet of a workbook, checks every row against a column
//! schema and writes a single `INSERT ... VALUES (...),(...);` file.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐     ┌─────────────┐     ┌─────────────┐     ┌─────────────┐
//! │ XLSX / CSV  │────▶│   Parser    │────▶│  Validate   │────▶│  Transform  │
//! │ (1st sheet) │     │  (cells)    │     │ (keys, req) │     │ (literals)  │
//! └─────────────┘     └─────────────┘     └─────────────┘     └──────┬──────┘
//!                                                                    ▼
//!                                         ┌─────────────┐     ┌─────────────┐
//!                                         │ table_*.sql │◀────│  Formatter  │
//!                                         └─────────────┘     └─────────────┘
//! ```
//!
//! Any fatal condition (missing required field, duplicate key, no data, write
//! failure) stops the run before a file is written.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use excel2sql::{convert_file, example_schema, ConvertOptions};
//!
//! let registry = example_schema().into_registry()?;
//! let report = convert_file("stations.xlsx", &registry, &ConvertOptions::default())?;
//! println!("Saved {} rows", report.statement.row_count);
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Error types per stage
//! - [`models`] - Cells, rows, column specs
//! - [`schema`] - Schema registry, config files, value formatters
//! - [`parser`] - Workbook and CSV reading
//! - [`validation`] - Row checks and the composite key index
//! - [`transform`] - SQL literals and the pipeline driver
//! - [`config`] - Flag and environment resolution
//! - [`logs`] - Console logging

// Core modules
pub mod error;
pub mod models;

// Schema
pub mod schema;

// Input
pub mod parser;

// Validation
pub mod validation;

// Transformation
pub mod transform;

// Run configuration and logging
pub mod config;
pub mod logs;

// =============================================================================
// Re-exports - Errors
// =============================================================================

pub use error::{
    PipelineError,
    PipelineResult,
    SchemaError,
    SheetError,
    ValidationError,
};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{
    Cell,
    ColumnSpec,
    DataType,
    Row,
    TableMeta,
    TransformedRow,
};

// =============================================================================
// Re-exports - Schema
// =============================================================================

pub use schema::{
    example_schema,
    KeyGroupLayout,
    SchemaConfig,
    SchemaRegistry,
    TupleTemplate,
    ValueFormatter,
};

// =============================================================================
// Re-exports - Parsing
// =============================================================================

pub use parser::{read_sheet, SheetFormat};

// =============================================================================
// Re-exports - Validation
// =============================================================================

pub use validation::{KeyIndex, RowValidator, Verdict};

// =============================================================================
// Re-exports - Pipeline
// =============================================================================

pub use transform::{
    build_statement,
    convert_file,
    convert_rows,
    output_file_name,
    sql_literal,
    transform,
    write_statement,
    ConversionReport,
    ConvertOptions,
    Statement,
};

pub use config::RunConfig;
