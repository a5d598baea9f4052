//! Conversion pipeline: rows in, one `INSERT` statement file out.
//!
//! The run is split in two stages so both can be tested on their own:
//!
//! 1. [`build_statement`] - validate, transform and format every row (pure)
//! 2. [`write_statement`] - write the statement to `<table>_<YYYYMMDD_HHmm>.sql`
//!
//! [`convert_file`] chains sheet reading and both stages. Any error halts the
//! run before the write stage, so a failed run never leaves a file behind.
//!
//! # Example
//!
//! ```rust,ignore
//! use excel2sql::{convert_file, example_schema, ConvertOptions};
//!
//! let registry = example_schema().into_registry()?;
//! let report = convert_file("stations.xlsx", &registry, &ConvertOptions::default())?;
//! println!("{} rows -> {:?}", report.statement.row_count, report.path);
//! ```

use chrono::{Local, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::transform;
use crate::error::{PipelineError, PipelineResult};
use crate::logs::{log_info, log_info_indent, log_success, log_warning};
use crate::models::{Row, TransformedRow};
use crate::parser::read_sheet;
use crate::schema::SchemaRegistry;
use crate::validation::{RowValidator, Verdict};

/// Output file timestamp layout, local time to the minute.
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M";

/// Options for a conversion run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConvertOptions {
    /// Directory receiving the `.sql` file
    pub output_dir: PathBuf,

    /// Build the statement but write no file
    pub dry_run: bool,
}

impl Default for ConvertOptions {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("."),
            dry_run: false,
        }
    }
}

/// A complete `INSERT` statement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Statement {
    /// `prefix + tuple,tuple,... + ";"`
    pub sql: String,
    /// Rows emitted as value tuples
    pub row_count: usize,
    /// Blank rows left out
    pub skipped_rows: usize,
}

/// Result of a finished run.
#[derive(Debug, Clone, Serialize)]
pub struct ConversionReport {
    pub statement: Statement,
    /// Written file, `None` for a dry run
    pub path: Option<PathBuf>,
}

/// Validate, transform and format `rows` (header rows included).
///
/// Fails with [`PipelineError::MalformedInput`] when the table has no row
/// beyond the first, with the first row's [`ValidationError`](crate::error::ValidationError),
/// or with [`PipelineError::NoValidData`] when every data row is blank.
pub fn build_statement(rows: &[Row], registry: &SchemaRegistry) -> PipelineResult<Statement> {
    if rows.len() <= 1 {
        return Err(PipelineError::MalformedInput { rows: rows.len() });
    }

    let offset = registry.meta().header_row_offset;
    let data_rows = rows.get(offset..).unwrap_or_default();
    log_info(format!(
        "📋 {} data rows (skipping {} header row(s))",
        data_rows.len(),
        offset.min(rows.len())
    ));

    let mut validator = RowValidator::new(registry);
    let mut accepted: Vec<TransformedRow> = Vec::new();
    let mut skipped_rows = 0;

    for (i, row) in data_rows.iter().enumerate() {
        let row_number = i + 1;
        match validator.validate(row, row_number)? {
            Verdict::Skipped => {
                skipped_rows += 1;
                log_warning(format!(
                    "Skipped empty line {}",
                    registry.source_line(row_number)
                ));
            }
            Verdict::Accepted => accepted.push(transform(row, registry)),
        }
    }

    if accepted.is_empty() {
        return Err(PipelineError::NoValidData);
    }
    log_success(format!("{} rows valid", accepted.len()));

    let formatter = registry.formatter();
    let values: Vec<String> = accepted.iter().map(|row| formatter.format(row)).collect();
    let sql = format!("{}{};", registry.meta().statement_prefix, values.join(","));

    Ok(Statement {
        sql,
        row_count: accepted.len(),
        skipped_rows,
    })
}

/// `<table>_<YYYYMMDD_HHmm>.sql`
pub fn output_file_name(table_name: &str, timestamp: NaiveDateTime) -> String {
    format!("{}_{}.sql", table_name, timestamp.format(TIMESTAMP_FORMAT))
}

/// Write the statement into `output_dir`. A file from the same minute is
/// overwritten.
pub fn write_statement(
    statement: &Statement,
    table_name: &str,
    output_dir: &Path,
    timestamp: NaiveDateTime,
) -> PipelineResult<PathBuf> {
    let path = output_dir.join(output_file_name(table_name, timestamp));
    fs::write(&path, &statement.sql).map_err(|source| PipelineError::WriteFailed {
        path: path.clone(),
        source,
    })?;
    Ok(path)
}

/// Run the pipeline on rows already in memory.
pub fn convert_rows(
    rows: &[Row],
    registry: &SchemaRegistry,
    options: &ConvertOptions,
) -> PipelineResult<ConversionReport> {
    let statement = build_statement(rows, registry)?;

    if options.dry_run {
        log_info("(dry run, no file written)");
        return Ok(ConversionReport { statement, path: None });
    }

    let path = write_statement(
        &statement,
        &registry.meta().table_name,
        &options.output_dir,
        Local::now().naive_local(),
    )?;

    log_success(format!("Saved {} rows", statement.row_count));
    log_info_indent(format!("File: {}", path.display()), 1);

    Ok(ConversionReport {
        statement,
        path: Some(path),
    })
}

/// Read the first sheet of `path` and convert it.
pub fn convert_file(
    path: impl AsRef<Path>,
    registry: &SchemaRegistry,
    options: &ConvertOptions,
) -> PipelineResult<ConversionReport> {
    let path = path.as_ref();
    log_info(format!("📖 Reading {}", path.display()));

    let rows = read_sheet(path)?;
    log_success(format!("Read {} rows", rows.len()));

    convert_rows(&rows, registry, options)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationError;
    use crate::models::{ColumnSpec, TableMeta};
    use crate::row;
    use chrono::NaiveDate;

    fn registry() -> SchemaRegistry {
        SchemaRegistry::configure(
            TableMeta::new("station", "INSERT INTO station VALUES "),
            vec![
                ColumnSpec::number("idx", "Priority").key_group("index"),
                ColumnSpec::string("name", "Station"),
                ColumnSpec::number("lat", "Latitude").nullable(),
            ],
            |r: &TransformedRow| {
                format!(
                    "({}, {}, {})",
                    r.get("idx").unwrap_or_default(),
                    r.get("name").unwrap_or_default(),
                    r.get("lat").unwrap_or_default()
                )
            },
        )
    }

    fn header() -> Row {
        row!["idx", "name", "lat"]
    }

    fn at(hour: u32, minute: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 3, 5)
            .and_then(|d| d.and_hms_opt(hour, minute, 0))
            .unwrap()
    }

    #[test]
    fn test_default_options() {
        let opts = ConvertOptions::default();
        assert_eq!(opts.output_dir, PathBuf::from("."));
        assert!(!opts.dry_run);
    }

    #[test]
    fn test_single_row_statement() {
        crate::logs::set_quiet(true);
        let rows = vec![header(), row![1, "City Hall", 37.5]];
        let statement = build_statement(&rows, &registry()).unwrap();
        assert_eq!(statement.sql, "INSERT INTO station VALUES (1, 'City Hall', 37.5);");
        assert_eq!(statement.row_count, 1);
    }

    #[test]
    fn test_tuples_joined_with_comma() {
        crate::logs::set_quiet(true);
        let rows = vec![header(), row![1, "A"], row![2, "B", 126.9]];
        let statement = build_statement(&rows, &registry()).unwrap();
        assert_eq!(
            statement.sql,
            "INSERT INTO station VALUES (1, 'A', NULL),(2, 'B', 126.9);"
        );
    }

    #[test]
    fn test_blank_rows_skipped() {
        crate::logs::set_quiet(true);
        let rows = vec![header(), Row::default(), row![1, "A"], row!["", ""]];
        let statement = build_statement(&rows, &registry()).unwrap();
        assert_eq!(statement.row_count, 1);
        assert_eq!(statement.skipped_rows, 2);
    }

    #[test]
    fn test_header_only_is_malformed() {
        crate::logs::set_quiet(true);
        assert!(matches!(
            build_statement(&[header()], &registry()),
            Err(PipelineError::MalformedInput { rows: 1 })
        ));
        assert!(matches!(
            build_statement(&[], &registry()),
            Err(PipelineError::MalformedInput { rows: 0 })
        ));
    }

    #[test]
    fn test_only_blank_rows_is_no_valid_data() {
        crate::logs::set_quiet(true);
        let rows = vec![header(), Row::default(), row![None::<&str>]];
        assert!(matches!(
            build_statement(&rows, &registry()),
            Err(PipelineError::NoValidData)
        ));
    }

    #[test]
    fn test_offset_past_end_is_no_valid_data() {
        crate::logs::set_quiet(true);
        let registry = SchemaRegistry::configure(
            TableMeta::new("t", "").with_header_row_offset(5),
            vec![ColumnSpec::string("a", "A")],
            |_: &TransformedRow| String::new(),
        );
        let rows = vec![row!["a"], row!["x"]];
        assert!(matches!(
            build_statement(&rows, &registry),
            Err(PipelineError::NoValidData)
        ));
    }

    #[test]
    fn test_missing_field_halts_with_line() {
        crate::logs::set_quiet(true);
        let rows = vec![header(), row![1, "A"], row![2, ""], row![3, "C"]];
        let err = build_statement(&rows, &registry()).unwrap_err();
        assert!(matches!(
            err,
            PipelineError::Validation(ValidationError::MissingRequiredField { line: 3, .. })
        ));
    }

    #[test]
    fn test_zero_header_offset() {
        crate::logs::set_quiet(true);
        let registry = SchemaRegistry::configure(
            TableMeta::new("t", "V").with_header_row_offset(0),
            vec![ColumnSpec::string("a", "A")],
            |r: &TransformedRow| r.get("a").unwrap_or_default().to_string(),
        );
        let statement = build_statement(&[row!["x"], row!["y"]], &registry).unwrap();
        assert_eq!(statement.sql, "V'x','y';");
    }

    #[test]
    fn test_output_file_name() {
        assert_eq!(output_file_name("station", at(9, 7)), "station_20240305_0907.sql");
    }

    #[test]
    fn test_write_statement() {
        let dir = tempfile::tempdir().unwrap();
        let statement = Statement {
            sql: "INSERT INTO t VALUES (1);".into(),
            row_count: 1,
            skipped_rows: 0,
        };

        let path = write_statement(&statement, "t", dir.path(), at(23, 59)).unwrap();
        assert_eq!(path, dir.path().join("t_20240305_2359.sql"));
        assert_eq!(fs::read_to_string(&path).unwrap(), statement.sql);
    }

    #[test]
    fn test_write_failure() {
        let dir = tempfile::tempdir().unwrap();
        let statement = Statement {
            sql: String::new(),
            row_count: 0,
            skipped_rows: 0,
        };
        let missing = dir.path().join("does-not-exist");
        let err = write_statement(&statement, "t", &missing, at(0, 0)).unwrap_err();
        assert!(matches!(err, PipelineError::WriteFailed { .. }));
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        crate::logs::set_quiet(true);
        let dir = tempfile::tempdir().unwrap();
        let options = ConvertOptions {
            output_dir: dir.path().to_path_buf(),
            dry_run: true,
        };
        let report = convert_rows(&[header(), row![1, "A"]], &registry(), &options).unwrap();
        assert!(report.path.is_none());
        assert_eq!(fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}
