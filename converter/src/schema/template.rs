//! Value formatters: turn one transformed row into a SQL value tuple.
//!
//! Any `Fn(&TransformedRow) -> String` is a formatter. [`TupleTemplate`]
//! covers the configuration-file case with `{column}` placeholders:
//!
//! ```text
//! "\n\t( {idx}, 1, {addr}, NULL )"  →  "\n\t( 7, 1, 'Addr', NULL )"
//! ```

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{SchemaError, SchemaResult};
use crate::models::{ColumnSpec, TransformedRow};

/// Renders one transformed row as a value tuple.
pub trait ValueFormatter {
    fn format(&self, row: &TransformedRow) -> String;
}

impl<F> ValueFormatter for F
where
    F: Fn(&TransformedRow) -> String,
{
    fn format(&self, row: &TransformedRow) -> String {
        self(row)
    }
}

static PLACEHOLDER: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\{([^{}]+)\}").expect("valid placeholder regex"));

#[derive(Debug, Clone, PartialEq)]
enum Segment {
    Literal(String),
    Field(String),
}

/// A tuple layout with `{column}` placeholders, checked against the columns.
#[derive(Debug, Clone, PartialEq)]
pub struct TupleTemplate {
    source: String,
    segments: Vec<Segment>,
}

impl TupleTemplate {
    /// Parse `source`, rejecting placeholders that name no column.
    pub fn parse(source: &str, columns: &[ColumnSpec]) -> SchemaResult<Self> {
        let mut segments = Vec::new();
        let mut last = 0;

        for caps in PLACEHOLDER.captures_iter(source) {
            let whole = caps.get(0).expect("group 0 always matches");
            let name = &caps[1];
            if !columns.iter().any(|c| c.name == name) {
                return Err(SchemaError::UnknownPlaceholder(name.to_string()));
            }
            if whole.start() > last {
                segments.push(Segment::Literal(source[last..whole.start()].to_string()));
            }
            segments.push(Segment::Field(name.to_string()));
            last = whole.end();
        }
        if last < source.len() {
            segments.push(Segment::Literal(source[last..].to_string()));
        }

        Ok(Self {
            source: source.to_string(),
            segments,
        })
    }

    /// `"\n\t( {a}, {b}, ... )"` over every column in order.
    pub fn for_columns(columns: &[ColumnSpec]) -> Self {
        let fields: Vec<String> = columns.iter().map(|c| format!("{{{}}}", c.name)).collect();
        let source = format!("\n\t( {} )", fields.join(", "));

        let mut segments = vec![Segment::Literal("\n\t( ".to_string())];
        for (i, column) in columns.iter().enumerate() {
            if i > 0 {
                segments.push(Segment::Literal(", ".to_string()));
            }
            segments.push(Segment::Field(column.name.clone()));
        }
        segments.push(Segment::Literal(" )".to_string()));

        Self { source, segments }
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    /// Column names referenced, in order of appearance.
    pub fn placeholders(&self) -> impl Iterator<Item = &str> {
        self.segments.iter().filter_map(|s| match s {
            Segment::Field(name) => Some(name.as_str()),
            Segment::Literal(_) => None,
        })
    }
}

impl ValueFormatter for TupleTemplate {
    fn format(&self, row: &TransformedRow) -> String {
        let mut out = String::with_capacity(self.source.len());
        for segment in &self.segments {
            match segment {
                Segment::Literal(text) => out.push_str(text),
                Segment::Field(name) => out.push_str(row.get(name).unwrap_or_default()),
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<ColumnSpec> {
        vec![ColumnSpec::number("idx", "Priority"), ColumnSpec::string("addr", "Address")]
    }

    fn row() -> TransformedRow {
        let mut row = TransformedRow::new();
        row.push("idx", "7");
        row.push("addr", "'Addr'");
        row
    }

    #[test]
    fn test_template_substitution() {
        let template = TupleTemplate::parse("\n\t( {idx}, 1, {addr}, NULL )", &columns()).unwrap();
        assert_eq!(template.format(&row()), "\n\t( 7, 1, 'Addr', NULL )");
        assert_eq!(template.placeholders().collect::<Vec<_>>(), vec!["idx", "addr"]);
    }

    #[test]
    fn test_repeated_placeholder() {
        let template = TupleTemplate::parse("({idx},{idx})", &columns()).unwrap();
        assert_eq!(template.format(&row()), "(7,7)");
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = TupleTemplate::parse("( {idx}, {station} )", &columns()).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownPlaceholder(name) if name == "station"));
    }

    #[test]
    fn test_any_braced_name_is_checked() {
        let err = TupleTemplate::parse("( {idx}, {my-col} )", &columns()).unwrap_err();
        assert!(matches!(err, SchemaError::UnknownPlaceholder(name) if name == "my-col"));

        let columns = vec![ColumnSpec::string("역명", "Station"), ColumnSpec::number("my-col", "N")];
        let template = TupleTemplate::parse("({역명},{my-col})", &columns).unwrap();
        let mut row = TransformedRow::new();
        row.push("역명", "'서울역'");
        row.push("my-col", "3");
        assert_eq!(template.format(&row), "('서울역',3)");
    }

    #[test]
    fn test_default_template_for_columns() {
        let template = TupleTemplate::for_columns(&columns());
        assert_eq!(template.source(), "\n\t( {idx}, {addr} )");
        assert_eq!(template.format(&row()), "\n\t( 7, 'Addr' )");
    }

    #[test]
    fn test_closure_is_formatter() {
        let formatter = |r: &TransformedRow| format!("<{}>", r.get("idx").unwrap_or("?"));
        assert_eq!(formatter.format(&row()), "<7>");
    }
}
