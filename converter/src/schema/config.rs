//! Schema configuration files.
//!
//! A schema file is JSON:
//!
//! ```json
//! {
//!   "tableName": "drprg_location_subway",
//!   "statementPrefix": "INSERT INTO ... VALUES ",
//!   "headerRowOffset": 1,
//!   "columns": [
//!     { "name": "idx", "label": "Priority", "dataType": "number", "keyGroup": "index" },
//!     { "name": "latitude", "label": "Latitude", "dataType": "number", "nullable": true }
//!   ],
//!   "tupleTemplate": "\n\t( {idx}, 1, {latitude} )"
//! }
//! ```
//!
//! `headerRowOffset` defaults to 1; without `tupleTemplate` every column is
//! emitted in order.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use super::template::TupleTemplate;
use super::SchemaRegistry;
use crate::error::{SchemaError, SchemaResult};
use crate::models::{ColumnSpec, TableMeta};

/// On-disk form of a schema.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SchemaConfig {
    #[serde(flatten)]
    pub meta: TableMeta,

    pub columns: Vec<ColumnSpec>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tuple_template: Option<String>,
}

impl SchemaConfig {
    /// Parse and check a schema from a JSON string.
    pub fn from_json(json: &str) -> SchemaResult<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.check()?;
        Ok(config)
    }

    /// Load and check a schema file.
    pub fn load(path: impl AsRef<Path>) -> SchemaResult<Self> {
        let content = std::fs::read_to_string(path.as_ref())?;
        Self::from_json(&content)
    }

    pub fn to_json(&self) -> SchemaResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Checks the pipeline itself trusts: columns present, names non-empty
    /// and unique, template placeholders resolvable.
    pub fn check(&self) -> SchemaResult<()> {
        if self.columns.is_empty() {
            return Err(SchemaError::NoColumns);
        }

        let mut seen = HashSet::new();
        for (i, column) in self.columns.iter().enumerate() {
            if column.name.trim().is_empty() {
                return Err(SchemaError::EmptyColumnName(i));
            }
            if !seen.insert(column.name.as_str()) {
                return Err(SchemaError::DuplicateColumn(column.name.clone()));
            }
        }

        self.template().map(|_| ())
    }

    fn template(&self) -> SchemaResult<TupleTemplate> {
        match &self.tuple_template {
            Some(source) => TupleTemplate::parse(source, &self.columns),
            None => Ok(TupleTemplate::for_columns(&self.columns)),
        }
    }

    /// Build the registry with the configured tuple template as formatter.
    pub fn into_registry(self) -> SchemaResult<SchemaRegistry> {
        self.check()?;
        let template = self.template()?;
        Ok(SchemaRegistry::configure(self.meta, self.columns, template))
    }
}

/// Built-in schema for the subway station location table.
pub fn example_schema() -> SchemaConfig {
    SchemaConfig {
        meta: TableMeta::new(
            "drprg_location_subway",
            "INSERT INTO `practice`.`drprg_location_subway` (`idx`, `is_use`, `latitude`, `longitude`, `addr`, `area`, `line`, `operator`, `station`, `reg_idx`, `reg_dt`, `mod_idx`, `mod_dt`) VALUES ",
        ),
        columns: vec![
            ColumnSpec::number("idx", "Priority").key_group("index"),
            ColumnSpec::string("operator", "Operator").key_group("subway"),
            ColumnSpec::string("area", "Area").key_group("subway"),
            ColumnSpec::string("line", "Line number").key_group("subway"),
            ColumnSpec::string("station", "Station").key_group("subway"),
            ColumnSpec::string("addr", "Road address"),
            ColumnSpec::number("latitude", "Latitude").nullable(),
            ColumnSpec::number("longitude", "Longitude").nullable(),
        ],
        tuple_template: Some(
            "\n\t( {idx}, 1, {latitude}, {longitude}, {addr}, {area}, {line}, {operator}, {station}, NULL, NULL, NULL, NULL )"
                .to_string(),
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DataType;

    #[test]
    fn test_defaults_applied() {
        let config = SchemaConfig::from_json(
            r#"{
                "tableName": "t",
                "statementPrefix": "INSERT INTO t VALUES ",
                "columns": [
                    { "name": "a", "label": "A", "dataType": "string" },
                    { "name": "b", "label": "B", "dataType": "number", "nullable": true }
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(config.meta.header_row_offset, 1);
        assert!(config.tuple_template.is_none());
        assert_eq!(config.columns[1].data_type, DataType::Number);
        assert!(config.columns[1].nullable);

        let registry = config.into_registry().unwrap();
        assert_eq!(registry.columns().len(), 2);
    }

    #[test]
    fn test_no_columns_rejected() {
        let err = SchemaConfig::from_json(r#"{"tableName": "t", "statementPrefix": "", "columns": []}"#)
            .unwrap_err();
        assert!(matches!(err, SchemaError::NoColumns));
    }

    #[test]
    fn test_duplicate_column_rejected() {
        let err = SchemaConfig::from_json(
            r#"{"tableName": "t", "statementPrefix": "", "columns": [
                { "name": "a", "label": "A", "dataType": "string" },
                { "name": "a", "label": "A again", "dataType": "number" }
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::DuplicateColumn(name) if name == "a"));
    }

    #[test]
    fn test_unknown_placeholder_rejected() {
        let err = SchemaConfig::from_json(
            r#"{"tableName": "t", "statementPrefix": "", "tupleTemplate": "({a}, {z})", "columns": [
                { "name": "a", "label": "A", "dataType": "string" }
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::UnknownPlaceholder(name) if name == "z"));
    }

    #[test]
    fn test_unknown_data_type_rejected() {
        let err = SchemaConfig::from_json(
            r#"{"tableName": "t", "statementPrefix": "", "columns": [
                { "name": "a", "label": "A", "dataType": "date" }
            ]}"#,
        )
        .unwrap_err();
        assert!(matches!(err, SchemaError::Json(_)));
    }

    #[test]
    fn test_example_schema_survives_json() {
        let example = example_schema();
        let json = example.to_json().unwrap();
        assert!(json.contains("\"tableName\": \"drprg_location_subway\""));

        let reloaded = SchemaConfig::from_json(&json).unwrap();
        assert_eq!(reloaded, example);

        let registry = reloaded.into_registry().unwrap();
        let tags: Vec<&str> = registry.key_groups().iter().map(|g| g.tag.as_str()).collect();
        assert_eq!(tags, vec!["index", "subway"]);
        assert_eq!(registry.key_groups()[1].positions, vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_load_missing_file() {
        let err = SchemaConfig::load("/definitely/not/here.json").unwrap_err();
        assert!(matches!(err, SchemaError::Io(_)));
    }
}
