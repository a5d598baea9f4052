//! Schema registry: column definitions, table metadata and the value formatter
//! for one conversion run.
//!
//! The registry is built once and passed by reference into the pipeline, so
//! separate runs (and tests) can use different schemas side by side.
//!
//! # Example
//!
//! ```rust,ignore
//! use excel2sql::models::{ColumnSpec, TableMeta, TransformedRow};
//! use excel2sql::schema::SchemaRegistry;
//!
//! let registry = SchemaRegistry::configure(
//!     TableMeta::new("station", "INSERT INTO station (idx, name) VALUES "),
//!     vec![
//!         ColumnSpec::number("idx", "Priority").key_group("index"),
//!         ColumnSpec::string("name", "Station"),
//!     ],
//!     |r: &TransformedRow| format!("({}, {})", r.get("idx").unwrap(), r.get("name").unwrap()),
//! );
//! ```

pub mod config;
pub mod template;

use std::fmt;

use crate::models::{ColumnSpec, TableMeta};

pub use config::{example_schema, SchemaConfig};
pub use template::{TupleTemplate, ValueFormatter};

/// Column positions sharing one key group tag, in column order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyGroupLayout {
    pub tag: String,
    pub positions: Vec<usize>,
}

/// Everything a run needs to know about the target table.
pub struct SchemaRegistry {
    meta: TableMeta,
    columns: Vec<ColumnSpec>,
    key_groups: Vec<KeyGroupLayout>,
    formatter: Box<dyn ValueFormatter>,
}

impl SchemaRegistry {
    /// Build a registry. Key groups are collected from the columns' tags, in
    /// order of each tag's first appearance.
    pub fn configure(
        meta: TableMeta,
        columns: Vec<ColumnSpec>,
        formatter: impl ValueFormatter + 'static,
    ) -> Self {
        let key_groups = key_group_layouts(&columns);
        Self {
            meta,
            columns,
            key_groups,
            formatter: Box::new(formatter),
        }
    }

    pub fn meta(&self) -> &TableMeta {
        &self.meta
    }

    pub fn columns(&self) -> &[ColumnSpec] {
        &self.columns
    }

    pub fn key_groups(&self) -> &[KeyGroupLayout] {
        &self.key_groups
    }

    /// 1-based source line for the `row_number`-th data row.
    pub fn source_line(&self, row_number: usize) -> usize {
        row_number + self.meta.header_row_offset
    }

    pub fn formatter(&self) -> &dyn ValueFormatter {
        self.formatter.as_ref()
    }
}

impl fmt::Debug for SchemaRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SchemaRegistry")
            .field("meta", &self.meta)
            .field("columns", &self.columns)
            .field("key_groups", &self.key_groups)
            .finish_non_exhaustive()
    }
}

fn key_group_layouts(columns: &[ColumnSpec]) -> Vec<KeyGroupLayout> {
    let mut groups: Vec<KeyGroupLayout> = Vec::new();

    for (position, column) in columns.iter().enumerate() {
        let Some(tag) = column.key_group.as_deref() else {
            continue;
        };
        match groups.iter_mut().find(|g| g.tag == tag) {
            Some(group) => group.positions.push(position),
            None => groups.push(KeyGroupLayout {
                tag: tag.to_string(),
                positions: vec![position],
            }),
        }
    }

    groups
}
