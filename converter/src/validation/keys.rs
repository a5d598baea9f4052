//! Composite key index.
//!
//! One seen-set per key group. A composite key is the group's cell values
//! joined with [`KEY_DELIMITER`], in column order.

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::models::Row;
use crate::schema::{KeyGroupLayout, SchemaRegistry};

pub const KEY_DELIMITER: &str = "-";

#[derive(Debug, Clone)]
struct KeyGroup {
    layout: KeyGroupLayout,
    seen: HashSet<String>,
}

/// Keys seen so far in one run.
#[derive(Debug, Clone, Default)]
pub struct KeyIndex {
    groups: Vec<KeyGroup>,
}

impl KeyIndex {
    /// Empty index for the registry's key groups.
    pub fn new(registry: &SchemaRegistry) -> Self {
        let groups = registry
            .key_groups()
            .iter()
            .cloned()
            .map(|layout| KeyGroup {
                layout,
                seen: HashSet::new(),
            })
            .collect();
        Self { groups }
    }

    /// Record the row's key for every group, in group order.
    ///
    /// Stops at the first group whose key was already seen. Keys inserted for
    /// earlier groups of the same row stay recorded.
    pub fn check_and_insert(&mut self, row: &Row) -> Result<(), ValidationError> {
        for group in &mut self.groups {
            let key = composite_key(row, &group.layout.positions);
            if !group.seen.insert(key.clone()) {
                return Err(ValidationError::DuplicateKey {
                    group: group.layout.tag.clone(),
                    key,
                });
            }
        }
        Ok(())
    }

    /// Whether `key` has been recorded for the group tagged `tag`.
    pub fn contains(&self, tag: &str, key: &str) -> bool {
        self.groups
            .iter()
            .any(|g| g.layout.tag == tag && g.seen.contains(key))
    }

    /// Total keys recorded across all groups.
    pub fn len(&self) -> usize {
        self.groups.iter().map(|g| g.seen.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Join the row's values at `positions` with [`KEY_DELIMITER`].
pub fn composite_key(row: &Row, positions: &[usize]) -> String {
    positions
        .iter()
        .map(|&p| row.get(p).to_string())
        .collect::<Vec<_>>()
        .join(KEY_DELIMITER)
}
