//! Table configuration for the store adapter.
//!
//! Table names arrive from the environment once at process start and are
//! injected everywhere as an immutable `TableConfig`; no module reads the
//! table-name variables on its own.

use std::env;

use serde_json::Value;

use crate::adapter::ItemKey;
use crate::error::{StoreError, StoreResult};

/// Key schema of one store table: its name plus the attribute names that
/// form the composite key.
#[derive(Debug, Clone)]
pub struct TableSchema {
    /// Physical table name.
    pub name: String,
    /// Attribute holding the partition key value.
    pub partition_attr: &'static str,
    /// Attribute holding the sort key value, for two-attribute keys.
    pub sort_attr: Option<&'static str>,
}

impl TableSchema {
    /// Extract this table's composite key from an item.
    ///
    /// Key attributes must be present and strings; anything else is a
    /// `MissingKeyAttribute` error.
    pub fn key_of(&self, item: &Value) -> StoreResult<ItemKey> {
        let partition = self.key_attr(item, self.partition_attr)?;
        let mut key = ItemKey::new(partition);
        if let Some(sort_attr) = self.sort_attr {
            key = key.sort(self.key_attr(item, sort_attr)?);
        }
        Ok(key)
    }

    fn key_attr(&self, item: &Value, attribute: &'static str) -> StoreResult<String> {
        item.get(attribute)
            .and_then(Value::as_str)
            .map(str::to_string)
            .ok_or_else(|| StoreError::MissingKeyAttribute {
                table: self.name.clone(),
                attribute: attribute.to_string(),
            })
    }
}

/// Immutable table configuration, built once at process start.
#[derive(Debug, Clone)]
pub struct TableConfig {
    /// Notebooks, keyed by `(userId, notebookId)`.
    pub notebooks: TableSchema,
    /// Notes, keyed by `(notebookId, noteId)`.
    pub notes: TableSchema,
    /// Pastebins, keyed by `pasteBinId` alone.
    pub pastebins: TableSchema,
}

impl TableConfig {
    /// Build the configuration from explicit table names.
    pub fn new(
        notebooks_table: impl Into<String>,
        notes_table: impl Into<String>,
        pastebins_table: impl Into<String>,
    ) -> Self {
        Self {
            notebooks: TableSchema {
                name: notebooks_table.into(),
                partition_attr: "userId",
                sort_attr: Some("notebookId"),
            },
            notes: TableSchema {
                name: notes_table.into(),
                partition_attr: "notebookId",
                sort_attr: Some("noteId"),
            },
            pastebins: TableSchema {
                name: pastebins_table.into(),
                partition_attr: "pasteBinId",
                sort_attr: None,
            },
        }
    }

    /// Load the configuration from environment variables.
    ///
    /// Required:
    /// - `NOTEBOOKS_TABLE`
    /// - `NOTES_TABLE`
    /// - `PASTEBIN_TABLE`
    pub fn from_env() -> StoreResult<Self> {
        Ok(Self::new(
            required_var("NOTEBOOKS_TABLE")?,
            required_var("NOTES_TABLE")?,
            required_var("PASTEBIN_TABLE")?,
        ))
    }
}

impl Default for TableConfig {
    /// Table names used by tests and local memory-backed runs.
    fn default() -> Self {
        Self::new("notebooks", "notes", "pastebins")
    }
}

fn required_var(name: &str) -> StoreResult<String> {
    env::var(name)
        .map_err(|_| StoreError::Config(format!("{name} environment variable not set")))
}
