//! In-memory store adapter.
//!
//! Backs tests and `STORE_BACKEND=memory` runs. Items live in per-table
//! `BTreeMap`s keyed by `(partition, sort)`, so queries come back ordered
//! by sort key exactly like the Postgres adapter. All mutation happens
//! under one lock, which makes `Increment` an atomic delta at the item
//! level.

use std::collections::{BTreeMap, HashMap};
use std::ops::Bound;
use std::sync::RwLock;

use async_trait::async_trait;
use serde_json::Value;

use crate::adapter::{ItemKey, KeyCondition, QueryPage, StoreAdapter, UpdateAction};
use crate::error::{StoreError, StoreResult};
use crate::tables::TableSchema;

type Table = BTreeMap<(String, String), Value>;

/// Default number of items per query page.
pub const DEFAULT_PAGE_SIZE: usize = 50;

/// In-memory implementation of [`StoreAdapter`].
#[derive(Debug)]
pub struct MemoryStore {
    tables: RwLock<HashMap<String, Table>>,
    page_size: usize,
}

impl MemoryStore {
    /// Create an empty store with the default page size.
    #[must_use]
    pub fn new() -> Self {
        Self::with_page_size(DEFAULT_PAGE_SIZE)
    }

    /// Create an empty store with an explicit page size. Tests use small
    /// sizes to exercise the continuation-token loop.
    #[must_use]
    pub fn with_page_size(page_size: usize) -> Self {
        Self {
            tables: RwLock::new(HashMap::new()),
            page_size: page_size.max(1),
        }
    }

    fn map_key(key: &ItemKey) -> (String, String) {
        (
            key.partition.clone(),
            key.sort.clone().unwrap_or_default(),
        )
    }

    fn read(&self) -> StoreResult<std::sync::RwLockReadGuard<'_, HashMap<String, Table>>> {
        self.tables
            .read()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }

    fn write(&self) -> StoreResult<std::sync::RwLockWriteGuard<'_, HashMap<String, Table>>> {
        self.tables
            .write()
            .map_err(|_| StoreError::Unavailable("store lock poisoned".to_string()))
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl StoreAdapter for MemoryStore {
    async fn put(&self, table: &TableSchema, item: Value) -> StoreResult<()> {
        let key = table.key_of(&item)?;
        let mut tables = self.write()?;
        tables
            .entry(table.name.clone())
            .or_default()
            .insert(Self::map_key(&key), item);
        Ok(())
    }

    async fn get(&self, table: &TableSchema, key: &ItemKey) -> StoreResult<Option<Value>> {
        let tables = self.read()?;
        Ok(tables
            .get(&table.name)
            .and_then(|t| t.get(&Self::map_key(key)))
            .cloned())
    }

    async fn update(
        &self,
        table: &TableSchema,
        key: &ItemKey,
        actions: &[UpdateAction],
    ) -> StoreResult<()> {
        let mut tables = self.write()?;
        let item = tables
            .get_mut(&table.name)
            .and_then(|t| t.get_mut(&Self::map_key(key)))
            .ok_or_else(|| StoreError::ItemNotFound {
                table: table.name.clone(),
                key: key.to_string(),
            })?;

        for action in actions {
            match action {
                UpdateAction::Set { attribute, value } => {
                    item[attribute.as_str()] = value.clone();
                }
                UpdateAction::Increment { attribute, delta } => {
                    let current = match item.get(attribute.as_str()) {
                        None | Some(Value::Null) => 0,
                        Some(v) => v.as_i64().ok_or_else(|| StoreError::NonNumericAttribute {
                            attribute: attribute.clone(),
                        })?,
                    };
                    item[attribute.as_str()] = Value::from(current + delta);
                }
            }
        }
        Ok(())
    }

    async fn delete(&self, table: &TableSchema, key: &ItemKey) -> StoreResult<()> {
        let mut tables = self.write()?;
        if let Some(t) = tables.get_mut(&table.name) {
            t.remove(&Self::map_key(key));
        }
        Ok(())
    }

    async fn query(
        &self,
        table: &TableSchema,
        condition: &KeyCondition,
        start_after: Option<&str>,
    ) -> StoreResult<QueryPage> {
        condition.check(table)?;

        let tables = self.read()?;
        let Some(t) = tables.get(&table.name) else {
            return Ok(QueryPage::default());
        };

        let partition = condition.value.clone();
        let lower = match start_after {
            Some(sort) => Bound::Excluded((partition.clone(), sort.to_string())),
            None => Bound::Included((partition.clone(), String::new())),
        };

        let mut items = Vec::new();
        let mut next = None;
        let mut last_sort = String::new();
        for ((p, sort), item) in t.range((lower, Bound::Unbounded)) {
            if *p != partition {
                break;
            }
            if items.len() == self.page_size {
                // More items remain; token is the sort key of the last
                // item already returned.
                next = Some(last_sort);
                break;
            }
            items.push(item.clone());
            last_sort = sort.clone();
        }

        Ok(QueryPage { items, next })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapter::query_all;
    use crate::tables::TableConfig;
    use serde_json::json;

    fn note(notebook_id: &str, note_id: &str) -> Value {
        json!({
            "userId": "u1",
            "notebookId": notebook_id,
            "noteId": note_id,
            "noteTitle": "t",
            "note": "body",
        })
    }

    #[tokio::test]
    async fn test_put_get_roundtrip() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();

        store.put(&tables.notes, note("nb-1", "n-1")).await.unwrap();

        let got = store
            .get(&tables.notes, &ItemKey::new("nb-1").sort("n-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got["noteId"], "n-1");
    }

    #[tokio::test]
    async fn test_get_absent_is_none() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();

        let got = store
            .get(&tables.pastebins, &ItemKey::new("nope"))
            .await
            .unwrap();
        assert!(got.is_none());
    }

    #[tokio::test]
    async fn test_put_replaces_existing_item() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();

        store.put(&tables.notes, note("nb-1", "n-1")).await.unwrap();
        let mut updated = note("nb-1", "n-1");
        updated["note"] = json!("rewritten");
        store.put(&tables.notes, updated).await.unwrap();

        let got = store
            .get(&tables.notes, &ItemKey::new("nb-1").sort("n-1"))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(got["note"], "rewritten");
    }

    #[tokio::test]
    async fn test_put_rejects_missing_key_attribute() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();

        let err = store
            .put(&tables.notes, json!({"notebookId": "nb-1"}))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::MissingKeyAttribute { .. }));
    }

    #[tokio::test]
    async fn test_delete_is_idempotent() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();
        let key = ItemKey::new("nb-1").sort("n-1");

        store.put(&tables.notes, note("nb-1", "n-1")).await.unwrap();
        store.delete(&tables.notes, &key).await.unwrap();
        // Second delete of the same (now absent) key still succeeds.
        store.delete(&tables.notes, &key).await.unwrap();
        assert!(store.get(&tables.notes, &key).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_update_set_and_increment() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();
        let key = ItemKey::new("u1").sort("nb-1");

        store
            .put(
                &tables.notebooks,
                json!({"userId": "u1", "notebookId": "nb-1", "notebookName": "Work", "notesCount": 0}),
            )
            .await
            .unwrap();

        store
            .update(
                &tables.notebooks,
                &key,
                &[
                    UpdateAction::set("notebookName", json!("Home")),
                    UpdateAction::increment("notesCount", 1),
                ],
            )
            .await
            .unwrap();

        let got = store.get(&tables.notebooks, &key).await.unwrap().unwrap();
        assert_eq!(got["notebookName"], "Home");
        assert_eq!(got["notesCount"], 1);
    }

    #[tokio::test]
    async fn test_increment_missing_attribute_counts_as_zero() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();
        let key = ItemKey::new("u1").sort("nb-1");

        store
            .put(
                &tables.notebooks,
                json!({"userId": "u1", "notebookId": "nb-1"}),
            )
            .await
            .unwrap();
        store
            .update(
                &tables.notebooks,
                &key,
                &[UpdateAction::increment("notesCount", -1)],
            )
            .await
            .unwrap();

        let got = store.get(&tables.notebooks, &key).await.unwrap().unwrap();
        assert_eq!(got["notesCount"], -1);
    }

    #[tokio::test]
    async fn test_update_absent_item_fails() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();

        let err = store
            .update(
                &tables.notebooks,
                &ItemKey::new("u1").sort("missing"),
                &[UpdateAction::increment("notesCount", 1)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::ItemNotFound { .. }));
    }

    #[tokio::test]
    async fn test_increment_non_numeric_attribute_fails() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();
        let key = ItemKey::new("u1").sort("nb-1");

        store
            .put(
                &tables.notebooks,
                json!({"userId": "u1", "notebookId": "nb-1", "notesCount": "zero"}),
            )
            .await
            .unwrap();
        let err = store
            .update(
                &tables.notebooks,
                &key,
                &[UpdateAction::increment("notesCount", 1)],
            )
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::NonNumericAttribute { .. }));
    }

    #[tokio::test]
    async fn test_query_filters_by_partition() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();

        store.put(&tables.notes, note("nb-1", "n-1")).await.unwrap();
        store.put(&tables.notes, note("nb-1", "n-2")).await.unwrap();
        store.put(&tables.notes, note("nb-2", "n-3")).await.unwrap();

        let page = store
            .query(&tables.notes, &KeyCondition::eq("notebookId", "nb-1"), None)
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert!(page.next.is_none());
    }

    #[tokio::test]
    async fn test_query_rejects_non_partition_condition() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();

        let err = store
            .query(&tables.notes, &KeyCondition::eq("userId", "u1"), None)
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::KeyConditionMismatch { .. }));
    }

    #[tokio::test]
    async fn test_query_all_follows_continuation_tokens() {
        let tables = TableConfig::default();
        let store = MemoryStore::with_page_size(2);

        for i in 0..7 {
            store
                .put(&tables.notes, note("nb-1", &format!("n-{i}")))
                .await
                .unwrap();
        }

        // A single page is capped.
        let first = store
            .query(&tables.notes, &KeyCondition::eq("notebookId", "nb-1"), None)
            .await
            .unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.next.is_some());

        // Draining the cursor returns every item exactly once.
        let all = query_all(&store, &tables.notes, &KeyCondition::eq("notebookId", "nb-1"))
            .await
            .unwrap();
        assert_eq!(all.len(), 7);
        let mut ids: Vec<_> = all
            .iter()
            .map(|v| v["noteId"].as_str().unwrap().to_string())
            .collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), 7);
    }

    #[tokio::test]
    async fn test_query_empty_partition_yields_empty_page() {
        let tables = TableConfig::default();
        let store = MemoryStore::new();

        let page = store
            .query(&tables.notes, &KeyCondition::eq("notebookId", "empty"), None)
            .await
            .unwrap();
        assert!(page.items.is_empty());
        assert!(page.next.is_none());
    }
}
