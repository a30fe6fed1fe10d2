//! The store adapter interface.
//!
//! Five asynchronous operations over a table + composite-key model, with
//! items as schemaless JSON. Both backends (`MemoryStore`, `PgStore`)
//! implement this trait; handlers only ever see `&dyn StoreAdapter`.
//!
//! Failure semantics: operations return errors as-is. The adapter performs
//! no retries and offers no multi-item transaction; callers that need
//! atomicity across items do not get it here.

use std::fmt;

use async_trait::async_trait;
use serde_json::Value;

use crate::error::{StoreError, StoreResult};
use crate::tables::TableSchema;

/// Composite key values, in schema order (partition, then optional sort).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemKey {
    /// Partition key value.
    pub partition: String,
    /// Sort key value, for tables with a two-attribute key.
    pub sort: Option<String>,
}

impl ItemKey {
    /// Key with only a partition value.
    pub fn new(partition: impl Into<String>) -> Self {
        Self {
            partition: partition.into(),
            sort: None,
        }
    }

    /// Add the sort key value.
    #[must_use]
    pub fn sort(mut self, sort: impl Into<String>) -> Self {
        self.sort = Some(sort.into());
        self
    }
}

impl fmt::Display for ItemKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.sort {
            Some(sort) => write!(f, "({}, {})", self.partition, sort),
            None => write!(f, "({})", self.partition),
        }
    }
}

/// One step of a typed update expression.
#[derive(Debug, Clone)]
pub enum UpdateAction {
    /// Overwrite an attribute with a new value.
    Set { attribute: String, value: Value },
    /// Adjust a numeric attribute by a delta, atomically at the item level.
    /// A missing attribute counts as 0.
    Increment { attribute: String, delta: i64 },
}

impl UpdateAction {
    /// Build a `Set` action.
    pub fn set(attribute: impl Into<String>, value: Value) -> Self {
        Self::Set {
            attribute: attribute.into(),
            value,
        }
    }

    /// Build an `Increment` action.
    pub fn increment(attribute: impl Into<String>, delta: i64) -> Self {
        Self::Increment {
            attribute: attribute.into(),
            delta,
        }
    }
}

/// Equality condition on a table's partition attribute.
#[derive(Debug, Clone)]
pub struct KeyCondition {
    /// Attribute the condition applies to; must be the partition attribute.
    pub attribute: String,
    /// Value the attribute must equal.
    pub value: String,
}

impl KeyCondition {
    /// Build an equality condition.
    pub fn eq(attribute: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            attribute: attribute.into(),
            value: value.into(),
        }
    }

    /// Check the condition against a table's schema.
    pub(crate) fn check(&self, table: &TableSchema) -> StoreResult<()> {
        if self.attribute != table.partition_attr {
            return Err(StoreError::KeyConditionMismatch {
                expected: table.partition_attr.to_string(),
                got: self.attribute.clone(),
            });
        }
        Ok(())
    }
}

/// One page of query results.
///
/// `next` is an opaque continuation token; `Some` means more items remain
/// and the caller must loop (see [`query_all`]) for a complete listing.
#[derive(Debug, Clone, Default)]
pub struct QueryPage {
    /// Items on this page, ordered by sort key.
    pub items: Vec<Value>,
    /// Continuation token for the next page, if any.
    pub next: Option<String>,
}

/// Asynchronous key-value store over a table + composite-key model.
#[async_trait]
pub trait StoreAdapter: Send + Sync {
    /// Write an item, replacing any existing item under the same key.
    ///
    /// The key is extracted from the item itself via the table schema;
    /// an item missing a key attribute is rejected.
    async fn put(&self, table: &TableSchema, item: Value) -> StoreResult<()>;

    /// Read an item by key. Absent items are `Ok(None)`, not an error.
    async fn get(&self, table: &TableSchema, key: &ItemKey) -> StoreResult<Option<Value>>;

    /// Apply update actions to one existing item.
    ///
    /// All actions apply atomically with respect to other updates of the
    /// same item. Addressing an absent item is `ItemNotFound`.
    async fn update(
        &self,
        table: &TableSchema,
        key: &ItemKey,
        actions: &[UpdateAction],
    ) -> StoreResult<()>;

    /// Delete an item by key. Idempotent: deleting an absent key succeeds.
    async fn delete(&self, table: &TableSchema, key: &ItemKey) -> StoreResult<()>;

    /// Return one page of items whose partition attribute equals the
    /// condition value, ordered by sort key, starting after `start_after`.
    async fn query(
        &self,
        table: &TableSchema,
        condition: &KeyCondition,
        start_after: Option<&str>,
    ) -> StoreResult<QueryPage>;
}

/// Drain a query to completion, following continuation tokens until the
/// store reports no further page.
pub async fn query_all(
    store: &dyn StoreAdapter,
    table: &TableSchema,
    condition: &KeyCondition,
) -> StoreResult<Vec<Value>> {
    let mut items = Vec::new();
    let mut cursor: Option<String> = None;
    loop {
        let page = store.query(table, condition, cursor.as_deref()).await?;
        items.extend(page.items);
        match page.next {
            Some(next) => cursor = Some(next),
            None => return Ok(items),
        }
    }
}
