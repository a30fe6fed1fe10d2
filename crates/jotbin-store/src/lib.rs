//! jotbin-store: Storage layer for the Jotbin note service.
//!
//! This crate provides:
//! - The `StoreAdapter` trait: schemaless put/get/update/delete/query over
//!   a table + composite-key model
//! - `TableConfig`: the explicit, immutable table configuration injected at
//!   process start
//! - `MemoryStore`: an in-process adapter for tests and local runs
//! - `PgStore`: a PostgreSQL-backed adapter storing items as JSONB
//!
//! # Consistency model
//!
//! The adapter offers no transactions spanning items. Numeric increments
//! apply as an atomic delta at the single-item level, so two concurrent
//! adjustments of the same attribute never lose updates relative to each
//! other. Callers that pair a write on one item with an adjustment on
//! another (the note handlers do) get no atomicity across the pair; a
//! failure between the two calls leaves the second item untouched.
//!
//! # Usage
//!
//! ```rust,ignore
//! use jotbin_store::{MemoryStore, StoreAdapter, TableConfig, query_all, KeyCondition};
//!
//! let tables = TableConfig::from_env()?;
//! let store = MemoryStore::new();
//!
//! store.put(&tables.notebooks, item).await?;
//! let items = query_all(&store, &tables.notebooks, &KeyCondition::eq("userId", "u1")).await?;
//! ```

pub mod adapter;
pub mod error;
pub mod memory;
pub mod postgres;
pub mod schema;
pub mod tables;

pub use adapter::{ItemKey, KeyCondition, QueryPage, StoreAdapter, UpdateAction, query_all};
pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use postgres::{PgConfig, PgStore};
pub use tables::{TableConfig, TableSchema};

// Re-export jotbin-core for downstream crates
pub use jotbin_core;
