//! Table Capability
//!
//! Defines the row shape persisted by a partitioned table and the operations any backing
//! key-value or document store must provide. Implementations only need atomic single-row
//! operations; nothing here spans more than one row.

use super::error::StoreError;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wildcard accepted wherever an `If-Match` precondition is expected.
pub const ETAG_ANY: &str = "*";

/// A single persisted row.
///
/// `partition_key` + `row_key` form the primary key. `etag` and `timestamp` are owned by
/// the table: whatever the caller passes in is overwritten on every successful write.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct TableEntity {
    pub partition_key: String,
    pub row_key: String,
    #[serde(rename = "ETag")]
    pub etag: String,
    pub timestamp: DateTime<Utc>,
    pub properties: Map<String, Value>,
}

impl TableEntity {
    /// Builds an unsaved row. The table assigns `etag` and `timestamp` on write.
    pub fn new(partition_key: &str, row_key: &str, properties: Map<String, Value>) -> Self {
        Self {
            partition_key: partition_key.to_string(),
            row_key: row_key.to_string(),
            etag: String::new(),
            timestamp: Utc::now(),
            properties,
        }
    }
}

/// Write precondition, modelled after the HTTP `If-Match` header.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ETag {
    /// Unconditional write (`*`).
    Any,
    /// Write only if the stored token still equals this value.
    Tag(String),
}

impl ETag {
    /// Parses a single `If-Match` value. Only one tag (or `*`) is supported: a blank
    /// value or a comma-separated list yields `None`.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.contains(',') {
            return None;
        }
        if trimmed == ETAG_ANY {
            Some(ETag::Any)
        } else {
            Some(ETag::Tag(trimmed.to_string()))
        }
    }

    pub fn matches(&self, stored: &str) -> bool {
        match self {
            ETag::Any => true,
            ETag::Tag(expected) => expected == stored,
        }
    }

    /// Mints a fresh opaque token for a newly written row.
    pub fn generate() -> String {
        format!("W/\"{}\"", uuid::Uuid::new_v4())
    }
}

impl std::fmt::Display for ETag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ETag::Any => f.write_str(ETAG_ANY),
            ETag::Tag(tag) => f.write_str(tag),
        }
    }
}

/// Capability interface over a partitioned key-value table.
///
/// Each method is a single round trip touching at most one row (or one partition for
/// `scan`). Implementations must never panic on missing rows: absence is reported as
/// `Ok(None)` from `get` and as `StoreError::NotFound` from `replace` / `delete`.
#[async_trait]
pub trait PartitionedTable: Send + Sync {
    /// Inserts a new row. Fails with `AlreadyExists` if the key is taken.
    async fn insert(&self, entity: TableEntity) -> Result<TableEntity, StoreError>;

    /// Returns every row currently stored under `partition`, in storage order.
    async fn scan(&self, partition: &str) -> Result<Vec<TableEntity>, StoreError>;

    /// Point lookup.
    async fn get(&self, partition: &str, row_key: &str) -> Result<Option<TableEntity>, StoreError>;

    /// Replaces an existing row in place and advances its `etag`.
    async fn replace(
        &self,
        entity: TableEntity,
        if_match: &ETag,
    ) -> Result<TableEntity, StoreError>;

    /// Removes a row permanently.
    async fn delete(
        &self,
        partition: &str,
        row_key: &str,
        if_match: &ETag,
    ) -> Result<(), StoreError>;
}
