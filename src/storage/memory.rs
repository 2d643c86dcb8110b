use super::error::StoreError;
use super::table::{ETag, PartitionedTable, TableEntity};

use async_trait::async_trait;
use chrono::Utc;
use dashmap::DashMap;
use dashmap::mapref::entry::Entry;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process partitioned table.
///
/// Structure: `Partition Key -> Row Key -> TableEntity`. Each row operation holds the
/// shard lock of the inner map for its whole check-then-write, so single-row writes are
/// atomic. Nothing is atomic across rows.
pub struct MemoryTable {
    name: String,
    local_data: Arc<DashMap<String, DashMap<String, TableEntity>>>,
    available: AtomicBool,
}

impl MemoryTable {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            local_data: Arc::new(DashMap::new()),
            available: AtomicBool::new(true),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Toggles availability. While unavailable every operation fails with
    /// `StoreError::Unavailable`, which lets callers exercise their outage path.
    pub fn set_available(&self, available: bool) {
        self.available.store(available, Ordering::SeqCst);
        if available {
            tracing::info!("Table {} is available", self.name);
        } else {
            tracing::warn!("Table {} marked unavailable", self.name);
        }
    }

    pub fn local_partition_count(&self) -> usize {
        self.local_data.len()
    }

    pub fn local_entry_count(&self) -> usize {
        self.local_data
            .iter()
            .map(|entry| entry.value().len())
            .sum()
    }

    fn ensure_available(&self) -> Result<(), StoreError> {
        if self.available.load(Ordering::SeqCst) {
            Ok(())
        } else {
            Err(StoreError::Unavailable(format!(
                "table {} is not accepting requests",
                self.name
            )))
        }
    }
}

fn stamp(mut entity: TableEntity) -> TableEntity {
    entity.etag = ETag::generate();
    entity.timestamp = Utc::now();
    entity
}

fn not_found(partition: &str, row_key: &str) -> StoreError {
    StoreError::NotFound {
        partition: partition.to_string(),
        row_key: row_key.to_string(),
    }
}

fn precondition_failed(
    partition: &str,
    row_key: &str,
    expected: &ETag,
    actual: &str,
) -> StoreError {
    StoreError::PreconditionFailed {
        partition: partition.to_string(),
        row_key: row_key.to_string(),
        expected: expected.to_string(),
        actual: actual.to_string(),
    }
}

#[async_trait]
impl PartitionedTable for MemoryTable {
    async fn insert(&self, entity: TableEntity) -> Result<TableEntity, StoreError> {
        self.ensure_available()?;

        let partition_map = self
            .local_data
            .entry(entity.partition_key.clone())
            .or_default();

        match partition_map.entry(entity.row_key.clone()) {
            Entry::Occupied(_) => Err(StoreError::AlreadyExists {
                partition: entity.partition_key,
                row_key: entity.row_key,
            }),
            Entry::Vacant(slot) => {
                let stored = stamp(entity);
                slot.insert(stored.clone());
                tracing::debug!(
                    "Inserted row {}/{} into {}",
                    stored.partition_key,
                    stored.row_key,
                    self.name
                );
                Ok(stored)
            }
        }
    }

    async fn scan(&self, partition: &str) -> Result<Vec<TableEntity>, StoreError> {
        self.ensure_available()?;

        let mut entries = Vec::new();
        if let Some(partition_map) = self.local_data.get(partition) {
            for entry in partition_map.iter() {
                entries.push(entry.value().clone());
            }
        }
        Ok(entries)
    }

    async fn get(
        &self,
        partition: &str,
        row_key: &str,
    ) -> Result<Option<TableEntity>, StoreError> {
        self.ensure_available()?;

        if let Some(partition_map) = self.local_data.get(partition)
            && let Some(value) = partition_map.get(row_key)
        {
            return Ok(Some(value.clone()));
        }

        Ok(None)
    }

    async fn replace(
        &self,
        entity: TableEntity,
        if_match: &ETag,
    ) -> Result<TableEntity, StoreError> {
        self.ensure_available()?;

        let partition_map = self
            .local_data
            .get(&entity.partition_key)
            .ok_or_else(|| not_found(&entity.partition_key, &entity.row_key))?;

        let mut existing = partition_map
            .get_mut(&entity.row_key)
            .ok_or_else(|| not_found(&entity.partition_key, &entity.row_key))?;

        if !if_match.matches(&existing.etag) {
            return Err(precondition_failed(
                &entity.partition_key,
                &entity.row_key,
                if_match,
                &existing.etag,
            ));
        }

        let stored = stamp(entity);
        *existing = stored.clone();
        Ok(stored)
    }

    async fn delete(
        &self,
        partition: &str,
        row_key: &str,
        if_match: &ETag,
    ) -> Result<(), StoreError> {
        self.ensure_available()?;

        let partition_map = self
            .local_data
            .get(partition)
            .ok_or_else(|| not_found(partition, row_key))?;

        match partition_map.entry(row_key.to_string()) {
            Entry::Vacant(_) => Err(not_found(partition, row_key)),
            Entry::Occupied(slot) => {
                if !if_match.matches(&slot.get().etag) {
                    return Err(precondition_failed(
                        partition,
                        row_key,
                        if_match,
                        &slot.get().etag,
                    ));
                }
                slot.remove();
                tracing::debug!("Deleted row {}/{} from {}", partition, row_key, self.name);
                Ok(())
            }
        }
    }
}
