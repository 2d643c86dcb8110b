//! Dog Record Store
//!
//! Owns the persisted representation of dog records inside one partition of a
//! `PartitionedTable`. Every method is one logical operation of the API:
//! create, list, get by id, partial update and delete.
//!
//! ## Concurrency
//! Single-row operations rely on the table's atomicity. Update is a read-modify-write and
//! is *not* atomic across its two round trips: with `ETag::Any` two concurrent updates to
//! the same id may lose one writer's change. Passing the token read by the client as
//! `ETag::Tag` turns the replace into a conditional write and surfaces the race as
//! `DogError::Conflict`.

use super::error::DogError;
use super::types::{Dog, DogCreateModel, DogUpdateModel};
use crate::storage::error::StoreError;
use crate::storage::table::{ETag, PartitionedTable, TableEntity};

use std::sync::Arc;

/// Result of a delete. The store distinguishes "deleted" from "was never there".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeleteOutcome {
    Deleted,
    NotFound,
}

/// Lazily maps scanned rows to records. Malformed rows are skipped with a warning.
pub struct DogIter {
    rows: std::vec::IntoIter<TableEntity>,
}

impl Iterator for DogIter {
    type Item = Dog;

    fn next(&mut self) -> Option<Dog> {
        for row in self.rows.by_ref() {
            match Dog::from_table_entity(row) {
                Ok(dog) => return Some(dog),
                Err(e) => tracing::warn!("Skipping unreadable row: {}", e),
            }
        }
        None
    }
}

pub struct DogStore {
    table: Arc<dyn PartitionedTable>,
    partition: String,
}

impl DogStore {
    pub fn new(table: Arc<dyn PartitionedTable>, partition: &str) -> Self {
        Self {
            table,
            partition: partition.to_string(),
        }
    }

    pub fn partition(&self) -> &str {
        &self.partition
    }

    /// Validates the candidate, assigns `id` and `createdTime`, and inserts it.
    pub async fn create(&self, candidate: DogCreateModel) -> Result<Dog, DogError> {
        let dog = candidate.validate()?.into_new_dog();
        let entity = dog.to_table_entity(&self.partition)?;

        let stored = self.table.insert(entity).await?;
        tracing::debug!("Created dog {} in partition {}", stored.row_key, self.partition);

        Dog::from_table_entity(stored)
    }

    /// Scans the partition. Order is whatever the table returns. Call again to re-scan.
    pub async fn list(&self) -> Result<DogIter, DogError> {
        let rows = self.table.scan(&self.partition).await?;
        Ok(DogIter {
            rows: rows.into_iter(),
        })
    }

    /// Point lookup. `Ok(None)` when no record with `id` exists.
    pub async fn get(&self, id: &str) -> Result<Option<Dog>, DogError> {
        match self.table.get(&self.partition, id).await? {
            Some(row) => Dog::from_table_entity(row).map(Some),
            None => Ok(None),
        }
    }

    /// Partial merge update. `Ok(None)` when the record does not exist; an update never
    /// creates a record.
    pub async fn update(
        &self,
        id: &str,
        update: DogUpdateModel,
        if_match: &ETag,
    ) -> Result<Option<Dog>, DogError> {
        let Some(row) = self.table.get(&self.partition, id).await? else {
            return Ok(None);
        };

        let mut dog = Dog::from_table_entity(row)?;
        dog.merge(update);

        let entity = dog.to_table_entity(&self.partition)?;
        match self.table.replace(entity, if_match).await {
            Ok(stored) => Dog::from_table_entity(stored).map(Some),
            // Deleted between the read and the replace
            Err(StoreError::NotFound { .. }) => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    pub async fn delete(&self, id: &str, if_match: &ETag) -> Result<DeleteOutcome, DogError> {
        match self.table.delete(&self.partition, id, if_match).await {
            Ok(()) => Ok(DeleteOutcome::Deleted),
            Err(StoreError::NotFound { .. }) => Ok(DeleteOutcome::NotFound),
            Err(e) => Err(e.into()),
        }
    }
}
