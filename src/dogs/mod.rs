//! Dog Records Module
//!
//! The record service proper: a `DogStore` that persists dog records in one partition of
//! a table, and the five HTTP handlers that expose it.
//!
//! ## Core Concepts
//! - **Identity**: `id` is a UUID assigned on create and used as the row key. All records
//!   share the partition the store was constructed with.
//! - **Partial Merge**: `PUT` overwrites `name`, `breed` and `sex` only when they are
//!   supplied non-empty, and always overwrites `age`.
//! - **Outcomes**: absence is a normal result (`Option` / `DeleteOutcome`); everything else
//!   is a typed `DogError` that the handlers map to a status code.
//!
//! ## Submodules
//! - **`types`**: The record, the request bodies, and their table mapping.
//! - **`store`**: Create / list / get / update / delete against a `PartitionedTable`.
//! - **`handlers`**: axum handlers and the outcome-to-status mapping.
//! - **`protocol`**: Routes and response DTOs.

pub mod error;
pub mod handlers;
pub mod protocol;
pub mod store;
pub mod types;
