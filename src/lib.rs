//! Dog Records Service Library
//!
//! This library crate defines the modules of the dog record service. It serves as the
//! foundation for the binary executable (`main.rs`).
//!
//! ## Architecture Modules
//! The request path is a linear chain: transport → handler → record store → table.
//!
//! - **`dogs`**: The record store (`DogStore`) with its partial-merge update rule, and the
//!   axum handlers that translate store outcomes into HTTP responses.
//! - **`storage`**: The partitioned key-value table capability (`PartitionedTable`) and its
//!   in-memory implementation (`MemoryTable`) with per-row concurrency tokens.
//! - **`config`**: Command line / environment configuration for the server.

pub mod config;
pub mod dogs;
pub mod storage;
