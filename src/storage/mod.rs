//! Partitioned Table Storage Module
//!
//! Implements the key-value table that backs the record service.
//!
//! ## Core Concepts
//! - **Partitioning**: Every row lives under a partition key. Rows sharing a partition are
//!   scanned together; the pair (`partition`, `row_key`) addresses exactly one row.
//! - **Concurrency Tokens**: Every write stamps the row with a fresh `ETag`. Replace and
//!   delete accept an `If-Match` style precondition so callers can opt into optimistic
//!   concurrency.
//! - **Access**: `PartitionedTable` is the capability the rest of the crate depends on.
//!   `MemoryTable` is the in-process implementation used by the server and the tests.

pub mod error;
pub mod memory;
pub mod table;
