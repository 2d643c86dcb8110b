/// Failures surfaced by a `PartitionedTable`.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("row {partition}/{row_key} not found")]
    NotFound { partition: String, row_key: String },

    #[error("row {partition}/{row_key} already exists")]
    AlreadyExists { partition: String, row_key: String },

    #[error("precondition failed for {partition}/{row_key}: expected {expected}, found {actual}")]
    PreconditionFailed {
        partition: String,
        row_key: String,
        expected: String,
        actual: String,
    },

    #[error("table unavailable: {0}")]
    Unavailable(String),
}
