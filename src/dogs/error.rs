use crate::storage::error::StoreError;

/// Failures of a dog store operation. Absence of a record is not an error and is
/// reported through the operation's return value instead.
#[derive(Debug, thiserror::Error)]
pub enum DogError {
    #[error("{0}")]
    Validation(String),

    #[error("dog {id} was modified concurrently: {detail}")]
    Conflict { id: String, detail: String },

    #[error("dog {id} has malformed stored properties: {detail}")]
    Corrupt { id: String, detail: String },

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

impl From<StoreError> for DogError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::PreconditionFailed { row_key, .. } => DogError::Conflict {
                id: row_key,
                detail: "concurrency token does not match".to_string(),
            },
            StoreError::Unavailable(detail) => DogError::Unavailable(detail),
            // Callers translate NotFound into an absence outcome before reaching here
            other @ (StoreError::NotFound { .. } | StoreError::AlreadyExists { .. }) => {
                DogError::Unavailable(other.to_string())
            }
        }
    }
}
