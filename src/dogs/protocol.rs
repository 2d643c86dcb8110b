//! Dog API Protocol
//!
//! Route paths and the non-record response bodies of the HTTP surface.

use serde::{Deserialize, Serialize};

// --- API Endpoints ---

/// Collection endpoint: `POST` creates, `GET` lists.
pub const ENDPOINT_DOGS: &str = "/dogs";
/// Collection path with a trailing slash but no id.
pub const ENDPOINT_DOGS_NO_ID: &str = "/dogs/";
/// Item endpoint: `GET`, `PUT` and `DELETE` by id.
pub const ENDPOINT_DOG_BY_ID: &str = "/dogs/:id";
/// Liveness probe.
pub const ENDPOINT_HEALTH: &str = "/health";

// --- Messages ---

pub const MSG_MISSING_BODY: &str = "Please pass a dog in the request body";
pub const MSG_MISSING_ID: &str = "Please pass an id in the url";
pub const MSG_BAD_IF_MATCH: &str = "If-Match must carry a single entity tag or *";

// --- Data Transfer Objects ---

/// Body returned by every failed request.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Confirmation returned by a successful delete.
#[derive(Debug, Serialize, Deserialize)]
pub struct DeleteResponse {
    pub id: String,
    pub message: String,
}

impl DeleteResponse {
    pub fn new(id: &str) -> Self {
        Self {
            id: id.to_string(),
            message: format!("Dog deleted with id: {}", id),
        }
    }
}

pub fn not_found_message(id: &str) -> String {
    format!("Unable to find specified item with id: {}", id)
}
