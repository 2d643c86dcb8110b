use super::error::DogError;
use super::protocol::*;
use super::store::{DeleteOutcome, DogStore};
use super::types::{Dog, DogCreateModel, DogUpdateModel};
use crate::storage::table::ETag;

use axum::extract::rejection::JsonRejection;
use axum::http::{HeaderMap, StatusCode, header};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post, put};
use axum::{Extension, Json, Router, extract::Path};
use std::sync::Arc;

/// Outcome of a request that did not produce a record. Every variant carries the
/// message placed in the `ErrorResponse` body.
#[derive(Debug)]
pub enum ApiError {
    BadRequest(String),
    NotFound(String),
    PreconditionFailed(String),
    Internal(String),
    BadGateway(String),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::PreconditionFailed(_) => StatusCode::PRECONDITION_FAILED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway(_) => StatusCode::BAD_GATEWAY,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error = match self {
            ApiError::BadRequest(msg)
            | ApiError::NotFound(msg)
            | ApiError::PreconditionFailed(msg)
            | ApiError::Internal(msg)
            | ApiError::BadGateway(msg) => msg,
        };
        (status, Json(ErrorResponse { error })).into_response()
    }
}

impl From<DogError> for ApiError {
    fn from(err: DogError) -> Self {
        match err {
            DogError::Validation(msg) => {
                tracing::warn!("Rejected request: {}", msg);
                ApiError::BadRequest(msg)
            }
            DogError::Conflict { .. } => {
                tracing::warn!("{}", err);
                ApiError::PreconditionFailed(err.to_string())
            }
            DogError::Corrupt { .. } => {
                tracing::error!("{}", err);
                ApiError::Internal(err.to_string())
            }
            DogError::Unavailable(_) => {
                tracing::error!("{}", err);
                ApiError::BadGateway(err.to_string())
            }
        }
    }
}

fn rejected_body(rejection: JsonRejection) -> ApiError {
    let msg = match rejection {
        JsonRejection::MissingJsonContentType(_) => MSG_MISSING_BODY.to_string(),
        other => other.body_text(),
    };
    tracing::warn!("Failed to parse request body: {}", msg);
    ApiError::BadRequest(msg)
}

fn require_id(id: &str) -> Result<(), ApiError> {
    if id.trim().is_empty() {
        tracing::warn!("Request without id");
        return Err(ApiError::BadRequest(MSG_MISSING_ID.to_string()));
    }
    Ok(())
}

fn if_match(headers: &HeaderMap) -> Result<ETag, ApiError> {
    match headers.get(header::IF_MATCH) {
        None => Ok(ETag::Any),
        Some(value) => value
            .to_str()
            .ok()
            .and_then(ETag::parse)
            .ok_or_else(|| {
                tracing::warn!("Rejected If-Match header {:?}", value);
                ApiError::BadRequest(MSG_BAD_IF_MATCH.to_string())
            }),
    }
}

fn not_found(id: &str) -> ApiError {
    tracing::info!("Dog {} not found", id);
    ApiError::NotFound(not_found_message(id))
}

fn record_response(dog: Dog) -> Response {
    (
        StatusCode::OK,
        [(header::ETAG, dog.concurrency_token.clone())],
        Json(dog),
    )
        .into_response()
}

pub async fn handle_create_dog(
    Extension(store): Extension<Arc<DogStore>>,
    payload: Result<Json<DogCreateModel>, JsonRejection>,
) -> Result<Response, ApiError> {
    tracing::info!("Starting CreateDog function...");

    let Json(candidate) = payload.map_err(rejected_body)?;
    let dog = store.create(candidate).await?;

    tracing::info!("Created dog {}", dog.id);
    Ok(record_response(dog))
}

pub async fn handle_list_dogs(
    Extension(store): Extension<Arc<DogStore>>,
) -> Result<Json<Vec<Dog>>, ApiError> {
    tracing::info!("Starting GetAllDogs function...");

    let dogs: Vec<Dog> = store.list().await?.collect();

    tracing::debug!("Listed {} dogs", dogs.len());
    Ok(Json(dogs))
}

pub async fn handle_get_dog(
    Extension(store): Extension<Arc<DogStore>>,
    Path(id): Path<String>,
) -> Result<Response, ApiError> {
    tracing::info!("Starting GetDogById function...");

    match store.get(&id).await? {
        Some(dog) => Ok(record_response(dog)),
        None => Err(not_found(&id)),
    }
}

pub async fn handle_update_dog(
    Extension(store): Extension<Arc<DogStore>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<DogUpdateModel>, JsonRejection>,
) -> Result<Response, ApiError> {
    tracing::info!("Starting UpdateDog function...");

    require_id(&id)?;
    let expected = if_match(&headers)?;
    let Json(update) = payload.map_err(rejected_body)?;

    match store.update(&id, update, &expected).await? {
        Some(dog) => {
            tracing::info!("Updated dog {}", dog.id);
            Ok(record_response(dog))
        }
        None => Err(not_found(&id)),
    }
}

pub async fn handle_delete_dog(
    Extension(store): Extension<Arc<DogStore>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Json<DeleteResponse>, ApiError> {
    tracing::info!("Starting DeleteDog function...");

    require_id(&id)?;
    let expected = if_match(&headers)?;

    match store.delete(&id, &expected).await? {
        DeleteOutcome::Deleted => {
            tracing::info!("Deleted dog {}", id);
            Ok(Json(DeleteResponse::new(&id)))
        }
        DeleteOutcome::NotFound => Err(not_found(&id)),
    }
}

/// `PUT` / `DELETE` on the collection path, i.e. without an id segment.
pub async fn handle_missing_id() -> ApiError {
    tracing::warn!("Request without id");
    ApiError::BadRequest(MSG_MISSING_ID.to_string())
}

pub async fn handle_health() -> &'static str {
    "ok"
}

/// Routes of the dog API, with `store` attached as an extension.
pub fn router(store: Arc<DogStore>) -> Router {
    Router::new()
        .route(
            ENDPOINT_DOGS,
            post(handle_create_dog)
                .get(handle_list_dogs)
                .put(handle_missing_id)
                .delete(handle_missing_id),
        )
        .route(
            ENDPOINT_DOGS_NO_ID,
            put(handle_missing_id).delete(handle_missing_id),
        )
        .route(
            ENDPOINT_DOG_BY_ID,
            get(handle_get_dog)
                .put(handle_update_dog)
                .delete(handle_delete_dog),
        )
        .route(ENDPOINT_HEALTH, get(handle_health))
        .layer(Extension(store))
}
