//! # REST API Handler
//!
//! One async handler per endpoint. Each validates its inputs, runs a single
//! store operation off the async workers and maps the outcome to a status
//! code.

use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::rejection::BytesRejection;
use axum::extract::{Path, Query, State};

use crate::pet::Pet;
use crate::store::{PetStore, StoreError, StoreResult};

use super::errors::{ApiError, ApiResult};
use super::parser::ListParams;
use super::response::JsonResponse;

/// Application context shared by every handler
pub struct ApiState<S: PetStore> {
    store: Arc<S>,
}

impl<S: PetStore> Clone for ApiState<S> {
    fn clone(&self) -> Self {
        Self {
            store: Arc::clone(&self.store),
        }
    }
}

impl<S: PetStore + 'static> ApiState<S> {
    pub fn new(store: S) -> Self {
        Self::from_arc(Arc::new(store))
    }

    pub fn from_arc(store: Arc<S>) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &Arc<S> {
        &self.store
    }

    /// Run a blocking store operation on the blocking pool
    async fn run<T, F>(&self, op: F) -> StoreResult<T>
    where
        T: Send + 'static,
        F: FnOnce(&S) -> StoreResult<T> + Send + 'static,
    {
        let store = Arc::clone(&self.store);
        tokio::task::spawn_blocking(move || op(store.as_ref()))
            .await
            .map_err(|e| StoreError::Internal(format!("store task failed: {}", e)))?
    }
}

/// Path segment must be an integer
pub fn parse_pet_id(raw: Option<Path<String>>) -> ApiResult<i64> {
    let Path(raw) = raw.ok_or(ApiError::InvalidRequest)?;
    raw.parse().map_err(|_| ApiError::InvalidRequest)
}

/// Body must be a JSON pet
pub fn decode_pet(body: &[u8]) -> ApiResult<Pet> {
    serde_json::from_slice(body).map_err(|_| ApiError::InvalidPayload)
}

/// A body that could not be read in full (client gone, read timeout) is
/// treated like a malformed one
pub fn read_pet(body: Result<Bytes, BytesRejection>) -> ApiResult<Pet> {
    let body = body.map_err(|e| {
        tracing::debug!(error = %e, "request body not readable");
        ApiError::InvalidPayload
    })?;
    decode_pet(&body)
}

/// `GET /pets?start=&count=`
pub async fn get_pets<S: PetStore + 'static>(
    State(state): State<ApiState<S>>,
    query: Option<Query<Vec<(String, String)>>>,
) -> ApiResult<JsonResponse<Vec<Pet>>> {
    let params = query
        .map(|Query(q)| ListParams::parse(&q))
        .unwrap_or_default();

    let pets = state
        .run(move |store| store.select_range(params.start, params.count))
        .await?;
    Ok(JsonResponse::ok(pets))
}

/// `GET /pet/{petId}`
pub async fn get_pet_by_id<S: PetStore + 'static>(
    State(state): State<ApiState<S>>,
    pet_id: Option<Path<String>>,
) -> ApiResult<JsonResponse<Pet>> {
    let id = parse_pet_id(pet_id)?;

    let pet = state.run(move |store| store.select_by_id(id)).await?;
    Ok(JsonResponse::ok(pet))
}

/// `POST /pet/{petId}`
///
/// The path id is validated only; the store assigns the new identifier.
pub async fn add_pet<S: PetStore + 'static>(
    State(state): State<ApiState<S>>,
    pet_id: Option<Path<String>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<JsonResponse<Pet>> {
    parse_pet_id(pet_id)?;
    let mut pet = read_pet(body)?;

    let name = pet.name.clone();
    pet.id = state.run(move |store| store.insert(&name)).await?;

    tracing::debug!(id = pet.id, "pet created");
    Ok(JsonResponse::created(pet))
}

/// `PUT /pet/{petId}`
///
/// Renames the pet named by the path; an `id` in the body is ignored.
pub async fn update_pet<S: PetStore + 'static>(
    State(state): State<ApiState<S>>,
    pet_id: Option<Path<String>>,
    body: Result<Bytes, BytesRejection>,
) -> ApiResult<JsonResponse<Pet>> {
    let id = parse_pet_id(pet_id)?;
    let mut pet = read_pet(body)?;
    pet.id = id;

    let name = pet.name.clone();
    state
        .run(move |store| store.update_name_by_id(id, &name))
        .await?;
    Ok(JsonResponse::ok(pet))
}

/// `DELETE /pet/{petId}`
pub async fn delete_pet<S: PetStore + 'static>(
    State(state): State<ApiState<S>>,
    pet_id: Option<Path<String>>,
) -> ApiResult<JsonResponse<()>> {
    let id = parse_pet_id(pet_id)?;

    state.run(move |store| store.delete_by_id(id)).await?;
    Ok(JsonResponse::empty())
}
