use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::models::{Record, RecordDetails};
use crate::repository::FilterParameters;
use crate::services::Registry;
use crate::utils::ApiError;

/// The pre-validated tenant identifier arrives in the `Username` header.
/// Blank or missing means the request is unauthorized.
pub fn tenant(headers: &HeaderMap) -> Result<String, ApiError> {
    headers
        .get("Username")
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned)
        .filter(|value| !value.trim().is_empty())
        .ok_or_else(|| ApiError::Unauthorized("missing or blank Username header".to_string()))
}

// Shared handler bodies: both resource kinds route into the same generic
// registry calls, differing only in the query validation above them.

pub async fn list<D: RecordDetails>(
    registry: &Registry<D>,
    tenant: &str,
    parameters: &FilterParameters,
    cancel: &CancellationToken,
) -> Result<Json<Vec<Record<D>>>, ApiError> {
    let records = registry.get_all(tenant, Some(parameters), cancel).await?;
    Ok(Json(records))
}

pub async fn get_one<D: RecordDetails>(
    registry: &Registry<D>,
    tenant: &str,
    id: Uuid,
    cancel: &CancellationToken,
) -> Result<Json<Record<D>>, ApiError> {
    match registry.get(tenant, id, cancel).await? {
        Some(record) => Ok(Json(record)),
        None => Err(ApiError::NotFound(format!("no record found with id {id}"))),
    }
}

pub async fn create<D: RecordDetails>(
    registry: &Registry<D>,
    tenant: &str,
    details: D,
    cancel: &CancellationToken,
) -> Result<(StatusCode, Json<Record<D>>), ApiError> {
    let record = registry.insert(tenant, details, cancel).await?;
    Ok((StatusCode::CREATED, Json(record)))
}

pub async fn update<D: RecordDetails>(
    registry: &Registry<D>,
    tenant: &str,
    id: Uuid,
    details: D,
    cancel: &CancellationToken,
) -> Result<Json<Record<D>>, ApiError> {
    let record = registry.update(tenant, id, details, cancel).await?;
    Ok(Json(record))
}

pub async fn remove<D: RecordDetails>(
    registry: &Registry<D>,
    tenant: &str,
    id: Uuid,
    cancel: &CancellationToken,
) -> Result<StatusCode, ApiError> {
    registry.delete(tenant, id, cancel).await?;
    Ok(StatusCode::NO_CONTENT)
}
