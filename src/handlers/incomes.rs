use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::handlers::params::{self, IncomesQuery};
use crate::handlers::records;
use crate::models::{Income, IncomeDetails};
use crate::state::AppState;
use crate::utils::ApiError;

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<IncomesQuery>,
) -> Result<Json<Vec<Income>>, ApiError> {
    let tenant = records::tenant(&headers)?;
    info!(%tenant, "listing incomes");

    let parameters = params::validate_incomes(&query)?;
    let cancel = state.shutdown.child_token();
    records::list(&state.incomes, &tenant, &parameters, &cancel).await
}

pub async fn get_one(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Income>, ApiError> {
    let tenant = records::tenant(&headers)?;
    let cancel = state.shutdown.child_token();
    records::get_one(&state.incomes, &tenant, id, &cancel).await
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(details): Json<IncomeDetails>,
) -> Result<(StatusCode, Json<Income>), ApiError> {
    let tenant = records::tenant(&headers)?;
    info!(%tenant, "creating income");

    let cancel = state.shutdown.child_token();
    records::create(&state.incomes, &tenant, details, &cancel).await
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(details): Json<IncomeDetails>,
) -> Result<Json<Income>, ApiError> {
    let tenant = records::tenant(&headers)?;
    info!(%tenant, id = %id, "updating income");

    let cancel = state.shutdown.child_token();
    records::update(&state.incomes, &tenant, id, details, &cancel).await
}

pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let tenant = records::tenant(&headers)?;
    info!(%tenant, id = %id, "deleting income");

    let cancel = state.shutdown.child_token();
    records::remove(&state.incomes, &tenant, id, &cancel).await
}
