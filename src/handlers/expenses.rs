use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use tracing::info;
use uuid::Uuid;

use crate::handlers::params::{self, ExpensesQuery};
use crate::handlers::records;
use crate::models::{Expense, ExpenseDetails};
use crate::state::AppState;
use crate::utils::ApiError;

pub async fn list(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(query): Query<ExpensesQuery>,
) -> Result<Json<Vec<Expense>>, ApiError> {
    let tenant = records::tenant(&headers)?;
    info!(%tenant, "listing expenses");

    let parameters = params::validate_expenses(&query)?;
    let cancel = state.shutdown.child_token();
    records::list(&state.expenses, &tenant, &parameters, &cancel).await
}

pub async fn get_one(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<Json<Expense>, ApiError> {
    let tenant = records::tenant(&headers)?;
    let cancel = state.shutdown.child_token();
    records::get_one(&state.expenses, &tenant, id, &cancel).await
}

pub async fn create(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(details): Json<ExpenseDetails>,
) -> Result<(StatusCode, Json<Expense>), ApiError> {
    let tenant = records::tenant(&headers)?;
    info!(%tenant, "creating expense");

    let cancel = state.shutdown.child_token();
    records::create(&state.expenses, &tenant, details, &cancel).await
}

pub async fn update(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
    Json(details): Json<ExpenseDetails>,
) -> Result<Json<Expense>, ApiError> {
    let tenant = records::tenant(&headers)?;
    info!(%tenant, id = %id, "updating expense");

    let cancel = state.shutdown.child_token();
    records::update(&state.expenses, &tenant, id, details, &cancel).await
}

pub async fn remove(
    State(state): State<AppState>,
    headers: HeaderMap,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let tenant = records::tenant(&headers)?;
    info!(%tenant, id = %id, "deleting expense");

    let cancel = state.shutdown.child_token();
    records::remove(&state.expenses, &tenant, id, &cancel).await
}
