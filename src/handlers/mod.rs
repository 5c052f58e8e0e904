pub mod expenses;
pub mod health;
pub mod incomes;
pub mod params;
pub mod records;

use axum::routing::get;
use axum::Router;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::state::AppState;

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_check))
        .route(
            "/api/expenses",
            get(expenses::list).post(expenses::create),
        )
        .route(
            "/api/expenses/{id}",
            get(expenses::get_one)
                .put(expenses::update)
                .delete(expenses::remove),
        )
        .route("/api/incomes", get(incomes::list).post(incomes::create))
        .route(
            "/api/incomes/{id}",
            get(incomes::get_one)
                .put(incomes::update)
                .delete(incomes::remove),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
