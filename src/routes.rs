use crate::app::AppState;
use crate::handlers::{health_check, packing_suggestions};
use axum::{Router, routing::get, routing::post};

/// Creates and configures all application routes
pub fn create_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(health_check))
        .route("/packing-suggestions", post(packing_suggestions))
}
