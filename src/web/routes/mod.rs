//! Contains all the routes that this application can handle.

mod api;

use axum::{
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use crate::AppState;

async fn root() -> Json<Value> {
    Json(json!({
        "message": "Pilot Program API",
        "status": "running",
    }))
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "healthy" }))
}

/// All the routes of the server
pub fn routes(app_state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .nest("/api", api_routes(app_state))
}

/// API - Routes nested under "/api" path
fn api_routes(app_state: AppState) -> Router {
    Router::new()
        .route("/signup", post(api::signup))
        .route("/signups", get(api::signups_list))
        .route("/signups/{id}", get(api::signup_by_id))
        .with_state(app_state)
}
