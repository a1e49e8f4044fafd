use axum::{
    extract::rejection::JsonRejection, http::StatusCode, routing::get, Json, Router,
};
use serde_json::Value;
use tracing::warn;

use crate::{
    api::{
        not_found,
        rest::{market::router as market_router, warehouses::router as warehouses_router},
    },
    domain::models::Envelope,
};

pub mod health;
pub mod market;
pub mod warehouses;

pub const INVALID_BODY: &str = "Invalid payload: request body must be JSON";

pub fn router() -> Router {
    Router::new()
        .route("/health", get(health::healthcheck).fallback(not_found))
        .merge(market_router())
        .merge(warehouses_router())
}

/// Turns an unreadable body into the same envelope shape a validation failure gets.
fn json_body(payload: Result<Json<Value>, JsonRejection>) -> Result<Value, Envelope> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            warn!(error = %rejection.body_text(), "rejected request body");
            Err(Envelope::failure(StatusCode::BAD_REQUEST, INVALID_BODY))
        }
    }
}
