use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Extension},
    routing::post,
    Json, Router,
};
use serde_json::Value;

use crate::{
    api::not_found, domain::models::Envelope, infrastructure::state::AppState,
    services::relay::RelayService,
};

use super::json_body;

pub fn router() -> Router {
    Router::new().route(
        "/get_nearest_warehouses",
        post(get_nearest_warehouses).fallback(not_found),
    )
}

async fn get_nearest_warehouses(
    Extension(state): Extension<Arc<AppState>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> Envelope {
    let payload = match json_body(payload) {
        Ok(payload) => payload,
        Err(envelope) => return envelope,
    };
    RelayService::new(state).nearest_warehouses(&payload).await
}
