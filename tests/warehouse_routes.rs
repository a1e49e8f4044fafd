use axum::http::StatusCode;
use mandi_relay::{
    domain::policy::WarehouseQueryMode, infrastructure::config::PolicyConfig,
};
use serde_json::json;

#[path = "test_harness.rs"]
mod test_harness;

use test_harness::{build_app, post_json, FakeBackend};

const ROUTE: &str = "/get_nearest_warehouses";

fn nearest_policy() -> PolicyConfig {
    PolicyConfig {
        warehouse_query: WarehouseQueryMode::Nearest,
        ..PolicyConfig::default()
    }
}

fn warehouse_body() -> serde_json::Value {
    json!({
        "data": {
            "warehouse": [
                { "warehouse_code": "MH-PUN-01", "warehouse_name": "Hadapsar Central", "pincode": "411028", "distance": 3.1, "distance_unit": "km" },
                { "warehouse_code": "MH-PUN-02", "warehouse_name": "Kharadi Storage", "pincode": "411014", "distance": 7.8, "distance_unit": "km" }
            ]
        }
    })
}

#[tokio::test]
async fn filtered_mode_relays_matching_warehouses() {
    let backend = FakeBackend::returning(warehouse_body());
    let app = build_app(backend.clone(), PolicyConfig::default());

    let (status, envelope) = post_json(
        &app,
        ROUTE,
        json!({ "latitude": "18.5089", "longitude": "73.9260" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["status"], json!(200));
    assert_eq!(
        envelope["response"],
        json!("Nearest Warehouse information retrieved successfully")
    );
    assert_eq!(envelope["data"], warehouse_body()["data"]["warehouse"]);

    let query = backend.last_query();
    assert_eq!(query.operation, "GetWarehouses");
    assert_eq!(
        query.variables,
        json!({ "latitude": "18.5089", "longitude": "73.9260" })
    );
}

#[tokio::test]
async fn filtered_mode_rejects_numeric_coordinates() {
    let backend = FakeBackend::returning(warehouse_body());
    let app = build_app(backend.clone(), PolicyConfig::default());

    for payload in [
        json!({ "latitude": 18.5089, "longitude": 73.9260 }),
        json!({ "latitude": "18.5089" }),
        json!({ "longitude": "73.9260", "latitude": null }),
    ] {
        let (status, envelope) = post_json(&app, ROUTE, payload).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            envelope,
            json!({ "status": 400, "response": "Invalid or missing longitude/latitude", "data": [] })
        );
    }

    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn nearest_mode_runs_static_top_five_query() {
    let backend = FakeBackend::returning(warehouse_body());
    let app = build_app(backend.clone(), nearest_policy());

    let (status, envelope) = post_json(
        &app,
        ROUTE,
        json!({ "latitude": 18.5089, "longitude": 73.9260 }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["data"].as_array().map(Vec::len), Some(2));

    let query = backend.last_query();
    assert_eq!(query.operation, "GetNearestWarehouses");
    assert!(query
        .query
        .contains("order_by: { distance: asc }, limit: 5"));
    assert_eq!(query.variables, json!({}));
}

#[tokio::test]
async fn nearest_mode_rejects_string_coordinates() {
    let backend = FakeBackend::returning(warehouse_body());
    let app = build_app(backend.clone(), nearest_policy());

    let (status, _) = post_json(
        &app,
        ROUTE,
        json!({ "latitude": "18.5089", "longitude": "73.9260" }),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(backend.call_count(), 0);
}

#[tokio::test]
async fn graphql_errors_are_not_leaked_to_callers() {
    let backend = FakeBackend::returning(json!({
        "errors": [{ "message": "permission denied for table warehouse", "extensions": { "code": "access-denied" } }]
    }));
    let app = build_app(backend, PolicyConfig::default());

    let (status, envelope) = post_json(
        &app,
        ROUTE,
        json!({ "latitude": "18.5089", "longitude": "73.9260" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        envelope,
        json!({ "status": 500, "response": "Error fetching warehouses from Hasura", "data": [] })
    );
}

#[tokio::test]
async fn missing_warehouse_key_is_an_empty_success() {
    let backend = FakeBackend::returning(json!({ "data": null }));
    let app = build_app(backend, PolicyConfig::default());

    let (status, envelope) = post_json(
        &app,
        ROUTE,
        json!({ "latitude": "18.5089", "longitude": "73.9260" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(envelope["data"], json!([]));
}

#[tokio::test]
async fn network_errors_use_warehouse_wording() {
    let backend = FakeBackend::failing("dns error");
    let app = build_app(backend, PolicyConfig::default());

    let (status, envelope) = post_json(
        &app,
        ROUTE,
        json!({ "latitude": "18.5089", "longitude": "73.9260" }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        envelope,
        json!({ "status": 500, "response": "Internal server error", "data": [] })
    );
}
