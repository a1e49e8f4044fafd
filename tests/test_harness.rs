#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Extension, Router,
};
use mandi_relay::{
    api,
    domain::query::GraphQlQuery,
    infrastructure::{
        config::{AppConfig, Config, HasuraConfig, PolicyConfig},
        hasura::{BackendResponse, GraphQlBackend, TransportError},
        state::AppState,
    },
};
use serde_json::Value;
use tower::ServiceExt;

/// What the fake backend answers with on every call.
pub enum FakeOutcome {
    Body(Value),
    NetworkError(&'static str),
}

pub struct FakeBackend {
    outcome: FakeOutcome,
    calls: Mutex<Vec<GraphQlQuery>>,
}

impl FakeBackend {
    pub fn returning(body: Value) -> Arc<Self> {
        Arc::new(Self {
            outcome: FakeOutcome::Body(body),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn failing(message: &'static str) -> Arc<Self> {
        Arc::new(Self {
            outcome: FakeOutcome::NetworkError(message),
            calls: Mutex::new(Vec::new()),
        })
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_query(&self) -> GraphQlQuery {
        self.calls
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("backend was never called")
    }
}

#[async_trait]
impl GraphQlBackend for FakeBackend {
    async fn execute(&self, query: &GraphQlQuery) -> Result<BackendResponse, TransportError> {
        self.calls.lock().unwrap().push(query.clone());
        match &self.outcome {
            FakeOutcome::Body(body) => Ok(serde_json::from_value(body.clone())
                .expect("fake body must be a GraphQL response object")),
            FakeOutcome::NetworkError(message) => Err(TransportError::Network {
                message: message.to_string(),
            }),
        }
    }
}

pub fn test_config(policy: PolicyConfig) -> Arc<Config> {
    Arc::new(Config {
        app: AppConfig::default(),
        hasura: HasuraConfig {
            url: "http://hasura.test/v1/graphql".to_string(),
            admin_secret: "test-secret".to_string(),
            timeout_seconds: 5,
        },
        policy,
    })
}

pub fn build_app(backend: Arc<dyn GraphQlBackend>, policy: PolicyConfig) -> Router {
    let config = test_config(policy);
    let state = Arc::new(AppState::new(Arc::clone(&config), backend));
    api::build_router(config.as_ref()).layer(Extension(state))
}

pub async fn post_raw(app: &Router, uri: &str, body: String) -> (StatusCode, Vec<u8>) {
    send_raw(app, Method::POST, uri, body).await
}

pub async fn send_raw(
    app: &Router,
    method: Method,
    uri: &str,
    body: String,
) -> (StatusCode, Vec<u8>) {
    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(method)
                .uri(uri)
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body))
                .expect("failed to build request"),
        )
        .await
        .expect("service error");

    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("failed to read body");
    (status, bytes.to_vec())
}

pub async fn post_json(app: &Router, uri: &str, body: Value) -> (StatusCode, Value) {
    let (status, bytes) = post_raw(app, uri, body.to_string()).await;
    let envelope = serde_json::from_slice(&bytes).expect("response body must be JSON");
    (status, envelope)
}
