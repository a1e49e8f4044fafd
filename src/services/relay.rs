use std::sync::Arc;

use serde_json::Value;

use crate::{
    domain::{
        models::Envelope,
        query::{market_price_query, warehouse_query, GraphQlQuery},
    },
    infrastructure::state::AppState,
    services::normalize::{
        failure, normalize, RouteMessages, MARKET_PRICE, NEAREST_WAREHOUSES,
    },
    validation::rules::{validate_market_price, validate_warehouse},
};

/// Validate, build, send, normalize. One backend call at most per request.
pub struct RelayService {
    pub state: Arc<AppState>,
}

impl RelayService {
    pub fn new(state: Arc<AppState>) -> Self {
        Self { state }
    }

    pub async fn market_prices(&self, payload: &Value) -> Envelope {
        let policy = self.state.config.policy.market_coordinates;
        match validate_market_price(payload, policy) {
            Ok(request) => {
                self.relay(&MARKET_PRICE, market_price_query(&request))
                    .await
            }
            Err(err) => failure(&MARKET_PRICE, &err),
        }
    }

    pub async fn nearest_warehouses(&self, payload: &Value) -> Envelope {
        let mode = self.state.config.policy.warehouse_query;
        match validate_warehouse(payload, mode) {
            Ok(request) => {
                self.relay(&NEAREST_WAREHOUSES, warehouse_query(&request, mode))
                    .await
            }
            Err(err) => failure(&NEAREST_WAREHOUSES, &err),
        }
    }

    async fn relay(&self, route: &RouteMessages, query: GraphQlQuery) -> Envelope {
        let result = self.state.backend.execute(&query).await;
        normalize(route, result)
    }
}
