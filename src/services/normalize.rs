//! Maps backend outcomes onto the response envelope.

use serde_json::Value;
use tracing::{error, info, warn};

use crate::{
    domain::{
        models::Envelope,
        query::{MANDI_COLLECTION, WAREHOUSE_COLLECTION},
    },
    infrastructure::hasura::{BackendResponse, TransportError},
    services::errors::ServiceError,
};

/// Per-route wording and the collection key the records live under.
#[derive(Debug, Clone, Copy)]
pub struct RouteMessages {
    pub name: &'static str,
    pub collection: &'static str,
    pub success: &'static str,
    pub graphql_failure: &'static str,
    pub transport_failure: &'static str,
}

pub const MARKET_PRICE: RouteMessages = RouteMessages {
    name: "get_apmc_market_price",
    collection: MANDI_COLLECTION,
    success: "APMC Market information retrieved successfully",
    graphql_failure: "Error fetching APMC Market information",
    transport_failure: "Internal Server Error",
};

pub const NEAREST_WAREHOUSES: RouteMessages = RouteMessages {
    name: "get_nearest_warehouses",
    collection: WAREHOUSE_COLLECTION,
    success: "Nearest Warehouse information retrieved successfully",
    graphql_failure: "Error fetching warehouses from Hasura",
    transport_failure: "Internal server error",
};

impl RouteMessages {
    fn failure_message(&self, err: &ServiceError) -> String {
        match err {
            ServiceError::Validation(message) => message.clone(),
            ServiceError::GraphQl(_) => self.graphql_failure.to_string(),
            ServiceError::Transport(_) => self.transport_failure.to_string(),
        }
    }
}

pub fn normalize(
    route: &RouteMessages,
    result: Result<BackendResponse, TransportError>,
) -> Envelope {
    match records(route, result) {
        Ok(records) => {
            info!(route = route.name, records = records.len(), "relayed backend records");
            Envelope::success(route.success, records)
        }
        Err(err) => failure(route, &err),
    }
}

/// Logs a rejected or failed request and builds its envelope.
///
/// Validation messages reach the caller as-is. Backend detail stays in the logs.
pub fn failure(route: &RouteMessages, err: &ServiceError) -> Envelope {
    log_failure(route, err);
    Envelope::failure(err.status_code(), route.failure_message(err))
}

/// Pulls the route's collection out of a backend result.
///
/// A missing `data`, missing key, or non-array value yields no records.
pub fn records(
    route: &RouteMessages,
    result: Result<BackendResponse, TransportError>,
) -> Result<Vec<Value>, ServiceError> {
    let response = result?;

    if let Some(errors) = response.errors {
        return Err(ServiceError::GraphQl(errors));
    }

    let mut data = response.data.unwrap_or(Value::Null);
    match data.get_mut(route.collection).map(Value::take) {
        Some(Value::Array(records)) => Ok(records),
        Some(Value::Null) | None => Ok(Vec::new()),
        Some(other) => {
            warn!(
                route = route.name,
                collection = route.collection,
                value = %other,
                "backend collection was not an array"
            );
            Ok(Vec::new())
        }
    }
}

fn log_failure(route: &RouteMessages, err: &ServiceError) {
    match err {
        ServiceError::GraphQl(errors) => {
            error!(route = route.name, errors = %errors, "GraphQL returned errors");
        }
        ServiceError::Transport(transport) => {
            error!(
                route = route.name,
                error = %transport,
                body = transport.body().unwrap_or_default(),
                "Hasura query error"
            );
        }
        ServiceError::Validation(message) => {
            warn!(route = route.name, reason = %message, "request rejected");
        }
    }
}
