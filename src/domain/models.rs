use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{Number, Value};
use validator::Validate;

/// A `mandihouse` row, relayed exactly as the backend returns it.
pub type MandiRecord = Value;

/// A `warehouse` row, relayed exactly as the backend returns it.
pub type WarehouseRecord = Value;

/// A latitude or longitude as the caller sent it.
#[derive(Debug, Clone, PartialEq)]
pub enum Coordinate {
    Text(String),
    Number(Number),
}

impl Coordinate {
    /// Accepts JSON strings and numbers; every other JSON type is rejected.
    pub fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::String(text) => Some(Coordinate::Text(text.clone())),
            Value::Number(number) => Some(Coordinate::Number(number.clone())),
            _ => None,
        }
    }

    /// Non-empty strings and non-zero numbers.
    pub fn is_truthy(&self) -> bool {
        match self {
            Coordinate::Text(text) => !text.is_empty(),
            Coordinate::Number(number) => number.as_f64().is_some_and(|value| value != 0.0),
        }
    }

    /// String form bound into GraphQL variables.
    ///
    /// Strings pass through untouched. Numbers use their shortest form, so
    /// `18.5` becomes `"18.5"` and `18.0` becomes `"18"`. Magnitudes below
    /// `1e-6` or from `1e21` up switch to exponent form (`"1e-7"`, `"1e+21"`).
    pub fn to_variable(&self) -> String {
        match self {
            Coordinate::Text(text) => text.clone(),
            Coordinate::Number(number) => {
                if let Some(value) = number.as_i64() {
                    value.to_string()
                } else if let Some(value) = number.as_u64() {
                    value.to_string()
                } else if let Some(value) = number.as_f64() {
                    float_literal(value)
                } else {
                    number.to_string()
                }
            }
        }
    }
}

fn float_literal(value: f64) -> String {
    let magnitude = value.abs();
    if magnitude == 0.0 || (1e-6..1e21).contains(&magnitude) {
        return value.to_string();
    }

    let exponent_form = format!("{value:e}");
    match exponent_form.split_once('e') {
        Some((mantissa, exponent)) if !exponent.starts_with('-') => {
            format!("{mantissa}e+{exponent}")
        }
        _ => exponent_form,
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Coordinates {
    pub latitude: Coordinate,
    pub longitude: Coordinate,
}

#[derive(Debug, Clone, PartialEq, Validate)]
pub struct MarketPriceRequest {
    #[validate(length(min = 1))]
    pub for_date: String,
    #[validate(length(min = 1))]
    pub crops: Vec<String>,
    pub coordinates: Option<Coordinates>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct WarehouseRequest {
    pub coordinates: Coordinates,
}

/// Uniform response body for every relay route.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    pub status: u16,
    pub response: String,
    pub data: Vec<Value>,
}

impl Envelope {
    pub fn success(message: impl Into<String>, data: Vec<Value>) -> Self {
        Self {
            status: StatusCode::OK.as_u16(),
            response: message.into(),
            data,
        }
    }

    pub fn failure(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status: status.as_u16(),
            response: message.into(),
            data: Vec::new(),
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }
}

impl IntoResponse for Envelope {
    fn into_response(self) -> Response {
        (self.status_code(), Json(self)).into_response()
    }
}
