use serde_json::{Map, Value};
use validator::Validate;

use crate::{
    domain::{
        models::{Coordinate, Coordinates, MarketPriceRequest, WarehouseRequest},
        policy::{CoordinateKind, CoordinatePolicy, WarehouseQueryMode},
    },
    services::errors::ServiceError,
};

const MARKET_FIELD_ORDER: [&str; 4] = ["latitude", "longitude", "for_date", "crops"];

pub const INVALID_WAREHOUSE_COORDINATES: &str = "Invalid or missing longitude/latitude";

/// Shape pass then content pass over a market price body.
///
/// Every failing field is reported in one message, in body order.
pub fn validate_market_price(
    payload: &Value,
    policy: CoordinatePolicy,
) -> Result<MarketPriceRequest, ServiceError> {
    let body = payload.as_object();
    let mut invalid: Vec<&'static str> = Vec::new();

    let coordinates = match market_coordinates(
        field(body, "latitude"),
        field(body, "longitude"),
        policy,
    ) {
        Ok(coordinates) => coordinates,
        Err(fields) => {
            invalid.extend(fields);
            None
        }
    };

    let for_date = match field(body, "for_date") {
        Some(Value::String(for_date)) => for_date.clone(),
        _ => {
            invalid.push("for_date");
            String::new()
        }
    };

    let crops = match field(body, "crops").and_then(string_array) {
        Some(crops) => crops,
        None => {
            invalid.push("crops");
            Vec::new()
        }
    };

    let request = MarketPriceRequest {
        for_date,
        crops,
        coordinates,
    };

    if let Err(errors) = request.validate() {
        invalid.extend(errors.field_errors().into_keys());
    }

    if invalid.is_empty() {
        Ok(request)
    } else {
        Err(ServiceError::Validation(required_fields_message(&invalid)))
    }
}

/// Both coordinates must carry the JSON type the warehouse mode expects.
pub fn validate_warehouse(
    payload: &Value,
    mode: WarehouseQueryMode,
) -> Result<WarehouseRequest, ServiceError> {
    let body = payload.as_object();
    let kind = mode.coordinate_kind();

    let latitude = field(body, "latitude").and_then(|value| typed_coordinate(value, kind));
    let longitude = field(body, "longitude").and_then(|value| typed_coordinate(value, kind));

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(WarehouseRequest {
            coordinates: Coordinates {
                latitude,
                longitude,
            },
        }),
        _ => Err(ServiceError::Validation(
            INVALID_WAREHOUSE_COORDINATES.to_string(),
        )),
    }
}

fn field<'a>(body: Option<&'a Map<String, Value>>, name: &str) -> Option<&'a Value> {
    body.and_then(|body| body.get(name))
        .filter(|value| !value.is_null())
}

fn string_array(value: &Value) -> Option<Vec<String>> {
    value
        .as_array()?
        .iter()
        .map(|item| item.as_str().map(str::to_owned))
        .collect()
}

fn market_coordinates(
    latitude: Option<&Value>,
    longitude: Option<&Value>,
    policy: CoordinatePolicy,
) -> Result<Option<Coordinates>, Vec<&'static str>> {
    if policy == CoordinatePolicy::Optional && latitude.is_none() && longitude.is_none() {
        return Ok(None);
    }

    let latitude = latitude.and_then(truthy_coordinate);
    let longitude = longitude.and_then(truthy_coordinate);

    match (latitude, longitude) {
        (Some(latitude), Some(longitude)) => Ok(Some(Coordinates {
            latitude,
            longitude,
        })),
        (latitude, longitude) => {
            let mut fields = Vec::new();
            if latitude.is_none() {
                fields.push("latitude");
            }
            if longitude.is_none() {
                fields.push("longitude");
            }
            Err(fields)
        }
    }
}

fn truthy_coordinate(value: &Value) -> Option<Coordinate> {
    Coordinate::from_json(value).filter(Coordinate::is_truthy)
}

fn typed_coordinate(value: &Value, kind: CoordinateKind) -> Option<Coordinate> {
    match (kind, value) {
        (CoordinateKind::Text, Value::String(_)) | (CoordinateKind::Number, Value::Number(_)) => {
            Coordinate::from_json(value)
        }
        _ => None,
    }
}

fn required_fields_message(invalid: &[&str]) -> String {
    let fields: Vec<String> = MARKET_FIELD_ORDER
        .iter()
        .filter(|name| invalid.contains(*name))
        .map(|name| format!("'{name}'"))
        .collect();

    let listed = match fields.split_last() {
        Some((last, [])) => last.clone(),
        Some((last, rest)) => format!("{} and {last}", rest.join(", ")),
        None => "the request body".to_string(),
    };
    let verb = if fields.len() == 1 { "is" } else { "are" };

    format!("Invalid payload: {listed} {verb} required.")
}
