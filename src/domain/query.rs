//! GraphQL documents sent to Hasura.

use serde::Serialize;
use serde_json::{json, Map, Value};

use crate::domain::{
    models::{MarketPriceRequest, WarehouseRequest},
    policy::WarehouseQueryMode,
};

pub const MANDI_COLLECTION: &str = "mandihouse";
pub const WAREHOUSE_COLLECTION: &str = "warehouse";

pub const MANDI_RECORD_FIELDS: [&str; 13] = [
    "for_date",
    "apmc_id",
    "dtname",
    "thname",
    "apmc_name",
    "crop_name",
    "variety_name",
    "low_price",
    "high_price",
    "price",
    "quantity",
    "distance",
    "distance_unit",
];

pub const WAREHOUSE_RECORD_FIELDS: [&str; 12] = [
    "warehouse_code",
    "warehouse_name",
    "phone",
    "email",
    "village",
    "taluka",
    "district",
    "warehouse_address",
    "region",
    "pincode",
    "distance",
    "distance_unit",
];

pub const NEAREST_WAREHOUSE_LIMIT: u32 = 5;

/// Request body for a single GraphQL-over-HTTP call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphQlQuery {
    #[serde(skip)]
    pub operation: &'static str,
    pub query: String,
    pub variables: Value,
}

pub fn market_price_query(request: &MarketPriceRequest) -> GraphQlQuery {
    let mut params = vec!["$for_date: date!", "$crops: [String!]"];
    let mut filters = vec![
        "for_date: { _eq: $for_date }",
        "crop_name: { _in: $crops }",
    ];
    let mut variables = Map::new();
    variables.insert("for_date".into(), Value::String(request.for_date.clone()));
    variables.insert("crops".into(), json!(request.crops));

    if let Some(coordinates) = &request.coordinates {
        params.extend(["$latitude: String!", "$longitude: String!"]);
        filters.extend([
            "latitude: { _eq: $latitude }",
            "longitude: { _eq: $longitude }",
        ]);
        variables.insert(
            "latitude".into(),
            Value::String(coordinates.latitude.to_variable()),
        );
        variables.insert(
            "longitude".into(),
            Value::String(coordinates.longitude.to_variable()),
        );
    }

    GraphQlQuery {
        operation: "SearchMandi",
        query: document(
            "SearchMandi",
            &params,
            MANDI_COLLECTION,
            &where_clause(&filters),
            &MANDI_RECORD_FIELDS,
        ),
        variables: Value::Object(variables),
    }
}

pub fn warehouse_query(request: &WarehouseRequest, mode: WarehouseQueryMode) -> GraphQlQuery {
    match mode {
        WarehouseQueryMode::Filtered => GraphQlQuery {
            operation: "GetWarehouses",
            query: document(
                "GetWarehouses",
                &["$latitude: String!", "$longitude: String!"],
                WAREHOUSE_COLLECTION,
                &where_clause(&[
                    "latitude: { _eq: $latitude }",
                    "longitude: { _eq: $longitude }",
                ]),
                &WAREHOUSE_RECORD_FIELDS,
            ),
            variables: json!({
                "latitude": request.coordinates.latitude.to_variable(),
                "longitude": request.coordinates.longitude.to_variable(),
            }),
        },
        // Coordinates are validated but the backend ranks by its own distance column.
        WarehouseQueryMode::Nearest => GraphQlQuery {
            operation: "GetNearestWarehouses",
            query: document(
                "GetNearestWarehouses",
                &[],
                WAREHOUSE_COLLECTION,
                &format!("order_by: {{ distance: asc }}, limit: {NEAREST_WAREHOUSE_LIMIT}"),
                &WAREHOUSE_RECORD_FIELDS,
            ),
            variables: json!({}),
        },
    }
}

fn where_clause(filters: &[&str]) -> String {
    format!("where: {{ {} }}", filters.join(", "))
}

fn document(
    operation: &str,
    params: &[&str],
    collection: &str,
    arguments: &str,
    fields: &[&str],
) -> String {
    let signature = if params.is_empty() {
        operation.to_string()
    } else {
        format!("{operation}({})", params.join(", "))
    };
    let selection: String = fields.iter().map(|field| format!("    {field}\n")).collect();
    format!("query {signature} {{\n  {collection}({arguments}) {{\n{selection}  }}\n}}\n")
}
