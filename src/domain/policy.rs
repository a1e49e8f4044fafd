use serde::{Deserialize, Serialize};

/// How the market price route treats `latitude`/`longitude`.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum CoordinatePolicy {
    /// Coordinates may be omitted; when given, both must be present and truthy.
    #[default]
    Optional,
    /// Both coordinates must always be present and truthy.
    Required,
}

/// Which warehouse lookup the warehouse route runs.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum WarehouseQueryMode {
    /// Equality filter on string coordinates.
    #[default]
    Filtered,
    /// Static `order_by distance asc, limit 5` lookup gated on numeric coordinates.
    Nearest,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoordinateKind {
    Text,
    Number,
}

impl WarehouseQueryMode {
    pub fn coordinate_kind(self) -> CoordinateKind {
        match self {
            WarehouseQueryMode::Filtered => CoordinateKind::Text,
            WarehouseQueryMode::Nearest => CoordinateKind::Number,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            WarehouseQueryMode::Filtered => "filtered",
            WarehouseQueryMode::Nearest => "nearest",
        }
    }
}
