//! REST-to-GraphQL relay for APMC market prices and warehouse lookups.

pub mod api;
pub mod domain;
pub mod infrastructure;
pub mod services;
pub mod telemetry;
pub mod validation;
