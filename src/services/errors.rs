use axum::http::StatusCode;
use serde_json::Value;
use thiserror::Error;

use crate::infrastructure::hasura::TransportError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("{0}")]
    Validation(String),
    #[error("backend returned GraphQL errors: {0}")]
    GraphQl(Value),
    #[error(transparent)]
    Transport(#[from] TransportError),
}

impl ServiceError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::Validation(_) => StatusCode::BAD_REQUEST,
            ServiceError::GraphQl(_) | ServiceError::Transport(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}
