use std::sync::Arc;

use crate::infrastructure::{config::Config, hasura::GraphQlBackend};

#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub backend: Arc<dyn GraphQlBackend>,
}

impl AppState {
    pub fn new(config: Arc<Config>, backend: Arc<dyn GraphQlBackend>) -> Self {
        Self { config, backend }
    }
}
