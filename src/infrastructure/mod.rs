pub mod config;
pub mod hasura;
pub mod state;
