//! API layer - Search Listings Items client, transport and models

pub mod client;
pub mod config;
pub mod models;
pub mod query;
pub mod transport;
