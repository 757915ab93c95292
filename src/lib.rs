// Catalog Client - library root

pub mod auth;
pub mod client;
pub mod config;
pub mod error;
pub mod http_client;
pub mod hydrate;
pub mod models;
pub mod schema;

pub use client::CatalogClient;
pub use config::ClientConfig;
pub use error::{CatalogError, Result};
pub use hydrate::{hydrate, hydrate_many, hydrate_one, Hydrated};
