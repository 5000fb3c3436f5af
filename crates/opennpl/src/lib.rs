//! Data backend for non-performing loan (NPL) and single-family loan
//! performance (SFLP) portfolios: entity schema, bulk loaders and a JSON API.

pub mod api;
pub mod config;
pub mod error;
pub mod loader;
pub mod schema;
pub mod store;
pub mod telemetry;
