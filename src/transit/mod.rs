/// Upstream AC Transit REST client: configuration, requests, error taxonomy.
pub mod client;
pub mod config;
pub mod errors;

pub use client::TransitClient;
pub use config::TransitConfig;
pub use errors::TransitError;
