pub mod client;
pub mod config;

pub use client::{ServerClient, ServerError};
pub use config::{DEFAULT_API_KEY, DEFAULT_SERVER_URL, ServerConfig};
