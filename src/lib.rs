pub mod app;
pub mod config;
pub mod email_client;
pub mod model;
pub mod web;

mod error;

pub use app::{serve, App, AppState};
pub use email_client::EmailClient;
pub use error::{Error, Result};

use tracing_subscriber::EnvFilter;

/// Verbose console logging for local development.
pub fn init_dbg_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug")),
        )
        .with_target(false)
        .init();
}

pub fn init_production_tracing() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();
}
