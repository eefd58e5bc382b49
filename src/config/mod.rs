//! Builds an `AppConfig` from the toml files in `config/`.
//! `AppConfigBuilder` merges multiple files; environment variables override
//! individual values afterwards. Initialized once behind a `OnceLock`.

mod data;
mod error;

use std::sync::OnceLock;

use secrecy::SecretString;
use tracing::info;

pub use data::{AppConfig, DbConfig, EmailConfig, Environment, NetConfig};
pub use error::{ConfigError, ConfigResult};

/// Allocates a static `OnceLock` containing `AppConfig`.
/// This ensures configuration only gets initialized the first time we call this function.
/// Every other caller gets a &'static ref to AppConfig.
/// Panics if anything goes wrong.
pub fn get_or_init_config() -> &'static AppConfig {
    static CONFIG_INIT: OnceLock<AppConfig> = OnceLock::new();
    CONFIG_INIT.get_or_init(|| {
        info!(
            "{:<20} - Initializing the configuration",
            "get_or_init_config"
        );
        let base_path = std::env::current_dir().expect("Failed to determine the current DIR.");
        let config_dir = base_path.join("config");

        let environment: Environment = std::env::var("APP_ENVIRONMENT")
            .unwrap_or_else(|_| "local".into())
            .try_into()
            .expect("Failed to parse APP_ENVIRONMENT.");
        let environment_filename = format!("{}.toml", environment.as_ref().to_lowercase());

        let base_file = std::fs::File::open(config_dir.join("base.toml"))
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"));
        let env_file = std::fs::File::open(config_dir.join(environment_filename))
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"));

        let mut config = AppConfig::init()
            .add_source_file(base_file)
            .add_source_file(env_file)
            .build()
            .unwrap_or_else(|er| panic!("Fatal Error: Building config: {er}"));

        // Production requires an explicit storage location.
        if matches!(environment, Environment::Production) && std::env::var("DATABASE_URL").is_err()
        {
            panic!("Fatal Error: DATABASE_URL must be set when running in production");
        }

        apply_env_overrides(&mut config);

        config
    })
}

/// Environment variables take precedence over anything in the toml files.
fn apply_env_overrides(config: &mut AppConfig) {
    if let Ok(db_url) = std::env::var("DATABASE_URL") {
        let db_config = DbConfig::try_from(db_url.as_str()).unwrap_or_else(|er| {
            panic!("Fatal Error: While parsing DbConfig from DATABASE_URL: {er:?}")
        });
        config.db_config = db_config;
    }

    if let Ok(origins) = std::env::var("ALLOWED_ORIGINS") {
        config.net_config.allowed_origins = split_csv(&origins);
    }

    if let Ok(sender) = std::env::var("NOTIFY_SMTP_USER") {
        config.email_config.sender_addr = sender;
    }
    if let Ok(password) = std::env::var("NOTIFY_SMTP_PASS") {
        config.email_config.password = SecretString::from(password);
    }
    if let Ok(recipients) = std::env::var("NOTIFY_RECIPIENTS") {
        config.email_config.recipients = split_csv(&recipients);
    }
}

fn split_csv(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(|part| part.trim().to_string())
        .filter(|part| !part.is_empty())
        .collect()
}
