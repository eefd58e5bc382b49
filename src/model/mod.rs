use std::time::Duration;

use sqlx::{sqlite::SqlitePoolOptions, SqlitePool};
use tracing::info;

use crate::config::AppConfig;

#[derive(Clone, Debug)]
pub struct ModelManager {
    db: SqlitePool,
}

impl ModelManager {
    pub async fn init(config: &AppConfig) -> Result<Self> {
        info!("{:<20} - Initializing the DB pool", "init_db");
        // NOTE: Tests sometimes fail if there is more than 1 max connection. This fixes it.
        let max_cons = if cfg!(test) { 1 } else { 5 };

        let con_opts = config.db_config.connection_options();

        let db_pool = SqlitePoolOptions::new()
            .max_connections(max_cons)
            .acquire_timeout(Duration::from_millis(500))
            .connect_with(con_opts)
            .await
            .map_err(|_| Error::FailToCreatePool)?;

        // Creates the signup table on first run if it isn't there yet.
        sqlx::migrate!("./migrations").run(&db_pool).await?;

        Ok(Self { db: db_pool })
    }

    pub fn db(&self) -> &SqlitePool {
        &self.db
    }
}

// ###################################
// ->   ERROR
// ###################################
pub type Result<T> = core::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to create db pool")]
    FailToCreatePool,
    #[error("sqlx error: {0}")]
    Sqlx(#[from] sqlx::Error),
    #[error("sqlx migration error: {0}")]
    SqlxMigrate(#[from] sqlx::migrate::MigrateError),
}
