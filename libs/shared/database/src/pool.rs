use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::{debug, info};

use crate::error::DbError;

/// Handle to the relational store, cheap to clone.
#[derive(Debug, Clone)]
pub struct Database(SqlitePool);

impl Database {
    pub fn pool(&self) -> &SqlitePool {
        &self.0
    }

    pub async fn close(&self) {
        self.0.close().await;
    }
}

pub async fn connect(database_url: &str, max: u32) -> Result<Database, DbError> {
    let options = SqliteConnectOptions::from_str(database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(max)
        .connect_with(options)
        .await?;

    info!("Connected to database (max {} connections)", max);
    Ok(Database(pool))
}

/// Private in-memory store. Pinned to a single connection that never expires,
/// otherwise each new connection would see an empty database.
pub async fn connect_in_memory() -> Result<Database, DbError> {
    let options = SqliteConnectOptions::from_str("sqlite::memory:")?.foreign_keys(true);

    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .min_connections(1)
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;

    debug!("Opened in-memory database");
    Ok(Database(pool))
}
