use sqlx::{
    sqlite::{SqliteConnectOptions, SqlitePoolOptions},
    SqlitePool,
};
use std::{str::FromStr, time::Duration};

use crate::{config::Config, errors::AppResult};

/// Read-only handle on the question bank.
#[derive(Clone)]
pub struct Database {
    pool: SqlitePool,
    table: String,
}

impl Database {
    pub async fn connect(config: &Config) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.question_db_path)?
            .create_if_missing(false)
            .read_only(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        log::info!(
            "Connected to question bank at {}",
            config.question_db_path
        );

        Ok(Self {
            pool,
            table: config.questions_table.clone(),
        })
    }

    pub async fn health_check(&self) -> AppResult<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub fn table(&self) -> &str {
        &self.table
    }
}
