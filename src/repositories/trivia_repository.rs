use async_trait::async_trait;
use sqlx::{sqlite::SqliteRow, Row};

use crate::{
    db::Database,
    errors::{AppError, AppResult},
    models::domain::{RawTriviaRecord, RawValue},
};

/// Source of raw trivia rows, sampled uniformly with replacement.
#[async_trait]
pub trait TriviaRepository: Send + Sync {
    async fn draw(&self) -> AppResult<RawTriviaRecord>;
}

pub struct SqliteTriviaRepository {
    db: Database,
}

impl SqliteTriviaRepository {
    pub fn new(db: &Database) -> Self {
        Self { db: db.clone() }
    }

    fn decode_column(row: &SqliteRow, index: usize) -> RawValue {
        if let Ok(Some(v)) = row.try_get::<Option<i64>, _>(index) {
            return RawValue::Integer(v);
        }
        if let Ok(Some(v)) = row.try_get::<Option<f64>, _>(index) {
            return RawValue::Real(v);
        }
        match row.try_get::<Option<String>, _>(index) {
            Ok(Some(v)) => RawValue::Text(v),
            _ => RawValue::Null,
        }
    }
}

#[async_trait]
impl TriviaRepository for SqliteTriviaRepository {
    async fn draw(&self) -> AppResult<RawTriviaRecord> {
        // Table name is validated as a plain identifier at startup.
        let sql = format!(
            "SELECT * FROM {} ORDER BY RANDOM() LIMIT 1",
            self.db.table()
        );

        let row = sqlx::query(&sql)
            .fetch_optional(self.db.pool())
            .await?
            .ok_or_else(|| {
                AppError::NotFound(format!("table '{}' has no questions", self.db.table()))
            })?;

        let columns = (0..row.len())
            .map(|index| Self::decode_column(&row, index))
            .collect();

        Ok(RawTriviaRecord::new(columns))
    }
}
