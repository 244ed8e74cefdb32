use async_trait::async_trait;
use std::path::PathBuf;

use crate::{
    errors::{AppError, AppResult},
    models::domain::GeneratedItem,
};

/// Durable storage for the whole feed. Single writer only.
#[async_trait]
pub trait FeedRepository: Send + Sync {
    /// Load every persisted item in append order; a missing feed is empty.
    async fn load(&self) -> AppResult<Vec<GeneratedItem>>;
    /// Replace the persisted feed with `feed`.
    async fn save(&self, feed: &[GeneratedItem]) -> AppResult<()>;
}

/// Feed stored as one pretty-printed JSON array, rewritten in full on save.
pub struct JsonFeedRepository {
    path: PathBuf,
}

impl JsonFeedRepository {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn staging_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_else(|| "feed.json".into());
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl FeedRepository for JsonFeedRepository {
    async fn load(&self) -> AppResult<Vec<GeneratedItem>> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                log::info!(
                    "No feed at {}, starting from an empty feed",
                    self.path.display()
                );
                return Ok(Vec::new());
            }
            Err(e) => return Err(e.into()),
        };

        if content.trim().is_empty() {
            return Ok(Vec::new());
        }

        let feed: Vec<GeneratedItem> = serde_json::from_str(&content).map_err(|e| {
            AppError::PersistenceError(format!(
                "feed at {} is not a valid item array: {}",
                self.path.display(),
                e
            ))
        })?;

        log::info!(
            "Loaded {} existing questions from {}",
            feed.len(),
            self.path.display()
        );
        Ok(feed)
    }

    async fn save(&self, feed: &[GeneratedItem]) -> AppResult<()> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }

        let body = serde_json::to_string_pretty(feed)
            .map_err(|e| AppError::PersistenceError(format!("failed to encode feed: {}", e)))?;

        let staging = self.staging_path();
        tokio::fs::write(&staging, body).await?;
        tokio::fs::rename(&staging, &self.path).await?;

        log::debug!("Wrote {} questions to {}", feed.len(), self.path.display());
        Ok(())
    }
}
