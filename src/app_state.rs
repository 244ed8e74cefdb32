use std::sync::Arc;

use crate::{
    config::Config,
    db::Database,
    errors::AppResult,
    repositories::{JsonFeedRepository, SqliteTriviaRepository},
    services::{completion_service::OpenRouterClient, pipeline_service::PipelineService},
};

pub struct AppState {
    pub pipeline: PipelineService,
    pub config: Arc<Config>,
}

impl AppState {
    pub async fn new(config: Config) -> AppResult<Self> {
        let db = Database::connect(&config).await?;
        db.health_check().await?;

        let source = Arc::new(SqliteTriviaRepository::new(&db));
        let completion = Arc::new(OpenRouterClient::new(&config)?);
        let feed_repository = Arc::new(JsonFeedRepository::new(config.feed_path.clone()));

        let pipeline = PipelineService::new(&config, source, completion, feed_repository);

        Ok(Self {
            pipeline,
            config: Arc::new(config),
        })
    }
}
