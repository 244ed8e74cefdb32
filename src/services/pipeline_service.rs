use chrono::{Local, NaiveDate};
use std::sync::Arc;

use crate::{
    config::Config,
    constants::prompts::{render, EXPLANATION_PROMPT},
    errors::AppResult,
    models::domain::GeneratedItem,
    repositories::{FeedRepository, TriviaRepository},
    services::{
        answer_variant_service::AnswerVariantService,
        completion_service::{CompletionClient, CompletionOptions},
        sequence_service::{FeedPosition, SequenceService},
        text_normalizer::normalize,
    },
};

/// Outcome of one `run`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub attempted: usize,
    pub generated: usize,
    pub skipped: usize,
    pub total: usize,
}

/// Drives generation cycles and persists the feed after each new item.
pub struct PipelineService {
    source: Arc<dyn TriviaRepository>,
    completion: Arc<dyn CompletionClient>,
    feed_repository: Arc<dyn FeedRepository>,
    variants: AnswerVariantService,
    sequence: SequenceService,
    options: CompletionOptions,
    run_date: NaiveDate,
}

impl PipelineService {
    pub fn new(
        config: &Config,
        source: Arc<dyn TriviaRepository>,
        completion: Arc<dyn CompletionClient>,
        feed_repository: Arc<dyn FeedRepository>,
    ) -> Self {
        let options = CompletionOptions::from_config(config);
        Self {
            variants: AnswerVariantService::new(completion.clone(), options),
            sequence: SequenceService::new(config.daily_capacity, config.lead_days),
            source,
            completion,
            feed_repository,
            options,
            run_date: Local::now().date_naive(),
        }
    }

    /// Pin the calendar date an empty feed is anchored to.
    pub fn with_run_date(mut self, run_date: NaiveDate) -> Self {
        self.run_date = run_date;
        self
    }

    /// Attempt `cycles` generation cycles.
    ///
    /// A failing cycle is logged and skipped. Loading the feed or a fatal
    /// error (persistence) aborts the run.
    pub async fn run(&self, cycles: usize) -> AppResult<RunSummary> {
        let mut feed = self.feed_repository.load().await?;
        for violation in self.sequence.find_violations(&feed) {
            log::warn!("Existing feed: {}", violation);
        }

        let mut generated = 0;
        for cycle in 1..=cycles {
            match self.run_cycle(&mut feed).await {
                Ok(position) => {
                    generated += 1;
                    log::info!(
                        "Generated question for {}, question number {}",
                        position.date.format("%Y-%m-%d"),
                        position.slot
                    );
                }
                Err(e) if e.is_fatal() => {
                    log::error!("Failed to persist feed, aborting run: {}", e);
                    return Err(e);
                }
                Err(e) => {
                    log::error!("Error generating question (cycle {}/{}): {}", cycle, cycles, e);
                }
            }
        }

        let summary = RunSummary {
            attempted: cycles,
            generated,
            skipped: cycles - generated,
            total: feed.len(),
        };
        log::info!(
            "Added {} new questions ({} skipped). Total questions: {}",
            summary.generated,
            summary.skipped,
            summary.total
        );
        Ok(summary)
    }

    /// Generate one item and persist the extended feed. On error `feed` is
    /// left as it was.
    async fn run_cycle(&self, feed: &mut Vec<GeneratedItem>) -> AppResult<FeedPosition> {
        let position = self.sequence.current_position(feed, self.run_date)?;
        let item = self.generate_item(position).await?;

        feed.push(item);
        if let Err(e) = self.feed_repository.save(feed).await {
            feed.pop();
            return Err(e);
        }
        Ok(position)
    }

    async fn generate_item(&self, position: FeedPosition) -> AppResult<GeneratedItem> {
        let record = self.source.draw().await?;
        let question = normalize(&record.question());
        let answer = normalize(&record.answer());
        let category = normalize(&record.category());

        let explanation = self
            .completion
            .complete(&render(EXPLANATION_PROMPT, &question, &answer), &self.options)
            .await?;
        let possible_answers = self.variants.extract_variants(&question, &answer).await?;

        Ok(GeneratedItem {
            id: position.next_id,
            date: position.date,
            slot: position.slot,
            category,
            value: record.value(),
            question,
            answer,
            possible_answers,
            explanation: normalize(&explanation),
        })
    }
}
