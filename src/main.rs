use clap::Parser;
use std::process::ExitCode;

use trivia_feed::{app_state::AppState, config::Config, errors::AppResult};

/// Append LLM-enriched trivia questions to the daily feed.
#[derive(Debug, Parser)]
#[command(name = "trivia-feed", version)]
struct Cli {
    /// Number of generation cycles to run (defaults to QUESTIONS_TO_ADD).
    count: Option<usize>,
}

async fn run(cli: Cli) -> AppResult<()> {
    let mut config = Config::from_env();
    if let Some(count) = cli.count {
        config.questions_to_add = count;
    }
    config.validate_for_run()?;

    log::info!(
        "Generating {} questions with {} into {}",
        config.questions_to_add,
        config.model,
        config.feed_path.display()
    );

    let state = AppState::new(config).await?;
    state.pipeline.run(state.config.questions_to_add).await?;
    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    dotenvy::dotenv().ok();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{} ({})", e, e.error_code());
            ExitCode::FAILURE
        }
    }
}
