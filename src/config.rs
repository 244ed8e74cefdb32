use once_cell::sync::Lazy;
use regex::Regex;
use secrecy::{ExposeSecret, SecretString};
use std::{env, path::PathBuf, str::FromStr};
use validator::Validate;

use crate::errors::{AppError, AppResult};

static TABLE_NAME_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[A-Za-z_][A-Za-z0-9_]*$").expect("TABLE_NAME_REGEX is a valid regex pattern")
});

#[derive(Clone, Debug, Validate)]
pub struct Config {
    pub api_key: SecretString,
    #[validate(url)]
    pub api_base_url: String,
    #[validate(length(min = 1))]
    pub model: String,
    pub site_url: String,
    pub app_name: String,
    #[validate(range(min = 0.0, max = 2.0))]
    pub temperature: f32,
    #[validate(range(min = 1))]
    pub max_tokens: u32,
    #[validate(range(min = 1))]
    pub request_timeout_secs: u64,
    pub questions_to_add: usize,
    #[validate(range(min = 1))]
    pub daily_capacity: u32,
    #[validate(range(min = 0, max = 3650))]
    pub lead_days: i64,
    pub question_db_path: String,
    #[validate(regex(path = *TABLE_NAME_REGEX))]
    pub questions_table: String,
    pub feed_path: PathBuf,
}

fn env_or(key: &str, default: &str) -> String {
    env::var(key).unwrap_or_else(|_| default.to_string())
}

fn env_parse<T: FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|v| v.trim().parse().ok())
        .unwrap_or(default)
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            api_key: SecretString::from(env_or("OPENROUTER_API_KEY", "")),
            api_base_url: env_or("OPENROUTER_BASE_URL", "https://openrouter.ai/api/v1"),
            model: env_or("OPENROUTER_MODEL", "meta-llama/llama-3.1-70b-instruct"),
            site_url: env_or("SITE_URL", "https://www.example.com"),
            app_name: env_or("APP_NAME", "Trivia Feed"),
            temperature: env_parse("LLM_TEMPERATURE", 0.3),
            max_tokens: env_parse("LLM_MAX_TOKENS", 500),
            request_timeout_secs: env_parse("LLM_TIMEOUT_SECS", 120),
            questions_to_add: env_parse("QUESTIONS_TO_ADD", 50),
            daily_capacity: env_parse("DAILY_CAPACITY", 3),
            lead_days: env_parse("LEAD_DAYS", 3),
            question_db_path: env_or("QUESTION_DB_PATH", "jeopardy.db"),
            questions_table: env_or("QUESTIONS_TABLE", "questions"),
            feed_path: PathBuf::from(env_or("FEED_PATH", "public/questions.json")),
        }
    }

    /// Rejects configuration that would make every cycle fail or corrupt the feed.
    pub fn validate_for_run(&self) -> AppResult<()> {
        self.validate()?;

        if self.api_key.expose_secret().trim().is_empty() {
            return Err(AppError::ValidationError(
                "OPENROUTER_API_KEY is not set".to_string(),
            ));
        }

        Ok(())
    }

    #[cfg(test)]
    pub fn test_config() -> Self {
        Self {
            api_key: SecretString::from("test-api-key".to_string()),
            api_base_url: "http://localhost:9999/api/v1".to_string(),
            model: "test-model".to_string(),
            site_url: "https://www.example.com".to_string(),
            app_name: "Trivia Feed Test".to_string(),
            temperature: 0.3,
            max_tokens: 500,
            request_timeout_secs: 5,
            questions_to_add: 4,
            daily_capacity: 3,
            lead_days: 3,
            question_db_path: ":memory:".to_string(),
            questions_table: "questions".to_string(),
            feed_path: PathBuf::from("public/questions.json"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_config_from_env_with_defaults() {
        let config = Config::from_env();

        assert!(!config.api_base_url.is_empty());
        assert!(!config.model.is_empty());
        assert!(config.daily_capacity >= 1);
    }

    #[test]
    fn test_test_config_is_valid() {
        let config = Config::test_config();

        assert!(config.validate_for_run().is_ok());
        assert_eq!(config.daily_capacity, 3);
        assert_eq!(config.lead_days, 3);
    }

    #[test]
    fn test_zero_capacity_is_rejected() {
        let mut config = Config::test_config();
        config.daily_capacity = 0;

        assert!(matches!(
            config.validate_for_run(),
            Err(AppError::ValidationError(_))
        ));
    }

    #[test]
    fn test_lead_days_outside_ten_years_is_rejected() {
        let mut config = Config::test_config();
        config.lead_days = i64::MAX;
        assert!(matches!(
            config.validate_for_run(),
            Err(AppError::ValidationError(_))
        ));

        config.lead_days = 3650;
        assert!(config.validate_for_run().is_ok());
    }

    #[test]
    fn test_out_of_range_temperature_is_rejected() {
        let mut config = Config::test_config();
        config.temperature = 3.5;

        assert!(config.validate_for_run().is_err());
    }

    #[test]
    fn test_missing_api_key_is_rejected() {
        let mut config = Config::test_config();
        config.api_key = SecretString::from("  ".to_string());

        let err = config.validate_for_run().unwrap_err();
        assert!(err.to_string().contains("OPENROUTER_API_KEY"));
    }

    #[test]
    fn test_table_name_must_be_identifier() {
        let mut config = Config::test_config();
        config.questions_table = "questions; DROP TABLE questions".to_string();

        assert!(config.validate_for_run().is_err());
    }
}
