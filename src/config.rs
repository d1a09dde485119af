//! Environment-driven configuration.

use std::time::Duration;

use clap::Parser;

use crate::predict::PollBudget;

/// tanyadb — ask your PostgreSQL database questions in natural language.
#[derive(Debug, Parser)]
#[command(name = "tanyadb", version, about)]
pub struct Config {
    /// PostgreSQL connection string.
    #[arg(long, env = "DATABASE_URL")]
    pub database_url: String,

    /// Replicate API token.
    #[arg(long, env = "REPLICATE_API_TOKEN", hide_env_values = true)]
    pub api_token: String,

    /// Model version identifier submitted with every prediction.
    #[arg(long, env = "GRANITE_MODEL_VERSION")]
    pub model_version: String,

    /// Prediction-service endpoint.
    #[arg(
        long,
        env = "REPLICATE_API_URL",
        default_value = "https://api.replicate.com/v1/predictions"
    )]
    pub api_url: String,

    /// Delay between status polls, in milliseconds.
    #[arg(long, default_value_t = 2000)]
    pub poll_interval_ms: u64,

    /// Maximum number of status polls before giving up on a prediction.
    #[arg(long, default_value_t = 60)]
    pub poll_max_attempts: u32,

    /// Wall-clock budget for one prediction, in seconds.
    #[arg(long, default_value_t = 180)]
    pub poll_timeout_secs: u64,
}

impl Config {
    pub fn poll_budget(&self) -> PollBudget {
        PollBudget {
            interval: Duration::from_millis(self.poll_interval_ms),
            max_attempts: self.poll_max_attempts,
            timeout: Duration::from_secs(self.poll_timeout_secs),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_budget_from_flags() {
        let config = Config::parse_from([
            "tanyadb",
            "--database-url",
            "postgres://localhost/shop",
            "--api-token",
            "t0ken",
            "--model-version",
            "abc123",
            "--poll-interval-ms",
            "500",
            "--poll-max-attempts",
            "5",
            "--poll-timeout-secs",
            "30",
        ]);
        let budget = config.poll_budget();
        assert_eq!(budget.interval, Duration::from_millis(500));
        assert_eq!(budget.max_attempts, 5);
        assert_eq!(budget.timeout, Duration::from_secs(30));
    }

    #[test]
    fn test_defaults_match_original_interval() {
        let config = Config::parse_from([
            "tanyadb",
            "--database-url",
            "postgres://localhost/shop",
            "--api-token",
            "t0ken",
            "--model-version",
            "abc123",
        ]);
        assert_eq!(config.poll_interval_ms, 2000);
        assert_eq!(config.api_url, "https://api.replicate.com/v1/predictions");
    }
}
