use std::env;
use std::time::Duration;

use anyhow::{bail, Result};

const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(600);

#[derive(Debug)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub telegram_chat_id: String,
    pub poll_interval: Duration,
}

impl Config {
    /// Reads and validates everything up front so a half-configured process
    /// never reaches the poll loop.
    pub fn from_env() -> Result<Self> {
        let mut missing = Vec::new();
        let practicum_token = required("PRACTICUM_TOKEN", &mut missing);
        let telegram_token = required("TELEGRAM_TOKEN", &mut missing);
        let telegram_chat_id = required("TELEGRAM_CHAT_ID", &mut missing);

        if !missing.is_empty() {
            bail!(
                "missing required environment variables: {}",
                missing.join(", ")
            );
        }

        Ok(Self {
            practicum_token,
            telegram_token,
            telegram_chat_id,
            poll_interval: poll_interval_from(env::var("POLL_INTERVAL_SECS").ok()),
        })
    }
}

fn required(name: &'static str, missing: &mut Vec<&'static str>) -> String {
    match env::var(name) {
        Ok(value) if !value.trim().is_empty() => value,
        _ => {
            missing.push(name);
            String::new()
        }
    }
}

fn poll_interval_from(raw: Option<String>) -> Duration {
    raw.and_then(|val| val.parse::<u64>().ok())
        .map(Duration::from_secs)
        .unwrap_or(DEFAULT_POLL_INTERVAL)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_poll_interval_parsing() {
        assert_eq!(poll_interval_from(None), Duration::from_secs(600));
        assert_eq!(
            poll_interval_from(Some("90".to_string())),
            Duration::from_secs(90)
        );
        assert_eq!(
            poll_interval_from(Some("not a number".to_string())),
            Duration::from_secs(600)
        );
    }

    // One sequential test so the process environment is not mutated from
    // concurrent test threads.
    #[test]
    fn test_from_env_requires_every_credential() {
        env::remove_var("PRACTICUM_TOKEN");
        env::remove_var("TELEGRAM_TOKEN");
        env::remove_var("TELEGRAM_CHAT_ID");

        let err = Config::from_env().unwrap_err().to_string();
        assert!(err.contains("PRACTICUM_TOKEN"));
        assert!(err.contains("TELEGRAM_TOKEN"));
        assert!(err.contains("TELEGRAM_CHAT_ID"));

        env::set_var("PRACTICUM_TOKEN", "pt");
        env::set_var("TELEGRAM_TOKEN", "tt");
        let err = Config::from_env().unwrap_err().to_string();
        assert!(!err.contains("PRACTICUM_TOKEN"));
        assert!(err.contains("TELEGRAM_CHAT_ID"));

        env::set_var("TELEGRAM_CHAT_ID", "12345");
        let config = Config::from_env().expect("all credentials set");
        assert_eq!(config.practicum_token, "pt");
        assert_eq!(config.telegram_token, "tt");
        assert_eq!(config.telegram_chat_id, "12345");

        env::remove_var("PRACTICUM_TOKEN");
        env::remove_var("TELEGRAM_TOKEN");
        env::remove_var("TELEGRAM_CHAT_ID");
    }
}
