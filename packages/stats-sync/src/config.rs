use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::kernel::Pacing;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub tgstat_token: String,
    pub tgstat_base_url: String,
    pub channel_id: String,
    pub sheety_username: String,
    pub sheety_token: String,
    pub sheety_project: String,
    pub sheety_base_url: String,
    pub pacing: Pacing,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        let defaults = Pacing::default();

        Ok(Self {
            tgstat_token: env::var("TG_STATS_TOKEN").context("TG_STATS_TOKEN must be set")?,
            tgstat_base_url: env::var("TGSTAT_BASE_URL")
                .unwrap_or_else(|_| "https://api.tgstat.ru".to_string()),
            channel_id: env::var("TG_CHANNEL_ID").context("TG_CHANNEL_ID must be set")?,
            sheety_username: env::var("SHEETY_USERNAME")
                .context("SHEETY_USERNAME must be set")?,
            sheety_token: env::var("SHEETY_TOKEN").context("SHEETY_TOKEN must be set")?,
            sheety_project: env::var("SHEETY_PROJECT").unwrap_or_else(|_| "kleyStats".to_string()),
            sheety_base_url: env::var("SHEETY_BASE_URL")
                .unwrap_or_else(|_| "https://api.sheety.co".to_string()),
            pacing: Pacing {
                page_delay: millis_var("SYNC_PAGE_DELAY_MS", defaults.page_delay)?,
                mutation_delay: millis_var("SYNC_MUTATION_DELAY_MS", defaults.mutation_delay)?,
            },
        })
    }
}

fn millis_var(name: &str, default: Duration) -> Result<Duration> {
    match env::var(name) {
        Ok(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_millis)
            .with_context(|| format!("{} must be a number of milliseconds", name)),
        Err(_) => Ok(default),
    }
}
