use serde::{Deserialize, Serialize};
use std::env;

use crate::models::{
    article::{DEFAULT_META_DESCRIPTION_LENGTH, WORDS_PER_MINUTE},
    clap::MAX_CLAPS_PER_USER,
};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    // Server configuration
    pub server_host: String,
    pub server_port: u16,
    pub environment: String,
    pub log_level: String,
    pub log_format: String,

    // CORS configuration
    pub cors_allowed_origins: String,

    // Engagement settings
    pub max_claps_per_user: i32,

    // Content settings
    pub meta_description_max_length: usize,
    pub reading_words_per_minute: usize,
    pub max_article_length: usize,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server_host: "0.0.0.0".to_string(),
            server_port: 3000,
            environment: "development".to_string(),
            log_level: "rainbow_blog_engagement=debug,tower_http=debug".to_string(),
            log_format: "pretty".to_string(),
            cors_allowed_origins: "http://localhost:3001".to_string(),
            max_claps_per_user: MAX_CLAPS_PER_USER,
            meta_description_max_length: DEFAULT_META_DESCRIPTION_LENGTH,
            reading_words_per_minute: WORDS_PER_MINUTE,
            max_article_length: 50000,
        }
    }
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        let config = Config {
            server_host: env::var("SERVER_HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            server_port: env::var("SERVER_PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()?,
            environment: env::var("ENVIRONMENT").unwrap_or_else(|_| "development".to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| Self::default().log_level),
            log_format: env::var("LOG_FORMAT").unwrap_or_else(|_| "pretty".to_string()),

            cors_allowed_origins: env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),

            max_claps_per_user: env::var("MAX_CLAPS_PER_USER")
                .unwrap_or_else(|_| MAX_CLAPS_PER_USER.to_string())
                .parse()?,

            meta_description_max_length: env::var("META_DESCRIPTION_MAX_LENGTH")
                .unwrap_or_else(|_| DEFAULT_META_DESCRIPTION_LENGTH.to_string())
                .parse()?,
            reading_words_per_minute: env::var("READING_WORDS_PER_MINUTE")
                .unwrap_or_else(|_| WORDS_PER_MINUTE.to_string())
                .parse()?,
            max_article_length: env::var("MAX_ARTICLE_LENGTH")
                .unwrap_or_else(|_| "50000".to_string())
                .parse()?,
        };

        config.validate()?;
        Ok(config)
    }

    /// 拒绝会让计数或截断失去意义的取值
    pub fn validate(&self) -> anyhow::Result<()> {
        if self.max_claps_per_user < 1 {
            anyhow::bail!("MAX_CLAPS_PER_USER must be at least 1");
        }
        if self.meta_description_max_length == 0 {
            anyhow::bail!("META_DESCRIPTION_MAX_LENGTH must be at least 1");
        }
        if self.reading_words_per_minute == 0 {
            anyhow::bail!("READING_WORDS_PER_MINUTE must be at least 1");
        }
        if self.max_article_length == 0 {
            anyhow::bail!("MAX_ARTICLE_LENGTH must be at least 1");
        }
        Ok(())
    }

    pub fn is_production(&self) -> bool {
        self.environment == "production"
    }
}
