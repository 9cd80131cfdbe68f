use serde::Deserialize;
use std::env;
use std::time::Duration;

use crate::domain::content::GeneratorConfig;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub environment: Environment,
    pub log_format: LogFormat,
    // Content generation
    pub openai_api_key: Option<String>,
    pub openai_model: String,
    pub content_timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    Development,
    Production,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    Pretty,
    Json,
}

impl Config {
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error>> {
        dotenvy::dotenv().ok();

        let config = Config {
            database_url: env::var("DATABASE_URL")?,
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()?,
            environment: match env::var("ENVIRONMENT").as_deref() {
                Ok("production") => Environment::Production,
                _ => Environment::Development,
            },
            log_format: match env::var("LOG_FORMAT").as_deref() {
                Ok("json") => LogFormat::Json,
                _ => LogFormat::Pretty,
            },
            openai_api_key: env::var("OPENAI_API_KEY")
                .ok()
                .filter(|key| !key.trim().is_empty()),
            openai_model: env::var("OPENAI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".to_string()),
            content_timeout_secs: parse_timeout_secs(
                &env::var("CONTENT_TIMEOUT_SECS").unwrap_or_else(|_| "30".to_string()),
            )?,
        };

        Ok(config)
    }

    pub fn is_development(&self) -> bool {
        self.environment == Environment::Development
    }

    /// Generator settings derived from this configuration
    pub fn generator_config(&self) -> GeneratorConfig {
        GeneratorConfig::new(self.openai_api_key.clone())
            .with_timeout(Duration::from_secs(self.content_timeout_secs))
    }
}

/// Provider timeout in seconds; zero would fail every call
fn parse_timeout_secs(value: &str) -> Result<u64, Box<dyn std::error::Error>> {
    let secs: u64 = value.trim().parse()?;
    if secs == 0 {
        return Err("CONTENT_TIMEOUT_SECS must be at least 1".into());
    }
    Ok(secs)
}
