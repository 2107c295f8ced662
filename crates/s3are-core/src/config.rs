//! Configuration module
//!
//! This module provides the service configuration: HTTP server, database,
//! object storage, trusted identity header and presigning policy settings.

use std::env;
use std::time::Duration;

use crate::presign_policy::{PresignPolicy, DEFAULT_PRESIGN_TTL, MAX_PRESIGN_TTL};

// Common constants
const SERVER_PORT: u16 = 8080;
const MAX_CONNECTIONS: u32 = 20;
const CONNECTION_TIMEOUT_SECS: u64 = 30;
const DB_CONNECT_RETRIES: u32 = 10;
const DB_CONNECT_RETRY_DELAY_SECS: u64 = 2;
const REQUEST_TIMEOUT_SECS: u64 = 30;
const HTTP_CONCURRENCY_LIMIT: usize = 10_000;
const CONSUMER_HEADER: &str = "x-consumer-username";

/// Console log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    Compact,
    Json,
}

/// Application configuration
#[derive(Clone, Debug)]
pub struct Config {
    pub server_port: u16,
    pub environment: String,
    /// Route group prefix, e.g. `v1` serves `/v1/uploadFileRequest`. Empty serves from `/`.
    pub router_group: String,
    pub cors_origins: Vec<String>,
    pub http_concurrency_limit: usize,
    pub request_timeout_secs: u64,
    // Database configuration
    pub database_url: String,
    pub db_max_connections: u32,
    pub db_timeout_seconds: u64,
    pub db_connect_retries: u32,
    pub db_connect_retry_delay_secs: u64,
    // Storage configuration
    pub s3_bucket: String,
    pub s3_region: String,
    pub s3_endpoint: Option<String>, // Custom endpoint for S3-compatible providers (MinIO, R2, etc.)
    // Authentication
    pub consumer_header: String,
    // Presigning
    pub presign_default_ttl_secs: u64,
    pub presign_max_ttl_secs: u64,
    pub log_format: LogFormat,
}

impl Config {
    pub fn from_env() -> Result<Self, anyhow::Error> {
        dotenvy::dotenv().ok();

        let environment = env::var("ENVIRONMENT")
            .or_else(|_| env::var("APP_ENV"))
            .unwrap_or_else(|_| "development".to_string());

        let cors_origins = env::var("ALLOWED_ORIGINS")
            .unwrap_or_else(|_| "*".to_string())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let log_format = match env::var("LOG_FORMAT")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "json" => LogFormat::Json,
            _ => LogFormat::Compact,
        };

        let config = Config {
            server_port: env::var("PORT")
                .unwrap_or_else(|_| SERVER_PORT.to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number"))?,
            environment,
            router_group: env::var("ROUTER_GROUP_NAME")
                .unwrap_or_default()
                .trim_matches('/')
                .to_string(),
            cors_origins,
            http_concurrency_limit: parse_or("HTTP_CONCURRENCY_LIMIT", HTTP_CONCURRENCY_LIMIT),
            request_timeout_secs: parse_or("REQUEST_TIMEOUT_SECS", REQUEST_TIMEOUT_SECS),
            database_url: env::var("DB_URL")
                .or_else(|_| env::var("DATABASE_URL"))
                .map_err(|_| anyhow::anyhow!("DB_URL or DATABASE_URL must be set"))?,
            db_max_connections: parse_or("DB_MAX_CONNECTIONS", MAX_CONNECTIONS),
            db_timeout_seconds: parse_or("DB_TIMEOUT_SECONDS", CONNECTION_TIMEOUT_SECS),
            db_connect_retries: parse_or("DB_CONNECT_RETRIES", DB_CONNECT_RETRIES),
            db_connect_retry_delay_secs: parse_or(
                "DB_CONNECT_RETRY_DELAY_SECS",
                DB_CONNECT_RETRY_DELAY_SECS,
            ),
            s3_bucket: env::var("S3_BUCKET")
                .map_err(|_| anyhow::anyhow!("S3_BUCKET must be set"))?,
            s3_region: env::var("S3_REGION")
                .or_else(|_| env::var("AWS_REGION"))
                .map_err(|_| anyhow::anyhow!("S3_REGION or AWS_REGION must be set"))?,
            s3_endpoint: env::var("S3_ENDPOINT").ok().filter(|s| !s.trim().is_empty()),
            consumer_header: env::var("CONSUMER_HEADER")
                .unwrap_or_else(|_| CONSUMER_HEADER.to_string())
                .to_lowercase(),
            presign_default_ttl_secs: parse_or(
                "PRESIGN_DEFAULT_TTL_SECS",
                DEFAULT_PRESIGN_TTL.as_secs(),
            ),
            presign_max_ttl_secs: parse_or("PRESIGN_MAX_TTL_SECS", MAX_PRESIGN_TTL.as_secs()),
            log_format,
        };

        Ok(config)
    }

    /// Check if the application is running in production mode
    pub fn is_production(&self) -> bool {
        matches!(self.environment.to_lowercase().as_str(), "production" | "prod")
    }

    /// Fail fast on settings that would only surface as runtime errors.
    pub fn validate(&self) -> Result<(), anyhow::Error> {
        if self.server_port == 0 {
            return Err(anyhow::anyhow!("PORT must be greater than 0"));
        }
        if self.s3_bucket.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_BUCKET must not be empty"));
        }
        if self.s3_region.trim().is_empty() {
            return Err(anyhow::anyhow!("S3_REGION or AWS_REGION must not be empty"));
        }
        if self.consumer_header.trim().is_empty() {
            return Err(anyhow::anyhow!("CONSUMER_HEADER must not be empty"));
        }
        if self.presign_default_ttl_secs == 0 {
            return Err(anyhow::anyhow!(
                "PRESIGN_DEFAULT_TTL_SECS must be at least 1 second"
            ));
        }
        if self.presign_max_ttl_secs == 0 || self.presign_max_ttl_secs > MAX_PRESIGN_TTL.as_secs()
        {
            return Err(anyhow::anyhow!(
                "PRESIGN_MAX_TTL_SECS must be between 1 and {} seconds",
                MAX_PRESIGN_TTL.as_secs()
            ));
        }
        if self.presign_default_ttl_secs > self.presign_max_ttl_secs {
            return Err(anyhow::anyhow!(
                "PRESIGN_DEFAULT_TTL_SECS cannot exceed PRESIGN_MAX_TTL_SECS"
            ));
        }
        if self.request_timeout_secs == 0 {
            return Err(anyhow::anyhow!("REQUEST_TIMEOUT_SECS must be greater than 0"));
        }
        if self.is_production() && self.allows_any_origin() {
            return Err(anyhow::anyhow!(
                "ALLOWED_ORIGINS cannot be '*' in production. Please specify explicit origins."
            ));
        }
        Ok(())
    }

    /// True when CORS should accept every origin.
    pub fn allows_any_origin(&self) -> bool {
        self.cors_origins.is_empty() || self.cors_origins.iter().any(|o| o == "*")
    }

    pub fn presign_policy(&self) -> PresignPolicy {
        PresignPolicy::new(
            Duration::from_secs(self.presign_default_ttl_secs),
            Duration::from_secs(self.presign_max_ttl_secs),
        )
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Route prefix with a leading slash, or an empty string when routes are served from `/`.
    pub fn route_prefix(&self) -> String {
        if self.router_group.is_empty() {
            String::new()
        } else {
            format!("/{}", self.router_group)
        }
    }
}

fn parse_or<T: std::str::FromStr>(key: &str, default: T) -> T {
    env::var(key)
        .ok()
        .and_then(|s| s.trim().parse().ok())
        .unwrap_or(default)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            server_port: 8080,
            environment: "development".to_string(),
            router_group: String::new(),
            cors_origins: vec!["*".to_string()],
            http_concurrency_limit: 100,
            request_timeout_secs: 30,
            database_url: "postgres://localhost/s3are".to_string(),
            db_max_connections: 5,
            db_timeout_seconds: 30,
            db_connect_retries: 10,
            db_connect_retry_delay_secs: 2,
            s3_bucket: "uploads".to_string(),
            s3_region: "eu-west-1".to_string(),
            s3_endpoint: None,
            consumer_header: "x-consumer-username".to_string(),
            presign_default_ttl_secs: 86_400,
            presign_max_ttl_secs: 604_800,
            log_format: LogFormat::Compact,
        }
    }

    #[test]
    fn test_valid_config() {
        assert!(test_config().validate().is_ok());
    }

    #[test]
    fn test_max_ttl_above_seven_days_rejected() {
        let mut config = test_config();
        config.presign_max_ttl_secs = 30 * 86_400;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_default_ttl_above_max_rejected() {
        let mut config = test_config();
        config.presign_max_ttl_secs = 3_600;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_wildcard_cors_rejected_in_production() {
        let mut config = test_config();
        config.environment = "Production".to_string();
        assert!(config.is_production());
        assert!(config.validate().is_err());

        config.cors_origins = vec!["https://app.example.com".to_string()];
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_route_prefix() {
        let mut config = test_config();
        assert_eq!(config.route_prefix(), "");
        config.router_group = "v1".to_string();
        assert_eq!(config.route_prefix(), "/v1");
    }

    #[test]
    fn test_presign_policy_from_config() {
        let mut config = test_config();
        config.presign_default_ttl_secs = 600;
        let policy = config.presign_policy();
        assert_eq!(policy.effective_ttl(None), Duration::from_secs(600));
        assert_eq!(
            policy.effective_ttl(Some(10_000_000)),
            Duration::from_secs(604_800)
        );
    }
}
