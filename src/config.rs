// ABOUTME: Environment configuration management for deployment-specific settings
// ABOUTME: Parses required and optional environment variables into typed config
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! Environment-based configuration management
//!
//! All configuration comes from the environment. `DATABASE_URL` is required;
//! a missing value is a startup configuration error surfaced through the main
//! flow rather than discovered later on a request path.

use crate::constants::{cache, env as env_names, limits};
use crate::errors::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::PathBuf;
use tracing::warn;

/// Strongly typed log level configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Errors only
    Error,
    /// Warnings and errors
    Warn,
    /// Standard operational logging
    #[default]
    Info,
    /// Verbose diagnostics
    Debug,
    /// Full tracing output
    Trace,
}

impl LogLevel {
    /// Parse from string with fallback to `Info`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "error" => Self::Error,
            "warn" => Self::Warn,
            "debug" => Self::Debug,
            "trace" => Self::Trace,
            _ => Self::Info,
        }
    }
}

impl std::fmt::Display for LogLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Error => write!(f, "error"),
            Self::Warn => write!(f, "warn"),
            Self::Info => write!(f, "info"),
            Self::Debug => write!(f, "debug"),
            Self::Trace => write!(f, "trace"),
        }
    }
}

/// Deployment environment
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    /// Local development (relaxed requirements)
    #[default]
    Development,
    /// Production deployment (strict requirements)
    Production,
    /// Automated test runs
    Testing,
}

impl Environment {
    /// Parse from string with fallback to `Development`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "production" | "prod" => Self::Production,
            "testing" | "test" => Self::Testing,
            _ => Self::Development,
        }
    }

    /// Check if this is a production environment
    #[must_use]
    pub fn is_production(self) -> bool {
        matches!(self, Self::Production)
    }
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Development => write!(f, "development"),
            Self::Production => write!(f, "production"),
            Self::Testing => write!(f, "testing"),
        }
    }
}

/// Type-safe database location
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum DatabaseUrl {
    /// `SQLite` database with file path
    SQLite {
        /// Path to the database file
        path: PathBuf,
    },
    /// In-memory `SQLite` (for testing)
    Memory,
}

impl DatabaseUrl {
    /// Parse a connection string
    #[must_use]
    pub fn parse_url(s: &str) -> Self {
        let path_str = s.strip_prefix("sqlite:").unwrap_or(s);
        if path_str == ":memory:" {
            Self::Memory
        } else {
            Self::SQLite {
                path: PathBuf::from(path_str),
            }
        }
    }

    /// Convert to a sqlx connection string
    #[must_use]
    pub fn to_connection_string(&self) -> String {
        match self {
            Self::SQLite { path } => format!("sqlite:{}", path.display()),
            Self::Memory => "sqlite::memory:".to_string(),
        }
    }

    /// Check if this is an in-memory database
    #[must_use]
    pub fn is_memory(&self) -> bool {
        matches!(self, Self::Memory)
    }
}

/// Query cache configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheSettings {
    /// Bound on resident entries
    pub max_entries: usize,
    /// Fresh window in seconds
    pub stale_after_secs: u64,
    /// Retention in seconds
    pub retain_for_secs: u64,
}

impl Default for CacheSettings {
    fn default() -> Self {
        Self {
            max_entries: cache::DEFAULT_MAX_ENTRIES,
            stale_after_secs: cache::STALE_AFTER_SECS,
            retain_for_secs: cache::RETAIN_FOR_SECS,
        }
    }
}

/// USDA FoodData Central catalog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FdcSettings {
    /// API key for the FDC search endpoint
    pub api_key: String,
    /// Base URL for the FDC API
    pub base_url: String,
}

/// Complete server configuration loaded from the environment
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// HTTP listen port
    pub http_port: u16,
    /// Database location
    pub database_url: DatabaseUrl,
    /// Session token signing secret
    pub jwt_secret: Vec<u8>,
    /// Session token expiry in hours
    pub token_expiry_hours: i64,
    /// Deployment environment
    pub environment: Environment,
    /// Log level filter
    pub log_level: LogLevel,
    /// Query cache tuning
    pub cache: CacheSettings,
    /// Remote food catalog settings, when configured
    pub fdc: Option<FdcSettings>,
}

impl ServerConfig {
    /// Load configuration from environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `DATABASE_URL` is not set
    /// - `STRIDE_JWT_SECRET` is not set in a production environment
    /// - A numeric override fails to parse
    pub fn from_env() -> AppResult<Self> {
        let environment = Environment::from_str_or_default(
            &env::var(env_names::ENVIRONMENT).unwrap_or_default(),
        );

        let database_url = env::var(env_names::DATABASE_URL)
            .map(|s| DatabaseUrl::parse_url(&s))
            .map_err(|_| AppError::config_missing(env_names::DATABASE_URL))?;

        let jwt_secret = match env::var(env_names::JWT_SECRET) {
            Ok(secret) if !secret.is_empty() => secret.into_bytes(),
            _ if environment.is_production() => {
                return Err(AppError::config_missing(env_names::JWT_SECRET));
            }
            _ => {
                warn!(
                    "{} not set; generating an ephemeral signing secret (sessions will not \
                     survive a restart)",
                    env_names::JWT_SECRET
                );
                crate::auth::generate_jwt_secret()?.to_vec()
            }
        };

        let http_port = parse_env(env_names::HTTP_PORT, 8080u16)?;

        let cache = CacheSettings {
            max_entries: parse_env(env_names::CACHE_MAX_ENTRIES, cache::DEFAULT_MAX_ENTRIES)?,
            stale_after_secs: parse_env(env_names::CACHE_STALE_SECS, cache::STALE_AFTER_SECS)?,
            retain_for_secs: parse_env(env_names::CACHE_RETENTION_SECS, cache::RETAIN_FOR_SECS)?,
        };

        let fdc = env::var(env_names::FDC_API_KEY).ok().map(|api_key| FdcSettings {
            api_key,
            base_url: env::var(env_names::FDC_BASE_URL)
                .unwrap_or_else(|_| "https://api.nal.usda.gov/fdc/v1".to_string()),
        });

        Ok(Self {
            http_port,
            database_url,
            jwt_secret,
            token_expiry_hours: limits::SESSION_EXPIRY_HOURS,
            environment,
            log_level: LogLevel::from_str_or_default(
                &env::var(env_names::LOG_LEVEL).unwrap_or_default(),
            ),
            cache,
            fdc,
        })
    }
}

/// Parse an optional numeric environment variable with a default
fn parse_env<T: std::str::FromStr>(name: &str, default: T) -> AppResult<T> {
    match env::var(name) {
        Ok(raw) => raw
            .parse()
            .map_err(|_| AppError::config(format!("{name} has an invalid value: {raw}"))),
        Err(_) => Ok(default),
    }
}
