// ABOUTME: Logging configuration and structured logging setup
// ABOUTME: Configures log levels, formats, and the subscriber for the server
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! Structured logging setup with environment-driven configuration

use crate::config::LogLevel;
use crate::constants::env as env_names;
use std::env;
use tracing_subscriber::EnvFilter;

/// Log output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// `JSON` format for production logging
    Json,
    /// Pretty format for development
    Pretty,
    /// Compact format for space-constrained environments
    Compact,
}

impl LogFormat {
    /// Parse from string with fallback to `Pretty`
    #[must_use]
    pub fn from_str_or_default(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "json" => Self::Json,
            "compact" => Self::Compact,
            _ => Self::Pretty,
        }
    }
}

/// Logging configuration
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    /// Log level filter applied when `RUST_LOG` is not set
    pub level: LogLevel,
    /// Output format
    pub format: LogFormat,
}

impl LoggingConfig {
    /// Build logging configuration from the environment and server settings
    #[must_use]
    pub fn new(level: LogLevel) -> Self {
        Self {
            level,
            format: LogFormat::from_str_or_default(
                &env::var(env_names::LOG_FORMAT).unwrap_or_default(),
            ),
        }
    }

    /// Build logging configuration straight from environment variables
    ///
    /// Used before [`crate::config::ServerConfig`] is loaded so configuration
    /// warnings are not lost.
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(LogLevel::from_str_or_default(
            &env::var(env_names::LOG_LEVEL).unwrap_or_default(),
        ))
    }

    /// Install the global tracing subscriber
    ///
    /// `RUST_LOG` takes precedence over the configured level so operators can
    /// raise verbosity per module without a config change.
    pub fn init(&self) {
        let filter = EnvFilter::try_from_default_env()
            .unwrap_or_else(|_| EnvFilter::new(format!("stride_server={}", self.level)));

        let builder = tracing_subscriber::fmt().with_env_filter(filter);

        match self.format {
            LogFormat::Json => builder.json().init(),
            LogFormat::Pretty => builder.pretty().init(),
            LogFormat::Compact => builder.compact().init(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_format_parsing() {
        assert_eq!(LogFormat::from_str_or_default("json"), LogFormat::Json);
        assert_eq!(LogFormat::from_str_or_default("compact"), LogFormat::Compact);
        assert_eq!(LogFormat::from_str_or_default(""), LogFormat::Pretty);
    }
}
