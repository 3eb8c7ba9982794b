// ABOUTME: Application constants and tuning values shared across modules
// ABOUTME: Centralizes limits, cache windows, and environment variable names
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! Named constants used throughout the server

/// Service identity values
pub mod service {
    /// Service name used as the JWT audience and in log output
    pub const NAME: &str = "stride-server";
}

/// Request and session limits
pub mod limits {
    /// Default expiry for user session tokens, in hours
    pub const SESSION_EXPIRY_HOURS: i64 = 24;

    /// Default number of rows returned by list endpoints
    pub const DEFAULT_LIST_LIMIT: i64 = 10;

    /// Upper bound accepted for list limits
    pub const MAX_LIST_LIMIT: i64 = 100;

    /// Minimum accepted password length at registration
    pub const MIN_PASSWORD_LENGTH: usize = 8;

    /// Mood and energy scores are 1..=10
    pub const SCORE_MIN: i64 = 1;
    /// Upper bound of mood and energy scores
    pub const SCORE_MAX: i64 = 10;
}

/// Query cache tuning
pub mod cache {
    /// Window during which a cached read is served without a refetch
    pub const STALE_AFTER_SECS: u64 = 5 * 60;

    /// Retention after which an unused entry is evicted outright
    pub const RETAIN_FOR_SECS: u64 = 30 * 60;

    /// Default bound on resident cache entries
    pub const DEFAULT_MAX_ENTRIES: usize = 10_000;

    /// Interval between background sweeps of expired entries
    pub const CLEANUP_INTERVAL_SECS: u64 = 60;
}

/// Environment variable names read by [`crate::config::ServerConfig`]
pub mod env {
    /// Database connection string (required)
    pub const DATABASE_URL: &str = "DATABASE_URL";
    /// Secret used to sign session tokens
    pub const JWT_SECRET: &str = "STRIDE_JWT_SECRET";
    /// HTTP listen port
    pub const HTTP_PORT: &str = "HTTP_PORT";
    /// Deployment environment (development, production, testing)
    pub const ENVIRONMENT: &str = "STRIDE_ENVIRONMENT";
    /// Log level filter
    pub const LOG_LEVEL: &str = "LOG_LEVEL";
    /// Log output format (pretty, compact, json)
    pub const LOG_FORMAT: &str = "LOG_FORMAT";
    /// Cache entry bound override
    pub const CACHE_MAX_ENTRIES: &str = "CACHE_MAX_ENTRIES";
    /// Cache fresh-window override, seconds
    pub const CACHE_STALE_SECS: &str = "CACHE_STALE_SECS";
    /// Cache retention override, seconds
    pub const CACHE_RETENTION_SECS: &str = "CACHE_RETENTION_SECS";
    /// USDA FoodData Central API key (optional; enables the remote catalog)
    pub const FDC_API_KEY: &str = "FDC_API_KEY";
    /// USDA FoodData Central base URL override
    pub const FDC_BASE_URL: &str = "FDC_BASE_URL";
}
