// ABOUTME: Main library entry point for the Stride health tracking backend
// ABOUTME: Provides the REST API, persistence, caching, and coach subsystems
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

#![deny(unsafe_code)]

//! # Stride Health Server
//!
//! Backend service for the Stride health and fitness tracker. It owns user
//! accounts and sessions, per-user health records (profile, daily stats,
//! workouts, food, journal), a query cache with staleness semantics, and the
//! pluggable coach and food-catalog collaborators.
//!
//! ## Architecture
//!
//! - **Models**: plain records mirroring rows in the store
//! - **Database**: `SQLite`-backed persistence with per-entity operations
//! - **Auth**: JWT sessions with server-side revocation and change events
//! - **Cache**: read-through query cache (fresh window + bounded retention)
//! - **Services**: the read/write orchestration layer used by the routes
//! - **Routes**: REST surface consumed by the mobile client
//!
//! ## Example Usage
//!
//! ```rust,no_run
//! use stride_server::config::ServerConfig;
//! use stride_server::errors::AppResult;
//!
//! fn main() -> AppResult<()> {
//!     let config = ServerConfig::from_env()?;
//!     println!("Stride server configured with port: HTTP={}", config.http_port);
//!     Ok(())
//! }
//! ```

/// Authentication, token validation, and session lifecycle
pub mod auth;

/// Read-through query cache with pluggable backends
pub mod cache;

/// Food catalog collaborators (static table, USDA FoodData Central)
pub mod catalog;

/// AI coach collaborators behind a narrow conversation interface
pub mod coach;

/// Environment configuration management
pub mod config;

/// Application constants and tuning values
pub mod constants;

/// Persistence layer over `SQLite`
pub mod database;

/// Unified error handling with standard error codes and HTTP responses
pub mod errors;

/// Structured logging setup
pub mod logging;

/// Common data models for health records
pub mod models;

/// Shared resource container for dependency injection
pub mod resources;

/// `HTTP` routes for the REST API surface
pub mod routes;

/// Server assembly and lifecycle
pub mod server;

/// Domain service layer between routes and persistence
pub mod services;
