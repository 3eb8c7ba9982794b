// ABOUTME: Centralized resource container for dependency injection
// ABOUTME: Wires database, auth, cache, services, and collaborators once
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! # Server Resources
//!
//! Central container for shared server state. Expensive objects (database
//! pool, auth manager, cache) are created once and shared via `Arc`; the
//! session state lives here explicitly rather than in ambient globals.

use crate::auth::{AuthManager, AuthMiddleware, SessionEvents};
use crate::cache::memory::InMemoryCache;
use crate::cache::reads::ReadCache;
use crate::cache::CacheConfig;
use crate::catalog::{FdcCatalog, FdcCatalogConfig, FoodCatalog, StaticCatalog};
use crate::coach::{CoachProvider, ScriptedCoach};
use crate::config::ServerConfig;
use crate::database::Database;
use crate::errors::AppResult;
use crate::services::{DashboardService, HealthDataService};
use std::sync::Arc;

/// Centralized resource container for dependency injection
#[derive(Clone)]
pub struct ServerResources {
    /// Shared database pool
    pub database: Arc<Database>,
    /// Token issuing and validation
    pub auth_manager: Arc<AuthManager>,
    /// Request authentication
    pub auth_middleware: AuthMiddleware,
    /// Cached per-user health data access
    pub health_data: HealthDataService,
    /// Progress dashboard aggregation
    pub dashboard: DashboardService,
    /// Coach collaborator
    pub coach: Arc<dyn CoachProvider>,
    /// Food catalog collaborator
    pub catalog: Arc<dyn FoodCatalog>,
    /// Session lifecycle notifications
    pub session_events: SessionEvents,
    /// Server configuration
    pub config: Arc<ServerConfig>,
}

impl ServerResources {
    /// Create server resources from a connected database and configuration
    ///
    /// # Errors
    ///
    /// Returns an error if a collaborator fails to initialize
    pub fn new(database: Database, config: Arc<ServerConfig>) -> AppResult<Self> {
        let database = Arc::new(database);

        let auth_manager = Arc::new(AuthManager::new(
            &config.jwt_secret,
            config.token_expiry_hours,
        ));
        let auth_middleware = AuthMiddleware::new(auth_manager.clone(), database.clone());

        let cache = InMemoryCache::new(&CacheConfig {
            max_entries: config.cache.max_entries,
            ..Default::default()
        });
        let reads = ReadCache::new(cache, &config.cache);

        let health_data = HealthDataService::new(database.clone(), reads);
        let dashboard = DashboardService::new(database.clone());

        let catalog: Arc<dyn FoodCatalog> = match &config.fdc {
            Some(settings) => {
                tracing::info!("food catalog: USDA FoodData Central at {}", settings.base_url);
                Arc::new(FdcCatalog::new(FdcCatalogConfig::new(
                    settings.api_key.clone(),
                    settings.base_url.clone(),
                ))?)
            }
            None => {
                tracing::info!("food catalog: built-in static table");
                Arc::new(StaticCatalog::new())
            }
        };

        Ok(Self {
            database,
            auth_manager,
            auth_middleware,
            health_data,
            dashboard,
            coach: Arc::new(ScriptedCoach::new()),
            catalog,
            session_events: SessionEvents::default(),
            config,
        })
    }
}
