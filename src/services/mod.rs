// ABOUTME: Domain service layer between routes and persistence
// ABOUTME: Hosts the cached health-data service and dashboard aggregation
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! Domain services
//!
//! Routes stay thin; reads go through the cache and writes invalidate the
//! affected keys here.

/// Progress dashboard aggregation and achievements
pub mod dashboard;

/// Cached per-user health data reads and writes
pub mod health_data;

pub use dashboard::{AchievementProgress, DashboardOverview, DashboardService, WeekSummary};
pub use health_data::HealthDataService;
