// ABOUTME: Food catalog abstraction for nutrition lookups
// ABOUTME: Defines the catalog trait and the item shape shared by backends
//
// Licensed under either of Apache License, Version 2.0 or MIT License at your option.
// Copyright ©2025 Stride Health

//! # Food Catalogs
//!
//! Nutrition lookup is an external collaborator behind a narrow search
//! interface. The built-in [`StaticCatalog`] covers common foods offline;
//! [`FdcCatalog`] queries the USDA FoodData Central API when a key is
//! configured.

/// USDA FoodData Central HTTP client
pub mod fdc;
/// Built-in food table
pub mod static_catalog;

pub use fdc::{FdcCatalog, FdcCatalogConfig};
pub use static_catalog::StaticCatalog;

use crate::errors::AppResult;
use serde::{Deserialize, Serialize};

/// One food the catalog knows about, nutrition per serving
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogFood {
    /// Food name
    pub name: String,
    /// Serving description (e.g. "100g", "1 medium")
    pub serving: String,
    /// Calories per serving
    pub calories: i64,
    /// Protein grams per serving
    pub protein_g: f64,
    /// Carbohydrate grams per serving
    pub carbs_g: f64,
    /// Fat grams per serving
    pub fat_g: f64,
}

/// Search interface every catalog implementation satisfies
#[async_trait::async_trait]
pub trait FoodCatalog: Send + Sync {
    /// Search the catalog by name
    ///
    /// # Errors
    ///
    /// Returns an error when the underlying catalog fails; an empty result is
    /// not an error.
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<CatalogFood>>;
}
