// ABOUTME: Built-in food table for offline nutrition lookups
// ABOUTME: Case-insensitive substring search over a small curated list

use super::{CatalogFood, FoodCatalog};
use crate::errors::AppResult;

/// Curated foods available without any external service
///
/// (name, serving, calories, protein g, carbs g, fat g)
const FOODS: &[(&str, &str, i64, f64, f64, f64)] = &[
    ("Chicken Breast", "100g", 165, 31.0, 0.0, 3.6),
    ("Brown Rice", "100g cooked", 111, 2.6, 23.0, 0.9),
    ("Broccoli", "100g", 35, 2.8, 7.0, 0.4),
    ("Banana", "1 medium", 105, 1.3, 27.0, 0.4),
    ("Greek Yogurt", "100g", 59, 10.0, 3.6, 0.4),
    ("Oatmeal", "100g cooked", 68, 2.4, 12.0, 1.4),
    ("Salmon", "100g", 206, 22.0, 0.0, 12.0),
    ("Almonds", "28g (about 23)", 160, 6.0, 6.0, 14.0),
    ("Eggs", "1 large", 72, 6.3, 0.4, 4.8),
    ("Sweet Potato", "1 medium", 103, 2.3, 24.0, 0.2),
    ("Apple", "1 medium", 95, 0.5, 25.0, 0.3),
    ("Cottage Cheese", "100g", 98, 11.0, 3.4, 4.3),
];

/// Offline food catalog backed by the curated table
pub struct StaticCatalog;

impl StaticCatalog {
    /// Create the static catalog
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Default for StaticCatalog {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl FoodCatalog for StaticCatalog {
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<CatalogFood>> {
        let needle = query.trim().to_lowercase();

        let matches = FOODS
            .iter()
            .filter(|(name, ..)| needle.is_empty() || name.to_lowercase().contains(&needle))
            .take(limit)
            .map(
                |&(name, serving, calories, protein_g, carbs_g, fat_g)| CatalogFood {
                    name: name.to_owned(),
                    serving: serving.to_owned(),
                    calories,
                    protein_g,
                    carbs_g,
                    fat_g,
                },
            )
            .collect();

        Ok(matches)
    }
}
