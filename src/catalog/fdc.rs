// ABOUTME: USDA FoodData Central API client for nutrition lookups
// ABOUTME: Maps FDC search results onto the shared catalog item shape

use super::{CatalogFood, FoodCatalog};
use crate::errors::{AppError, AppResult};
use serde::Deserialize;
use std::time::Duration;

/// FoodData Central client configuration
#[derive(Debug, Clone)]
pub struct FdcCatalogConfig {
    /// API key (free from the FDC sign-up page)
    pub api_key: String,
    /// Base URL for the FDC API
    pub base_url: String,
    /// Request timeout
    pub timeout: Duration,
}

impl FdcCatalogConfig {
    /// Configuration against the public FDC endpoint
    #[must_use]
    pub fn new(api_key: String, base_url: String) -> Self {
        Self {
            api_key,
            base_url,
            timeout: Duration::from_secs(10),
        }
    }
}

/// FDC search response envelope
#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    foods: Vec<SearchFood>,
}

/// One food in an FDC search response
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchFood {
    description: String,
    #[serde(default)]
    food_nutrients: Vec<SearchNutrient>,
    serving_size: Option<f64>,
    serving_size_unit: Option<String>,
}

/// Nutrient amount inside a search result (per 100g)
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SearchNutrient {
    nutrient_name: String,
    #[serde(default)]
    value: f64,
}

impl SearchFood {
    fn nutrient(&self, name: &str) -> f64 {
        self.food_nutrients
            .iter()
            .find(|n| n.nutrient_name.eq_ignore_ascii_case(name))
            .map_or(0.0, |n| n.value)
    }

    fn into_catalog_food(self) -> CatalogFood {
        let serving = match (self.serving_size, &self.serving_size_unit) {
            (Some(size), Some(unit)) => format!("{size}{unit}"),
            _ => "100g".to_owned(),
        };

        CatalogFood {
            calories: self.nutrient("Energy").round() as i64,
            protein_g: self.nutrient("Protein"),
            carbs_g: self.nutrient("Carbohydrate, by difference"),
            fat_g: self.nutrient("Total lipid (fat)"),
            name: self.description,
            serving,
        }
    }
}

/// Food catalog backed by the USDA FoodData Central search API
pub struct FdcCatalog {
    config: FdcCatalogConfig,
    client: reqwest::Client,
}

impl FdcCatalog {
    /// Build the catalog client
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be constructed
    pub fn new(config: FdcCatalogConfig) -> AppResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::external_service("fdc", format!("client setup failed: {e}")))?;

        Ok(Self { config, client })
    }
}

#[async_trait::async_trait]
impl FoodCatalog for FdcCatalog {
    async fn search(&self, query: &str, limit: usize) -> AppResult<Vec<CatalogFood>> {
        let url = format!("{}/foods/search", self.config.base_url);

        let response = self
            .client
            .get(&url)
            .query(&[
                ("api_key", self.config.api_key.as_str()),
                ("query", query),
                ("pageSize", &limit.to_string()),
            ])
            .send()
            .await
            .map_err(|e| {
                AppError::new(
                    crate::errors::ErrorCode::ExternalServiceUnavailable,
                    format!("fdc: request failed: {e}"),
                )
            })?;

        if !response.status().is_success() {
            return Err(AppError::external_service(
                "fdc",
                format!("search returned HTTP {}", response.status()),
            ));
        }

        let body: SearchResponse = response
            .json()
            .await
            .map_err(|e| AppError::external_service("fdc", format!("invalid response: {e}")))?;

        Ok(body
            .foods
            .into_iter()
            .map(SearchFood::into_catalog_food)
            .collect())
    }
}
