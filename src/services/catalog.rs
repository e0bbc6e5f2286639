use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;

use crate::models::{Neighborhood, Recipe};

const EMBEDDED_CATALOG: &str = include_str!("../../data/catalog.json");

/// Errors that can occur when loading the catalog
#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("Failed to read catalog file: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Failed to parse catalog: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

/// Curated recipes and the fixed neighborhood table
///
/// Both sets are read-only after load.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Catalog {
    recipes: Vec<Recipe>,
    neighborhoods: Vec<Neighborhood>,
}

impl Catalog {
    /// Catalog compiled into the binary
    pub fn embedded() -> Result<Self, CatalogError> {
        Self::from_json(EMBEDDED_CATALOG)
    }

    /// Load a catalog from a JSON file on disk
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        tracing::info!("Loading catalog from {}", path.display());
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// Load the configured catalog, falling back to the embedded one
    pub fn load(path: Option<&str>) -> Result<Self, CatalogError> {
        match path {
            Some(path) if !path.trim().is_empty() => Self::from_path(path),
            _ => Self::embedded(),
        }
    }

    pub fn from_json(json: &str) -> Result<Self, CatalogError> {
        let catalog: Catalog = serde_json::from_str(json)?;
        catalog.validate()?;

        tracing::debug!(
            "Catalog loaded: {} recipes, {} neighborhoods",
            catalog.recipes.len(),
            catalog.neighborhoods.len()
        );

        Ok(catalog)
    }

    fn validate(&self) -> Result<(), CatalogError> {
        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = self.recipes.iter().find(|r| !seen.insert(r.id.as_str())) {
            return Err(CatalogError::Invalid(format!("duplicate recipe id {}", dup.id)));
        }

        let mut seen = std::collections::HashSet::new();
        if let Some(dup) = self
            .neighborhoods
            .iter()
            .find(|n| !seen.insert(n.zip_code.as_str()))
        {
            return Err(CatalogError::Invalid(format!(
                "duplicate neighborhood zip {}",
                dup.zip_code
            )));
        }

        Ok(())
    }

    pub fn recipes(&self) -> &[Recipe] {
        &self.recipes
    }

    pub fn neighborhoods(&self) -> &[Neighborhood] {
        &self.neighborhoods
    }

    /// Look up a neighborhood by exact zip code. Unknown zips yield None.
    pub fn neighborhood_by_zip(&self, zip_code: &str) -> Option<&Neighborhood> {
        self.neighborhoods.iter().find(|n| n.zip_code == zip_code)
    }

    pub fn recipe_by_id(&self, id: &str) -> Option<&Recipe> {
        self.recipes.iter().find(|r| r.id == id)
    }
}
