//! Fixtures
//!
//! Product catalogs are kept as YAML under `fixtures/products/<name>.yml`. The
//! storefront's own catalog is also compiled into the crate so the binary runs
//! from any directory.

use std::{fs, path::PathBuf};

use thiserror::Error;
use tracing::debug;

use crate::catalog::{Catalog, CatalogError};

pub mod products;

use products::ProductsFixture;

/// Catalog bundled with the crate.
pub const DEFAULT_CATALOG_YAML: &str = include_str!("../../fixtures/products/decornest.yml");

/// Fixture Parsing Errors
#[derive(Debug, Error)]
pub enum FixtureError {
    /// IO error reading fixture files
    #[error("Failed to read fixture file: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing error
    #[error("Failed to parse YAML: {0}")]
    Yaml(#[from] serde_norway::Error),

    /// Products do not form a valid catalog
    #[error("Invalid catalog: {0}")]
    Catalog(#[from] CatalogError),
}

/// Fixture
#[derive(Debug, Clone)]
pub struct Fixture {
    /// Base path for fixture files
    base_path: PathBuf,
}

impl Default for Fixture {
    fn default() -> Self {
        Self::new()
    }
}

impl Fixture {
    /// Create a fixture loader with the default base path
    pub fn new() -> Self {
        Self::with_base_path("./fixtures")
    }

    /// Create a fixture loader with a custom base path
    pub fn with_base_path(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    /// Load the catalog stored as `products/<name>.yml` under the base path
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed, or if product ids repeat.
    pub fn load_catalog(&self, name: &str) -> Result<Catalog, FixtureError> {
        let file_path = self.base_path.join("products").join(format!("{name}.yml"));

        debug!(path = %file_path.display(), "loading catalog fixture");

        let contents = fs::read_to_string(&file_path)?;

        catalog_from_yaml(&contents)
    }

    /// The catalog compiled into the crate
    ///
    /// # Errors
    ///
    /// Returns an error if the bundled YAML is malformed.
    pub fn bundled_catalog() -> Result<Catalog, FixtureError> {
        catalog_from_yaml(DEFAULT_CATALOG_YAML)
    }
}

/// Parse a YAML products document into a catalog
///
/// # Errors
///
/// Returns an error if the YAML is malformed or product ids repeat.
pub fn catalog_from_yaml(contents: &str) -> Result<Catalog, FixtureError> {
    let fixture: ProductsFixture = serde_norway::from_str(contents)?;

    Ok(Catalog::new(fixture.products)?)
}
