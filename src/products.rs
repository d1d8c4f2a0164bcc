//! Products

use std::{fmt, num::ParseIntError, str::FromStr};

use jiff::civil::{Date, date};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Product identifier, unique within a catalog.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(u32);

impl ProductId {
    /// Create a product identifier.
    pub const fn new(id: u32) -> Self {
        Self(id)
    }

    /// Raw identifier value.
    pub const fn get(self) -> u32 {
        self.0
    }
}

impl From<u32> for ProductId {
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl FromStr for ProductId {
    type Err = ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse().map(Self)
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Category slug did not match any known category.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown product category: {0}")]
pub struct UnknownCategory(pub String);

/// Product category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProductCategory {
    /// Wall decor
    WallDecor,

    /// Lighting
    Lighting,

    /// Furniture accents
    FurnitureAccents,

    /// Indoor plants
    IndoorPlants,

    /// Rugs & carpets
    RugsCarpets,

    /// Curtains & blinds
    CurtainsBlinds,
}

impl ProductCategory {
    /// Every category, in menu order.
    pub const ALL: [Self; 6] = [
        Self::WallDecor,
        Self::Lighting,
        Self::FurnitureAccents,
        Self::IndoorPlants,
        Self::RugsCarpets,
        Self::CurtainsBlinds,
    ];

    /// URL-safe slug, as used in fixtures and filters.
    pub const fn slug(self) -> &'static str {
        match self {
            Self::WallDecor => "wall-decor",
            Self::Lighting => "lighting",
            Self::FurnitureAccents => "furniture-accents",
            Self::IndoorPlants => "indoor-plants",
            Self::RugsCarpets => "rugs-carpets",
            Self::CurtainsBlinds => "curtains-blinds",
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::WallDecor => "Wall Decor",
            Self::Lighting => "Lighting",
            Self::FurnitureAccents => "Furniture Accents",
            Self::IndoorPlants => "Indoor Plants",
            Self::RugsCarpets => "Rugs & Carpets",
            Self::CurtainsBlinds => "Curtains & Blinds",
        }
    }
}

impl FromStr for ProductCategory {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let needle = s.trim();

        Self::ALL
            .into_iter()
            .find(|category| category.slug() == needle)
            .ok_or_else(|| UnknownCategory(needle.to_string()))
    }
}

impl fmt::Display for ProductCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

fn in_stock_default() -> bool {
    true
}

/// Product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Product name
    pub name: String,

    /// Product category
    pub category: ProductCategory,

    /// Unit price in rupees
    pub price: Decimal,

    /// Image URL
    #[serde(default)]
    pub image: String,

    /// Popularity score, higher sorts first
    #[serde(default)]
    pub popularity: u32,

    /// Date the product was listed
    pub date: Date,

    /// Long-form description
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Available colours
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub colors: Vec<String>,

    /// Materials the product is made from
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub materials: Vec<String>,

    /// Free-text dimensions
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<String>,

    /// Whether the product can be ordered
    #[serde(default = "in_stock_default")]
    pub in_stock: bool,

    /// Shown on the home page
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub featured: bool,
}

impl Product {
    /// Create a product with the given identity and price.
    ///
    /// Remaining attributes take neutral defaults.
    pub fn new(
        id: u32,
        name: impl Into<String>,
        category: ProductCategory,
        price: Decimal,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            name: name.into(),
            category,
            price,
            image: String::new(),
            popularity: 0,
            date: date(2023, 1, 1),
            description: None,
            colors: Vec::new(),
            materials: Vec::new(),
            dimensions: None,
            in_stock: true,
            featured: false,
        }
    }

    /// Set the popularity score.
    #[must_use]
    pub fn with_popularity(mut self, popularity: u32) -> Self {
        self.popularity = popularity;
        self
    }

    /// Set the listing date.
    #[must_use]
    pub fn with_date(mut self, date: Date) -> Self {
        self.date = date;
        self
    }
}
