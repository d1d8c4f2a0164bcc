//! Catalog
//!
//! The fixed product list, with the category, price and sort controls of the
//! product gallery.

use std::{cmp::Ordering, fmt, str::FromStr};

use rust_decimal::Decimal;
use rustc_hash::FxHashMap;
use thiserror::Error;

use crate::products::{Product, ProductCategory, ProductId, UnknownCategory};

/// Products shown per gallery page.
pub const PRODUCTS_PER_PAGE: usize = 8;

/// Catalog construction and query parsing errors.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CatalogError {
    /// Category filter did not name a known category.
    #[error(transparent)]
    UnknownCategory(#[from] UnknownCategory),

    /// Price range was not `min-max` or `min-`.
    #[error("invalid price range: {0:?}")]
    InvalidPriceRange(String),

    /// Sort key was not recognised.
    #[error("unknown sort order: {0:?}")]
    UnknownSortOrder(String),

    /// Two products share an identifier.
    #[error("duplicate product id {0}")]
    DuplicateProduct(ProductId),
}

/// Inclusive price band, optionally open ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PriceRange {
    min: Decimal,
    max: Option<Decimal>,
}

impl PriceRange {
    /// Band from `min` up to and including `max`, or unbounded above.
    pub fn new(min: Decimal, max: Option<Decimal>) -> Self {
        Self { min, max }
    }

    /// Lower bound.
    pub fn min(&self) -> Decimal {
        self.min
    }

    /// Upper bound, if any.
    pub fn max(&self) -> Option<Decimal> {
        self.max
    }

    /// Check if `price` falls inside the band.
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.min && self.max.is_none_or(|max| price <= max)
    }
}

impl FromStr for PriceRange {
    type Err = CatalogError;

    /// Parse `"50-100"`, `"200-"` or `"200+"`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || CatalogError::InvalidPriceRange(s.to_string());
        let trimmed = s.trim();

        let (min, max) = match trimmed.strip_suffix('+') {
            Some(min) => (min, ""),
            None => trimmed.split_once('-').ok_or_else(invalid)?,
        };

        let min = min.trim().parse::<Decimal>().map_err(|_err| invalid())?;

        let max = match max.trim() {
            "" => None,
            max => Some(max.parse::<Decimal>().map_err(|_err| invalid())?),
        };

        if min.is_sign_negative() || max.is_some_and(|max| max < min) {
            return Err(invalid());
        }

        Ok(Self { min, max })
    }
}

/// Gallery ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    /// Most popular first
    #[default]
    Popular,

    /// Most recently listed first
    Newest,

    /// Cheapest first
    PriceLow,

    /// Most expensive first
    PriceHigh,
}

impl SortOrder {
    /// Key used in query strings and on the command line.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::Newest => "newest",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
        }
    }

    fn compare(self, a: &Product, b: &Product) -> Ordering {
        match self {
            Self::Popular => b.popularity.cmp(&a.popularity),
            Self::Newest => b.date.cmp(&a.date),
            Self::PriceLow => a.price.cmp(&b.price),
            Self::PriceHigh => b.price.cmp(&a.price),
        }
    }
}

impl FromStr for SortOrder {
    type Err = CatalogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "popular" => Ok(Self::Popular),
            "newest" => Ok(Self::Newest),
            "price-low" => Ok(Self::PriceLow),
            "price-high" => Ok(Self::PriceHigh),
            other => Err(CatalogError::UnknownSortOrder(other.to_string())),
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Filters, ordering and page of a gallery view.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    /// Only products in this category
    pub category: Option<ProductCategory>,

    /// Only products priced inside this band
    pub price_range: Option<PriceRange>,

    /// Ordering of the matches
    pub sort: SortOrder,

    /// 1-based page number
    pub page: usize,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            category: None,
            price_range: None,
            sort: SortOrder::default(),
            page: 1,
        }
    }
}

impl CatalogQuery {
    /// Parse the `all`-or-slug category filter.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::UnknownCategory`] for unknown slugs.
    pub fn parse_category(s: &str) -> Result<Option<ProductCategory>, CatalogError> {
        match s.trim() {
            "all" | "" => Ok(None),
            slug => Ok(Some(slug.parse()?)),
        }
    }

    /// Parse the `all`-or-range price filter.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::InvalidPriceRange`] for malformed ranges.
    pub fn parse_price_range(s: &str) -> Result<Option<PriceRange>, CatalogError> {
        match s.trim() {
            "all" | "" => Ok(None),
            range => Ok(Some(range.parse()?)),
        }
    }

    fn matches(&self, product: &Product) -> bool {
        self.category
            .is_none_or(|category| product.category == category)
            && self
                .price_range
                .is_none_or(|range| range.contains(product.price))
    }
}

/// One page of gallery results.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogPage<'a> {
    /// Products on this page, in sort order
    pub products: Vec<&'a Product>,

    /// 1-based page number
    pub page: usize,

    /// Pages available for the query
    pub total_pages: usize,

    /// Products matching the filters across all pages
    pub total_matches: usize,
}

/// Read-only product catalog.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Build a catalog, keeping the given order as the listing order.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::DuplicateProduct`] if two products share an id.
    pub fn new(products: Vec<Product>) -> Result<Self, CatalogError> {
        let mut index = FxHashMap::default();

        for (idx, product) in products.iter().enumerate() {
            if index.insert(product.id, idx).is_some() {
                return Err(CatalogError::DuplicateProduct(product.id));
            }
        }

        Ok(Self { products, index })
    }

    /// All products in listing order.
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Check if the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// Look up a product by identifier.
    pub fn product(&self, id: ProductId) -> Option<&Product> {
        self.index
            .get(&id)
            .and_then(|&idx| self.products.get(idx))
    }

    /// Products flagged for the home page.
    pub fn featured(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.featured)
    }

    /// Filter, sort and paginate the catalog.
    ///
    /// Sorting is stable, so ties keep listing order. Pages past the end are
    /// empty.
    pub fn query(&self, query: &CatalogQuery) -> CatalogPage<'_> {
        let mut matches: Vec<&Product> = self
            .products
            .iter()
            .filter(|product| query.matches(product))
            .collect();

        matches.sort_by(|a, b| query.sort.compare(a, b));

        let total_matches = matches.len();
        let page = query.page.max(1);

        let products = matches
            .into_iter()
            .skip((page - 1).saturating_mul(PRODUCTS_PER_PAGE))
            .take(PRODUCTS_PER_PAGE)
            .collect();

        CatalogPage {
            products,
            page,
            total_pages: total_matches.div_ceil(PRODUCTS_PER_PAGE),
            total_matches,
        }
    }
}
