//! Catalog model and deterministic generation.
//!
//! There is no product database. The catalog is derived from a fixed
//! pseudo-random function of the product index, so the same `(count, now)`
//! pair always yields the same products. The storefront generates the
//! catalog once at startup and serves it read-only.

use chrono::{DateTime, Duration, Utc};

/// Product category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Category {
    Oven,
    Hob,
    Fridge,
    Dishwasher,
    Washing,
}

impl Category {
    /// All categories, in catalog rotation order.
    pub const ALL: [Self; 5] = [
        Self::Oven,
        Self::Hob,
        Self::Fridge,
        Self::Dishwasher,
        Self::Washing,
    ];

    /// Stable slug used in URLs and form values.
    #[must_use]
    pub const fn slug(self) -> &'static str {
        match self {
            Self::Oven => "oven",
            Self::Hob => "hob",
            Self::Fridge => "fridge",
            Self::Dishwasher => "dishwasher",
            Self::Washing => "washing",
        }
    }

    /// Russian display name, also the leading part of product titles.
    #[must_use]
    pub const fn title_ru(self) -> &'static str {
        match self {
            Self::Oven => "Духовой шкаф",
            Self::Hob => "Варочная панель",
            Self::Fridge => "Холодильник",
            Self::Dishwasher => "Посудомоечная машина",
            Self::Washing => "Стиральная машина",
        }
    }

    /// Static image served for products of this category.
    #[must_use]
    pub const fn image_path(self) -> &'static str {
        match self {
            Self::Oven => "/static/images/hero1.svg",
            Self::Hob => "/static/images/hero2.svg",
            Self::Fridge => "/static/images/hero3.svg",
            Self::Dishwasher => "/static/images/cat1.svg",
            Self::Washing => "/static/images/cat2.svg",
        }
    }

    /// Parse a slug back into a category.
    #[must_use]
    pub fn parse(slug: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.slug() == slug)
    }
}

/// Appliance brand.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Brand {
    Miele,
    Bosch,
    Siemens,
    Aeg,
    Samsung,
    Lg,
}

impl Brand {
    /// All brands, in catalog rotation order.
    pub const ALL: [Self; 6] = [
        Self::Miele,
        Self::Bosch,
        Self::Siemens,
        Self::Aeg,
        Self::Samsung,
        Self::Lg,
    ];

    /// Display name, also the URL/form value.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Miele => "Miele",
            Self::Bosch => "Bosch",
            Self::Siemens => "Siemens",
            Self::Aeg => "AEG",
            Self::Samsung => "Samsung",
            Self::Lg => "LG",
        }
    }

    /// Parse a display name back into a brand.
    #[must_use]
    pub fn parse(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|b| b.as_str() == name)
    }
}

/// One catalog product.
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Catalog index, 1-based.
    pub id: u32,
    pub title: String,
    pub category: Category,
    pub brand: Brand,
    /// Whole rubles.
    pub price: i64,
    pub available: bool,
    pub created_at: DateTime<Utc>,
    /// Sort weight for the default ordering, `0..1000`.
    pub popularity: u32,
}

impl Product {
    /// Image shown on cards and carried into cart lines.
    #[must_use]
    pub const fn image_path(&self) -> &'static str {
        self.category.image_path()
    }

    /// The identifier cart lines use for this product.
    #[must_use]
    pub fn cart_id(&self) -> String {
        format!("p-{}", self.id)
    }
}

/// Lowest possible product price in rubles.
pub const PRICE_FLOOR: i64 = 14_990;

const PRICE_SPREAD: f64 = 180_000.0;
const MAX_AGE_MS: f64 = 1000.0 * 60.0 * 60.0 * 24.0 * 180.0;

/// Fractional part of `sin(seed) * 10_000`, always in `[0, 1)`.
fn noise(seed: f64) -> f64 {
    let x = seed.sin() * 10_000.0;
    x - x.floor()
}

/// Scale a `[0, 1)` sample up to `[0, range)` and floor it.
#[allow(clippy::cast_possible_truncation)] // range stays well inside i64
fn scaled(sample: f64, range: f64) -> i64 {
    (sample * range).floor() as i64
}

/// Generate the catalog: products `1..=count`, anchored at `now`.
///
/// Reproducible for a given `(count, now)`.
#[must_use]
pub fn generate(count: u32, now: DateTime<Utc>) -> Vec<Product> {
    (1..=count).map(|i| product_at(i, now)).collect()
}

#[allow(clippy::indexing_slicing)] // indexes are taken modulo the array length
fn product_at(i: u32, now: DateTime<Utc>) -> Product {
    let seed = f64::from(i);
    let category = Category::ALL[i as usize % Category::ALL.len()];
    let brand = Brand::ALL[i as usize % Brand::ALL.len()];
    let price = PRICE_FLOOR + scaled(noise(seed), PRICE_SPREAD);
    let available = noise(seed * 7.0) > 0.25;
    let age_ms = scaled(noise(seed * 13.0), MAX_AGE_MS);
    let popularity = u32::try_from(scaled(noise(seed * 17.0), 1000.0)).unwrap_or(0);
    let title = format!("{} {} {}", category.title_ru(), brand.as_str(), 100 + i % 900);

    Product {
        id: i,
        title,
        category,
        brand,
        price,
        available,
        created_at: now - Duration::milliseconds(age_ms),
        popularity,
    }
}
