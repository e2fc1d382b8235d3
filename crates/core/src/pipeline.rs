//! Catalog pipeline: filter, sort, paginate.
//!
//! The pipeline is pure and runs in a fixed order on every request. There
//! is no incremental state: a request's query string fully determines its
//! result page.

use crate::catalog::{Brand, Category, Product};

/// Price ceiling assumed when the request gives no upper bound.
pub const DEFAULT_MAX_PRICE: i64 = 200_000;

/// Products per page when the request does not say otherwise.
pub const DEFAULT_PER_PAGE: u32 = 12;

/// Widest pager window rendered.
pub const PAGE_WINDOW: u32 = 7;

/// Sort order for the catalog grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortKey {
    /// Highest popularity first.
    #[default]
    Popular,
    PriceAsc,
    PriceDesc,
    /// Newest arrivals first.
    Newest,
}

impl SortKey {
    /// Parse a `sort` query value. Unknown values fall back to `Popular`.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "price-asc" => Self::PriceAsc,
            "price-desc" => Self::PriceDesc,
            "new" => Self::Newest,
            _ => Self::Popular,
        }
    }

    /// The query value for this sort order.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Popular => "popular",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Newest => "new",
        }
    }
}

/// Catalog restriction set.
///
/// Empty category and brand lists restrict nothing. The price range is
/// inclusive on both ends. `query` is matched case-insensitively against
/// product titles.
#[derive(Debug, Clone, PartialEq)]
pub struct CatalogFilter {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub in_stock_only: bool,
    pub min_price: i64,
    pub max_price: i64,
    pub query: Option<String>,
}

impl Default for CatalogFilter {
    fn default() -> Self {
        Self {
            categories: Vec::new(),
            brands: Vec::new(),
            in_stock_only: false,
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            query: None,
        }
    }
}

impl CatalogFilter {
    /// Whether a product passes every restriction.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        if !self.categories.is_empty() && !self.categories.contains(&product.category) {
            return false;
        }
        if !self.brands.is_empty() && !self.brands.contains(&product.brand) {
            return false;
        }
        if self.in_stock_only && !product.available {
            return false;
        }
        if product.price < self.min_price || product.price > self.max_price {
            return false;
        }
        if let Some(q) = &self.query {
            if !product.title.to_lowercase().contains(&q.to_lowercase()) {
                return false;
            }
        }
        true
    }
}

/// Clamped paging state for a result set.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pagination {
    /// Current page, always in `1..=total_pages`.
    pub page: u32,
    pub per_page: u32,
    pub total_items: usize,
    /// At least 1, even for an empty result set.
    pub total_pages: u32,
}

impl Pagination {
    /// Clamp a requested page against the result set.
    ///
    /// `per_page < 1` falls back to [`DEFAULT_PER_PAGE`]. An empty set
    /// still has one (empty) page; out-of-range pages land on the nearest
    /// edge.
    #[must_use]
    pub fn compute(total_items: usize, page: u32, per_page: u32) -> Self {
        let per_page = if per_page < 1 { DEFAULT_PER_PAGE } else { per_page };
        let total_pages = total_items.div_ceil(per_page as usize).max(1);
        let total_pages = u32::try_from(total_pages).unwrap_or(u32::MAX);
        let page = page.clamp(1, total_pages);
        Self {
            page,
            per_page,
            total_items,
            total_pages,
        }
    }

    /// Index of the first item of this page in the filtered set.
    #[must_use]
    pub const fn offset(&self) -> usize {
        (self.page as usize - 1) * self.per_page as usize
    }

    /// Page numbers to render: a window of up to [`PAGE_WINDOW`] pages
    /// centered on the current page and clamped to the valid range.
    #[must_use]
    pub fn window(&self) -> Vec<u32> {
        let start = self.page.saturating_sub(PAGE_WINDOW / 2).max(1);
        let end = (start + PAGE_WINDOW - 1).min(self.total_pages);
        let start = start.min(end.saturating_sub(PAGE_WINDOW - 1).max(1));
        (start..=end).collect()
    }
}

/// One rendered page of the filtered, sorted catalog.
#[derive(Debug)]
pub struct CatalogPage<'a> {
    pub items: Vec<&'a Product>,
    pub pagination: Pagination,
}

/// Run the full pipeline in its fixed order: filter, sort, paginate.
#[must_use]
pub fn run<'a>(
    products: &'a [Product],
    filter: &CatalogFilter,
    sort: SortKey,
    page: u32,
    per_page: u32,
) -> CatalogPage<'a> {
    let mut items: Vec<&Product> = products.iter().filter(|p| filter.matches(p)).collect();
    sort_products(&mut items, sort);
    let pagination = Pagination::compute(items.len(), page, per_page);
    let items = items
        .into_iter()
        .skip(pagination.offset())
        .take(pagination.per_page as usize)
        .collect();
    CatalogPage { items, pagination }
}

/// Stable sort; ties keep their generation order.
pub fn sort_products(items: &mut [&Product], sort: SortKey) {
    match sort {
        SortKey::Popular => items.sort_by(|a, b| b.popularity.cmp(&a.popularity)),
        SortKey::PriceAsc => items.sort_by(|a, b| a.price.cmp(&b.price)),
        SortKey::PriceDesc => items.sort_by(|a, b| b.price.cmp(&a.price)),
        SortKey::Newest => items.sort_by(|a, b| b.created_at.cmp(&a.created_at)),
    }
}
