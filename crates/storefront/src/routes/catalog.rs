//! Catalog route handler.
//!
//! The query string is the entire pipeline state: filters, search text,
//! sort key and page all live in the URL, so every catalog view is
//! shareable and survives a reload. Rendering echoes the normalized form
//! of the query back into the filter controls.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{RawQuery, State};
use tower_sessions::Session;
use tracing::instrument;

use byttech_core::catalog::{Brand, Category};
use byttech_core::cart::parse_int_lenient;
use byttech_core::pipeline::{self, DEFAULT_MAX_PRICE, DEFAULT_PER_PAGE, Pagination};
use byttech_core::price::format_rub;
use byttech_core::{CatalogFilter, Product, SortKey};

use crate::error::Result;
use crate::filters;
use crate::models::PageChrome;
use crate::state::AppState;

/// Sort options shown in the toolbar, in display order.
const SORT_LABELS: [(SortKey, &str); 4] = [
    (SortKey::Popular, "По популярности"),
    (SortKey::PriceAsc, "Сначала дешевле"),
    (SortKey::PriceDesc, "Сначала дороже"),
    (SortKey::Newest, "Новинки"),
];

/// Page size choices for the per-page select.
const PER_PAGE_CHOICES: [u32; 3] = [12, 24, 48];

/// Parsed catalog query string.
///
/// Parsing never fails. Unknown keys are ignored, unparseable values fall
/// back to their defaults and an inverted price range is swapped, so a
/// hand-edited URL degrades instead of erroring. Repeated scalar keys
/// keep the last occurrence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogQuery {
    pub q: Option<String>,
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
    pub in_stock: bool,
    pub min_price: i64,
    pub max_price: i64,
    pub sort: SortKey,
    pub page: u32,
    pub per_page: u32,
}

impl Default for CatalogQuery {
    fn default() -> Self {
        Self {
            q: None,
            categories: Vec::new(),
            brands: Vec::new(),
            in_stock: false,
            min_price: 0,
            max_price: DEFAULT_MAX_PRICE,
            sort: SortKey::default(),
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }
}

impl CatalogQuery {
    /// Parse a raw query string.
    #[must_use]
    pub fn parse(raw: &str) -> Self {
        let mut query = Self::default();
        for (key, value) in url::form_urlencoded::parse(raw.as_bytes()) {
            match key.as_ref() {
                "q" => {
                    let trimmed = value.trim();
                    if !trimmed.is_empty() {
                        query.q = Some(trimmed.to_string());
                    }
                }
                "category" => {
                    if let Some(category) = Category::parse(&value) {
                        if !query.categories.contains(&category) {
                            query.categories.push(category);
                        }
                    }
                }
                "brand" => {
                    if let Some(brand) = Brand::parse(&value) {
                        if !query.brands.contains(&brand) {
                            query.brands.push(brand);
                        }
                    }
                }
                "in_stock" => query.in_stock = value == "1",
                "min" => query.min_price = parse_int_lenient(&value).unwrap_or(0),
                "max" => {
                    query.max_price = parse_int_lenient(&value).unwrap_or(DEFAULT_MAX_PRICE);
                }
                "sort" => query.sort = SortKey::parse(&value),
                "page" => query.page = lenient_u32(&value, 1),
                "per_page" => query.per_page = lenient_u32(&value, DEFAULT_PER_PAGE),
                _ => {}
            }
        }
        if query.min_price > query.max_price {
            std::mem::swap(&mut query.min_price, &mut query.max_price);
        }
        query
    }

    /// The filter this query describes.
    #[must_use]
    pub fn filter(&self) -> CatalogFilter {
        CatalogFilter {
            categories: self.categories.clone(),
            brands: self.brands.clone(),
            in_stock_only: self.in_stock,
            min_price: self.min_price,
            max_price: self.max_price,
            query: self.q.clone(),
        }
    }

    /// Rebuild the canonical query string with `page` substituted.
    ///
    /// Pager links change the page and nothing else. Values equal to
    /// their defaults are omitted, so links stay short and one state has
    /// one URL.
    #[must_use]
    pub fn href_for_page(&self, page: u32) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(q) = &self.q {
            parts.push(format!("q={}", urlencoding::encode(q)));
        }
        for category in &self.categories {
            parts.push(format!("category={}", category.slug()));
        }
        for brand in &self.brands {
            parts.push(format!("brand={}", brand.as_str()));
        }
        if self.in_stock {
            parts.push("in_stock=1".to_string());
        }
        if self.min_price != 0 {
            parts.push(format!("min={}", self.min_price));
        }
        if self.max_price != DEFAULT_MAX_PRICE {
            parts.push(format!("max={}", self.max_price));
        }
        if self.sort != SortKey::Popular {
            parts.push(format!("sort={}", self.sort.as_str()));
        }
        if self.per_page != DEFAULT_PER_PAGE {
            parts.push(format!("per_page={}", self.per_page));
        }
        if page != 1 {
            parts.push(format!("page={page}"));
        }
        if parts.is_empty() {
            "/catalog".to_string()
        } else {
            format!("/catalog?{}", parts.join("&"))
        }
    }
}

// Zero is no more usable than garbage for a page number or page size,
// so anything below 1 takes the default.
fn lenient_u32(value: &str, default: u32) -> u32 {
    match parse_int_lenient(value) {
        Some(v) if v >= 1 => u32::try_from(v).unwrap_or(u32::MAX),
        _ => default,
    }
}

// =============================================================================
// View Types
// =============================================================================

/// Product card display data for templates.
#[derive(Clone)]
pub struct ProductCardView {
    pub id: String,
    pub title: String,
    pub category_slug: &'static str,
    pub brand: &'static str,
    pub price_raw: i64,
    pub price: String,
    pub image: &'static str,
    pub available: bool,
}

impl From<&Product> for ProductCardView {
    fn from(product: &Product) -> Self {
        Self {
            id: product.cart_id(),
            title: product.title.clone(),
            category_slug: product.category.slug(),
            brand: product.brand.as_str(),
            price_raw: product.price,
            price: format_rub(product.price),
            image: product.image_path(),
            available: product.available,
        }
    }
}

/// One category checkbox in the filter form.
pub struct CategoryOption {
    pub slug: &'static str,
    pub label: &'static str,
    pub checked: bool,
}

/// One brand checkbox in the filter form.
pub struct BrandOption {
    pub name: &'static str,
    pub checked: bool,
}

/// One entry of the sort select.
pub struct SortOption {
    pub value: &'static str,
    pub label: &'static str,
    pub selected: bool,
}

/// One entry of the per-page select.
pub struct PerPageOption {
    pub value: u32,
    pub selected: bool,
}

/// One numbered pager link.
pub struct PageLink {
    pub number: u32,
    pub href: String,
    pub current: bool,
}

/// Pager display data: a seven-page window around the current page plus
/// prev/next arrows.
pub struct PagerView {
    pub prev_href: String,
    pub prev_disabled: bool,
    pub next_href: String,
    pub next_disabled: bool,
    pub pages: Vec<PageLink>,
}

/// Catalog page template.
#[derive(Template, WebTemplate)]
#[template(path = "catalog.html")]
pub struct CatalogTemplate {
    pub chrome: PageChrome,
    pub products: Vec<ProductCardView>,
    pub shown: usize,
    pub total: usize,
    pub categories: Vec<CategoryOption>,
    pub brands: Vec<BrandOption>,
    pub in_stock: bool,
    pub min_price: i64,
    pub max_price: i64,
    pub q: String,
    pub sorts: Vec<SortOption>,
    pub per_pages: Vec<PerPageOption>,
    pub pager: PagerView,
}

fn build_pager(query: &CatalogQuery, pagination: &Pagination) -> PagerView {
    let pages = pagination
        .window()
        .into_iter()
        .map(|number| PageLink {
            number,
            href: query.href_for_page(number),
            current: number == pagination.page,
        })
        .collect();
    PagerView {
        prev_href: query.href_for_page(pagination.page.saturating_sub(1).max(1)),
        prev_disabled: pagination.page == 1,
        next_href: query.href_for_page((pagination.page + 1).min(pagination.total_pages)),
        next_disabled: pagination.page == pagination.total_pages,
        pages,
    }
}

/// Run the pipeline over the catalog and assemble the template.
fn build_template(
    chrome: PageChrome,
    products: &[Product],
    query: &CatalogQuery,
) -> CatalogTemplate {
    let page = pipeline::run(
        products,
        &query.filter(),
        query.sort,
        query.page,
        query.per_page,
    );
    let pager = build_pager(query, &page.pagination);
    let shown = page.items.len();

    CatalogTemplate {
        chrome,
        products: page.items.into_iter().map(ProductCardView::from).collect(),
        shown,
        total: page.pagination.total_items,
        categories: Category::ALL
            .into_iter()
            .map(|c| CategoryOption {
                slug: c.slug(),
                label: c.title_ru(),
                checked: query.categories.contains(&c),
            })
            .collect(),
        brands: Brand::ALL
            .into_iter()
            .map(|b| BrandOption {
                name: b.as_str(),
                checked: query.brands.contains(&b),
            })
            .collect(),
        in_stock: query.in_stock,
        min_price: query.min_price,
        max_price: query.max_price,
        q: query.q.clone().unwrap_or_default(),
        sorts: SORT_LABELS
            .into_iter()
            .map(|(key, label)| SortOption {
                value: key.as_str(),
                label,
                selected: key == query.sort,
            })
            .collect(),
        per_pages: PER_PAGE_CHOICES
            .into_iter()
            .map(|value| PerPageOption {
                value,
                selected: value == query.per_page,
            })
            .collect(),
        pager,
    }
}

/// Display the catalog page.
#[instrument(skip(state, session))]
pub async fn catalog(
    State(state): State<AppState>,
    session: Session,
    RawQuery(raw): RawQuery,
) -> Result<CatalogTemplate> {
    let query = CatalogQuery::parse(raw.as_deref().unwrap_or(""));
    let mut chrome = PageChrome::load(&session).await?;
    chrome.search_q = query.q.clone().unwrap_or_default();
    Ok(build_template(chrome, state.catalog(), &query))
}
