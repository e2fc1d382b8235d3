//! Smoke tests that run without a server.
//!
//! Everything here exercises application wiring that can fail at runtime
//! even when the workspace compiles: route registration panics on malformed
//! paths, and the generated catalog must come out the same on every boot.

use byttech_core::catalog::PRICE_FLOOR;
use byttech_core::pipeline::{self, CatalogFilter, SortKey};
use byttech_storefront::config::{DEFAULT_CATALOG_SIZE, StorefrontConfig};
use byttech_storefront::middleware::create_session_layer;
use byttech_storefront::routes;
use byttech_storefront::state::AppState;

#[test]
fn state_builds_the_default_catalog() {
    let state = AppState::new(StorefrontConfig::default());

    assert_eq!(state.config().catalog_size, DEFAULT_CATALOG_SIZE);
    assert_eq!(state.catalog().len(), 72);

    for product in state.catalog() {
        assert!(product.price >= PRICE_FLOOR);
        assert!(!product.title.is_empty());
        assert!(product.cart_id().starts_with("p-"));
    }
}

#[test]
fn catalog_is_deterministic_apart_from_timestamps() {
    let first = AppState::new(StorefrontConfig::default());
    let second = AppState::new(StorefrontConfig::default());

    for (a, b) in first.catalog().iter().zip(second.catalog()) {
        assert_eq!(a.id, b.id);
        assert_eq!(a.title, b.title);
        assert_eq!(a.price, b.price);
        assert_eq!(a.popularity, b.popularity);
        assert_eq!(a.available, b.available);
    }
}

#[test]
fn pipeline_defaults_fill_the_first_page() {
    let state = AppState::new(StorefrontConfig::default());

    let page = pipeline::run(
        state.catalog(),
        &CatalogFilter::default(),
        SortKey::Popular,
        1,
        pipeline::DEFAULT_PER_PAGE,
    );

    assert_eq!(page.items.len(), 12);
    assert_eq!(page.pagination.total_items, 72);
    assert_eq!(page.pagination.total_pages, 6);
}

#[test]
fn router_builds_without_panicking() {
    // Axum rejects malformed or conflicting paths at registration time.
    let _router = routes::routes();
    let _session_layer = create_session_layer(&StorefrontConfig::default());
}
