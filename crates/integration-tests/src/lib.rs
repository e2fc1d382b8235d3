//! Integration tests for the BytTech storefront.
//!
//! # Running Tests
//!
//! ```bash
//! # Start the storefront
//! cargo run -p byttech-storefront
//!
//! # Run the HTTP flows against it
//! cargo test -p byttech-integration-tests -- --include-ignored
//! ```
//!
//! Most tests here drive a running server over HTTP and are `#[ignore]`d so
//! that a plain `cargo test` stays self-contained; the smoke tests in
//! `tests/storefront_smoke.rs` always run.

#![cfg_attr(not(test), forbid(unsafe_code))]

/// Base URL for the storefront (configurable via environment).
pub fn base_url() -> String {
    std::env::var("STOREFRONT_BASE_URL").unwrap_or_else(|_| "http://localhost:3000".to_string())
}

/// HTTP client with a cookie jar, so one session spans a whole test flow.
///
/// Redirects are not followed: the storefront answers every mutating POST
/// with `303 See Other`, and the tests assert on those responses directly.
///
/// # Panics
///
/// Panics if the TLS backend fails to initialize.
pub fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .cookie_store(true)
        .redirect(reqwest::redirect::Policy::none())
        .build()
        .expect("Failed to create HTTP client")
}
