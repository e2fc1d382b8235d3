//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                  - Home page
//! GET  /health            - Health check
//!
//! # Catalog
//! GET  /catalog           - Catalog with filters, search, sort, pagination
//!
//! # Cart
//! GET  /cart              - Cart page
//! POST /cart/add          - Add item (or badge-only bump) and bounce back
//! POST /cart/update       - Change line quantity / remove line
//! POST /cart/checkout     - Demo checkout acknowledgement
//!
//! # Preferences
//! POST /theme             - Toggle light/dark theme
//! POST /cookies/accept    - Dismiss the cookie banner
//! ```

pub mod cart;
pub mod catalog;
pub mod home;
pub mod prefs;

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Router,
    http::{HeaderMap, StatusCode, header},
    response::Redirect,
    routing::{get, post},
};
use tower_sessions::Session;
use url::Url;

use crate::error::Result;
use crate::filters;
use crate::models::PageChrome;
use crate::state::AppState;

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/update", post(cart::update))
        .route("/checkout", post(cart::checkout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        // Home page
        .route("/", get(home::home))
        // Catalog
        .route("/catalog", get(catalog::catalog))
        // Cart routes
        .nest("/cart", cart_routes())
        // Preferences
        .route("/theme", post(prefs::toggle_theme))
        .route("/cookies/accept", post(prefs::accept_cookies))
}

/// Not-found page template.
#[derive(Template, WebTemplate)]
#[template(path = "not_found.html")]
pub struct NotFoundTemplate {
    pub chrome: PageChrome,
}

/// Fallback handler for unknown paths.
pub async fn not_found(session: Session) -> Result<(StatusCode, NotFoundTemplate)> {
    let chrome = PageChrome::load(&session).await?;
    Ok((StatusCode::NOT_FOUND, NotFoundTemplate { chrome }))
}

/// Redirect back to the page a form was submitted from.
///
/// Uses the `Referer` header, reduced to its local path and query.
/// Anything that does not parse as one of our own URLs falls back.
pub(crate) fn back_to(headers: &HeaderMap, fallback: &str) -> Redirect {
    let target = headers
        .get(header::REFERER)
        .and_then(|value| value.to_str().ok())
        .and_then(same_site_path)
        .unwrap_or_else(|| fallback.to_string());
    Redirect::to(&target)
}

/// Reduce a Referer value to a local path plus query. The host is
/// discarded, so an off-site referrer can only ever point back into the
/// storefront.
fn same_site_path(referer: &str) -> Option<String> {
    let url = Url::parse(referer).ok()?;
    let mut path = url.path().to_string();
    if !path.starts_with('/') {
        return None;
    }
    if let Some(query) = url.query() {
        path.push('?');
        path.push_str(query);
    }
    Some(path)
}
