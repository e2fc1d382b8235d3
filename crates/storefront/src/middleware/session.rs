//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. The session cookie is
//! the only client-side state the storefront uses; cart, theme and cookie
//! consent all hang off it.

use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::StorefrontConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "byttech_session";

/// Session expiry time in seconds (30 days).
///
/// Carts should survive a shopping pause, so the inactivity window is
/// deliberately long.
const SESSION_EXPIRY_SECONDS: i64 = 30 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// Sessions do not survive a server restart. That matches the demo scope
/// of the shop; swapping in a persistent `SessionStore` is a one-line
/// change here.
#[must_use]
pub fn create_session_layer(config: &StorefrontConfig) -> SessionManagerLayer<MemoryStore> {
    let store = MemoryStore::default();

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(config.is_secure())
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
}
