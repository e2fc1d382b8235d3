//! Visitor preference handlers: theme toggle and cookie consent.
//!
//! Both are one-shot form POSTs from the page chrome. They mutate the
//! session and bounce straight back to the page the form was on.

use axum::{http::HeaderMap, response::Redirect};
use tower_sessions::Session;
use tracing::instrument;

use crate::error::Result;
use crate::models::Theme;
use crate::models::session::keys;
use crate::routes::back_to;

/// Toggle the colour theme.
///
/// The form carries no value. The handler reads the current theme and
/// stores the opposite, so a stale page cannot set the theme to what the
/// visitor already has.
#[instrument(skip(session, headers))]
pub async fn toggle_theme(session: Session, headers: HeaderMap) -> Result<Redirect> {
    let next = Theme::load(&session).await?.toggled();
    if let Err(e) = session.insert(keys::THEME, next.as_str()).await {
        tracing::warn!("Failed to persist theme: {e}");
    }
    Ok(back_to(&headers, "/"))
}

/// Record cookie-banner consent and dismiss the banner.
#[instrument(skip(session, headers))]
pub async fn accept_cookies(session: Session, headers: HeaderMap) -> Result<Redirect> {
    if let Err(e) = session.insert(keys::COOKIE_ACCEPTED, "1").await {
        tracing::warn!("Failed to persist cookie consent: {e}");
    }
    Ok(back_to(&headers, "/"))
}
