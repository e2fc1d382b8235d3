//! Session-backed shopper state.
//!
//! Everything a visitor accumulates - cart lines and page preferences -
//! lives in the tower-sessions store under the keys below.
//! Stored values are wire data: reads tolerate malformed entries and fall
//! back to defaults, so a stale or hand-edited session can never take a
//! page down. Cart reads go further and swallow store failures too: a
//! store that cannot be read is an empty cart, logged at warn. Only
//! writes surface store errors, and callers decide what to do with them.

use serde_json::Value;
use tower_sessions::Session;
use tower_sessions::session::Error as SessionError;

use byttech_core::cart::{self, CartLine};

/// Session keys for shopper state.
pub mod keys {
    /// Key for the cart line array.
    pub const CART: &str = "cart";

    /// Key for the colour theme ("light" or "dark").
    pub const THEME: &str = "theme";

    /// Key for cookie-banner consent ("1" once accepted).
    pub const COOKIE_ACCEPTED: &str = "cookie_accepted";

    /// Key for the badge-only counter fed by add forms without item data.
    pub const BADGE_BOOST: &str = "badge_boost";
}

/// Colour theme chosen by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    /// Stored string form.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
        }
    }

    /// The other theme.
    #[must_use]
    pub const fn toggled(self) -> Self {
        match self {
            Self::Light => Self::Dark,
            Self::Dark => Self::Light,
        }
    }

    #[must_use]
    pub const fn is_dark(self) -> bool {
        matches!(self, Self::Dark)
    }

    /// CSS class applied to the `<html>` element.
    #[must_use]
    pub const fn css_class(self) -> &'static str {
        match self {
            Self::Light => "",
            Self::Dark => "theme-dark",
        }
    }

    /// Parse a stored value. Anything but `"dark"` is the light theme.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        if value == "dark" { Self::Dark } else { Self::Light }
    }

    /// Read the theme from the session.
    ///
    /// # Errors
    ///
    /// Fails only when the session store itself fails.
    pub async fn load(session: &Session) -> Result<Self, SessionError> {
        let value = session.get::<Value>(keys::THEME).await?;
        Ok(value
            .as_ref()
            .and_then(Value::as_str)
            .map_or(Self::Light, Self::parse))
    }
}

/// Cart accessor bound to one request's session.
pub struct SessionCart<'a> {
    session: &'a Session,
}

impl<'a> SessionCart<'a> {
    #[must_use]
    pub const fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Read the stored cart. Never fails: a cart that does not decode,
    /// or a store that cannot be read, is an empty cart.
    pub async fn read(&self) -> Vec<CartLine> {
        cart_or_empty(self.session.get::<Value>(keys::CART).await)
    }

    /// Persist the cart.
    ///
    /// # Errors
    ///
    /// Fails when the session store rejects the write.
    pub async fn write(&self, lines: &[CartLine]) -> Result<(), SessionError> {
        self.session.insert(keys::CART, lines).await
    }

    /// Total quantity for the header badge, including the badge-only
    /// counter.
    pub async fn badge_total(&self) -> u32 {
        let lines = self.read().await;
        cart::total_qty(&lines).saturating_add(self.badge_boost().await)
    }

    /// Bump the badge-only counter used by add forms that carry no item
    /// details.
    ///
    /// # Errors
    ///
    /// Fails when the session store rejects the write.
    pub async fn boost_badge(&self, by: u32) -> Result<(), SessionError> {
        let next = self.badge_boost().await.saturating_add(by);
        self.session.insert(keys::BADGE_BOOST, next).await
    }

    async fn badge_boost(&self) -> u32 {
        match self.session.get::<Value>(keys::BADGE_BOOST).await {
            Ok(value) => value
                .as_ref()
                .and_then(Value::as_u64)
                .map_or(0, |v| u32::try_from(v).unwrap_or(u32::MAX)),
            Err(e) => {
                tracing::warn!("Failed to read badge counter from session store: {e}");
                0
            }
        }
    }
}

/// The read side of cart storage: a store failure degrades to the empty
/// cart instead of failing the page.
fn cart_or_empty(loaded: Result<Option<Value>, SessionError>) -> Vec<CartLine> {
    match loaded {
        Ok(value) => value.map(cart::lines_from_value).unwrap_or_default(),
        Err(e) => {
            tracing::warn!("Failed to read cart from session store: {e}");
            Vec::new()
        }
    }
}

/// Per-request header and footer state, loaded once per page render.
#[derive(Debug, Clone, Default)]
pub struct PageChrome {
    /// Cart badge number shown in the header.
    pub cart_badge: u32,
    /// Active colour theme.
    pub theme: Theme,
    /// Whether the cookie banner was dismissed.
    pub cookie_accepted: bool,
    /// Current search text, echoed into the header search box.
    pub search_q: String,
}

impl PageChrome {
    /// Load the chrome state from the session.
    ///
    /// # Errors
    ///
    /// Fails only when the session store itself fails.
    pub async fn load(session: &Session) -> Result<Self, SessionError> {
        let cookie_accepted = session
            .get::<Value>(keys::COOKIE_ACCEPTED)
            .await?
            .as_ref()
            .and_then(Value::as_str)
            == Some("1");
        Ok(Self {
            cart_badge: SessionCart::new(session).badge_total().await,
            theme: Theme::load(session).await?,
            cookie_accepted,
            search_q: String::new(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use tower_sessions::session_store;

    use super::*;

    #[test]
    fn cart_read_decodes_stored_lines() {
        let lines = cart_or_empty(Ok(Some(json!([
            {"id": "p-1", "title": "Холодильник LG 105", "price": 49_990, "qty": 2},
        ]))));
        assert_eq!(lines.len(), 1);
        assert_eq!(lines.first().map(|l| l.qty), Some(2));
    }

    #[test]
    fn cart_read_treats_absent_or_malformed_as_empty() {
        assert!(cart_or_empty(Ok(None)).is_empty());
        assert!(cart_or_empty(Ok(Some(json!({"id": "p-1"})))).is_empty());
    }

    #[test]
    fn cart_read_swallows_store_failures() {
        let failure = SessionError::Store(session_store::Error::Backend(
            "session store offline".to_string(),
        ));
        assert!(cart_or_empty(Err(failure)).is_empty());
    }

    #[test]
    fn theme_parse_defaults_to_light() {
        assert_eq!(Theme::parse("dark"), Theme::Dark);
        assert_eq!(Theme::parse("light"), Theme::Light);
        assert_eq!(Theme::parse("neon"), Theme::Light);
        assert_eq!(Theme::parse(""), Theme::Light);
    }

    #[test]
    fn theme_toggle_round_trips() {
        assert_eq!(Theme::Light.toggled(), Theme::Dark);
        assert_eq!(Theme::Dark.toggled(), Theme::Light);
        assert_eq!(Theme::Dark.toggled().toggled(), Theme::Dark);
    }

    #[test]
    fn theme_css_class_is_empty_for_light() {
        assert_eq!(Theme::Light.css_class(), "");
        assert_eq!(Theme::Dark.css_class(), "theme-dark");
    }
}
