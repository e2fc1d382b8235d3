//! Cart route handlers.
//!
//! Every cart operation is a plain HTML form POST followed by a redirect
//! and a full re-render. The cart itself lives in the session; writes are
//! best effort, so a hiccup in the store loses one update, not the page.

use askama::Template;
use askama_web::WebTemplate;
use axum::{Form, http::HeaderMap, response::Redirect};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use byttech_core::cart::{self, CartLine};
use byttech_core::price::format_rub;

use crate::error::Result;
use crate::filters;
use crate::models::{PageChrome, SessionCart};
use crate::routes::back_to;

/// Cart line display data for templates.
#[derive(Clone)]
pub struct CartRowView {
    pub index: usize,
    pub title: String,
    pub image: String,
    pub price: String,
    pub qty: u32,
}

impl CartRowView {
    fn from_line(index: usize, line: &CartLine) -> Self {
        Self {
            index,
            title: if line.title.is_empty() {
                "Товар".to_string()
            } else {
                line.title.clone()
            },
            image: line.image.clone(),
            price: format_rub(line.price),
            qty: line.qty,
        }
    }
}

/// Add to cart form data.
///
/// Every field is optional text. The payload mirrors product card markup
/// and is coerced, never validated.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub id: Option<String>,
    pub title: Option<String>,
    pub price: Option<String>,
    pub image: Option<String>,
    pub qty: Option<String>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub index: usize,
    pub delta: i64,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart.html")]
pub struct CartShowTemplate {
    pub chrome: PageChrome,
    pub rows: Vec<CartRowView>,
    pub total: String,
}

/// Checkout acknowledgement template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout.html")]
pub struct CheckoutTemplate {
    pub chrome: PageChrome,
}

/// Display the cart page.
#[instrument(skip(session))]
pub async fn show(session: Session) -> Result<CartShowTemplate> {
    let chrome = PageChrome::load(&session).await?;
    let lines = SessionCart::new(&session).read().await;
    let rows = lines
        .iter()
        .enumerate()
        .map(|(index, line)| CartRowView::from_line(index, line))
        .collect();
    let total = format_rub(cart::subtotal(&lines));
    Ok(CartShowTemplate {
        chrome,
        rows,
        total,
    })
}

/// Add an item to the cart and bounce back to the originating page.
///
/// A payload without `id` or `title` comes from legacy markup: it bumps
/// the badge-only counter and leaves the cart lines untouched.
#[instrument(skip(session, headers))]
pub async fn add(
    session: Session,
    headers: HeaderMap,
    Form(form): Form<AddToCartForm>,
) -> Result<Redirect> {
    let store = SessionCart::new(&session);

    let id = form.id.unwrap_or_default();
    let title = form.title.unwrap_or_default();
    if id.is_empty() || title.is_empty() {
        if let Err(e) = store.boost_badge(1).await {
            tracing::warn!("Failed to persist badge counter: {e}");
        }
        return Ok(back_to(&headers, "/catalog"));
    }

    let line = CartLine {
        id,
        title,
        price: cart::price_from_str(form.price.as_deref().unwrap_or_default()),
        image: form.image.unwrap_or_default(),
        qty: cart::qty_from_str(form.qty.as_deref().unwrap_or_default()),
    };

    let mut lines = store.read().await;
    cart::add_line(&mut lines, line);
    if let Err(e) = store.write(&lines).await {
        tracing::warn!("Failed to persist cart: {e}");
    }

    Ok(back_to(&headers, "/catalog"))
}

/// Change a line quantity. The remove button posts a delta of -9999,
/// which drives any quantity to zero.
#[instrument(skip(session))]
pub async fn update(session: Session, Form(form): Form<UpdateCartForm>) -> Result<Redirect> {
    let store = SessionCart::new(&session);
    let mut lines = store.read().await;
    cart::update_qty(&mut lines, form.index, form.delta);
    if let Err(e) = store.write(&lines).await {
        tracing::warn!("Failed to persist cart: {e}");
    }
    Ok(Redirect::to("/cart"))
}

/// Demo checkout acknowledgement. The cart is deliberately left as is.
#[instrument(skip(session))]
pub async fn checkout(session: Session) -> Result<CheckoutTemplate> {
    let chrome = PageChrome::load(&session).await?;
    Ok(CheckoutTemplate { chrome })
}
