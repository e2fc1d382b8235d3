//! Integration tests for the cart flows.
//!
//! Every mutation here is a form POST answered with `303 See Other`, the
//! way a browser without scripts drives the storefront. The shared client
//! keeps one session cookie across a whole flow.
//!
//! Requires a running storefront:
//!
//! ```bash
//! cargo run -p byttech-storefront
//! ```
//!
//! Run with: cargo test -p byttech-integration-tests -- --include-ignored

use byttech_integration_tests::{base_url, client};
use reqwest::header::REFERER;
use reqwest::{Client, StatusCode};

/// Add one product through the same form a product card renders.
async fn add_product(client: &Client, base_url: &str, id: &str, title: &str, price: &str) {
    let resp = client
        .post(format!("{base_url}/cart/add"))
        .form(&[
            ("id", id),
            ("title", title),
            ("price", price),
            ("image", "/static/images/cat1.svg"),
            ("qty", "1"),
        ])
        .send()
        .await
        .expect("Failed to add product to cart");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
}

/// Fetch the cart page body.
async fn cart_page(client: &Client, base_url: &str) -> String {
    let resp = client
        .get(format!("{base_url}/cart"))
        .send()
        .await
        .expect("Failed to get cart page");

    assert_eq!(resp.status(), StatusCode::OK);
    resp.text().await.expect("Failed to read response")
}

// ============================================================================
// Add Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn add_to_cart_redirects_and_sets_the_badge() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .form(&[
            ("id", "p-1"),
            ("title", "Духовой шкаф Miele 101"),
            ("price", "15990"),
            ("image", "/static/images/hero1.svg"),
            ("qty", "1"),
        ])
        .send()
        .await
        .expect("Failed to add product to cart");

    // Without a referrer the handler falls back to the catalog.
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");
    assert_eq!(location, "/catalog");

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Духовой шкаф Miele 101"));
    assert!(body.contains(r#"class="cart-count">1<"#));
    assert!(body.contains("15\u{a0}990 ₽"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn adding_the_same_product_twice_merges_into_one_line() {
    let client = client();
    let base_url = base_url();

    add_product(&client, &base_url, "p-7", "Холодильник Bosch 107", "42500").await;
    add_product(&client, &base_url, "p-7", "Холодильник Bosch 107", "42500").await;

    let body = cart_page(&client, &base_url).await;
    assert_eq!(body.matches(r#"class="cart-item""#).count(), 1);
    assert!(body.contains(r#"class="qty">2<"#));
    assert!(body.contains(r#"class="cart-count">2<"#));
    assert!(body.contains("85\u{a0}000 ₽"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn add_follows_the_referrer_back_to_the_filtered_page() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .header(REFERER, format!("{base_url}/catalog?page=2&sort=new"))
        .form(&[
            ("id", "p-3"),
            ("title", "Варочная панель Siemens 103"),
            ("price", "19990"),
            ("image", "/static/images/hero2.svg"),
            ("qty", "1"),
        ])
        .send()
        .await
        .expect("Failed to add product to cart");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");
    assert_eq!(location, "/catalog?page=2&sort=new");
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn legacy_add_without_product_data_only_bumps_the_badge() {
    let client = client();
    let base_url = base_url();

    let resp = client
        .post(format!("{base_url}/cart/add"))
        .form(&[("qty", "1")])
        .send()
        .await
        .expect("Failed to post legacy add");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Ваша корзина пуста."));
    assert!(body.contains(r#"class="cart-count">1<"#));
}

// ============================================================================
// Update & Remove Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn quantity_buttons_adjust_a_line() {
    let client = client();
    let base_url = base_url();

    add_product(&client, &base_url, "p-2", "Варочная панель Bosch 102", "21000").await;

    let resp = client
        .post(format!("{base_url}/cart/update"))
        .form(&[("index", "0"), ("delta", "1")])
        .send()
        .await
        .expect("Failed to update quantity");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    let location = resp
        .headers()
        .get("location")
        .and_then(|v| v.to_str().ok())
        .expect("Missing Location header");
    assert_eq!(location, "/cart");

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains(r#"class="qty">2<"#));
    assert!(body.contains("42\u{a0}000 ₽"));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn decrement_to_zero_removes_the_line() {
    let client = client();
    let base_url = base_url();

    add_product(&client, &base_url, "p-4", "Посудомоечная машина AEG 104", "33000").await;

    let resp = client
        .post(format!("{base_url}/cart/update"))
        .form(&[("index", "0"), ("delta", "-1")])
        .send()
        .await
        .expect("Failed to decrement quantity");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Ваша корзина пуста."));
    assert!(body.contains(r#"class="cart-count">0<"#));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn remove_button_drops_the_line_outright() {
    let client = client();
    let base_url = base_url();

    add_product(&client, &base_url, "p-5", "Стиральная машина Samsung 105", "28500").await;
    add_product(&client, &base_url, "p-5", "Стиральная машина Samsung 105", "28500").await;

    let resp = client
        .post(format!("{base_url}/cart/update"))
        .form(&[("index", "0"), ("delta", "-9999")])
        .send()
        .await
        .expect("Failed to remove line");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Ваша корзина пуста."));
}

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn out_of_range_update_leaves_the_cart_alone() {
    let client = client();
    let base_url = base_url();

    add_product(&client, &base_url, "p-6", "Духовой шкаф LG 106", "24990").await;

    let resp = client
        .post(format!("{base_url}/cart/update"))
        .form(&[("index", "5"), ("delta", "-9999")])
        .send()
        .await
        .expect("Failed to post update");

    assert_eq!(resp.status(), StatusCode::SEE_OTHER);

    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Духовой шкаф LG 106"));
    assert!(body.contains(r#"class="qty">1<"#));
}

// ============================================================================
// Checkout Tests
// ============================================================================

#[tokio::test]
#[ignore = "Requires running storefront server"]
async fn checkout_shows_the_demo_notice_and_keeps_the_cart() {
    let client = client();
    let base_url = base_url();

    add_product(&client, &base_url, "p-8", "Холодильник Siemens 108", "55000").await;

    let resp = client
        .post(format!("{base_url}/cart/checkout"))
        .send()
        .await
        .expect("Failed to post checkout");

    assert_eq!(resp.status(), StatusCode::OK);
    let body = resp.text().await.expect("Failed to read response");
    assert!(body.contains("Оформление заказа: демо."));

    // The demo keeps the cart so the flow can be replayed.
    let body = cart_page(&client, &base_url).await;
    assert!(body.contains("Холодильник Siemens 108"));
}
