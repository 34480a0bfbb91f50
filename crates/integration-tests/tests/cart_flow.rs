//! End-to-end cart flow over HTTP.
//!
//! Drives a `Commerce` handle backed by a real `StorefrontClient` against a
//! `wiremock` server: create a cart, update a line, remove it, then read the
//! cart back from a fresh handle sharing the same cookies.

#![allow(clippy::unwrap_used, clippy::indexing_slicing, clippy::float_cmp)]

use std::sync::Arc;
use std::time::Duration;

use cartwheel_integration_tests::{cart_json, cart_mutation, client, graphql_data};
use cartwheel_storefront::Commerce;
use cartwheel_storefront::cache::{CacheKey, CacheValue};
use cartwheel_storefront::cart::{CartItemBody, RemoveItemInput, UpdateItemInput, UpdateOutcome};
use cartwheel_storefront::config::CommerceConfig;
use cartwheel_storefront::identity::{CookieStore, MemoryCookieStore};
use cartwheel_storefront::shopify::StorefrontClient;
use serde_json::json;
use wiremock::matchers::{body_partial_json, method};
use wiremock::{Mock, MockServer, ResponseTemplate};

const CART_ID: &str = "gid://shopify/Cart/c1";

fn config() -> CommerceConfig {
    CommerceConfig {
        update_debounce: Duration::from_millis(20),
        ..CommerceConfig::default()
    }
}

fn commerce(
    server: &MockServer,
    cookies: &Arc<MemoryCookieStore>,
) -> Commerce<StorefrontClient, Arc<MemoryCookieStore>> {
    Commerce::new(client(server), Arc::clone(cookies), &config())
}

async fn mount_operation(server: &MockServer, operation: &str, body: serde_json::Value) {
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": operation })))
        .respond_with(ResponseTemplate::new(200).set_body_json(body))
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_create_update_remove_flow() {
    let server = MockServer::start().await;
    let cookies = Arc::new(MemoryCookieStore::new());
    let commerce = commerce(&server, &cookies);

    // Create
    mount_operation(
        &server,
        "createCart",
        cart_mutation("cartCreate", cart_json(CART_ID, &[("line-1", 1)])),
    )
    .await;

    let cart = commerce
        .add_item()
        .add(CartItemBody::new("gid://shopify/ProductVariant/100"))
        .await
        .unwrap();

    assert_eq!(cart.id.as_str(), CART_ID);
    assert_eq!(cart.total_price, 27.5);
    assert!(cart.taxes_included);
    assert_eq!(cart.line_items[0].options.len(), 2);
    assert_eq!(cart.line_items[0].variant.sku, "TEE-L-BLU");
    assert_eq!(cart.line_items[0].variant.list_price, None);
    assert_eq!(cookies.get("shopify_cartId").as_deref(), Some(CART_ID));
    assert_eq!(
        cookies.get("shopify_checkoutUrl").as_deref(),
        Some("https://shop.example/checkouts/c1")
    );

    // Update
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "editCartItems",
            "variables": { "cartId": CART_ID, "lines": [{ "id": "line-1", "quantity": 3 }] }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(cart_mutation("cartLinesUpdate", cart_json(CART_ID, &[("line-1", 3)]))),
        )
        .expect(1)
        .mount(&server)
        .await;

    let hook = commerce.update_item(Some(cart.line_items[0].clone()));
    let outcome = hook.update(UpdateItemInput::quantity(3)).await.unwrap();
    let UpdateOutcome::Applied(cart) = outcome else {
        panic!("single update was superseded");
    };
    assert_eq!(cart.total_quantity, 3);

    // Remove
    mount_operation(
        &server,
        "removeFromCart",
        cart_mutation("cartLinesRemove", cart_json(CART_ID, &[])),
    )
    .await;

    let cart = commerce
        .remove_item(None)
        .remove(RemoveItemInput::new("line-1"))
        .await
        .unwrap();
    assert!(cart.is_empty());

    // The shared cart slot holds the latest mutation
    let current = commerce.use_cart().get().await.unwrap().unwrap();
    assert!(current.is_empty());
}

#[tokio::test]
async fn test_fresh_handle_reads_cart_from_cookie() {
    let server = MockServer::start().await;
    let cookies = Arc::new(MemoryCookieStore::new());

    mount_operation(
        &server,
        "createCart",
        cart_mutation("cartCreate", cart_json(CART_ID, &[("line-1", 2)])),
    )
    .await;
    Mock::given(method("POST"))
        .and(body_partial_json(json!({
            "operationName": "getCart",
            "variables": { "cartId": CART_ID }
        })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(graphql_data(json!({ "cart": cart_json(CART_ID, &[("line-1", 2)]) }))),
        )
        .expect(1)
        .mount(&server)
        .await;

    commerce(&server, &cookies)
        .add_item()
        .add(CartItemBody::new("gid://shopify/ProductVariant/100").with_quantity(2))
        .await
        .unwrap();

    // New handle, empty cache, same cookies
    let cart = commerce(&server, &cookies)
        .use_cart()
        .get()
        .await
        .unwrap()
        .unwrap();
    assert_eq!(cart.total_quantity, 2);
}

#[tokio::test]
async fn test_expired_cart_clears_identity() {
    let server = MockServer::start().await;
    let cookies = Arc::new(MemoryCookieStore::new());
    let commerce = commerce(&server, &cookies);

    commerce
        .identity()
        .set_cart_id(&CART_ID.into(), "https://shop.example/checkouts/c1")
        .unwrap();
    mount_operation(&server, "getCart", graphql_data(json!({ "cart": null }))).await;

    assert!(commerce.use_cart().get().await.unwrap().is_none());
    assert!(cookies.get("shopify_cartId").is_none());
    assert!(cookies.get("shopify_checkoutUrl").is_none());
}

#[tokio::test]
async fn test_user_errors_leave_cart_slot_untouched() {
    let server = MockServer::start().await;
    let cookies = Arc::new(MemoryCookieStore::new());
    let commerce = commerce(&server, &cookies);

    commerce
        .identity()
        .set_cart_id(&CART_ID.into(), "https://shop.example/checkouts/c1")
        .unwrap();
    Mock::given(method("POST"))
        .and(body_partial_json(json!({ "operationName": "addToCart" })))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(cart_mutation("cartLinesAdd", cart_json(CART_ID, &[("line-1", 1)]))),
        )
        .up_to_n_times(1)
        .mount(&server)
        .await;
    mount_operation(
        &server,
        "addToCart",
        graphql_data(json!({
            "cartLinesAdd": {
                "cart": null,
                "userErrors": [
                    { "field": ["lines", "0"], "message": "Variant is sold out" },
                    { "message": "Cart is locked" }
                ]
            }
        })),
    )
    .await;

    commerce
        .add_item()
        .add(CartItemBody::new("gid://shopify/ProductVariant/100"))
        .await
        .unwrap();

    let err = commerce
        .add_item()
        .add(CartItemBody::new("gid://shopify/ProductVariant/100"))
        .await
        .unwrap_err();

    assert!(!err.is_validation());
    assert!(
        err.to_string()
            .contains("Variant is sold out; Cart is locked"),
        "got: {err}"
    );
    let cached = commerce.cache().get(&CacheKey::Cart).await;
    assert!(
        matches!(&cached, Some(CacheValue::Cart(Some(cart))) if cart.total_quantity == 1),
        "got: {cached:?}"
    );
}

#[tokio::test]
async fn test_validation_failure_makes_no_requests() {
    let server = MockServer::start().await;
    let cookies = Arc::new(MemoryCookieStore::new());
    let commerce = commerce(&server, &cookies);

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500))
        .expect(0)
        .mount(&server)
        .await;

    let err = commerce
        .remove_item(None)
        .remove(RemoveItemInput::default())
        .await
        .unwrap_err();

    assert!(err.is_validation());
}
