//! Integration tests for Cartwheel.
//!
//! Tests stand up a `wiremock` server in place of the Storefront API, so no
//! real network traffic is made and no credentials are needed.
//!
//! ```bash
//! cargo test -p cartwheel-integration-tests
//! ```
//!
//! This library holds the shared fixtures.

use cartwheel_storefront::shopify::{StorefrontClient, StorefrontToken};
use serde_json::{Value, json};
use wiremock::MockServer;

/// API version used in mock endpoint paths.
pub const API_VERSION: &str = "2025-01";

/// Public token the mock server expects.
pub const PUBLIC_TOKEN: &str = "test-public-token";

/// Path of the Storefront GraphQL endpoint.
#[must_use]
pub fn graphql_path() -> String {
    format!("/api/{API_VERSION}/graphql.json")
}

/// A client pointed at the mock server, authenticating with [`PUBLIC_TOKEN`].
#[must_use]
pub fn client(server: &MockServer) -> StorefrontClient {
    client_with_token(server, StorefrontToken::Public(PUBLIC_TOKEN.to_string()))
}

/// A client pointed at the mock server with a specific token.
#[must_use]
pub fn client_with_token(server: &MockServer, token: StorefrontToken) -> StorefrontClient {
    StorefrontClient::with_endpoint(format!("{}{}", server.uri(), graphql_path()), token)
}

/// Wrap data in a GraphQL response envelope.
#[must_use]
pub fn graphql_data(data: Value) -> Value {
    json!({ "data": data })
}

/// A cart payload with one line per `(line_id, quantity)`.
#[must_use]
pub fn cart_json(cart_id: &str, lines: &[(&str, i64)]) -> Value {
    let edges: Vec<Value> = lines
        .iter()
        .map(|(line_id, quantity)| {
            json!({
                "node": {
                    "__typename": "CartLine",
                    "id": line_id,
                    "quantity": quantity,
                    "merchandise": {
                        "id": "gid://shopify/ProductVariant/100",
                        "title": "Large / Blue",
                        "sku": "TEE-L-BLU",
                        "requiresShipping": true,
                        "selectedOptions": [
                            { "name": "Size", "value": "Large" },
                            { "name": "Color", "value": "Blue" }
                        ],
                        "price": { "amount": "25.00", "currencyCode": "USD" },
                        "compareAtPrice": null,
                        "product": {
                            "id": "gid://shopify/Product/1",
                            "handle": "classic-tee",
                            "title": "Classic Tee",
                            "vendor": "Acme"
                        }
                    }
                }
            })
        })
        .collect();
    let total: i64 = lines.iter().map(|(_, quantity)| quantity).sum();

    json!({
        "id": cart_id,
        "createdAt": "2025-01-15T10:30:00Z",
        "checkoutUrl": "https://shop.example/checkouts/c1",
        "totalQuantity": total,
        "cost": {
            "subtotalAmount": { "amount": "25.00", "currencyCode": "USD" },
            "totalAmount": { "amount": "27.50", "currencyCode": "USD" },
            "totalTaxAmount": { "amount": "2.50", "currencyCode": "USD" }
        },
        "discountAllocations": [],
        "lines": { "edges": edges }
    })
}

/// Response data for a cart mutation whose payload field is `field`.
#[must_use]
pub fn cart_mutation(field: &str, cart: Value) -> Value {
    let mut data = serde_json::Map::new();
    data.insert(field.to_string(), json!({ "cart": cart, "userErrors": [] }));
    graphql_data(Value::Object(data))
}
