//! Test doubles and payload fixtures.

use std::collections::{HashMap, VecDeque};
use std::future::Future;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use graphql_client::GraphQLQuery;
use serde_json::{Value, json};

use crate::commerce::Commerce;
use crate::config::CommerceConfig;
use crate::identity::MemoryCookieStore;
use crate::shopify::{Execute, ShopifyError};

/// One operation as the executor saw it.
#[derive(Debug, Clone)]
pub struct RecordedCall {
    pub operation: &'static str,
    pub variables: Value,
}

#[derive(Debug, Clone)]
enum Reply {
    Data { data: Value, delay: Duration },
    Error(String),
}

/// Executor that records every call and answers with canned data.
///
/// Replies are queued per operation name; the last queued reply repeats.
#[derive(Debug, Default)]
pub struct RecordingExecutor {
    calls: Mutex<Vec<RecordedCall>>,
    replies: Mutex<HashMap<&'static str, VecDeque<Reply>>>,
}

impl RecordingExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, operation: &'static str, data: Value) {
        self.respond_after(operation, data, Duration::ZERO);
    }

    pub fn respond_after(&self, operation: &'static str, data: Value, delay: Duration) {
        self.queue(operation, Reply::Data { data, delay });
    }

    pub fn fail(&self, operation: &'static str, message: &str) {
        self.queue(operation, Reply::Error(message.to_string()));
    }

    pub fn calls(&self) -> Vec<RecordedCall> {
        lock(&self.calls).clone()
    }

    pub fn operations(&self) -> Vec<&'static str> {
        lock(&self.calls).iter().map(|call| call.operation).collect()
    }

    fn queue(&self, operation: &'static str, reply: Reply) {
        lock(&self.replies)
            .entry(operation)
            .or_default()
            .push_back(reply);
    }

    fn next_reply(&self, operation: &str) -> Option<Reply> {
        let mut replies = lock(&self.replies);
        let queue = replies.get_mut(operation)?;
        if queue.len() > 1 {
            queue.pop_front()
        } else {
            queue.front().cloned()
        }
    }
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(PoisonError::into_inner)
}

impl Execute for RecordingExecutor {
    fn execute<Q>(
        &self,
        variables: Q::Variables,
    ) -> impl Future<Output = Result<Q::ResponseData, ShopifyError>> + Send
    where
        Q: GraphQLQuery,
        Q::Variables: Send,
        Q::ResponseData: Send,
    {
        let body = Q::build_query(variables);
        let operation = body.operation_name;
        lock(&self.calls).push(RecordedCall {
            operation,
            variables: serde_json::to_value(&body.variables).unwrap_or(Value::Null),
        });
        let reply = self.next_reply(operation);

        async move {
            match reply {
                Some(Reply::Data { data, delay }) => {
                    if !delay.is_zero() {
                        tokio::time::sleep(delay).await;
                    }
                    serde_json::from_value::<Q::ResponseData>(data).map_err(ShopifyError::Parse)
                }
                Some(Reply::Error(message)) => Err(ShopifyError::message(message)),
                None => Err(ShopifyError::NotFound(format!(
                    "no canned reply for {operation}"
                ))),
            }
        }
    }
}

/// A commerce handle over a fresh recording executor and cookie jar.
pub fn commerce() -> (
    Commerce<RecordingExecutor, Arc<MemoryCookieStore>>,
    Arc<MemoryCookieStore>,
) {
    let cookies = Arc::new(MemoryCookieStore::new());
    let commerce = Commerce::new(
        RecordingExecutor::new(),
        Arc::clone(&cookies),
        &CommerceConfig::default(),
    );
    (commerce, cookies)
}

// =============================================================================
// Payload fixtures
// =============================================================================

/// A cart payload with one line per `(line_id, quantity)`.
pub fn cart_payload(cart_id: &str, lines: &[(&str, i64)]) -> Value {
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
                        "title": "Default Title",
                        "price": { "amount": "10.00", "currencyCode": "USD" },
                        "product": {
                            "id": "gid://shopify/Product/1",
                            "handle": "classic-tee",
                            "title": "Classic Tee"
                        }
                    }
                }
            })
        })
        .collect();
    let total: i64 = lines.iter().map(|(_, quantity)| quantity).sum();

    json!({
        "id": cart_id,
        "checkoutUrl": format!("https://shop.example/checkouts/{total}"),
        "totalQuantity": total,
        "cost": {
            "subtotalAmount": { "amount": "10.00", "currencyCode": "USD" },
            "totalAmount": { "amount": "10.00", "currencyCode": "USD" }
        },
        "lines": { "edges": edges }
    })
}

/// Response data for a cart mutation whose payload field is `field`.
pub fn mutation_response(field: &str, cart: Value) -> Value {
    let mut response = serde_json::Map::new();
    response.insert(
        field.to_string(),
        json!({ "cart": cart, "userErrors": [] }),
    );
    Value::Object(response)
}

/// A minimal product payload.
pub fn product_payload(handle: &str, vendor: &str) -> Value {
    json!({
        "id": format!("gid://shopify/Product/{handle}"),
        "handle": handle,
        "title": handle,
        "vendor": vendor,
        "priceRange": { "minVariantPrice": { "amount": "5.00", "currencyCode": "USD" } }
    })
}
