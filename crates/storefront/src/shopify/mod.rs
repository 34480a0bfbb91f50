//! Shopify Storefront API adapter.
//!
//! # Architecture
//!
//! - Operations are `graphql_client` [`GraphQLQuery`] types; documents live in
//!   `graphql/storefront/`
//! - [`Execute`] is the seam between cart/catalog logic and the transport.
//!   [`StorefrontClient`] implements it over HTTP; tests substitute a
//!   recording executor
//! - Payloads are normalized into `cartwheel_core` types before they leave
//!   this module
//!
//! # Example
//!
//! ```rust,ignore
//! use cartwheel_storefront::shopify::{Execute, StorefrontClient};
//! use cartwheel_storefront::shopify::queries::{GetCart, get_cart};
//!
//! let client = StorefrontClient::new(&config.shopify);
//! let data = client
//!     .execute::<GetCart>(get_cart::Variables { cart_id })
//!     .await?;
//! ```

mod storefront;
pub mod types;

use std::future::Future;

use graphql_client::GraphQLQuery;
use thiserror::Error;

pub use storefront::conversions;
pub use storefront::queries;
pub use storefront::{StorefrontClient, StorefrontToken};

/// Errors that can occur when talking to the Storefront API.
#[derive(Debug, Error)]
pub enum ShopifyError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// GraphQL query returned errors.
    #[error("GraphQL errors: {}", format_graphql_errors(.0))]
    GraphQL(Vec<GraphQLError>),

    /// JSON parsing failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Rate limited by Shopify.
    #[error("Rate limited, retry after {0} seconds")]
    RateLimited(u64),

    /// User error from a cart mutation (e.g., invalid merchandise id).
    #[error("User error: {0}")]
    UserError(String),
}

impl ShopifyError {
    /// Build a single-message GraphQL error.
    pub(crate) fn message(message: impl Into<String>) -> Self {
        Self::GraphQL(vec![GraphQLError {
            message: message.into(),
            locations: vec![],
            path: vec![],
        }])
    }
}

/// A GraphQL error returned by the Storefront API.
#[derive(Debug, Clone)]
pub struct GraphQLError {
    /// Error message.
    pub message: String,
    /// Source locations in the query.
    pub locations: Vec<GraphQLErrorLocation>,
    /// Path to the error in the response.
    pub path: Vec<serde_json::Value>,
}

/// Location in a GraphQL document where an error occurred.
#[derive(Debug, Clone)]
pub struct GraphQLErrorLocation {
    /// Line number (1-indexed).
    pub line: i64,
    /// Column number (1-indexed).
    pub column: i64,
}

fn format_graphql_errors(errors: &[GraphQLError]) -> String {
    if errors.is_empty() {
        return "(no error details provided)".to_string();
    }

    errors
        .iter()
        .enumerate()
        .map(|(i, e)| {
            let mut parts = Vec::new();

            if !e.message.is_empty() {
                parts.push(e.message.clone());
            }

            if !e.path.is_empty() {
                let path_str = e
                    .path
                    .iter()
                    .map(|p| match p {
                        serde_json::Value::String(s) => s.clone(),
                        other => other.to_string(),
                    })
                    .collect::<Vec<_>>()
                    .join(".");
                parts.push(format!("path: {path_str}"));
            }

            if let Some(loc) = e.locations.first() {
                parts.push(format!("at line {}:{}", loc.line, loc.column));
            }

            if parts.is_empty() {
                format!("[error {}]: (no details)", i + 1)
            } else {
                parts.join(" ")
            }
        })
        .collect::<Vec<_>>()
        .join("; ")
}

/// Executes GraphQL operations against the commerce backend.
///
/// Implementors report transport, protocol and GraphQL-level failures as
/// [`ShopifyError`]. Mutation user errors are left in the payload for the
/// caller to inspect.
pub trait Execute: Send + Sync + 'static {
    /// Run one operation and return its data.
    fn execute<Q>(
        &self,
        variables: Q::Variables,
    ) -> impl Future<Output = Result<Q::ResponseData, ShopifyError>> + Send
    where
        Q: GraphQLQuery,
        Q::Variables: Send,
        Q::ResponseData: Send;
}
