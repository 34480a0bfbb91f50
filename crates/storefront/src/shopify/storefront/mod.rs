//! Shopify Storefront API client implementation.
//!
//! Uses `graphql_client` request/response envelopes with `reqwest` 0.13 for
//! HTTP. The client is stateless beyond its connection pool; caching happens
//! in [`crate::cache::StoreCache`].

pub mod conversions;
pub mod queries;
pub mod scalars;

use std::future::Future;
use std::sync::Arc;

use graphql_client::{GraphQLQuery, PathFragment, Response};
use secrecy::{ExposeSecret, SecretString};
use tracing::{Span, instrument};

use crate::config::ShopifyStorefrontConfig;
use crate::shopify::{Execute, GraphQLError, GraphQLErrorLocation, ShopifyError};

/// Characters of a response body kept in logs.
const LOGGED_BODY_CHARS: usize = 500;

/// Characters of a response body kept in error messages.
const ERROR_BODY_CHARS: usize = 200;

// =============================================================================
// StorefrontToken
// =============================================================================

/// Storefront API access token.
///
/// Public tokens are safe to ship to browsers; private tokens are
/// server-side only and sent under a different header.
#[derive(Clone)]
pub enum StorefrontToken {
    /// Public access token (`X-Shopify-Storefront-Access-Token`).
    Public(String),
    /// Private access token (`Shopify-Storefront-Private-Token`).
    Private(SecretString),
}

impl StorefrontToken {
    /// Request header carrying this token.
    #[must_use]
    pub const fn header_name(&self) -> &'static str {
        match self {
            Self::Public(_) => "X-Shopify-Storefront-Access-Token",
            Self::Private(_) => "Shopify-Storefront-Private-Token",
        }
    }

    fn expose(&self) -> &str {
        match self {
            Self::Public(token) => token,
            Self::Private(token) => token.expose_secret(),
        }
    }
}

impl std::fmt::Debug for StorefrontToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Public(token) => f.debug_tuple("Public").field(token).finish(),
            Self::Private(_) => f.debug_tuple("Private").field(&"[REDACTED]").finish(),
        }
    }
}

// =============================================================================
// StorefrontClient
// =============================================================================

/// Client for the Shopify Storefront API.
///
/// Cheap to clone; clones share one connection pool.
#[derive(Clone)]
pub struct StorefrontClient {
    inner: Arc<StorefrontClientInner>,
}

struct StorefrontClientInner {
    client: reqwest::Client,
    endpoint: String,
    token: StorefrontToken,
}

impl StorefrontClient {
    /// Create a client for the configured store.
    #[must_use]
    pub fn new(config: &ShopifyStorefrontConfig) -> Self {
        Self::with_endpoint(config.endpoint(), config.token.clone())
    }

    /// Create a client for an explicit GraphQL endpoint.
    #[must_use]
    pub fn with_endpoint(endpoint: impl Into<String>, token: StorefrontToken) -> Self {
        Self {
            inner: Arc::new(StorefrontClientInner {
                client: reqwest::Client::new(),
                endpoint: endpoint.into(),
                token,
            }),
        }
    }

    /// The GraphQL endpoint requests go to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.inner.endpoint
    }

    #[instrument(skip_all, fields(operation = tracing::field::Empty))]
    async fn post<Q: GraphQLQuery>(
        &self,
        variables: Q::Variables,
    ) -> Result<Q::ResponseData, ShopifyError> {
        let request_body = Q::build_query(variables);
        Span::current().record("operation", request_body.operation_name);

        let response = self
            .inner
            .client
            .post(&self.inner.endpoint)
            .header(self.inner.token.header_name(), self.inner.token.expose())
            .header("Content-Type", "application/json")
            .json(&request_body)
            .send()
            .await?;

        let status = response.status();

        if status == reqwest::StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse::<u64>().ok())
                .unwrap_or(1);
            tracing::warn!(retry_after, "Storefront API rate limited");
            return Err(ShopifyError::RateLimited(retry_after));
        }

        // Read as text first so failures can log the body
        let response_text = response.text().await?;

        if !status.is_success() {
            tracing::error!(
                status = %status,
                body = %truncate(&response_text, LOGGED_BODY_CHARS),
                "Storefront API returned non-success status"
            );
            return Err(ShopifyError::message(format!(
                "HTTP {status}: {}",
                truncate(&response_text, ERROR_BODY_CHARS)
            )));
        }

        let response: Response<Q::ResponseData> = match serde_json::from_str(&response_text) {
            Ok(r) => r,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %truncate(&response_text, LOGGED_BODY_CHARS),
                    "Failed to parse Storefront GraphQL response"
                );
                return Err(ShopifyError::Parse(e));
            }
        };

        if let Some(errors) = response.errors
            && !errors.is_empty()
        {
            tracing::debug!(errors = ?errors, "GraphQL errors in response");
            return Err(ShopifyError::GraphQL(
                errors.into_iter().map(convert_graphql_error).collect(),
            ));
        }

        response.data.ok_or_else(|| {
            tracing::error!(
                body = %truncate(&response_text, LOGGED_BODY_CHARS),
                "Storefront GraphQL response has no data and no errors"
            );
            ShopifyError::message("No data in response")
        })
    }
}

impl Execute for StorefrontClient {
    fn execute<Q>(
        &self,
        variables: Q::Variables,
    ) -> impl Future<Output = Result<Q::ResponseData, ShopifyError>> + Send
    where
        Q: GraphQLQuery,
        Q::Variables: Send,
        Q::ResponseData: Send,
    {
        self.post::<Q>(variables)
    }
}

fn convert_graphql_error(error: graphql_client::Error) -> GraphQLError {
    GraphQLError {
        message: error.message,
        locations: error.locations.map_or_else(Vec::new, |locs| {
            locs.into_iter()
                .map(|l| GraphQLErrorLocation {
                    line: i64::from(l.line),
                    column: i64::from(l.column),
                })
                .collect()
        }),
        path: error.path.map_or_else(Vec::new, |p| {
            p.into_iter()
                .map(|fragment| match fragment {
                    PathFragment::Key(s) => serde_json::Value::String(s),
                    PathFragment::Index(i) => serde_json::Value::Number(i.into()),
                })
                .collect()
        }),
    }
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}
