//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `SHOPIFY_STORE` - Shopify store domain (e.g., your-store.myshopify.com)
//! - `SHOPIFY_STOREFRONT_PUBLIC_TOKEN` - Storefront API public access token,
//!   required unless a private token is set
//!
//! ## Optional
//! - `SHOPIFY_STOREFRONT_PRIVATE_TOKEN` - Storefront API private access token
//!   (server-side only, preferred over the public token when set)
//! - `SHOPIFY_API_VERSION` - API version (default: 2025-01)
//! - `CART_COOKIE_NAMESPACE` - Cart cookie name prefix (default: shopify)
//! - `CART_COOKIE_EXPIRY_DAYS` - Cart cookie lifetime in days, 1 to 400 (default: 30)
//! - `CART_COOKIE_SAME_SITE` - `strict`, `lax` or `none` (default: none)
//! - `CART_COOKIE_SECURE` - Whether cart cookies are HTTPS-only (default: true)
//! - `CART_UPDATE_DEBOUNCE_MS` - Quiet period before a line update is sent (default: 500)
//! - `CATALOG_CACHE_TTL_SECS` - Catalog cache lifetime, at most 30 days (default: 300)
//! - `SENTRY_DSN` - Sentry error tracking DSN

use std::collections::HashMap;
use std::fmt::Display;
use std::str::FromStr;
use std::time::Duration;

use cookie::SameSite;
use secrecy::SecretString;
use thiserror::Error;
use url::Url;

use crate::shopify::StorefrontToken;

const DEFAULT_API_VERSION: &str = "2025-01";
const DEFAULT_COOKIE_NAMESPACE: &str = "shopify";
const DEFAULT_COOKIE_EXPIRY_DAYS: i64 = 30;
const DEFAULT_UPDATE_DEBOUNCE_MS: u64 = 500;
const DEFAULT_CATALOG_CACHE_TTL_SECS: u64 = 300;

/// Longest cart cookie lifetime browsers honor.
pub const MAX_COOKIE_EXPIRY_DAYS: i64 = 400;

/// Longest catalog cache lifetime.
pub const MAX_CATALOG_CACHE_TTL: Duration = Duration::from_secs(30 * 24 * 60 * 60);

const MIN_ENTROPY_BITS_PER_CHAR: f64 = 3.3;

/// Blocklist of common placeholder patterns (case-insensitive)
const PLACEHOLDER_PATTERNS: &[&str] = &[
    "your-",
    "changeme",
    "replace",
    "placeholder",
    "example",
    "secret",
    "password",
    "xxx",
    "todo",
    "fixme",
    "insert",
    "enter-",
    "put-your",
    "add-your",
];

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
    #[error("Insecure secret in {0}: {1}")]
    InsecureSecret(String, String),
}

/// Top-level configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// Shopify Storefront API configuration
    pub shopify: ShopifyStorefrontConfig,
    /// Cart and catalog behavior
    pub commerce: CommerceConfig,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
}

/// Shopify Storefront API configuration.
///
/// `Debug` goes through [`StorefrontToken`], which redacts private tokens.
#[derive(Debug, Clone)]
pub struct ShopifyStorefrontConfig {
    /// Shopify store domain (e.g., your-store.myshopify.com)
    pub store: String,
    /// Shopify API version (e.g., 2025-01)
    pub api_version: String,
    /// Access token
    pub token: StorefrontToken,
}

impl ShopifyStorefrontConfig {
    /// The Storefront GraphQL endpoint for this store.
    #[must_use]
    pub fn endpoint(&self) -> String {
        format!(
            "https://{}/api/{}/graphql.json",
            self.store, self.api_version
        )
    }
}

/// Cart and catalog behavior.
#[derive(Debug, Clone)]
pub struct CommerceConfig {
    /// Cart identity cookie policy
    pub cookies: CartCookieConfig,
    /// Quiet period before a debounced line update is sent
    pub update_debounce: Duration,
    /// Lifetime of cached catalog reads
    pub catalog_cache_ttl: Duration,
}

impl Default for CommerceConfig {
    fn default() -> Self {
        Self {
            cookies: CartCookieConfig::default(),
            update_debounce: Duration::from_millis(DEFAULT_UPDATE_DEBOUNCE_MS),
            catalog_cache_ttl: Duration::from_secs(DEFAULT_CATALOG_CACHE_TTL_SECS),
        }
    }
}

/// Cookie policy for the cart identity cookies.
///
/// Both cookies (cart id and checkout URL) are always written with this
/// same policy.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartCookieConfig {
    /// Cookie name prefix
    pub namespace: String,
    /// Lifetime in days
    pub expiry_days: i64,
    /// `SameSite` attribute
    pub same_site: SameSite,
    /// `Secure` attribute
    pub secure: bool,
}

impl Default for CartCookieConfig {
    fn default() -> Self {
        Self {
            namespace: DEFAULT_COOKIE_NAMESPACE.to_string(),
            expiry_days: DEFAULT_COOKIE_EXPIRY_DAYS,
            same_site: SameSite::None,
            secure: true,
        }
    }
}

impl CartCookieConfig {
    /// Name of the cookie holding the cart id.
    #[must_use]
    pub fn cart_id_cookie(&self) -> String {
        format!("{}_cartId", self.namespace)
    }

    /// Name of the cookie holding the checkout URL.
    #[must_use]
    pub fn checkout_url_cookie(&self) -> String {
        format!("{}_checkoutUrl", self.namespace)
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing, invalid, or
    /// if a private token fails validation (placeholder detection, entropy
    /// check).
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        Ok(Self {
            shopify: ShopifyStorefrontConfig::from_env()?,
            commerce: CommerceConfig::from_env()?,
            sentry_dsn: get_optional_env("SENTRY_DSN"),
        })
    }
}

impl ShopifyStorefrontConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let store = get_required_env("SHOPIFY_STORE")?;
        validate_store_domain(&store, "SHOPIFY_STORE")?;

        let token = match get_optional_env("SHOPIFY_STOREFRONT_PRIVATE_TOKEN") {
            Some(private) => {
                validate_secret_strength(&private, "SHOPIFY_STOREFRONT_PRIVATE_TOKEN")?;
                StorefrontToken::Private(SecretString::from(private))
            }
            None => StorefrontToken::Public(get_required_env("SHOPIFY_STOREFRONT_PUBLIC_TOKEN")?),
        };

        Ok(Self {
            store,
            api_version: get_env_or_default("SHOPIFY_API_VERSION", DEFAULT_API_VERSION),
            token,
        })
    }
}

impl CommerceConfig {
    fn from_env() -> Result<Self, ConfigError> {
        let same_site = match get_optional_env("CART_COOKIE_SAME_SITE") {
            Some(value) => parse_same_site(&value)
                .ok_or_else(|| invalid("CART_COOKIE_SAME_SITE", "expected strict, lax or none"))?,
            None => SameSite::None,
        };

        let expiry_days = bounded(
            "CART_COOKIE_EXPIRY_DAYS",
            parse_env("CART_COOKIE_EXPIRY_DAYS", DEFAULT_COOKIE_EXPIRY_DAYS)?,
            1,
            MAX_COOKIE_EXPIRY_DAYS,
        )?;
        let catalog_cache_ttl_secs = bounded(
            "CATALOG_CACHE_TTL_SECS",
            parse_env("CATALOG_CACHE_TTL_SECS", DEFAULT_CATALOG_CACHE_TTL_SECS)?,
            0,
            MAX_CATALOG_CACHE_TTL.as_secs(),
        )?;

        let cookies = CartCookieConfig {
            namespace: get_env_or_default("CART_COOKIE_NAMESPACE", DEFAULT_COOKIE_NAMESPACE),
            expiry_days,
            same_site,
            secure: parse_env("CART_COOKIE_SECURE", true)?,
        };

        Ok(Self {
            cookies,
            update_debounce: Duration::from_millis(parse_env(
                "CART_UPDATE_DEBOUNCE_MS",
                DEFAULT_UPDATE_DEBOUNCE_MS,
            )?),
            catalog_cache_ttl: Duration::from_secs(catalog_cache_ttl_secs),
        })
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable. Empty values count as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|value| !value.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

/// Parse an optional environment variable, falling back to `default`.
fn parse_env<T>(key: &str, default: T) -> Result<T, ConfigError>
where
    T: FromStr,
    T::Err: Display,
{
    get_optional_env(key).map_or(Ok(default), |value| {
        value.trim().parse().map_err(|e: T::Err| invalid(key, e))
    })
}

/// Reject values outside `min..=max`.
fn bounded<T>(key: &str, value: T, min: T, max: T) -> Result<T, ConfigError>
where
    T: PartialOrd + Display,
{
    if value < min || value > max {
        return Err(invalid(key, format!("must be between {min} and {max}")));
    }
    Ok(value)
}

fn invalid(key: &str, reason: impl Display) -> ConfigError {
    ConfigError::InvalidEnvVar(key.to_string(), reason.to_string())
}

/// Parse a `SameSite` attribute value.
fn parse_same_site(value: &str) -> Option<SameSite> {
    match value.trim().to_ascii_lowercase().as_str() {
        "strict" => Some(SameSite::Strict),
        "lax" => Some(SameSite::Lax),
        "none" => Some(SameSite::None),
        _ => None,
    }
}

/// Check that a store value is a bare domain.
fn validate_store_domain(store: &str, var_name: &str) -> Result<(), ConfigError> {
    let url = Url::parse(&format!("https://{store}")).map_err(|e| invalid(var_name, e))?;

    if url.host_str() != Some(store) {
        return Err(invalid(
            var_name,
            "expected a bare domain such as your-store.myshopify.com",
        ));
    }

    Ok(())
}

/// Calculate Shannon entropy in bits per character.
fn shannon_entropy(s: &str) -> f64 {
    if s.is_empty() {
        return 0.0;
    }

    let mut freq: HashMap<char, usize> = HashMap::new();
    for c in s.chars() {
        *freq.entry(c).or_insert(0) += 1;
    }

    #[allow(clippy::cast_precision_loss)] // String length will never exceed f64 precision
    let len = s.len() as f64;
    freq.values()
        .map(|&count| {
            #[allow(clippy::cast_precision_loss)] // Character count will never exceed f64 precision
            let p = count as f64 / len;
            -p * p.log2()
        })
        .sum()
}

/// Validate that a secret is not a placeholder and has sufficient entropy.
fn validate_secret_strength(secret: &str, var_name: &str) -> Result<(), ConfigError> {
    let lower = secret.to_lowercase();

    for pattern in PLACEHOLDER_PATTERNS {
        if lower.contains(pattern) {
            return Err(ConfigError::InsecureSecret(
                var_name.to_string(),
                format!("appears to be a placeholder (contains '{pattern}')"),
            ));
        }
    }

    let entropy = shannon_entropy(secret);
    if entropy < MIN_ENTROPY_BITS_PER_CHAR {
        return Err(ConfigError::InsecureSecret(
            var_name.to_string(),
            format!(
                "entropy too low ({entropy:.2} bits/char, need >= {MIN_ENTROPY_BITS_PER_CHAR:.1}). Copy the token from the Shopify admin."
            ),
        ));
    }

    Ok(())
}
