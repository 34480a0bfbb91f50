//! Command implementations.

pub mod cart;
pub mod catalog;

use std::path::PathBuf;

use cartwheel_storefront::config::{ConfigError, StorefrontConfig};
use cartwheel_storefront::identity::{CookieStoreError, FileCookieStore};
use cartwheel_storefront::shopify::StorefrontClient;
use cartwheel_storefront::{Commerce, CommerceError};
use serde::Serialize;
use thiserror::Error;

/// Commerce handle used by every command.
pub type CliCommerce = Commerce<StorefrontClient, FileCookieStore>;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Cart or catalog operation failed.
    #[error(transparent)]
    Commerce(#[from] CommerceError),

    /// Cookie jar could not be written.
    #[error("Cookie jar error: {0}")]
    Cookies(#[from] CookieStoreError),

    /// Output could not be serialized.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Requested resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),
}

/// Build the commerce handle over the cookie jar file.
pub fn connect(config: &StorefrontConfig, cookie_jar: PathBuf) -> CliCommerce {
    Commerce::from_config(config, FileCookieStore::new(cookie_jar))
}

/// Write a value to stdout as pretty JSON.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
