//! Cartwheel Storefront - Shopify Storefront API adapter.
//!
//! Turns Storefront API payloads into the canonical `cartwheel_core` model
//! and orchestrates cart mutations on top of it:
//! - [`shopify`] - GraphQL documents, wire types, HTTP execution, normalization
//! - [`identity`] - which cart belongs to this shopper (cookie backed)
//! - [`cart`] - add/update/remove hooks with debounced updates
//! - [`catalog`] - product, category and brand reads
//! - [`cache`] - the shared cart slot and catalog cache
//!
//! Everything hangs off a [`Commerce`] handle:
//!
//! ```no_run
//! # async fn run() -> Result<(), Box<dyn std::error::Error>> {
//! use cartwheel_storefront::cart::CartItemBody;
//! use cartwheel_storefront::config::StorefrontConfig;
//! use cartwheel_storefront::identity::MemoryCookieStore;
//! use cartwheel_storefront::Commerce;
//!
//! let config = StorefrontConfig::from_env()?;
//! let commerce = Commerce::from_config(&config, MemoryCookieStore::new());
//!
//! let cart = commerce
//!     .add_item()
//!     .add(CartItemBody::new("gid://shopify/ProductVariant/1"))
//!     .await?;
//! println!("{} items", cart.total_quantity);
//! # Ok(())
//! # }
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod cache;
pub mod cart;
pub mod catalog;
pub mod commerce;
pub mod config;
pub mod error;
pub mod identity;
pub mod shopify;

#[cfg(test)]
mod testing;

pub use commerce::Commerce;
pub use error::{CommerceError, Result, ValidationError};
