//! Cartwheel Core - Canonical commerce domain model.
//!
//! This crate provides the provider-independent shapes every Cartwheel
//! component reads and writes:
//! - `storefront` - Shopify Storefront API adapter (normalization, cart orchestration)
//! - `cli` - Command-line tools for browsing the catalog and driving a cart
//!
//! # Architecture
//!
//! The core crate contains only types and pure normalizers - no I/O, no HTTP
//! clients, no caches. Backend adapters convert their wire payloads into
//! these types and nothing else crosses the adapter boundary.
//!
//! # Modules
//!
//! - [`types`] - Products, variants, options, carts, money and typed ids

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
