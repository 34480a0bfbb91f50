//! Conversion from Storefront API payloads to the canonical model.
//!
//! Every function here is pure and total: a payload that deserialized is
//! always converted, with missing values mapped to documented fallbacks.

pub mod cart;
pub mod collections;
pub mod products;

pub use cart::{convert_cart, mutation_cart, normalize_cart, normalize_line_item};
pub use collections::{normalize_brands, normalize_category};
pub use products::{normalize_image, normalize_product};
