//! Canonical commerce types.
//!
//! Values in this module are produced fresh by a backend adapter on every
//! normalization call. They carry no lifecycle of their own.

pub mod cart;
pub mod colors;
pub mod id;
pub mod money;
pub mod option;
pub mod product;

pub use cart::{Cart, CartLineItem, Currency, Discount, LineItemVariant, SelectedOption};
pub use id::*;
pub use money::{Money, normalize_money, parse_amount};
pub use option::{
    ProductOption, ProductOptionValue, is_color_option, normalize_color_option, normalize_option,
};
pub use product::{
    Brand, Category, DEFAULT_OPTION_NAME, DEFAULT_VARIANT_NAME, DEFAULT_VARIANT_TITLE,
    PLACEHOLDER_IMAGE_URL, Product, ProductImage, ProductVariant, normalize_slug,
};
