//! Custom scalar types for the Shopify Storefront GraphQL schema.
//!
//! Names match the schema scalars, so they stay upper case.

/// `DateTime` (ISO 8601 string).
pub type DateTime = String;

/// `Decimal` (decimal string, e.g. "19.99").
pub type Decimal = String;

/// `URL`.
#[allow(clippy::upper_case_acronyms)]
pub type URL = String;

/// `HTML`.
#[allow(clippy::upper_case_acronyms)]
pub type HTML = String;
