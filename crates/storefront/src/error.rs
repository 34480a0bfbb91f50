//! Unified error handling for cart and catalog operations.
//!
//! Every public operation returns `Result<T, CommerceError>`. Validation
//! failures are raised before any I/O; backend failures carry the
//! underlying [`ShopifyError`].

use thiserror::Error;

use crate::shopify::ShopifyError;

/// Caller input rejected before any backend call.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    /// A line operation was given no line id and has no bound line.
    #[error("Invalid input: a cart line id is required for this operation")]
    MissingLineId,

    /// An update was given no quantity.
    #[error("Invalid input: a quantity is required for this operation")]
    MissingQuantity,

    /// A quantity that is not a whole number.
    #[error("The item quantity has to be a valid integer, got {0}")]
    NonIntegerQuantity(f64),

    /// A quantity outside the accepted range for the operation.
    #[error("The item quantity has to be a valid integer greater than 0, got {0}")]
    InvalidQuantity(i64),

    /// An add-to-cart call with nothing to add.
    #[error("Invalid input: at least one item is required")]
    NoItems,

    /// A line operation with no cart to apply it to.
    #[error("Invalid input: there is no active cart")]
    MissingCart,
}

/// Error type for cart and catalog operations.
#[derive(Debug, Error)]
pub enum CommerceError {
    /// Input rejected before any backend call.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Backend operation failed.
    #[error("Shopify error: {0}")]
    Shopify(#[from] ShopifyError),

    /// A debounced update was scheduled outside a Tokio runtime.
    #[error("Cannot schedule update: {0}")]
    Runtime(#[from] tokio::runtime::TryCurrentError),
}

impl CommerceError {
    /// Whether the error came from input validation.
    #[must_use]
    pub const fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }
}

/// Result type alias for `CommerceError`.
pub type Result<T> = std::result::Result<T, CommerceError>;
