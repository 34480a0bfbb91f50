//! Remove lines from the cart.

use cartwheel_core::{Cart, CartId, CartLineItem, LineItemId};
use tracing::instrument;

use crate::cache::{CacheKey, CacheValue};
use crate::commerce::Commerce;
use crate::error::{Result, ValidationError};
use crate::identity::CookieStore;
use crate::shopify::Execute;
use crate::shopify::conversions::mutation_cart;
use crate::shopify::queries::{RemoveFromCart, remove_from_cart};

/// Input for [`RemoveItemHook::remove`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RemoveItemInput {
    /// Line to remove; the hook's bound line when absent.
    pub item_id: Option<LineItemId>,
    /// Cart to remove from instead of the one in the identity cookie.
    pub cart_id: Option<CartId>,
}

impl RemoveItemInput {
    /// Remove a specific line.
    #[must_use]
    pub fn new(item_id: impl Into<LineItemId>) -> Self {
        Self {
            item_id: Some(item_id.into()),
            cart_id: None,
        }
    }
}

/// Resolve the line and cart, then run `removeFromCart`.
///
/// Validation happens before any backend call.
pub(crate) async fn fetch<E: Execute, S: CookieStore>(
    commerce: &Commerce<E, S>,
    bound: Option<&CartLineItem>,
    input: RemoveItemInput,
) -> Result<Cart> {
    let line_id = input
        .item_id
        .or_else(|| bound.map(|item| item.id.clone()))
        .ok_or(ValidationError::MissingLineId)?;
    let cart_id = commerce
        .identity()
        .cart_id(input.cart_id.as_ref())
        .ok_or(ValidationError::MissingCart)?;

    let data = commerce
        .executor()
        .execute::<RemoveFromCart>(remove_from_cart::Variables {
            cart_id: cart_id.into_inner(),
            line_ids: vec![line_id.into_inner()],
        })
        .await?;

    Ok(mutation_cart(data.cart_lines_remove, "remove from cart")?)
}

/// Removes lines and refreshes the shared cart slot.
pub struct RemoveItemHook<E, S> {
    commerce: Commerce<E, S>,
    item: Option<CartLineItem>,
}

impl<E: Execute, S: CookieStore> RemoveItemHook<E, S> {
    pub(crate) const fn new(commerce: Commerce<E, S>, item: Option<CartLineItem>) -> Self {
        Self { commerce, item }
    }

    /// The line this hook is bound to.
    #[must_use]
    pub const fn item(&self) -> Option<&CartLineItem> {
        self.item.as_ref()
    }

    /// Remove a line.
    ///
    /// # Errors
    ///
    /// Returns [`ValidationError::MissingLineId`] when neither the input nor
    /// the hook names a line, [`ValidationError::MissingCart`] with no active
    /// cart, or the backend error.
    #[instrument(skip_all)]
    pub async fn remove(&self, input: RemoveItemInput) -> Result<Cart> {
        let cart = fetch(&self.commerce, self.item.as_ref(), input).await?;
        self.commerce
            .cache()
            .mutate(CacheKey::Cart, CacheValue::cart(Some(cart.clone())), false)
            .await;
        Ok(cart)
    }
}
