//! Change line quantities, debounced per hook.

use std::future::Future;
use std::time::Duration;

use cartwheel_core::{Cart, CartId, CartLineItem, LineItemId};
use tracing::{Instrument, debug, info_span};

use super::debounce::Debouncer;
use super::remove_item::{self, RemoveItemInput};
use crate::cache::{CacheKey, CacheValue};
use crate::commerce::Commerce;
use crate::error::{Result, ValidationError};
use crate::identity::CookieStore;
use crate::shopify::Execute;
use crate::shopify::conversions::mutation_cart;
use crate::shopify::queries::{EditCartItems, edit_cart_items};
use crate::shopify::types::CartLineUpdateInput;

/// Input for [`UpdateItemHook::update`].
///
/// `quantity` is a float so callers can pass form input straight through;
/// anything that is not a whole number is rejected.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct UpdateItemInput {
    /// Line to update; the hook's bound line when absent.
    pub item_id: Option<LineItemId>,
    /// New quantity. Below 1 removes the line.
    pub quantity: Option<f64>,
    /// Cart to update instead of the one in the identity cookie.
    pub cart_id: Option<CartId>,
}

impl UpdateItemInput {
    /// Set a specific line's quantity.
    #[must_use]
    pub fn new(item_id: impl Into<LineItemId>, quantity: i32) -> Self {
        Self {
            item_id: Some(item_id.into()),
            quantity: Some(f64::from(quantity)),
            cart_id: None,
        }
    }

    /// Set the bound line's quantity.
    #[must_use]
    pub fn quantity(quantity: i32) -> Self {
        Self {
            quantity: Some(f64::from(quantity)),
            ..Self::default()
        }
    }
}

/// What happened to one debounced update call.
#[derive(Debug, Clone, PartialEq)]
pub enum UpdateOutcome {
    /// This call's input was sent; the resulting cart.
    Applied(Cart),
    /// A newer call on the same hook replaced this one before it was sent.
    Superseded,
}

impl UpdateOutcome {
    /// The cart, when this call was applied.
    #[must_use]
    pub const fn cart(&self) -> Option<&Cart> {
        match self {
            Self::Applied(cart) => Some(cart),
            Self::Superseded => None,
        }
    }
}

// Whole and at most i32::MAX before the cast; large negatives saturate and
// still read as a removal
#[allow(clippy::cast_possible_truncation)]
fn whole_quantity(quantity: Option<f64>) -> std::result::Result<i64, ValidationError> {
    let quantity = quantity.ok_or(ValidationError::MissingQuantity)?;
    if !quantity.is_finite() || quantity.fract().abs() > 0.0 || quantity > f64::from(i32::MAX) {
        return Err(ValidationError::NonIntegerQuantity(quantity));
    }
    Ok(quantity as i64)
}

/// Validate input and run `editCartItems`, or remove the line when the
/// quantity drops below 1.
pub(crate) async fn fetch<E: Execute, S: CookieStore>(
    commerce: &Commerce<E, S>,
    bound: Option<&CartLineItem>,
    input: UpdateItemInput,
) -> Result<Cart> {
    let quantity = whole_quantity(input.quantity)?;

    if quantity < 1 {
        debug!(quantity, "Quantity below 1, removing line");
        let remove = RemoveItemInput {
            item_id: input.item_id,
            cart_id: input.cart_id,
        };
        return remove_item::fetch(commerce, bound, remove).await;
    }

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
        .execute::<EditCartItems>(edit_cart_items::Variables {
            cart_id: cart_id.into_inner(),
            lines: vec![CartLineUpdateInput {
                id: line_id.into_inner(),
                quantity,
                merchandise_id: None,
            }],
        })
        .await?;

    Ok(mutation_cart(data.cart_lines_update, "update cart item")?)
}

/// Updates line quantities, coalescing bursts of calls.
///
/// Calls on one hook within the debounce window collapse into a single
/// backend request carrying the last input. Separate hooks debounce
/// independently.
pub struct UpdateItemHook<E, S> {
    commerce: Commerce<E, S>,
    item: Option<CartLineItem>,
    debouncer: Debouncer<Result<Cart>>,
}

impl<E: Execute, S: CookieStore> UpdateItemHook<E, S> {
    pub(crate) fn new(
        commerce: Commerce<E, S>,
        item: Option<CartLineItem>,
        wait: Duration,
    ) -> Self {
        Self {
            commerce,
            item,
            debouncer: Debouncer::new(wait),
        }
    }

    /// The line this hook is bound to.
    #[must_use]
    pub const fn item(&self) -> Option<&CartLineItem> {
        self.item.as_ref()
    }

    /// Schedule a quantity change.
    ///
    /// The request is scheduled as soon as this is called, not when the
    /// returned future is first polled. Dropping the future does not cancel
    /// the request.
    ///
    /// # Errors
    ///
    /// Resolves to a validation error for a missing or fractional quantity,
    /// a missing line or cart, or the backend error. Called outside a Tokio
    /// runtime, nothing is scheduled and it resolves to
    /// [`CommerceError::Runtime`](crate::CommerceError::Runtime).
    pub fn update(
        &self,
        input: UpdateItemInput,
    ) -> impl Future<Output = Result<UpdateOutcome>> + Send + 'static {
        let commerce = self.commerce.clone();
        let item = self.item.clone();
        let span = info_span!("update_item", quantity = ?input.quantity);

        let pending = self.debouncer.call(move || {
            async move {
                let cart = fetch(&commerce, item.as_ref(), input).await?;
                commerce
                    .cache()
                    .mutate(CacheKey::Cart, CacheValue::cart(Some(cart.clone())), false)
                    .await;
                Ok(cart)
            }
            .instrument(span)
        });

        async move {
            match pending?.await {
                Some(result) => result.map(UpdateOutcome::Applied),
                None => Ok(UpdateOutcome::Superseded),
            }
        }
    }
}
