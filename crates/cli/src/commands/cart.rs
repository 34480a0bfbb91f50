//! Cart commands.
//!
//! The cart id lives in the cookie jar, so `add` creates a cart on first use
//! and later commands pick it up.

use cartwheel_core::LineItemId;
use cartwheel_storefront::cart::{CartItemBody, RemoveItemInput, UpdateItemInput, UpdateOutcome};

use super::{CliCommerce, CliError, print_json};

/// Print the current cart.
pub async fn show(commerce: &CliCommerce) -> Result<(), CliError> {
    let cart = commerce
        .use_cart()
        .get()
        .await?
        .ok_or_else(|| CliError::NotFound("no active cart".to_string()))?;
    print_json(&cart)
}

/// Add a variant.
pub async fn add(
    commerce: &CliCommerce,
    variant_id: String,
    quantity: i64,
) -> Result<(), CliError> {
    let cart = commerce
        .add_item()
        .add(CartItemBody::new(variant_id).with_quantity(quantity))
        .await?;
    print_json(&cart)
}

/// Set a line's quantity.
pub async fn update(
    commerce: &CliCommerce,
    line_id: String,
    quantity: f64,
) -> Result<(), CliError> {
    let outcome = commerce
        .update_item(None)
        .update(UpdateItemInput {
            item_id: Some(LineItemId::new(line_id)),
            quantity: Some(quantity),
            cart_id: None,
        })
        .await?;

    match outcome {
        UpdateOutcome::Applied(cart) => print_json(&cart),
        // A single call on a fresh hook is never superseded
        UpdateOutcome::Superseded => Ok(()),
    }
}

/// Remove a line.
pub async fn remove(commerce: &CliCommerce, line_id: String) -> Result<(), CliError> {
    let cart = commerce
        .remove_item(None)
        .remove(RemoveItemInput::new(line_id))
        .await?;
    print_json(&cart)
}

/// Drop the stored cart identity.
pub fn forget(commerce: &CliCommerce) -> Result<(), CliError> {
    commerce.identity().clear()?;
    tracing::info!("Cart forgotten");
    Ok(())
}
