//! Cart type conversion functions.
//!
//! Totals are copied from the backend's cost breakdown. Nothing here sums
//! line prices.

use cartwheel_core::{
    Cart, CartId, CartLineItem, Currency, DEFAULT_VARIANT_TITLE, Discount, LineItemId,
    LineItemVariant, ProductId, ProductImage, SelectedOption, VariantId, parse_amount,
};
use chrono::{DateTime, Utc};
use tracing::debug;

use crate::shopify::ShopifyError;
use crate::shopify::types::{
    CartFields, CartLineFields, CartLineNode, CartMutationPayload, DiscountAllocationFields,
};

use super::products::{list_price, normalize_image};

/// Convert an optional backend cart. `None` stays `None`.
#[must_use]
pub fn normalize_cart(cart: Option<CartFields>) -> Option<Cart> {
    cart.map(convert_cart)
}

/// Convert a backend cart.
#[must_use]
pub fn convert_cart(cart: CartFields) -> Cart {
    let cost = cart.cost;
    let subtotal = parse_amount(&cost.subtotal_amount.amount);

    Cart {
        id: CartId::new(cart.id),
        url: cart.checkout_url,
        created_at: cart.created_at.as_deref().and_then(parse_timestamp),
        currency: Currency {
            code: cost.total_amount.currency_code.clone(),
        },
        taxes_included: cost.total_tax_amount.is_some(),
        total_quantity: cart.total_quantity,
        line_items: cart.lines.into_nodes().map(normalize_line_item).collect(),
        line_items_subtotal_price: subtotal,
        subtotal_price: subtotal,
        total_price: parse_amount(&cost.total_amount.amount),
        discounts: discounts(&cart.discount_allocations),
    }
}

/// Convert one cart line, flattening bundle lines to their parent line.
#[must_use]
pub fn normalize_line_item(node: CartLineNode) -> CartLineItem {
    let line = match node {
        CartLineNode::CartLine(line) => line,
        CartLineNode::ComponentizableCartLine(bundle) => {
            debug!(
                line_id = %bundle.line.id,
                components = bundle.line_components.len(),
                "Flattening bundle line, component detail dropped"
            );
            bundle.line
        }
    };

    convert_line(line)
}

fn convert_line(line: CartLineFields) -> CartLineItem {
    let CartLineFields {
        id,
        quantity,
        discount_allocations,
        merchandise,
    } = line;
    let variant = merchandise.variant;
    let product = merchandise.product;

    let options = if variant.title == DEFAULT_VARIANT_TITLE {
        Vec::new()
    } else {
        variant
            .selected_options
            .into_iter()
            .map(|o| SelectedOption {
                name: o.name,
                value: o.value,
            })
            .collect()
    };

    CartLineItem {
        id: LineItemId::new(id),
        variant_id: VariantId::new(variant.id.clone()),
        product_id: ProductId::new(product.id),
        name: product.title,
        quantity,
        variant: LineItemVariant {
            id: VariantId::new(variant.id),
            sku: variant.sku.unwrap_or_default(),
            name: variant.title,
            image: variant
                .image
                .map_or_else(ProductImage::placeholder, normalize_image),
            requires_shipping: variant.requires_shipping,
            price: variant
                .price
                .as_ref()
                .map_or(f64::NAN, |p| parse_amount(&p.amount)),
            list_price: list_price(variant.compare_at_price.as_ref()),
        },
        path: product.handle,
        discounts: discounts(&discount_allocations),
        options,
    }
}

fn discounts(allocations: &[DiscountAllocationFields]) -> Vec<Discount> {
    allocations
        .iter()
        .map(|a| Discount {
            value: parse_amount(&a.discounted_amount.amount),
        })
        .collect()
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .ok()
        .map(|d| d.with_timezone(&Utc))
}

/// Unwrap a cart mutation payload.
///
/// User errors become [`ShopifyError::UserError`]; a payload with neither
/// errors nor a cart becomes a GraphQL error naming `action`.
///
/// # Errors
///
/// Returns an error if the backend reported user errors or no cart.
pub fn mutation_cart(
    payload: Option<CartMutationPayload>,
    action: &str,
) -> Result<Cart, ShopifyError> {
    let Some(payload) = payload else {
        return Err(ShopifyError::message(format!("Failed to {action}")));
    };

    if !payload.user_errors.is_empty() {
        return Err(ShopifyError::UserError(
            payload
                .user_errors
                .into_iter()
                .map(|e| e.message)
                .collect::<Vec<_>>()
                .join("; "),
        ));
    }

    payload
        .cart
        .map(convert_cart)
        .ok_or_else(|| ShopifyError::message(format!("Failed to {action}")))
}
