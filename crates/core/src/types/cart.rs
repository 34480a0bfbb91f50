//! Cart types.
//!
//! Every monetary total on a [`Cart`] is a copy of the backend's own
//! figure. Nothing here sums line items; the backend owns tax and discount
//! logic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::id::{CartId, LineItemId, ProductId, VariantId};
use super::product::ProductImage;

/// Cart currency.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Currency {
    /// ISO 4217 currency code.
    pub code: String,
}

/// A discount amount applied by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Discount {
    /// Amount discounted.
    pub value: f64,
}

/// A selected option on a cart line (e.g., Size = Large).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectedOption {
    /// Option name.
    pub name: String,
    /// Selected value.
    pub value: String,
}

/// The variant bought on a cart line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItemVariant {
    /// Variant id.
    pub id: VariantId,
    /// SKU, empty when the backend has none.
    pub sku: String,
    /// Variant title.
    pub name: String,
    /// Variant image, placeholder when missing.
    pub image: ProductImage,
    /// Whether the variant ships physically.
    pub requires_shipping: bool,
    /// Unit price.
    pub price: f64,
    /// Compare-at unit price, `None` when the backend has none.
    pub list_price: Option<f64>,
}

/// A line in the cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLineItem {
    /// Cart line id.
    pub id: LineItemId,
    /// Variant id.
    pub variant_id: VariantId,
    /// Parent product id.
    pub product_id: ProductId,
    /// Product title.
    pub name: String,
    /// Quantity.
    pub quantity: i64,
    /// Variant details.
    pub variant: LineItemVariant,
    /// Product handle.
    pub path: String,
    /// Discounts allocated to this line.
    pub discounts: Vec<Discount>,
    /// Selected options; empty for default-title variants.
    pub options: Vec<SelectedOption>,
}

/// A shopping cart snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cart {
    /// Cart id.
    pub id: CartId,
    /// Checkout URL.
    pub url: String,
    /// Creation timestamp, when the backend sent a parseable one.
    pub created_at: Option<DateTime<Utc>>,
    /// Cart currency.
    pub currency: Currency,
    /// Whether the backend reported a tax amount.
    pub taxes_included: bool,
    /// Total item quantity as counted by the backend.
    pub total_quantity: i64,
    /// Lines.
    pub line_items: Vec<CartLineItem>,
    /// Sum of line prices before cart-level adjustments.
    pub line_items_subtotal_price: f64,
    /// Subtotal.
    pub subtotal_price: f64,
    /// Total.
    pub total_price: f64,
    /// Cart-level discounts.
    pub discounts: Vec<Discount>,
}

impl Cart {
    /// Find a line by id.
    #[must_use]
    pub fn line_item(&self, id: &LineItemId) -> Option<&CartLineItem> {
        self.line_items.iter().find(|line| &line.id == id)
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.line_items.is_empty()
    }
}
