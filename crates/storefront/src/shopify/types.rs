//! Wire types for Shopify Storefront API payloads.
//!
//! These mirror the selection sets in `graphql/storefront/*.graphql` and are
//! deliberately lenient: optional or defaulted wherever the backend may omit
//! a field, so a sparse payload still normalizes. Conversion into the
//! canonical model lives in `storefront::conversions`.

use serde::{Deserialize, Serialize};

use super::storefront::scalars::{DateTime, Decimal, HTML, URL};

// =============================================================================
// Shared Types
// =============================================================================

/// Monetary value (`MoneyV2`).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MoneyV2 {
    /// Decimal amount as a string.
    #[serde(default)]
    pub amount: Decimal,
    /// ISO 4217 currency code.
    #[serde(default)]
    pub currency_code: String,
}

/// Image.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageFields {
    #[serde(default)]
    pub url: URL,
    #[serde(default)]
    pub alt_text: Option<String>,
    #[serde(default)]
    pub width: Option<i64>,
    #[serde(default)]
    pub height: Option<i64>,
}

/// SEO metadata.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeoFields {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

/// Pagination info.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PageInfo {
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub has_previous_page: bool,
}

/// A Relay-style connection.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Connection<T> {
    #[serde(default)]
    pub page_info: Option<PageInfo>,
    #[serde(default = "Vec::new")]
    pub edges: Vec<Edge<T>>,
}

impl<T> Default for Connection<T> {
    fn default() -> Self {
        Self {
            page_info: None,
            edges: Vec::new(),
        }
    }
}

impl<T> Connection<T> {
    /// Unwrap the edges into their nodes.
    pub fn into_nodes(self) -> impl Iterator<Item = T> {
        self.edges.into_iter().map(|edge| edge.node)
    }

    /// Whether another page follows this one.
    #[must_use]
    pub fn has_next_page(&self) -> bool {
        self.page_info.as_ref().is_some_and(|info| info.has_next_page)
    }

    /// Cursor of the last edge, if the backend sent one.
    #[must_use]
    pub fn end_cursor(&self) -> Option<&str> {
        self.edges.last().and_then(|edge| edge.cursor.as_deref())
    }
}

/// A connection edge.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<T> {
    #[serde(default)]
    pub cursor: Option<String>,
    pub node: T,
}

/// A node selected only for its id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NodeId {
    pub id: String,
}

// =============================================================================
// Product Types
// =============================================================================

/// A selected option on a variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectedOptionFields {
    pub name: String,
    pub value: String,
}

/// A product option axis.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductOptionFields {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub values: Vec<String>,
}

/// Price range across a product's variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceRangeFields {
    pub min_variant_price: MoneyV2,
    #[serde(default)]
    pub max_variant_price: Option<MoneyV2>,
}

/// Product variant.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariantFields {
    pub id: String,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub available_for_sale: bool,
    #[serde(default)]
    pub requires_shipping: bool,
    #[serde(default)]
    pub selected_options: Vec<SelectedOptionFields>,
    #[serde(default)]
    pub image: Option<ImageFields>,
    #[serde(default)]
    pub price: Option<MoneyV2>,
    #[serde(default)]
    pub compare_at_price: Option<MoneyV2>,
}

/// Product.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductFields {
    pub id: String,
    pub handle: String,
    #[serde(default)]
    pub available_for_sale: bool,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub product_type: String,
    #[serde(default)]
    pub vendor: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub description_html: HTML,
    #[serde(default)]
    pub tags: Vec<String>,
    #[serde(default)]
    pub updated_at: Option<DateTime>,
    #[serde(default)]
    pub options: Vec<ProductOptionFields>,
    #[serde(default)]
    pub price_range: Option<PriceRangeFields>,
    #[serde(default)]
    pub variants: Connection<ProductVariantFields>,
    #[serde(default)]
    pub featured_image: Option<ImageFields>,
    #[serde(default)]
    pub images: Connection<ImageFields>,
    #[serde(default)]
    pub seo: Option<SeoFields>,
}

/// A product selected only for its vendor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VendorFields {
    #[serde(default)]
    pub vendor: String,
}

// =============================================================================
// Collection Types
// =============================================================================

/// Collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionFields {
    pub id: String,
    #[serde(default)]
    pub title: String,
    pub handle: String,
    #[serde(default)]
    pub image: Option<ImageFields>,
    /// Present only when the query probes for products.
    #[serde(default)]
    pub products: Option<Connection<NodeId>>,
}

/// A collection with its product listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CollectionProducts {
    pub id: String,
    #[serde(default)]
    pub products: Connection<ProductFields>,
}

// =============================================================================
// Cart Types
// =============================================================================

/// Cart cost breakdown.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartCostFields {
    #[serde(default)]
    pub subtotal_amount: MoneyV2,
    #[serde(default)]
    pub total_amount: MoneyV2,
    #[serde(default)]
    pub total_tax_amount: Option<MoneyV2>,
}

/// A discount allocated to a cart or a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscountAllocationFields {
    pub discounted_amount: MoneyV2,
}

/// The product a cart line's variant belongs to.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartProductFields {
    pub id: String,
    #[serde(default)]
    pub handle: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub vendor: String,
}

/// The variant bought on a cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartMerchandiseFields {
    #[serde(flatten)]
    pub variant: ProductVariantFields,
    pub product: CartProductFields,
}

/// Fields shared by every kind of cart line.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineFields {
    pub id: String,
    pub quantity: i64,
    #[serde(default)]
    pub discount_allocations: Vec<DiscountAllocationFields>,
    pub merchandise: CartMerchandiseFields,
}

/// A bundle line: a regular line plus the component lines it expands to.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentizableCartLineFields {
    #[serde(flatten)]
    pub line: CartLineFields,
    #[serde(default)]
    pub line_components: Vec<CartLineComponent>,
}

/// A component of a bundle line.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLineComponent {
    pub id: String,
    #[serde(default)]
    pub quantity: i64,
}

/// A cart line, discriminated by `__typename`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "__typename")]
pub enum CartLineNode {
    /// A plain line.
    CartLine(CartLineFields),
    /// A bundle line.
    ComponentizableCartLine(ComponentizableCartLineFields),
}

/// Cart.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartFields {
    pub id: String,
    #[serde(default)]
    pub created_at: Option<DateTime>,
    #[serde(default)]
    pub checkout_url: URL,
    #[serde(default)]
    pub total_quantity: i64,
    #[serde(default)]
    pub cost: CartCostFields,
    #[serde(default)]
    pub discount_allocations: Vec<DiscountAllocationFields>,
    #[serde(default)]
    pub lines: Connection<CartLineNode>,
}

/// A user error returned by a cart mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartUserError {
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub field: Option<Vec<String>>,
    pub message: String,
}

/// Payload shared by all cart mutations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartMutationPayload {
    #[serde(default)]
    pub cart: Option<CartFields>,
    #[serde(default)]
    pub user_errors: Vec<CartUserError>,
}

// =============================================================================
// Input Types
// =============================================================================

/// Input for adding a line to a cart.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineInput {
    /// Product variant ID.
    pub merchandise_id: String,
    /// Quantity to add.
    pub quantity: i64,
}

/// Input for updating a cart line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartLineUpdateInput {
    /// Cart line ID.
    pub id: String,
    /// New quantity.
    pub quantity: i64,
    /// Variant to switch the line to.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub merchandise_id: Option<String>,
}

/// Sort keys for product searches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductSortKeys {
    Title,
    ProductType,
    Vendor,
    UpdatedAt,
    CreatedAt,
    BestSelling,
    Price,
    Id,
    #[default]
    Relevance,
}

/// Sort keys for products within a collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProductCollectionSortKeys {
    Title,
    Price,
    BestSelling,
    Created,
    Id,
    Manual,
    CollectionDefault,
    #[default]
    Relevance,
}
