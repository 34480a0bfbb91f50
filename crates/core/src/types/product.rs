//! Catalog types: products, variants, images, categories, brands.

use serde::{Deserialize, Serialize};

use super::id::{CategoryId, ProductId, VariantId};
use super::money::Money;
use super::option::ProductOption;

/// Option name the backend emits for products with no real option axis.
pub const DEFAULT_OPTION_NAME: &str = "Title";

/// Variant title the backend emits for the single variant of such products.
pub const DEFAULT_VARIANT_TITLE: &str = "Default Title";

/// Canonical name given to a variant whose only options are synthetic.
pub const DEFAULT_VARIANT_NAME: &str = "Default variant";

/// Image used wherever the backend has no image.
pub const PLACEHOLDER_IMAGE_URL: &str = "/product-img-placeholder.svg";

/// A product or variant image.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProductImage {
    /// Image URL. Never empty: missing images use [`PLACEHOLDER_IMAGE_URL`].
    pub url: String,
    /// Alt text for accessibility.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alt: Option<String>,
    /// Width in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<i64>,
    /// Height in pixels.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub height: Option<i64>,
}

impl ProductImage {
    /// The placeholder image.
    #[must_use]
    pub fn placeholder() -> Self {
        Self {
            url: PLACEHOLDER_IMAGE_URL.to_string(),
            alt: None,
            width: None,
            height: None,
        }
    }
}

/// A purchasable variant of a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    /// Variant id.
    pub id: VariantId,
    /// Variant name, [`DEFAULT_VARIANT_NAME`] for option-less products.
    pub name: String,
    /// SKU, falling back to the variant id.
    pub sku: String,
    /// Current unit price.
    pub price: f64,
    /// Compare-at price. `None` when the backend has none.
    pub list_price: Option<f64>,
    /// Whether the variant ships physically.
    pub requires_shipping: bool,
    /// Whether the variant can be bought.
    pub available_for_sale: bool,
    /// Selected options, synthetic ones removed.
    pub options: Vec<ProductOption>,
}

/// A product in the catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product id.
    pub id: ProductId,
    /// Product title.
    pub name: String,
    /// Vendor name.
    pub vendor: String,
    /// Plain text description.
    pub description: String,
    /// HTML description.
    pub description_html: String,
    /// Storefront path (`/{slug}`).
    pub path: String,
    /// URL handle with no leading or trailing `/`.
    pub slug: String,
    /// Minimum variant price as reported by the backend.
    pub price: Money,
    /// Product images. Never empty.
    pub images: Vec<ProductImage>,
    /// Variants.
    pub variants: Vec<ProductVariant>,
    /// Option axes, synthetic ones removed.
    pub options: Vec<ProductOption>,
}

/// A product grouping (Shopify collection).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category id.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL handle.
    pub slug: String,
    /// Storefront path (`/{slug}`).
    pub path: String,
    /// Category image, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<ProductImage>,
    /// Whether the category has no products. `None` when not requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_empty: Option<bool>,
}

/// A brand derived from product vendors.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Brand {
    /// Vendor name.
    pub name: String,
    /// URL-safe slug.
    pub slug: String,
    /// Storefront path (`brands/{slug}`).
    pub path: String,
}

impl Brand {
    /// Build a brand from a vendor name.
    #[must_use]
    pub fn from_vendor(vendor: &str) -> Self {
        let slug = vendor
            .trim()
            .to_lowercase()
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("-");

        Self {
            name: vendor.trim().to_string(),
            path: format!("brands/{slug}"),
            slug,
        }
    }
}

/// Strip leading and trailing path separators from a handle.
#[must_use]
pub fn normalize_slug(handle: &str) -> String {
    handle.trim_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_slug() {
        assert_eq!(normalize_slug("/shirts/"), "shirts");
        assert_eq!(normalize_slug("//nested/handle//"), "nested/handle");
        assert_eq!(normalize_slug("plain"), "plain");
    }

    #[test]
    fn test_brand_from_vendor() {
        let brand = Brand::from_vendor(" Acme Outdoor Co ");
        assert_eq!(brand.name, "Acme Outdoor Co");
        assert_eq!(brand.slug, "acme-outdoor-co");
        assert_eq!(brand.path, "brands/acme-outdoor-co");
    }

    #[test]
    fn test_placeholder_image() {
        assert_eq!(ProductImage::placeholder().url, PLACEHOLDER_IMAGE_URL);
    }
}
