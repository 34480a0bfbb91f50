//! Product type conversion functions.

use cartwheel_core::{
    DEFAULT_OPTION_NAME, DEFAULT_VARIANT_NAME, Money, Product, ProductId, ProductImage,
    ProductOption, ProductVariant, VariantId, normalize_money, normalize_option, normalize_slug,
    parse_amount,
};

use crate::shopify::types::{
    ImageFields, MoneyV2, ProductFields, ProductOptionFields, ProductVariantFields,
    SelectedOptionFields,
};

/// Convert a backend product into the canonical model.
///
/// Total for any payload carrying `id` and `handle`: missing prices become
/// `NaN`, missing images become the placeholder.
#[must_use]
pub fn normalize_product(product: ProductFields) -> Product {
    let slug = normalize_slug(&product.handle);

    let options: Vec<ProductOption> = product
        .options
        .iter()
        .filter(|option| !is_synthetic(&option.name))
        .map(|option| normalize_option(&option.id, &option.name, &option.values))
        .collect();

    let variants = product
        .variants
        .edges
        .into_iter()
        .map(|edge| normalize_variant(edge.node, &product.options))
        .collect();

    let mut images: Vec<ProductImage> =
        product.images.into_nodes().map(normalize_image).collect();
    if images.is_empty() {
        images.push(
            product
                .featured_image
                .map_or_else(ProductImage::placeholder, normalize_image),
        );
    }

    Product {
        id: ProductId::new(product.id),
        name: product.title,
        vendor: product.vendor,
        description: product.description,
        description_html: product.description_html,
        path: format!("/{slug}"),
        slug,
        price: product.price_range.map_or_else(
            || Money::new(f64::NAN, ""),
            |range| money(&range.min_variant_price),
        ),
        images,
        variants,
        options,
    }
}

/// Convert a backend variant.
///
/// `product_options` is used to give each selected option the id of its
/// product-level axis; options with no matching axis fall back to an id
/// derived from the variant.
fn normalize_variant(
    variant: ProductVariantFields,
    product_options: &[ProductOptionFields],
) -> ProductVariant {
    let only_synthetic = variant
        .selected_options
        .iter()
        .all(|option| is_synthetic(&option.name));

    let name = if only_synthetic {
        DEFAULT_VARIANT_NAME.to_string()
    } else {
        variant.title
    };

    let options = variant
        .selected_options
        .iter()
        .filter(|option| !is_synthetic(&option.name))
        .map(|option| variant_option(&variant.id, option, product_options))
        .collect();

    ProductVariant {
        sku: variant.sku.unwrap_or_else(|| variant.id.clone()),
        id: VariantId::new(variant.id),
        name,
        price: variant.price.as_ref().map_or(f64::NAN, |p| parse_amount(&p.amount)),
        list_price: list_price(variant.compare_at_price.as_ref()),
        requires_shipping: variant.requires_shipping,
        available_for_sale: variant.available_for_sale,
        options,
    }
}

fn variant_option(
    variant_id: &str,
    option: &SelectedOptionFields,
    product_options: &[ProductOptionFields],
) -> ProductOption {
    let id = product_options
        .iter()
        .find(|axis| axis.name == option.name)
        .map_or_else(
            || format!("{variant_id}:{}", option.name.to_lowercase()),
            |axis| axis.id.clone(),
        );

    normalize_option(&id, &option.name, std::slice::from_ref(&option.value))
}

/// Convert a backend image.
#[must_use]
pub fn normalize_image(image: ImageFields) -> ProductImage {
    if image.url.is_empty() {
        return ProductImage::placeholder();
    }

    ProductImage {
        url: image.url,
        alt: image.alt_text,
        width: image.width,
        height: image.height,
    }
}

/// Compare-at price, `None` when absent or unparseable.
pub(super) fn list_price(compare_at: Option<&MoneyV2>) -> Option<f64> {
    compare_at
        .map(|m| parse_amount(&m.amount))
        .filter(|value| !value.is_nan())
}

fn money(value: &MoneyV2) -> Money {
    normalize_money(&value.amount, &value.currency_code)
}

/// Whether an option is the backend's placeholder for "no real options".
fn is_synthetic(name: &str) -> bool {
    name == DEFAULT_OPTION_NAME
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    fn product(value: serde_json::Value) -> ProductFields {
        serde_json::from_value(value).unwrap()
    }

    fn tee() -> serde_json::Value {
        json!({
            "id": "gid://shopify/Product/1",
            "handle": "classic-tee",
            "title": "Classic Tee",
            "vendor": "Acme",
            "description": "Soft cotton",
            "descriptionHtml": "<p>Soft cotton</p>",
            "options": [
                { "id": "gid://shopify/ProductOption/10", "name": "Color", "values": ["Midnight Blue", "Sunset Glow"] },
                { "id": "gid://shopify/ProductOption/11", "name": "Size", "values": ["S", "M"] }
            ],
            "priceRange": {
                "minVariantPrice": { "amount": "19.99", "currencyCode": "USD" },
                "maxVariantPrice": { "amount": "24.99", "currencyCode": "USD" }
            },
            "variants": { "edges": [
                { "node": {
                    "id": "gid://shopify/ProductVariant/100",
                    "sku": "TEE-BLUE-S",
                    "title": "Midnight Blue / S",
                    "availableForSale": true,
                    "requiresShipping": true,
                    "selectedOptions": [
                        { "name": "Color", "value": "Midnight Blue" },
                        { "name": "Size", "value": "S" }
                    ],
                    "price": { "amount": "19.99", "currencyCode": "USD" },
                    "compareAtPrice": { "amount": "29.99", "currencyCode": "USD" }
                }}
            ]},
            "images": { "edges": [
                { "node": { "url": "https://cdn.shopify.com/tee.jpg", "altText": "Tee", "width": 800, "height": 600 } }
            ]}
        })
    }

    #[test]
    fn test_normalize_product_basic_fields() {
        let product = normalize_product(product(tee()));
        assert_eq!(product.id.as_str(), "gid://shopify/Product/1");
        assert_eq!(product.name, "Classic Tee");
        assert_eq!(product.vendor, "Acme");
        assert_eq!(product.slug, "classic-tee");
        assert_eq!(product.path, "/classic-tee");
        assert_eq!(product.price, Money::new(19.99, "USD"));
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.images[0].alt.as_deref(), Some("Tee"));
    }

    #[test]
    fn test_normalize_product_options_and_colors() {
        let product = normalize_product(product(tee()));
        assert_eq!(product.options.len(), 2);

        let color = &product.options[0];
        assert_eq!(color.display_name, "color");
        assert_eq!(
            color.values[0].hex_colors,
            Some(vec!["#191970".to_string()])
        );
        assert!(color.values[1].hex_colors.is_none());

        let size = &product.options[1];
        assert!(size.values.iter().all(|v| v.hex_colors.is_none()));
    }

    #[test]
    fn test_normalize_variant_fields() {
        let product = normalize_product(product(tee()));
        let variant = &product.variants[0];
        assert_eq!(variant.name, "Midnight Blue / S");
        assert_eq!(variant.sku, "TEE-BLUE-S");
        assert_eq!(variant.price, 19.99);
        assert_eq!(variant.list_price, Some(29.99));
        assert!(variant.requires_shipping);
        assert_eq!(variant.options.len(), 2);
        // Variant options take the id of the product-level axis
        assert_eq!(variant.options[0].id, "gid://shopify/ProductOption/10");
        assert_eq!(variant.options[0].values[0].label, "Midnight Blue");
    }

    #[test]
    fn test_single_default_variant_product() {
        let product = normalize_product(product(json!({
            "id": "gid://shopify/Product/2",
            "handle": "/gift-card/",
            "title": "Gift Card",
            "options": [{ "id": "gid://shopify/ProductOption/20", "name": "Title", "values": ["Default Title"] }],
            "priceRange": { "minVariantPrice": { "amount": "25.0", "currencyCode": "CAD" } },
            "variants": { "edges": [
                { "node": {
                    "id": "gid://shopify/ProductVariant/200",
                    "title": "Default Title",
                    "selectedOptions": [{ "name": "Title", "value": "Default Title" }],
                    "price": { "amount": "25.0", "currencyCode": "CAD" }
                }}
            ]}
        })));

        assert!(product.options.is_empty());
        assert_eq!(product.slug, "gift-card");
        assert_eq!(product.path, "/gift-card");

        let variant = &product.variants[0];
        assert_eq!(variant.name, DEFAULT_VARIANT_NAME);
        assert!(variant.options.is_empty());
        // No SKU: falls back to the variant id
        assert_eq!(variant.sku, "gid://shopify/ProductVariant/200");
        assert_eq!(variant.list_price, None);
    }

    #[test]
    fn test_missing_images_use_placeholder() {
        let product = normalize_product(product(json!({
            "id": "gid://shopify/Product/3",
            "handle": "bare"
        })));
        assert_eq!(product.images, vec![ProductImage::placeholder()]);
        assert!(product.price.is_missing());
        assert!(product.variants.is_empty());
    }

    #[test]
    fn test_featured_image_used_when_gallery_empty() {
        let product = normalize_product(product(json!({
            "id": "gid://shopify/Product/4",
            "handle": "featured",
            "featuredImage": { "url": "https://cdn.shopify.com/featured.jpg" }
        })));
        assert_eq!(product.images.len(), 1);
        assert_eq!(product.images[0].url, "https://cdn.shopify.com/featured.jpg");
    }

    #[test]
    fn test_unparseable_compare_at_is_absent() {
        let compare_at = MoneyV2 {
            amount: "n/a".to_string(),
            currency_code: "USD".to_string(),
        };
        assert_eq!(list_price(Some(&compare_at)), None);
        assert_eq!(list_price(None), None);
    }

    #[test]
    fn test_option_without_product_axis_gets_derived_id() {
        let product = normalize_product(product(json!({
            "id": "gid://shopify/Product/5",
            "handle": "mug",
            "variants": { "edges": [
                { "node": {
                    "id": "gid://shopify/ProductVariant/500",
                    "title": "Large",
                    "selectedOptions": [{ "name": "Size", "value": "Large" }]
                }}
            ]}
        })));
        let variant = &product.variants[0];
        assert_eq!(variant.options[0].id, "gid://shopify/ProductVariant/500:size");
        assert!(variant.price.is_nan());
    }
}
