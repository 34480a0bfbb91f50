//! Collection and vendor conversion functions.

use std::collections::BTreeMap;

use cartwheel_core::{Brand, Category, CategoryId, normalize_slug};

use crate::shopify::types::CollectionFields;

use super::products::normalize_image;

/// Convert a backend collection into a category.
///
/// `is_empty` is set only when the query probed the collection's products.
#[must_use]
pub fn normalize_category(collection: CollectionFields) -> Category {
    let slug = normalize_slug(&collection.handle);

    Category {
        id: CategoryId::new(collection.id),
        name: collection.title,
        path: format!("/{slug}"),
        slug,
        image: collection.image.map(normalize_image),
        is_empty: collection.products.map(|products| products.edges.is_empty()),
    }
}

/// Collapse vendor names into a sorted, de-duplicated brand list.
///
/// Vendors that differ only in case or spacing share a slug and collapse to
/// the first name seen. Blank vendors are dropped.
pub fn normalize_brands<I, S>(vendors: I) -> Vec<Brand>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut brands: BTreeMap<String, Brand> = BTreeMap::new();

    for vendor in vendors {
        let vendor = vendor.as_ref();
        if vendor.trim().is_empty() {
            continue;
        }
        let brand = Brand::from_vendor(vendor);
        brands.entry(brand.slug.clone()).or_insert(brand);
    }

    brands.into_values().collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::indexing_slicing)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_normalize_category_with_probe() {
        let collection: CollectionFields = serde_json::from_value(json!({
            "id": "gid://shopify/Collection/1",
            "title": "Summer",
            "handle": "/summer/",
            "image": { "url": "https://cdn.shopify.com/summer.jpg" },
            "products": { "edges": [] }
        }))
        .unwrap();

        let category = normalize_category(collection);
        assert_eq!(category.id.as_str(), "gid://shopify/Collection/1");
        assert_eq!(category.name, "Summer");
        assert_eq!(category.slug, "summer");
        assert_eq!(category.path, "/summer");
        assert_eq!(category.is_empty, Some(true));
        assert!(category.image.is_some());
    }

    #[test]
    fn test_normalize_category_without_probe() {
        let collection: CollectionFields = serde_json::from_value(json!({
            "id": "gid://shopify/Collection/2",
            "title": "Winter",
            "handle": "winter"
        }))
        .unwrap();

        let category = normalize_category(collection);
        assert_eq!(category.is_empty, None);
        assert_eq!(category.image, None);
    }

    #[test]
    fn test_normalize_brands_dedupes_and_sorts() {
        let brands = normalize_brands(["Zed Supply", "Acme", "acme", "", "  ", "Zed  Supply"]);
        assert_eq!(brands.len(), 2);
        assert_eq!(brands[0].name, "Acme");
        assert_eq!(brands[0].slug, "acme");
        assert_eq!(brands[1].slug, "zed-supply");
    }
}
