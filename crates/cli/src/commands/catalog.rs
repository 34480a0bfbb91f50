//! Catalog commands.

use cartwheel_storefront::catalog::{ProductSearch, SortOrder};

use super::{CliCommerce, CliError, print_json};

/// Print one product.
pub async fn product(commerce: &CliCommerce, slug: &str) -> Result<(), CliError> {
    let product = commerce
        .product(slug)
        .await?
        .ok_or_else(|| CliError::NotFound(format!("product {slug}")))?;
    print_json(&product)
}

/// Print matching products.
pub async fn products(
    commerce: &CliCommerce,
    search: Option<String>,
    category_id: Option<String>,
    brand: Option<String>,
    sort: Option<SortOrder>,
) -> Result<(), CliError> {
    let products = commerce
        .products(&ProductSearch {
            search,
            category_id,
            brand,
            sort,
            first: None,
        })
        .await?;
    tracing::info!(count = products.len(), "Found products");
    print_json(&products)
}

/// Print categories.
pub async fn categories(commerce: &CliCommerce, first: i64) -> Result<(), CliError> {
    print_json(&commerce.categories(first).await?)
}

/// Print brands.
pub async fn brands(commerce: &CliCommerce) -> Result<(), CliError> {
    print_json(&commerce.brands().await?)
}
