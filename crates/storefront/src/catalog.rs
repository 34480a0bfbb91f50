//! Catalog reads: products, categories and brands.
//!
//! Product lookups by slug, category lists and the brand list go through the
//! shared cache; searches always hit the backend.

use std::fmt;
use std::str::FromStr;

use cartwheel_core::{Brand, Category, Product};
use tracing::{debug, instrument};

use crate::cache::{CacheKey, CacheValue};
use crate::commerce::Commerce;
use crate::error::{CommerceError, Result};
use crate::identity::CookieStore;
use crate::shopify::Execute;
use crate::shopify::conversions::{normalize_brands, normalize_category, normalize_product};
use crate::shopify::queries::{
    GetAllProductVendors, GetAllProducts, GetProductById, GetProductBySlug,
    GetProductsFromCollection, GetSiteCollection, GetSiteCollections, get_all_product_vendors,
    get_all_products, get_product_by_id, get_product_by_slug, get_products_from_collection,
    get_site_collection, get_site_collections,
};
use crate::shopify::types::{ProductCollectionSortKeys, ProductSortKeys};

/// Page size for product searches and vendor pagination.
const PAGE_SIZE: i64 = 250;

/// Storefront sort orders.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    /// Best sellers first.
    Trending,
    /// Cheapest first.
    PriceAsc,
    /// Most expensive first.
    PriceDesc,
    /// Newest first.
    Latest,
}

impl SortOrder {
    fn product_sort(self) -> (ProductSortKeys, bool) {
        match self {
            Self::Trending => (ProductSortKeys::BestSelling, false),
            Self::PriceAsc => (ProductSortKeys::Price, false),
            Self::PriceDesc => (ProductSortKeys::Price, true),
            Self::Latest => (ProductSortKeys::CreatedAt, true),
        }
    }

    fn collection_sort(self) -> (ProductCollectionSortKeys, bool) {
        match self {
            Self::Trending => (ProductCollectionSortKeys::BestSelling, false),
            Self::PriceAsc => (ProductCollectionSortKeys::Price, false),
            Self::PriceDesc => (ProductCollectionSortKeys::Price, true),
            Self::Latest => (ProductCollectionSortKeys::Created, true),
        }
    }

    const fn as_str(self) -> &'static str {
        match self {
            Self::Trending => "trending-desc",
            Self::PriceAsc => "price-asc",
            Self::PriceDesc => "price-desc",
            Self::Latest => "latest-desc",
        }
    }
}

impl fmt::Display for SortOrder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unknown sort order name.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Unknown sort order: {0}")]
pub struct UnknownSortOrder(String);

impl FromStr for SortOrder {
    type Err = UnknownSortOrder;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "trending-desc" => Ok(Self::Trending),
            "price-asc" => Ok(Self::PriceAsc),
            "price-desc" => Ok(Self::PriceDesc),
            "latest-desc" => Ok(Self::Latest),
            other => Err(UnknownSortOrder(other.to_string())),
        }
    }
}

/// Product search parameters.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProductSearch {
    /// Free-text search across product type, title and tags.
    pub search: Option<String>,
    /// Restrict to one collection.
    pub category_id: Option<String>,
    /// Restrict to one vendor. Ignored with a category.
    pub brand: Option<String>,
    /// Sort order; relevance when absent.
    pub sort: Option<SortOrder>,
    /// Page size, 250 when absent.
    pub first: Option<i64>,
}

impl ProductSearch {
    /// Backend search query for the free-text and brand filters.
    fn query(&self) -> String {
        let mut terms = Vec::new();
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            terms.push(format!(
                "(product_type:{search}) OR (title:{search}) OR (tag:{search})"
            ));
        }
        if let Some(brand) = self.brand.as_deref().filter(|b| !b.trim().is_empty()) {
            terms.push(format!("vendor:{brand}"));
        }
        // The search group is left unparenthesized on purpose: `AND vendor:`
        // binds to the tag term only, matching existing search results
        terms.join(" AND ")
    }
}

/// How to look up a single category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryLookup {
    /// By backend id.
    Id(String),
    /// By URL handle.
    Handle(String),
}

impl<E: Execute, S: CookieStore> Commerce<E, S> {
    /// A product by URL handle, `None` when the backend has no such product.
    ///
    /// Hits are cached; misses are not.
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    #[instrument(skip(self))]
    pub async fn product(&self, slug: &str) -> Result<Option<Product>> {
        let key = CacheKey::Product(slug.to_string());
        if let Some(CacheValue::Product(product)) = self.cache().get(&key).await {
            debug!(slug, "Cache hit for product");
            return Ok(Some(*product));
        }

        let data = self
            .executor()
            .execute::<GetProductBySlug>(get_product_by_slug::Variables {
                slug: slug.to_string(),
            })
            .await?;

        let Some(product) = data.product.map(normalize_product) else {
            return Ok(None);
        };
        self.cache()
            .insert(key, CacheValue::Product(Box::new(product.clone())))
            .await;
        Ok(Some(product))
    }

    /// A product by backend id.
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    #[instrument(skip(self))]
    pub async fn product_by_id(&self, id: &str) -> Result<Option<Product>> {
        let data = self
            .executor()
            .execute::<GetProductById>(get_product_by_id::Variables { id: id.to_string() })
            .await?;
        Ok(data.product.map(normalize_product))
    }

    /// Search products.
    ///
    /// With a category, lists that collection's products (a missing
    /// collection yields no products); otherwise searches the whole catalog.
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    #[instrument(skip(self))]
    pub async fn products(&self, search: &ProductSearch) -> Result<Vec<Product>> {
        let first = Some(search.first.unwrap_or(PAGE_SIZE));

        if let Some(category_id) = &search.category_id {
            let (sort_key, reverse) = search
                .sort
                .map_or((ProductCollectionSortKeys::Relevance, false), SortOrder::collection_sort);
            let data = self
                .executor()
                .execute::<GetProductsFromCollection>(get_products_from_collection::Variables {
                    category_id: category_id.clone(),
                    first,
                    sort_key: Some(sort_key),
                    reverse: Some(reverse),
                })
                .await?;

            return Ok(data
                .collection
                .map(|collection| {
                    collection
                        .products
                        .into_nodes()
                        .map(normalize_product)
                        .collect()
                })
                .unwrap_or_default());
        }

        let (sort_key, reverse) = search
            .sort
            .map_or((ProductSortKeys::Relevance, false), SortOrder::product_sort);
        let data = self
            .executor()
            .execute::<GetAllProducts>(get_all_products::Variables {
                first,
                query: Some(search.query()),
                sort_key: Some(sort_key),
                reverse: Some(reverse),
            })
            .await?;

        Ok(data.products.into_nodes().map(normalize_product).collect())
    }

    /// The first `first` categories, sorted by title.
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    #[instrument(skip(self))]
    pub async fn categories(&self, first: i64) -> Result<Vec<Category>> {
        let value = self
            .cache()
            .use_data(CacheKey::Categories(first), || async {
                let data = self
                    .executor()
                    .execute::<GetSiteCollections>(get_site_collections::Variables { first })
                    .await?;
                let categories = data
                    .collections
                    .into_nodes()
                    .map(normalize_category)
                    .collect();
                Ok::<_, CommerceError>(CacheValue::Categories(categories))
            })
            .await?;

        Ok(match value {
            CacheValue::Categories(categories) => categories,
            _ => Vec::new(),
        })
    }

    /// One category by id or handle.
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    #[instrument(skip(self))]
    pub async fn category(&self, lookup: CategoryLookup) -> Result<Option<Category>> {
        let variables = match lookup {
            CategoryLookup::Id(id) => get_site_collection::Variables {
                id: Some(id),
                handle: None,
            },
            CategoryLookup::Handle(handle) => get_site_collection::Variables {
                id: None,
                handle: Some(handle),
            },
        };

        let data = self
            .executor()
            .execute::<GetSiteCollection>(variables)
            .await?;
        Ok(data.collection.map(normalize_category))
    }

    /// Every vendor in the catalog as a brand, de-duplicated and sorted.
    ///
    /// # Errors
    ///
    /// Returns the backend error for any page.
    #[instrument(skip(self))]
    pub async fn brands(&self) -> Result<Vec<Brand>> {
        let value = self
            .cache()
            .use_data(CacheKey::Brands, || async {
                Ok::<_, CommerceError>(CacheValue::Brands(self.fetch_brands().await?))
            })
            .await?;

        Ok(match value {
            CacheValue::Brands(brands) => brands,
            _ => Vec::new(),
        })
    }

    async fn fetch_brands(&self) -> Result<Vec<Brand>> {
        let mut vendors = Vec::new();
        let mut cursor = None;

        loop {
            let data = self
                .executor()
                .execute::<GetAllProductVendors>(get_all_product_vendors::Variables {
                    first: Some(PAGE_SIZE),
                    cursor: cursor.take(),
                })
                .await?;

            let products = data.products;
            let next = products
                .has_next_page()
                .then(|| products.end_cursor().map(str::to_string))
                .flatten();
            vendors.extend(products.into_nodes().map(|node| node.vendor));

            match next {
                Some(next) => cursor = Some(next),
                None => break,
            }
        }

        debug!(vendors = vendors.len(), "Fetched product vendors");
        Ok(normalize_brands(vendors))
    }
}
