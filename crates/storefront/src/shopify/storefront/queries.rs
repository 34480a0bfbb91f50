//! GraphQL operation definitions for the Shopify Storefront API.
//!
//! Each operation is a unit struct implementing [`GraphQLQuery`] with a
//! module of the same name holding its `Variables` and `ResponseData`, the
//! layout `graphql_client` generates. Documents are loaded from
//! `graphql/storefront/` and sent whole; `operationName` selects the
//! operation.

use graphql_client::{GraphQLQuery, QueryBody};

const CART_DOCUMENT: &str = include_str!("../../../graphql/storefront/cart.graphql");
const PRODUCTS_DOCUMENT: &str = include_str!("../../../graphql/storefront/products.graphql");
const COLLECTIONS_DOCUMENT: &str =
    include_str!("../../../graphql/storefront/collections.graphql");

/// Implement [`GraphQLQuery`] for an operation struct backed by a document.
macro_rules! operation {
    ($name:ident, $module:ident, $document:expr) => {
        impl GraphQLQuery for $name {
            type Variables = $module::Variables;
            type ResponseData = $module::ResponseData;

            fn build_query(variables: Self::Variables) -> QueryBody<Self::Variables> {
                QueryBody {
                    variables,
                    query: $document,
                    operation_name: $module::OPERATION_NAME,
                }
            }
        }
    };
}

// =============================================================================
// Cart
// =============================================================================

/// Create a cart, optionally with initial lines.
pub struct CreateCart;
operation!(CreateCart, create_cart, CART_DOCUMENT);

pub mod create_cart {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::{CartLineInput, CartMutationPayload};

    pub const OPERATION_NAME: &str = "createCart";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub lines: Option<Vec<CartLineInput>>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_create: Option<CartMutationPayload>,
    }
}

/// Fetch a cart by id.
pub struct GetCart;
operation!(GetCart, get_cart, CART_DOCUMENT);

pub mod get_cart {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::CartFields;

    pub const OPERATION_NAME: &str = "getCart";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub cart: Option<CartFields>,
    }
}

/// Add lines to an existing cart.
pub struct AddToCart;
operation!(AddToCart, add_to_cart, CART_DOCUMENT);

pub mod add_to_cart {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::{CartLineInput, CartMutationPayload};

    pub const OPERATION_NAME: &str = "addToCart";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_add: Option<CartMutationPayload>,
    }
}

/// Change line quantities.
pub struct EditCartItems;
operation!(EditCartItems, edit_cart_items, CART_DOCUMENT);

pub mod edit_cart_items {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::{CartLineUpdateInput, CartMutationPayload};

    pub const OPERATION_NAME: &str = "editCartItems";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub lines: Vec<CartLineUpdateInput>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_update: Option<CartMutationPayload>,
    }
}

/// Remove lines from a cart.
pub struct RemoveFromCart;
operation!(RemoveFromCart, remove_from_cart, CART_DOCUMENT);

pub mod remove_from_cart {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::CartMutationPayload;

    pub const OPERATION_NAME: &str = "removeFromCart";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub cart_id: String,
        pub line_ids: Vec<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct ResponseData {
        pub cart_lines_remove: Option<CartMutationPayload>,
    }
}

// =============================================================================
// Products
// =============================================================================

/// Fetch a product by handle.
pub struct GetProductBySlug;
operation!(GetProductBySlug, get_product_by_slug, PRODUCTS_DOCUMENT);

pub mod get_product_by_slug {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::ProductFields;

    pub const OPERATION_NAME: &str = "getProductBySlug";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub slug: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductFields>,
    }
}

/// Fetch a product by id.
pub struct GetProductById;
operation!(GetProductById, get_product_by_id, PRODUCTS_DOCUMENT);

pub mod get_product_by_id {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::ProductFields;

    pub const OPERATION_NAME: &str = "getProductById";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub id: String,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub product: Option<ProductFields>,
    }
}

/// Search the whole catalog.
pub struct GetAllProducts;
operation!(GetAllProducts, get_all_products, PRODUCTS_DOCUMENT);

pub mod get_all_products {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::{Connection, ProductFields, ProductSortKeys};

    pub const OPERATION_NAME: &str = "getAllProducts";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub first: Option<i64>,
        pub query: Option<String>,
        pub sort_key: Option<ProductSortKeys>,
        pub reverse: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Connection<ProductFields>,
    }
}

/// List products within one collection.
pub struct GetProductsFromCollection;
operation!(
    GetProductsFromCollection,
    get_products_from_collection,
    PRODUCTS_DOCUMENT
);

pub mod get_products_from_collection {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::{CollectionProducts, ProductCollectionSortKeys};

    pub const OPERATION_NAME: &str = "getProductsFromCollection";

    #[derive(Debug, Clone, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct Variables {
        pub category_id: String,
        pub first: Option<i64>,
        pub sort_key: Option<ProductCollectionSortKeys>,
        pub reverse: Option<bool>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<CollectionProducts>,
    }
}

// =============================================================================
// Collections
// =============================================================================

/// List collections.
pub struct GetSiteCollections;
operation!(GetSiteCollections, get_site_collections, COLLECTIONS_DOCUMENT);

pub mod get_site_collections {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::{CollectionFields, Connection};

    pub const OPERATION_NAME: &str = "getSiteCollections";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: i64,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collections: Connection<CollectionFields>,
    }
}

/// Fetch one collection by id or handle.
pub struct GetSiteCollection;
operation!(GetSiteCollection, get_site_collection, COLLECTIONS_DOCUMENT);

pub mod get_site_collection {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::CollectionFields;

    pub const OPERATION_NAME: &str = "getSiteCollection";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub id: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub handle: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub collection: Option<CollectionFields>,
    }
}

/// Page through product vendors.
pub struct GetAllProductVendors;
operation!(GetAllProductVendors, get_all_product_vendors, COLLECTIONS_DOCUMENT);

pub mod get_all_product_vendors {
    use serde::{Deserialize, Serialize};

    use crate::shopify::types::{Connection, VendorFields};

    pub const OPERATION_NAME: &str = "getAllProductVendors";

    #[derive(Debug, Clone, Serialize)]
    pub struct Variables {
        pub first: Option<i64>,
        pub cursor: Option<String>,
    }

    #[derive(Debug, Clone, Deserialize)]
    pub struct ResponseData {
        pub products: Connection<VendorFields>,
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_operation_names_exist_in_their_documents() {
        let operations = [
            (create_cart::OPERATION_NAME, CART_DOCUMENT),
            (get_cart::OPERATION_NAME, CART_DOCUMENT),
            (add_to_cart::OPERATION_NAME, CART_DOCUMENT),
            (edit_cart_items::OPERATION_NAME, CART_DOCUMENT),
            (remove_from_cart::OPERATION_NAME, CART_DOCUMENT),
            (get_product_by_slug::OPERATION_NAME, PRODUCTS_DOCUMENT),
            (get_product_by_id::OPERATION_NAME, PRODUCTS_DOCUMENT),
            (get_all_products::OPERATION_NAME, PRODUCTS_DOCUMENT),
            (
                get_products_from_collection::OPERATION_NAME,
                PRODUCTS_DOCUMENT,
            ),
            (get_site_collections::OPERATION_NAME, COLLECTIONS_DOCUMENT),
            (get_site_collection::OPERATION_NAME, COLLECTIONS_DOCUMENT),
            (get_all_product_vendors::OPERATION_NAME, COLLECTIONS_DOCUMENT),
        ];

        for (name, document) in operations {
            let declared = document.contains(&format!("query {name}("))
                || document.contains(&format!("mutation {name}("));
            assert!(declared, "operation {name} missing from its document");
        }
    }

    #[test]
    fn test_build_query_serializes_variables() {
        let body = RemoveFromCart::build_query(remove_from_cart::Variables {
            cart_id: "gid://shopify/Cart/1".to_string(),
            line_ids: vec!["gid://shopify/CartLine/1".to_string()],
        });
        assert_eq!(body.operation_name, "removeFromCart");

        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["variables"]["cartId"], "gid://shopify/Cart/1");
        assert_eq!(json["variables"]["lineIds"][0], "gid://shopify/CartLine/1");
        assert_eq!(json["operationName"], "removeFromCart");
    }

    #[test]
    fn test_collection_lookup_omits_absent_keys() {
        let variables = get_site_collection::Variables {
            id: None,
            handle: Some("summer".to_string()),
        };
        assert_eq!(
            serde_json::to_value(&variables).unwrap(),
            serde_json::json!({ "handle": "summer" })
        );
    }
}
