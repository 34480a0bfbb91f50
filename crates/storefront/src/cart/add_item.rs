//! Add items to the cart, creating the cart on first use.

use cartwheel_core::{Cart, CartId, VariantId};
use tracing::{error, info, instrument};

use crate::cache::{CacheKey, CacheValue};
use crate::commerce::Commerce;
use crate::error::{Result, ValidationError};
use crate::identity::CookieStore;
use crate::shopify::Execute;
use crate::shopify::conversions::mutation_cart;
use crate::shopify::queries::{AddToCart, CreateCart, add_to_cart, create_cart};
use crate::shopify::types::CartLineInput;

/// One item to add.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CartItemBody {
    /// Variant to add.
    pub variant_id: VariantId,
    /// Quantity, 1 when absent.
    pub quantity: Option<i64>,
}

impl CartItemBody {
    /// One unit of a variant.
    #[must_use]
    pub fn new(variant_id: impl Into<VariantId>) -> Self {
        Self {
            variant_id: variant_id.into(),
            quantity: None,
        }
    }

    /// Set the quantity.
    #[must_use]
    pub const fn with_quantity(mut self, quantity: i64) -> Self {
        self.quantity = Some(quantity);
        self
    }
}

/// Input for [`AddItemHook::add`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AddItemInput {
    /// Items to add.
    pub items: Vec<CartItemBody>,
    /// Cart to add to instead of the one in the identity cookie.
    pub cart_id: Option<CartId>,
}

impl From<CartItemBody> for AddItemInput {
    fn from(item: CartItemBody) -> Self {
        Self {
            items: vec![item],
            cart_id: None,
        }
    }
}

impl From<Vec<CartItemBody>> for AddItemInput {
    fn from(items: Vec<CartItemBody>) -> Self {
        Self {
            items,
            cart_id: None,
        }
    }
}

/// Validate input and run the backend mutation.
pub(crate) async fn fetch<E: Execute, S: CookieStore>(
    commerce: &Commerce<E, S>,
    input: AddItemInput,
) -> Result<Cart> {
    if input.items.is_empty() {
        return Err(ValidationError::NoItems.into());
    }

    let lines = input
        .items
        .into_iter()
        .map(|item| {
            let quantity = item.quantity.unwrap_or(1);
            if quantity < 1 {
                return Err(ValidationError::InvalidQuantity(quantity));
            }
            Ok(CartLineInput {
                merchandise_id: item.variant_id.into_inner(),
                quantity,
            })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;

    let Some(cart_id) = commerce.identity().cart_id(input.cart_id.as_ref()) else {
        let data = commerce
            .executor()
            .execute::<CreateCart>(create_cart::Variables { lines: Some(lines) })
            .await?;
        let cart = mutation_cart(data.cart_create, "create cart")?;

        // The cart exists on the backend either way; a lost cookie only
        // means the next add starts a new cart.
        if let Err(e) = commerce.identity().set_cart_id(&cart.id, &cart.url) {
            error!(error = %e, cart_id = %cart.id, "Failed to persist cart identity");
        }
        info!(cart_id = %cart.id, "Created cart");
        return Ok(cart);
    };

    let data = commerce
        .executor()
        .execute::<AddToCart>(add_to_cart::Variables {
            cart_id: cart_id.into_inner(),
            lines,
        })
        .await?;

    Ok(mutation_cart(data.cart_lines_add, "add to cart")?)
}

/// Adds items to the cart and refreshes the shared cart slot.
pub struct AddItemHook<E, S> {
    commerce: Commerce<E, S>,
}

impl<E: Execute, S: CookieStore> AddItemHook<E, S> {
    pub(crate) const fn new(commerce: Commerce<E, S>) -> Self {
        Self { commerce }
    }

    /// Add items; creates a cart and stores its identity when there is none.
    ///
    /// # Errors
    ///
    /// Returns a validation error for empty input or quantities below 1, or
    /// the backend error. The cached cart is untouched on error.
    #[instrument(skip_all)]
    pub async fn add(&self, input: impl Into<AddItemInput>) -> Result<Cart> {
        let cart = fetch(&self.commerce, input.into()).await?;
        self.commerce
            .cache()
            .mutate(CacheKey::Cart, CacheValue::cart(Some(cart.clone())), false)
            .await;
        Ok(cart)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::error::CommerceError;
    use crate::identity::CookieStore as _;
    use crate::testing::{cart_payload, commerce, mutation_response};

    #[tokio::test]
    async fn test_first_add_creates_cart_and_sets_cookies() {
        let (commerce, cookies) = commerce();
        commerce.executor().respond(
            "createCart",
            mutation_response("cartCreate", cart_payload("gid://shopify/Cart/new", &[("line-1", 2)])),
        );

        let cart = commerce
            .add_item()
            .add(CartItemBody::new("gid://shopify/ProductVariant/100").with_quantity(2))
            .await
            .unwrap();

        assert_eq!(cart.id.as_str(), "gid://shopify/Cart/new");
        assert_eq!(commerce.executor().operations(), vec!["createCart"]);

        let calls = commerce.executor().calls();
        assert_eq!(
            calls[0].variables["lines"][0]["merchandiseId"],
            "gid://shopify/ProductVariant/100"
        );
        assert_eq!(calls[0].variables["lines"][0]["quantity"], 2);

        assert_eq!(
            cookies.get("shopify_cartId").as_deref(),
            Some("gid://shopify/Cart/new")
        );
        assert_eq!(
            cookies.get("shopify_checkoutUrl").as_deref(),
            Some("https://shop.example/checkouts/2")
        );
    }

    #[tokio::test]
    async fn test_add_to_existing_cart() {
        let (commerce, _) = commerce();
        commerce
            .identity()
            .set_cart_id(&CartId::new("gid://shopify/Cart/1"), "https://checkout")
            .unwrap();
        commerce.executor().respond(
            "addToCart",
            mutation_response("cartLinesAdd", cart_payload("gid://shopify/Cart/1", &[("line-1", 1)])),
        );

        commerce
            .add_item()
            .add(CartItemBody::new("gid://shopify/ProductVariant/100"))
            .await
            .unwrap();

        let calls = commerce.executor().calls();
        assert_eq!(commerce.executor().operations(), vec!["addToCart"]);
        assert_eq!(calls[0].variables["cartId"], "gid://shopify/Cart/1");
        // Quantity defaults to 1
        assert_eq!(calls[0].variables["lines"][0]["quantity"], 1);
    }

    #[tokio::test]
    async fn test_add_updates_cached_cart() {
        let (commerce, _) = commerce();
        commerce.executor().respond(
            "createCart",
            mutation_response("cartCreate", cart_payload("gid://shopify/Cart/new", &[("line-1", 1)])),
        );

        commerce
            .add_item()
            .add(CartItemBody::new("gid://shopify/ProductVariant/100"))
            .await
            .unwrap();

        // Served from the cart slot without another backend call
        let cart = commerce.use_cart().get().await.unwrap().unwrap();
        assert_eq!(cart.id.as_str(), "gid://shopify/Cart/new");
        assert_eq!(commerce.executor().operations(), vec!["createCart"]);
    }

    #[tokio::test]
    async fn test_invalid_quantity_makes_no_calls() {
        let (commerce, _) = commerce();

        let err = commerce
            .add_item()
            .add(CartItemBody::new("gid://shopify/ProductVariant/100").with_quantity(0))
            .await
            .unwrap_err();

        assert!(matches!(
            err,
            CommerceError::Validation(ValidationError::InvalidQuantity(0))
        ));
        assert!(commerce.executor().calls().is_empty());
    }

    #[tokio::test]
    async fn test_empty_input_is_rejected() {
        let (commerce, _) = commerce();
        let err = commerce
            .add_item()
            .add(AddItemInput::default())
            .await
            .unwrap_err();
        assert!(matches!(
            err,
            CommerceError::Validation(ValidationError::NoItems)
        ));
    }

    #[tokio::test]
    async fn test_user_errors_surface_and_cache_untouched() {
        let (commerce, cookies) = commerce();
        commerce.executor().respond(
            "createCart",
            serde_json::json!({
                "cartCreate": {
                    "cart": null,
                    "userErrors": [{ "message": "Merchandise does not exist" }]
                }
            }),
        );

        let err = commerce
            .add_item()
            .add(CartItemBody::new("gid://shopify/ProductVariant/missing"))
            .await
            .unwrap_err();

        assert_eq!(
            err.to_string(),
            "Shopify error: User error: Merchandise does not exist"
        );
        assert!(cookies.get("shopify_cartId").is_none());
        assert!(commerce.cache().get(&CacheKey::Cart).await.is_none());
    }
}
