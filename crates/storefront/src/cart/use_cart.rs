//! Read the current cart.

use cartwheel_core::Cart;
use tracing::{error, instrument, warn};

use crate::cache::{CacheKey, CacheValue};
use crate::commerce::Commerce;
use crate::error::Result;
use crate::identity::CookieStore;
use crate::shopify::Execute;
use crate::shopify::conversions::normalize_cart;
use crate::shopify::queries::{GetCart, get_cart};

/// Fetch the cart named by the identity cookie.
///
/// A cart the backend no longer knows (expired or checked out) clears the
/// identity so the next add starts fresh.
pub(crate) async fn fetch<E: Execute, S: CookieStore>(
    commerce: &Commerce<E, S>,
) -> Result<Option<Cart>> {
    let Some(cart_id) = commerce.identity().cart_id(None) else {
        return Ok(None);
    };

    let data = commerce
        .executor()
        .execute::<GetCart>(get_cart::Variables {
            cart_id: cart_id.to_string(),
        })
        .await?;

    let cart = normalize_cart(data.cart);
    if cart.is_none() {
        warn!(cart_id = %cart_id, "Cart no longer exists, clearing identity");
        if let Err(e) = commerce.identity().clear() {
            error!(error = %e, "Failed to clear cart identity");
        }
    }
    Ok(cart)
}

/// Reads the cart through the shared cart slot.
pub struct UseCart<E, S> {
    commerce: Commerce<E, S>,
}

impl<E: Execute, S: CookieStore> UseCart<E, S> {
    pub(crate) const fn new(commerce: Commerce<E, S>) -> Self {
        Self { commerce }
    }

    /// The current cart, `None` when the shopper has none.
    ///
    /// Served from the cart slot when it holds a fresh snapshot.
    ///
    /// # Errors
    ///
    /// Returns the backend error; the cart slot is left as it was.
    #[instrument(skip_all)]
    pub async fn get(&self) -> Result<Option<Cart>> {
        let value = self
            .commerce
            .cache()
            .use_data(CacheKey::Cart, || async {
                fetch(&self.commerce).await.map(CacheValue::cart)
            })
            .await?;

        Ok(match value {
            CacheValue::Cart(cart) => cart.map(|cart| *cart),
            _ => None,
        })
    }

    /// Mark the cart slot stale and read it again from the backend.
    ///
    /// # Errors
    ///
    /// Returns the backend error.
    pub async fn revalidate(&self) -> Result<Option<Cart>> {
        self.commerce.cache().invalidate(&CacheKey::Cart).await;
        self.get().await
    }

    /// Checkout URL recorded when the cart was created.
    #[must_use]
    pub fn checkout_url(&self) -> Option<String> {
        self.commerce.identity().checkout_url()
    }
}
