//! Cart identity: which cart belongs to this shopper.
//!
//! The cart id and checkout URL live in two cookies named
//! `{namespace}_cartId` and `{namespace}_checkoutUrl`. Both are written
//! together with one policy (path `/`, expiry, `SameSite`, `Secure`) and
//! cleared together.

mod store;

pub use store::{CookieStore, CookieStoreError, FileCookieStore, MemoryCookieStore};

use cartwheel_core::CartId;
use cookie::Cookie;
use cookie::time::{Duration, OffsetDateTime};
use tracing::debug;

use crate::config::{CartCookieConfig, MAX_COOKIE_EXPIRY_DAYS};

/// Reads and writes the cart identity cookies.
#[derive(Debug)]
pub struct CartIdentity<S> {
    store: S,
    config: CartCookieConfig,
}

impl<S: CookieStore> CartIdentity<S> {
    /// Create an identity over a cookie store.
    pub const fn new(store: S, config: CartCookieConfig) -> Self {
        Self { store, config }
    }

    /// The cookie policy in use.
    pub const fn config(&self) -> &CartCookieConfig {
        &self.config
    }

    /// The underlying cookie store.
    pub const fn store(&self) -> &S {
        &self.store
    }

    /// Current cart id: `explicit` when given, else the cart id cookie.
    pub fn cart_id(&self, explicit: Option<&CartId>) -> Option<CartId> {
        explicit
            .cloned()
            .or_else(|| self.store.get(&self.config.cart_id_cookie()).map(CartId::new))
    }

    /// Checkout URL from the last cart creation.
    pub fn checkout_url(&self) -> Option<String> {
        self.store.get(&self.config.checkout_url_cookie())
    }

    /// Persist a newly created cart's id and checkout URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie store fails to persist either cookie.
    pub fn set_cart_id(
        &self,
        cart_id: &CartId,
        checkout_url: &str,
    ) -> Result<(), CookieStoreError> {
        let id_cookie = self.build_cookie(self.config.cart_id_cookie(), cart_id.to_string());
        let url_cookie =
            self.build_cookie(self.config.checkout_url_cookie(), checkout_url.to_string());

        self.store.set(id_cookie)?;
        self.store.set(url_cookie)?;
        debug!(cart_id = %cart_id, "Stored cart identity");
        Ok(())
    }

    /// Forget the cart.
    ///
    /// # Errors
    ///
    /// Returns an error if the cookie store fails to delete either cookie.
    pub fn clear(&self) -> Result<(), CookieStoreError> {
        self.store.remove(&self.config.cart_id_cookie())?;
        self.store.remove(&self.config.checkout_url_cookie())?;
        debug!("Cleared cart identity");
        Ok(())
    }

    fn build_cookie(&self, name: String, value: String) -> Cookie<'static> {
        let lifetime = Duration::days(self.config.expiry_days.clamp(0, MAX_COOKIE_EXPIRY_DAYS));

        let mut cookie = Cookie::build((name, value))
            .path("/")
            .max_age(lifetime)
            .same_site(self.config.same_site)
            .secure(self.config.secure)
            .build();
        if let Some(expires) = OffsetDateTime::now_utc().checked_add(lifetime) {
            cookie.set_expires(expires);
        }
        cookie
    }
}
