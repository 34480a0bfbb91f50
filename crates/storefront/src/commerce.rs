//! Commerce handle shared by every cart and catalog operation.
//!
//! Wraps the backend executor, the cart identity and the shared cache in an
//! `Arc` so hooks can be created freely and moved into spawned tasks.

use std::sync::Arc;
use std::time::Duration;

use cartwheel_core::CartLineItem;

use crate::cache::StoreCache;
use crate::cart::{AddItemHook, RemoveItemHook, UpdateItemHook, UseCart};
use crate::config::{CommerceConfig, StorefrontConfig};
use crate::identity::{CartIdentity, CookieStore};
use crate::shopify::{Execute, StorefrontClient};

/// Shared commerce state.
///
/// Cheap to clone; all clones see the same cache and cart identity.
pub struct Commerce<E, S> {
    inner: Arc<CommerceInner<E, S>>,
}

struct CommerceInner<E, S> {
    executor: E,
    identity: CartIdentity<S>,
    cache: StoreCache,
    update_debounce: Duration,
}

impl<E, S> Clone for Commerce<E, S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

impl<S: CookieStore> Commerce<StorefrontClient, S> {
    /// Build a handle talking to the configured Shopify store.
    #[must_use]
    pub fn from_config(config: &StorefrontConfig, cookies: S) -> Self {
        Self::new(
            StorefrontClient::new(&config.shopify),
            cookies,
            &config.commerce,
        )
    }
}

impl<E: Execute, S: CookieStore> Commerce<E, S> {
    /// Create a new commerce handle.
    #[must_use]
    pub fn new(executor: E, cookies: S, config: &CommerceConfig) -> Self {
        Self {
            inner: Arc::new(CommerceInner {
                executor,
                identity: CartIdentity::new(cookies, config.cookies.clone()),
                cache: StoreCache::new(config.catalog_cache_ttl),
                update_debounce: config.update_debounce,
            }),
        }
    }

    /// The backend executor.
    #[must_use]
    pub fn executor(&self) -> &E {
        &self.inner.executor
    }

    /// The cart identity.
    #[must_use]
    pub fn identity(&self) -> &CartIdentity<S> {
        &self.inner.identity
    }

    /// The shared cache.
    #[must_use]
    pub fn cache(&self) -> &StoreCache {
        &self.inner.cache
    }

    /// Read the current cart.
    #[must_use]
    pub fn use_cart(&self) -> UseCart<E, S> {
        UseCart::new(self.clone())
    }

    /// Add items to the cart, creating it if needed.
    #[must_use]
    pub fn add_item(&self) -> AddItemHook<E, S> {
        AddItemHook::new(self.clone())
    }

    /// Change line quantities, optionally bound to one line.
    ///
    /// Each hook debounces its own calls; separate hooks never cancel each
    /// other.
    #[must_use]
    pub fn update_item(&self, item: Option<CartLineItem>) -> UpdateItemHook<E, S> {
        UpdateItemHook::new(self.clone(), item, self.inner.update_debounce)
    }

    /// Remove lines, optionally bound to one line.
    #[must_use]
    pub fn remove_item(&self, item: Option<CartLineItem>) -> RemoveItemHook<E, S> {
        RemoveItemHook::new(self.clone(), item)
    }
}
