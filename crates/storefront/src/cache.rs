//! Shared in-memory cache for cart and catalog reads.
//!
//! One [`StoreCache`] is shared by every hook on a `Commerce` handle. The
//! cart lives under a single [`CacheKey::Cart`] slot that mutations replace
//! wholesale; catalog reads expire after the configured TTL.

use std::future::Future;
use std::time::Duration;

use cartwheel_core::{Brand, Cart, Category, Product};
use moka::future::Cache;
use tracing::debug;

use crate::config::MAX_CATALOG_CACHE_TTL;

const MAX_ENTRIES: u64 = 1000;

/// Cache key.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
pub enum CacheKey {
    /// The current shopper's cart.
    Cart,
    /// A product by handle.
    Product(String),
    /// The first `n` categories.
    Categories(i64),
    /// All brands.
    Brands,
}

/// Cached value types.
#[derive(Debug, Clone)]
pub enum CacheValue {
    /// `None` means "no cart", which is a valid cached state.
    Cart(Option<Box<Cart>>),
    Product(Box<Product>),
    Categories(Vec<Category>),
    Brands(Vec<Brand>),
}

#[derive(Debug, Clone)]
struct Entry {
    value: CacheValue,
    stale: bool,
}

/// Keyed cache with read-through fetching and explicit mutation.
#[derive(Clone)]
pub struct StoreCache {
    entries: Cache<CacheKey, Entry>,
}

impl StoreCache {
    /// Create a cache whose entries expire after `ttl`, capped at
    /// [`MAX_CATALOG_CACHE_TTL`].
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            entries: Cache::builder()
                .max_capacity(MAX_ENTRIES)
                .time_to_live(ttl.min(MAX_CATALOG_CACHE_TTL))
                .build(),
        }
    }

    /// The cached value, fresh or stale.
    pub async fn get(&self, key: &CacheKey) -> Option<CacheValue> {
        self.entries.get(key).await.map(|entry| entry.value)
    }

    /// Return the cached value, or run `fetcher` and cache its result.
    ///
    /// Stale entries are refetched. A failed fetch leaves the cache as it was.
    ///
    /// # Errors
    ///
    /// Returns the fetcher's error.
    pub async fn use_data<F, Fut, E>(&self, key: CacheKey, fetcher: F) -> Result<CacheValue, E>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<CacheValue, E>>,
    {
        if let Some(entry) = self.entries.get(&key).await
            && !entry.stale
        {
            debug!(key = ?key, "Cache hit");
            return Ok(entry.value);
        }

        let value = fetcher().await?;
        self.insert(key, value.clone()).await;
        Ok(value)
    }

    /// Replace a slot's value.
    ///
    /// With `revalidate`, the value is kept but marked stale so the next
    /// [`Self::use_data`] call refetches.
    pub async fn mutate(&self, key: CacheKey, value: CacheValue, revalidate: bool) {
        debug!(key = ?key, revalidate, "Cache mutate");
        self.entries
            .insert(
                key,
                Entry {
                    value,
                    stale: revalidate,
                },
            )
            .await;
    }

    /// Insert a fresh value.
    pub async fn insert(&self, key: CacheKey, value: CacheValue) {
        self.entries.insert(key, Entry { value, stale: false }).await;
    }

    /// Drop a slot.
    pub async fn invalidate(&self, key: &CacheKey) {
        self.entries.invalidate(key).await;
    }

    /// Drop everything.
    pub fn invalidate_all(&self) {
        self.entries.invalidate_all();
    }
}

impl CacheValue {
    /// Wrap a cart snapshot.
    #[must_use]
    pub fn cart(cart: Option<Cart>) -> Self {
        Self::Cart(cart.map(Box::new))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;

    fn brands(names: &[&str]) -> CacheValue {
        CacheValue::Brands(names.iter().map(|n| Brand::from_vendor(n)).collect())
    }

    fn brand_count(value: &CacheValue) -> usize {
        match value {
            CacheValue::Brands(brands) => brands.len(),
            _ => 0,
        }
    }

    #[tokio::test]
    async fn test_use_data_fetches_once() {
        let cache = StoreCache::new(Duration::from_secs(60));
        let calls = AtomicUsize::new(0);

        for _ in 0..3 {
            let value = cache
                .use_data(CacheKey::Brands, || async {
                    calls.fetch_add(1, Ordering::SeqCst);
                    Ok::<_, ()>(brands(&["Acme"]))
                })
                .await
                .unwrap();
            assert_eq!(brand_count(&value), 1);
        }

        assert_eq!(calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_revalidate_marks_stale() {
        let cache = StoreCache::new(Duration::from_secs(60));
        cache
            .mutate(CacheKey::Brands, brands(&["Acme", "Zed"]), true)
            .await;

        // Stale value is still readable
        assert_eq!(brand_count(&cache.get(&CacheKey::Brands).await.unwrap()), 2);

        // But the next read-through refetches
        let value = cache
            .use_data(CacheKey::Brands, || async { Ok::<_, ()>(brands(&["Acme"])) })
            .await
            .unwrap();
        assert_eq!(brand_count(&value), 1);
    }

    #[tokio::test]
    async fn test_failed_fetch_leaves_cache_untouched() {
        let cache = StoreCache::new(Duration::from_secs(60));
        cache.mutate(CacheKey::Brands, brands(&["Acme"]), true).await;

        let result = cache
            .use_data(CacheKey::Brands, || async { Err::<CacheValue, _>("boom") })
            .await;
        assert_eq!(result.unwrap_err(), "boom");
        assert_eq!(brand_count(&cache.get(&CacheKey::Brands).await.unwrap()), 1);
    }

    #[tokio::test]
    async fn test_oversized_ttl_is_capped() {
        let cache = StoreCache::new(Duration::MAX);
        cache.insert(CacheKey::Brands, brands(&["Acme"])).await;
        assert_eq!(brand_count(&cache.get(&CacheKey::Brands).await.unwrap()), 1);
        assert_eq!(
            cache.entries.policy().time_to_live(),
            Some(MAX_CATALOG_CACHE_TTL)
        );
    }

    #[tokio::test]
    async fn test_cart_slot_holds_no_cart() {
        let cache = StoreCache::new(Duration::from_secs(60));
        cache.insert(CacheKey::Cart, CacheValue::cart(None)).await;
        assert!(matches!(
            cache.get(&CacheKey::Cart).await,
            Some(CacheValue::Cart(None))
        ));

        cache.invalidate(&CacheKey::Cart).await;
        assert!(cache.get(&CacheKey::Cart).await.is_none());
    }
}
