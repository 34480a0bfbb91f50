//! Cart orchestration.
//!
//! Each hook pairs a fetcher (input validation, request shaping and
//! normalization) with reconciliation into the shared cart slot. Every
//! hook writes the same [`CacheKey::Cart`](crate::cache::CacheKey::Cart)
//! slot, so readers see the latest mutation regardless of which hook ran it.

mod add_item;
mod debounce;
mod remove_item;
mod update_item;
mod use_cart;

pub use add_item::{AddItemHook, AddItemInput, CartItemBody};
pub use debounce::{Debounced, Debouncer};
pub use remove_item::{RemoveItemHook, RemoveItemInput};
pub use update_item::{UpdateItemHook, UpdateItemInput, UpdateOutcome};
pub use use_cart::UseCart;
