//! RocketShoes cart state container.
//!
//! Holds the shopper's current cart, mutates it through three operations
//! (add, remove, update amount), keeps a durable snapshot in sync with
//! every mutation, and rejects mutations that would exceed the stock
//! levels reported by the inventory service.
//!
//! # Architecture
//!
//! - [`store::CartStore`] is a single-writer actor: mutations arrive as
//!   commands over a channel and are applied one at a time, so two
//!   concurrent mutations can never overwrite each other's result.
//! - Collaborators are injected at construction: an [`inventory::Inventory`]
//!   lookup, a [`notify::Notifier`] for user-facing advisories, and a
//!   [`persist::SnapshotStore`] for the durable snapshot.
//! - Observers subscribe through a `tokio::sync::watch` channel and see
//!   each committed cart exactly as it was persisted.
//!
//! # Example
//!
//! ```rust,ignore
//! use rocket_shoes_cart::{CartConfig, CartStore, HttpInventoryClient, JsonFileStore, TracingNotifier};
//! use rocket_shoes_core::ProductId;
//!
//! let config = CartConfig::load()?;
//! let handle = CartStore::spawn(
//!     HttpInventoryClient::new(&config),
//!     TracingNotifier,
//!     JsonFileStore::new(config.snapshot_path.clone()),
//! )?;
//!
//! handle.add_product(ProductId::new(1)).await?;
//! let cart = handle.cart();
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod config;
pub mod inventory;
pub mod notify;
pub mod persist;
pub mod store;

pub use config::{CartConfig, ConfigError};
pub use inventory::{HttpInventoryClient, Inventory, InventoryError};
pub use notify::{Notice, Notifier, TracingNotifier};
pub use persist::{CART_STORAGE_KEY, JsonFileStore, MemoryStore, SnapshotError, SnapshotStore};
pub use store::{CartError, CartHandle, CartStore};
