//! The cart state container.
//!
//! `CartStore` is a single-writer actor: mutations arrive as commands over
//! an mpsc channel and are applied one at a time, each producing a new
//! `Cart` value that is persisted before it becomes visible. Two mutations
//! issued concurrently through [`CartHandle`] are therefore applied
//! serially against the latest committed cart; the lost-update race of a
//! shared read-modify-write is impossible by construction.
//!
//! Every failure is reported twice: as a structured [`CartError`] to the
//! caller, and as one of the four advisory [`Notice`] categories to the
//! injected notifier. Neither path panics or halts the host.

use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tracing::{debug, error, info, instrument};

use rocket_shoes_core::{Cart, CartLine, ProductId};

use crate::inventory::{Inventory, InventoryError};
use crate::notify::{Notice, Notifier};
use crate::persist::{CART_STORAGE_KEY, SnapshotError, SnapshotStore};

const COMMAND_BUFFER: usize = 16;

/// Errors produced by cart operations.
///
/// Only the error kind distinguishes expected stock violations from
/// technical failures; all of them surface to the shopper as an advisory
/// notice with fixed text.
#[derive(Debug, Error)]
pub enum CartError {
    /// Catalog lookup failed while adding a product.
    #[error("product lookup failed: {0}")]
    ProductLookup(#[source] InventoryError),

    /// Stock lookup failed.
    #[error("stock lookup failed: {0}")]
    StockLookup(#[source] InventoryError),

    /// The requested amount exceeds the available stock.
    #[error("requested amount {requested} exceeds stock {available} for product {id}")]
    OutOfStock {
        id: ProductId,
        requested: i64,
        available: u32,
    },

    /// The requested amount is zero or negative.
    ///
    /// Reported to the shopper with the same text as [`Self::OutOfStock`];
    /// the split exists for callers, not for the UI.
    #[error("invalid amount {0}: must be at least 1")]
    InvalidAmount(i64),

    /// The product has no line in the cart.
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),

    /// Writing the snapshot failed; the cart was left unchanged.
    #[error("snapshot write failed: {0}")]
    Persist(#[from] SnapshotError),

    /// The store task has shut down.
    #[error("cart store is closed")]
    Closed,
}

enum Command {
    Add {
        id: ProductId,
        reply: oneshot::Sender<Result<(), CartError>>,
    },
    Remove {
        id: ProductId,
        reply: oneshot::Sender<Result<(), CartError>>,
    },
    Update {
        id: ProductId,
        amount: i64,
        reply: oneshot::Sender<Result<(), CartError>>,
    },
}

/// Single-writer cart state container.
///
/// Constructed and spawned through [`CartStore::spawn`]; all interaction
/// goes through the returned [`CartHandle`].
pub struct CartStore<I, N, S> {
    cart: Cart,
    inventory: I,
    notifier: N,
    snapshots: S,
    commands: mpsc::Receiver<Command>,
    published: watch::Sender<Cart>,
}

impl<I, N, S> CartStore<I, N, S>
where
    I: Inventory,
    N: Notifier,
    S: SnapshotStore,
{
    /// Load the persisted cart and spawn the store task.
    ///
    /// The cart starts from the snapshot stored under
    /// [`CART_STORAGE_KEY`], or empty if the key is absent. Must be called
    /// within a tokio runtime.
    ///
    /// # Errors
    ///
    /// Returns an error if the snapshot cannot be read or does not parse;
    /// a corrupt snapshot fails the startup loudly rather than degrading
    /// to an empty cart.
    pub fn spawn(inventory: I, notifier: N, snapshots: S) -> Result<CartHandle, SnapshotError> {
        let cart = load_cart(&snapshots)?;
        info!(lines = cart.len(), "cart loaded from snapshot");

        let (command_tx, commands) = mpsc::channel(COMMAND_BUFFER);
        let (published, subscription) = watch::channel(cart.clone());

        let store = Self {
            cart,
            inventory,
            notifier,
            snapshots,
            commands,
            published,
        };
        tokio::spawn(store.run());

        Ok(CartHandle {
            commands: command_tx,
            published: subscription,
        })
    }

    async fn run(mut self) {
        while let Some(command) = self.commands.recv().await {
            match command {
                Command::Add { id, reply } => {
                    let _ = reply.send(self.add_product(id).await);
                }
                Command::Remove { id, reply } => {
                    let _ = reply.send(self.remove_product(id));
                }
                Command::Update { id, amount, reply } => {
                    let _ = reply.send(self.update_amount(id, amount).await);
                }
            }
        }
        debug!("all handles dropped, cart store shutting down");
    }

    #[instrument(skip(self))]
    async fn add_product(&mut self, id: ProductId) -> Result<(), CartError> {
        match self.try_add(id).await {
            Ok(()) => {
                info!(amount = self.cart.amount_of(id), "product added to cart");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "add to cart failed");
                let notice = match e {
                    CartError::OutOfStock { .. } => Notice::OutOfStock,
                    _ => Notice::AddFailed,
                };
                self.notifier.notify(notice);
                Err(e)
            }
        }
    }

    async fn try_add(&mut self, id: ProductId) -> Result<(), CartError> {
        let next = match self.cart.line(id) {
            // First add: fetch the catalog record, no stock check.
            None => {
                let product = self
                    .inventory
                    .product(id)
                    .await
                    .map_err(CartError::ProductLookup)?;
                self.cart.with_line(CartLine::new(product, 1))
            }
            // Increment: gated by the live stock level.
            Some(line) => {
                let stock = self
                    .inventory
                    .stock(id)
                    .await
                    .map_err(CartError::StockLookup)?;
                if line.amount >= stock.amount {
                    return Err(CartError::OutOfStock {
                        id,
                        requested: i64::from(line.amount) + 1,
                        available: stock.amount,
                    });
                }
                self.cart.with_amount(id, line.amount + 1)
            }
        };
        self.commit(next)
    }

    #[instrument(skip(self))]
    fn remove_product(&mut self, id: ProductId) -> Result<(), CartError> {
        match self.try_remove(id) {
            Ok(()) => {
                info!("product removed from cart");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "remove from cart failed");
                self.notifier.notify(Notice::RemoveFailed);
                Err(e)
            }
        }
    }

    // Synchronous and local: removal never consults the inventory.
    fn try_remove(&mut self, id: ProductId) -> Result<(), CartError> {
        if !self.cart.contains(id) {
            return Err(CartError::NotInCart(id));
        }
        self.commit(self.cart.without(id))
    }

    #[instrument(skip(self))]
    async fn update_amount(&mut self, id: ProductId, amount: i64) -> Result<(), CartError> {
        match self.try_update(id, amount).await {
            Ok(()) => {
                info!("cart amount updated");
                Ok(())
            }
            Err(e) => {
                error!(error = %e, "cart amount update failed");
                let notice = match e {
                    // Same user-facing text for a non-positive amount as
                    // for stock exhaustion; the error kind differs.
                    CartError::OutOfStock { .. } | CartError::InvalidAmount(_) => {
                        Notice::OutOfStock
                    }
                    _ => Notice::UpdateFailed,
                };
                self.notifier.notify(notice);
                Err(e)
            }
        }
    }

    async fn try_update(&mut self, id: ProductId, amount: i64) -> Result<(), CartError> {
        // Checked before any inventory call: updating an id that is not in
        // the cart is an error, not a silent no-op.
        if !self.cart.contains(id) {
            return Err(CartError::NotInCart(id));
        }
        if amount <= 0 {
            return Err(CartError::InvalidAmount(amount));
        }

        let stock = self
            .inventory
            .stock(id)
            .await
            .map_err(CartError::StockLookup)?;
        if amount > i64::from(stock.amount) {
            return Err(CartError::OutOfStock {
                id,
                requested: amount,
                available: stock.amount,
            });
        }

        // amount is in (0, stock.amount] here, so the conversion is exact.
        let requested = u32::try_from(amount).map_err(|_| CartError::InvalidAmount(amount))?;
        self.commit(self.cart.with_amount(id, requested))
    }

    /// Persist the new cart, then make it visible.
    ///
    /// A failed write leaves both the in-memory cart and the published
    /// value untouched, so observers never see a cart that did not reach
    /// the durable store.
    fn commit(&mut self, next: Cart) -> Result<(), CartError> {
        let raw = serde_json::to_string(&next).map_err(SnapshotError::from)?;
        self.snapshots.set(CART_STORAGE_KEY, &raw)?;
        self.cart = next;
        self.published.send_replace(self.cart.clone());
        Ok(())
    }
}

fn load_cart<S: SnapshotStore>(snapshots: &S) -> Result<Cart, SnapshotError> {
    match snapshots.get(CART_STORAGE_KEY)? {
        Some(raw) => Ok(serde_json::from_str(&raw)?),
        None => Ok(Cart::new()),
    }
}

/// Cloneable front end to a spawned [`CartStore`].
///
/// Mutations are sent to the store task and awaited; the current cart and
/// a change subscription are available without touching the task.
#[derive(Debug, Clone)]
pub struct CartHandle {
    commands: mpsc::Sender<Command>,
    published: watch::Receiver<Cart>,
}

impl CartHandle {
    /// Add one unit of a product to the cart.
    ///
    /// A product not yet in the cart is appended with amount 1 after a
    /// catalog lookup; a product already present is incremented, gated by
    /// the live stock level.
    ///
    /// # Errors
    ///
    /// Returns the structured failure; the shopper-facing notice has
    /// already been emitted by the store.
    pub async fn add_product(&self, id: ProductId) -> Result<(), CartError> {
        self.request(|reply| Command::Add { id, reply }).await
    }

    /// Remove a product's line from the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] if the product has no line, or a
    /// persistence failure.
    pub async fn remove_product(&self, id: ProductId) -> Result<(), CartError> {
        self.request(|reply| Command::Remove { id, reply }).await
    }

    /// Set a product's in-cart quantity to exactly `amount`.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::NotInCart`] for an id without a line,
    /// [`CartError::InvalidAmount`] for a non-positive amount,
    /// [`CartError::OutOfStock`] when the amount exceeds the stock, or a
    /// lookup/persistence failure.
    pub async fn update_amount(&self, id: ProductId, amount: i64) -> Result<(), CartError> {
        self.request(|reply| Command::Update { id, amount, reply })
            .await
    }

    /// Current committed cart.
    #[must_use]
    pub fn cart(&self) -> Cart {
        self.published.borrow().clone()
    }

    /// Subscribe to cart changes.
    ///
    /// The receiver yields every committed cart; the UI re-renders on each
    /// change.
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<Cart> {
        self.published.clone()
    }

    async fn request(
        &self,
        make: impl FnOnce(oneshot::Sender<Result<(), CartError>>) -> Command,
    ) -> Result<(), CartError> {
        let (reply_tx, reply_rx) = oneshot::channel();
        self.commands
            .send(make(reply_tx))
            .await
            .map_err(|_| CartError::Closed)?;
        reply_rx.await.map_err(|_| CartError::Closed)?
    }
}

#[cfg(test)]
mod tests {
    use crate::persist::MemoryStore;

    use super::*;

    #[test]
    fn test_load_cart_defaults_to_empty() {
        let store = MemoryStore::new();
        let cart = load_cart(&store).expect("loadable");
        assert!(cart.is_empty());
    }

    #[test]
    fn test_load_cart_rejects_corrupt_snapshot() {
        let mut store = MemoryStore::new();
        store
            .set(CART_STORAGE_KEY, "{not a cart}")
            .expect("writable");
        assert!(matches!(
            load_cart(&store),
            Err(SnapshotError::Corrupt(_))
        ));
    }
}
