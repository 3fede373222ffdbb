//! The shopper's cart: an ordered collection of product lines.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::catalog::CatalogProduct;
use crate::types::id::ProductId;

/// One line in the cart: a catalog snapshot plus the selected quantity.
///
/// The product fields are flattened so a serialized line has the shape
/// `{id, title, price, image, amount}` - the same shape the storefront has
/// always persisted under its snapshot key.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    #[serde(flatten)]
    pub product: CatalogProduct,
    /// Quantity of this product in the cart, always at least 1.
    pub amount: u32,
}

impl CartLine {
    /// Create a new cart line.
    #[must_use]
    pub const fn new(product: CatalogProduct, amount: u32) -> Self {
        Self { product, amount }
    }

    /// Product identifier of this line.
    #[must_use]
    pub const fn id(&self) -> ProductId {
        self.product.id
    }
}

/// Violation of a cart invariant found while constructing a cart.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum InvalidCart {
    /// Two lines share the same product id.
    #[error("duplicate product in cart: {0}")]
    DuplicateProduct(ProductId),

    /// A line has a zero amount.
    #[error("zero amount for product: {0}")]
    ZeroAmount(ProductId),
}

/// Ordered collection of cart lines, unique by product id.
///
/// Insertion order is the only ordering. Serializes as a plain JSON array
/// of lines; deserialization re-validates the uniqueness and
/// minimum-amount invariants, so a corrupt snapshot is rejected at load
/// time rather than silently accepted.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<CartLine>", into = "Vec<CartLine>")]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    /// Create an empty cart.
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// All lines in insertion order.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines in the cart.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Whether the cart has a line for `id`.
    #[must_use]
    pub fn contains(&self, id: ProductId) -> bool {
        self.line(id).is_some()
    }

    /// The line for `id`, if present.
    #[must_use]
    pub fn line(&self, id: ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| line.id() == id)
    }

    /// In-cart quantity for `id`, if present.
    #[must_use]
    pub fn amount_of(&self, id: ProductId) -> Option<u32> {
        self.line(id).map(|line| line.amount)
    }

    /// New cart with `line` appended.
    ///
    /// The caller ensures the line's id is not already present.
    #[must_use]
    pub fn with_line(&self, line: CartLine) -> Self {
        debug_assert!(!self.contains(line.id()), "duplicate cart line");
        let mut lines = self.lines.clone();
        lines.push(line);
        Self { lines }
    }

    /// New cart with the amount of the line for `id` replaced.
    ///
    /// Lines for other ids are untouched; if `id` is absent the cart is
    /// returned unchanged.
    #[must_use]
    pub fn with_amount(&self, id: ProductId, amount: u32) -> Self {
        let lines = self
            .lines
            .iter()
            .map(|line| {
                if line.id() == id {
                    CartLine::new(line.product.clone(), amount)
                } else {
                    line.clone()
                }
            })
            .collect();
        Self { lines }
    }

    /// New cart without the line for `id`; order of the rest is preserved.
    #[must_use]
    pub fn without(&self, id: ProductId) -> Self {
        let lines = self
            .lines
            .iter()
            .filter(|line| line.id() != id)
            .cloned()
            .collect();
        Self { lines }
    }
}

impl TryFrom<Vec<CartLine>> for Cart {
    type Error = InvalidCart;

    fn try_from(lines: Vec<CartLine>) -> Result<Self, Self::Error> {
        for (index, line) in lines.iter().enumerate() {
            if line.amount == 0 {
                return Err(InvalidCart::ZeroAmount(line.id()));
            }
            if lines
                .iter()
                .take(index)
                .any(|earlier| earlier.id() == line.id())
            {
                return Err(InvalidCart::DuplicateProduct(line.id()));
            }
        }
        Ok(Self { lines })
    }
}

impl From<Cart> for Vec<CartLine> {
    fn from(cart: Cart) -> Self {
        cart.lines
    }
}
