//! Core types for the RocketShoes cart.

pub mod cart;
pub mod catalog;
pub mod id;

pub use cart::{Cart, CartLine, InvalidCart};
pub use catalog::{CatalogProduct, StockLevel};
pub use id::ProductId;
