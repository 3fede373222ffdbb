//! RocketShoes Core - Shared types library.
//!
//! This crate provides the domain types used by the cart state container:
//! product identifiers, catalog records, stock levels, and the cart itself.
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no HTTP clients, no
//! persistence. Cart values are immutable: every mutation helper returns a
//! new `Cart`, which keeps the state container's read-compute-commit steps
//! free of partially applied updates.
//!
//! # Modules
//!
//! - [`types`] - `ProductId`, `CatalogProduct`, `StockLevel`, `CartLine`,
//!   and `Cart`

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
