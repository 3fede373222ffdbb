//! User-facing advisory messages.
//!
//! Every failure inside a cart operation is converted to one of four
//! advisory categories and handed to the injected [`Notifier`]. Notices are
//! fire-and-forget: they never halt the host application, and callers that
//! want machine-readable detail use the structured
//! [`CartError`](crate::store::CartError) returned alongside them.

use std::fmt;

/// Advisory categories surfaced to the shopper.
///
/// Stock violations are expected control flow but are reported through the
/// same channel as technical failures; the distinction lives in
/// [`CartError`](crate::store::CartError), not in the user-facing text.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Notice {
    /// Adding a product failed (unknown product, network, persistence).
    AddFailed,
    /// Removing a product failed (not in the cart, persistence).
    RemoveFailed,
    /// Changing a quantity failed (not in the cart, network, persistence).
    UpdateFailed,
    /// The requested quantity exceeds the available stock.
    OutOfStock,
}

impl Notice {
    /// Fixed user-facing text for this notice.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::AddFailed => "Error adding product",
            Self::RemoveFailed => "Error removing product",
            Self::UpdateFailed => "Error updating product amount",
            Self::OutOfStock => "Requested quantity out of stock",
        }
    }
}

impl fmt::Display for Notice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// User-facing advisory message channel.
///
/// Implementations are fire-and-forget; a notifier must not block or fail.
pub trait Notifier: Send + Sync + 'static {
    /// Emit an advisory notice.
    fn notify(&self, notice: Notice);
}

/// Notifier that emits notices as `tracing` error events.
///
/// The default production implementation; a UI layer would typically wrap
/// its toast system in a `Notifier` instead.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingNotifier;

impl Notifier for TracingNotifier {
    fn notify(&self, notice: Notice) {
        tracing::error!(notice = ?notice, "{}", notice.message());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_messages() {
        assert_eq!(Notice::AddFailed.to_string(), "Error adding product");
        assert_eq!(Notice::RemoveFailed.to_string(), "Error removing product");
        assert_eq!(
            Notice::UpdateFailed.to_string(),
            "Error updating product amount"
        );
        assert_eq!(
            Notice::OutOfStock.to_string(),
            "Requested quantity out of stock"
        );
    }
}
