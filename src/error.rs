//! Error type for model construction and configuration I/O.
//!
//! Training and querying never fail; degenerate input yields empty or
//! neutral results instead.

use thiserror::Error;

/// Errors raised while building a [`crate::LanguageModel`] or handling its
/// persisted configuration.
#[derive(Debug, Error)]
pub enum Error {
    /// N-gram orders and weights were given with different lengths.
    #[error("n-gram orders and weights have different lengths: {orders} vs {weights}")]
    WeightCountMismatch { orders: usize, weights: usize },

    /// An n-gram order of zero was configured.
    #[error("n-gram order must be at least 1, got {0}")]
    InvalidOrder(usize),

    /// The same n-gram order was configured twice.
    #[error("n-gram order {0} is configured more than once")]
    DuplicateOrder(usize),

    /// A weight was negative, NaN or infinite.
    #[error("n-gram weight for order {order} must be finite and non-negative, got {weight}")]
    InvalidWeight { order: usize, weight: f64 },

    /// The primary order is not one of the configured orders.
    #[error("primary n-gram order {0} is not among the configured orders")]
    UnknownPrimaryOrder(usize),

    /// Reading or writing the persisted configuration failed.
    #[error("configuration error: {0}")]
    Config(#[from] confy::ConfyError),
}

/// Result type for NarrowMind operations.
pub type Result<T> = std::result::Result<T, Error>;
