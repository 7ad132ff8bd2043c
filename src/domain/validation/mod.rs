//! Request validation stages that run ahead of the sale mutations.
//!
//! Every stage is a plain function (or a small value like [`ForeignKey`]) that takes a typed
//! input and returns either the corrected value or a [`Rejection`]. [`SalePipeline`] composes
//! them in a fixed order; the first rejection short-circuits the rest.

pub mod foreign_key;
pub mod normalize;
pub mod pipeline;

pub use foreign_key::{ForeignKey, SALE_CLIENT};
pub use normalize::{normalize_nullable_int, parse_integer};
pub use pipeline::{parse_id, parse_sale_date, parse_total, CheckedBody, FieldMap, SalePipeline};

/// Why a validation stage stopped the request.
#[derive(Debug, thiserror::Error)]
pub enum Rejection {
    /// Caller input is unusable; the message is safe to return verbatim.
    #[error("{0}")]
    Invalid(String),
    /// The store could not answer a validation lookup.
    #[error("validation lookup failed: {0:#}")]
    Store(anyhow::Error),
}
