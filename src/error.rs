//! Crate-wide error type
//!
//! Input problems are rejected when the engine is initialized. Lookup misses
//! during selection are never errors; they resolve to "unavailable".

use crate::sku::{DimensionId, ValueId};

/// Result alias used across the crate
pub type SkuResult<T> = Result<T, SkuError>;

/// Errors produced by the SKU engine
#[derive(Debug, thiserror::Error)]
pub enum SkuError {
    #[error("Attribute value id {value} appears in dimension {first} and dimension {second}")]
    DuplicateValueId {
        value: ValueId,
        first: DimensionId,
        second: DimensionId,
    },

    #[error("Dimension id {dimension} is declared more than once")]
    DuplicateDimensionId { dimension: DimensionId },

    #[error("Dimension {dimension} ('{name}') has no values")]
    EmptyDimension { dimension: DimensionId, name: String },

    #[error("Too many dimensions: {count} (limit {limit})")]
    TooManyDimensions { count: usize, limit: usize },

    #[error("Too many complete combinations: {count} (limit {limit})")]
    TooManyCombinations { count: u128, limit: usize },

    #[error("Invalid price {price} for combination '{key}'")]
    InvalidPrice { key: String, price: f64 },

    #[error("Unknown dimension {dimension}")]
    UnknownDimension { dimension: DimensionId },

    #[error("Value {value} does not belong to dimension {dimension}")]
    ValueNotInDimension {
        dimension: DimensionId,
        value: ValueId,
    },

    #[error("Malformed combination key '{key}': {reason}")]
    MalformedKey { key: String, reason: String },

    #[error("Config error: {0}")]
    Config(String),

    #[error("Catalog error: {0}")]
    Catalog(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Helper trait for attaching context to foreign errors
pub trait SkuErrorContext<T> {
    fn config_context(self, context: &str) -> SkuResult<T>
    where
        Self: Sized;

    fn catalog_context(self, context: &str) -> SkuResult<T>
    where
        Self: Sized;
}

impl<T, E> SkuErrorContext<T> for Result<T, E>
where
    E: std::fmt::Display,
{
    fn config_context(self, context: &str) -> SkuResult<T> {
        self.map_err(|e| SkuError::Config(format!("{}: {}", context, e)))
    }

    fn catalog_context(self, context: &str) -> SkuResult<T> {
        self.map_err(|e| SkuError::Catalog(format!("{}: {}", context, e)))
    }
}
