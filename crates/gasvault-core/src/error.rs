use thiserror::Error;
use time::Date;

/// Validation and configuration errors exposed by `gasvault-core`.
///
/// These are fatal: they are raised before any replay or pricing begins.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ValidationError {
    #[error("price series cannot be empty")]
    EmptyPriceSeries,
    #[error("price series must be strictly increasing by date at index {index}")]
    UnsortedPriceSeries { index: usize },
    #[error("price for {date} must be finite")]
    NonFinitePrice { date: Date },

    #[error("invalid event kind '{value}', expected one of inject, withdraw")]
    InvalidEventKind { value: String },
    #[error("event volume must be positive and finite: {volume} on {date}")]
    InvalidEventVolume { date: Date, volume: f64 },

    #[error("capacity must be finite and non-negative: {value}")]
    InvalidCapacity { value: f64 },
    #[error("field '{field}' must be finite and positive: {value}")]
    NonPositiveRate { field: &'static str, value: f64 },
    #[error("storage cost rate must be finite and non-negative: {value}")]
    InvalidStorageCostRate { value: f64 },
    #[error("initial volume {volume} must lie within [0, {capacity}]")]
    InitialVolumeOutOfBounds { volume: f64, capacity: f64 },

    #[error("valuation window end {end} must be after start {start}")]
    InvalidWindow { start: Date, end: Date },
}

/// Top-level error type for engine operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("price query for {date} is outside the observed range [{first}, {last}]")]
    PriceOutOfRange { date: Date, first: Date, last: Date },
}
