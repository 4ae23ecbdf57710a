use thiserror::Error;

use crate::{StockKey, StockType, Symbol};

/// Construction-time validation errors exposed by `gbce-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("symbol cannot be empty")]
    EmptySymbol,
    #[error("symbol length {len} exceeds max {max}")]
    SymbolTooLong { len: usize, max: usize },
    #[error("symbol must start with an ASCII letter: '{ch}'")]
    SymbolInvalidStart { ch: char },
    #[error("symbol contains invalid character '{ch}' at index {index}")]
    SymbolInvalidChar { ch: char, index: usize },

    #[error("invalid stock type '{value}', expected one of COMMON, PREFERRED")]
    InvalidStockType { value: String },
    #[error("invalid stock key '{value}', expected SYMBOL_TYPE")]
    InvalidStockKey { value: String },

    #[error("timestamp must be RFC3339 UTC (suffix Z): '{value}'")]
    TimestampNotUtc { value: String },

    #[error("field '{field}' must be finite")]
    NonFiniteValue { field: &'static str },
    #[error("field '{field}' must be non-negative")]
    NegativeValue { field: &'static str },
    #[error("quantity of shares must be positive, got {value}")]
    NonPositiveQuantity { value: i64 },

    #[error("common stock cannot carry a fixed dividend")]
    FixedDividendOnCommon,
    #[error("preferred stock requires a fixed dividend")]
    MissingFixedDividend,

    #[error("price window must be longer than zero")]
    InvalidPriceWindow,
    #[error("invalid value '{value}' for {name}")]
    InvalidEnvValue { name: &'static str, value: String },
}

/// Top-level error type for ledger and exchange operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ExchangeError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("payload is not a trade: {reason}")]
    TypeMismatch { reason: String },

    #[error("trade for {trade} does not belong to stock {stock}")]
    OwnershipMismatch { trade: StockKey, stock: StockKey },

    #[error("{what} is not yet available for {key}")]
    NotAvailable { key: StockKey, what: &'static str },

    #[error("ticker price of {key} is zero")]
    ZeroTickerPrice { key: StockKey },

    #[error("there is no stock in the exchange with symbol: {symbol}, type: {stock_type}")]
    UnknownStock { symbol: Symbol, stock_type: StockType },
}
