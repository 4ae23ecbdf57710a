//! # GBCE Core
//!
//! Trade recording and price metrics for the Global Beverage Corporation
//! Exchange.
//!
//! ## Overview
//!
//! - **Validated value types** for symbols, stock types, timestamps and trades
//! - **Time-ordered trade ledger** per stock, tolerant of out-of-order arrival
//! - **Per-stock metrics**: ticker price, dividend, dividend yield, P/E ratio
//!   and the volume-weighted price over a trailing window
//! - **All-share index**: geometric mean of every listed stock's price
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`config`] | Exchange-wide settings (price window) |
//! | [`domain`] | Value types (Symbol, StockType, StockKey, UtcDateTime) |
//! | [`error`] | Validation and exchange errors |
//! | [`exchange`] | Stock registry and all-share index |
//! | [`ledger`] | Time-ordered trade storage |
//! | [`search`] | Key-based binary search and insertion |
//! | [`stock`] | Stocks and per-stock metrics |
//! | [`trade`] | Executed trades |
//!
//! ## Quick Start
//!
//! ```rust
//! use gbce_core::{BuySellIndicator, Exchange, Stock, StockType, Symbol, Trade, UtcDateTime};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut exchange = Exchange::new();
//! exchange.add_stock(Stock::new(Symbol::parse("TEA")?, StockType::Common, 100.0, 0.0, None)?);
//!
//! let now = UtcDateTime::parse("2024-01-01T12:00:00Z")?;
//! exchange.record_trade(Trade::new(
//!     Symbol::parse("TEA")?,
//!     StockType::Common,
//!     now,
//!     100,
//!     98.5,
//!     BuySellIndicator::Buy,
//! )?)?;
//!
//! assert_eq!(exchange.all_share_index(now), Some(98.5));
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Construction failures are [`ValidationError`]s. Recording and querying
//! return [`ExchangeError`], which wraps validation failures and adds
//! ownership, availability and unknown-stock cases. A missing windowed price
//! is not an error: [`Stock::price`] and [`Exchange::all_share_index`] return
//! `None`.
//!
//! ## Logging
//!
//! Events are emitted through `tracing`; install a subscriber in the
//! application to see them.

pub mod config;
pub mod domain;
pub mod error;
pub mod exchange;
pub mod ledger;
pub mod search;
pub mod stock;
pub mod trade;

pub use config::{ExchangeConfig, DEFAULT_PRICE_WINDOW, PRICE_WINDOW_ENV};
pub use domain::{BuySellIndicator, StockKey, StockType, Symbol, UtcDateTime};
pub use error::{ExchangeError, ValidationError};
pub use exchange::Exchange;
pub use ledger::TradeLedger;
pub use search::{insert_sorted_by_key, lower_bound_by_key};
pub use stock::{Stock, StockMetrics};
pub use trade::{Trade, TradeRecord};
