//! # Domain Types
//!
//! Validated value types shared by the ledger and the exchange.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Symbol`] | Normalized ticker symbol |
//! | [`StockType`] | `COMMON` or `PREFERRED` |
//! | [`BuySellIndicator`] | `BUY` or `SELL` |
//! | [`StockKey`] | Composite registry key (`SYMBOL_TYPE`) |
//! | [`UtcDateTime`] | UTC timestamp |
//!
//! Every constructor validates its input and returns a
//! [`ValidationError`](crate::ValidationError) instead of building an invalid
//! value.

mod key;
mod kinds;
mod symbol;
mod timestamp;

pub use key::StockKey;
pub use kinds::{BuySellIndicator, StockType};
pub use symbol::Symbol;
pub use timestamp::UtcDateTime;
