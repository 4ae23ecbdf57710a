//! Executed trades.

use serde::{Deserialize, Serialize};

use crate::{BuySellIndicator, ExchangeError, StockKey, StockType, Symbol, UtcDateTime, ValidationError};

/// A change of ownership of a number of shares at a definite price per share.
///
/// Validated at construction and never mutated afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "TradeRecord")]
pub struct Trade {
    symbol: Symbol,
    stock_type: StockType,
    timestamp: UtcDateTime,
    quantity: u64,
    price_per_share: f64,
    indicator: BuySellIndicator,
}

/// Unvalidated wire shape of a [`Trade`].
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct TradeRecord {
    pub symbol: String,
    pub stock_type: String,
    pub timestamp: String,
    pub quantity: i64,
    pub price_per_share: f64,
    pub indicator: BuySellIndicator,
}

impl Trade {
    pub fn new(
        symbol: Symbol,
        stock_type: StockType,
        timestamp: UtcDateTime,
        quantity: i64,
        price_per_share: f64,
        indicator: BuySellIndicator,
    ) -> Result<Self, ValidationError> {
        let quantity = match u64::try_from(quantity) {
            Ok(value) if value > 0 => value,
            _ => return Err(ValidationError::NonPositiveQuantity { value: quantity }),
        };

        if !price_per_share.is_finite() {
            return Err(ValidationError::NonFiniteValue {
                field: "price_per_share",
            });
        }
        if price_per_share < 0.0 {
            return Err(ValidationError::NegativeValue {
                field: "price_per_share",
            });
        }

        Ok(Self {
            symbol,
            stock_type,
            timestamp,
            quantity,
            price_per_share,
            indicator,
        })
    }

    /// Decode a trade from a JSON payload.
    ///
    /// A payload that does not have the shape of a trade is a
    /// [`ExchangeError::TypeMismatch`]; a trade with invalid values fails
    /// validation like [`Trade::new`].
    pub fn from_json(payload: &str) -> Result<Self, ExchangeError> {
        let record: TradeRecord =
            serde_json::from_str(payload).map_err(|err| ExchangeError::TypeMismatch {
                reason: err.to_string(),
            })?;
        Ok(Self::try_from(record)?)
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn stock_type(&self) -> StockType {
        self.stock_type
    }

    pub fn timestamp(&self) -> UtcDateTime {
        self.timestamp
    }

    pub fn quantity(&self) -> u64 {
        self.quantity
    }

    pub fn price_per_share(&self) -> f64 {
        self.price_per_share
    }

    pub fn indicator(&self) -> BuySellIndicator {
        self.indicator
    }

    /// Quantity × price per share.
    pub fn total_value(&self) -> f64 {
        self.quantity as f64 * self.price_per_share
    }

    /// Key of the stock this trade belongs to.
    pub fn key(&self) -> StockKey {
        StockKey::new(self.symbol.clone(), self.stock_type)
    }
}

impl TryFrom<TradeRecord> for Trade {
    type Error = ValidationError;

    fn try_from(record: TradeRecord) -> Result<Self, Self::Error> {
        Self::new(
            Symbol::parse(&record.symbol)?,
            record.stock_type.parse()?,
            UtcDateTime::parse(&record.timestamp)?,
            record.quantity,
            record.price_per_share,
            record.indicator,
        )
    }
}
