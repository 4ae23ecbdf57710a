use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::{StockType, Symbol, ValidationError};

/// Composite registry key: symbol plus stock type.
///
/// Renders as `SYMBOL_TYPE`, e.g. `AMZN_COMMON`.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StockKey {
    symbol: Symbol,
    stock_type: StockType,
}

impl StockKey {
    pub fn new(symbol: Symbol, stock_type: StockType) -> Self {
        Self { symbol, stock_type }
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn stock_type(&self) -> StockType {
        self.stock_type
    }
}

impl Display for StockKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}_{}", self.symbol, self.stock_type)
    }
}

impl FromStr for StockKey {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let (symbol, stock_type) =
            value
                .rsplit_once('_')
                .ok_or_else(|| ValidationError::InvalidStockKey {
                    value: value.to_owned(),
                })?;

        Ok(Self {
            symbol: Symbol::parse(symbol)?,
            stock_type: stock_type.parse()?,
        })
    }
}

impl TryFrom<String> for StockKey {
    type Error = ValidationError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<StockKey> for String {
    fn from(value: StockKey) -> Self {
        value.to_string()
    }
}
