use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Category of a listed stock.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum StockType {
    Common,
    Preferred,
}

impl StockType {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Common => "COMMON",
            Self::Preferred => "PREFERRED",
        }
    }
}

impl Display for StockType {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StockType {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_uppercase().as_str() {
            "COMMON" => Ok(Self::Common),
            "PREFERRED" => Ok(Self::Preferred),
            _ => Err(ValidationError::InvalidStockType {
                value: value.to_owned(),
            }),
        }
    }
}

/// Side of the trade from the reporting party's point of view.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BuySellIndicator {
    Buy,
    Sell,
}

impl BuySellIndicator {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Buy => "BUY",
            Self::Sell => "SELL",
        }
    }
}

impl Display for BuySellIndicator {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
