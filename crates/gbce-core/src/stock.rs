//! Listed stocks and their per-stock metrics.

use std::time::Duration;

use serde::Serialize;
use tracing::debug;

use crate::config::DEFAULT_PRICE_WINDOW;
use crate::{ExchangeError, StockKey, StockType, Symbol, Trade, TradeLedger, UtcDateTime, ValidationError};

/// A stock listed on the exchange together with every trade recorded for it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Stock {
    symbol: Symbol,
    stock_type: StockType,
    par_value: f64,
    last_dividend: f64,
    fixed_dividend: Option<f64>,
    #[serde(skip)]
    price_window: Duration,
    trades: TradeLedger,
}

impl Stock {
    /// Create a stock with an empty ledger.
    ///
    /// `fixed_dividend` is a ratio (`0.02` == 2%) and must be `Some` exactly
    /// when the stock is preferred.
    pub fn new(
        symbol: Symbol,
        stock_type: StockType,
        par_value: f64,
        last_dividend: f64,
        fixed_dividend: Option<f64>,
    ) -> Result<Self, ValidationError> {
        match (stock_type, fixed_dividend) {
            (StockType::Common, Some(_)) => return Err(ValidationError::FixedDividendOnCommon),
            (StockType::Preferred, None) => return Err(ValidationError::MissingFixedDividend),
            _ => {}
        }

        validate_non_negative("par_value", par_value)?;
        validate_non_negative("last_dividend", last_dividend)?;
        if let Some(fixed) = fixed_dividend {
            validate_non_negative("fixed_dividend", fixed)?;
        }

        Ok(Self {
            symbol,
            stock_type,
            par_value,
            last_dividend,
            fixed_dividend,
            price_window: DEFAULT_PRICE_WINDOW,
            trades: TradeLedger::new(),
        })
    }

    /// Override the trailing window used by [`Stock::price`]. A zero window
    /// is rejected.
    pub fn with_price_window(mut self, price_window: Duration) -> Result<Self, ValidationError> {
        if price_window.is_zero() {
            return Err(ValidationError::InvalidPriceWindow);
        }
        self.price_window = price_window;
        Ok(self)
    }

    pub(crate) fn set_price_window(&mut self, price_window: Duration) {
        self.price_window = price_window;
    }

    pub fn symbol(&self) -> &Symbol {
        &self.symbol
    }

    pub fn stock_type(&self) -> StockType {
        self.stock_type
    }

    pub fn par_value(&self) -> f64 {
        self.par_value
    }

    pub fn last_dividend(&self) -> f64 {
        self.last_dividend
    }

    pub fn fixed_dividend(&self) -> Option<f64> {
        self.fixed_dividend
    }

    pub fn price_window(&self) -> Duration {
        self.price_window
    }

    pub fn trades(&self) -> &TradeLedger {
        &self.trades
    }

    pub fn key(&self) -> StockKey {
        StockKey::new(self.symbol.clone(), self.stock_type)
    }

    /// Record a trade for this stock, keeping the ledger in time order.
    ///
    /// Fails without touching the ledger when the trade's symbol or type
    /// differs from the stock's own.
    pub fn record_trade(&mut self, trade: Trade) -> Result<(), ExchangeError> {
        if trade.symbol() != &self.symbol || trade.stock_type() != self.stock_type {
            return Err(ExchangeError::OwnershipMismatch {
                trade: trade.key(),
                stock: self.key(),
            });
        }

        let timestamp = trade.timestamp();
        let index = self.trades.insert(trade);
        debug!(
            stock = %self.key(),
            %timestamp,
            position = index,
            ledger_len = self.trades.len(),
            "recorded trade"
        );
        Ok(())
    }

    /// Price per share of the most recent trade.
    pub fn ticker_price(&self) -> Result<f64, ExchangeError> {
        self.trades
            .latest()
            .map(Trade::price_per_share)
            .ok_or_else(|| ExchangeError::NotAvailable {
                key: self.key(),
                what: "ticker price",
            })
    }

    /// Last dividend for common stock, fixed ratio × par value for preferred.
    pub fn dividend(&self) -> f64 {
        match self.stock_type {
            StockType::Common => self.last_dividend,
            StockType::Preferred => self.fixed_dividend.unwrap_or_default() * self.par_value,
        }
    }

    pub fn dividend_yield(&self) -> Result<f64, ExchangeError> {
        let ticker_price = self.ticker_price()?;
        if ticker_price == 0.0 {
            return Err(ExchangeError::ZeroTickerPrice { key: self.key() });
        }
        Ok(self.dividend() / ticker_price)
    }

    /// Ticker price over dividend; `Ok(None)` when the dividend is zero.
    pub fn price_earnings_ratio(&self) -> Result<Option<f64>, ExchangeError> {
        let dividend = self.dividend();
        if dividend == 0.0 {
            return Ok(None);
        }
        Ok(Some(self.ticker_price()? / dividend))
    }

    /// Volume-weighted price over the configured window ending at `current_time`.
    pub fn price(&self, current_time: UtcDateTime) -> Option<f64> {
        self.trades
            .volume_weighted_price(current_time, self.price_window)
    }

    /// Snapshot of every per-stock figure at `current_time`.
    pub fn metrics(&self, current_time: UtcDateTime) -> StockMetrics {
        StockMetrics {
            key: self.key(),
            as_of: current_time,
            trade_count: self.trades.len(),
            ticker_price: self.ticker_price().ok(),
            dividend: self.dividend(),
            dividend_yield: self.dividend_yield().ok(),
            pe_ratio: self.price_earnings_ratio().ok().flatten(),
            price: self.price(current_time),
        }
    }
}

/// Per-stock figures; unavailable ones are `None`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StockMetrics {
    pub key: StockKey,
    pub as_of: UtcDateTime,
    pub trade_count: usize,
    pub ticker_price: Option<f64>,
    pub dividend: f64,
    pub dividend_yield: Option<f64>,
    pub pe_ratio: Option<f64>,
    pub price: Option<f64>,
}

fn validate_non_negative(field: &'static str, value: f64) -> Result<(), ValidationError> {
    if !value.is_finite() {
        return Err(ValidationError::NonFiniteValue { field });
    }
    if value < 0.0 {
        return Err(ValidationError::NegativeValue { field });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BuySellIndicator;

    fn now() -> UtcDateTime {
        UtcDateTime::parse("2024-01-01T12:00:00Z").expect("timestamp")
    }

    fn minutes_ago(minutes: u64) -> UtcDateTime {
        now().saturating_sub(Duration::from_secs(minutes * 60))
    }

    fn symbol(raw: &str) -> Symbol {
        Symbol::parse(raw).expect("symbol")
    }

    fn common(last_dividend: f64) -> Stock {
        Stock::new(symbol("AMZN"), StockType::Common, 25.0, last_dividend, None).expect("valid stock")
    }

    fn trade(raw_symbol: &str, stock_type: StockType, timestamp: UtcDateTime, quantity: i64, price: f64) -> Trade {
        Trade::new(symbol(raw_symbol), stock_type, timestamp, quantity, price, BuySellIndicator::Sell)
            .expect("valid trade")
    }

    #[test]
    fn common_stock_with_fixed_dividend_is_rejected() {
        let err = Stock::new(symbol("AMZN"), StockType::Common, 25.0, 1.0, Some(0.02))
            .expect_err("must fail");
        assert_eq!(err, ValidationError::FixedDividendOnCommon);
    }

    #[test]
    fn preferred_stock_without_fixed_dividend_is_rejected() {
        let err = Stock::new(symbol("JPM"), StockType::Preferred, 50.0, 2.0, None)
            .expect_err("must fail");
        assert_eq!(err, ValidationError::MissingFixedDividend);
    }

    #[test]
    fn negative_par_value_is_rejected() {
        let err = Stock::new(symbol("AMZN"), StockType::Common, -1.0, 1.0, None)
            .expect_err("must fail");
        assert!(matches!(err, ValidationError::NegativeValue { field: "par_value" }));
    }

    #[test]
    fn dividend_depends_on_stock_type() {
        let common = common(1.0);
        let preferred = Stock::new(symbol("JPM"), StockType::Preferred, 50.0, 2.0, Some(0.02))
            .expect("valid stock");

        assert_eq!(common.dividend(), 1.0);
        assert_eq!(preferred.dividend(), 0.02 * 50.0);
    }

    #[test]
    fn trade_for_another_stock_is_rejected() {
        let mut stock = common(1.0);

        for rejected in [
            trade("JPM", StockType::Common, now(), 100, 150.0),
            trade("AMZN", StockType::Preferred, now(), 100, 150.0),
            trade("JPM", StockType::Preferred, now(), 100, 150.0),
        ] {
            let err = stock.record_trade(rejected).expect_err("must fail");
            assert!(matches!(err, ExchangeError::OwnershipMismatch { .. }));
        }
        assert!(stock.trades().is_empty());
    }

    #[test]
    fn ticker_price_follows_latest_timestamp() {
        let mut stock = common(1.0);
        stock.record_trade(trade("AMZN", StockType::Common, now(), 100, 150.0)).expect("record");
        stock.record_trade(trade("AMZN", StockType::Common, minutes_ago(10), 100, 120.0)).expect("record");
        stock.record_trade(trade("AMZN", StockType::Common, minutes_ago(20), 100, 110.0)).expect("record");

        assert_eq!(stock.trades().latest().map(Trade::timestamp), Some(now()));
        assert_eq!(stock.ticker_price().expect("available"), 150.0);
    }

    #[test]
    fn ticker_price_without_trades_is_not_available() {
        let err = common(1.0).ticker_price().expect_err("must fail");
        assert!(matches!(err, ExchangeError::NotAvailable { what: "ticker price", .. }));
    }

    #[test]
    fn pe_ratio_is_none_for_zero_dividend() {
        let mut stock = common(0.0);
        assert_eq!(stock.price_earnings_ratio().expect("no division"), None);

        stock.record_trade(trade("AMZN", StockType::Common, now(), 100, 150.0)).expect("record");
        assert_eq!(stock.price_earnings_ratio().expect("no division"), None);
    }

    #[test]
    fn pe_ratio_divides_ticker_by_dividend() {
        let mut stock = common(2.0);
        stock.record_trade(trade("AMZN", StockType::Common, now(), 100, 150.0)).expect("record");
        assert_eq!(stock.price_earnings_ratio().expect("available"), Some(75.0));
    }

    #[test]
    fn pe_ratio_without_trades_is_not_available() {
        let err = common(2.0).price_earnings_ratio().expect_err("must fail");
        assert!(matches!(err, ExchangeError::NotAvailable { .. }));
    }

    #[test]
    fn dividend_yield_divides_dividend_by_ticker() {
        let mut stock = common(3.0);
        stock.record_trade(trade("AMZN", StockType::Common, now(), 10, 150.0)).expect("record");
        assert_eq!(stock.dividend_yield().expect("available"), 0.02);
    }

    #[test]
    fn dividend_yield_reports_zero_ticker_price() {
        let mut stock = common(3.0);
        stock.record_trade(trade("AMZN", StockType::Common, now(), 10, 0.0)).expect("record");
        let err = stock.dividend_yield().expect_err("must fail");
        assert!(matches!(err, ExchangeError::ZeroTickerPrice { .. }));
    }

    #[test]
    fn price_uses_only_recent_trades() {
        let mut stock = common(1.0);
        stock.record_trade(trade("AMZN", StockType::Common, now(), 100, 150.0)).expect("record");
        stock.record_trade(trade("AMZN", StockType::Common, minutes_ago(10), 100, 200.0)).expect("record");
        stock.record_trade(trade("AMZN", StockType::Common, minutes_ago(30), 300, 200.0)).expect("record");

        assert_eq!(stock.price(now()), Some(175.0));
    }

    #[test]
    fn price_is_none_without_recent_trades() {
        let mut stock = common(1.0);
        stock.record_trade(trade("AMZN", StockType::Common, minutes_ago(20), 100, 150.0)).expect("record");

        assert_eq!(stock.price(now()), None);
    }

    #[test]
    fn wider_window_includes_older_trades() {
        let mut stock = common(1.0)
            .with_price_window(Duration::from_secs(30 * 60))
            .expect("non-zero window");
        stock.record_trade(trade("AMZN", StockType::Common, minutes_ago(20), 100, 150.0)).expect("record");

        assert_eq!(stock.price(now()), Some(150.0));
    }

    #[test]
    fn zero_window_is_rejected() {
        let err = common(1.0).with_price_window(Duration::ZERO).expect_err("must fail");
        assert_eq!(err, ValidationError::InvalidPriceWindow);
    }

    #[test]
    fn metrics_mark_unavailable_figures() {
        let metrics = common(1.0).metrics(now());

        assert_eq!(metrics.key.to_string(), "AMZN_COMMON");
        assert_eq!(metrics.trade_count, 0);
        assert_eq!(metrics.ticker_price, None);
        assert_eq!(metrics.dividend, 1.0);
        assert_eq!(metrics.dividend_yield, None);
        assert_eq!(metrics.pe_ratio, None);
        assert_eq!(metrics.price, None);
    }
}
