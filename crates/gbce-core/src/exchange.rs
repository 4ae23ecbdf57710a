//! The stock registry and the all-share index.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::{
    ExchangeConfig, ExchangeError, Stock, StockKey, StockMetrics, Trade, UtcDateTime,
    ValidationError,
};

/// The exchange where trades take place.
///
/// Owns its stocks outright: stocks are moved in, read back through shared
/// references, and only ever change by recording trades through
/// [`Exchange::record_trade`]. Stocks are kept in key order.
#[derive(Debug, Clone, Default)]
pub struct Exchange {
    config: ExchangeConfig,
    stocks: BTreeMap<StockKey, Stock>,
}

impl Exchange {
    /// Empty exchange with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Empty exchange using `config`, which is validated first.
    pub fn with_config(config: ExchangeConfig) -> Result<Self, ValidationError> {
        config.validate()?;
        Ok(Self {
            config,
            stocks: BTreeMap::new(),
        })
    }

    /// Exchange pre-loaded with `stocks`.
    ///
    /// Follows [`Exchange::add_stock`]: the first stock for a key wins.
    pub fn from_stocks<I>(config: ExchangeConfig, stocks: I) -> Result<Self, ValidationError>
    where
        I: IntoIterator<Item = Stock>,
    {
        let mut exchange = Self::with_config(config)?;
        for stock in stocks {
            exchange.add_stock(stock);
        }
        Ok(exchange)
    }

    pub fn config(&self) -> &ExchangeConfig {
        &self.config
    }

    /// Register a stock under its key.
    ///
    /// Returns `false` and leaves the registry unchanged if a stock with the
    /// same key is already listed. The stock adopts the exchange's price window.
    pub fn add_stock(&mut self, mut stock: Stock) -> bool {
        let key = stock.key();
        if self.stocks.contains_key(&key) {
            warn!(stock = %key, "stock already listed, keeping existing entry");
            return false;
        }

        stock.set_price_window(self.config.price_window);
        debug!(stock = %key, "listed stock");
        self.stocks.insert(key, stock);
        true
    }

    pub fn contains(&self, key: &StockKey) -> bool {
        self.stocks.contains_key(key)
    }

    pub fn get_stock(&self, key: &StockKey) -> Option<&Stock> {
        self.stocks.get(key)
    }

    pub fn get_all_stocks(&self) -> &BTreeMap<StockKey, Stock> {
        &self.stocks
    }

    pub fn len(&self) -> usize {
        self.stocks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stocks.is_empty()
    }

    /// Route a trade to the stock it belongs to.
    pub fn record_trade(&mut self, trade: Trade) -> Result<(), ExchangeError> {
        let key = trade.key();
        match self.stocks.get_mut(&key) {
            Some(stock) => stock.record_trade(trade),
            None => {
                warn!(stock = %key, "trade for unlisted stock");
                Err(ExchangeError::UnknownStock {
                    symbol: trade.symbol().clone(),
                    stock_type: trade.stock_type(),
                })
            }
        }
    }

    /// Decode a JSON trade and route it like [`Exchange::record_trade`].
    pub fn record_trade_json(&mut self, payload: &str) -> Result<(), ExchangeError> {
        self.record_trade(Trade::from_json(payload)?)
    }

    /// Geometric mean of every listed stock's windowed price.
    ///
    /// `None` if the exchange is empty or if any stock has no trade inside its
    /// window; stocks are never silently left out.
    pub fn all_share_index(&self, current_time: UtcDateTime) -> Option<f64> {
        if self.stocks.is_empty() {
            return None;
        }

        let mut prices = Vec::with_capacity(self.stocks.len());
        for stock in self.stocks.values() {
            let Some(price) = stock.price(current_time) else {
                debug!(stock = %stock.key(), "no price inside window, index unavailable");
                return None;
            };
            prices.push(price);
        }

        let n = prices.len() as f64;
        let product: f64 = prices.iter().product();
        if product.is_finite() {
            return Some(product.powf(1.0 / n));
        }

        // Product overflowed; fall back to exp(mean(ln p)).
        let log_sum: f64 = prices.iter().map(|price| price.ln()).sum();
        Some((log_sum / n).exp())
    }

    /// Per-stock metrics in key order.
    pub fn metrics(&self, current_time: UtcDateTime) -> Vec<StockMetrics> {
        self.stocks
            .values()
            .map(|stock| stock.metrics(current_time))
            .collect()
    }
}
