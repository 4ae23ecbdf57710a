//! Time-ordered trade storage for a single stock.

use std::time::Duration;

use serde::Serialize;

use crate::search::{insert_sorted_by_key, lower_bound_by_key};
use crate::{Trade, UtcDateTime};

/// Trades kept sorted ascending by timestamp regardless of arrival order.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct TradeLedger {
    trades: Vec<Trade>,
}

impl TradeLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a trade at its chronological position and return that index.
    ///
    /// Ownership of the trade is not checked here; that is the stock's job.
    pub fn insert(&mut self, trade: Trade) -> usize {
        insert_sorted_by_key(&mut self.trades, trade, Trade::timestamp)
    }

    /// The trade with the latest timestamp.
    pub fn latest(&self) -> Option<&Trade> {
        self.trades.last()
    }

    /// All trades with a timestamp at or after `start`.
    pub fn since(&self, start: UtcDateTime) -> &[Trade] {
        let index = lower_bound_by_key(&self.trades, &start, Trade::timestamp);
        &self.trades[index..]
    }

    /// Volume-weighted average price over `[current_time - window, ..]`.
    ///
    /// Returns `None` when no trade falls inside the window. Trades stamped
    /// after `current_time` are still counted since the window is open-ended.
    pub fn volume_weighted_price(&self, current_time: UtcDateTime, window: Duration) -> Option<f64> {
        let recent = self.since(current_time.saturating_sub(window));
        if recent.is_empty() {
            return None;
        }

        let (value, quantity) = recent.iter().fold((0.0_f64, 0_u64), |(value, quantity), trade| {
            (value + trade.total_value(), quantity.saturating_add(trade.quantity()))
        });

        Some(value / quantity as f64)
    }

    pub fn len(&self) -> usize {
        self.trades.len()
    }

    pub fn is_empty(&self) -> bool {
        self.trades.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Trade> {
        self.trades.iter()
    }
}

impl<'a> IntoIterator for &'a TradeLedger {
    type Item = &'a Trade;
    type IntoIter = std::slice::Iter<'a, Trade>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{BuySellIndicator, StockType, Symbol};

    const FIFTEEN_MINUTES: Duration = Duration::from_secs(15 * 60);

    fn now() -> UtcDateTime {
        UtcDateTime::parse("2024-01-01T12:00:00Z").expect("timestamp")
    }

    fn minutes_ago(minutes: u64) -> UtcDateTime {
        now().saturating_sub(Duration::from_secs(minutes * 60))
    }

    fn trade_at(timestamp: UtcDateTime, quantity: i64, price: f64) -> Trade {
        Trade::new(
            Symbol::parse("AMZN").expect("symbol"),
            StockType::Common,
            timestamp,
            quantity,
            price,
            BuySellIndicator::Sell,
        )
        .expect("valid trade")
    }

    #[test]
    fn out_of_order_inserts_come_back_sorted() {
        let mut ledger = TradeLedger::new();
        ledger.insert(trade_at(minutes_ago(10), 1, 1.0));
        ledger.insert(trade_at(minutes_ago(20), 1, 2.0));
        ledger.insert(trade_at(now(), 1, 3.0));

        let prices: Vec<f64> = ledger.iter().map(Trade::price_per_share).collect();
        assert_eq!(prices, vec![2.0, 1.0, 3.0]);
        assert_eq!(ledger.latest().map(Trade::timestamp), Some(now()));
    }

    #[test]
    fn equal_timestamps_insert_before_existing() {
        let mut ledger = TradeLedger::new();
        ledger.insert(trade_at(now(), 1, 1.0));
        let index = ledger.insert(trade_at(now(), 1, 2.0));

        assert_eq!(index, 0);
        assert_eq!(ledger.latest().map(Trade::price_per_share), Some(1.0));
    }

    #[test]
    fn empty_ledger_has_no_price() {
        let ledger = TradeLedger::new();
        assert!(ledger.latest().is_none());
        assert_eq!(ledger.volume_weighted_price(now(), FIFTEEN_MINUTES), None);
    }

    #[test]
    fn trade_outside_window_is_ignored() {
        let mut ledger = TradeLedger::new();
        ledger.insert(trade_at(minutes_ago(20), 100, 150.0));

        assert_eq!(ledger.volume_weighted_price(now(), FIFTEEN_MINUTES), None);
    }

    #[test]
    fn weights_prices_by_quantity() {
        let mut ledger = TradeLedger::new();
        ledger.insert(trade_at(now(), 100, 150.0));
        ledger.insert(trade_at(minutes_ago(10), 100, 200.0));
        ledger.insert(trade_at(minutes_ago(30), 300, 200.0));

        let price = ledger
            .volume_weighted_price(now(), FIFTEEN_MINUTES)
            .expect("trades in window");
        assert_eq!(price, 175.0);
    }

    #[test]
    fn window_start_is_inclusive() {
        let mut ledger = TradeLedger::new();
        ledger.insert(trade_at(minutes_ago(15), 10, 42.0));

        assert_eq!(ledger.since(minutes_ago(15)).len(), 1);
        assert_eq!(ledger.volume_weighted_price(now(), FIFTEEN_MINUTES), Some(42.0));
    }

    #[test]
    fn serializes_as_trade_list() {
        let mut ledger = TradeLedger::new();
        ledger.insert(trade_at(now(), 1, 1.0));

        let json = serde_json::to_value(&ledger).expect("serialize");
        assert_eq!(json.as_array().map(Vec::len), Some(1));
    }
}
