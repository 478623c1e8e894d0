use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::transactions::Transaction;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TradeStatus {
    Open,
    Closed,
}

/// A contiguous run of transactions in one symbol, from zero net quantity
/// back to zero net quantity.
///
/// Created on the first transaction for a symbol with no open trade;
/// transitions to `Closed` once the net quantity returns to zero (within the
/// flatness threshold). The next transaction for that symbol starts a fresh
/// trade.
#[derive(Serialize, Deserialize, Debug, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Trade {
    pub symbol: String,
    pub status: TradeStatus,
    pub start_date: DateTime<Utc>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub end_date: Option<DateTime<Utc>>,
    pub transactions: Vec<Transaction>,
    pub net_quantity: Decimal,
    pub total_realized_profit: Decimal,
    pub total_commission: Decimal,
}

impl Trade {
    pub(crate) fn open(symbol: String, start_date: DateTime<Utc>) -> Self {
        Trade {
            symbol,
            status: TradeStatus::Open,
            start_date,
            end_date: None,
            transactions: Vec::new(),
            net_quantity: Decimal::ZERO,
            total_realized_profit: Decimal::ZERO,
            total_commission: Decimal::ZERO,
        }
    }

    /// Date of the last transaction in the trade; falls back to the start
    /// date for a trade that somehow carries none.
    pub fn last_transaction_date(&self) -> DateTime<Utc> {
        self.transactions
            .last()
            .map(|tx| tx.date)
            .unwrap_or(self.start_date)
    }

    /// Display ordering key: closure date for closed trades, last activity
    /// for open ones.
    pub fn sort_date(&self) -> DateTime<Utc> {
        self.end_date.unwrap_or_else(|| self.last_transaction_date())
    }
}
