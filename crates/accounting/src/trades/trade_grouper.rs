use std::collections::HashMap;

use log::debug;
use rust_decimal::Decimal;

use crate::costbasis::{is_quantity_significant, AverageCostState};
use crate::errors::Result;
use crate::transactions::{sort_chronological, validate_batch, Transaction, TransactionType};

use super::trades_model::{Trade, TradeStatus};

/// Segments an account's transaction stream into discrete trades per symbol.
#[derive(Default, Debug, Clone)]
pub struct TradeGrouper {}

impl TradeGrouper {
    pub fn new() -> Self {
        TradeGrouper {}
    }

    /// Groups buy/sell transactions into [`Trade`]s.
    ///
    /// Realized profit on sells comes from a per-symbol weighted-average
    /// state shared across the whole pass; it is *not* reset when a trade
    /// closes, so residual basis carried across a closure keeps affecting the
    /// next trade exactly as the running ledger sees it. Oversells are
    /// clamped with a warning rather than failing the pass: grouping is a
    /// display-oriented read over historical data.
    ///
    /// Cash wallet records (empty symbol DEPOSIT/WITHDRAW) never open or join
    /// a trade. Output is sorted most-recently-closed-or-active first.
    pub fn group_into_trades(&self, mut transactions: Vec<Transaction>) -> Result<Vec<Trade>> {
        validate_batch(&transactions)?;
        sort_chronological(&mut transactions);
        debug!("Grouping {} transactions into trades.", transactions.len());

        let mut open_trades: HashMap<String, Trade> = HashMap::new();
        let mut inventory: HashMap<String, AverageCostState> = HashMap::new();
        let mut closed: Vec<Trade> = Vec::new();

        for tx in transactions {
            if !tx.transaction_type.is_trade() {
                continue;
            }

            let trade = open_trades
                .entry(tx.symbol.clone())
                .or_insert_with(|| Trade::open(tx.symbol.clone(), tx.date));
            let state = inventory.entry(tx.symbol.clone()).or_default();

            trade.total_commission += tx.commission;
            trade.net_quantity += tx.signed_quantity();

            if tx.transaction_type == TransactionType::Sell {
                trade.total_realized_profit +=
                    state.apply_sell_clamped(&tx.symbol, tx.quantity, tx.price, tx.commission);
            } else {
                state.apply_buy(tx.quantity, tx.price, tx.commission);
            }

            let tx_date = tx.date;
            let symbol = tx.symbol.clone();
            trade.transactions.push(tx);
            let flat = !is_quantity_significant(&trade.net_quantity);

            if flat {
                if let Some(mut finished) = open_trades.remove(&symbol) {
                    finished.status = TradeStatus::Closed;
                    finished.end_date = Some(tx_date);
                    finished.net_quantity = Decimal::ZERO;
                    closed.push(finished);
                }
            }
        }

        let mut trades: Vec<Trade> = closed;
        trades.extend(open_trades.into_values());
        trades.sort_by(|a, b| b.sort_date().cmp(&a.sort_date()));

        Ok(trades)
    }
}
