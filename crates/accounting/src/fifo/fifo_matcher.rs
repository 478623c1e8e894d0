use std::collections::{HashMap, VecDeque};

use log::{debug, warn};
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::transactions::{sort_chronological, validate_batch, Transaction, TransactionType};

/// Percentage performance of one sell matched against FIFO buy lots.
///
/// This is a different performance definition than the weighted-average
/// `percentChange`: FIFO percentages rank fully-closed historical trades,
/// while the weighted-average figure tracks open positions. The two feed the
/// best/worst performer ranking side by side and must stay distinct.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ClosedTradePerformance {
    pub symbol: String,
    pub profit_percent: Decimal,
}

#[derive(Debug, Clone)]
struct FifoLot {
    remaining_quantity: Decimal,
    unit_price: Decimal,
}

/// Matches sells against buy lots in first-in-first-out order.
#[derive(Default, Debug, Clone)]
pub struct FifoMatcher {}

impl FifoMatcher {
    pub fn new() -> Self {
        FifoMatcher {}
    }

    /// Computes one aggregated profit percentage per SELL transaction.
    ///
    /// A sell straddling several buy lots contributes each lot's cost to a
    /// single entry. Sells with no matched quantity (or zero matched cost)
    /// emit nothing; excess quantity beyond the available lots is dropped
    /// with a warning, mirroring the ledger this ranking was built against.
    /// Commissions are deliberately ignored here: the ranking is price-only.
    pub fn closed_trade_performance(
        &self,
        mut transactions: Vec<Transaction>,
    ) -> Result<Vec<ClosedTradePerformance>> {
        validate_batch(&transactions)?;
        sort_chronological(&mut transactions);
        debug!(
            "FIFO matching over {} transactions.",
            transactions.len()
        );

        let mut inventory: HashMap<String, VecDeque<FifoLot>> = HashMap::new();
        let mut results = Vec::new();

        for tx in &transactions {
            match tx.transaction_type {
                TransactionType::Buy => {
                    inventory
                        .entry(tx.symbol.clone())
                        .or_default()
                        .push_back(FifoLot {
                            remaining_quantity: tx.quantity,
                            unit_price: tx.price,
                        });
                }
                TransactionType::Sell => {
                    let Some(lots) = inventory.get_mut(&tx.symbol) else {
                        warn!(
                            "Sell of {} {} with no buy lots on record; skipped.",
                            tx.quantity, tx.symbol
                        );
                        continue;
                    };

                    let mut remaining_to_sell = tx.quantity;
                    let mut cost_basis = Decimal::ZERO;
                    let mut sold_quantity = Decimal::ZERO;

                    while remaining_to_sell > Decimal::ZERO {
                        let Some(lot) = lots.front_mut() else {
                            break;
                        };
                        if lot.remaining_quantity <= remaining_to_sell {
                            cost_basis += lot.remaining_quantity * lot.unit_price;
                            sold_quantity += lot.remaining_quantity;
                            remaining_to_sell -= lot.remaining_quantity;
                            lots.pop_front();
                        } else {
                            cost_basis += remaining_to_sell * lot.unit_price;
                            sold_quantity += remaining_to_sell;
                            lot.remaining_quantity -= remaining_to_sell;
                            remaining_to_sell = Decimal::ZERO;
                        }
                    }

                    if remaining_to_sell > Decimal::ZERO {
                        warn!(
                            "Sell of {} {} exhausted the lot queue with {} unmatched; excess dropped.",
                            tx.quantity, tx.symbol, remaining_to_sell
                        );
                    }

                    if sold_quantity > Decimal::ZERO && cost_basis > Decimal::ZERO {
                        let revenue = sold_quantity * tx.price;
                        let profit = revenue - cost_basis;
                        results.push(ClosedTradePerformance {
                            symbol: tx.symbol.clone(),
                            profit_percent: (profit / cost_basis * dec!(100))
                                .round_dp(DECIMAL_PRECISION),
                        });
                    }
                }
                TransactionType::Deposit | TransactionType::Withdraw => {}
            }
        }

        Ok(results)
    }
}
