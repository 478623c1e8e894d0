use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::Result;
use crate::transactions::{sort_chronological, validate_batch, Transaction, TransactionType};

use super::costbasis_model::{AverageCostState, CostBasisReport};

/// Computes the weighted-average cost basis of a transaction stream.
///
/// The calculator is stateless; each call receives the complete stream plus a
/// price snapshot and returns a fresh report. Transactions are sorted
/// chronologically internally (stable for equal timestamps), so input order
/// does not matter.
#[derive(Default, Debug, Clone)]
pub struct CostBasisCalculator {}

impl CostBasisCalculator {
    pub fn new() -> Self {
        CostBasisCalculator {}
    }

    /// Folds the stream into a [`CostBasisReport`] valued at `current_price`.
    ///
    /// Cash wallet records (DEPOSIT/WITHDRAW) carry no inventory and are
    /// skipped. A sell exceeding tracked inventory fails the whole batch with
    /// `InsufficientInventory` rather than silently producing wrong P&L.
    pub fn calculate(
        &self,
        mut transactions: Vec<Transaction>,
        current_price: Decimal,
    ) -> Result<CostBasisReport> {
        validate_batch(&transactions)?;
        sort_chronological(&mut transactions);
        debug!(
            "Computing cost basis over {} transactions.",
            transactions.len()
        );

        let mut state = AverageCostState::new();
        let mut total_commission = Decimal::ZERO;

        for tx in &transactions {
            match tx.transaction_type {
                TransactionType::Buy => {
                    total_commission += tx.commission;
                    state.apply_buy(tx.quantity, tx.price, tx.commission);
                }
                TransactionType::Sell => {
                    total_commission += tx.commission;
                    state.apply_sell(&tx.symbol, tx.quantity, tx.price, tx.commission, tx.date)?;
                }
                TransactionType::Deposit | TransactionType::Withdraw => {
                    debug!("Skipping cash record dated {} in cost basis.", tx.date);
                }
            }
        }

        Ok(Self::report(&state, total_commission, current_price))
    }

    fn report(
        state: &AverageCostState,
        total_commission: Decimal,
        current_price: Decimal,
    ) -> CostBasisReport {
        let market_value = state.quantity * current_price;
        let unrealized = market_value - state.cost_basis;
        let percent_change = if state.cost_basis > Decimal::ZERO {
            unrealized / state.cost_basis * dec!(100)
        } else {
            Decimal::ZERO
        };

        CostBasisReport {
            quantity: state.quantity,
            total_cost: state.cost_basis.round_dp(DECIMAL_PRECISION),
            total_commission: total_commission.round_dp(DECIMAL_PRECISION),
            realized_profit: state.realized_profit.round_dp(DECIMAL_PRECISION),
            unrealized_profit: unrealized.round_dp(DECIMAL_PRECISION),
            total_profit: (state.realized_profit + unrealized).round_dp(DECIMAL_PRECISION),
            percent_change: percent_change.round_dp(DECIMAL_PRECISION),
        }
    }
}
