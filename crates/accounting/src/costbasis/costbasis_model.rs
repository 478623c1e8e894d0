use chrono::{DateTime, Utc};
use log::warn;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::constants::QUANTITY_THRESHOLD;
use crate::errors::CalculatorError;

/// True when a quantity is above the flatness threshold.
pub fn is_quantity_significant(quantity: &Decimal) -> bool {
    let threshold =
        Decimal::from_str_radix(QUANTITY_THRESHOLD, 10).unwrap_or_else(|_| Decimal::new(1, 6));
    quantity.abs() >= threshold
}

/// Cost-basis summary for one symbol's transaction stream at a price snapshot.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct CostBasisReport {
    /// Units currently held.
    pub quantity: Decimal,
    /// Cost basis of the held units, buy commissions capitalized in.
    pub total_cost: Decimal,
    pub total_commission: Decimal,
    /// Profit locked in by completed sells.
    pub realized_profit: Decimal,
    /// Paper profit of the held units at the snapshot price.
    pub unrealized_profit: Decimal,
    pub total_profit: Decimal,
    /// Unrealized profit relative to cost basis, in percent. Zero when flat.
    pub percent_change: Decimal,
}

/// Running weighted-average inventory for one symbol.
///
/// Buys raise the average cost (commission capitalized into basis); sells
/// relieve basis at the running average and realize the difference against
/// net proceeds. Quantity and basis never go negative.
#[derive(Debug, Clone, Default)]
pub struct AverageCostState {
    pub quantity: Decimal,
    pub cost_basis: Decimal,
    pub realized_profit: Decimal,
}

impl AverageCostState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply_buy(&mut self, quantity: Decimal, price: Decimal, commission: Decimal) {
        self.quantity += quantity;
        self.cost_basis += quantity * price + commission;
    }

    /// Relieves inventory for a sell, returning the realized profit of this
    /// sell alone. Errors when the sell exceeds tracked inventory.
    pub fn apply_sell(
        &mut self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
        commission: Decimal,
        date: DateTime<Utc>,
    ) -> Result<Decimal, CalculatorError> {
        let available = self.quantity;
        if !is_quantity_significant(&available) || quantity > available + flatness_epsilon() {
            return Err(CalculatorError::InsufficientInventory {
                symbol: symbol.to_string(),
                requested: quantity,
                available,
                date,
            });
        }
        Ok(self.relieve(quantity.min(available), price, commission))
    }

    /// Lenient sell used where the source ledger tolerated oversells: clamps
    /// the sell to the available quantity and logs instead of failing, so a
    /// display-oriented pass over historical data keeps going. Returns the
    /// realized profit of the matched portion (zero when nothing matched).
    pub fn apply_sell_clamped(
        &mut self,
        symbol: &str,
        quantity: Decimal,
        price: Decimal,
        commission: Decimal,
    ) -> Decimal {
        let available = self.quantity;
        if !is_quantity_significant(&available) {
            warn!(
                "Sell of {} {} against empty inventory; no profit recorded.",
                quantity, symbol
            );
            return Decimal::ZERO;
        }
        let matched = quantity.min(available);
        if matched < quantity {
            warn!(
                "Sell of {} {} exceeds {} held; clamping to available quantity.",
                quantity, symbol, available
            );
        }
        self.relieve(matched, price, commission)
    }

    fn relieve(&mut self, quantity: Decimal, price: Decimal, commission: Decimal) -> Decimal {
        let average_cost = self.cost_basis / self.quantity;
        let cost_of_sold = average_cost * quantity;
        let revenue = quantity * price - commission;
        let realized = revenue - cost_of_sold;

        self.realized_profit += realized;
        self.cost_basis -= cost_of_sold;
        self.quantity -= quantity;

        // Selling exactly the remaining quantity must zero both aggregates;
        // snap sub-threshold residue left by decimal division.
        if !is_quantity_significant(&self.quantity) {
            self.quantity = Decimal::ZERO;
            self.cost_basis = Decimal::ZERO;
        }

        realized
    }
}

fn flatness_epsilon() -> Decimal {
    Decimal::from_str_radix(QUANTITY_THRESHOLD, 10).unwrap_or_else(|_| Decimal::new(1, 6))
}
