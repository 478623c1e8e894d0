use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::{Result, ValidationError};

/// Kind of a transaction record.
///
/// `STOCK_BUY` / `STOCK_SELL` are display labels the wallet ledger attaches to
/// trade records; they are accepted as aliases, not separate accounting types.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionType {
    #[serde(alias = "STOCK_BUY")]
    Buy,
    #[serde(alias = "STOCK_SELL")]
    Sell,
    Deposit,
    Withdraw,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Buy => "BUY",
            TransactionType::Sell => "SELL",
            TransactionType::Deposit => "DEPOSIT",
            TransactionType::Withdraw => "WITHDRAW",
        }
    }

    /// True for records that move securities rather than plain cash.
    pub fn is_trade(&self) -> bool {
        matches!(self, TransactionType::Buy | TransactionType::Sell)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s {
            "BUY" | "STOCK_BUY" => Ok(TransactionType::Buy),
            "SELL" | "STOCK_SELL" => Ok(TransactionType::Sell),
            "DEPOSIT" => Ok(TransactionType::Deposit),
            "WITHDRAW" => Ok(TransactionType::Withdraw),
            other => Err(format!("Unknown transaction type: {}", other)),
        }
    }
}

/// An immutable record of one trade or cash movement.
///
/// `total_cost` is the stored `quantity * price` at trade time; it is never
/// recomputed from live quotes so historical prices survive quote changes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Transaction {
    /// Backend-owned identity, opaque to the calculators.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Empty for pure cash wallet records.
    #[serde(default)]
    pub symbol: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub quantity: Decimal,
    /// Per-unit trade price.
    #[serde(default)]
    pub price: Decimal,
    #[serde(default)]
    pub total_cost: Decimal,
    /// Flat fee charged on the trade.
    #[serde(default)]
    pub commission: Decimal,
    pub date: DateTime<Utc>,
    /// Cash amount for wallet DEPOSIT/WITHDRAW records.
    #[serde(default)]
    pub amount: Decimal,
}

impl Transaction {
    /// Positive quantity for buys, negative for sells, zero for cash records.
    pub fn signed_quantity(&self) -> Decimal {
        match self.transaction_type {
            TransactionType::Buy => self.quantity,
            TransactionType::Sell => -self.quantity,
            _ => Decimal::ZERO,
        }
    }
}

/// Sorts transactions ascending by date.
///
/// The sort is stable: records with equal timestamps keep their input
/// relative order, which is the documented tie-break for all calculators.
pub fn sort_chronological(transactions: &mut [Transaction]) {
    transactions.sort_by_key(|tx| tx.date);
}

/// Validates a transaction batch before any calculation runs.
///
/// Rejects the whole batch on the first invalid record rather than skipping
/// it: a silently dropped trade corrupts every downstream P&L figure without
/// signal.
pub fn validate_batch(transactions: &[Transaction]) -> Result<()> {
    for tx in transactions {
        if tx.commission.is_sign_negative() {
            return Err(ValidationError::InvalidInput(format!(
                "Negative commission {} on {} transaction dated {}",
                tx.commission, tx.transaction_type, tx.date
            ))
            .into());
        }
        match tx.transaction_type {
            TransactionType::Buy | TransactionType::Sell => {
                if tx.symbol.is_empty() {
                    return Err(ValidationError::MissingField(format!(
                        "symbol on {} transaction dated {}",
                        tx.transaction_type, tx.date
                    ))
                    .into());
                }
                if tx.quantity <= Decimal::ZERO {
                    return Err(ValidationError::InvalidInput(format!(
                        "Non-positive quantity {} on {} {} dated {}",
                        tx.quantity, tx.symbol, tx.transaction_type, tx.date
                    ))
                    .into());
                }
                if tx.price <= Decimal::ZERO {
                    return Err(ValidationError::InvalidInput(format!(
                        "Non-positive price {} on {} {} dated {}",
                        tx.price, tx.symbol, tx.transaction_type, tx.date
                    ))
                    .into());
                }
            }
            TransactionType::Deposit | TransactionType::Withdraw => {
                if tx.amount.is_sign_negative() {
                    return Err(ValidationError::InvalidInput(format!(
                        "Negative amount {} on {} transaction dated {}",
                        tx.amount, tx.transaction_type, tx.date
                    ))
                    .into());
                }
            }
        }
    }
    Ok(())
}
