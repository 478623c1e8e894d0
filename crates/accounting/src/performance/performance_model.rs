use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One element of a portfolio valuation time series.
///
/// `total_invested` is the cumulative net cash contributed up to this point
/// (deposits minus withdrawals, or cost basis depending on what the caller
/// charts); its interval-to-interval delta is the cash flow the TWR
/// calculation neutralizes.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSnapshotPoint {
    pub date: NaiveDate,
    pub total_value: Decimal,
    pub total_invested: Decimal,
}

/// A snapshot point annotated with the cumulative time-weighted return.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TwrReturnPoint {
    pub date: NaiveDate,
    pub total_value: Decimal,
    pub total_invested: Decimal,
    /// Cumulative TWR up to this point, in percent.
    pub twr_percent: Decimal,
}
