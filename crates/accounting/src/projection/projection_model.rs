use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Inputs for a growth projection.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionInput {
    pub starting_amount: Decimal,
    pub monthly_contribution: Decimal,
    /// Stated annual return, in percent (8 means 8% per year).
    pub annual_rate_percent: Decimal,
    pub years: u32,
    pub start_date: NaiveDate,
    /// Historical portfolio values to align against the target curve,
    /// matched by calendar month.
    #[serde(default)]
    pub actual_series: Vec<ActualValuePoint>,
}

/// One observed portfolio value, used for target-vs-actual alignment.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ActualValuePoint {
    pub date: NaiveDate,
    pub value: Decimal,
}

/// One month of the projected target curve.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjectionPoint {
    /// 0 for the starting point, then 1..=years*12.
    pub month_index: u32,
    pub date: NaiveDate,
    pub ending_balance: Decimal,
    pub cumulative_contribution: Decimal,
    pub cumulative_interest: Decimal,
    /// Observed portfolio value for this calendar month. Absent (not zero)
    /// when no history exists yet, so charts can tell "no data" from zero.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual: Option<Decimal>,
}

/// Calendar-year rollup of the monthly schedule.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AnnualProjectionSummary {
    pub year: i32,
    pub deposit: Decimal,
    pub interest: Decimal,
    pub ending_balance: Decimal,
}

/// Full projection result: monthly target curve plus annual rollup.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct GrowthProjection {
    pub monthly: Vec<MonthlyProjectionPoint>,
    pub annual: Vec<AnnualProjectionSummary>,
}
