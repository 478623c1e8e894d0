use std::collections::HashMap;

use chrono::{Datelike, Months, NaiveDate};
use log::debug;
use rust_decimal::{Decimal, MathematicalOps};
use rust_decimal_macros::dec;

use crate::constants::DECIMAL_PRECISION;
use crate::errors::{CalculatorError, Result, ValidationError};

use super::projection_model::{
    ActualValuePoint, AnnualProjectionSummary, GrowthProjection, MonthlyProjectionPoint,
    ProjectionInput,
};

/// Produces the monthly compound-growth target curve for goal planning.
#[derive(Default, Debug, Clone)]
pub struct GrowthProjector {}

impl GrowthProjector {
    pub fn new() -> Self {
        GrowthProjector {}
    }

    /// Projects `years * 12 + 1` monthly points (index 0 is the start) plus a
    /// calendar-year rollup.
    ///
    /// Contributions land at the start of each month, before that month's
    /// interest accrues. Observed history, when supplied, is aligned onto the
    /// curve by calendar month; months without history stay `None`.
    pub fn project(&self, input: &ProjectionInput) -> Result<GrowthProjection> {
        if input.annual_rate_percent <= dec!(-100) {
            return Err(ValidationError::InvalidInput(format!(
                "Annual rate must be above -100%, got {}",
                input.annual_rate_percent
            ))
            .into());
        }
        if input.starting_amount.is_sign_negative() {
            return Err(ValidationError::InvalidInput(format!(
                "Starting amount must not be negative, got {}",
                input.starting_amount
            ))
            .into());
        }
        if input.monthly_contribution.is_sign_negative() {
            return Err(ValidationError::InvalidInput(format!(
                "Monthly contribution must not be negative, got {}",
                input.monthly_contribution
            ))
            .into());
        }

        let monthly_rate = Self::monthly_compound_rate(input.annual_rate_percent);
        let actual_by_month = Self::index_actuals(&input.actual_series);
        let total_months = input.years * 12;
        debug!(
            "Projecting {} months from {} at {}%/year.",
            total_months, input.start_date, input.annual_rate_percent
        );

        let mut monthly = Vec::with_capacity(total_months as usize + 1);
        let mut balance = input.starting_amount;
        let mut contributed = input.starting_amount;

        monthly.push(MonthlyProjectionPoint {
            month_index: 0,
            date: input.start_date,
            ending_balance: balance,
            cumulative_contribution: contributed,
            cumulative_interest: Decimal::ZERO,
            actual: Self::lookup_actual(&actual_by_month, input.start_date),
        });

        let mut annual = Vec::with_capacity(input.years as usize);
        let mut yearly_deposit = Decimal::ZERO;
        let mut yearly_interest = Decimal::ZERO;

        for month_index in 1..=total_months {
            let date = input
                .start_date
                .checked_add_months(Months::new(month_index))
                .ok_or_else(|| {
                    CalculatorError::Calculation(format!(
                        "Projection date overflow at month {}",
                        month_index
                    ))
                })?;

            balance += input.monthly_contribution;
            contributed += input.monthly_contribution;
            yearly_deposit += input.monthly_contribution;

            let interest = balance * monthly_rate;
            balance += interest;
            yearly_interest += interest;

            monthly.push(MonthlyProjectionPoint {
                month_index,
                date,
                ending_balance: balance.round_dp(DECIMAL_PRECISION),
                cumulative_contribution: contributed.round_dp(DECIMAL_PRECISION),
                cumulative_interest: (balance - contributed).round_dp(DECIMAL_PRECISION),
                actual: Self::lookup_actual(&actual_by_month, date),
            });

            if month_index % 12 == 0 {
                annual.push(AnnualProjectionSummary {
                    year: input.start_date.year() + (month_index / 12) as i32 - 1,
                    deposit: yearly_deposit.round_dp(DECIMAL_PRECISION),
                    interest: yearly_interest.round_dp(DECIMAL_PRECISION),
                    ending_balance: balance.round_dp(DECIMAL_PRECISION),
                });
                yearly_deposit = Decimal::ZERO;
                yearly_interest = Decimal::ZERO;
            }
        }

        Ok(GrowthProjection { monthly, annual })
    }

    /// Geometric monthly rate: twelve compoundings reproduce the stated
    /// annual return exactly. Dividing the annual rate by twelve would
    /// understate compounding.
    fn monthly_compound_rate(annual_rate_percent: Decimal) -> Decimal {
        let base = Decimal::ONE + annual_rate_percent / dec!(100);
        base.powd(Decimal::ONE / dec!(12)) - Decimal::ONE
    }

    /// Indexes observed values by calendar month; a later sample within the
    /// same month overwrites an earlier one.
    fn index_actuals(series: &[ActualValuePoint]) -> HashMap<(i32, u32), Decimal> {
        let mut sorted: Vec<&ActualValuePoint> = series.iter().collect();
        sorted.sort_by_key(|point| point.date);

        let mut by_month = HashMap::new();
        for point in sorted {
            by_month.insert((point.date.year(), point.date.month()), point.value);
        }
        by_month
    }

    fn lookup_actual(
        by_month: &HashMap<(i32, u32), Decimal>,
        date: NaiveDate,
    ) -> Option<Decimal> {
        by_month.get(&(date.year(), date.month())).copied()
    }
}
