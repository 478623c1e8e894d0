use log::debug;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::constants::DECIMAL_PRECISION;

use super::performance_model::{PortfolioSnapshotPoint, TwrReturnPoint};

/// Computes cumulative time-weighted returns over a valuation series.
///
/// Raw `(value - invested) / invested` distorts apparent performance when
/// cash moves in or out mid-series; TWR treats each inter-snapshot interval
/// as a sub-period, subtracts the interval's net cash flow from its ending
/// value, and chains the sub-period returns. The result is invariant under
/// the timing of contributions within an interval.
#[derive(Default, Debug, Clone)]
pub struct TwrCalculator {}

impl TwrCalculator {
    pub fn new() -> Self {
        TwrCalculator {}
    }

    /// Annotates each point with the cumulative TWR percentage.
    ///
    /// The series is sorted chronologically first (stable for equal dates).
    /// Intervals starting from a non-positive value contribute nothing: a
    /// return off a zero base is meaningless, so the cumulative factor
    /// carries forward unchanged. This is a numerical safeguard, not an
    /// error. An empty series yields an empty result.
    pub fn annotate(&self, mut series: Vec<PortfolioSnapshotPoint>) -> Vec<TwrReturnPoint> {
        series.sort_by_key(|point| point.date);
        debug!("Computing TWR over {} snapshot points.", series.len());

        let one = Decimal::ONE;
        let mut cumulative_twr = one;
        let mut annotated = Vec::with_capacity(series.len());

        for (i, point) in series.iter().enumerate() {
            if i > 0 {
                let prev = &series[i - 1];
                let cash_flow = point.total_invested - prev.total_invested;

                if prev.total_value > Decimal::ZERO {
                    let period_return =
                        (point.total_value - cash_flow - prev.total_value) / prev.total_value;
                    cumulative_twr *= one + period_return;
                }
            }

            annotated.push(TwrReturnPoint {
                date: point.date,
                total_value: point.total_value,
                total_invested: point.total_invested,
                twr_percent: ((cumulative_twr - one) * dec!(100)).round_dp(DECIMAL_PRECISION),
            });
        }

        annotated
    }
}
