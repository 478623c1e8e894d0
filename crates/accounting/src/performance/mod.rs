//! Time-weighted return calculation over portfolio valuation series.

mod performance_model;
mod twr_calculator;

pub use performance_model::*;
pub use twr_calculator::*;
