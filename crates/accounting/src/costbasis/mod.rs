//! Weighted-average cost basis tracking.

mod costbasis_calculator;
mod costbasis_model;

pub use costbasis_calculator::*;
pub use costbasis_model::*;

#[cfg(test)]
mod costbasis_calculator_tests;
