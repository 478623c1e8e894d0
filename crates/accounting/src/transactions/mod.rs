//! Transaction records and batch validation.

mod transactions_model;

pub use transactions_model::*;
