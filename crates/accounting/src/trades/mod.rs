//! Grouping of transaction streams into discrete open/closed trades.

mod trade_grouper;
mod trades_model;

pub use trade_grouper::*;
pub use trades_model::*;
