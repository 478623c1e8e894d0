//! FIFO lot matching for closed-trade performance ranking.

mod fifo_matcher;

pub use fifo_matcher::*;
