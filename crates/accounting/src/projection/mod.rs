//! Compound-growth projection for goal planning.

mod projection_model;
mod projection_service;

pub use projection_model::*;
pub use projection_service::*;
