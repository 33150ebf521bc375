//! Business logic services for tiered billing
//!
//! # Services
//!
//! - `TotalCostCalculator` - banded usage cost for an account and month,
//!   reading usage and tariffs through an `AccountDetails` provider
//!
//! The pure `tiered_cost` and `band_charges` functions are exported for
//! callers that already hold the usage count and bands.

pub mod cost_calculator;

pub use cost_calculator::{
    band_charges, tiered_cost, BandCharge, TotalCostCalculator, TotalCostCalculatorBuilder,
};
