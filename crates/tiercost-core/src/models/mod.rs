//! Domain models for tiered billing
//!
//! This module contains the core domain models used throughout the workspace.

pub mod price_band;

pub use price_band::{validate_price_bands, Consumption, PriceBand};
