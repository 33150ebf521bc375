//! Price band model
//!
//! A price band is one tier of a banded tariff: every billable unit whose
//! ordinal falls inside `[quantity_from, quantity_to]` is charged at
//! `price_per_unit`. The top band of a tariff has no upper bound.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// How much of a band a usage count reaches into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Consumption {
    /// Usage runs past the band's upper bound; the whole range is billed
    Full,
    /// Usage stops inside the band (or on one of its bounds), or the band is unbounded
    Partial,
}

/// Price band entity
///
/// Bands are supplied by the account-data provider and trusted as given:
/// nothing here checks that a set of bands is contiguous or sorted. Use
/// [`validate_price_bands`] when that needs vetting.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PriceBand {
    /// First unit billed in this band (inclusive, starts at 1)
    pub quantity_from: u64,

    /// Last unit billed in this band (inclusive, None = unbounded)
    #[serde(default)]
    pub quantity_to: Option<u64>,

    /// Price charged for each unit inside the band
    pub price_per_unit: Decimal,
}

impl PriceBand {
    /// Create a band covering `[quantity_from, quantity_to]`
    pub fn bounded(quantity_from: u64, quantity_to: u64, price_per_unit: Decimal) -> Self {
        Self {
            quantity_from,
            quantity_to: Some(quantity_to),
            price_per_unit,
        }
    }

    /// Create an open-ended top band starting at `quantity_from`
    pub fn unbounded(quantity_from: u64, price_per_unit: Decimal) -> Self {
        Self {
            quantity_from,
            quantity_to: None,
            price_per_unit,
        }
    }

    #[inline]
    pub fn is_unbounded(&self) -> bool {
        self.quantity_to.is_none()
    }

    /// Check if `usage` lands inside this band's range
    pub fn contains(&self, usage: u64) -> bool {
        usage >= self.quantity_from && self.quantity_to.map_or(true, |to| usage <= to)
    }

    /// Check if `usage` runs past the upper bound
    ///
    /// Usage equal to `quantity_to` is not full consumption.
    pub fn is_fully_consumed_by(&self, usage: u64) -> bool {
        self.quantity_to.map_or(false, |to| usage > to)
    }

    /// Classify how `usage` consumes this band
    ///
    /// Returns `None` when usage stays below `quantity_from` and the band
    /// contributes nothing.
    pub fn consumption(&self, usage: u64) -> Option<Consumption> {
        if self.quantity_from > usage {
            return None;
        }

        if self.is_fully_consumed_by(usage) {
            Some(Consumption::Full)
        } else {
            Some(Consumption::Partial)
        }
    }

    /// Number of units billed in this band for `usage`
    ///
    /// Computed in `Decimal` so a band with `quantity_to < quantity_from`
    /// cannot underflow.
    pub fn units_consumed(&self, usage: u64) -> Decimal {
        let last_unit = match (self.consumption(usage), self.quantity_to) {
            (None, _) => return Decimal::ZERO,
            (Some(Consumption::Full), Some(to)) => to,
            (Some(_), _) => usage,
        };

        Decimal::from(last_unit) - Decimal::from(self.quantity_from) + Decimal::ONE
    }

    /// Amount this band contributes for `usage`
    #[inline]
    pub fn charge_for(&self, usage: u64) -> Decimal {
        self.units_consumed(usage) * self.price_per_unit
    }
}

/// Check that a set of bands forms a consistent tariff
///
/// Bands may be given in any order. A consistent tariff starts at unit 1,
/// has no gaps or overlaps, leaves only its last band unbounded and carries
/// no negative prices. The cost calculator never calls this.
pub fn validate_price_bands(bands: &[PriceBand]) -> Result<(), AppError> {
    if bands.is_empty() {
        return Err(AppError::InvalidPriceBands(
            "no price bands configured".to_string(),
        ));
    }

    let mut sorted: Vec<&PriceBand> = bands.iter().collect();
    sorted.sort_by_key(|band| band.quantity_from);

    let mut next_from = 1u64;

    for (index, band) in sorted.iter().enumerate() {
        if band.price_per_unit < Decimal::ZERO {
            return Err(AppError::InvalidPriceBands(format!(
                "band starting at {} has negative price {}",
                band.quantity_from, band.price_per_unit
            )));
        }

        if band.quantity_from != next_from {
            return Err(AppError::InvalidPriceBands(format!(
                "expected a band starting at {}, found one starting at {}",
                next_from, band.quantity_from
            )));
        }

        match band.quantity_to {
            Some(to) if to < band.quantity_from => {
                return Err(AppError::InvalidPriceBands(format!(
                    "band {}-{} ends before it starts",
                    band.quantity_from, to
                )));
            }
            Some(to) => {
                next_from = to.checked_add(1).ok_or_else(|| {
                    AppError::InvalidPriceBands(format!("band ending at {} overflows", to))
                })?;
            }
            None if index + 1 < sorted.len() => {
                return Err(AppError::InvalidPriceBands(format!(
                    "unbounded band starting at {} is not the last band",
                    band.quantity_from
                )));
            }
            None => {}
        }
    }

    Ok(())
}
