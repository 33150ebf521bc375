//! Tiered cost calculator
//!
//! Prices a month of usage against an account's banded tariff. Each band the
//! usage reaches into contributes its own units at its own rate; bands above
//! the usage contribute nothing.

use std::sync::Arc;

use rust_decimal::Decimal;
use serde::Serialize;
use tiercost_core::{
    models::{Consumption, PriceBand},
    traits::{AccountDetails, TotalCostCalculation},
    AppError, AppResult,
};
use tracing::{debug, instrument};
use uuid::Uuid;

/// One line of an itemised cost breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BandCharge {
    pub band: PriceBand,
    pub consumption: Consumption,
    pub units: Decimal,
    pub amount: Decimal,
}

/// Total cost of `total_usage` units under `bands`
///
/// Bands are summed independently, so their order does not matter. A usage
/// of zero selects no band and costs exactly zero.
pub fn tiered_cost(total_usage: u64, bands: &[PriceBand]) -> Decimal {
    bands
        .iter()
        .filter(|band| band.quantity_from <= total_usage)
        .map(|band| band.charge_for(total_usage))
        .sum()
}

/// Itemised charges for every band `total_usage` reaches into, in input order
pub fn band_charges(total_usage: u64, bands: &[PriceBand]) -> Vec<BandCharge> {
    bands
        .iter()
        .filter_map(|band| {
            let consumption = band.consumption(total_usage)?;
            let units = band.units_consumed(total_usage);

            Some(BandCharge {
                band: band.clone(),
                consumption,
                units,
                amount: units * band.price_per_unit,
            })
        })
        .collect()
}

/// Cost calculator backed by an account-data provider
///
/// Holds no state besides the provider, so one instance can serve any number
/// of concurrent callers.
pub struct TotalCostCalculator<A: AccountDetails> {
    account_details: Arc<A>,
}

impl<A: AccountDetails> TotalCostCalculator<A> {
    /// Create a new calculator
    pub fn new(account_details: Arc<A>) -> Self {
        Self { account_details }
    }

    pub fn builder() -> TotalCostCalculatorBuilder<A> {
        TotalCostCalculatorBuilder {
            account_details: None,
        }
    }

    /// Itemised breakdown of the month's charges
    ///
    /// Performs the same two provider reads as `calculate_cost`.
    #[instrument(skip(self))]
    pub fn calculate_breakdown(
        &self,
        account_id: Uuid,
        month: u32,
        year: i32,
    ) -> AppResult<Vec<BandCharge>> {
        let (total_usage, bands) = self.load_usage_and_bands(account_id, month, year)?;
        Ok(band_charges(total_usage, &bands))
    }

    fn load_usage_and_bands(
        &self,
        account_id: Uuid,
        month: u32,
        year: i32,
    ) -> AppResult<(u64, Vec<PriceBand>)> {
        let total_usage = self
            .account_details
            .number_of_units_sent_in_period(account_id, month, year)?;
        let bands = self.account_details.get_price_bands_for_account(account_id)?;

        debug!(
            "Loaded usage {} and {} price bands for account {} ({}/{})",
            total_usage,
            bands.len(),
            account_id,
            month,
            year
        );

        Ok((total_usage, bands))
    }
}

impl<A: AccountDetails> TotalCostCalculation for TotalCostCalculator<A> {
    #[instrument(skip(self))]
    fn calculate_cost(&self, account_id: Uuid, month: u32, year: i32) -> AppResult<Decimal> {
        let (total_usage, bands) = self.load_usage_and_bands(account_id, month, year)?;

        let cost = tiered_cost(total_usage, &bands);

        debug!("Calculated cost: {} for {} units", cost, total_usage);

        Ok(cost)
    }
}

/// Builder for [`TotalCostCalculator`]
///
/// `build` refuses to produce a calculator without a provider.
pub struct TotalCostCalculatorBuilder<A: AccountDetails> {
    account_details: Option<Arc<A>>,
}

impl<A: AccountDetails> TotalCostCalculatorBuilder<A> {
    pub fn account_details(mut self, account_details: Arc<A>) -> Self {
        self.account_details = Some(account_details);
        self
    }

    pub fn build(self) -> AppResult<TotalCostCalculator<A>> {
        let account_details = self
            .account_details
            .ok_or_else(|| AppError::MissingField("account_details".to_string()))?;

        Ok(TotalCostCalculator::new(account_details))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    struct StubAccountDetails {
        usage: u64,
        bands: Vec<PriceBand>,
    }

    impl AccountDetails for StubAccountDetails {
        fn number_of_units_sent_in_period(
            &self,
            _account_id: Uuid,
            _month: u32,
            _year: i32,
        ) -> AppResult<u64> {
            Ok(self.usage)
        }

        fn get_price_bands_for_account(&self, _account_id: Uuid) -> AppResult<Vec<PriceBand>> {
            Ok(self.bands.clone())
        }
    }

    fn standard_bands() -> Vec<PriceBand> {
        vec![
            PriceBand::bounded(1, 200, dec!(0.10)),
            PriceBand::bounded(201, 500, dec!(0.08)),
            PriceBand::bounded(501, 1000, dec!(0.06)),
            PriceBand::unbounded(1001, dec!(0.03)),
        ]
    }

    fn two_bands() -> Vec<PriceBand> {
        vec![
            PriceBand::bounded(1, 100, dec!(0.01)),
            PriceBand::unbounded(101, dec!(0.77)),
        ]
    }

    #[test]
    fn test_tiered_cost_example() {
        // 200 * 0.10 + 300 * 0.08 + 200 * 0.06
        assert_eq!(tiered_cost(700, &standard_bands()), dec!(56.00));
    }

    #[test]
    fn test_tiered_cost_zero_usage() {
        assert_eq!(tiered_cost(0, &standard_bands()), Decimal::ZERO);
        assert_eq!(tiered_cost(0, &[]), Decimal::ZERO);
    }

    #[test]
    fn test_tiered_cost_unbounded_band() {
        let bands = vec![PriceBand::unbounded(1, dec!(0.03))];
        assert_eq!(tiered_cost(90, &bands), dec!(2.70));
    }

    #[test]
    fn test_tiered_cost_on_lower_boundary() {
        assert_eq!(tiered_cost(101, &two_bands()), dec!(1.77));
    }

    #[test]
    fn test_tiered_cost_on_upper_boundary() {
        assert_eq!(tiered_cost(100, &two_bands()), dec!(1.00));
    }

    #[test]
    fn test_tiered_cost_reaches_top_band() {
        // 20.00 + 24.00 + 30.00 + 500 * 0.03
        assert_eq!(tiered_cost(1500, &standard_bands()), dec!(89.00));
    }

    #[test]
    fn test_tiered_cost_ignores_band_order() {
        let mut reversed = standard_bands();
        reversed.reverse();
        assert_eq!(tiered_cost(700, &reversed), dec!(56.00));
    }

    #[test]
    fn test_band_charges_breakdown() {
        let charges = band_charges(700, &standard_bands());

        assert_eq!(charges.len(), 3);
        assert_eq!(charges[0].consumption, Consumption::Full);
        assert_eq!(charges[0].units, dec!(200));
        assert_eq!(charges[0].amount, dec!(20.00));
        assert_eq!(charges[1].consumption, Consumption::Full);
        assert_eq!(charges[1].amount, dec!(24.00));
        assert_eq!(charges[2].consumption, Consumption::Partial);
        assert_eq!(charges[2].units, dec!(200));
        assert_eq!(charges[2].amount, dec!(12.00));

        let total: Decimal = charges.iter().map(|c| c.amount).sum();
        assert_eq!(total, tiered_cost(700, &standard_bands()));
    }

    #[test]
    fn test_band_charges_upper_boundary_is_partial() {
        let charges = band_charges(100, &two_bands());
        assert_eq!(charges.len(), 1);
        assert_eq!(charges[0].consumption, Consumption::Partial);
        assert_eq!(charges[0].amount, dec!(1.00));
    }

    #[test]
    fn test_band_charge_serializes_for_invoices() {
        let charges = band_charges(250, &standard_bands());
        let json = serde_json::to_value(&charges[0]).unwrap();

        assert_eq!(json["consumption"], "full");
        assert_eq!(json["amount"], "20.00");
        assert_eq!(json["band"]["quantity_to"], 200);
    }

    #[test]
    fn test_calculator_with_stub() {
        let details = Arc::new(StubAccountDetails {
            usage: 700,
            bands: standard_bands(),
        });
        let calculator = TotalCostCalculator::new(details);

        let cost = calculator
            .calculate_cost(Uuid::new_v4(), 3, 2021)
            .unwrap();
        assert_eq!(cost, dec!(56.00));

        let breakdown = calculator
            .calculate_breakdown(Uuid::new_v4(), 3, 2021)
            .unwrap();
        assert_eq!(breakdown.len(), 3);
    }

    #[test]
    fn test_builder_requires_account_details() {
        let result = TotalCostCalculator::<StubAccountDetails>::builder().build();

        match result {
            Err(AppError::MissingField(field)) => assert_eq!(field, "account_details"),
            Err(other) => panic!("unexpected error: {}", other),
            Ok(_) => panic!("builder accepted a calculator without account details"),
        }
    }

    #[test]
    fn test_builder_with_account_details() {
        let calculator = TotalCostCalculator::builder()
            .account_details(Arc::new(StubAccountDetails {
                usage: 90,
                bands: vec![PriceBand::unbounded(1, dec!(0.03))],
            }))
            .build()
            .unwrap();

        let cost = calculator
            .calculate_cost(Uuid::new_v4(), 3, 2021)
            .unwrap();
        assert_eq!(cost, dec!(2.70));
    }
}
