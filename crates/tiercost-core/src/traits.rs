//! Common traits for data access and services
//!
//! Defines the account-data provider the cost calculator reads from and the
//! calculator's own service contract.

use std::sync::Arc;

use rust_decimal::Decimal;
use uuid::Uuid;

use crate::error::AppError;
use crate::models::PriceBand;

/// Account-data provider
///
/// Supplies usage counts and tariffs per account. Implementations own all
/// I/O, caching and account validation; errors they return reach the caller
/// of the calculator unchanged.
pub trait AccountDetails: Send + Sync {
    /// Total billable units the account consumed in the given month
    fn number_of_units_sent_in_period(
        &self,
        account_id: Uuid,
        month: u32,
        year: i32,
    ) -> Result<u64, AppError>;

    /// Price bands configured for the account
    fn get_price_bands_for_account(&self, account_id: Uuid) -> Result<Vec<PriceBand>, AppError>;
}

impl<A: AccountDetails + ?Sized> AccountDetails for Arc<A> {
    fn number_of_units_sent_in_period(
        &self,
        account_id: Uuid,
        month: u32,
        year: i32,
    ) -> Result<u64, AppError> {
        (**self).number_of_units_sent_in_period(account_id, month, year)
    }

    fn get_price_bands_for_account(&self, account_id: Uuid) -> Result<Vec<PriceBand>, AppError> {
        (**self).get_price_bands_for_account(account_id)
    }
}

impl<A: AccountDetails + ?Sized> AccountDetails for &A {
    fn number_of_units_sent_in_period(
        &self,
        account_id: Uuid,
        month: u32,
        year: i32,
    ) -> Result<u64, AppError> {
        (**self).number_of_units_sent_in_period(account_id, month, year)
    }

    fn get_price_bands_for_account(&self, account_id: Uuid) -> Result<Vec<PriceBand>, AppError> {
        (**self).get_price_bands_for_account(account_id)
    }
}

/// Total cost calculation service
pub trait TotalCostCalculation: Send + Sync {
    /// Calculate the banded cost of an account's usage for one month
    fn calculate_cost(&self, account_id: Uuid, month: u32, year: i32) -> Result<Decimal, AppError>;
}
