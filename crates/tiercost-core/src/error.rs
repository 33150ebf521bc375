//! Unified error handling for tiered billing
//!
//! The cost calculation itself is total over well-formed input; the variants
//! here cover provider failures, construction-time wiring mistakes and
//! configuration loading.

use thiserror::Error;

/// Main application error type
///
/// Account-data providers report their failures with this type and the
/// calculator hands them back to the caller untouched.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    // ==================== Data Access Errors ====================
    #[error("Database error: {0}")]
    Database(String),

    #[error("Account not found: {0}")]
    AccountNotFound(String),

    // ==================== Validation Errors ====================
    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid price bands: {0}")]
    InvalidPriceBands(String),

    // ==================== Internal Errors ====================
    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serialization(String),
}

impl AppError {
    /// Returns the stable error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Database(_) => "database_error",
            AppError::AccountNotFound(_) => "account_not_found",
            AppError::MissingField(_) => "missing_field",
            AppError::InvalidPriceBands(_) => "invalid_price_bands",
            AppError::Internal(_) => "internal_error",
            AppError::Config(_) => "config_error",
            AppError::Serialization(_) => "serialization_error",
        }
    }
}

// ==================== From implementations ====================

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<config::ConfigError> for AppError {
    fn from(err: config::ConfigError) -> Self {
        AppError::Config(err.to_string())
    }
}
