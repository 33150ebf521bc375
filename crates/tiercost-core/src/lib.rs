//! Tiered Billing Core Library
//!
//! This crate provides the foundational types, traits, and error handling
//! for tiered usage billing. It includes:
//!
//! - Domain models (PriceBand)
//! - The account-data provider trait consumed by the cost calculator
//! - Unified error handling with stable error codes
//! - Application configuration and tracing bootstrap

pub mod config;
pub mod error;
pub mod models;
pub mod telemetry;
pub mod traits;

pub use config::AppConfig;
pub use error::AppError;

/// Result type alias using AppError
pub type AppResult<T> = Result<T, AppError>;
