//! # Purchases Types
//!
//! Domain types and port traits for the purchase recording and currency
//! conversion service. This crate has ZERO external IO dependencies - only
//! data structures, business rules, and trait definitions.
//!
//! ## Architecture
//!
//! This crate represents the **innermost core** of the hexagonal architecture:
//! - `domain/` - Pure domain types (Purchase, PurchaseAmount, ConvertedAmount)
//! - `ports/` - Trait definitions that adapters must implement
//! - `dto/` - Data Transfer Objects for API boundaries
//! - `error/` - Domain and application error types

pub mod domain;
pub mod dto;
pub mod error;
pub mod ports;

// Re-export commonly used types
pub use domain::{
    ConvertedAmount, ConvertedPurchase, NewPurchase, ORIGIN_COUNTRY, ORIGIN_CURRENCY, Purchase,
    PurchaseAmount, PurchaseId,
};
pub use dto::*;
pub use error::{AppError, ConversionError, DomainError, RepoError};
pub use ports::{ExchangeError, ExchangeRateGateway, PurchaseRepository};
pub use treasury_rates::{ExchangeRateRecord, RateFilter, RateSort};
