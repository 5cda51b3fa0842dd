//! # Purchases Hex
//!
//! Conversion engine, application service and HTTP adapter for the
//! purchases service.
//!
//! ## Architecture
//!
//! - `conversion/` - Currency conversion engine (rate window, selection, rounding)
//! - `service/` - Application service (orchestrates store and engine)
//! - `inbound/` - HTTP adapter (Axum server)
//!
//! The service is generic over `R: PurchaseRepository` and
//! `G: ExchangeRateGateway`, allowing different adapters to be injected.

pub mod conversion;
pub mod inbound;
pub mod openapi;
pub mod service;

#[cfg(test)]
mod service_tests;

pub use conversion::ConversionEngine;
pub use service::PurchaseService;
