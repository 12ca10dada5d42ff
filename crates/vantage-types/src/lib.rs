//! Vantage Types - Shared billing domain types
//!
//! This crate contains the domain types read by the billing dashboard:
//! - Billing snapshot (subscription state, trial, adjustments, period)
//! - Products and plans
//! - Snapshot validation errors

pub mod billing;
pub mod error;
pub mod product;

pub use billing::*;
pub use error::*;
pub use product::*;
