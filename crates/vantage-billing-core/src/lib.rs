//! Vantage Billing Core
//!
//! The billing dashboard core:
//! - An observable billing store (`unloaded -> loading -> {failed | loaded}`)
//!   that callers subscribe to and that fires a one-time analytics event on
//!   first successful load
//! - A pure view renderer that maps store state to exactly one of four
//!   top-level render branches
//! - Currency and date formatting helpers
//! - Deployment configuration choosing the error remediation path

pub mod analytics;
pub mod config;
pub mod error;
pub mod format;
pub mod store;
pub mod view;

pub use analytics::{AnalyticsEvent, AnalyticsSink, NoopSink};
pub use config::{ConfigError, DashboardConfig, Deployment};
pub use error::BillingError;
pub use store::{BillingState, BillingStore, LoadPhase, SubscriptionHandle};
pub use view::{render, BillingView, Dashboard, Remediation, ViewContext};
