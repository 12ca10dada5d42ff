//! Billing snapshot types
//!
//! A snapshot is a read-only value object fetched by the billing store.
//! The dashboard only reads it, never mutates it.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::{Product, ProductType, SnapshotError};

/// Payment provider customer ID
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CustomerId(pub String);

impl CustomerId {
    /// Create a new customer ID
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl std::fmt::Display for CustomerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Billing cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillingInterval {
    /// Billed monthly
    Month,
    /// Billed yearly
    Year,
}

impl std::fmt::Display for BillingInterval {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Month => write!(f, "month"),
            Self::Year => write!(f, "year"),
        }
    }
}

/// Current billing period bounds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillingPeriod {
    /// Period start
    pub current_period_start: DateTime<Utc>,
    /// Period end
    pub current_period_end: DateTime<Utc>,
    /// Billing cadence
    pub interval: BillingInterval,
}

impl BillingPeriod {
    /// Whole days left in the period as of `now` (never negative)
    pub fn days_remaining(&self, now: DateTime<Utc>) -> i64 {
        (self.current_period_end - now).num_days().max(0)
    }
}

/// What happens when a trial ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TrialKind {
    /// Trial simply expires
    Standard,
    /// The customer is subscribed to the target plan automatically
    Autosubscribe,
}

/// Active free trial
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trial {
    /// Plan the trial targets (e.g. `paid`)
    pub target: String,
    /// When the trial expires
    pub expires_at: DateTime<Utc>,
    /// Trial renewal mode
    pub kind: TrialKind,
}

/// Subscription level of the account
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SubscriptionLevel {
    /// No paid subscription
    Free,
    /// Standard paid subscription
    Paid,
    /// Custom contract (managed account)
    Custom,
}

/// Billing snapshot as fetched from the billing backend
///
/// Amounts are integer cents. A snapshot never carries both a
/// `discount_percent` and a `credit_balance_cents`; `validate` enforces
/// this before a snapshot is accepted by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BillingSnapshot {
    /// Whether the account has an active paid subscription
    pub has_active_subscription: bool,
    /// Subscription level
    pub subscription_level: SubscriptionLevel,
    /// Active trial, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trial: Option<Trial>,
    /// Amount billed so far this period, before credits
    pub current_total_cents: i64,
    /// Amount billed so far this period, after a percent discount
    pub current_total_after_discount_cents: i64,
    /// Projected period total, before credits
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_total_cents: Option<i64>,
    /// Projected period total, after a percent discount
    #[serde(skip_serializing_if = "Option::is_none")]
    pub projected_total_after_discount_cents: Option<i64>,
    /// Percent discount applied to the bill (mutually exclusive with credits)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub discount_percent: Option<u32>,
    /// Remaining credit balance (mutually exclusive with a percent discount)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credit_balance_cents: Option<i64>,
    /// When the credit balance expires
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credits_expire_at: Option<DateTime<Utc>>,
    /// Current billing period
    #[serde(skip_serializing_if = "Option::is_none")]
    pub billing_period: Option<BillingPeriod>,
    /// Products available to the account
    pub products: Vec<Product>,
    /// Payment provider customer reference
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_id: Option<CustomerId>,
    /// Payment portal URL (opaque, provider-hosted)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub portal_url: Option<String>,
}

impl BillingSnapshot {
    /// Validate snapshot invariants
    ///
    /// Checks the discount/credit mutual exclusivity, period ordering and
    /// amount signs. The store rejects snapshots that fail validation.
    pub fn validate(&self) -> Result<(), SnapshotError> {
        if self.discount_percent.is_some() && self.credit_balance_cents.is_some() {
            return Err(SnapshotError::ConflictingAdjustments);
        }

        if let Some(period) = &self.billing_period {
            if period.current_period_end < period.current_period_start {
                return Err(SnapshotError::InvertedPeriod {
                    start: period.current_period_start.to_rfc3339(),
                    end: period.current_period_end.to_rfc3339(),
                });
            }
        }

        if self.current_total_cents < 0 {
            return Err(SnapshotError::NegativeAmount("current_total_cents"));
        }
        if self.current_total_after_discount_cents < 0 {
            return Err(SnapshotError::NegativeAmount(
                "current_total_after_discount_cents",
            ));
        }
        if self.credit_balance_cents.is_some_and(|c| c < 0) {
            return Err(SnapshotError::NegativeAmount("credit_balance_cents"));
        }

        Ok(())
    }

    /// The platform-and-support product, if the account has one
    pub fn platform_and_support_product(&self) -> Option<&Product> {
        self.products
            .iter()
            .find(|p| p.product_type == ProductType::PlatformAndSupport)
    }

    /// Products worth rendering: display-only products are filtered out
    pub fn displayable_products(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|p| !p.is_display_only())
    }
}
