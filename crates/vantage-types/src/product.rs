//! Product and plan types

use serde::{Deserialize, Serialize};

/// Product line identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProductType {
    /// The platform plan bundling support levels and platform features
    PlatformAndSupport,
    /// Product analytics (events, trends, funnels)
    ProductAnalytics,
    /// Session replay
    SessionReplay,
    /// Feature flags and experiments
    FeatureFlags,
    /// Data warehouse
    DataWarehouse,
}

impl ProductType {
    /// Get the product type string
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::PlatformAndSupport => "platform_and_support",
            Self::ProductAnalytics => "product_analytics",
            Self::SessionReplay => "session_replay",
            Self::FeatureFlags => "feature_flags",
            Self::DataWarehouse => "data_warehouse",
        }
    }
}

impl std::fmt::Display for ProductType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Condition under which a plan is included at no charge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IncludedIf {
    /// Included while the customer has no paid subscription
    NoActiveSubscription,
    /// Included because a parent product subscription covers it
    HasParentSubscription,
}

/// One plan within a product
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Plan {
    /// Plan key (e.g. `free`, `paid`)
    pub key: String,
    /// Display name
    pub name: String,
    /// If set, the plan is included for free under the given condition
    /// rather than being a purchasable plan
    #[serde(skip_serializing_if = "Option::is_none")]
    pub included_if: Option<IncludedIf>,
    /// Unit price in cents (absent for free or custom-priced plans)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub unit_amount_cents: Option<i64>,
}

/// One priced offering shown on the billing dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    /// Product line
    pub product_type: ProductType,
    /// Display name
    pub name: String,
    /// Short description
    #[serde(default)]
    pub description: String,
    /// Whether the product only exists as an inclusion of another product
    /// and is never purchased on its own
    #[serde(default)]
    pub inclusion_only: bool,
    /// Plans offered for this product
    pub plans: Vec<Plan>,
}

impl Product {
    /// Whether the product is display-only and should be hidden from the
    /// product list: it is inclusion-only and every plan is conditional.
    /// A single plan without `included_if` makes the product real.
    pub fn is_display_only(&self) -> bool {
        self.inclusion_only && self.plans.iter().all(|plan| plan.included_if.is_some())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn plan(key: &str, included_if: Option<IncludedIf>) -> Plan {
        Plan {
            key: key.to_string(),
            name: key.to_string(),
            included_if,
            unit_amount_cents: None,
        }
    }

    #[test]
    fn test_inclusion_only_with_all_conditional_plans_is_display_only() {
        let product = Product {
            product_type: ProductType::SessionReplay,
            name: "Session replay".to_string(),
            description: String::new(),
            inclusion_only: true,
            plans: vec![
                plan("free", Some(IncludedIf::NoActiveSubscription)),
                plan("paid", Some(IncludedIf::HasParentSubscription)),
            ],
        };
        assert!(product.is_display_only());
    }

    #[test]
    fn test_unconditional_plan_makes_product_real() {
        let product = Product {
            product_type: ProductType::SessionReplay,
            name: "Session replay".to_string(),
            description: String::new(),
            inclusion_only: true,
            plans: vec![
                plan("free", Some(IncludedIf::NoActiveSubscription)),
                plan("paid", None),
            ],
        };
        assert!(!product.is_display_only());
    }

    #[test]
    fn test_non_inclusion_only_is_never_display_only() {
        let product = Product {
            product_type: ProductType::ProductAnalytics,
            name: "Product analytics".to_string(),
            description: String::new(),
            inclusion_only: false,
            plans: vec![plan("free", Some(IncludedIf::NoActiveSubscription))],
        };
        assert!(!product.is_display_only());
    }

    #[test]
    fn test_product_type_serializes_snake_case() {
        let json = serde_json::to_string(&ProductType::PlatformAndSupport).unwrap();
        assert_eq!(json, "\"platform_and_support\"");
    }
}
