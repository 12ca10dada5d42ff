//! Billing dashboard view renderer
//!
//! `render` is a pure function from billing state to a render model. It
//! always produces exactly one of four top-level branches: a loading
//! placeholder, a restricted-access notice, a load-failure notice, or the
//! dashboard. Within the dashboard, each block is computed independently
//! from the snapshot. Drawing the model is left to the caller.

use chrono::{DateTime, Utc};
use vantage_types::{BillingSnapshot, Product, ProductType, SubscriptionLevel, TrialKind};

use crate::config::{DashboardConfig, Deployment};
use crate::format::{format_date, format_usd, format_usd_whole, to_sentence_case};
use crate::store::BillingState;

/// Rendering context supplied by the caller
#[derive(Debug, Clone)]
pub struct ViewContext {
    /// Deployment mode, choosing the error remediation path
    pub deployment: Deployment,
    /// Contact address used on self-hosted deployments
    pub support_email: String,
    /// Restriction reason when the viewer lacks billing access
    pub restriction: Option<String>,
    /// Whether the dashboard is embedded in the onboarding flow, which
    /// hides the summary and the portal link
    pub is_onboarding: bool,
    /// Managed accounts never see the subscribe CTA
    pub is_managed_account: bool,
}

impl ViewContext {
    /// Context derived from the dashboard configuration
    pub fn from_config(config: &DashboardConfig) -> Self {
        Self {
            deployment: config.deployment,
            support_email: config.support_email.clone(),
            restriction: None,
            is_onboarding: false,
            is_managed_account: false,
        }
    }
}

/// How the user can get help when billing state cannot be retrieved
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Remediation {
    /// Open the in-app bug report flow (hosted deployments)
    BugReport,
    /// Contact the given address (self-hosted deployments)
    ContactEmail(String),
}

/// Top-level render model; exactly one branch per render
#[derive(Debug, Clone)]
pub enum BillingView {
    /// Billing state is being fetched and nothing is loaded yet
    Loading,
    /// The viewer is not allowed to see billing
    Restricted {
        /// Restriction reason, shown verbatim
        reason: String,
        /// Whether to offer a return-home action
        return_home: bool,
    },
    /// Loading finished without a snapshot
    LoadFailed {
        /// User-facing message
        message: String,
        /// Deployment-dependent help affordance
        remediation: Remediation,
    },
    /// The full dashboard
    Dashboard(Box<Dashboard>),
}

/// Dashboard render model; every block is conditional
#[derive(Debug, Clone, Default)]
pub struct Dashboard {
    /// Transient fetch error shown above an otherwise usable dashboard
    pub error_banner: Option<ErrorBanner>,
    /// Trial notice
    pub trial_banner: Option<TrialBanner>,
    /// Subscribe call-to-action for unsubscribed accounts
    pub cta_hero: Option<CtaHero>,
    /// Current/projected amounts and period bounds
    pub summary: Option<BillingSummary>,
    /// Link to the provider-hosted payment portal
    pub portal: Option<PortalLink>,
    /// Products to list, display-only products filtered out
    pub products: Vec<Product>,
    /// Unsubscribe affordance for paid accounts
    pub unsubscribe: Option<UnsubscribeCard>,
}

/// Error banner shown inside the dashboard
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ErrorBanner {
    /// User-facing message
    pub message: String,
}

/// Trial banner content
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialBanner {
    /// Sentence-cased target plan name
    pub plan_name: String,
    /// Formatted expiry date
    pub expires_on: String,
    /// Whether to note the automatic subscription at trial end
    pub autosubscribe: bool,
}

/// Subscribe call-to-action
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CtaHero {
    /// Product the CTA subscribes to
    pub product_type: ProductType,
    /// Product display name
    pub product_name: String,
}

/// Current bill summary
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BillingSummary {
    /// Formatted current bill total; only shown with an active
    /// subscription. With a percent discount this is the after-discount
    /// amount; with credits it is the pre-credit amount so the customer
    /// sees what their deduction applies to.
    pub current_total: Option<String>,
    /// Formatted projected total, only when positive
    pub projected_total: Option<String>,
    /// Remaining credits
    pub credits: Option<CreditsBlock>,
    /// Applied percent discount
    pub discount_percent: Option<u32>,
    /// Billing period line
    pub period: PeriodLine,
}

/// Credit balance block
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreditsBlock {
    /// Whole-dollar formatted balance
    pub amount: String,
    /// Formatted expiry date, if the credits expire
    pub expires_on: Option<String>,
}

/// Billing period line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PeriodLine {
    /// `Billing period` for subscribed accounts, `Cycle` otherwise
    pub label: String,
    /// Formatted period start
    pub start: String,
    /// Formatted period end
    pub end: String,
    /// Whole days left in the period
    pub days_remaining: i64,
    /// Whether to note that the free allocation resets at cycle end
    pub free_allocation_note: bool,
}

/// Payment portal link
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortalLink {
    /// Provider-hosted portal URL
    pub url: String,
    /// Button label, depending on subscription state
    pub label: String,
}

/// Unsubscribe affordance
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsubscribeCard {
    /// Product the unsubscribe applies to
    pub product_type: ProductType,
}

/// Render the billing state into exactly one of the four branches
pub fn render(state: &BillingState, ctx: &ViewContext, now: DateTime<Utc>) -> BillingView {
    if state.snapshot.is_none() && state.loading {
        return BillingView::Loading;
    }

    if let Some(reason) = &ctx.restriction {
        return BillingView::Restricted {
            reason: reason.clone(),
            return_home: true,
        };
    }

    let Some(snapshot) = &state.snapshot else {
        // Loading finished with nothing to show
        let remediation = match ctx.deployment {
            Deployment::Cloud => Remediation::BugReport,
            Deployment::SelfHosted => Remediation::ContactEmail(ctx.support_email.clone()),
        };
        return BillingView::LoadFailed {
            message: "There was an issue retrieving your current billing information."
                .to_string(),
            remediation,
        };
    };

    BillingView::Dashboard(Box::new(render_dashboard(snapshot, state, ctx, now)))
}

fn render_dashboard(
    snapshot: &BillingSnapshot,
    state: &BillingState,
    ctx: &ViewContext,
    now: DateTime<Utc>,
) -> Dashboard {
    let platform_product = snapshot.platform_and_support_product();

    let error_banner = state.error.as_ref().map(|err| ErrorBanner {
        message: err.to_string(),
    });

    let trial_banner = snapshot.trial.as_ref().map(|trial| TrialBanner {
        plan_name: to_sentence_case(&trial.target),
        expires_on: format_date(trial.expires_at),
        autosubscribe: trial.kind == TrialKind::Autosubscribe,
    });

    let cta_hero = if !ctx.is_managed_account
        && !snapshot.has_active_subscription
        && snapshot.trial.is_none()
    {
        platform_product.map(|product| CtaHero {
            product_type: product.product_type,
            product_name: product.name.clone(),
        })
    } else {
        None
    };

    let summary = match (&snapshot.billing_period, ctx.is_onboarding) {
        (Some(period), false) => Some(render_summary(snapshot, period, now)),
        _ => None,
    };

    let portal = match (&snapshot.customer_id, &snapshot.portal_url, ctx.is_onboarding) {
        (Some(_), Some(url), false) => Some(PortalLink {
            url: url.clone(),
            label: if snapshot.has_active_subscription {
                "Manage card details and invoices".to_string()
            } else {
                "View past invoices".to_string()
            },
        }),
        _ => None,
    };

    let unsubscribe = if snapshot.subscription_level == SubscriptionLevel::Paid {
        platform_product.map(|product| UnsubscribeCard {
            product_type: product.product_type,
        })
    } else {
        None
    };

    Dashboard {
        error_banner,
        trial_banner,
        cta_hero,
        summary,
        portal,
        products: snapshot.displayable_products().cloned().collect(),
        unsubscribe,
    }
}

fn render_summary(
    snapshot: &BillingSnapshot,
    period: &vantage_types::BillingPeriod,
    now: DateTime<Utc>,
) -> BillingSummary {
    // Amounts only appear with an active subscription. Percent discount
    // and credits never coexist (validated on ingest): with a discount we
    // show the after-discount amount owed, with credits the pre-credit
    // amount the deduction will apply to.
    let (current_total, projected_total, credits, discount_percent) =
        if snapshot.has_active_subscription {
            let current = if snapshot.discount_percent.is_some() {
                snapshot.current_total_after_discount_cents
            } else {
                snapshot.current_total_cents
            };

            let projected = match (
                snapshot.projected_total_cents,
                snapshot.projected_total_after_discount_cents,
            ) {
                (Some(pre), after) if pre > 0 => {
                    if snapshot.discount_percent.is_some() {
                        after.or(Some(pre))
                    } else {
                        Some(pre)
                    }
                }
                _ => None,
            };

            let credits = snapshot.credit_balance_cents.map(|balance| CreditsBlock {
                amount: format_usd_whole(balance),
                expires_on: snapshot.credits_expire_at.map(format_date),
            });

            (
                Some(format_usd(current)),
                projected.map(format_usd),
                credits,
                snapshot.discount_percent,
            )
        } else {
            (None, None, None, None)
        };

    BillingSummary {
        current_total,
        projected_total,
        credits,
        discount_percent,
        period: PeriodLine {
            label: if snapshot.has_active_subscription {
                "Billing period".to_string()
            } else {
                "Cycle".to_string()
            },
            start: format_date(period.current_period_start),
            end: format_date(period.current_period_end),
            days_remaining: period.days_remaining(now),
            free_allocation_note: !snapshot.has_active_subscription,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::BillingError;
    use chrono::TimeZone;
    use vantage_types::{
        BillingInterval, BillingPeriod, CustomerId, IncludedIf, Plan, Trial,
    };

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 8, 24, 12, 0, 0).unwrap()
    }

    fn ctx() -> ViewContext {
        ViewContext {
            deployment: Deployment::Cloud,
            support_email: "sales@vantage.example.com".to_string(),
            restriction: None,
            is_onboarding: false,
            is_managed_account: false,
        }
    }

    fn platform_product() -> Product {
        Product {
            product_type: ProductType::PlatformAndSupport,
            name: "Platform and support".to_string(),
            description: String::new(),
            inclusion_only: false,
            plans: vec![Plan {
                key: "paid".to_string(),
                name: "Paid".to_string(),
                included_if: None,
                unit_amount_cents: Some(0),
            }],
        }
    }

    fn snapshot() -> BillingSnapshot {
        BillingSnapshot {
            has_active_subscription: true,
            subscription_level: SubscriptionLevel::Paid,
            trial: None,
            current_total_cents: 10_000,
            current_total_after_discount_cents: 8_000,
            projected_total_cents: Some(25_000),
            projected_total_after_discount_cents: Some(20_000),
            discount_percent: None,
            credit_balance_cents: None,
            credits_expire_at: None,
            billing_period: Some(BillingPeriod {
                current_period_start: Utc.with_ymd_and_hms(2026, 8, 1, 0, 0, 0).unwrap(),
                current_period_end: Utc.with_ymd_and_hms(2026, 9, 1, 0, 0, 0).unwrap(),
                interval: BillingInterval::Month,
            }),
            products: vec![platform_product()],
            customer_id: Some(CustomerId::new("cus_123")),
            portal_url: Some("https://billing.example.com/portal".to_string()),
        }
    }

    fn loaded_state() -> BillingState {
        BillingState {
            snapshot: Some(snapshot()),
            loading: false,
            error: None,
        }
    }

    #[test]
    fn test_loading_branch() {
        let state = BillingState {
            snapshot: None,
            loading: true,
            error: None,
        };
        assert!(matches!(render(&state, &ctx(), now()), BillingView::Loading));
    }

    #[test]
    fn test_loading_wins_over_restriction() {
        let state = BillingState {
            snapshot: None,
            loading: true,
            error: None,
        };
        let mut ctx = ctx();
        ctx.restriction = Some("Admins only".to_string());
        assert!(matches!(render(&state, &ctx, now()), BillingView::Loading));
    }

    #[test]
    fn test_restricted_branch() {
        let mut ctx = ctx();
        ctx.restriction = Some("You need admin access".to_string());
        match render(&loaded_state(), &ctx, now()) {
            BillingView::Restricted { reason, return_home } => {
                assert_eq!(reason, "You need admin access");
                assert!(return_home);
            }
            other => panic!("expected Restricted, got {other:?}"),
        }
    }

    #[test]
    fn test_load_failed_remediation_by_deployment() {
        let state = BillingState::default();

        match render(&state, &ctx(), now()) {
            BillingView::LoadFailed { remediation, .. } => {
                assert_eq!(remediation, Remediation::BugReport);
            }
            other => panic!("expected LoadFailed, got {other:?}"),
        }

        let mut self_hosted = ctx();
        self_hosted.deployment = Deployment::SelfHosted;
        match render(&state, &self_hosted, now()) {
            BillingView::LoadFailed { remediation, .. } => {
                assert_eq!(
                    remediation,
                    Remediation::ContactEmail("sales@vantage.example.com".to_string())
                );
            }
            other => panic!("expected LoadFailed, got {other:?}"),
        }
    }

    fn dashboard(state: &BillingState, ctx: &ViewContext) -> Dashboard {
        match render(state, ctx, now()) {
            BillingView::Dashboard(dashboard) => *dashboard,
            other => panic!("expected Dashboard, got {other:?}"),
        }
    }

    #[test]
    fn test_current_total_without_adjustments() {
        let dash = dashboard(&loaded_state(), &ctx());
        let summary = dash.summary.unwrap();
        assert_eq!(summary.current_total.as_deref(), Some("$100.00"));
        assert_eq!(summary.projected_total.as_deref(), Some("$250.00"));
        assert!(summary.credits.is_none());
        assert_eq!(summary.discount_percent, None);
    }

    #[test]
    fn test_discount_percent_selects_after_discount_amounts() {
        let mut state = loaded_state();
        let snap = state.snapshot.as_mut().unwrap();
        snap.discount_percent = Some(20);

        let summary = dashboard(&state, &ctx()).summary.unwrap();
        assert_eq!(summary.current_total.as_deref(), Some("$80.00"));
        assert_eq!(summary.projected_total.as_deref(), Some("$200.00"));
        assert_eq!(summary.discount_percent, Some(20));
    }

    #[test]
    fn test_credits_show_pre_credit_amount() {
        let mut state = loaded_state();
        let snap = state.snapshot.as_mut().unwrap();
        snap.credit_balance_cents = Some(50_000_00);
        snap.credits_expire_at = Some(Utc.with_ymd_and_hms(2026, 12, 31, 0, 0, 0).unwrap());

        let summary = dashboard(&state, &ctx()).summary.unwrap();
        assert_eq!(summary.current_total.as_deref(), Some("$100.00"));
        let credits = summary.credits.unwrap();
        assert_eq!(credits.amount, "$50,000");
        assert_eq!(credits.expires_on.as_deref(), Some("December 31, 2026"));
    }

    #[test]
    fn test_zero_projected_total_hidden() {
        let mut state = loaded_state();
        let snap = state.snapshot.as_mut().unwrap();
        snap.projected_total_cents = Some(0);

        let summary = dashboard(&state, &ctx()).summary.unwrap();
        assert!(summary.projected_total.is_none());
    }

    #[test]
    fn test_no_amounts_without_active_subscription() {
        let mut state = loaded_state();
        let snap = state.snapshot.as_mut().unwrap();
        snap.has_active_subscription = false;
        snap.subscription_level = SubscriptionLevel::Free;

        let summary = dashboard(&state, &ctx()).summary.unwrap();
        assert!(summary.current_total.is_none());
        assert!(summary.projected_total.is_none());
        assert_eq!(summary.period.label, "Cycle");
        assert!(summary.period.free_allocation_note);
    }

    #[test]
    fn test_cta_hero_conditions() {
        // Subscribed account: no CTA
        assert!(dashboard(&loaded_state(), &ctx()).cta_hero.is_none());

        // Unsubscribed, no trial, platform product present: CTA
        let mut state = loaded_state();
        {
            let snap = state.snapshot.as_mut().unwrap();
            snap.has_active_subscription = false;
            snap.subscription_level = SubscriptionLevel::Free;
        }
        let hero = dashboard(&state, &ctx()).cta_hero.unwrap();
        assert_eq!(hero.product_type, ProductType::PlatformAndSupport);

        // Trial suppresses the CTA
        let mut on_trial = state.clone();
        on_trial.snapshot.as_mut().unwrap().trial = Some(Trial {
            target: "paid".to_string(),
            expires_at: Utc.with_ymd_and_hms(2026, 9, 10, 0, 0, 0).unwrap(),
            kind: TrialKind::Standard,
        });
        assert!(dashboard(&on_trial, &ctx()).cta_hero.is_none());

        // Managed accounts never see the CTA
        let mut managed_ctx = ctx();
        managed_ctx.is_managed_account = true;
        assert!(dashboard(&state, &managed_ctx).cta_hero.is_none());

        // No platform product: no CTA
        state.snapshot.as_mut().unwrap().products.clear();
        assert!(dashboard(&state, &ctx()).cta_hero.is_none());
    }

    #[test]
    fn test_trial_banner() {
        let mut state = loaded_state();
        state.snapshot.as_mut().unwrap().trial = Some(Trial {
            target: "teams".to_string(),
            expires_at: Utc.with_ymd_and_hms(2026, 9, 10, 0, 0, 0).unwrap(),
            kind: TrialKind::Autosubscribe,
        });

        let banner = dashboard(&state, &ctx()).trial_banner.unwrap();
        assert_eq!(banner.plan_name, "Teams");
        assert_eq!(banner.expires_on, "September 10, 2026");
        assert!(banner.autosubscribe);
    }

    #[test]
    fn test_portal_link_label() {
        let dash = dashboard(&loaded_state(), &ctx());
        assert_eq!(
            dash.portal.unwrap().label,
            "Manage card details and invoices"
        );

        let mut state = loaded_state();
        state.snapshot.as_mut().unwrap().has_active_subscription = false;
        let dash = dashboard(&state, &ctx());
        assert_eq!(dash.portal.unwrap().label, "View past invoices");

        // Portal requires both a customer ID and a URL
        let mut state = loaded_state();
        state.snapshot.as_mut().unwrap().customer_id = None;
        assert!(dashboard(&state, &ctx()).portal.is_none());
    }

    #[test]
    fn test_onboarding_hides_summary_and_portal() {
        let mut onboarding = ctx();
        onboarding.is_onboarding = true;
        let dash = dashboard(&loaded_state(), &onboarding);
        assert!(dash.summary.is_none());
        assert!(dash.portal.is_none());
    }

    #[test]
    fn test_unsubscribe_requires_paid_level_and_platform_product() {
        assert!(dashboard(&loaded_state(), &ctx()).unsubscribe.is_some());

        let mut state = loaded_state();
        state.snapshot.as_mut().unwrap().subscription_level = SubscriptionLevel::Custom;
        assert!(dashboard(&state, &ctx()).unsubscribe.is_none());

        let mut state = loaded_state();
        state.snapshot.as_mut().unwrap().products.clear();
        assert!(dashboard(&state, &ctx()).unsubscribe.is_none());
    }

    #[test]
    fn test_error_banner_with_loaded_data() {
        let mut state = loaded_state();
        state.error = Some(BillingError::fetch("refresh failed"));

        let dash = dashboard(&state, &ctx());
        assert!(dash
            .error_banner
            .unwrap()
            .message
            .contains("refresh failed"));
    }

    #[test]
    fn test_display_only_products_filtered() {
        let mut state = loaded_state();
        state.snapshot.as_mut().unwrap().products.push(Product {
            product_type: ProductType::SessionReplay,
            name: "Session replay".to_string(),
            description: String::new(),
            inclusion_only: true,
            plans: vec![Plan {
                key: "free".to_string(),
                name: "Free".to_string(),
                included_if: Some(IncludedIf::NoActiveSubscription),
                unit_amount_cents: None,
            }],
        });

        let dash = dashboard(&state, &ctx());
        assert_eq!(dash.products.len(), 1);
        assert_eq!(
            dash.products[0].product_type,
            ProductType::PlatformAndSupport
        );
    }
}
