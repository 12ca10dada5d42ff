//! Query shapes
//!
//! Two parallel hierarchies discriminated by a `kind` field:
//! - General shapes (`TrendsQuery`, ...) as produced by the query engine
//! - Assistant-flavored shapes (`AssistantTrendsQuery`, ...), structural
//!   subsets the assistant is allowed to emit
//!
//! The `From` impls in `cast` are the compatibility contract between the
//! two: a field added to an assistant shape without a general counterpart
//! fails to compile there instead of failing at runtime elsewhere.

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Query kind discriminator (wire values are PascalCase type names)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum NodeKind {
    /// Trends query
    TrendsQuery,
    /// Funnels query
    FunnelsQuery,
    /// Retention query
    RetentionQuery,
    /// HogQL query
    #[serde(rename = "HogQLQuery")]
    HogQlQuery,
}

impl NodeKind {
    /// Get the wire name of the kind
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TrendsQuery => "TrendsQuery",
            Self::FunnelsQuery => "FunnelsQuery",
            Self::RetentionQuery => "RetentionQuery",
            Self::HogQlQuery => "HogQLQuery",
        }
    }
}

impl std::fmt::Display for NodeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relative or absolute date range
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DateRange {
    /// Range start (e.g. `-7d` or an ISO date)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<String>,
    /// Range end
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<String>,
}

/// Time bucketing interval
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Interval {
    /// Hourly buckets
    Hour,
    /// Daily buckets
    Day,
    /// Weekly buckets
    Week,
    /// Monthly buckets
    Month,
}

/// One event series within a trends or funnels query
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsNode {
    /// Event name (`None` means all events)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event: Option<String>,
    /// Display name override
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custom_name: Option<String>,
    /// Aggregation (e.g. `total`, `dau`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub math: Option<String>,
    /// Property filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

// ============================================================================
// General shapes
// ============================================================================

/// Trends query as executed by the query engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendsQuery {
    /// Event series to plot
    pub series: Vec<EventsNode>,
    /// Bucketing interval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    /// Date range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Query-level property filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    /// Display options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends_filter: Option<Value>,
    /// Breakdown configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown_filter: Option<Value>,
    /// Period comparison, not exposed to the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_filter: Option<Value>,
    /// Sampling factor, not exposed to the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_factor: Option<f64>,
}

/// Funnels query as executed by the query engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelsQuery {
    /// Funnel steps in order
    pub series: Vec<EventsNode>,
    /// Date range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Query-level property filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    /// Funnel display and window options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funnels_filter: Option<Value>,
    /// Bucketing interval for trends-style funnels, not exposed to the
    /// assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    /// Sampling factor, not exposed to the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_factor: Option<f64>,
}

/// Retention query as executed by the query engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionQuery {
    /// Retention configuration (target/returning entities, period)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_filter: Option<Value>,
    /// Date range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Query-level property filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    /// Sampling factor, not exposed to the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sampling_factor: Option<f64>,
}

/// HogQL query as executed by the query engine
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HogQlQuery {
    /// The query text
    pub query: String,
    /// Dashboard filters applied to the query, not exposed to the
    /// assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filters: Option<Value>,
    /// Placeholder values, not exposed to the assistant
    #[serde(skip_serializing_if = "Option::is_none")]
    pub values: Option<Value>,
}

// ============================================================================
// Assistant-flavored shapes
// ============================================================================

/// Trends query as the assistant emits it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantTrendsQuery {
    /// Event series to plot
    pub series: Vec<EventsNode>,
    /// Bucketing interval
    #[serde(skip_serializing_if = "Option::is_none")]
    pub interval: Option<Interval>,
    /// Date range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Query-level property filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    /// Display options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub trends_filter: Option<Value>,
    /// Breakdown configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breakdown_filter: Option<Value>,
}

/// Funnels query as the assistant emits it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantFunnelsQuery {
    /// Funnel steps in order
    pub series: Vec<EventsNode>,
    /// Date range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Query-level property filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
    /// Funnel display and window options
    #[serde(skip_serializing_if = "Option::is_none")]
    pub funnels_filter: Option<Value>,
}

/// Retention query as the assistant emits it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantRetentionQuery {
    /// Retention configuration
    #[serde(skip_serializing_if = "Option::is_none")]
    pub retention_filter: Option<Value>,
    /// Date range
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_range: Option<DateRange>,
    /// Query-level property filters
    #[serde(skip_serializing_if = "Option::is_none")]
    pub properties: Option<Value>,
}

/// HogQL query as the assistant emits it
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AssistantHogQlQuery {
    /// The query text
    pub query: String,
}

// ============================================================================
// Tagged unions
// ============================================================================

/// Any general query, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum Query {
    /// Trends query
    #[serde(rename = "TrendsQuery")]
    Trends(TrendsQuery),
    /// Funnels query
    #[serde(rename = "FunnelsQuery")]
    Funnels(FunnelsQuery),
    /// Retention query
    #[serde(rename = "RetentionQuery")]
    Retention(RetentionQuery),
    /// HogQL query
    #[serde(rename = "HogQLQuery")]
    HogQl(HogQlQuery),
}

impl Query {
    /// Get the kind discriminator
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Trends(_) => NodeKind::TrendsQuery,
            Self::Funnels(_) => NodeKind::FunnelsQuery,
            Self::Retention(_) => NodeKind::RetentionQuery,
            Self::HogQl(_) => NodeKind::HogQlQuery,
        }
    }
}

/// Any assistant-flavored query, tagged by `kind`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum AssistantQuery {
    /// Trends query
    #[serde(rename = "TrendsQuery")]
    Trends(AssistantTrendsQuery),
    /// Funnels query
    #[serde(rename = "FunnelsQuery")]
    Funnels(AssistantFunnelsQuery),
    /// Retention query
    #[serde(rename = "RetentionQuery")]
    Retention(AssistantRetentionQuery),
    /// HogQL query
    #[serde(rename = "HogQLQuery")]
    HogQl(AssistantHogQlQuery),
}

impl AssistantQuery {
    /// Get the kind discriminator
    pub fn kind(&self) -> NodeKind {
        match self {
            Self::Trends(_) => NodeKind::TrendsQuery,
            Self::Funnels(_) => NodeKind::FunnelsQuery,
            Self::Retention(_) => NodeKind::RetentionQuery,
            Self::HogQl(_) => NodeKind::HogQlQuery,
        }
    }
}
