//! Assistant-to-general query casts
//!
//! The `From` impls are the compatibility contract between the assistant
//! and general query hierarchies: every assistant field must have a
//! general counterpart, so a structural divergence between the two
//! surfaces as a compile error here rather than a runtime defect in the
//! query engine. Fields the assistant cannot set are filled with `None`.
//!
//! `cast_assistant_query` is the runtime entry point for untyped
//! payloads: it routes on the `kind` discriminator through the classifier
//! predicates, in the fixed order trends, funnels, retention, HogQL.

use serde_json::Value;

use crate::error::AssistantError;
use crate::query::{
    AssistantFunnelsQuery, AssistantHogQlQuery, AssistantQuery, AssistantRetentionQuery,
    AssistantTrendsQuery, FunnelsQuery, HogQlQuery, NodeKind, Query, RetentionQuery, TrendsQuery,
};

impl From<AssistantTrendsQuery> for TrendsQuery {
    fn from(query: AssistantTrendsQuery) -> Self {
        Self {
            series: query.series,
            interval: query.interval,
            date_range: query.date_range,
            properties: query.properties,
            trends_filter: query.trends_filter,
            breakdown_filter: query.breakdown_filter,
            compare_filter: None,
            sampling_factor: None,
        }
    }
}

impl From<AssistantFunnelsQuery> for FunnelsQuery {
    fn from(query: AssistantFunnelsQuery) -> Self {
        Self {
            series: query.series,
            date_range: query.date_range,
            properties: query.properties,
            funnels_filter: query.funnels_filter,
            interval: None,
            sampling_factor: None,
        }
    }
}

impl From<AssistantRetentionQuery> for RetentionQuery {
    fn from(query: AssistantRetentionQuery) -> Self {
        Self {
            retention_filter: query.retention_filter,
            date_range: query.date_range,
            properties: query.properties,
            sampling_factor: None,
        }
    }
}

impl From<AssistantHogQlQuery> for HogQlQuery {
    fn from(query: AssistantHogQlQuery) -> Self {
        Self {
            query: query.query,
            filters: None,
            values: None,
        }
    }
}

impl From<AssistantQuery> for Query {
    fn from(query: AssistantQuery) -> Self {
        match query {
            AssistantQuery::Trends(q) => Self::Trends(q.into()),
            AssistantQuery::Funnels(q) => Self::Funnels(q.into()),
            AssistantQuery::Retention(q) => Self::Retention(q.into()),
            AssistantQuery::HogQl(q) => Self::HogQl(q.into()),
        }
    }
}

fn kind_is(value: &Value, kind: NodeKind) -> bool {
    value.get("kind").and_then(Value::as_str) == Some(kind.as_str())
}

/// Check if the payload is a trends query
pub fn is_trends_query(value: &Value) -> bool {
    kind_is(value, NodeKind::TrendsQuery)
}

/// Check if the payload is a funnels query
pub fn is_funnels_query(value: &Value) -> bool {
    kind_is(value, NodeKind::FunnelsQuery)
}

/// Check if the payload is a retention query
pub fn is_retention_query(value: &Value) -> bool {
    kind_is(value, NodeKind::RetentionQuery)
}

/// Check if the payload is a HogQL query
pub fn is_hogql_query(value: &Value) -> bool {
    kind_is(value, NodeKind::HogQlQuery)
}

/// Cast an untyped assistant query payload to a general query
///
/// Routing is by the `kind` discriminator, checked in fixed order. The
/// content is carried over unchanged; fields the assistant cannot set
/// come out as `None`. An unrecognized kind is reported verbatim in the
/// error.
pub fn cast_assistant_query(value: &Value) -> Result<Query, AssistantError> {
    if is_trends_query(value) {
        let query: AssistantTrendsQuery = serde_json::from_value(value.clone())?;
        Ok(Query::Trends(query.into()))
    } else if is_funnels_query(value) {
        let query: AssistantFunnelsQuery = serde_json::from_value(value.clone())?;
        Ok(Query::Funnels(query.into()))
    } else if is_retention_query(value) {
        let query: AssistantRetentionQuery = serde_json::from_value(value.clone())?;
        Ok(Query::Retention(query.into()))
    } else if is_hogql_query(value) {
        let query: AssistantHogQlQuery = serde_json::from_value(value.clone())?;
        Ok(Query::HogQl(query.into()))
    } else {
        let kind = match value.get("kind") {
            Some(Value::String(kind)) => kind.clone(),
            Some(other) => other.to_string(),
            None => "(missing)".to_string(),
        };
        Err(AssistantError::UnsupportedQueryKind(kind))
    }
}
