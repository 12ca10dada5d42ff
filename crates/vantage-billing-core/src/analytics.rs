//! Analytics event sink
//!
//! The store emits a single `billing shown` event the first time a
//! snapshot arrives. The sink is injected so services can forward events
//! to their analytics pipeline; the default sink drops them.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Event name emitted on first successful billing load
pub const BILLING_SHOWN: &str = "billing shown";

/// A captured analytics event
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyticsEvent {
    /// Event ID
    pub id: Uuid,
    /// Event name
    pub name: String,
    /// Event properties
    pub properties: serde_json::Value,
    /// When the event was captured
    pub captured_at: DateTime<Utc>,
}

impl AnalyticsEvent {
    /// Create a new event with no properties
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            properties: serde_json::Value::Null,
            captured_at: Utc::now(),
        }
    }

    /// Attach properties to the event
    pub fn with_properties(mut self, properties: serde_json::Value) -> Self {
        self.properties = properties;
        self
    }
}

/// Receiver for analytics events
pub trait AnalyticsSink: Send + Sync {
    /// Capture one event
    fn capture(&self, event: AnalyticsEvent);
}

/// Sink that discards all events
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopSink;

impl AnalyticsSink for NoopSink {
    fn capture(&self, _event: AnalyticsEvent) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_construction() {
        let event = AnalyticsEvent::new(BILLING_SHOWN)
            .with_properties(serde_json::json!({ "has_active_subscription": true }));
        assert_eq!(event.name, "billing shown");
        assert_eq!(
            event.properties["has_active_subscription"],
            serde_json::Value::Bool(true)
        );
    }
}
