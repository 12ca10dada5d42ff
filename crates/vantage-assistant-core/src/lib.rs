//! Vantage Assistant Core
//!
//! Types for the chat assistant surface:
//! - The assistant message union with its classifier predicates
//! - Assistant-flavored query shapes and their conversions into the
//!   general query shapes, plus the kind-dispatched runtime cast for
//!   untyped payloads
//!
//! Independent of the billing crates by design; the two surfaces share
//! nothing beyond the workspace.

pub mod cast;
pub mod error;
pub mod message;
pub mod query;

pub use cast::{cast_assistant_query, is_funnels_query, is_hogql_query, is_retention_query, is_trends_query};
pub use error::AssistantError;
pub use message::{
    is_assistant_message, is_failure_message, is_human_message, is_reasoning_message,
    is_visualization_message, AssistantMessage, FailureMessage, HumanMessage, ReasoningMessage,
    RootAssistantMessage, VisualizationMessage,
};
pub use query::{
    AssistantFunnelsQuery, AssistantHogQlQuery, AssistantQuery, AssistantRetentionQuery,
    AssistantTrendsQuery, FunnelsQuery, HogQlQuery, NodeKind, Query, RetentionQuery, TrendsQuery,
};
