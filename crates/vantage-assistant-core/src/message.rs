//! Assistant message union
//!
//! A closed set of chat message variants discriminated by the `type`
//! field. The classifier predicates take a nullable reference because
//! callers routinely hold an `Option` of the latest message; absence is
//! a non-match, never an error.

use serde::{Deserialize, Serialize};

use crate::query::AssistantQuery;

/// A human turn in the conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HumanMessage {
    /// Message text
    pub content: String,
}

/// A plain assistant answer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantMessage {
    /// Message text
    pub content: String,
}

/// Progress notice emitted while the assistant is thinking
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReasoningMessage {
    /// Headline of the current step
    pub content: String,
    /// Finer-grained substeps, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub substeps: Option<Vec<String>>,
}

/// A produced visualization with the query behind it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VisualizationMessage {
    /// The generation plan, if the assistant shared one
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    /// The query to visualize
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<AssistantQuery>,
}

/// Generation failure notice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FailureMessage {
    /// Failure description, if one is available
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
}

/// Any message in an assistant conversation, discriminated by `type`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum RootAssistantMessage {
    /// Human turn
    #[serde(rename = "human")]
    Human(HumanMessage),
    /// Plain assistant answer
    #[serde(rename = "ai")]
    Assistant(AssistantMessage),
    /// Reasoning progress notice
    #[serde(rename = "ai/reasoning")]
    Reasoning(ReasoningMessage),
    /// Visualization result
    #[serde(rename = "ai/viz")]
    Visualization(VisualizationMessage),
    /// Generation failure
    #[serde(rename = "ai/failure")]
    Failure(FailureMessage),
}

impl RootAssistantMessage {
    /// Get the wire tag of the variant
    pub fn message_type(&self) -> &'static str {
        match self {
            Self::Human(_) => "human",
            Self::Assistant(_) => "ai",
            Self::Reasoning(_) => "ai/reasoning",
            Self::Visualization(_) => "ai/viz",
            Self::Failure(_) => "ai/failure",
        }
    }

    /// Narrow to a human message
    pub fn as_human(&self) -> Option<&HumanMessage> {
        match self {
            Self::Human(msg) => Some(msg),
            _ => None,
        }
    }

    /// Narrow to a plain assistant message
    pub fn as_assistant(&self) -> Option<&AssistantMessage> {
        match self {
            Self::Assistant(msg) => Some(msg),
            _ => None,
        }
    }

    /// Narrow to a reasoning message
    pub fn as_reasoning(&self) -> Option<&ReasoningMessage> {
        match self {
            Self::Reasoning(msg) => Some(msg),
            _ => None,
        }
    }

    /// Narrow to a visualization message
    pub fn as_visualization(&self) -> Option<&VisualizationMessage> {
        match self {
            Self::Visualization(msg) => Some(msg),
            _ => None,
        }
    }

    /// Narrow to a failure message
    pub fn as_failure(&self) -> Option<&FailureMessage> {
        match self {
            Self::Failure(msg) => Some(msg),
            _ => None,
        }
    }
}

/// Check if the message is a human turn
pub fn is_human_message(message: Option<&RootAssistantMessage>) -> bool {
    matches!(message, Some(RootAssistantMessage::Human(_)))
}

/// Check if the message is a plain assistant answer
pub fn is_assistant_message(message: Option<&RootAssistantMessage>) -> bool {
    matches!(message, Some(RootAssistantMessage::Assistant(_)))
}

/// Check if the message is a reasoning progress notice
pub fn is_reasoning_message(message: Option<&RootAssistantMessage>) -> bool {
    matches!(message, Some(RootAssistantMessage::Reasoning(_)))
}

/// Check if the message is a visualization result
pub fn is_visualization_message(message: Option<&RootAssistantMessage>) -> bool {
    matches!(message, Some(RootAssistantMessage::Visualization(_)))
}

/// Check if the message is a generation failure
pub fn is_failure_message(message: Option<&RootAssistantMessage>) -> bool {
    matches!(message, Some(RootAssistantMessage::Failure(_)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_none_matches_no_predicate() {
        assert!(!is_human_message(None));
        assert!(!is_assistant_message(None));
        assert!(!is_reasoning_message(None));
        assert!(!is_visualization_message(None));
        assert!(!is_failure_message(None));
    }

    #[test]
    fn test_predicates_match_their_variant() {
        let msg = RootAssistantMessage::Reasoning(ReasoningMessage {
            content: "Picking events".to_string(),
            substeps: None,
        });
        assert!(is_reasoning_message(Some(&msg)));
        assert!(!is_assistant_message(Some(&msg)));
        assert_eq!(msg.as_reasoning().unwrap().content, "Picking events");
        assert!(msg.as_human().is_none());
    }

    #[test]
    fn test_wire_tags() {
        let msg = RootAssistantMessage::Failure(FailureMessage { content: None });
        let json = serde_json::to_value(&msg).unwrap();
        assert_eq!(json["type"], "ai/failure");

        let human: RootAssistantMessage =
            serde_json::from_value(serde_json::json!({ "type": "human", "content": "hi" }))
                .unwrap();
        assert_eq!(human.message_type(), "human");
        assert_eq!(human.as_human().unwrap().content, "hi");
    }

    #[test]
    fn test_unknown_tag_rejected() {
        let result: Result<RootAssistantMessage, _> =
            serde_json::from_value(serde_json::json!({ "type": "ai/tool", "content": "x" }));
        assert!(result.is_err());
    }
}
