//! Property-based tests for the assistant message classifiers
//!
//! Verifies the discrimination contract: for any message, exactly one of
//! the five predicates returns true, and it is the one matching the
//! variant's wire tag.

use proptest::prelude::*;
use proptest::test_runner::TestCaseError;
use vantage_assistant_core::{
    is_assistant_message, is_failure_message, is_human_message, is_reasoning_message,
    is_visualization_message, AssistantMessage, FailureMessage, HumanMessage, ReasoningMessage,
    RootAssistantMessage, VisualizationMessage,
};

// ============================================================================
// Strategies
// ============================================================================

fn arb_message() -> impl Strategy<Value = RootAssistantMessage> {
    prop_oneof![
        "[ -~]{0,40}".prop_map(|content| RootAssistantMessage::Human(HumanMessage { content })),
        "[ -~]{0,40}"
            .prop_map(|content| RootAssistantMessage::Assistant(AssistantMessage { content })),
        (
            "[ -~]{0,40}",
            prop::option::of(prop::collection::vec("[a-z ]{1,20}", 0..3))
        )
            .prop_map(|(content, substeps)| {
                RootAssistantMessage::Reasoning(ReasoningMessage { content, substeps })
            }),
        prop::option::of("[ -~]{0,40}").prop_map(|plan| {
            RootAssistantMessage::Visualization(VisualizationMessage { plan, answer: None })
        }),
        prop::option::of("[ -~]{0,40}")
            .prop_map(|content| RootAssistantMessage::Failure(FailureMessage { content })),
    ]
}

fn predicate_results(message: Option<&RootAssistantMessage>) -> [bool; 5] {
    [
        is_human_message(message),
        is_assistant_message(message),
        is_reasoning_message(message),
        is_visualization_message(message),
        is_failure_message(message),
    ]
}

// ============================================================================
// Discrimination Properties
// ============================================================================

proptest! {
    /// Property: exactly one predicate matches any message, and it is the
    /// one for the variant's wire tag
    #[test]
    fn prop_exactly_one_predicate_matches(message in arb_message()) {
        let results = predicate_results(Some(&message));
        let matches = results.iter().filter(|&&hit| hit).count();
        prop_assert_eq!(matches, 1);

        let expected_index = match message.message_type() {
            "human" => 0,
            "ai" => 1,
            "ai/reasoning" => 2,
            "ai/viz" => 3,
            "ai/failure" => 4,
            other => return Err(TestCaseError::fail(format!("unknown tag {other}"))),
        };
        prop_assert!(results[expected_index]);
    }

    /// Property: predicates agree with the narrowing accessors
    #[test]
    fn prop_predicates_agree_with_accessors(message in arb_message()) {
        prop_assert_eq!(is_human_message(Some(&message)), message.as_human().is_some());
        prop_assert_eq!(is_assistant_message(Some(&message)), message.as_assistant().is_some());
        prop_assert_eq!(is_reasoning_message(Some(&message)), message.as_reasoning().is_some());
        prop_assert_eq!(
            is_visualization_message(Some(&message)),
            message.as_visualization().is_some()
        );
        prop_assert_eq!(is_failure_message(Some(&message)), message.as_failure().is_some());
    }

    /// Property: serde round trip preserves the variant and therefore the
    /// matching predicate
    #[test]
    fn prop_round_trip_preserves_discrimination(message in arb_message()) {
        let json = serde_json::to_value(&message).expect("serializable");
        prop_assert_eq!(json["type"].as_str(), Some(message.message_type()));

        let back: RootAssistantMessage = serde_json::from_value(json).expect("deserializable");
        prop_assert_eq!(predicate_results(Some(&back)), predicate_results(Some(&message)));
    }
}

#[test]
fn test_absence_matches_nothing() {
    assert_eq!(predicate_results(None), [false; 5]);
}
