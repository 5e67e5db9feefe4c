//! Conversation state machine.
//!
//! A pure `(state, event) → (action, next state)` table. Handlers perform the
//! action; this module never does I/O and knows nothing about skill analysis.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ConversationState {
    #[default]
    Idle,
    AwaitingSearchQuery,
    AwaitingAnalyzeQuery,
}

/// Something the user did: a menu button or free text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Event {
    Start,
    Search,
    Analyze,
    About,
    Back,
    Text { text: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    ShowMainMenu,
    PromptSearchQuery,
    PromptAnalyzeQuery,
    ShowAbout,
    RunSearch(String),
    RunAnalysis(String),
    RejectEmptyQuery,
    Unrecognized,
}

pub fn transition(state: ConversationState, event: Event) -> (Action, ConversationState) {
    use self::ConversationState::*;

    match (state, event) {
        (_, Event::Start | Event::Back) => (Action::ShowMainMenu, Idle),
        (_, Event::Search) => (Action::PromptSearchQuery, AwaitingSearchQuery),
        (_, Event::Analyze) => (Action::PromptAnalyzeQuery, AwaitingAnalyzeQuery),
        (_, Event::About) => (Action::ShowAbout, Idle),
        (Idle, Event::Text { .. }) => (Action::Unrecognized, Idle),
        (awaiting, Event::Text { text }) => {
            let query = text.trim();
            if query.is_empty() {
                return (Action::RejectEmptyQuery, awaiting);
            }
            // stay put so the user can run another query of the same kind
            let action = match awaiting {
                AwaitingSearchQuery => Action::RunSearch(query.to_string()),
                _ => Action::RunAnalysis(query.to_string()),
            };
            (action, awaiting)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use super::ConversationState::*;

    fn text(t: &str) -> Event {
        Event::Text {
            text: t.to_string(),
        }
    }

    #[test]
    fn test_menu_events_from_any_state() {
        for state in [Idle, AwaitingSearchQuery, AwaitingAnalyzeQuery] {
            assert_eq!(transition(state, Event::Start), (Action::ShowMainMenu, Idle));
            assert_eq!(transition(state, Event::Back), (Action::ShowMainMenu, Idle));
            assert_eq!(
                transition(state, Event::Search),
                (Action::PromptSearchQuery, AwaitingSearchQuery)
            );
            assert_eq!(
                transition(state, Event::Analyze),
                (Action::PromptAnalyzeQuery, AwaitingAnalyzeQuery)
            );
            assert_eq!(transition(state, Event::About), (Action::ShowAbout, Idle));
        }
    }

    #[test]
    fn test_text_runs_query_for_awaiting_state() {
        assert_eq!(
            transition(AwaitingSearchQuery, text("  rust developer ")),
            (Action::RunSearch("rust developer".into()), AwaitingSearchQuery)
        );
        assert_eq!(
            transition(AwaitingAnalyzeQuery, text("data engineer")),
            (Action::RunAnalysis("data engineer".into()), AwaitingAnalyzeQuery)
        );
    }

    #[test]
    fn test_blank_text_is_rejected_without_leaving_state() {
        assert_eq!(
            transition(AwaitingAnalyzeQuery, text("   ")),
            (Action::RejectEmptyQuery, AwaitingAnalyzeQuery)
        );
    }

    #[test]
    fn test_text_while_idle_is_unrecognized() {
        assert_eq!(transition(Idle, text("hello")), (Action::Unrecognized, Idle));
    }

    #[test]
    fn test_event_deserialization() {
        let event: Event = serde_json::from_str(r#"{"type": "analyze"}"#).unwrap();
        assert_eq!(event, Event::Analyze);
        let event: Event = serde_json::from_str(r#"{"type": "text", "text": "go"}"#).unwrap();
        assert_eq!(event, text("go"));
        assert!(serde_json::from_str::<Event>(r#"{"type": "dance"}"#).is_err());
    }

    #[test]
    fn test_state_serializes_snake_case() {
        assert_eq!(
            serde_json::to_string(&AwaitingAnalyzeQuery).unwrap(),
            r#""awaiting_analyze_query""#
        );
    }
}
