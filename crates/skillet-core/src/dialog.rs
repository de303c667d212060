//! Slot-filling dialog state.
//!
//! The tracker is a read/forward model over the platform's dialog payload:
//! it exposes the phase the platform reported and lets a handler request
//! that one more slot be collected on the next turn. It never computes the
//! next phase itself, and the phase never regresses within one turn.

use serde::Serialize;
use skillet_types::intent::{IntentBody, IntentPayload};

/// Lifecycle stage of slot filling, as reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DialogPhase {
    Started,
    InProgress,
    Completed,
}

impl DialogPhase {
    /// Parses the platform's phase string; `None` for anything unknown.
    pub fn parse(phase: &str) -> Option<Self> {
        match phase {
            "STARTED" => Some(Self::Started),
            "IN_PROGRESS" => Some(Self::InProgress),
            "COMPLETED" => Some(Self::Completed),
            _ => None,
        }
    }
}

/// Dialog state owned by one intent request.
#[derive(Debug, Clone)]
pub struct DialogState {
    phase: Option<DialogPhase>,
    query: String,
    intent: Option<IntentPayload>,
    slot_to_elicit: Option<String>,
}

impl DialogState {
    pub(crate) fn from_body(body: &IntentBody) -> Self {
        Self {
            phase: DialogPhase::parse(&body.dialog_state),
            query: body.query.original.clone(),
            intent: body.intents.first().cloned(),
            slot_to_elicit: None,
        }
    }

    /// The phase the platform reported, if it sent a recognizable one.
    pub fn phase(&self) -> Option<DialogPhase> {
        self.phase
    }

    /// The resolved intent name. `None` when the platform recognized no
    /// intent for this turn.
    pub fn intent_name(&self) -> Option<&str> {
        self.intent
            .as_ref()
            .filter(|intent| !intent.name.is_empty())
            .map(|intent| intent.name.as_str())
    }

    /// True iff slot filling reached the terminal `COMPLETED` phase.
    pub fn is_completed(&self) -> bool {
        self.phase == Some(DialogPhase::Completed)
    }

    /// The user's literal utterance; empty when absent.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The best-ranked intent payload, possibly updated by elicitation.
    pub fn intent(&self) -> Option<&IntentPayload> {
        self.intent.as_ref()
    }

    /// Records that the next platform turn should prompt the user to fill
    /// `slot`. A slot name the intent schema does not know is silently
    /// ignored.
    pub fn elicit_slot(&mut self, slot: &str) {
        let known = self
            .intent
            .as_ref()
            .is_some_and(|intent| intent.slots.contains_key(slot));
        if known {
            self.slot_to_elicit = Some(slot.to_string());
        } else {
            tracing::debug!(slot, "elicit_slot ignored: slot not in intent schema");
        }
    }

    /// The slot pending elicitation, if a handler requested one.
    pub fn slot_to_elicit(&self) -> Option<&str> {
        self.slot_to_elicit.as_deref()
    }

    /// The dialog-continuation directive to append at finalize time, if
    /// elicitation is pending.
    pub(crate) fn elicit_directive(&self) -> Option<ElicitSlotDirective> {
        let slot = self.slot_to_elicit.as_ref()?;
        Some(ElicitSlotDirective::new(
            slot.clone(),
            self.intent.clone().unwrap_or_default(),
        ))
    }
}

/// Tells the platform to re-prompt the user for one slot.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ElicitSlotDirective {
    #[serde(rename = "type")]
    kind: String,
    slot_to_elicit: String,
    updated_intent: IntentPayload,
}

impl ElicitSlotDirective {
    const TYPE: &'static str = "Dialog.ElicitSlot";

    fn new(slot_to_elicit: String, updated_intent: IntentPayload) -> Self {
        Self {
            kind: Self::TYPE.to_string(),
            slot_to_elicit,
            updated_intent,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use skillet_types::intent::IntentBody;

    fn body(dialog_state: &str) -> IntentBody {
        serde_json::from_value(json!({
            "type": "IntentRequest",
            "dialogState": dialog_state,
            "query": {"type": "TEXT", "original": "weather tomorrow"},
            "intents": [{
                "name": "weather",
                "slots": {
                    "city": {"name": "city", "value": ""},
                    "date": {"name": "date", "value": "tomorrow"}
                }
            }]
        }))
        .unwrap()
    }

    #[test]
    fn test_phase_and_intent_name_follow_platform_payload() {
        let state = DialogState::from_body(&body("IN_PROGRESS"));
        assert_eq!(state.phase(), Some(DialogPhase::InProgress));
        assert!(!state.is_completed());
        assert_eq!(state.intent_name(), Some("weather"));
        assert_eq!(state.query(), "weather tomorrow");

        let done = DialogState::from_body(&body("COMPLETED"));
        assert!(done.is_completed());

        let odd = DialogState::from_body(&body("SOMETHING_ELSE"));
        assert_eq!(odd.phase(), None);
        assert!(!odd.is_completed());
    }

    #[test]
    fn test_no_intent_means_no_name_and_no_elicitation() {
        let mut state = DialogState::from_body(&IntentBody::default());
        assert_eq!(state.intent_name(), None);
        assert_eq!(state.query(), "");

        state.elicit_slot("city");
        assert_eq!(state.slot_to_elicit(), None);
        assert!(state.elicit_directive().is_none());
    }

    #[test]
    fn test_elicit_slot_accepts_known_and_ignores_unknown() {
        let mut state = DialogState::from_body(&body("IN_PROGRESS"));

        state.elicit_slot("country");
        assert_eq!(state.slot_to_elicit(), None);

        state.elicit_slot("city");
        assert_eq!(state.slot_to_elicit(), Some("city"));

        let directive = state.elicit_directive().unwrap();
        let value = serde_json::to_value(&directive).unwrap();
        assert_eq!(value["type"], "Dialog.ElicitSlot");
        assert_eq!(value["slotToElicit"], "city");
        assert_eq!(value["updatedIntent"]["name"], "weather");
    }
}
