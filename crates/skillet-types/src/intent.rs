//! Intent-request payloads.
//!
//! An intent request carries the platform's natural-language understanding
//! result: the recognized query, one or more candidate intents ranked by
//! score, and a slot map per intent. Slot order inside an intent is the
//! platform's fill order and is preserved through decode and re-encode.

use crate::envelope::RequestHeader;
use serde::{Deserialize, Serialize};
use serde_json::Map;

/// The `request` block of an intent request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntentBody {
    #[serde(flatten)]
    pub header: RequestHeader,
    /// Slot-filling phase as reported by the platform
    /// (`STARTED`, `IN_PROGRESS`, `COMPLETED`).
    pub dialog_state: String,
    pub query: QueryPayload,
    /// Candidate intents, best first. Usually a single element.
    pub intents: Vec<IntentPayload>,
}

/// The user's literal utterance as recognized by the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct QueryPayload {
    #[serde(rename = "type")]
    pub kind: String,
    pub original: String,
}

/// One recognized intent with its slot map.
///
/// Slot payloads stay raw `Value`s: their shape is platform-defined and the
/// engine only ever checks key presence and echoes them back.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct IntentPayload {
    pub name: String,
    pub score: f64,
    pub confirmation_status: String,
    pub slots: Map<String, serde_json::Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_intent_body_round_trips_slot_order() {
        let raw = json!({
            "type": "IntentRequest",
            "requestId": "r-1",
            "timestamp": "1600000000",
            "dialogState": "IN_PROGRESS",
            "query": {"type": "TEXT", "original": "weather in beijing tomorrow"},
            "intents": [{
                "name": "weather",
                "score": 0.92,
                "confirmationStatus": "NONE",
                "slots": {
                    "city": {"name": "city", "value": "beijing", "confirmationStatus": "NONE"},
                    "date": {"name": "date", "value": "", "confirmationStatus": "NONE"}
                }
            }]
        });

        let body: IntentBody = serde_json::from_value(raw.clone()).unwrap();
        assert_eq!(body.header.kind, "IntentRequest");
        assert_eq!(body.intents[0].name, "weather");

        let keys: Vec<&String> = body.intents[0].slots.keys().collect();
        assert_eq!(keys, ["city", "date"]);

        let back = serde_json::to_value(&body).unwrap();
        assert_eq!(back["intents"][0]["slots"], raw["intents"][0]["slots"]);
        assert_eq!(back["intents"][0]["name"], "weather");
    }
}
