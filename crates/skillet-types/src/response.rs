//! Outbound response envelope types.
//!
//! The response is a fixed top-level shape: a protocol version tag, the
//! echoed session attributes, and a `response` block holding whatever
//! subset of speech, reprompt, card, directives, and session flags the
//! handler produced. Unset fields are omitted from the serialized output.

use crate::intent::IntentPayload;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Fixed protocol version emitted in every response.
pub const PROTOCOL_VERSION: &str = "2.0";

/// The complete outbound envelope for one turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ResponseEnvelope {
    pub version: String,
    pub session: SessionEcho,
    pub response: ResponseBody,
    /// Present only on intent turns; carries the dialog state back to the
    /// platform.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextEcho>,
}

/// Session attributes echoed back to the platform.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionEcho {
    pub attributes: Map<String, Value>,
}

/// Dialog continuation context for intent turns.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ContextEcho {
    pub intent: IntentPayload,
}

/// The accumulated `response` block.
///
/// `directives` preserves insertion order; the platform executes them in
/// the order they appear here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ResponseBody {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output_speech: Option<Speech>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reprompt: Option<Reprompt>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub card: Option<Value>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub directives: Vec<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub should_end_session: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expect_speech: Option<bool>,
}

/// Secondary speech played when the user does not answer in time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reprompt {
    pub output_speech: Speech,
}

/// Output speech, either plain text or SSML markup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Speech {
    PlainText { text: String },
    #[serde(rename = "SSML")]
    Ssml { ssml: String },
}

impl Speech {
    /// Formats raw speech text, picking SSML when the text is wrapped in a
    /// `<speak>` element and plain text otherwise.
    pub fn format(speech: impl Into<String>) -> Self {
        let speech = speech.into();
        if speech.trim_start().starts_with("<speak>") {
            Self::Ssml { ssml: speech }
        } else {
            Self::PlainText { text: speech }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_speech_format_detects_ssml() {
        assert_eq!(
            serde_json::to_value(Speech::format("hello")).unwrap(),
            json!({"type": "PlainText", "text": "hello"})
        );
        assert_eq!(
            serde_json::to_value(Speech::format("<speak>hi</speak>")).unwrap(),
            json!({"type": "SSML", "ssml": "<speak>hi</speak>"})
        );
    }

    #[test]
    fn test_empty_response_body_serializes_to_empty_object() {
        let body = ResponseBody::default();
        assert_eq!(serde_json::to_value(&body).unwrap(), json!({}));
    }

    #[test]
    fn test_response_envelope_omits_absent_context() {
        let envelope = ResponseEnvelope {
            version: PROTOCOL_VERSION.to_string(),
            session: SessionEcho::default(),
            response: ResponseBody::default(),
            context: None,
        };

        let value = serde_json::to_value(&envelope).unwrap();
        assert_eq!(value["version"], "2.0");
        assert!(value.get("context").is_none());
    }
}
