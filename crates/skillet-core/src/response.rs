//! Response assembly.
//!
//! A [`ResponseBuilder`] is bound to one request/session pair and collects
//! whatever the handler produces: speech, a reprompt, a card, an ordered
//! list of directives, and the session flags. All setters overwrite on
//! repeat calls except [`ResponseBuilder::command`], which appends.
//! [`ResponseBuilder::finalize`] assembles the protocol-exact envelope;
//! its output is deterministic in the builder's final state, and mutation
//! after finalize does not affect output already returned.

use serde::Serialize;
use skillet_types::response::{
    ContextEcho, Reprompt, ResponseBody, ResponseEnvelope, SessionEcho, Speech, PROTOCOL_VERSION,
};

use crate::dialog::DialogState;
use crate::error::{Result, SkillError};
use crate::request::Request;
use crate::session::Session;

/// The mutable response accumulator for one turn.
#[derive(Debug)]
pub struct ResponseBuilder {
    session: Session,
    dialog: Option<DialogState>,
    body: ResponseBody,
}

impl ResponseBuilder {
    /// Binds a fresh builder to the current request. Intent turns get a
    /// working copy of the request's dialog state so elicitation can flow
    /// into the finalized context.
    pub fn new(request: &Request) -> Self {
        Self {
            session: Session::from_body(request.common().session()),
            dialog: request.as_intent().map(|intent| intent.dialog().clone()),
            body: ResponseBody::default(),
        }
    }

    /// Sets the primary output speech. Overwrites earlier speech.
    pub fn tell(&mut self, speech: impl Into<String>) -> &mut Self {
        self.body.output_speech = Some(Speech::format(speech));
        self
    }

    /// Sets the output speech and keeps the session open for a follow-up
    /// utterance. Equivalent to [`tell`](Self::tell) + [`hold_on`](Self::hold_on).
    pub fn ask(&mut self, speech: impl Into<String>) -> &mut Self {
        self.tell(speech).hold_on()
    }

    /// [`ask`](Self::ask), plus a request that the platform collect `slot`
    /// on the next turn. A silent no-op on non-intent turns.
    pub fn ask_slot(&mut self, speech: impl Into<String>, slot: &str) -> &mut Self {
        self.ask(speech);
        match self.dialog.as_mut() {
            Some(dialog) => dialog.elicit_slot(slot),
            None => tracing::debug!(slot, "ask_slot ignored on non-intent turn"),
        }
        self
    }

    /// Sets the speech played when the user does not answer in time.
    pub fn reprompt(&mut self, speech: impl Into<String>) -> &mut Self {
        self.body.reprompt = Some(Reprompt {
            output_speech: Speech::format(speech),
        });
        self
    }

    /// Sets an opaque card payload, passed through untouched.
    pub fn display_card(&mut self, card: impl Serialize) -> &mut Self {
        match serde_json::to_value(card) {
            Ok(value) => self.body.card = Some(value),
            Err(err) => tracing::warn!(%err, "dropped unserializable card"),
        }
        self
    }

    /// Appends a directive. Directives accumulate and are emitted in call
    /// order, which is the order the device executes them in.
    pub fn command(&mut self, directive: impl Serialize) -> &mut Self {
        match serde_json::to_value(directive) {
            Ok(value) => self.body.directives.push(value),
            Err(err) => tracing::warn!(%err, "dropped unserializable directive"),
        }
        self
    }

    /// Keeps the session open: the device microphone starts listening.
    pub fn hold_on(&mut self) -> &mut Self {
        self.body.should_end_session = Some(false);
        self
    }

    /// Asks the device to close the microphone until the user is addressed
    /// again.
    pub fn close_microphone(&mut self) -> &mut Self {
        self.body.expect_speech = Some(true);
        self
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Mutable access to the session attributes echoed back on finalize.
    pub fn session_mut(&mut self) -> &mut Session {
        &mut self.session
    }

    /// The working dialog state, present on intent turns.
    pub fn dialog(&self) -> Option<&DialogState> {
        self.dialog.as_ref()
    }

    /// Assembles and serializes the outbound envelope.
    ///
    /// Intent turns additionally get a `context.intent` block, and a
    /// pending slot elicitation is appended to the directive list here.
    pub fn finalize(&self) -> Result<String> {
        let mut response = self.body.clone();
        let mut context = None;

        if let Some(dialog) = &self.dialog {
            if let Some(directive) = dialog.elicit_directive() {
                let value = serde_json::to_value(&directive)
                    .map_err(|e| SkillError::Serialize(e.to_string()))?;
                response.directives.push(value);
            }
            context = Some(ContextEcho {
                intent: dialog.intent().cloned().unwrap_or_default(),
            });
        }

        let envelope = ResponseEnvelope {
            version: PROTOCOL_VERSION.to_string(),
            session: SessionEcho {
                attributes: self.session.attributes().clone(),
            },
            response,
            context,
        };

        serde_json::to_string(&envelope).map_err(|e| SkillError::Serialize(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn launch_request() -> Request {
        Request::decode(
            &serde_json::to_vec(&json!({
                "session": {"sessionId": "s-1", "attributes": {"visits": 4}},
                "request": {"type": "LaunchRequest"}
            }))
            .unwrap(),
        )
        .unwrap()
    }

    fn intent_request() -> Request {
        Request::decode(
            &serde_json::to_vec(&json!({
                "session": {"attributes": {}},
                "request": {
                    "type": "IntentRequest",
                    "dialogState": "IN_PROGRESS",
                    "intents": [{
                        "name": "weather",
                        "slots": {"city": {"name": "city", "value": ""}}
                    }]
                }
            }))
            .unwrap(),
        )
        .unwrap()
    }

    fn finalized(builder: &ResponseBuilder) -> Value {
        serde_json::from_str(&builder.finalize().unwrap()).unwrap()
    }

    #[test]
    fn test_tell_produces_speech_and_echoes_session() {
        let request = launch_request();
        let mut builder = ResponseBuilder::new(&request);
        builder.tell("hello");

        let out = finalized(&builder);
        assert_eq!(out["version"], "2.0");
        assert_eq!(
            out["response"]["outputSpeech"],
            json!({"type": "PlainText", "text": "hello"})
        );
        assert_eq!(out["session"]["attributes"]["visits"], 4);
        // Non-intent turn: no dialog context.
        assert!(out.get("context").is_none());
        assert!(out["response"].get("shouldEndSession").is_none());
    }

    #[test]
    fn test_ask_equals_tell_plus_hold_on() {
        let request = launch_request();

        let mut asked = ResponseBuilder::new(&request);
        asked.ask("and then?");

        let mut told = ResponseBuilder::new(&request);
        told.tell("and then?").hold_on();

        let asked = finalized(&asked);
        assert_eq!(asked, finalized(&told));
        assert_eq!(asked["response"]["shouldEndSession"], false);
        assert_eq!(asked["response"]["outputSpeech"]["text"], "and then?");
    }

    #[test]
    fn test_later_calls_overwrite_except_command() {
        let request = launch_request();
        let mut builder = ResponseBuilder::new(&request);
        builder
            .tell("first")
            .tell("second")
            .reprompt("still there?")
            .command(json!({"type": "AudioPlayer.Stop", "n": 1}))
            .command(json!({"type": "AudioPlayer.Stop", "n": 2}))
            .command(json!({"type": "AudioPlayer.Stop", "n": 3}));

        let out = finalized(&builder);
        assert_eq!(out["response"]["outputSpeech"]["text"], "second");
        assert_eq!(
            out["response"]["reprompt"]["outputSpeech"]["text"],
            "still there?"
        );
        let numbers: Vec<i64> = out["response"]["directives"]
            .as_array()
            .unwrap()
            .iter()
            .map(|d| d["n"].as_i64().unwrap())
            .collect();
        assert_eq!(numbers, [1, 2, 3]);
    }

    #[test]
    fn test_close_microphone_and_card() {
        let request = launch_request();
        let mut builder = ResponseBuilder::new(&request);
        builder
            .close_microphone()
            .display_card(json!({"type": "txt", "content": "bye"}));

        let out = finalized(&builder);
        assert_eq!(out["response"]["expectSpeech"], true);
        assert_eq!(out["response"]["card"]["content"], "bye");
    }

    #[test]
    fn test_untouched_intent_turn_round_trips_dialog_context() {
        let request = intent_request();
        let builder = ResponseBuilder::new(&request);

        let out = finalized(&builder);
        assert_eq!(out["context"]["intent"]["name"], "weather");
        assert_eq!(
            out["context"]["intent"]["slots"],
            json!({"city": {"name": "city", "value": ""}})
        );
        assert!(out["response"].get("directives").is_none());
    }

    #[test]
    fn test_ask_slot_appends_elicit_directive_on_intent_turn() {
        let request = intent_request();
        let mut builder = ResponseBuilder::new(&request);
        builder.ask_slot("what city?", "city");

        let out = finalized(&builder);
        assert_eq!(out["response"]["shouldEndSession"], false);
        assert_eq!(out["response"]["outputSpeech"]["text"], "what city?");

        let directives = out["response"]["directives"].as_array().unwrap();
        assert_eq!(directives.len(), 1);
        assert_eq!(directives[0]["type"], "Dialog.ElicitSlot");
        assert_eq!(directives[0]["slotToElicit"], "city");
        assert_eq!(directives[0]["updatedIntent"]["name"], "weather");
        assert_eq!(out["context"]["intent"]["name"], "weather");
    }

    #[test]
    fn test_ask_slot_is_noop_on_non_intent_turn() {
        let request = launch_request();
        let mut builder = ResponseBuilder::new(&request);
        builder.ask_slot("what city?", "city");

        let out = finalized(&builder);
        // Speech and session flag still apply; no dialog machinery appears.
        assert_eq!(out["response"]["shouldEndSession"], false);
        assert!(out["response"].get("directives").is_none());
        assert!(out.get("context").is_none());
    }

    #[test]
    fn test_session_mutations_reach_the_echo() {
        let request = launch_request();
        let mut builder = ResponseBuilder::new(&request);
        builder.session_mut().set_attribute("visits", 5);
        builder.tell("welcome back");

        let out = finalized(&builder);
        assert_eq!(out["session"]["attributes"]["visits"], 5);
    }

    #[test]
    fn test_finalize_is_deterministic() {
        let request = intent_request();
        let mut builder = ResponseBuilder::new(&request);
        builder.ask_slot("what city?", "city");

        assert_eq!(builder.finalize().unwrap(), builder.finalize().unwrap());
    }
}
