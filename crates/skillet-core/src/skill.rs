//! Handler registration and dispatch.
//!
//! A [`Skill`] holds the handler tables an application registers at
//! startup: one handler per intent name, one per event key, a default
//! event handler, and the single launch and session-ended handlers.
//! Registration is append-only by convention and expected to finish before
//! requests arrive; after that, [`Skill::dispatch`] takes `&self` and is
//! safe to call from any number of threads concurrently.
//!
//! A missing handler is never an error: dispatch logs the outcome and
//! leaves the response untouched.

use std::collections::HashMap;

use crate::error::Result;
use crate::request::{IntentRequest, LaunchRequest, Request, SessionEndedRequest};
use crate::response::ResponseBuilder;

/// Handles one recognized intent.
pub trait IntentHandler: Send + Sync {
    fn handle(&self, request: &IntentRequest, response: &mut ResponseBuilder);
}

impl<F> IntentHandler for F
where
    F: Fn(&IntentRequest, &mut ResponseBuilder) + Send + Sync,
{
    fn handle(&self, request: &IntentRequest, response: &mut ResponseBuilder) {
        self(request, response);
    }
}

/// Handles an event turn. The handler receives the full classified
/// [`Request`], so a default handler still sees the specialized audio or
/// video playback variant rather than a generic event.
pub trait EventHandler: Send + Sync {
    fn handle(&self, request: &Request, response: &mut ResponseBuilder);
}

impl<F> EventHandler for F
where
    F: Fn(&Request, &mut ResponseBuilder) + Send + Sync,
{
    fn handle(&self, request: &Request, response: &mut ResponseBuilder) {
        self(request, response);
    }
}

/// Handles the turn that opens the skill.
pub trait LaunchHandler: Send + Sync {
    fn handle(&self, request: &LaunchRequest, response: &mut ResponseBuilder);
}

impl<F> LaunchHandler for F
where
    F: Fn(&LaunchRequest, &mut ResponseBuilder) + Send + Sync,
{
    fn handle(&self, request: &LaunchRequest, response: &mut ResponseBuilder) {
        self(request, response);
    }
}

/// Handles the turn that closes the skill. Runs for its side effects;
/// by platform contract its response content is discarded and never
/// reaches the user.
pub trait SessionEndedHandler: Send + Sync {
    fn handle(&self, request: &SessionEndedRequest, response: &mut ResponseBuilder);
}

impl<F> SessionEndedHandler for F
where
    F: Fn(&SessionEndedRequest, &mut ResponseBuilder) + Send + Sync,
{
    fn handle(&self, request: &SessionEndedRequest, response: &mut ResponseBuilder) {
        self(request, response);
    }
}

/// The handler registry and top-level dispatcher for one skill.
#[derive(Default)]
pub struct Skill {
    intent_handlers: HashMap<String, Box<dyn IntentHandler>>,
    event_handlers: HashMap<String, Box<dyn EventHandler>>,
    default_event_handler: Option<Box<dyn EventHandler>>,
    launch_handler: Option<Box<dyn LaunchHandler>>,
    session_ended_handler: Option<Box<dyn SessionEndedHandler>>,
}

impl Skill {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler for one intent name. An empty name is rejected
    /// silently.
    pub fn on_intent(&mut self, name: impl Into<String>, handler: impl IntentHandler + 'static) {
        let name = name.into();
        if !name.is_empty() {
            self.intent_handlers.insert(name, Box::new(handler));
        }
    }

    /// Registers a handler for one exact event key, e.g.
    /// `"AudioPlayer.PlaybackFinished"`. An empty key is rejected silently.
    pub fn on_event(&mut self, name: impl Into<String>, handler: impl EventHandler + 'static) {
        let name = name.into();
        if !name.is_empty() {
            self.event_handlers.insert(name, Box::new(handler));
        }
    }

    /// Registers the fallback invoked for any event with no handler of its
    /// own. Useful when a skill receives playback progress events it does
    /// not care to handle one by one.
    pub fn on_default_event(&mut self, handler: impl EventHandler + 'static) {
        self.default_event_handler = Some(Box::new(handler));
    }

    /// Registers the handler for the turn that opens the skill.
    pub fn on_launch(&mut self, handler: impl LaunchHandler + 'static) {
        self.launch_handler = Some(Box::new(handler));
    }

    /// Registers the handler for the turn that closes the skill, e.g. for
    /// cleanup work.
    pub fn on_session_ended(&mut self, handler: impl SessionEndedHandler + 'static) {
        self.session_ended_handler = Some(Box::new(handler));
    }

    /// Runs one full turn: decode, dispatch, finalize.
    ///
    /// A malformed envelope short-circuits before dispatch and surfaces as
    /// [`SkillError::Decode`](crate::SkillError::Decode).
    pub fn handle_turn(&self, raw: &[u8]) -> Result<String> {
        let request = Request::decode(raw)?;
        let mut response = ResponseBuilder::new(&request);
        self.dispatch(&request, &mut response);
        response.finalize()
    }

    /// Routes one classified request to at most one registered handler.
    pub fn dispatch(&self, request: &Request, response: &mut ResponseBuilder) {
        match request {
            Request::Intent(intent) => self.dispatch_intent(intent, response),
            Request::Launch(launch) => self.dispatch_launch(launch, response),
            Request::SessionEnded(ended) => self.dispatch_session_ended(ended, response),
            _ => self.dispatch_event(request, response),
        }
    }

    fn dispatch_intent(&self, request: &IntentRequest, response: &mut ResponseBuilder) {
        let common = request.common();
        let handler = request
            .intent_name()
            .and_then(|name| self.intent_handlers.get(name));
        tracing::info!(
            user_id = common.user_id(),
            device_id = common.original_device_id(),
            intent = request.intent_name().unwrap_or(""),
            has_handler = handler.is_some(),
            "intent request"
        );

        if let Some(handler) = handler {
            handler.handle(request, response);
        }
    }

    fn dispatch_launch(&self, request: &LaunchRequest, response: &mut ResponseBuilder) {
        let common = request.common();
        tracing::info!(
            user_id = common.user_id(),
            device_id = common.original_device_id(),
            "launch request"
        );

        if let Some(handler) = &self.launch_handler {
            handler.handle(request, response);
        }
    }

    fn dispatch_session_ended(&self, request: &SessionEndedRequest, response: &mut ResponseBuilder) {
        let common = request.common();
        tracing::info!(
            user_id = common.user_id(),
            device_id = common.original_device_id(),
            reason = request.reason(),
            "session ended request"
        );

        if let Some(handler) = &self.session_ended_handler {
            handler.handle(request, response);
        }
    }

    fn dispatch_event(&self, request: &Request, response: &mut ResponseBuilder) {
        let Some(key) = request.event_key() else {
            return;
        };
        let handler = self.event_handlers.get(key);
        tracing::info!(
            event = key,
            has_handler = handler.is_some(),
            "event request"
        );

        if let Some(handler) = handler {
            handler.handle(request, response);
        } else if let Some(fallback) = &self.default_event_handler {
            fallback.handle(request, response);
        }
    }
}
