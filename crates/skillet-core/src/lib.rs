//! Request/response engine for conversational voice skills.
//!
//! One turn flows through four stages: the raw JSON envelope is decoded and
//! classified into a [`Request`] variant, the [`Skill`] registry routes it
//! to the application handler registered for its intent or event name, the
//! handler mutates a [`ResponseBuilder`] bound to the current request and
//! session, and the builder finalizes into the protocol-exact response
//! envelope.
//!
//! # Module Structure
//!
//! - `request`: envelope decode and request classification
//! - `dialog`: slot-filling dialog state and elicitation
//! - `session`: the opaque per-turn attribute store
//! - `skill`: handler registration and dispatch
//! - `response`: the response accumulator and finalizer
//! - `directive`: ready-made playback directive payloads
//! - `error`: the shared error type
//!
//! # Usage
//!
//! ```ignore
//! use skillet_core::{Skill, IntentRequest, ResponseBuilder};
//!
//! let mut skill = Skill::new();
//! skill.on_intent("weather", |request: &IntentRequest, response: &mut ResponseBuilder| {
//!     if request.is_dialog_completed() {
//!         response.tell("sunny and 25 degrees");
//!     } else {
//!         response.ask_slot("which city?", "city");
//!     }
//! });
//! let json = skill.handle_turn(raw_bytes)?;
//! ```
//!
//! Transport, logger configuration, and session persistence are the
//! caller's business; this crate emits `tracing` events and otherwise
//! touches nothing outside the turn.

pub mod dialog;
pub mod directive;
pub mod error;
pub mod request;
pub mod response;
pub mod session;
pub mod skill;

pub use dialog::{DialogPhase, DialogState};
pub use error::{Result, SkillError};
pub use request::{
    Common, EventRequest, IntentRequest, LaunchRequest, PlaybackEventRequest, Request,
    SessionEndedRequest,
};
pub use response::ResponseBuilder;
pub use session::Session;
pub use skill::{EventHandler, IntentHandler, LaunchHandler, SessionEndedHandler, Skill};
