//! Wire-level types for the skillet voice-skill engine.
//!
//! This crate holds the serde representations of a single conversation turn:
//! the inbound request envelope the platform posts to a skill, and the
//! outbound response envelope the skill returns. It is pure data; request
//! classification, dispatch, and response assembly live in `skillet-core`.
//!
//! # Module Structure
//!
//! - `envelope`: the common inbound envelope (session, device/user context,
//!   request header)
//! - `intent`: intent-request payloads (query, intents, slots)
//! - `event`: event-request payloads (generic and playback events)
//! - `response`: the outbound response envelope and speech formatting
//!
//! # Usage
//!
//! ```ignore
//! use skillet_types::envelope::{Envelope, RequestHeader};
//! use skillet_types::intent::IntentBody;
//! use skillet_types::response::{ResponseEnvelope, Speech};
//! ```

pub mod envelope;
pub mod event;
pub mod intent;
pub mod response;

pub use envelope::{
    ApplicationInfo, ContextBody, DeviceInfo, Envelope, PlaybackState, RequestHeader, SessionBody,
    SessionEndedBody, SystemContext, UserInfo,
};
pub use event::{EventBody, PlaybackEventBody};
pub use intent::{IntentBody, IntentPayload, QueryPayload};
pub use response::{
    ContextEcho, Reprompt, ResponseBody, ResponseEnvelope, SessionEcho, Speech, PROTOCOL_VERSION,
};
