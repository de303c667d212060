//! Typed device directives.
//!
//! Directives are opaque to the engine: anything serializable with a `type`
//! discriminator can be passed to
//! [`ResponseBuilder::command`](crate::ResponseBuilder::command).
//! This module provides ready-made payloads for the playback instructions a
//! voice skill commonly returns.

pub mod audio_player;
pub mod video_player;

use uuid::Uuid;

/// Generates a fresh stream token for a playback directive.
pub fn new_token() -> String {
    Uuid::new_v4().to_string()
}
