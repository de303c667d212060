//! Video player directives.

use serde::Serialize;

pub const VIDEO_PLAYER_STOP: &str = "VideoPlayer.Stop";

/// Stops video playback on the device.
#[derive(Debug, Clone, Serialize)]
pub struct Stop {
    #[serde(rename = "type")]
    kind: String,
}

impl Stop {
    pub fn new() -> Self {
        Self {
            kind: VIDEO_PLAYER_STOP.to_string(),
        }
    }
}

impl Default for Stop {
    fn default() -> Self {
        Self::new()
    }
}
