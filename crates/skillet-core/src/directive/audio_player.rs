//! Audio player directives.

use serde::Serialize;

use super::new_token;

pub const AUDIO_PLAYER_PLAY: &str = "AudioPlayer.Play";
pub const AUDIO_PLAYER_STOP: &str = "AudioPlayer.Stop";

/// Stops audio playback on the device.
#[derive(Debug, Clone, Serialize)]
pub struct Stop {
    #[serde(rename = "type")]
    kind: String,
}

impl Stop {
    pub fn new() -> Self {
        Self {
            kind: AUDIO_PLAYER_STOP.to_string(),
        }
    }
}

impl Default for Stop {
    fn default() -> Self {
        Self::new()
    }
}

/// Starts audio playback of one stream.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Play {
    #[serde(rename = "type")]
    kind: String,
    play_behavior: String,
    audio_item: AudioItem,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AudioItem {
    pub stream: Stream,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stream {
    pub url: String,
    pub token: String,
    pub offset_in_milliseconds: i64,
}

impl Play {
    /// Plays `url` from the start, replacing whatever is queued, with a
    /// freshly generated stream token.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            kind: AUDIO_PLAYER_PLAY.to_string(),
            play_behavior: "REPLACE_ALL".to_string(),
            audio_item: AudioItem {
                stream: Stream {
                    url: url.into(),
                    token: new_token(),
                    offset_in_milliseconds: 0,
                },
            },
        }
    }

    pub fn play_behavior(mut self, behavior: impl Into<String>) -> Self {
        self.play_behavior = behavior.into();
        self
    }

    pub fn offset_in_milliseconds(mut self, offset: i64) -> Self {
        self.audio_item.stream.offset_in_milliseconds = offset;
        self
    }
}
