//! Event-request payloads.
//!
//! Events are non-intent notifications whose `type` is a namespaced name
//! such as `AudioPlayer.PlaybackFinished`. Playback events from the audio
//! and video players share one body shape and add a stream token and
//! playback offset on top of the generic event fields.

use crate::envelope::RequestHeader;
use serde::{Deserialize, Serialize};

/// The `request` block of a generic event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EventBody {
    #[serde(flatten)]
    pub header: RequestHeader,
    pub name: String,
    pub url: String,
}

/// The `request` block of an audio- or video-player playback event.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackEventBody {
    #[serde(flatten)]
    pub event: EventBody,
    pub token: String,
    pub offset_in_milliseconds: i64,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_playback_event_decodes_flattened_header() {
        let raw = json!({
            "type": "AudioPlayer.PlaybackFinished",
            "requestId": "r-9",
            "timestamp": "1600000000",
            "token": "stream-1",
            "offsetInMilliseconds": 30000
        });

        let body: PlaybackEventBody = serde_json::from_value(raw).unwrap();
        assert_eq!(body.event.header.kind, "AudioPlayer.PlaybackFinished");
        assert_eq!(body.token, "stream-1");
        assert_eq!(body.offset_in_milliseconds, 30000);
    }
}
