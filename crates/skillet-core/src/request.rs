//! Request classification.
//!
//! One inbound JSON document per turn is decoded in two passes: a minimal
//! pass that reads the `request.type` discriminator together with the
//! session and device context, then a full variant-specific pass selected
//! by the discriminator. A malformed payload for the selected variant
//! aborts the turn with [`SkillError::Decode`]; no partial request is ever
//! produced. Decoding is pure.

use chrono::Utc;
use serde::de::DeserializeOwned;
use skillet_types::envelope::{
    ContextBody, Envelope, PlaybackState, RequestHeader, SessionBody, SessionEndedBody,
};
use skillet_types::event::{EventBody, PlaybackEventBody};
use skillet_types::intent::IntentBody;

use crate::dialog::DialogState;
use crate::error::{Result, SkillError};

pub const INTENT_REQUEST: &str = "IntentRequest";
pub const LAUNCH_REQUEST: &str = "LaunchRequest";
pub const SESSION_ENDED_REQUEST: &str = "SessionEndedRequest";

pub const AUDIO_PLAYER_PLAYBACK_STARTED: &str = "AudioPlayer.PlaybackStarted";
pub const AUDIO_PLAYER_PLAYBACK_STOPPED: &str = "AudioPlayer.PlaybackStopped";
pub const AUDIO_PLAYER_PLAYBACK_FINISHED: &str = "AudioPlayer.PlaybackFinished";
pub const AUDIO_PLAYER_PLAYBACK_NEARLY_FINISHED: &str = "AudioPlayer.PlaybackNearlyFinished";
pub const AUDIO_PLAYER_PROGRESS_REPORT_INTERVAL_ELAPSED: &str =
    "AudioPlayer.ProgressReportIntervalElapsed";

pub const VIDEO_PLAYER_PLAYBACK_STARTED: &str = "VideoPlayer.PlaybackStarted";
pub const VIDEO_PLAYER_PLAYBACK_STOPPED: &str = "VideoPlayer.PlaybackStopped";
pub const VIDEO_PLAYER_PLAYBACK_FINISHED: &str = "VideoPlayer.PlaybackFinished";
pub const VIDEO_PLAYER_PLAYBACK_NEARLY_FINISHED: &str = "VideoPlayer.PlaybackNearlyFinished";
pub const VIDEO_PLAYER_PLAYBACK_SCHEDULED_STOP_REACHED: &str =
    "VideoPlayer.PlaybackScheduledStopReached";
pub const VIDEO_PLAYER_PROGRESS_REPORT_INTERVAL_ELAPSED: &str =
    "VideoPlayer.ProgressReportIntervalElapsed";

const AUDIO_EVENT_PREFIX: &str = "AudioPlayer";
const VIDEO_EVENT_PREFIX: &str = "VideoPlayer";

/// Accepted age of a request timestamp, in seconds.
const TIMESTAMP_WINDOW_SECS: i64 = 180;

/// The common header every request variant embeds: discriminator, request
/// id and timestamp, session block, and device/user context. Read-only for
/// the lifetime of the turn.
#[derive(Debug, Clone)]
pub struct Common {
    header: RequestHeader,
    session: SessionBody,
    context: ContextBody,
}

impl Common {
    /// The raw `request.type` discriminator.
    pub fn kind(&self) -> &str {
        &self.header.kind
    }

    pub fn request_id(&self) -> &str {
        &self.header.request_id
    }

    pub fn session(&self) -> &SessionBody {
        &self.session
    }

    pub fn user_id(&self) -> &str {
        &self.context.system.user.user_id
    }

    pub fn access_token(&self) -> &str {
        &self.context.system.user.access_token
    }

    pub fn api_access_token(&self) -> &str {
        &self.context.system.api_access_token
    }

    /// The user's city, when the platform shares profile location data.
    pub fn city(&self) -> &str {
        &self.context.system.user.user_info.location.city
    }

    pub fn device_id(&self) -> &str {
        &self.context.system.device.device_id
    }

    /// The hardware serial the device was provisioned with.
    pub fn original_device_id(&self) -> &str {
        &self.context.system.device.original_device_id
    }

    pub fn user_device_id(&self) -> &str {
        &self.context.system.device.user_device_id
    }

    pub fn device_ip_address(&self) -> &str {
        &self.context.system.device.device_ip_address
    }

    pub fn application_id(&self) -> &str {
        &self.context.system.application.application_id
    }

    /// Checks that the envelope was issued to the given skill.
    pub fn verify_application_id(&self, application_id: &str) -> bool {
        self.application_id() == application_id
    }

    /// The request timestamp as Unix seconds, if it parses.
    pub fn timestamp(&self) -> Option<i64> {
        self.header.timestamp.parse().ok()
    }

    /// Checks that the request is fresh: issued within the last 180 seconds.
    /// An absent, unparseable, or absurd timestamp counts as stale.
    pub fn verify_timestamp(&self) -> bool {
        self.timestamp()
            .and_then(|ts| ts.checked_add(TIMESTAMP_WINDOW_SECS))
            .is_some_and(|deadline| deadline > Utc::now().timestamp())
    }

    fn supports_interface(&self, interface: &str) -> bool {
        self.context
            .system
            .device
            .supported_interfaces
            .contains_key(interface)
    }

    pub fn supports_display(&self) -> bool {
        self.supports_interface("Display")
    }

    pub fn supports_audio(&self) -> bool {
        self.supports_interface("AudioPlayer")
    }

    pub fn supports_video(&self) -> bool {
        self.supports_interface("VideoPlayer")
    }

    /// Playback position the device reports for its audio player.
    pub fn audio_player_state(&self) -> &PlaybackState {
        &self.context.audio_player
    }

    /// Playback position the device reports for its video player.
    pub fn video_player_state(&self) -> &PlaybackState {
        &self.context.video_player
    }
}

/// An intent request together with its dialog state.
#[derive(Debug, Clone)]
pub struct IntentRequest {
    common: Common,
    body: IntentBody,
    dialog: DialogState,
}

impl IntentRequest {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn body(&self) -> &IntentBody {
        &self.body
    }

    pub fn dialog(&self) -> &DialogState {
        &self.dialog
    }

    /// The resolved intent name, or `None` when the platform recognized no
    /// intent.
    pub fn intent_name(&self) -> Option<&str> {
        self.dialog.intent_name()
    }

    /// True iff slot filling reached the terminal `COMPLETED` phase.
    pub fn is_dialog_completed(&self) -> bool {
        self.dialog.is_completed()
    }

    /// The user's literal utterance; empty when absent.
    pub fn query(&self) -> &str {
        self.dialog.query()
    }
}

#[derive(Debug, Clone)]
pub struct LaunchRequest {
    common: Common,
}

impl LaunchRequest {
    pub fn common(&self) -> &Common {
        &self.common
    }
}

#[derive(Debug, Clone)]
pub struct SessionEndedRequest {
    common: Common,
    body: SessionEndedBody,
}

impl SessionEndedRequest {
    pub fn common(&self) -> &Common {
        &self.common
    }

    /// Why the platform closed the session, as reported by the platform.
    pub fn reason(&self) -> &str {
        &self.body.reason
    }
}

/// A generic, non-playback event notification.
#[derive(Debug, Clone)]
pub struct EventRequest {
    common: Common,
    body: EventBody,
}

impl EventRequest {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn name(&self) -> &str {
        &self.body.name
    }

    pub fn url(&self) -> &str {
        &self.body.url
    }
}

/// A playback event from the audio or video player. Which player it came
/// from is carried by the [`Request`] variant wrapping it.
#[derive(Debug, Clone)]
pub struct PlaybackEventRequest {
    common: Common,
    body: PlaybackEventBody,
}

impl PlaybackEventRequest {
    pub fn common(&self) -> &Common {
        &self.common
    }

    pub fn name(&self) -> &str {
        &self.body.event.name
    }

    pub fn url(&self) -> &str {
        &self.body.event.url
    }

    pub fn token(&self) -> &str {
        &self.body.token
    }

    pub fn offset_in_milliseconds(&self) -> i64 {
        self.body.offset_in_milliseconds
    }
}

/// One classified inbound request. Exactly one variant is live per turn,
/// and its discriminator string always matches the decoded variant.
#[derive(Debug, Clone)]
pub enum Request {
    Intent(IntentRequest),
    Launch(LaunchRequest),
    SessionEnded(SessionEndedRequest),
    AudioPlayerEvent(PlaybackEventRequest),
    VideoPlayerEvent(PlaybackEventRequest),
    Event(EventRequest),
}

impl Request {
    /// Decodes and classifies one inbound turn.
    ///
    /// Branch priority: the three exact discriminators first, then the
    /// `AudioPlayer`/`VideoPlayer` namespace prefixes, then the generic
    /// event fallback.
    pub fn decode(raw: &[u8]) -> Result<Self> {
        let head: Envelope<RequestHeader> = decode_as(raw, "envelope")?;
        let common = Common {
            header: head.request,
            session: head.session,
            context: head.context,
        };

        let kind = common.header.kind.clone();
        match kind.as_str() {
            INTENT_REQUEST => {
                let full: Envelope<IntentBody> = decode_as(raw, INTENT_REQUEST)?;
                let dialog = DialogState::from_body(&full.request);
                Ok(Self::Intent(IntentRequest {
                    common,
                    body: full.request,
                    dialog,
                }))
            }
            // A launch request carries no payload beyond the header the
            // first pass already decoded.
            LAUNCH_REQUEST => Ok(Self::Launch(LaunchRequest { common })),
            SESSION_ENDED_REQUEST => {
                let full: Envelope<SessionEndedBody> = decode_as(raw, SESSION_ENDED_REQUEST)?;
                Ok(Self::SessionEnded(SessionEndedRequest {
                    common,
                    body: full.request,
                }))
            }
            kind if kind.starts_with(AUDIO_EVENT_PREFIX) => {
                let full: Envelope<PlaybackEventBody> = decode_as(raw, "AudioPlayerEvent")?;
                Ok(Self::AudioPlayerEvent(PlaybackEventRequest {
                    common,
                    body: full.request,
                }))
            }
            kind if kind.starts_with(VIDEO_EVENT_PREFIX) => {
                let full: Envelope<PlaybackEventBody> = decode_as(raw, "VideoPlayerEvent")?;
                Ok(Self::VideoPlayerEvent(PlaybackEventRequest {
                    common,
                    body: full.request,
                }))
            }
            _ => {
                let full: Envelope<EventBody> = decode_as(raw, "EventRequest")?;
                Ok(Self::Event(EventRequest {
                    common,
                    body: full.request,
                }))
            }
        }
    }

    pub fn common(&self) -> &Common {
        match self {
            Self::Intent(r) => r.common(),
            Self::Launch(r) => r.common(),
            Self::SessionEnded(r) => r.common(),
            Self::AudioPlayerEvent(r) | Self::VideoPlayerEvent(r) => r.common(),
            Self::Event(r) => r.common(),
        }
    }

    /// The raw `request.type` discriminator.
    pub fn kind(&self) -> &str {
        self.common().kind()
    }

    /// The stable key a fine-grained event handler is registered under:
    /// the exact event type string, e.g. `"AudioPlayer.PlaybackFinished"`.
    /// `None` for intent, launch, and session-ended turns.
    pub fn event_key(&self) -> Option<&str> {
        match self {
            Self::AudioPlayerEvent(_) | Self::VideoPlayerEvent(_) | Self::Event(_) => {
                Some(self.kind())
            }
            _ => None,
        }
    }

    pub fn as_intent(&self) -> Option<&IntentRequest> {
        match self {
            Self::Intent(r) => Some(r),
            _ => None,
        }
    }
}

fn decode_as<R>(raw: &[u8], variant: &'static str) -> Result<Envelope<R>>
where
    R: Default + DeserializeOwned,
{
    serde_json::from_slice(raw).map_err(|e| SkillError::decode(variant, &e))
}
