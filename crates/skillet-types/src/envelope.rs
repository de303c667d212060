//! Common inbound envelope types.
//!
//! Every request the platform posts to a skill shares the same outer shape:
//! a `session` block, a `context` block describing the device and user, and
//! a `request` block whose `type` field discriminates the variant. The
//! envelope is decoded twice per turn: once with [`RequestHeader`] as the
//! request body to read the discriminator, and once with the full
//! variant-specific body.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The outer request envelope, generic over the request body.
///
/// `Envelope<RequestHeader>` is the minimal first-pass decode used to read
/// the discriminator and session; `Envelope<IntentBody>` and friends are the
/// full second-pass decodes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Envelope<R: Default> {
    pub version: String,
    pub session: SessionBody,
    pub context: ContextBody,
    pub request: R,
}

/// The platform-managed session block.
///
/// `attributes` is an opaque caller-defined map; the engine echoes it back
/// verbatim (plus any handler mutations) without interpreting it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionBody {
    pub session_id: String,
    pub new: bool,
    pub attributes: Map<String, Value>,
}

/// Device, user, and playback context shared by all request variants.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ContextBody {
    #[serde(rename = "System")]
    pub system: SystemContext,
    #[serde(rename = "AudioPlayer")]
    pub audio_player: PlaybackState,
    #[serde(rename = "VideoPlayer")]
    pub video_player: PlaybackState,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SystemContext {
    pub application: ApplicationInfo,
    pub user: UserInfo,
    pub device: DeviceInfo,
    pub api_access_token: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ApplicationInfo {
    pub application_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserInfo {
    pub user_id: String,
    pub access_token: String,
    pub user_info: UserProfile,
}

/// Optional profile data the platform attaches to the user.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct UserProfile {
    pub location: LocationInfo,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LocationInfo {
    pub city: String,
}

/// The originating device.
///
/// `supported_interfaces` lists the capabilities the device declares
/// (`"Display"`, `"AudioPlayer"`, `"VideoPlayer"`, ...); presence of the key
/// is what matters, the value shape is platform-defined.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct DeviceInfo {
    pub device_id: String,
    pub original_device_id: String,
    pub user_device_id: String,
    pub device_ip_address: String,
    pub supported_interfaces: Map<String, Value>,
}

/// Playback position the device reports for the audio or video player.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PlaybackState {
    pub token: String,
    pub offset_in_milliseconds: i64,
    pub player_activity: String,
}

/// Fields common to every `request` block.
///
/// The platform sends `timestamp` as a string of Unix seconds.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RequestHeader {
    #[serde(rename = "type")]
    pub kind: String,
    pub request_id: String,
    pub timestamp: String,
}

/// The `request` block of a session-ended request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SessionEndedBody {
    #[serde(flatten)]
    pub header: RequestHeader,
    pub reason: String,
}
