//! Short-video identifiers

use std::fmt;

use serde::{Deserialize, Serialize};

/// Exact length of a video identifier.
pub const VIDEO_ID_LEN: usize = 11;

/// Primary fallback clip, used whenever a live lookup yields nothing usable.
pub const PRIMARY_FALLBACK_ID: &str = "N20k-rV-iXQ";
/// Second clip added when no search credential is configured at all.
pub const SECONDARY_FALLBACK_ID: &str = "G2fqAlgmoPo";

/// An identifier of exactly 11 characters from `[A-Za-z0-9_-]`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct VideoId(String);

impl VideoId {
    /// Returns `None` when `candidate` does not have the identifier shape.
    pub fn parse(candidate: &str) -> Option<Self> {
        if is_valid_video_id(candidate) {
            Some(Self(candidate.to_string()))
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn primary_fallback() -> Self {
        Self(PRIMARY_FALLBACK_ID.to_string())
    }

    /// Fallback list used when no search credential is configured.
    pub fn offline_fallbacks() -> Vec<Self> {
        vec![
            Self(PRIMARY_FALLBACK_ID.to_string()),
            Self(SECONDARY_FALLBACK_ID.to_string()),
        ]
    }
}

impl TryFrom<String> for VideoId {
    type Error = String;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        if is_valid_video_id(&value) {
            Ok(Self(value))
        } else {
            Err(format!("invalid video id: {:?}", value))
        }
    }
}

impl From<VideoId> for String {
    fn from(id: VideoId) -> Self {
        id.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl PartialEq<&str> for VideoId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

pub fn is_valid_video_id(candidate: &str) -> bool {
    candidate.len() == VIDEO_ID_LEN
        && candidate
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'_' || b == b'-')
}
