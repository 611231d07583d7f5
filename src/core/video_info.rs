//! Video information structures

use serde::{Deserialize, Serialize};

/// Metadata recovered from a share link
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfo {
    /// Opaque platform video id
    pub video_id: String,
    /// Sanitized title
    pub title: String,
    /// Direct watermark-free media URL
    pub url: String,
}

impl VideoInfo {
    /// Create a new VideoInfo
    pub fn new(video_id: impl Into<String>, title: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            video_id: video_id.into(),
            title: title.into(),
            url: url.into(),
        }
    }
}
