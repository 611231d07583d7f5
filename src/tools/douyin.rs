//! Douyin tool handlers
//!
//! Each handler maps the resolver and downloader outcome into a uniform
//! `{status, ...}` result. Failures never escape: they become
//! `status: "error"` results whose message is the error text.

use crate::config::Config;
use crate::core::{DownloadProgress, Resolver};
use crate::download::{ProgressCallback, VideoDownloader};
use crate::utils::{resource_uri, VIDEO_EXTENSION};
use serde::Serialize;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use tracing::{error, info, warn};

/// Outcome of a tool call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ToolStatus {
    Success,
    Error,
}

/// Structured tool result that can also render itself as text
pub trait ToolOutput: Serialize {
    /// Whether the call failed
    fn is_error(&self) -> bool;

    /// Human-readable rendering
    fn render(&self) -> String;
}

/// Result of `get_download_link`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadLinkResult {
    pub status: ToolStatus,
    pub video_id: String,
    pub title: String,
    pub download_url: String,
    pub description: String,
    pub usage_tip: String,
}

impl ToolOutput for DownloadLinkResult {
    fn is_error(&self) -> bool {
        self.status == ToolStatus::Error
    }

    fn render(&self) -> String {
        match self.status {
            ToolStatus::Success => format!(
                "✅ Got watermark-free download link\n\n📱 Title: {}\n🆔 Video ID: {}\n🔗 Download URL: {}\n\n💡 {}",
                self.title, self.video_id, self.download_url, self.usage_tip
            ),
            ToolStatus::Error => format!("❌ {}", self.usage_tip),
        }
    }
}

/// Result of `download_video`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DownloadVideoResult {
    pub status: ToolStatus,
    pub video_id: String,
    pub title: String,
    pub file_path: String,
    pub message: String,
}

impl ToolOutput for DownloadVideoResult {
    fn is_error(&self) -> bool {
        self.status == ToolStatus::Error
    }

    fn render(&self) -> String {
        match self.status {
            ToolStatus::Success => format!(
                "✅ {}\n\n📱 Title: {}\n🆔 Video ID: {}\n💾 File: {}",
                self.message, self.title, self.video_id, self.file_path
            ),
            ToolStatus::Error => format!("❌ {}", self.message),
        }
    }
}

/// Result of `parse_video_info`
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoInfoResult {
    pub status: ToolStatus,
    pub video_id: String,
    pub title: String,
    pub download_url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

impl ToolOutput for VideoInfoResult {
    fn is_error(&self) -> bool {
        self.status == ToolStatus::Error
    }

    fn render(&self) -> String {
        match self.status {
            ToolStatus::Success => format!(
                "📱 Video info parsed\n\n📝 Title: {}\n🆔 ID: {}\n🔗 Download URL: {}",
                self.title, self.video_id, self.download_url
            ),
            ToolStatus::Error => format!(
                "❌ Parse failed: {}",
                self.message.as_deref().unwrap_or_default()
            ),
        }
    }
}

/// A downloaded video listed as a resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VideoResource {
    pub uri: String,
    pub name: String,
    pub mime_type: &'static str,
}

/// Tool façade over the resolver and downloader
#[derive(Clone)]
pub struct DouyinTools {
    resolver: Arc<Resolver>,
    downloader: Arc<VideoDownloader>,
    config: Arc<Config>,
}

impl DouyinTools {
    /// Create the façade
    pub fn new(resolver: Arc<Resolver>, downloader: Arc<VideoDownloader>, config: Arc<Config>) -> Self {
        Self {
            resolver,
            downloader,
            config,
        }
    }

    /// Resolve a share link into a watermark-free download URL
    pub async fn get_download_link(&self, share_text: &str) -> DownloadLinkResult {
        match self.resolver.resolve(share_text).await {
            Ok(info) => DownloadLinkResult {
                status: ToolStatus::Success,
                description: format!("Video title: {}", info.title),
                usage_tip: "Use this link directly to download the watermark-free video".to_string(),
                video_id: info.video_id,
                title: info.title,
                download_url: info.url,
            },
            Err(e) => {
                error!("get_download_link failed: {}", e);
                DownloadLinkResult {
                    status: ToolStatus::Error,
                    video_id: String::new(),
                    title: String::new(),
                    download_url: String::new(),
                    description: String::new(),
                    usage_tip: e.to_string(),
                }
            }
        }
    }

    /// Resolve a share link and save the video into the working directory
    pub async fn download_video(&self, share_text: &str) -> DownloadVideoResult {
        let outcome = async {
            let info = self.resolver.resolve(share_text).await?;
            let logger = progress_logger(info.video_id.clone());
            let callback: &ProgressCallback = &logger;
            let path = self.downloader.download(&info, Some(callback)).await?;
            Ok::<_, crate::DouyinError>((info, path))
        }
        .await;

        match outcome {
            Ok((info, path)) => {
                let file_path = path.display().to_string();
                DownloadVideoResult {
                    status: ToolStatus::Success,
                    message: format!("Video downloaded: {}", file_path),
                    video_id: info.video_id,
                    title: info.title,
                    file_path,
                }
            }
            Err(e) => {
                error!("download_video failed: {}", e);
                DownloadVideoResult {
                    status: ToolStatus::Error,
                    video_id: String::new(),
                    title: String::new(),
                    file_path: String::new(),
                    message: e.to_string(),
                }
            }
        }
    }

    /// Resolve a share link and report its metadata
    pub async fn parse_video_info(&self, share_text: &str) -> VideoInfoResult {
        match self.resolver.resolve(share_text).await {
            Ok(info) => VideoInfoResult {
                status: ToolStatus::Success,
                video_id: info.video_id,
                title: info.title,
                download_url: info.url,
                message: None,
            },
            Err(e) => {
                error!("parse_video_info failed: {}", e);
                VideoInfoResult {
                    status: ToolStatus::Error,
                    video_id: String::new(),
                    title: String::new(),
                    download_url: String::new(),
                    message: Some(e.to_string()),
                }
            }
        }
    }

    /// Videos already in the working directory, as `douyin://video/{video_id}`
    pub fn downloaded_resources(&self) -> Vec<VideoResource> {
        let names = match self.downloader.workdir().list() {
            Ok(names) => names,
            Err(e) => {
                warn!("Could not list working directory: {}", e);
                return Vec::new();
            }
        };

        names
            .iter()
            .map(Path::new)
            .filter(|path| path.extension().and_then(|ext| ext.to_str()) == Some(VIDEO_EXTENSION))
            .filter_map(|path| path.file_stem()?.to_str())
            .map(|video_id| VideoResource {
                uri: resource_uri(video_id),
                name: video_id.to_string(),
                mime_type: "text/plain",
            })
            .collect()
    }

    /// Plain-text resource for `douyin://video/{video_id}`
    pub async fn video_resource(&self, video_id: &str) -> String {
        let result = self.parse_video_info(&self.config.page_url(video_id)).await;
        match result.status {
            ToolStatus::Success => format!(
                "Douyin video\nVideo ID: {}\nTitle: {}\nDownload URL: {}",
                result.video_id, result.title, result.download_url
            ),
            ToolStatus::Error => format!(
                "Failed to get video info: {}",
                result.message.unwrap_or_default()
            ),
        }
    }
}

/// Progress callback logging every completed tenth of a download
fn progress_logger(video_id: String) -> impl Fn(DownloadProgress) + Send + Sync {
    let last_decile = AtomicU64::new(0);
    move |progress: DownloadProgress| {
        if progress.total == 0 {
            return;
        }
        let decile = (progress.percentage / 10.0).floor() as u64;
        if decile > last_decile.fetch_max(decile, Ordering::Relaxed) {
            info!("Downloading {}: {}", video_id, progress.summary());
        }
    }
}
