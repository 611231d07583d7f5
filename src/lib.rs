//! # douyin-mcp
//!
//! Resolves Douyin share links into watermark-free video URLs, downloads the
//! videos with progress reporting, and exposes both as MCP tools over a
//! line-delimited JSON-RPC stdio server.
//!
//! ## Features
//!
//! - Share-link extraction from free text and redirect following
//! - Layered, data-driven scraping of the share page with a fallback URL
//! - Streaming downloads with per-chunk progress callbacks
//! - Three tools, a video resource and a usage-guide prompt
//!
//! ## Example
//!
//! ```rust,no_run
//! use douyin_mcp::{Config, Resolver, VideoClient};
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Arc::new(Config::default());
//!     let resolver = Resolver::new(VideoClient::new()?, config)?;
//!
//!     let info = resolver.resolve("look https://v.douyin.com/abc/ !").await?;
//!     println!("{}: {}", info.title, info.url);
//!
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod config;
pub mod core;
pub mod download;
pub mod error;
pub mod platform;
pub mod server;
pub mod tools;
pub mod utils;

// Re-export main types
pub use config::Config;
pub use core::{ClearReport, DownloadProgress, Resolver, VideoInfo, WorkDir};
pub use download::{ProgressCallback, VideoDownloader};
pub use error::DouyinError;
pub use platform::{ExtractionRules, VideoClient};
pub use tools::DouyinTools;

/// Result type alias for douyin-mcp operations
pub type Result<T> = std::result::Result<T, DouyinError>;
