//! Tolerant metadata extraction from share pages
//!
//! The share page is undocumented and changes without notice, so extraction is
//! an ordered list of named patterns tried in priority order. The patterns are
//! plain data: adapting to a page change means editing [`ExtractionRules`],
//! not the code that walks them. The last media strategy is a URL template and
//! always succeeds.

use crate::error::DouyinError;
use crate::utils::{default_title, sanitize_title};
use regex::Regex;
use tracing::debug;

/// Free-text pattern for the first absolute http(s) link
pub const SHARE_LINK_PATTERN: &str = r"https?://[^\s]+";

/// Video id path segment of a resolved share URL
pub const VIDEO_ID_PATTERN: &str = r"video/([^/?]+)";

/// First entry of the `play_addr.url_list` array embedded in the page
pub const PLAY_ADDR_PATTERN: &str = r#""play_addr"[^}]*"url_list"[^\[]*\[\s*"([^"]+)""#;

/// `"desc": "..."` JSON field
pub const DESC_PATTERN: &str = r#""desc"\s*:\s*"([^"]+)""#;

/// HTML `<title>` element
pub const HTML_TITLE_PATTERN: &str = r"<title>([^<]+)</title>";

/// Token marking the watermarked media variant
pub const WATERMARK_TOKEN: &str = "playwm";

/// Replacement yielding the clean media variant
pub const CLEAN_TOKEN: &str = "play";

/// Name reported when the fallback template produced the media URL
pub const FALLBACK_STRATEGY: &str = "fallback_template";

/// A named pattern whose first capture group is the extracted value
#[derive(Debug, Clone)]
pub struct NamedPattern {
    pub name: String,
    pub regex: Regex,
}

impl NamedPattern {
    /// Compile a named pattern
    pub fn new(name: impl Into<String>, pattern: &str) -> Result<Self, DouyinError> {
        Ok(Self {
            name: name.into(),
            regex: Regex::new(pattern)?,
        })
    }

    /// First capture of the pattern in `haystack`, if any
    pub fn capture<'h>(&self, haystack: &'h str) -> Option<&'h str> {
        self.regex
            .captures(haystack)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
    }
}

/// Result of running the extraction strategies over a page
#[derive(Debug, Clone, PartialEq)]
pub struct Extraction {
    /// Clean media URL
    pub url: String,
    /// Sanitized title
    pub title: String,
    /// Name of the strategy that produced the URL
    pub strategy: String,
}

/// Ordered extraction strategies for the share link, video id and page
#[derive(Debug, Clone)]
pub struct ExtractionRules {
    /// Finds the share link in free text
    pub share_link: Regex,
    /// Finds the video id in the resolved URL
    pub video_id: Regex,
    /// Media URL strategies, highest priority first
    pub media_url: Vec<NamedPattern>,
    /// Title strategies, highest priority first
    pub title: Vec<NamedPattern>,
    /// Substring rewritten in a matched media URL
    pub watermark_token: String,
    /// Replacement for the watermark token
    pub clean_token: String,
}

impl ExtractionRules {
    /// Rules matching the current Douyin share page layout
    pub fn douyin() -> Result<Self, DouyinError> {
        Ok(Self {
            share_link: Regex::new(SHARE_LINK_PATTERN)?,
            video_id: Regex::new(VIDEO_ID_PATTERN)?,
            media_url: vec![NamedPattern::new("play_addr_url_list", PLAY_ADDR_PATTERN)?],
            title: vec![
                NamedPattern::new("desc_field", DESC_PATTERN)?,
                NamedPattern::new("html_title", HTML_TITLE_PATTERN)?,
            ],
            watermark_token: WATERMARK_TOKEN.to_string(),
            clean_token: CLEAN_TOKEN.to_string(),
        })
    }

    /// First http(s) link in free text.
    ///
    /// Only the first link is considered even when the text has several.
    pub fn find_share_link<'t>(&self, text: &'t str) -> Option<&'t str> {
        self.share_link.find(text).map(|m| m.as_str())
    }

    /// Video id segment of a resolved URL
    pub fn find_video_id<'u>(&self, url: &'u str) -> Option<&'u str> {
        self.video_id
            .captures(url)
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str())
            .filter(|s| !s.is_empty())
    }

    /// Rewrite the watermarked media URL into its clean variant
    pub fn remove_watermark(&self, url: &str) -> String {
        url.replacen(&self.watermark_token, &self.clean_token, 1)
    }

    /// Run the media and title strategies over `html`.
    ///
    /// `fallback_url` is used, together with the default title, when no
    /// media strategy matches.
    pub fn extract(&self, html: &str, video_id: &str, fallback_url: &str) -> Extraction {
        for strategy in &self.media_url {
            if let Some(raw_url) = strategy.capture(html) {
                debug!("Media URL matched by strategy '{}'", strategy.name);
                return Extraction {
                    url: self.remove_watermark(raw_url),
                    title: self.extract_title(html, video_id),
                    strategy: strategy.name.clone(),
                };
            }
        }

        debug!("No media strategy matched, using fallback template");
        Extraction {
            url: fallback_url.to_string(),
            title: default_title(video_id),
            strategy: FALLBACK_STRATEGY.to_string(),
        }
    }

    fn extract_title(&self, html: &str, video_id: &str) -> String {
        self.title
            .iter()
            .find_map(|strategy| strategy.capture(html))
            .and_then(sanitize_title)
            .unwrap_or_else(|| default_title(video_id))
    }
}
