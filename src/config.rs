//! Process configuration shared by the resolver, downloader and workdir

use std::path::PathBuf;

/// Mobile browser identity sent with every outbound request
pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (iPhone; CPU iPhone OS 17_2 like Mac OS X) AppleWebKit/605.1.15 (KHTML, like Gecko) EdgiOS/121.0.2277.107 Version/17.0 Mobile/15E148 Safari/604.1";

/// Working directory used when `WORK_DIR` is not set
pub const DEFAULT_WORK_DIR: &str = ".data";

/// Placeholder substituted with the video id in URL templates
pub const VIDEO_ID_PLACEHOLDER: &str = "{video_id}";

/// Canonical share page, fetched to scrape metadata
pub const DEFAULT_PAGE_URL_TEMPLATE: &str = "https://www.iesdouyin.com/share/video/{video_id}";

/// Direct play endpoint used when the page carries no media URL
pub const DEFAULT_FALLBACK_URL_TEMPLATE: &str =
    "https://aweme.snssdk.com/aweme/v1/play/?video_id={video_id}";

/// Configuration built once at startup and shared read-only
#[derive(Debug, Clone)]
pub struct Config {
    /// Destination of downloads and target of `clear`
    pub work_dir: PathBuf,
    /// User-Agent header for all requests
    pub user_agent: String,
    /// Redirect hops followed when expanding a share link
    pub max_redirects: usize,
    /// Video page URL, `{video_id}` is substituted
    pub page_url_template: String,
    /// Media URL used when extraction finds nothing, `{video_id}` is substituted
    pub fallback_url_template: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            work_dir: PathBuf::from(DEFAULT_WORK_DIR),
            user_agent: MOBILE_USER_AGENT.to_string(),
            max_redirects: 5,
            page_url_template: DEFAULT_PAGE_URL_TEMPLATE.to_string(),
            fallback_url_template: DEFAULT_FALLBACK_URL_TEMPLATE.to_string(),
        }
    }
}

impl Config {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set working directory
    pub fn with_work_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.work_dir = path.into();
        self
    }

    /// Set User-Agent header
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set redirect cap for share links
    pub fn with_max_redirects(mut self, max_redirects: usize) -> Self {
        self.max_redirects = max_redirects;
        self
    }

    /// Set video page template
    pub fn with_page_url_template(mut self, template: impl Into<String>) -> Self {
        self.page_url_template = template.into();
        self
    }

    /// Set fallback media template
    pub fn with_fallback_url_template(mut self, template: impl Into<String>) -> Self {
        self.fallback_url_template = template.into();
        self
    }

    /// Video page URL for a resolved id
    pub fn page_url(&self, video_id: &str) -> String {
        fill_template(&self.page_url_template, video_id)
    }

    /// Fallback media URL for a resolved id
    pub fn fallback_url(&self, video_id: &str) -> String {
        fill_template(&self.fallback_url_template, video_id)
    }
}

/// Substitute `{video_id}` in a URL template
pub fn fill_template(template: &str, video_id: &str) -> String {
    template.replace(VIDEO_ID_PLACEHOLDER, video_id)
}
