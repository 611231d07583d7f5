//! Share-link resolution and metadata extraction

use crate::config::Config;
use crate::core::VideoInfo;
use crate::error::DouyinError;
use crate::platform::{ExtractionRules, VideoClient};
use crate::utils::{IdGenerator, TimestampIdGenerator};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Turns free-form share text into a [`VideoInfo`]
pub struct Resolver {
    client: VideoClient,
    rules: ExtractionRules,
    id_generator: Arc<dyn IdGenerator>,
    config: Arc<Config>,
}

impl Resolver {
    /// Create a resolver with the Douyin extraction rules
    pub fn new(client: VideoClient, config: Arc<Config>) -> Result<Self, DouyinError> {
        Ok(Self {
            client,
            rules: ExtractionRules::douyin()?,
            id_generator: Arc::new(TimestampIdGenerator),
            config,
        })
    }

    /// Replace the extraction rules
    pub fn with_rules(mut self, rules: ExtractionRules) -> Self {
        self.rules = rules;
        self
    }

    /// Replace the fallback id generator
    pub fn with_id_generator(mut self, id_generator: Arc<dyn IdGenerator>) -> Self {
        self.id_generator = id_generator;
        self
    }

    /// Resolve the first share link in `share_text`.
    ///
    /// Every failure is reported as [`DouyinError::Resolution`] carrying the
    /// message of the underlying cause.
    pub async fn resolve(&self, share_text: &str) -> Result<VideoInfo, DouyinError> {
        self.resolve_inner(share_text)
            .await
            .map_err(|e| match e {
                DouyinError::Resolution(_) => e,
                other => DouyinError::resolution(other),
            })
    }

    async fn resolve_inner(&self, share_text: &str) -> Result<VideoInfo, DouyinError> {
        let share_url = self
            .rules
            .find_share_link(share_text)
            .ok_or_else(|| DouyinError::resolution("no valid share link found"))?;
        info!("Resolving share link: {}", share_url);

        let final_url = self.client.resolve_redirects(share_url).await?;

        let video_id = match self.rules.find_video_id(&final_url) {
            Some(id) => id.to_string(),
            None => {
                let id = self.id_generator.generate();
                warn!("No video id in {}, using generated id {}", final_url, id);
                id
            }
        };
        debug!("Video id: {}", video_id);

        let html = self.client.fetch_text(&self.config.page_url(&video_id)).await?;

        let extraction =
            self.rules
                .extract(&html, &video_id, &self.config.fallback_url(&video_id));
        info!(
            "Resolved video {} ({}) via {}",
            video_id, extraction.title, extraction.strategy
        );

        Ok(VideoInfo {
            video_id,
            title: extraction.title,
            url: extraction.url,
        })
    }
}
