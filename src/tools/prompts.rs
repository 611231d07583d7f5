//! Usage guide prompt

use serde::Serialize;

pub const DOWNLOAD_GUIDE: &str = "douyin_video_download_guide";

/// Declaration of a prompt
#[derive(Debug, Clone, Serialize)]
pub struct PromptDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
}

/// All prompts
pub fn prompt_definitions() -> Vec<PromptDefinition> {
    vec![PromptDefinition {
        name: DOWNLOAD_GUIDE,
        title: "Douyin video download guide",
        description: "How to use the Douyin parsing and download tools",
    }]
}

/// Guide text, mentioning the configured working directory
pub fn download_guide(work_dir: &str) -> String {
    format!(
        r#"# Douyin video download guide

## What it does
Extracts the watermark-free video URL from a Douyin share link and can save the video file.

## Tools

### 1. get_download_link
Parse a share link and return the watermark-free download URL.
Argument: `share_text` - Douyin share link or text containing one

### 2. download_video
Parse a share link and download the video file into the working directory.
Argument: `share_text` - Douyin share link or text containing one

### 3. parse_video_info
Parse a share link and return the video id, title and download URL.
Argument: `share_text` - Douyin share link or text containing one

## Resource
`douyin://video/{{video_id}}` returns the same information as `parse_video_info`.

## Output files
Videos are saved as `{{videoId}}.mp4` in the working directory (currently `{work_dir}`).
Set the `WORK_DIR` environment variable to change it.

## Notes
- Only the first link found in the text is used
- Download progress is written to the server log"#
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guide_mentions_tools_and_workdir() {
        let guide = download_guide("/data/videos");
        assert!(guide.contains("get_download_link"));
        assert!(guide.contains("download_video"));
        assert!(guide.contains("parse_video_info"));
        assert!(guide.contains("douyin://video/{video_id}"));
        assert!(guide.contains("`{videoId}.mp4`"));
        assert!(guide.contains("/data/videos"));
    }
}
