//! Tool, resource and prompt declarations advertised to clients

use crate::utils::RESOURCE_URI_TEMPLATE;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

pub const GET_DOWNLOAD_LINK: &str = "get_download_link";
pub const DOWNLOAD_VIDEO: &str = "download_video";
pub const PARSE_VIDEO_INFO: &str = "parse_video_info";

/// Earlier tool names still accepted by `tools/call`
pub const LEGACY_GET_DOWNLOAD_LINK: &str = "get_douyin_download_link";
pub const LEGACY_DOWNLOAD_VIDEO: &str = "download_douyin_video";
pub const LEGACY_PARSE_VIDEO_INFO: &str = "parse_douyin_video_info";

/// Arguments shared by every tool
#[derive(Debug, Clone, Deserialize)]
pub struct ShareTextArgs {
    /// Share link, or text containing one
    #[serde(alias = "share_link")]
    pub share_text: String,
}

/// Declaration of a callable tool
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ToolDefinition {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub input_schema: Value,
}

/// Declaration of a resource template
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ResourceTemplate {
    pub uri_template: &'static str,
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub mime_type: &'static str,
}

fn share_text_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "share_text": {
                "type": "string",
                "description": "Douyin share link or text containing one"
            }
        },
        "required": ["share_text"]
    })
}

/// All tools, in the order they are listed
pub fn tool_definitions() -> Vec<ToolDefinition> {
    vec![
        ToolDefinition {
            name: GET_DOWNLOAD_LINK,
            title: "Get watermark-free download link",
            description: "Parse a Douyin share link and return the watermark-free video URL",
            input_schema: share_text_schema(),
        },
        ToolDefinition {
            name: DOWNLOAD_VIDEO,
            title: "Download Douyin video",
            description: "Parse a Douyin share link and save the video into the working directory",
            input_schema: share_text_schema(),
        },
        ToolDefinition {
            name: PARSE_VIDEO_INFO,
            title: "Parse Douyin video info",
            description: "Parse a Douyin share link and return the video id, title and URL",
            input_schema: share_text_schema(),
        },
    ]
}

/// The video lookup resource template
pub fn resource_templates() -> Vec<ResourceTemplate> {
    vec![ResourceTemplate {
        uri_template: RESOURCE_URI_TEMPLATE,
        name: "douyin-video",
        title: "Douyin video info",
        description: "Basic information about a Douyin video, looked up by id",
        mime_type: "text/plain",
    }]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tool_names() {
        let names: Vec<_> = tool_definitions().iter().map(|t| t.name).collect();
        assert_eq!(names, vec!["get_download_link", "download_video", "parse_video_info"]);
    }

    #[test]
    fn test_schema_shape() {
        let json = serde_json::to_value(&tool_definitions()[0]).unwrap();
        assert_eq!(json["inputSchema"]["type"], "object");
        assert_eq!(json["inputSchema"]["required"][0], "share_text");
    }

    #[test]
    fn test_args_accept_share_link_alias() {
        let args: ShareTextArgs = serde_json::from_value(json!({"share_text": "a"})).unwrap();
        assert_eq!(args.share_text, "a");
        let args: ShareTextArgs = serde_json::from_value(json!({"share_link": "b"})).unwrap();
        assert_eq!(args.share_text, "b");
        assert!(serde_json::from_value::<ShareTextArgs>(json!({})).is_err());
    }

    #[test]
    fn test_resource_template() {
        let json = serde_json::to_value(&resource_templates()[0]).unwrap();
        assert_eq!(json["uriTemplate"], "douyin://video/{video_id}");
        assert_eq!(json["mimeType"], "text/plain");
    }
}
