//! Resource URI helpers

use crate::error::DouyinError;
use url::Url;

/// Scheme of the video resource template
pub const RESOURCE_SCHEME: &str = "douyin";

/// Resource template advertised to clients
pub const RESOURCE_URI_TEMPLATE: &str = "douyin://video/{video_id}";

/// Build the resource URI for a video id
pub fn resource_uri(video_id: &str) -> String {
    format!("{}://video/{}", RESOURCE_SCHEME, video_id)
}

/// Extract the video id from a `douyin://video/{video_id}` URI
pub fn parse_resource_uri(uri: &str) -> Result<String, DouyinError> {
    let parsed = Url::parse(uri)?;

    if parsed.scheme() != RESOURCE_SCHEME {
        return Err(DouyinError::Resolution(format!(
            "unsupported resource scheme: {}",
            parsed.scheme()
        )));
    }

    if parsed.host_str() != Some("video") {
        return Err(DouyinError::Resolution(format!(
            "unsupported resource: {}",
            uri
        )));
    }

    let video_id = parsed.path().trim_matches('/');
    if video_id.is_empty() || video_id.contains('/') {
        return Err(DouyinError::Resolution(
            "missing video id in resource URI".to_string(),
        ));
    }

    Ok(video_id.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resource_uri_roundtrip() {
        let uri = resource_uri("7301234567890");
        assert_eq!(uri, "douyin://video/7301234567890");
        assert_eq!(parse_resource_uri(&uri).unwrap(), "7301234567890");
    }

    #[test]
    fn test_parse_resource_uri_rejects() {
        assert!(parse_resource_uri("douyin://video/").is_err());
        assert!(parse_resource_uri("douyin://user/123").is_err());
        assert!(parse_resource_uri("https://video/123").is_err());
        assert!(parse_resource_uri("not a uri").is_err());
    }
}
