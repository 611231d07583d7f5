//! Safe filename generation utilities

/// Characters that are illegal in file names on at least one platform
const ILLEGAL_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// Extension of every downloaded file
pub const VIDEO_EXTENSION: &str = "mp4";

/// Replace filesystem-illegal characters with `_` and trim whitespace.
///
/// Returns `None` when nothing printable is left, so callers can fall back
/// to a default title.
pub fn sanitize_title(raw: &str) -> Option<String> {
    let replaced: String = raw
        .chars()
        .map(|c| if ILLEGAL_CHARS.contains(&c) { '_' } else { c })
        .collect();

    let trimmed = replaced.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Title used when the page yields none
pub fn default_title(video_id: &str) -> String {
    format!("douyin_{}", video_id)
}

/// File name a video is saved under
pub fn video_filename(video_id: &str) -> String {
    format!("{}.{}", video_id, VIDEO_EXTENSION)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sanitize_title() {
        assert_eq!(
            sanitize_title("Test Video: Title").as_deref(),
            Some("Test Video_ Title")
        );
        assert_eq!(
            sanitize_title(r#"a\b/c:d*e?f"g<h>i|j"#).as_deref(),
            Some("a_b_c_d_e_f_g_h_i_j")
        );
        assert_eq!(sanitize_title("  padded  ").as_deref(), Some("padded"));
    }

    #[test]
    fn test_sanitize_title_empty() {
        assert_eq!(sanitize_title(""), None);
        assert_eq!(sanitize_title("   \t"), None);
    }

    #[test]
    fn test_sanitize_keeps_unicode() {
        assert_eq!(sanitize_title("测试视频标题").as_deref(), Some("测试视频标题"));
    }

    #[test]
    fn test_names() {
        assert_eq!(default_title("123"), "douyin_123");
        assert_eq!(video_filename("123"), "123.mp4");
    }
}
