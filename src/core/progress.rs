//! Progress tracking for downloads

use serde::Serialize;

/// Progress of a single download, emitted once per received chunk
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DownloadProgress {
    /// Number of bytes downloaded
    pub downloaded: u64,
    /// Expected size in bytes, 0 when unknown
    pub total: u64,
    /// Download progress as a percentage (0.0 to 100.0), 0 when size is unknown
    pub percentage: f64,
}

impl DownloadProgress {
    /// Create a new progress tracker
    pub fn new(total: u64) -> Self {
        Self {
            downloaded: 0,
            total,
            percentage: 0.0,
        }
    }

    /// Update progress with new downloaded size
    pub fn update(&mut self, downloaded: u64) {
        self.downloaded = downloaded;
        self.percentage = if self.total > 0 {
            (downloaded as f64 / self.total as f64) * 100.0
        } else {
            0.0
        };
    }

    /// Human-readable `downloaded/total` string
    pub fn summary(&self) -> String {
        if self.total > 0 {
            format!(
                "{:.1}% ({}/{})",
                self.percentage,
                format_bytes(self.downloaded),
                format_bytes(self.total)
            )
        } else {
            format_bytes(self.downloaded)
        }
    }
}

/// Format bytes as human-readable string
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: &[&str] = &["B", "KB", "MB", "GB", "TB"];
    const THRESHOLD: f64 = 1024.0;

    if bytes == 0 {
        return "0 B".to_string();
    }

    let bytes_f64 = bytes as f64;
    let exp = (bytes_f64.ln() / THRESHOLD.ln()).floor() as usize;
    let exp = exp.min(UNITS.len() - 1);

    let value = bytes_f64 / THRESHOLD.powi(exp as i32);

    if exp == 0 {
        format!("{} {}", bytes, UNITS[exp])
    } else {
        format!("{:.1} {}", value, UNITS[exp])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_progress_creation() {
        let progress = DownloadProgress::new(1000);
        assert_eq!(progress.total, 1000);
        assert_eq!(progress.downloaded, 0);
        assert_eq!(progress.percentage, 0.0);
    }

    #[test]
    fn test_progress_update() {
        let mut progress = DownloadProgress::new(1000);

        progress.update(500);
        assert_eq!(progress.downloaded, 500);
        assert_eq!(progress.percentage, 50.0);

        progress.update(1000);
        assert_eq!(progress.percentage, 100.0);
    }

    #[test]
    fn test_progress_unknown_total() {
        let mut progress = DownloadProgress::new(0);
        progress.update(4096);
        assert_eq!(progress.downloaded, 4096);
        assert_eq!(progress.percentage, 0.0);
        assert_eq!(progress.summary(), "4.0 KB");
    }

    #[test]
    fn test_summary() {
        let mut progress = DownloadProgress::new(2048);
        progress.update(1024);
        assert_eq!(progress.summary(), "50.0% (1.0 KB/2.0 KB)");
    }

    #[test]
    fn test_format_bytes() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(1023), "1023 B");
        assert_eq!(format_bytes(1024), "1.0 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(1048576), "1.0 MB");
        assert_eq!(format_bytes(1073741824), "1.0 GB");
    }
}
