//! Working directory management

use crate::error::DouyinError;
use crate::utils::video_filename;
use serde::Serialize;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Outcome of clearing the working directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClearReport {
    /// File names that were deleted
    pub removed: Vec<String>,
    /// Human-readable summary
    pub message: String,
}

/// The single directory downloads are written to
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkDir {
    path: PathBuf,
}

impl WorkDir {
    /// Create the directory (recursively) if absent.
    ///
    /// Failure is fatal for the process and is reported as
    /// [`DouyinError::FatalStartup`].
    pub fn ensure(path: impl Into<PathBuf>) -> Result<Self, DouyinError> {
        let path = path.into();

        if path.is_dir() {
            info!("Using working directory: {}", path.display());
        } else {
            fs::create_dir_all(&path).map_err(|e| {
                DouyinError::FatalStartup(format!("{}: {}", path.display(), e))
            })?;
            info!("Created working directory: {}", path.display());
        }

        Ok(Self { path })
    }

    /// Directory path
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Destination of a downloaded video
    pub fn video_path(&self, video_id: &str) -> PathBuf {
        self.path.join(video_filename(video_id))
    }

    /// Names of the regular files in the directory, sorted
    pub fn list(&self) -> Result<Vec<String>, DouyinError> {
        let mut names = Vec::new();
        for entry in fs::read_dir(&self.path)? {
            let entry = entry?;
            if entry.file_type()?.is_file() {
                names.push(entry.file_name().to_string_lossy().into_owned());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Delete every regular file in the directory.
    ///
    /// Subdirectories are skipped, not recursed into. A file that cannot be
    /// deleted is logged and skipped.
    pub fn clear(&self) -> Result<ClearReport, DouyinError> {
        self.clear_with(|path| fs::remove_file(path))
    }

    fn clear_with<F>(&self, mut remove: F) -> Result<ClearReport, DouyinError>
    where
        F: FnMut(&Path) -> io::Result<()>,
    {
        let mut removed = Vec::new();

        for entry in fs::read_dir(&self.path)? {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    warn!("Skipping unreadable entry: {}", e);
                    continue;
                }
            };

            let is_file = entry.file_type().map(|t| t.is_file()).unwrap_or(false);
            if !is_file {
                continue;
            }

            let name = entry.file_name().to_string_lossy().into_owned();
            match remove(&entry.path()) {
                Ok(()) => removed.push(name),
                Err(e) => warn!("Could not delete {}: {}", entry.path().display(), e),
            }
        }

        removed.sort();
        info!("Cleared {} file(s) from {}", removed.len(), self.path.display());

        Ok(ClearReport {
            message: format!(
                "Working directory cleared, removed files: {}",
                removed.join(", ")
            ),
            removed,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_ensure_creates_nested_directory() {
        let temp = TempDir::new().unwrap();
        let nested = temp.path().join("a").join("b");

        let workdir = WorkDir::ensure(&nested).unwrap();
        assert!(nested.is_dir());
        assert_eq!(workdir.path(), nested.as_path());

        // Idempotent on an existing directory
        assert!(WorkDir::ensure(&nested).is_ok());
    }

    #[test]
    fn test_ensure_fails_on_file() {
        let temp = TempDir::new().unwrap();
        let file = temp.path().join("occupied");
        fs::write(&file, b"x").unwrap();

        let err = WorkDir::ensure(file.join("sub")).unwrap_err();
        assert!(matches!(err, DouyinError::FatalStartup(_)));
    }

    #[test]
    fn test_video_path() {
        let temp = TempDir::new().unwrap();
        let workdir = WorkDir::ensure(temp.path()).unwrap();
        assert_eq!(workdir.video_path("123456"), temp.path().join("123456.mp4"));
    }

    #[test]
    fn test_clear_removes_only_files() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("a.txt"), b"a").unwrap();
        fs::write(temp.path().join("b.mp4"), b"b").unwrap();
        fs::create_dir(temp.path().join("sub")).unwrap();
        fs::write(temp.path().join("sub").join("keep.mp4"), b"c").unwrap();

        let workdir = WorkDir::ensure(temp.path()).unwrap();
        let report = workdir.clear().unwrap();

        assert_eq!(report.removed, vec!["a.txt".to_string(), "b.mp4".to_string()]);
        assert!(report.message.contains("a.txt"));
        assert!(report.message.contains("b.mp4"));
        assert!(!temp.path().join("a.txt").exists());
        assert!(!temp.path().join("b.mp4").exists());
        assert!(temp.path().join("sub").join("keep.mp4").exists());
    }

    #[test]
    fn test_clear_skips_file_that_cannot_be_deleted() {
        let temp = TempDir::new().unwrap();
        for name in ["a.txt", "b.mp4", "c.mp4"] {
            fs::write(temp.path().join(name), b"x").unwrap();
        }

        let workdir = WorkDir::ensure(temp.path()).unwrap();
        let report = workdir
            .clear_with(|path| {
                if path.ends_with("b.mp4") {
                    Err(io::Error::new(io::ErrorKind::PermissionDenied, "locked"))
                } else {
                    fs::remove_file(path)
                }
            })
            .unwrap();

        assert_eq!(report.removed, vec!["a.txt".to_string(), "c.mp4".to_string()]);
        assert!(!report.message.contains("b.mp4"));
        assert!(!temp.path().join("a.txt").exists());
        assert!(temp.path().join("b.mp4").exists());
        assert!(!temp.path().join("c.mp4").exists());
    }

    #[test]
    fn test_clear_empty_directory() {
        let temp = TempDir::new().unwrap();
        let workdir = WorkDir::ensure(temp.path()).unwrap();
        let report = workdir.clear().unwrap();
        assert!(report.removed.is_empty());
    }

    #[test]
    fn test_list() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("2.mp4"), b"").unwrap();
        fs::write(temp.path().join("1.mp4"), b"").unwrap();
        fs::create_dir(temp.path().join("dir")).unwrap();

        let workdir = WorkDir::ensure(temp.path()).unwrap();
        assert_eq!(workdir.list().unwrap(), vec!["1.mp4", "2.mp4"]);
    }
}
