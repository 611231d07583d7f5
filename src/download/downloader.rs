//! Streaming video downloader

use crate::core::{DownloadProgress, VideoInfo, WorkDir};
use crate::error::DouyinError;
use crate::platform::{content_length, VideoClient};
use futures_util::{Stream, StreamExt};
use std::fmt::Display;
use std::path::PathBuf;
use tokio::fs::File;
use tokio::io::{AsyncWrite, AsyncWriteExt};
use tracing::{debug, info, warn};

/// Callback invoked synchronously for every received chunk
pub type ProgressCallback = dyn Fn(DownloadProgress) + Send + Sync;

/// Streams media URLs into the working directory
#[derive(Debug, Clone)]
pub struct VideoDownloader {
    client: VideoClient,
    workdir: WorkDir,
}

impl VideoDownloader {
    /// Create a new downloader writing into `workdir`
    pub fn new(client: VideoClient, workdir: WorkDir) -> Self {
        Self { client, workdir }
    }

    /// Working directory downloads are written to
    pub fn workdir(&self) -> &WorkDir {
        &self.workdir
    }

    /// Download `info.url` to `<workdir>/<video_id>.mp4`.
    ///
    /// Any transport or filesystem failure is reported as
    /// [`DouyinError::Download`].
    pub async fn download(
        &self,
        info: &VideoInfo,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<PathBuf, DouyinError> {
        info!("Downloading video {}: {}", info.video_id, info.title);

        let response = self
            .client
            .fetch_stream(&info.url)
            .await
            .map_err(DouyinError::download)?;
        let total = content_length(response.headers());
        debug!("Expected size: {} bytes", total);

        self.save_stream(&info.video_id, response.bytes_stream(), total, on_progress)
            .await
    }

    /// Write a byte stream to the destination of `video_id`.
    ///
    /// Bytes go to `<video_id>.tmp` first, which is renamed once the file is
    /// flushed and synced, and removed on failure.
    pub async fn save_stream<S, B, E>(
        &self,
        video_id: &str,
        stream: S,
        total: u64,
        on_progress: Option<&ProgressCallback>,
    ) -> Result<PathBuf, DouyinError>
    where
        S: Stream<Item = Result<B, E>>,
        B: AsRef<[u8]>,
        E: Display,
    {
        let output_path = self.workdir.video_path(video_id);
        let tmp_path = output_path.with_extension("tmp");

        let result = async {
            let mut file = File::create(&tmp_path).await?;
            let downloaded = pipe_with_progress(stream, &mut file, total, on_progress).await?;
            file.flush().await?;
            file.sync_all().await?;
            drop(file);
            tokio::fs::rename(&tmp_path, &output_path).await?;
            Ok::<u64, DouyinError>(downloaded)
        }
        .await;

        match result {
            Ok(downloaded) => {
                info!(
                    "Download completed: {} bytes -> {}",
                    downloaded,
                    output_path.display()
                );
                Ok(output_path)
            }
            Err(e) => {
                warn!("Download of {} failed: {}, cleaning up temp file", video_id, e);
                let _ = tokio::fs::remove_file(&tmp_path).await;
                Err(match e {
                    DouyinError::Download(_) => e,
                    other => DouyinError::download(other),
                })
            }
        }
    }
}

/// Feed every chunk of `stream` to the progress callback and to `writer`.
///
/// Both consumers see each chunk exactly once. The first failure, from either
/// the stream or the writer, ends the transfer and is returned. Returns the
/// number of bytes written.
pub async fn pipe_with_progress<S, B, E, W>(
    stream: S,
    writer: &mut W,
    total: u64,
    on_progress: Option<&ProgressCallback>,
) -> Result<u64, DouyinError>
where
    S: Stream<Item = Result<B, E>>,
    B: AsRef<[u8]>,
    E: Display,
    W: AsyncWrite + Unpin,
{
    tokio::pin!(stream);
    let mut progress = DownloadProgress::new(total);

    while let Some(chunk) = stream.next().await {
        let chunk = chunk.map_err(DouyinError::download)?;
        let bytes = chunk.as_ref();

        progress.update(progress.downloaded + bytes.len() as u64);
        if let Some(callback) = on_progress {
            callback(progress);
        }

        writer.write_all(bytes).await?;
        debug!("Received {} bytes, {}", bytes.len(), progress.summary());
    }

    Ok(progress.downloaded)
}
