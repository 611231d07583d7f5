//! Stdio transport: one JSON message per line

use super::handler::McpServer;
use crate::error::DouyinError;
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader};
use tokio::sync::mpsc;
use tokio::task::JoinSet;
use tracing::{debug, info};

/// Serves requests read from stdin and writes responses to stdout
pub struct StdioTransport;

impl StdioTransport {
    /// Serve until stdin is closed
    pub async fn run(server: Arc<McpServer>) -> Result<(), DouyinError> {
        Self::serve(server, BufReader::new(tokio::io::stdin()), tokio::io::stdout()).await
    }

    /// Serve requests from `reader`, writing responses to `writer`.
    ///
    /// Each request runs on its own task so a long download does not hold up
    /// other calls; a single writer task serializes the responses. Returns
    /// once the input ends and every in-flight request has been answered.
    pub async fn serve<R, W>(server: Arc<McpServer>, reader: R, writer: W) -> Result<(), DouyinError>
    where
        R: AsyncBufRead + Unpin,
        W: AsyncWrite + Unpin + Send + 'static,
    {
        let (tx, mut rx) = mpsc::unbounded_channel::<String>();

        let writer_task = tokio::spawn(async move {
            let mut writer = writer;
            while let Some(message) = rx.recv().await {
                writer.write_all(message.as_bytes()).await?;
                writer.write_all(b"\n").await?;
                writer.flush().await?;
            }
            Ok::<(), std::io::Error>(())
        });

        let mut tasks = JoinSet::new();
        let mut lines = reader.lines();

        while let Some(line) = lines.next_line().await? {
            if line.trim().is_empty() {
                continue;
            }
            debug!("Received: {}", line);

            let server = server.clone();
            let tx = tx.clone();
            tasks.spawn(async move {
                if let Some(response) = server.handle_line(&line).await {
                    let _ = tx.send(response);
                }
            });
        }

        info!("Input closed, waiting for {} pending request(s)", tasks.len());
        while tasks.join_next().await.is_some() {}
        drop(tx);

        writer_task
            .await
            .map_err(|e| DouyinError::IoError(std::io::Error::new(std::io::ErrorKind::Other, e)))??;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::core::{Resolver, WorkDir};
    use crate::download::VideoDownloader;
    use crate::platform::VideoClient;
    use crate::tools::DouyinTools;
    use serde_json::Value;
    use tempfile::TempDir;
    use tokio::io::AsyncReadExt;

    #[tokio::test]
    async fn test_serve_answers_every_request() {
        let temp = TempDir::new().unwrap();
        let config = Arc::new(Config::new().with_work_dir(temp.path()));
        let client = VideoClient::new().unwrap();
        let resolver = Arc::new(Resolver::new(client.clone(), config.clone()).unwrap());
        let downloader = Arc::new(VideoDownloader::new(
            client,
            WorkDir::ensure(temp.path()).unwrap(),
        ));
        let server = Arc::new(McpServer::new(
            DouyinTools::new(resolver, downloader, config.clone()),
            config,
        ));

        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/list"}"#,
            "\n",
            r#"{"jsonrpc":"2.0","id":3,"method":"ping"}"#,
            "\n",
        );

        let (writer, mut output) = tokio::io::duplex(64 * 1024);
        StdioTransport::serve(server, input.as_bytes(), writer)
            .await
            .unwrap();

        let mut text = String::new();
        output.read_to_string(&mut text).await.unwrap();

        let mut ids: Vec<i64> = text
            .lines()
            .map(|line| serde_json::from_str::<Value>(line).unwrap())
            .map(|value| value["id"].as_i64().unwrap())
            .collect();
        ids.sort();
        assert_eq!(ids, vec![1, 2, 3]);
    }
}
