//! Main entry point for douyin-mcp

use clap::Parser;
use douyin_mcp::cli::{Args, Command, OutputFormatter};
use douyin_mcp::platform::HttpClientConfig;
use douyin_mcp::server::{McpServer, StdioTransport};
use douyin_mcp::tools::ToolOutput;
use douyin_mcp::{
    DouyinTools, DownloadProgress, ProgressCallback, Resolver, VideoClient, VideoDownloader,
    WorkDir,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    init_logging(args.log_level())?;

    let config = Arc::new(args.to_config());
    let formatter = Arc::new(OutputFormatter::new(args.verbosity_level()));

    // Startup failures are the only fatal condition
    let workdir = match WorkDir::ensure(&config.work_dir) {
        Ok(workdir) => workdir,
        Err(e) => {
            error!("{}", e);
            formatter.error(&format!("{} (check the path and write permissions)", e));
            std::process::exit(1);
        }
    };

    let client = VideoClient::with_config(HttpClientConfig::from(config.as_ref()))?;
    let resolver = Arc::new(Resolver::new(client.clone(), config.clone())?);
    let downloader = Arc::new(VideoDownloader::new(client, workdir.clone()));
    let tools = DouyinTools::new(resolver.clone(), downloader.clone(), config.clone());

    match args.command() {
        Command::Serve => {
            info!(
                "Starting douyin-mcp server, working directory: {}",
                workdir.path().display()
            );
            let server = Arc::new(McpServer::new(tools, config.clone()));
            StdioTransport::run(server).await?;
            info!("Server stopped");
        }
        Command::Link { share_text } => {
            let result = tools.get_download_link(&share_text).await;
            report(&formatter, &result);
        }
        Command::Info { share_text } => {
            let result = tools.parse_video_info(&share_text).await;
            report(&formatter, &result);
        }
        Command::Download { share_text } => {
            handle_download(&resolver, &downloader, &share_text, &formatter).await;
        }
        Command::List => {
            for name in workdir.list()? {
                println!("{}", name);
            }
        }
        Command::Clear => {
            let report = workdir.clear()?;
            formatter.print_clear_report(&report);
        }
    }

    Ok(())
}

/// Resolve and download with a progress bar
async fn handle_download(
    resolver: &Resolver,
    downloader: &VideoDownloader,
    share_text: &str,
    formatter: &Arc<OutputFormatter>,
) {
    let info = match resolver.resolve(share_text).await {
        Ok(info) => info,
        Err(e) => {
            formatter.error(&e.to_string());
            std::process::exit(1);
        }
    };
    formatter.success(&format!("📱 {} ({})", info.title, info.video_id));

    let progress_formatter = formatter.clone();
    let update = move |progress: DownloadProgress| progress_formatter.update_progress(&progress);
    let callback: &ProgressCallback = &update;
    let outcome = downloader.download(&info, Some(callback)).await;
    formatter.finish_progress();

    match outcome {
        Ok(path) => formatter.success(&format!("✅ Saved to {}", path.display())),
        Err(e) => {
            formatter.error(&e.to_string());
            std::process::exit(1);
        }
    }
}

/// Print a tool result and exit non-zero on failure
fn report<T: ToolOutput>(formatter: &OutputFormatter, result: &T) {
    formatter.result(&result.render(), result.is_error());
    if result.is_error() {
        std::process::exit(1);
    }
}

/// Initialize logging system; logs go to stderr since stdout carries the protocol
fn init_logging(default_level: &str) -> anyhow::Result<()> {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(default_level));

    tracing_subscriber::registry()
        .with(filter)
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false)
                .compact(),
        )
        .try_init()?;

    Ok(())
}
