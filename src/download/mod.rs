//! Download system for douyin-mcp

pub mod downloader;

pub use downloader::*;
