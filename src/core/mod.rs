//! Core functionality for douyin-mcp

pub mod progress;
pub mod resolver;
pub mod video_info;
pub mod workdir;

pub use progress::*;
pub use resolver::*;
pub use video_info::*;
pub use workdir::*;
