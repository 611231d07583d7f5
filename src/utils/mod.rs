//! Utility functions for douyin-mcp

pub mod filename;
pub mod id;
pub mod url;

pub use filename::*;
pub use id::*;
pub use self::url::*;
