//! Tool façade: tool handlers, declarations and prompts

pub mod definitions;
pub mod douyin;
pub mod prompts;

pub use definitions::*;
pub use douyin::*;
pub use prompts::*;
