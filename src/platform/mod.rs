//! Video platform HTTP client and page extraction

pub mod client;
pub mod extract;

pub use client::*;
pub use extract::*;
