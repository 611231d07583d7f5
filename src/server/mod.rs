//! Line-delimited JSON-RPC 2.0 server over stdio.
//!
//! Exposes the Douyin tools, the video resource template and the usage
//! guide prompt using MCP method names. Every request is handled on its own
//! task; responses are written back one JSON object per line.

pub mod handler;
pub mod protocol;
pub mod transport;

pub use handler::McpServer;
pub use protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse, MCP_PROTOCOL_VERSION};
pub use transport::StdioTransport;
