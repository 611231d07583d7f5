//! Request routing for the MCP server

use super::protocol::*;
use crate::config::Config;
use crate::tools::{
    download_guide, prompt_definitions, resource_templates, tool_definitions, DouyinTools,
    ShareTextArgs, ToolOutput, DOWNLOAD_GUIDE, DOWNLOAD_VIDEO, GET_DOWNLOAD_LINK,
    LEGACY_DOWNLOAD_VIDEO, LEGACY_GET_DOWNLOAD_LINK, LEGACY_PARSE_VIDEO_INFO, PARSE_VIDEO_INFO,
};
use crate::utils::parse_resource_uri;
use serde::Deserialize;
use serde_json::{json, Value};
use std::sync::Arc;
use tracing::{debug, info, warn};

#[derive(Debug, Deserialize)]
struct CallToolParams {
    name: String,
    #[serde(default)]
    arguments: Value,
}

#[derive(Debug, Deserialize)]
struct ReadResourceParams {
    uri: String,
}

#[derive(Debug, Deserialize)]
struct GetPromptParams {
    name: String,
}

/// Routes JSON-RPC requests to the tool façade
pub struct McpServer {
    tools: DouyinTools,
    config: Arc<Config>,
}

impl McpServer {
    /// Create a new server
    pub fn new(tools: DouyinTools, config: Arc<Config>) -> Self {
        Self { tools, config }
    }

    /// Handle one raw line; returns the serialized response, if any
    pub async fn handle_line(&self, line: &str) -> Option<String> {
        let value = match serde_json::from_str::<Value>(line) {
            Ok(value) => value,
            Err(e) => {
                warn!("Unparsable request: {}", e);
                return serialize(JsonRpcResponse::failure(
                    Value::Null,
                    JsonRpcError::new(PARSE_ERROR, format!("Parse error: {}", e)),
                ));
            }
        };

        let id = value.get("id").cloned().unwrap_or(Value::Null);
        let response = match serde_json::from_value::<JsonRpcRequest>(value) {
            Ok(request) => self.handle(request).await?,
            Err(e) => {
                warn!("Malformed request: {}", e);
                JsonRpcResponse::failure(
                    id,
                    JsonRpcError::invalid_request(format!("Invalid request: {}", e)),
                )
            }
        };

        serialize(response)
    }

    /// Handle a parsed request; notifications produce no response
    pub async fn handle(&self, request: JsonRpcRequest) -> Option<JsonRpcResponse> {
        if request.is_notification() {
            debug!("Notification: {}", request.method);
            return None;
        }

        let id = request.id.clone().unwrap_or(Value::Null);
        if request.jsonrpc != "2.0" {
            return Some(JsonRpcResponse::failure(
                id,
                JsonRpcError::invalid_request("jsonrpc must be \"2.0\""),
            ));
        }

        debug!("Request {}: {}", id, request.method);
        let response = match self.dispatch(&request.method, request.params).await {
            Ok(result) => JsonRpcResponse::success(id, result),
            Err(error) => JsonRpcResponse::failure(id, error),
        };
        Some(response)
    }

    async fn dispatch(&self, method: &str, params: Option<Value>) -> Result<Value, JsonRpcError> {
        let params = params.unwrap_or(Value::Null);

        match method {
            "initialize" => Ok(self.initialize()),
            "ping" => Ok(json!({})),
            "tools/list" => Ok(json!({ "tools": tool_definitions() })),
            "tools/call" => self.call_tool(parse_params(params)?).await,
            "resources/list" => Ok(json!({ "resources": self.tools.downloaded_resources() })),
            "resources/templates/list" => {
                Ok(json!({ "resourceTemplates": resource_templates() }))
            }
            "resources/read" => self.read_resource(parse_params(params)?).await,
            "prompts/list" => Ok(json!({ "prompts": prompt_definitions() })),
            "prompts/get" => self.get_prompt(parse_params(params)?),
            other => Err(JsonRpcError::method_not_found(other)),
        }
    }

    fn initialize(&self) -> Value {
        info!("Client initialized");
        json!({
            "protocolVersion": MCP_PROTOCOL_VERSION,
            "capabilities": {
                "tools": { "listChanged": false },
                "resources": {},
                "prompts": {}
            },
            "serverInfo": {
                "name": env!("CARGO_PKG_NAME"),
                "version": env!("CARGO_PKG_VERSION")
            }
        })
    }

    async fn call_tool(&self, params: CallToolParams) -> Result<Value, JsonRpcError> {
        let args: ShareTextArgs = serde_json::from_value(params.arguments)
            .map_err(|e| JsonRpcError::invalid_params(format!("Invalid arguments: {}", e)))?;
        info!("Calling tool {}", params.name);

        match params.name.as_str() {
            GET_DOWNLOAD_LINK | LEGACY_GET_DOWNLOAD_LINK => {
                tool_response(&self.tools.get_download_link(&args.share_text).await)
            }
            DOWNLOAD_VIDEO | LEGACY_DOWNLOAD_VIDEO => {
                tool_response(&self.tools.download_video(&args.share_text).await)
            }
            PARSE_VIDEO_INFO | LEGACY_PARSE_VIDEO_INFO => {
                tool_response(&self.tools.parse_video_info(&args.share_text).await)
            }
            other => Err(JsonRpcError::invalid_params(format!("Unknown tool: {}", other))),
        }
    }

    async fn read_resource(&self, params: ReadResourceParams) -> Result<Value, JsonRpcError> {
        let video_id = parse_resource_uri(&params.uri)
            .map_err(|e| JsonRpcError::invalid_params(e.to_string()))?;
        let text = self.tools.video_resource(&video_id).await;

        Ok(json!({
            "contents": [{
                "uri": params.uri,
                "mimeType": "text/plain",
                "text": text
            }]
        }))
    }

    fn get_prompt(&self, params: GetPromptParams) -> Result<Value, JsonRpcError> {
        if params.name != DOWNLOAD_GUIDE {
            return Err(JsonRpcError::invalid_params(format!(
                "Unknown prompt: {}",
                params.name
            )));
        }

        let guide = download_guide(&self.config.work_dir.display().to_string());
        Ok(json!({
            "description": "How to use the Douyin parsing and download tools",
            "messages": [{
                "role": "user",
                "content": { "type": "text", "text": guide }
            }]
        }))
    }
}

fn serialize(response: JsonRpcResponse) -> Option<String> {
    match serde_json::to_string(&response) {
        Ok(text) => Some(text),
        Err(e) => {
            warn!("Could not serialize response: {}", e);
            None
        }
    }
}

fn parse_params<T: for<'de> Deserialize<'de>>(params: Value) -> Result<T, JsonRpcError> {
    serde_json::from_value(params)
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid params: {}", e)))
}

fn tool_response<T: ToolOutput>(output: &T) -> Result<Value, JsonRpcError> {
    let structured = serde_json::to_value(output)
        .map_err(|e| JsonRpcError::new(INTERNAL_ERROR, e.to_string()))?;

    Ok(json!({
        "content": [{ "type": "text", "text": output.render() }],
        "structuredContent": structured,
        "isError": output.is_error()
    }))
}
