//! MCP Server implementation
//!
//! Implements the Model Context Protocol server for stdio transport. The
//! server owns nothing but a shared registry reference; every capability
//! was registered before the loop starts.

use std::io::{BufRead, Write};
use std::sync::Arc;

use serde_json::Value;
use tracing::info;

use crate::error::{CountriesMcpError, McpError, Result};
use crate::mcp::registry::Registry;
use crate::mcp::types::*;

/// MCP Server info
const SERVER_NAME: &str = "mcp-server-countries";
const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");

/// MCP Server for country data
pub struct McpServer {
    /// Capability registry, immutable after startup
    registry: Arc<Registry>,

    /// Whether initialized
    initialized: bool,
}

impl McpServer {
    /// Create a new MCP server over a populated registry
    pub fn new(registry: Arc<Registry>) -> Self {
        Self {
            registry,
            initialized: false,
        }
    }

    /// Run the server on stdio
    pub async fn run_stdio(&mut self) -> Result<()> {
        info!(
            tools = self.registry.list_tools().len(),
            prompts = self.registry.list_prompts().len(),
            resource_templates = self.registry.list_resource_templates().len(),
            "serving MCP on stdio"
        );

        let stdin = std::io::stdin();
        let mut stdout = std::io::stdout();

        let reader = stdin.lock();

        for line in reader.lines() {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }

            match self.handle_message(&line).await {
                Ok(Some(response)) => {
                    let response_str = serde_json::to_string(&response)?;
                    writeln!(stdout, "{}", response_str)?;
                    stdout.flush()?;
                }
                Ok(None) => {
                    // Notification, no response needed
                }
                Err(e) => {
                    eprintln!("Error handling message: {}", e);
                }
            }
        }

        Ok(())
    }

    /// Handle an incoming JSON-RPC message
    pub async fn handle_message(&mut self, message: &str) -> Result<Option<JsonRpcResponse>> {
        // Try to parse as request
        let request: JsonRpcRequest = match serde_json::from_str(message) {
            Ok(req) => req,
            Err(e) => {
                return Ok(Some(JsonRpcResponse::error(
                    RequestId::Number(0),
                    JsonRpcError::parse_error(e.to_string()),
                )));
            }
        };

        // Handle the request
        match request.method.as_str() {
            methods::INITIALIZE => {
                let result = self.handle_initialize()?;
                Ok(Some(JsonRpcResponse::success(request.id, result)))
            }
            methods::INITIALIZED => {
                self.initialized = true;
                Ok(None) // Notification, no response
            }
            methods::PING => Ok(Some(JsonRpcResponse::success(
                request.id,
                serde_json::json!({}),
            ))),
            methods::LIST_TOOLS => {
                let result = serde_json::to_value(ListToolsResult {
                    tools: self.registry.list_tools(),
                })?;
                Ok(Some(JsonRpcResponse::success(request.id, result)))
            }
            methods::CALL_TOOL => {
                let result = self.handle_call_tool(&request).await;
                Ok(Some(JsonRpcResponse::success(request.id, result)))
            }
            methods::LIST_PROMPTS => {
                let result = serde_json::to_value(ListPromptsResult {
                    prompts: self.registry.list_prompts(),
                })?;
                Ok(Some(JsonRpcResponse::success(request.id, result)))
            }
            methods::GET_PROMPT => {
                let response = match self.handle_get_prompt(&request) {
                    Ok(result) => JsonRpcResponse::success(request.id, result),
                    Err(e) => JsonRpcResponse::error(request.id, e),
                };
                Ok(Some(response))
            }
            methods::LIST_RESOURCES => {
                let result = serde_json::to_value(ListResourcesResult {
                    resources: self.registry.list_resources().await,
                })?;
                Ok(Some(JsonRpcResponse::success(request.id, result)))
            }
            methods::LIST_RESOURCE_TEMPLATES => {
                let result = serde_json::to_value(ListResourceTemplatesResult {
                    resource_templates: self.registry.list_resource_templates(),
                })?;
                Ok(Some(JsonRpcResponse::success(request.id, result)))
            }
            methods::READ_RESOURCE => {
                let response = match self.handle_read_resource(&request).await {
                    Ok(result) => JsonRpcResponse::success(request.id, result),
                    Err(e) => JsonRpcResponse::error(request.id, e),
                };
                Ok(Some(response))
            }
            _ => Ok(Some(JsonRpcResponse::error(
                request.id,
                JsonRpcError::method_not_found(&request.method),
            ))),
        }
    }

    /// Handle initialize request
    fn handle_initialize(&self) -> Result<Value> {
        let result = InitializeResult {
            protocol_version: MCP_VERSION.to_string(),
            server_info: ServerInfo {
                name: SERVER_NAME.to_string(),
                version: SERVER_VERSION.to_string(),
            },
            capabilities: ServerCapabilities {
                tools: self.registry.has_tools().then(ToolsCapability::default),
                resources: self
                    .registry
                    .has_resources()
                    .then(ResourcesCapability::default),
                prompts: self.registry.has_prompts().then(PromptsCapability::default),
            },
        };

        Ok(serde_json::to_value(result)?)
    }

    /// Handle call tool request
    async fn handle_call_tool(&self, request: &JsonRpcRequest) -> Value {
        let params: CallToolParams = match request.params.as_ref() {
            Some(p) => match serde_json::from_value(p.clone()) {
                Ok(params) => params,
                Err(e) => {
                    return serde_json::to_value(CallToolResult::error(format!(
                        "Invalid tool parameters: {}",
                        e
                    )))
                    .unwrap_or_default();
                }
            },
            None => {
                return serde_json::to_value(CallToolResult::error("Missing tool parameters"))
                    .unwrap_or_default();
            }
        };

        let result = self.registry.call_tool(&params.name, params.arguments).await;
        serde_json::to_value(result).unwrap_or_else(|e| {
            serde_json::to_value(CallToolResult::error(e.to_string())).unwrap_or_default()
        })
    }

    /// Handle get prompt request
    fn handle_get_prompt(
        &self,
        request: &JsonRpcRequest,
    ) -> std::result::Result<Value, JsonRpcError> {
        let params: GetPromptParams = parse_params(request)?;
        let result = self
            .registry
            .get_prompt(&params.name, params.arguments)
            .map_err(rpc_error)?;
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }

    /// Handle read resource request
    async fn handle_read_resource(
        &self,
        request: &JsonRpcRequest,
    ) -> std::result::Result<Value, JsonRpcError> {
        let params: ReadResourceParams = parse_params(request)?;
        let result = self
            .registry
            .read_resource(&params.uri)
            .await
            .map_err(rpc_error)?;
        serde_json::to_value(result).map_err(|e| JsonRpcError::internal_error(e.to_string()))
    }
}

/// Parse typed params from a request, mapping failures to invalid-params
fn parse_params<T: serde::de::DeserializeOwned>(
    request: &JsonRpcRequest,
) -> std::result::Result<T, JsonRpcError> {
    let params = request
        .params
        .as_ref()
        .ok_or_else(|| JsonRpcError::invalid_params("Missing parameters"))?;
    serde_json::from_value(params.clone())
        .map_err(|e| JsonRpcError::invalid_params(format!("Invalid parameters: {}", e)))
}

/// Map an internal error to the matching JSON-RPC error
fn rpc_error(err: CountriesMcpError) -> JsonRpcError {
    match &err {
        CountriesMcpError::Validation(_) => JsonRpcError::invalid_params(err.to_string()),
        CountriesMcpError::Mcp(McpError::UnknownResource { .. }) => {
            JsonRpcError::resource_not_found(err.to_string())
        }
        CountriesMcpError::Mcp(McpError::UnknownPrompt { .. }) => {
            JsonRpcError::invalid_params(err.to_string())
        }
        _ => JsonRpcError::internal_error(err.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::block_on;

    fn empty_server() -> McpServer {
        McpServer::new(Arc::new(Registry::new()))
    }

    #[test]
    fn test_server_info() {
        assert_eq!(SERVER_NAME, "mcp-server-countries");
    }

    #[test]
    fn test_initialize_advertises_no_capabilities_when_empty() {
        let server = empty_server();
        let result = server.handle_initialize().unwrap();
        assert!(result["capabilities"]["tools"].is_null());
        assert!(result["capabilities"]["prompts"].is_null());
        assert!(result["capabilities"]["resources"].is_null());
        assert_eq!(result["serverInfo"]["name"], "mcp-server-countries");
    }

    #[test]
    fn test_unknown_method() {
        let mut server = empty_server();
        let response = block_on(
            server.handle_message(r#"{"jsonrpc":"2.0","id":7,"method":"tools/destroy"}"#),
        )
        .unwrap()
        .unwrap();
        assert_eq!(response.error.unwrap().code, -32601);
    }

    #[test]
    fn test_parse_error_response() {
        let mut server = empty_server();
        let response = block_on(server.handle_message("{not json"))
            .unwrap()
            .unwrap();
        assert_eq!(response.error.unwrap().code, -32700);
    }

    #[test]
    fn test_initialized_notification_has_no_response() {
        let mut server = empty_server();
        let response = block_on(server.handle_message(
            r#"{"jsonrpc":"2.0","id":1,"method":"notifications/initialized"}"#,
        ))
        .unwrap();
        assert!(response.is_none());
        assert!(server.initialized);
    }

    #[test]
    fn test_ping() {
        let mut server = empty_server();
        let response = block_on(server.handle_message(r#"{"jsonrpc":"2.0","id":2,"method":"ping"}"#))
            .unwrap()
            .unwrap();
        assert!(response.error.is_none());
    }
}
