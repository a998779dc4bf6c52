//! Capability registry and dispatch
//!
//! Maps capability names (tools, prompts) and URI templates (resources) to
//! metadata and handlers. The registry is populated once at startup and
//! shared immutably afterward; duplicate names within a kind fail
//! registration.
//!
//! Dispatch applies one recovery policy per kind: tool failures become
//! `isError` results, resource failures become empty contents, and prompt
//! failures surface as protocol errors. No handler fault reaches the
//! transport loop as a crash.

use std::collections::BTreeMap;

use futures::future::BoxFuture;
use serde_json::Value;
use tracing::warn;

use crate::error::{McpError, RegistryError, Result};
use crate::mcp::schema::InputSchema;
use crate::mcp::types::{
    CallToolResult, GetPromptResult, Prompt, ReadResourceResult, ResourceDescriptor,
    ResourceTemplateDescriptor, Tool,
};
use crate::mcp::uri::UriTemplate;

/// Async tool handler, from validated arguments to a tool result
pub type ToolHandlerFn =
    Box<dyn Fn(Value) -> BoxFuture<'static, Result<CallToolResult>> + Send + Sync>;

/// Synchronous prompt handler (prompts never touch the network)
pub type PromptHandlerFn = Box<dyn Fn(Value) -> Result<GetPromptResult> + Send + Sync>;

/// Async resource handler, from a matched read request to resource contents
pub type ResourceHandlerFn =
    Box<dyn Fn(ResourceRequest) -> BoxFuture<'static, Result<ReadResourceResult>> + Send + Sync>;

/// Async listing function for an enumerable resource
pub type ResourceListFn =
    Box<dyn Fn() -> BoxFuture<'static, Result<Vec<ResourceDescriptor>>> + Send + Sync>;

/// A matched resource read request
#[derive(Debug, Clone)]
pub struct ResourceRequest {
    /// The URI as requested by the client
    pub uri: String,

    /// Placeholder values extracted from the URI, keyed by placeholder name
    pub params: BTreeMap<String, String>,
}

/// Tool registration
pub struct ToolDef {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub schema: InputSchema,
    pub handler: ToolHandlerFn,
}

/// Prompt registration
pub struct PromptDef {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    pub schema: InputSchema,
    pub handler: PromptHandlerFn,
}

/// Resource registration
pub struct ResourceDef {
    pub name: &'static str,
    pub title: &'static str,
    pub description: &'static str,
    /// URI template string, compiled at registration
    pub template: &'static str,
    pub mime_type: Option<&'static str>,
    /// Listing function for enumerable resources
    pub list: Option<ResourceListFn>,
    pub handler: ResourceHandlerFn,
}

struct ToolEntry {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    schema: InputSchema,
    handler: ToolHandlerFn,
}

struct PromptEntry {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    schema: InputSchema,
    handler: PromptHandlerFn,
}

struct ResourceEntry {
    name: &'static str,
    title: &'static str,
    description: &'static str,
    template: UriTemplate,
    mime_type: Option<&'static str>,
    list: Option<ResourceListFn>,
    handler: ResourceHandlerFn,
}

/// Capability registry
///
/// Entries keep registration order, which is also listing order.
#[derive(Default)]
pub struct Registry {
    tools: Vec<ToolEntry>,
    prompts: Vec<PromptEntry>,
    resources: Vec<ResourceEntry>,
}

impl Registry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    // ==================== Registration ====================

    /// Register a tool; fails on a duplicate name
    pub fn register_tool(&mut self, def: ToolDef) -> Result<()> {
        if self.tools.iter().any(|t| t.name == def.name) {
            return Err(RegistryError::DuplicateName {
                kind: "tool",
                name: def.name.to_string(),
            }
            .into());
        }

        self.tools.push(ToolEntry {
            name: def.name,
            title: def.title,
            description: def.description,
            schema: def.schema,
            handler: def.handler,
        });
        Ok(())
    }

    /// Register a prompt; fails on a duplicate name
    pub fn register_prompt(&mut self, def: PromptDef) -> Result<()> {
        if self.prompts.iter().any(|p| p.name == def.name) {
            return Err(RegistryError::DuplicateName {
                kind: "prompt",
                name: def.name.to_string(),
            }
            .into());
        }

        self.prompts.push(PromptEntry {
            name: def.name,
            title: def.title,
            description: def.description,
            schema: def.schema,
            handler: def.handler,
        });
        Ok(())
    }

    /// Register a resource; fails on a duplicate name or a bad template
    pub fn register_resource(&mut self, def: ResourceDef) -> Result<()> {
        if self.resources.iter().any(|r| r.name == def.name) {
            return Err(RegistryError::DuplicateName {
                kind: "resource",
                name: def.name.to_string(),
            }
            .into());
        }

        let template = UriTemplate::parse(def.template)?;
        self.resources.push(ResourceEntry {
            name: def.name,
            title: def.title,
            description: def.description,
            template,
            mime_type: def.mime_type,
            list: def.list,
            handler: def.handler,
        });
        Ok(())
    }

    // ==================== Introspection ====================

    pub fn has_tools(&self) -> bool {
        !self.tools.is_empty()
    }

    pub fn has_prompts(&self) -> bool {
        !self.prompts.is_empty()
    }

    pub fn has_resources(&self) -> bool {
        !self.resources.is_empty()
    }

    /// Tool listing in registration order
    pub fn list_tools(&self) -> Vec<Tool> {
        self.tools
            .iter()
            .map(|entry| Tool {
                name: entry.name.to_string(),
                title: Some(entry.title.to_string()),
                description: Some(entry.description.to_string()),
                input_schema: entry.schema.to_json_schema(),
            })
            .collect()
    }

    /// Prompt listing in registration order
    pub fn list_prompts(&self) -> Vec<Prompt> {
        self.prompts
            .iter()
            .map(|entry| Prompt {
                name: entry.name.to_string(),
                title: Some(entry.title.to_string()),
                description: Some(entry.description.to_string()),
                arguments: entry.schema.prompt_arguments(),
            })
            .collect()
    }

    /// Template listing in registration order
    pub fn list_resource_templates(&self) -> Vec<ResourceTemplateDescriptor> {
        self.resources
            .iter()
            .map(|entry| ResourceTemplateDescriptor {
                uri_template: entry.template.as_str().to_string(),
                name: entry.name.to_string(),
                title: Some(entry.title.to_string()),
                description: Some(entry.description.to_string()),
                mime_type: entry.mime_type.map(str::to_string),
            })
            .collect()
    }

    /// Concrete resources, aggregated from the declared listing functions
    ///
    /// A failed lister contributes nothing; the listing itself never fails.
    pub async fn list_resources(&self) -> Vec<ResourceDescriptor> {
        let mut resources = Vec::new();
        for entry in &self.resources {
            if let Some(list) = &entry.list {
                match list().await {
                    Ok(described) => resources.extend(described),
                    Err(e) => {
                        warn!(resource = entry.name, error = %e, "resource listing failed");
                    }
                }
            }
        }
        resources
    }

    // ==================== Dispatch ====================

    /// Dispatch a tool call
    ///
    /// Unknown names, invalid arguments, and handler failures all surface as
    /// error results, never as faults.
    pub async fn call_tool(&self, name: &str, args: Value) -> CallToolResult {
        let Some(entry) = self.tools.iter().find(|t| t.name == name) else {
            return CallToolResult::error(format!("Unknown tool: {}", name));
        };

        if let Err(e) = entry.schema.validate(&args) {
            return CallToolResult::error(format!("Invalid arguments: {}", e));
        }

        match (entry.handler)(args).await {
            Ok(result) => result,
            Err(e) => {
                warn!(tool = name, error = %e, "tool handler failed");
                CallToolResult::error(e.to_string())
            }
        }
    }

    /// Dispatch a prompt get
    pub fn get_prompt(&self, name: &str, args: Value) -> Result<GetPromptResult> {
        let entry = self
            .prompts
            .iter()
            .find(|p| p.name == name)
            .ok_or_else(|| McpError::UnknownPrompt {
                name: name.to_string(),
            })?;

        entry.schema.validate(&args)?;
        (entry.handler)(args)
    }

    /// Dispatch a resource read
    ///
    /// The requested URI is matched against every registered template by
    /// ordered segment comparison; when several match, the most specific
    /// wins (fewest placeholders). Handler failures surface as an empty
    /// contents list.
    pub async fn read_resource(&self, uri: &str) -> Result<ReadResourceResult> {
        let matched = self
            .resources
            .iter()
            .filter_map(|entry| {
                entry
                    .template
                    .match_uri(uri)
                    .map(|params| (entry, params))
            })
            .min_by_key(|(entry, _)| entry.template.placeholder_count());

        let Some((entry, params)) = matched else {
            return Err(McpError::UnknownResource {
                uri: uri.to_string(),
            }
            .into());
        };

        let request = ResourceRequest {
            uri: uri.to_string(),
            params,
        };

        match (entry.handler)(request).await {
            Ok(result) => Ok(result),
            Err(e) => {
                warn!(resource = entry.name, uri, error = %e, "resource handler failed");
                Ok(ReadResourceResult::empty())
            }
        }
    }
}
