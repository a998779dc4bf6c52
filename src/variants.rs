//! Demo variant registration sets
//!
//! The repository models a sequence of progressively-extended demo servers:
//! `basic` registers a single lookup tool, `prompts` adds the prompt/tool
//! pairs, and `full` adds the resource surface on top. Each function builds
//! a complete registry; nothing is registered after startup.

use std::sync::Arc;

use futures::FutureExt;
use serde::Deserialize;
use serde_json::Value;

use crate::countries::client::CountriesClient;
use crate::countries::filter::names_in_region;
use crate::error::{Result, ValidationError};
use crate::mcp::registry::{PromptDef, Registry, ResourceDef, ResourceRequest, ToolDef};
use crate::mcp::schema::{InputSchema, ParamSpec, ParamType};
use crate::mcp::types::{
    CallToolResult, GetPromptResult, PromptMessage, ReadResourceResult, ResourceContent,
    ResourceDescriptor,
};

/// Deserialized arguments for the country-name capabilities
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CountryNameArgs {
    country_name: String,
}

fn country_name_schema() -> InputSchema {
    InputSchema::new(vec![ParamSpec {
        name: "countryName",
        kind: ParamType::String,
        description: "The name of the country to get",
        required: true,
    }])
}

// ==================== Variants ====================

/// Minimal server: a single country lookup tool
pub fn basic(client: Arc<CountriesClient>) -> Result<Registry> {
    let mut registry = Registry::new();
    registry.register_tool(get_a_country_tool(&client))?;
    Ok(registry)
}

/// Tools plus prompts
pub fn prompts(client: Arc<CountriesClient>) -> Result<Registry> {
    let mut registry = Registry::new();
    registry.register_prompt(get_all_countries_prompt())?;
    registry.register_prompt(get_a_country_prompt())?;
    registry.register_tool(get_all_countries_tool(&client))?;
    registry.register_tool(get_a_country_tool(&client))?;
    Ok(registry)
}

/// The full server: tools, prompts, and resources
pub fn full(client: Arc<CountriesClient>) -> Result<Registry> {
    let mut registry = prompts(client.clone())?;
    registry.register_resource(greeting_resource())?;
    registry.register_resource(all_countries_resource(&client))?;
    registry.register_resource(european_countries_resource(&client))?;
    registry.register_resource(country_resource(&client))?;
    Ok(registry)
}

// ==================== Tools ====================

fn get_all_countries_tool(client: &Arc<CountriesClient>) -> ToolDef {
    let client = client.clone();
    ToolDef {
        name: "get-all-countries",
        title: "Get all countries",
        description: "Tool to get all countries from the REST API",
        schema: InputSchema::empty(),
        handler: Box::new(move |_args: Value| {
            let client = client.clone();
            async move {
                let data = client.fetch_all().await?;
                Ok(CallToolResult::text(serde_json::to_string(&data)?))
            }
            .boxed()
        }),
    }
}

fn get_a_country_tool(client: &Arc<CountriesClient>) -> ToolDef {
    let client = client.clone();
    ToolDef {
        name: "get-a-country",
        title: "Get a specific country details",
        description:
            "Tool to get a specific country details from the REST API based on country name",
        schema: country_name_schema(),
        handler: Box::new(move |args: Value| {
            let client = client.clone();
            async move {
                let args: CountryNameArgs = serde_json::from_value(args)?;
                let text = client.fetch_by_name(&args.country_name).await?;
                Ok(CallToolResult::text(text))
            }
            .boxed()
        }),
    }
}

// ==================== Prompts ====================

fn get_all_countries_prompt() -> PromptDef {
    PromptDef {
        name: "get-all-countries-prompt",
        title: "Get all countries details",
        description: "Get all countries details from the REST API",
        schema: InputSchema::empty(),
        handler: Box::new(|_args| {
            Ok(GetPromptResult {
                description: None,
                messages: vec![PromptMessage::user(
                    "Use tool to get all countries details from the REST API",
                )],
            })
        }),
    }
}

fn get_a_country_prompt() -> PromptDef {
    PromptDef {
        name: "get-a-country-prompt",
        title: "Get a specific country details",
        description: "Get a specific country details from the REST API",
        schema: country_name_schema(),
        handler: Box::new(|args| {
            let args: CountryNameArgs = serde_json::from_value(args)?;
            Ok(GetPromptResult {
                description: None,
                messages: vec![PromptMessage::user(format!(
                    "Use tool to get a specific country details \"{}\" from the REST API",
                    args.country_name
                ))],
            })
        }),
    }
}

// ==================== Resources ====================

fn greeting_resource() -> ResourceDef {
    ResourceDef {
        name: "greeting-resource",
        title: "Greeting Resource",
        description: "Static greeting resource",
        template: "greeting://general",
        mime_type: None,
        list: None,
        handler: Box::new(|request: ResourceRequest| {
            async move {
                Ok(ReadResourceResult {
                    contents: vec![ResourceContent::text(request.uri, "Hello, World!")],
                })
            }
            .boxed()
        }),
    }
}

fn all_countries_resource(client: &Arc<CountriesClient>) -> ResourceDef {
    let client = client.clone();
    ResourceDef {
        name: "all-countries-resource",
        title: "All Countries Resource",
        description: "Dynamic list of all countries",
        template: "countries://all",
        mime_type: Some("application/json"),
        list: Some(Box::new(|| {
            async move {
                Ok(vec![ResourceDescriptor {
                    uri: "countries://all".to_string(),
                    name: "All Countries".to_string(),
                    description: Some("A dynamic list of all countries".to_string()),
                    mime_type: Some("application/json".to_string()),
                }])
            }
            .boxed()
        })),
        handler: Box::new(move |request: ResourceRequest| {
            let client = client.clone();
            async move {
                let data = client.fetch_all().await?;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContent::json(
                        request.uri,
                        serde_json::to_string_pretty(&data)?,
                    )],
                })
            }
            .boxed()
        }),
    }
}

fn european_countries_resource(client: &Arc<CountriesClient>) -> ResourceDef {
    let client = client.clone();
    ResourceDef {
        name: "all-european-countries-resource",
        title: "European Countries Resource",
        description:
            "Returns a filtered JSON list of European countries only (safe for LLM context)",
        template: "countries://europe",
        mime_type: Some("application/json"),
        list: Some(Box::new(|| {
            async move {
                Ok(vec![ResourceDescriptor {
                    uri: "countries://europe".to_string(),
                    name: "All European Countries".to_string(),
                    description: Some("Filtered list of countries from Europe".to_string()),
                    mime_type: Some("application/json".to_string()),
                }])
            }
            .boxed()
        })),
        handler: Box::new(move |request: ResourceRequest| {
            let client = client.clone();
            async move {
                let rows = client.fetch_region_rows().await?;
                let names = names_in_region(&rows, "Europe");
                Ok(ReadResourceResult {
                    contents: vec![ResourceContent::json(
                        request.uri,
                        serde_json::to_string_pretty(&names)?,
                    )],
                })
            }
            .boxed()
        }),
    }
}

fn country_resource(client: &Arc<CountriesClient>) -> ResourceDef {
    let client = client.clone();
    ResourceDef {
        name: "country-resource",
        title: "Country Resource",
        description: "Country info based on dynamic name",
        template: "countries://{countryName}",
        mime_type: Some("application/json"),
        list: None,
        handler: Box::new(move |request: ResourceRequest| {
            let client = client.clone();
            async move {
                let country_name = request.params.get("countryName").cloned().ok_or_else(|| {
                    ValidationError::MissingField {
                        field: "countryName".to_string(),
                    }
                })?;
                let body = client.fetch_by_name(&country_name).await?;
                let data: Value = serde_json::from_str(&body)?;
                Ok(ReadResourceResult {
                    contents: vec![ResourceContent::json(
                        request.uri,
                        serde_json::to_string_pretty(&data)?,
                    )],
                })
            }
            .boxed()
        }),
    }
}
