//! Error types for the Countries MCP Server
//!
//! This module defines the error hierarchy for all operations in the server.

use thiserror::Error;

/// Main error type for the Countries MCP Server
#[derive(Error, Debug)]
pub enum CountriesMcpError {
    /// Capability registration errors
    #[error("Registry error: {0}")]
    Registry(#[from] RegistryError),

    /// REST Countries API errors
    #[error("Countries API error: {0}")]
    Api(#[from] CountriesApiError),

    /// Validation errors
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    /// MCP protocol errors
    #[error("MCP protocol error: {0}")]
    Mcp(#[from] McpError),

    /// I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP client errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// Capability registration errors
///
/// Registration happens once at startup; any of these is fatal.
#[derive(Error, Debug)]
pub enum RegistryError {
    #[error("Duplicate {kind} name: {name}")]
    DuplicateName { kind: &'static str, name: String },

    #[error("Invalid URI template '{template}': {message}")]
    InvalidTemplate { template: String, message: String },
}

/// REST Countries API errors
#[derive(Error, Debug)]
pub enum CountriesApiError {
    #[error("API request failed: {message}")]
    RequestFailed { message: String },

    #[error("Unexpected response payload: {message}")]
    UnexpectedPayload { message: String },
}

/// Validation errors
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid type for field {field}: expected {expected}")]
    TypeMismatch { field: String, expected: &'static str },

    #[error("Arguments must be a JSON object")]
    NotAnObject,
}

/// MCP protocol errors
#[derive(Error, Debug)]
pub enum McpError {
    #[error("Unknown tool: {name}")]
    UnknownTool { name: String },

    #[error("Unknown prompt: {name}")]
    UnknownPrompt { name: String },

    #[error("Unknown resource: {uri}")]
    UnknownResource { uri: String },

    #[error("Protocol error: {message}")]
    ProtocolError { message: String },
}

/// Result type alias for Countries MCP operations
pub type Result<T> = std::result::Result<T, CountriesMcpError>;
