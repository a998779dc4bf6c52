//! MCP protocol module
//!
//! Contains the wire types, capability schemas, URI templates, the
//! registry/dispatch layer, and the stdio server.

pub mod registry;
pub mod schema;
pub mod server;
pub mod types;
pub mod uri;
