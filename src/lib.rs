//! Countries MCP Server Library
//!
//! A Model Context Protocol (MCP) server exposing country data from the
//! REST Countries API as tools, prompts, and resources.

pub mod config;
pub mod countries;
pub mod error;
pub mod mcp;
pub mod variants;

pub use config::Config;
pub use error::{CountriesMcpError, Result};
