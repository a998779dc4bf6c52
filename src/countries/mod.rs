//! REST Countries API module
//!
//! Contains types, the HTTP client, and filtering helpers for the REST
//! Countries API.

pub mod client;
pub mod filter;
pub mod types;
