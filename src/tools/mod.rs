//! Tool registry and implementations for external provider calls.
//!
//! This module provides:
//! - Declarative input schemas with validation ahead of any request
//! - Tool registry for discovery and invocation by name
//! - Built-in tools: Brave web search, Wikipedia lookup
//!
//! # Tool Lifecycle
//!
//! 1. Tool is constructed once with its configuration
//! 2. The orchestrator invokes it with JSON arguments
//! 3. Arguments are validated against the tool's schema
//! 4. The tool makes one provider request and returns a string
//!
//! # Module Structure
//!
//! - `schema`: RequestSchema, ParamSpec, ValidatedArguments, ValidationError
//! - `types`: Core types (Tool trait, ToolCallInput, ToolError)
//! - `registry`: ToolRegistry for managing and invoking tools
//! - `config`: Provider configuration and environment loading
//! - `search`: Brave Search tool
//! - `wikipedia`: Wikipedia tool
//!
//! # Adding New Tools
//!
//! 1. Implement the tool in its own submodule, declaring a `RequestSchema`
//! 2. Convert every provider failure into a `ToolError`
//! 3. Register it in `ToolRegistry::with_default_tools` if it ships by default

pub use config::{BraveSearchConfig, ToolsConfig, WikipediaConfig};
pub use registry::{RegistryError, ToolRegistry};
pub use schema::{
    FieldIssue, FieldProblem, ParamSpec, ParamType, RequestSchema, SchemaError,
    ValidatedArguments, ValidationError,
};
pub use search::{effective_count, BraveSearchTool, BRAVE_SEARCH_TOOL_NAME};
pub use types::{Tool, ToolCallInput, ToolError};
pub use wikipedia::{truncate_chars, Article, WikipediaTool, WIKIPEDIA_TOOL_NAME};

pub mod config;
pub mod registry;
pub mod schema;
pub mod search;
pub mod types;
pub mod wikipedia;
