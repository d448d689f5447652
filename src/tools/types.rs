//! Shared types and traits for the tool system.
//!
//! This module defines the core abstractions for tools:
//! - Tool call input type
//! - Tool trait for implementing new tools
//! - Error types for tool execution

use serde::{Deserialize, Serialize};

use crate::core::tool::ToolDescriptor;
use crate::tools::schema::{ValidatedArguments, ValidationError};

/// A named tool call as produced by an orchestrator.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolCallInput {
    pub name: String,
    #[serde(default)]
    pub args: serde_json::Value,
}

/// Errors that can occur during tool execution.
///
/// None of these escape [`Tool::invoke`]; they are rendered into the
/// tool's string result instead.
#[derive(Debug, thiserror::Error)]
pub enum ToolError {
    #[error("configuration error: {0}")]
    Configuration(String),
    #[error("{0}")]
    Validation(#[from] ValidationError),
    #[error("request failed: {0}")]
    Transport(String),
    #[error("invalid response: {0}")]
    InvalidResponse(String),
}

impl ToolError {
    /// The string handed back to the caller in place of a result.
    pub fn describe(&self) -> String {
        match self {
            // Configuration messages are already written for the end user.
            Self::Configuration(message) => format!("Error: {message}"),
            other => format!("Error: {other}"),
        }
    }
}

impl From<reqwest::Error> for ToolError {
    fn from(value: reqwest::Error) -> Self {
        if value.is_timeout() {
            return Self::Transport(format!("request timed out: {value}"));
        }
        if value.is_connect() {
            return Self::Transport(format!("could not connect: {value}"));
        }
        if value.is_decode() {
            return Self::InvalidResponse(value.to_string());
        }
        Self::Transport(value.to_string())
    }
}

/// Trait for implementing tools.
///
/// Implementors declare a [`ToolDescriptor`] once at construction and do
/// their provider call in [`Tool::run`]. Callers use [`Tool::invoke`],
/// which validates arguments first and always yields a string.
pub trait Tool: Send + Sync {
    /// Returns the descriptor for this tool, including name, description,
    /// and input schema.
    fn descriptor(&self) -> &ToolDescriptor;

    /// Performs the provider call with already-validated arguments.
    fn run(&self, args: ValidatedArguments) -> Result<String, ToolError>;

    /// Renders a failure into the tool's result string.
    fn describe_error(&self, error: &ToolError) -> String {
        error.describe()
    }

    /// Validates `input` against the descriptor's schema and runs the tool.
    ///
    /// Validation failures never reach [`Tool::run`], so no request is made.
    fn invoke(&self, input: serde_json::Value) -> String {
        let descriptor = self.descriptor();
        let outcome = descriptor
            .input_schema
            .validate(&input)
            .map_err(ToolError::from)
            .and_then(|args| self.run(args));

        match outcome {
            Ok(text) => text,
            Err(error) => {
                tracing::warn!(tool = %descriptor.name, %error, "tool invocation failed");
                self.describe_error(&error)
            }
        }
    }
}
