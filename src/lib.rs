//! Tool adapter library.
//!
//! Wraps external HTTP providers behind named, schema-validated tools that
//! an LLM-driven orchestrator can discover and call. Every tool call
//! returns a single string; provider failures are reported in that string
//! rather than raised.
//!
//! # Architecture
//!
//! - `core`: Shared types (tool descriptors)
//! - `tools`: Schemas, the Tool trait, the registry, and built-in tools
//! - `speech`: Speech-to-text and text-to-speech provider client

pub mod core;
pub mod speech;
pub mod tools;

#[cfg(test)]
mod testing;

pub use crate::core::tool::ToolDescriptor;
pub use speech::{SpeechClient, SpeechConfig, SpeechError};
pub use tools::{Tool, ToolCallInput, ToolError, ToolRegistry, ToolsConfig};

/// Installs the global tracing subscriber.
///
/// `RUST_LOG` takes precedence; otherwise this crate logs at debug and
/// everything else at info.
pub fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("toolgate=debug,toolgate_lib=debug,info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
