use serde::{Serialize, Serializer};

use crate::tools::schema::RequestSchema;

/// Immutable metadata for one tool.
///
/// Serializes in the MCP tool definition shape (`name`, optional `title`,
/// `description`, `input_schema` as JSON schema) so a model-driven
/// orchestrator can discover it without knowing the provider behind it.
#[derive(Debug, Clone, Serialize)]
pub struct ToolDescriptor {
    pub name: String,
    /// Human-readable display name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    pub description: String,
    #[serde(serialize_with = "serialize_schema")]
    pub input_schema: RequestSchema,
}

impl ToolDescriptor {
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        input_schema: RequestSchema,
    ) -> Self {
        Self {
            name: name.into(),
            title: None,
            description: description.into(),
            input_schema,
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn input_json_schema(&self) -> serde_json::Value {
        self.input_schema.to_json_schema()
    }
}

fn serialize_schema<S: Serializer>(schema: &RequestSchema, serializer: S) -> Result<S::Ok, S::Error> {
    schema.to_json_schema().serialize(serializer)
}
