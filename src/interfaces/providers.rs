use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;

use crate::error::Result;

/// A function tool the model is forced to call.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ToolDefinition {
    pub name: String,
    pub description: String,
    pub parameters: Value,
}

impl ToolDefinition {
    pub fn new(name: &str, description: &str, parameters: Value) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            parameters,
        }
    }

    /// Top-level keys the parsed arguments must carry.
    pub fn required_keys(&self) -> Vec<&str> {
        self.parameters
            .get("required")
            .and_then(|v| v.as_array())
            .map(|keys| keys.iter().filter_map(|k| k.as_str()).collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StructuredRequest {
    pub system_prompt: String,
    pub user_prompt: String,
    pub tool: ToolDefinition,
}

#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Issues one forced tool call and returns the parsed arguments object.
    async fn call_tool(&self, request: StructuredRequest) -> Result<Value>;
}
