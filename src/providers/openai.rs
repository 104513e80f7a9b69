use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use std::time::Duration;
use tracing::{debug, error, warn};

use async_openai::types::chat::{
    ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
    ChatCompletionRequestUserMessageArgs, ChatCompletionRequestUserMessageContent,
    ChatCompletionTool, ChatCompletionToolChoiceOption, ChatCompletionTools,
    CreateChatCompletionRequest, CreateChatCompletionRequestArgs, FunctionObject,
};

use crate::config::{GatewayConfig, DEFAULT_BASE_URL, DEFAULT_MODEL, DEFAULT_TIMEOUT_SECS};
use crate::error::{IdeaForgeError, Result};
use crate::interfaces::providers::{LlmProvider, StructuredRequest, ToolDefinition};

/// Structured-output client for an OpenAI-compatible chat-completions
/// gateway. One request per call: no retries, no caching.
#[derive(Clone)]
pub struct OpenAiProvider {
    model: String,
    client: reqwest::Client,
    api_key: String,
    base_url: String,
}

impl OpenAiProvider {
    pub fn new(api_key: String, model: Option<String>, base_url: Option<String>) -> Result<Self> {
        Self::with_timeout(
            api_key,
            model,
            base_url,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        )
    }

    pub fn with_timeout(
        api_key: String,
        model: Option<String>,
        base_url: Option<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let model = model.unwrap_or_else(|| DEFAULT_MODEL.to_string());
        let base_url = base_url.unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| IdeaForgeError::Config(format!("http client: {e}")))?;
        Ok(Self {
            model,
            client,
            api_key,
            base_url,
        })
    }

    pub fn from_config(config: &GatewayConfig) -> Result<Self> {
        Self::with_timeout(
            config.require_api_key()?,
            Some(config.model()),
            Some(config.base_url()),
            config.timeout(),
        )
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn build_request(&self, request: &StructuredRequest) -> Result<CreateChatCompletionRequest> {
        let system = ChatCompletionRequestSystemMessageArgs::default()
            .content(request.system_prompt.as_str())
            .build()
            .map_err(|e| IdeaForgeError::Runtime(e.to_string()))?;
        let user = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Text(
                request.user_prompt.clone(),
            ))
            .build()
            .map_err(|e| IdeaForgeError::Runtime(e.to_string()))?;

        let tool = ChatCompletionTools::Function(ChatCompletionTool {
            function: FunctionObject {
                name: request.tool.name.clone(),
                description: Some(request.tool.description.clone()),
                parameters: Some(request.tool.parameters.clone()),
                strict: Some(false),
            },
        });
        // Named choice, built from its wire form.
        let tool_choice: ChatCompletionToolChoiceOption = serde_json::from_value(
            serde_json::json!({"type": "function", "function": {"name": request.tool.name}}),
        )
        .map_err(|e| IdeaForgeError::Serialization(format!("tool_choice: {e}")))?;

        CreateChatCompletionRequestArgs::default()
            .model(self.model.clone())
            .messages(vec![
                ChatCompletionRequestMessage::System(system),
                ChatCompletionRequestMessage::User(user),
            ])
            .tools(vec![tool])
            .tool_choice(tool_choice)
            .build()
            .map_err(|e| IdeaForgeError::Runtime(e.to_string()))
    }

    async fn raw_chat_completion(&self, body: &CreateChatCompletionRequest) -> Result<Value> {
        let url = format!("{}/chat/completions", self.base_url.trim_end_matches('/'));
        let response = self
            .client
            .post(url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| IdeaForgeError::Http(format!("Chat completion transport failed: {e}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| IdeaForgeError::Http(format!("Chat completion read failed: {e}")))?;

        if status == StatusCode::TOO_MANY_REQUESTS {
            warn!(status = status.as_u16(), "AI gateway rate limited the request");
            return Err(IdeaForgeError::UpstreamRateLimited);
        }
        if status == StatusCode::PAYMENT_REQUIRED {
            warn!(status = status.as_u16(), "AI gateway credits exhausted");
            return Err(IdeaForgeError::UpstreamQuotaExhausted);
        }
        if !status.is_success() {
            error!(status = status.as_u16(), body = %text, "AI gateway error");
            return Err(IdeaForgeError::Upstream {
                status: status.as_u16(),
                message: text,
            });
        }

        serde_json::from_str(&text).map_err(|e| {
            IdeaForgeError::MalformedResponse(format!("chat completion is not JSON: {e}"))
        })
    }

    /// Pulls the first tool call's arguments out of a chat-completions body.
    fn extract_tool_arguments(response: &Value, tool: &ToolDefinition) -> Result<Value> {
        let call = response
            .get("choices")
            .and_then(|v| v.get(0))
            .and_then(|choice| choice.get("message"))
            .and_then(|message| message.get("tool_calls"))
            .and_then(|calls| calls.get(0))
            .and_then(|call| call.get("function"))
            .ok_or_else(|| IdeaForgeError::MalformedResponse("no tool call".to_string()))?;

        if let Some(name) = call.get("name").and_then(|v| v.as_str()) {
            if name != tool.name {
                warn!(expected = %tool.name, actual = %name, "Model called an unexpected tool");
            }
        }

        let arguments = match call.get("arguments") {
            Some(Value::String(text)) if !text.trim().is_empty() => {
                serde_json::from_str(text).map_err(|e| {
                    IdeaForgeError::MalformedResponse(format!("tool arguments are not JSON: {e}"))
                })?
            }
            Some(value @ Value::Object(_)) => value.clone(),
            _ => {
                return Err(IdeaForgeError::MalformedResponse(
                    "tool call has no arguments".to_string(),
                ))
            }
        };

        Self::check_required_keys(&arguments, tool)?;
        Ok(arguments)
    }

    fn check_required_keys(arguments: &Value, tool: &ToolDefinition) -> Result<()> {
        let Some(object) = arguments.as_object() else {
            return Err(IdeaForgeError::MalformedResponse(
                "tool arguments are not an object".to_string(),
            ));
        };
        let missing: Vec<&str> = tool
            .required_keys()
            .into_iter()
            .filter(|key| !matches!(object.get(*key), Some(value) if !value.is_null()))
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(IdeaForgeError::MalformedResponse(format!(
                "tool arguments missing {}",
                missing.join(", ")
            )))
        }
    }
}

#[async_trait]
impl LlmProvider for OpenAiProvider {
    async fn call_tool(&self, request: StructuredRequest) -> Result<Value> {
        let body = self.build_request(&request)?;
        debug!(model = %self.model, tool = %request.tool.name, "Issuing structured chat completion");
        let response = self.raw_chat_completion(&body).await?;
        Self::extract_tool_arguments(&response, &request.tool)
    }
}
