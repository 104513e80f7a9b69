use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::config::DEFAULT_TIMEOUT_SECS;
use crate::domains::{BuilderAction, BuilderResult, Idea, IdeaMode, IdeaRequest, Profile};
use crate::error::{IdeaForgeError, Result};
use crate::interfaces::services::IdeaBackend;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateIdeasBody<'a> {
    profile: &'a Profile,
    mode: IdeaMode,
    user_idea: &'a str,
}

#[derive(Serialize)]
struct BuildBusinessBody<'a> {
    idea: &'a Idea,
    profile: &'a Profile,
    action: BuilderAction,
}

#[derive(Deserialize)]
struct IdeasEnvelope {
    ideas: Option<Vec<Idea>>,
}

#[derive(Deserialize)]
struct BuilderEnvelope {
    result: Option<Value>,
    action: Option<String>,
}

#[derive(Deserialize)]
struct ErrorEnvelope {
    error: Option<String>,
}

/// Calls a running `idea-forged` over HTTP.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    token: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        // Builder actions can outlast a single gateway call by the proxy hop.
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS * 2))
            .build()
            .map_err(|e| IdeaForgeError::Config(format!("http client: {e}")))?;
        Ok(Self {
            base_url: base_url.into(),
            token: token.into(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post<B: Serialize + ?Sized>(&self, path: &str, body: &B) -> Result<Value> {
        let mut request = self.http.post(self.url(path)).json(body);
        if !self.token.trim().is_empty() {
            request = request.bearer_auth(self.token.trim());
        }
        let response = request
            .send()
            .await
            .map_err(|e| IdeaForgeError::Http(format!("{path} transport failed: {e}")))?;
        let status = response.status();
        let text = response
            .text()
            .await
            .map_err(|e| IdeaForgeError::Http(format!("{path} read failed: {e}")))?;
        debug!(path, status = status.as_u16(), "Service response");

        if !status.is_success() {
            let message = serde_json::from_str::<ErrorEnvelope>(&text)
                .ok()
                .and_then(|envelope| envelope.error)
                .unwrap_or(text);
            return Err(IdeaForgeError::from_status(status.as_u16(), message));
        }

        serde_json::from_str(&text)
            .map_err(|e| IdeaForgeError::MalformedResponse(format!("{path} body: {e}")))
    }
}

#[async_trait]
impl IdeaBackend for ApiClient {
    async fn generate_ideas(&self, request: &IdeaRequest) -> Result<Vec<Idea>> {
        let body = GenerateIdeasBody {
            profile: &request.profile,
            mode: request.mode,
            user_idea: &request.user_idea,
        };
        let value = self.post("generate-ideas", &body).await?;
        let envelope: IdeasEnvelope = serde_json::from_value(value)
            .map_err(|e| IdeaForgeError::MalformedResponse(format!("ideas: {e}")))?;
        envelope
            .ideas
            .ok_or_else(|| IdeaForgeError::MalformedResponse("response has no ideas".to_string()))
    }

    async fn run_builder(
        &self,
        idea: &Idea,
        profile: &Profile,
        action: BuilderAction,
    ) -> Result<BuilderResult> {
        let body = BuildBusinessBody {
            idea,
            profile,
            action,
        };
        let value = self.post("build-business", &body).await?;
        let envelope: BuilderEnvelope = serde_json::from_value(value)
            .map_err(|e| IdeaForgeError::MalformedResponse(format!("builder: {e}")))?;
        if let Some(echoed) = envelope.action.as_deref() {
            if echoed != action.as_str() {
                return Err(IdeaForgeError::MalformedResponse(format!(
                    "asked for {action}, got {echoed}"
                )));
            }
        }
        let result = envelope
            .result
            .filter(|value| !value.is_null())
            .ok_or_else(|| IdeaForgeError::MalformedResponse("response has no result".to_string()))?;
        BuilderResult::decode(action, result)
    }
}
