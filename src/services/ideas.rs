use std::sync::Arc;

use serde::Deserialize;
use serde_json::Value;
use tracing::{info, warn};

use crate::domains::{assign_ids, Idea, IdeaDraft, IdeaMode, IdeaRequest};
use crate::error::{IdeaForgeError, Result};
use crate::interfaces::providers::{LlmProvider, StructuredRequest};
use crate::prompts::{idea_prompts, GENERATED_IDEA_COUNT};
use crate::schema::ideas_tool;

#[derive(Deserialize)]
struct IdeasPayload {
    ideas: Vec<IdeaDraft>,
}

#[derive(Clone)]
pub struct IdeaService {
    llm: Arc<dyn LlmProvider>,
}

impl IdeaService {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    pub async fn run(&self, request: &IdeaRequest) -> Result<Vec<Idea>> {
        request.profile.validate()?;
        if request.mode == IdeaMode::Validate && request.user_idea.trim().is_empty() {
            return Err(IdeaForgeError::InvalidInput(
                "an idea to validate is required".to_string(),
            ));
        }

        let prompts = idea_prompts(request.mode, &request.profile, &request.user_idea);
        let arguments = self
            .llm
            .call_tool(StructuredRequest {
                system_prompt: prompts.system,
                user_prompt: prompts.user,
                tool: ideas_tool(request.mode),
            })
            .await?;

        let ideas = Self::normalize(request.mode, arguments)?;
        info!(mode = %request.mode, count = ideas.len(), "Ideas generated");
        Ok(ideas)
    }

    /// Decodes the tool arguments and assigns batch-local ids.
    pub fn normalize(mode: IdeaMode, arguments: Value) -> Result<Vec<Idea>> {
        let payload: IdeasPayload = serde_json::from_value(arguments)
            .map_err(|e| IdeaForgeError::MalformedResponse(format!("ideas: {e}")))?;
        let mut drafts = payload.ideas;

        match mode {
            IdeaMode::Generate => {
                if drafts.len() < GENERATED_IDEA_COUNT {
                    return Err(IdeaForgeError::MalformedResponse(format!(
                        "expected {GENERATED_IDEA_COUNT} ideas, got {}",
                        drafts.len()
                    )));
                }
                if drafts.len() > GENERATED_IDEA_COUNT {
                    warn!(count = drafts.len(), "Model returned extra ideas; truncating");
                    drafts.truncate(GENERATED_IDEA_COUNT);
                }
            }
            IdeaMode::Validate => {
                if drafts.is_empty() {
                    return Err(IdeaForgeError::MalformedResponse(
                        "validation returned no ideas".to_string(),
                    ));
                }
            }
        }

        Ok(assign_ids(drafts))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::idea::sample_draft;
    use crate::domains::{Budget, Expertise, Profile};
    use crate::services::testing::ScriptedLlm;
    use serde_json::json;

    fn profile() -> Profile {
        Profile::new(Expertise::Beginner, "pets", Budget::UpTo500, "writing")
    }

    fn drafts(count: usize) -> Value {
        let ideas: Vec<IdeaDraft> = (0..count)
            .map(|i| sample_draft(&format!("idea {i}")))
            .collect();
        json!({ "ideas": ideas })
    }

    #[tokio::test]
    async fn generate_returns_six_numbered_ideas() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok(drafts(6))]));
        let service = IdeaService::new(llm.clone());
        let ideas = service.run(&IdeaRequest::generate(profile())).await.unwrap();

        assert_eq!(ideas.len(), 6);
        for (i, idea) in ideas.iter().enumerate() {
            assert_eq!(idea.id, (i + 1).to_string());
            assert!(idea.viability_score <= 100);
        }
        let requests = llm.requests.lock().unwrap();
        assert_eq!(requests[0].tool.name, "return_business_ideas");
        assert!(requests[0].user_prompt.contains("Skills: writing"));
    }

    #[tokio::test]
    async fn validate_keeps_model_determined_size() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok(drafts(4))]));
        let service = IdeaService::new(llm);
        let ideas = service
            .run(&IdeaRequest::validate(profile(), "pet portrait stickers"))
            .await
            .unwrap();
        let ids: Vec<&str> = ideas.iter().map(|i| i.id.as_str()).collect();
        assert_eq!(ids, vec!["1", "2", "3", "4"]);
    }

    #[tokio::test]
    async fn validate_requires_an_idea_before_calling_the_model() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok(drafts(4))]));
        let service = IdeaService::new(llm.clone());
        let err = service
            .run(&IdeaRequest::validate(profile(), "   "))
            .await
            .unwrap_err();
        assert!(matches!(err, IdeaForgeError::InvalidInput(_)));
        assert!(llm.requests.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn upstream_errors_propagate_unchanged() {
        let llm = Arc::new(ScriptedLlm::new(vec![Err(IdeaForgeError::UpstreamRateLimited)]));
        let service = IdeaService::new(llm);
        let err = service.run(&IdeaRequest::generate(profile())).await.unwrap_err();
        assert!(matches!(err, IdeaForgeError::UpstreamRateLimited));
    }

    #[test]
    fn normalize_truncates_extras_and_rejects_short_batches() {
        let ideas = IdeaService::normalize(IdeaMode::Generate, drafts(8)).unwrap();
        assert_eq!(ideas.len(), 6);
        assert_eq!(ideas[5].id, "6");

        assert!(matches!(
            IdeaService::normalize(IdeaMode::Generate, drafts(3)),
            Err(IdeaForgeError::MalformedResponse(_))
        ));
        assert!(IdeaService::normalize(IdeaMode::Validate, drafts(0)).is_err());
    }

    #[test]
    fn normalize_rejects_bad_shapes() {
        assert!(IdeaService::normalize(IdeaMode::Validate, json!({"ideas": null})).is_err());
        assert!(IdeaService::normalize(IdeaMode::Validate, json!({"ideas": [{"name": "x"}]})).is_err());
    }
}
