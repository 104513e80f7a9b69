use std::sync::Arc;

use tracing::info;

use crate::domains::{BuilderAction, BuilderResult, Idea, Profile};
use crate::error::{IdeaForgeError, Result};
use crate::interfaces::providers::{LlmProvider, StructuredRequest};
use crate::prompts::builder_prompts;
use crate::schema::builder_tool;

/// Deep-dive actions against one selected idea. Each call is independent.
#[derive(Clone)]
pub struct BuilderService {
    llm: Arc<dyn LlmProvider>,
}

impl BuilderService {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self { llm }
    }

    pub async fn run(
        &self,
        idea: &Idea,
        profile: &Profile,
        action: BuilderAction,
    ) -> Result<BuilderResult> {
        let prompts = builder_prompts(action, idea, profile);
        let arguments = self
            .llm
            .call_tool(StructuredRequest {
                system_prompt: prompts.system,
                user_prompt: prompts.user,
                tool: builder_tool(action),
            })
            .await
            .map_err(|err| match err {
                // Quota exhaustion only gets its own status on the idea path.
                IdeaForgeError::UpstreamQuotaExhausted => IdeaForgeError::Upstream {
                    status: 402,
                    message: "payment required".to_string(),
                },
                other => other,
            })?;

        let result = BuilderResult::decode(action, arguments)?;
        info!(action = %action, idea = %idea.name, "Builder action completed");
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domains::builder::fixtures;
    use crate::domains::idea::sample_draft;
    use crate::domains::{Budget, Expertise};
    use crate::services::testing::ScriptedLlm;
    use serde_json::json;

    fn idea() -> Idea {
        Idea::from_draft("2".to_string(), sample_draft("Chatbot Setup"))
    }

    fn profile() -> Profile {
        Profile::new(Expertise::Beginner, "pets", Budget::UpTo500, "writing")
    }

    #[tokio::test]
    async fn marketing_copy_decodes_typed_result() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok(fixtures::marketing_copy())]));
        let service = BuilderService::new(llm.clone());
        let result = service
            .run(&idea(), &profile(), BuilderAction::MarketingCopy)
            .await
            .unwrap();
        match result {
            BuilderResult::MarketingCopy(copy) => {
                assert_eq!(copy.headlines.len(), 5);
                assert_eq!(copy.ad_copy.len(), 3);
            }
            other => panic!("unexpected {other:?}"),
        }
        assert_eq!(
            llm.requests.lock().unwrap()[0].tool.name,
            "return_marketing_copy"
        );
    }

    #[tokio::test]
    async fn shape_mismatch_is_malformed() {
        let llm = Arc::new(ScriptedLlm::new(vec![Ok(json!({"headlines": []}))]));
        let service = BuilderService::new(llm);
        let err = service
            .run(&idea(), &profile(), BuilderAction::FullPlan)
            .await
            .unwrap_err();
        assert!(matches!(err, IdeaForgeError::MalformedResponse(_)));
    }

    #[tokio::test]
    async fn quota_exhaustion_becomes_generic_upstream_error() {
        let llm = Arc::new(ScriptedLlm::new(vec![
            Err(IdeaForgeError::UpstreamQuotaExhausted),
            Err(IdeaForgeError::UpstreamRateLimited),
        ]));
        let service = BuilderService::new(llm);
        let err = service
            .run(&idea(), &profile(), BuilderAction::CompetitorAnalysis)
            .await
            .unwrap_err();
        assert_eq!(err.status_code(), 500);

        let err = service
            .run(&idea(), &profile(), BuilderAction::CompetitorAnalysis)
            .await
            .unwrap_err();
        assert!(matches!(err, IdeaForgeError::UpstreamRateLimited));
    }
}
