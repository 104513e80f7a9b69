pub mod builder;
pub mod ideas;

use std::sync::Arc;

use async_trait::async_trait;

use crate::domains::{BuilderAction, BuilderResult, Idea, IdeaRequest, Profile};
use crate::error::Result;
use crate::interfaces::providers::LlmProvider;
use crate::interfaces::services::IdeaBackend;

pub use builder::BuilderService;
pub use ideas::IdeaService;

/// Both services sharing one provider, usable wherever an `IdeaBackend` is.
#[derive(Clone)]
pub struct IdeaServices {
    pub ideas: IdeaService,
    pub builder: BuilderService,
}

impl IdeaServices {
    pub fn new(llm: Arc<dyn LlmProvider>) -> Self {
        Self {
            ideas: IdeaService::new(llm.clone()),
            builder: BuilderService::new(llm),
        }
    }
}

#[async_trait]
impl IdeaBackend for IdeaServices {
    async fn generate_ideas(&self, request: &IdeaRequest) -> Result<Vec<Idea>> {
        self.ideas.run(request).await
    }

    async fn run_builder(
        &self,
        idea: &Idea,
        profile: &Profile,
        action: BuilderAction,
    ) -> Result<BuilderResult> {
        self.builder.run(idea, profile, action).await
    }
}
