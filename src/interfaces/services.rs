use async_trait::async_trait;

use crate::domains::{BuilderAction, BuilderResult, Idea, IdeaRequest, Profile};
use crate::error::Result;

/// Everything the frontend needs from the idea services, whether they run
/// in-process or behind the HTTP endpoints.
#[async_trait]
pub trait IdeaBackend: Send + Sync {
    async fn generate_ideas(&self, request: &IdeaRequest) -> Result<Vec<Idea>>;

    async fn run_builder(
        &self,
        idea: &Idea,
        profile: &Profile,
        action: BuilderAction,
    ) -> Result<BuilderResult>;
}
