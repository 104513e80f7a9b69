use std::sync::Arc;

use tracing::{info, warn};

use crate::domains::{BuilderAction, BuilderResult};
use crate::error::{IdeaForgeError, Result};
use crate::interfaces::services::IdeaBackend;

use super::{Session, SessionEvent};

/// Runs session events against a backend, one call at a time.
pub struct SessionDriver {
    backend: Arc<dyn IdeaBackend>,
    session: Session,
}

impl SessionDriver {
    pub fn new(backend: Arc<dyn IdeaBackend>) -> Self {
        Self {
            backend,
            session: Session::new(),
        }
    }

    pub fn session(&self) -> &Session {
        &self.session
    }

    /// Applies `event` and, when it starts a generation round, waits for the
    /// backend before returning.
    pub async fn dispatch(&mut self, event: SessionEvent) -> Result<()> {
        let Some(ticket) = self.session.handle(event)? else {
            return Ok(());
        };
        info!(mode = %ticket.request.mode, "Requesting ideas");
        let outcome = self.backend.generate_ideas(&ticket.request).await;
        if let Err(err) = &outcome {
            warn!(error = %err, "Idea generation failed");
        }
        self.session.complete_generation(ticket.id, outcome)
    }

    pub async fn run_builder(&mut self, action: BuilderAction) -> Result<BuilderResult> {
        let ticket = self.session.begin_builder(action)?;
        info!(action = %action, idea = %ticket.idea.name, "Running builder action");
        let outcome = self
            .backend
            .run_builder(&ticket.idea, &ticket.profile, action)
            .await;
        if let Err(err) = &outcome {
            warn!(action = %action, error = %err, "Builder action failed");
        }
        let result = outcome.as_ref().ok().cloned();
        self.session.complete_builder(ticket, outcome)?;
        result.ok_or_else(|| {
            IdeaForgeError::Runtime(format!("{action} produced no result"))
        })
    }
}
