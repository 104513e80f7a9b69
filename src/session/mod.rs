//! In-memory state for one frontend session: which screen is showing, the
//! submitted profile, the current idea batch, and cached builder results.

pub mod driver;
pub mod fsm;

use std::collections::HashSet;

use tracing::debug;

use crate::domains::builder::{BusinessPlan, CompetitorAnalysis, MarketingCopy};
use crate::domains::{BuilderAction, BuilderResult, Idea, IdeaMode, IdeaRequest, Profile};
use crate::error::{IdeaForgeError, Result};

pub use driver::SessionDriver;
pub use fsm::{Screen, ScreenInput};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    ChooseGenerate,
    ChooseValidate,
    SubmitProfile(Profile),
    SubmitIdea(String),
    Regenerate,
    SelectIdea(String),
    Back,
}

/// A generation call the caller must perform and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerationTicket {
    pub id: u64,
    pub request: IdeaRequest,
}

/// A builder call the caller must perform and report back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuilderTicket {
    pub action: BuilderAction,
    pub idea: Idea,
    pub profile: Profile,
    selection: u64,
}

/// At most one result per action; a rerun overwrites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuilderCache {
    pub full_plan: Option<BusinessPlan>,
    pub competitor_analysis: Option<CompetitorAnalysis>,
    pub marketing_copy: Option<MarketingCopy>,
}

impl BuilderCache {
    pub fn store(&mut self, result: BuilderResult) {
        match result {
            BuilderResult::BusinessPlan(plan) => self.full_plan = Some(plan),
            BuilderResult::CompetitorAnalysis(analysis) => {
                self.competitor_analysis = Some(analysis)
            }
            BuilderResult::MarketingCopy(copy) => self.marketing_copy = Some(copy),
        }
    }

    pub fn get(&self, action: BuilderAction) -> Option<BuilderResult> {
        match action {
            BuilderAction::FullPlan => self.full_plan.clone().map(BuilderResult::BusinessPlan),
            BuilderAction::CompetitorAnalysis => self
                .competitor_analysis
                .clone()
                .map(BuilderResult::CompetitorAnalysis),
            BuilderAction::MarketingCopy => {
                self.marketing_copy.clone().map(BuilderResult::MarketingCopy)
            }
        }
    }

    pub fn is_done(&self, action: BuilderAction) -> bool {
        match action {
            BuilderAction::FullPlan => self.full_plan.is_some(),
            BuilderAction::CompetitorAnalysis => self.competitor_analysis.is_some(),
            BuilderAction::MarketingCopy => self.marketing_copy.is_some(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Session {
    screen: Screen,
    mode: IdeaMode,
    profile: Option<Profile>,
    user_idea: Option<String>,
    ideas: Vec<Idea>,
    selected: Option<Idea>,
    builder: BuilderCache,
    pending_builder: HashSet<BuilderAction>,
    in_flight: Option<u64>,
    next_ticket: u64,
    selection: u64,
    last_error: Option<String>,
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl Session {
    pub fn new() -> Self {
        Self {
            screen: Screen::Hero,
            mode: IdeaMode::Generate,
            profile: None,
            user_idea: None,
            ideas: Vec::new(),
            selected: None,
            builder: BuilderCache::default(),
            pending_builder: HashSet::new(),
            in_flight: None,
            next_ticket: 0,
            selection: 0,
            last_error: None,
        }
    }

    pub fn screen(&self) -> Screen {
        self.screen
    }

    pub fn mode(&self) -> IdeaMode {
        self.mode
    }

    pub fn profile(&self) -> Option<&Profile> {
        self.profile.as_ref()
    }

    pub fn ideas(&self) -> &[Idea] {
        &self.ideas
    }

    pub fn selected_idea(&self) -> Option<&Idea> {
        self.selected.as_ref()
    }

    pub fn builder_results(&self) -> &BuilderCache {
        &self.builder
    }

    pub fn is_builder_pending(&self, action: BuilderAction) -> bool {
        self.pending_builder.contains(&action)
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    fn advance(&mut self, input: ScreenInput) -> Result<()> {
        let next = fsm::transition(self.screen, input).ok_or_else(|| {
            IdeaForgeError::InvalidInput(format!(
                "{input:?} is not available on the {} screen",
                self.screen.as_str()
            ))
        })?;
        debug!(from = self.screen.as_str(), to = next.as_str(), "Screen transition");
        self.screen = next;
        Ok(())
    }

    fn issue_generation(&mut self) -> Result<GenerationTicket> {
        let profile = self
            .profile
            .clone()
            .ok_or_else(|| IdeaForgeError::InvalidInput("no profile submitted".to_string()))?;
        let request = match self.mode {
            IdeaMode::Generate => IdeaRequest::generate(profile),
            IdeaMode::Validate => {
                IdeaRequest::validate(profile, self.user_idea.clone().unwrap_or_default())
            }
        };
        self.next_ticket += 1;
        self.in_flight = Some(self.next_ticket);
        Ok(GenerationTicket {
            id: self.next_ticket,
            request,
        })
    }

    /// Applies a user event. Returns a ticket when the event starts a
    /// generation round.
    pub fn handle(&mut self, event: SessionEvent) -> Result<Option<GenerationTicket>> {
        self.last_error = None;
        match event {
            SessionEvent::ChooseGenerate => {
                self.advance(ScreenInput::ChooseGenerate)?;
                self.mode = IdeaMode::Generate;
                Ok(None)
            }
            SessionEvent::ChooseValidate => {
                self.advance(ScreenInput::ChooseValidate)?;
                self.mode = IdeaMode::Validate;
                Ok(None)
            }
            SessionEvent::SubmitProfile(profile) => {
                profile.validate()?;
                self.advance(ScreenInput::SubmitProfile)?;
                self.profile = Some(profile);
                if self.mode == IdeaMode::Generate {
                    self.issue_generation().map(Some)
                } else {
                    Ok(None)
                }
            }
            SessionEvent::SubmitIdea(idea) => {
                if idea.trim().is_empty() {
                    return Err(IdeaForgeError::InvalidInput(
                        "describe the idea to validate".to_string(),
                    ));
                }
                self.advance(ScreenInput::SubmitIdea)?;
                self.user_idea = Some(idea.trim().to_string());
                self.issue_generation().map(Some)
            }
            SessionEvent::Regenerate => {
                self.advance(ScreenInput::Regenerate)?;
                self.issue_generation().map(Some)
            }
            SessionEvent::SelectIdea(id) => {
                let idea = self
                    .ideas
                    .iter()
                    .find(|idea| idea.id == id)
                    .cloned()
                    .ok_or_else(|| IdeaForgeError::InvalidInput(format!("no idea with id {id}")))?;
                self.advance(ScreenInput::SelectIdea)?;
                if self.selected.as_ref() != Some(&idea) {
                    self.select(Some(idea));
                }
                Ok(None)
            }
            SessionEvent::Back => {
                let input = match (self.screen, self.mode) {
                    (Screen::Results, IdeaMode::Generate) => ScreenInput::BackToProfile,
                    (Screen::Results, IdeaMode::Validate) => ScreenInput::BackToValidator,
                    _ => ScreenInput::Back,
                };
                self.advance(input)?;
                Ok(None)
            }
        }
    }

    fn select(&mut self, idea: Option<Idea>) {
        self.selected = idea;
        self.selection += 1;
        self.builder = BuilderCache::default();
        self.pending_builder.clear();
    }

    /// Reports the outcome of a generation ticket. Results for tickets that
    /// are no longer in flight are dropped. On failure the session returns to
    /// the screen that started the round and the idea list is left as it was.
    pub fn complete_generation(
        &mut self,
        ticket_id: u64,
        outcome: Result<Vec<Idea>>,
    ) -> Result<()> {
        if self.in_flight != Some(ticket_id) || self.screen != Screen::Loading {
            debug!(ticket_id, "Dropping stale generation result");
            return Ok(());
        }
        self.in_flight = None;

        match outcome {
            Ok(ideas) => {
                self.advance(ScreenInput::Loaded)?;
                self.ideas = ideas;
                self.select(None);
                Ok(())
            }
            Err(err) => {
                let input = match self.mode {
                    IdeaMode::Generate => ScreenInput::FailedGenerate,
                    IdeaMode::Validate => ScreenInput::FailedValidate,
                };
                self.advance(input)?;
                self.last_error = Some(err.public_message());
                Err(err)
            }
        }
    }

    /// Starts a builder action for the selected idea. Only one call per
    /// action may be pending.
    pub fn begin_builder(&mut self, action: BuilderAction) -> Result<BuilderTicket> {
        self.last_error = None;
        if self.screen != Screen::Builder {
            return Err(IdeaForgeError::InvalidInput(
                "select an idea before building".to_string(),
            ));
        }
        let (Some(idea), Some(profile)) = (self.selected.clone(), self.profile.clone()) else {
            return Err(IdeaForgeError::InvalidInput(
                "select an idea before building".to_string(),
            ));
        };
        if !self.pending_builder.insert(action) {
            return Err(IdeaForgeError::InvalidInput(format!(
                "{} is already running",
                action.label()
            )));
        }
        Ok(BuilderTicket {
            action,
            idea,
            profile,
            selection: self.selection,
        })
    }

    /// Stores a builder result. A failure keeps any earlier result for the
    /// same action.
    pub fn complete_builder(
        &mut self,
        ticket: BuilderTicket,
        outcome: Result<BuilderResult>,
    ) -> Result<()> {
        if ticket.selection != self.selection {
            debug!(action = %ticket.action, "Dropping builder result for a previous selection");
            return Ok(());
        }
        self.pending_builder.remove(&ticket.action);

        match outcome {
            Ok(result) if result.action() == ticket.action => {
                self.builder.store(result);
                Ok(())
            }
            Ok(result) => Err(IdeaForgeError::MalformedResponse(format!(
                "{} returned a {} result",
                ticket.action,
                result.action()
            ))),
            Err(err) => {
                self.last_error = Some(format!(
                    "{} failed: {}. Try again.",
                    ticket.action.label(),
                    err.public_message()
                ));
                Err(err)
            }
        }
    }
}
