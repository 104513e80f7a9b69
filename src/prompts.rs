//! Prompt text for every idea mode and builder action.

use crate::domains::{BuilderAction, Idea, IdeaMode, Profile};

pub const IDEA_SYSTEM_PROMPT: &str = r#"You are an elite AI business strategist. You analyze market trends, identify underserved niches, and generate highly actionable business ideas.

Your task is to generate business ideas that are:
- "Painkiller" solutions solving urgent, real problems
- Based on current market trends and gaps
- Tailored to the user's experience level, budget, skills, and interests
- Practical and launchable within the stated timeframe

You MUST respond by calling the provided function tool. Do not respond with plain text."#;

const FULL_PLAN_SYSTEM_PROMPT: &str = "You are a world-class business strategist and startup advisor. Generate comprehensive, actionable business plans. You MUST respond by calling the provided function tool.";

const COMPETITOR_SYSTEM_PROMPT: &str = "You are a competitive intelligence analyst. Analyze the competitive landscape thoroughly. You MUST respond by calling the provided function tool.";

const MARKETING_SYSTEM_PROMPT: &str = "You are an expert copywriter and marketing strategist. Generate compelling marketing materials. You MUST respond by calling the provided function tool.";

/// Ideas requested per generate round.
pub const GENERATED_IDEA_COUNT: usize = 6;

/// Alternatives requested alongside a validated idea.
pub const VALIDATION_ALTERNATIVES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PromptPair {
    pub system: String,
    pub user: String,
}

pub fn idea_prompts(mode: IdeaMode, profile: &Profile, user_idea: &str) -> PromptPair {
    let user = match mode {
        IdeaMode::Generate => format!(
            "Generate {GENERATED_IDEA_COUNT} unique, high-potential business ideas for this user:\n\n\
             User Profile:\n\
             - Experience Level: {}\n\
             - Interests & Industries: {}\n\
             - Budget: {}\n\
             - Skills: {}\n\n\
             Focus on ideas that match their budget and experience. Prioritize urgent market needs and underserved niches. Each idea should be distinct and actionable.",
            profile.expertise, profile.interests, profile.budget, profile.skills
        ),
        IdeaMode::Validate => format!(
            "The user wants to validate this business idea: \"{}\"\n\n\
             User Profile:\n\
             - Experience Level: {}\n\
             - Interests: {}\n\
             - Budget: {}\n\
             - Skills: {}\n\n\
             Analyze the idea's viability and also suggest {VALIDATION_ALTERNATIVES} improved or related alternatives. Return all ideas (including the validated original) via the tool call.",
            user_idea.trim(),
            profile.expertise,
            profile.interests,
            profile.budget,
            profile.skills
        ),
    };
    PromptPair {
        system: IDEA_SYSTEM_PROMPT.to_string(),
        user,
    }
}

pub fn builder_prompts(action: BuilderAction, idea: &Idea, profile: &Profile) -> PromptPair {
    match action {
        BuilderAction::FullPlan => PromptPair {
            system: FULL_PLAN_SYSTEM_PROMPT.to_string(),
            user: format!(
                "Create a complete business launch plan for:\n\
                 Business: \"{}\"\n\
                 Description: {}\n\
                 Problem it solves: {}\n\
                 Startup Cost: {}\n\
                 User Experience: {}\n\
                 User Budget: {}\n\
                 User Skills: {}\n\n\
                 Generate a detailed plan with brand identity, marketing strategy, financial projections, launch timeline, and step-by-step actions.",
                idea.name,
                idea.description,
                idea.problem,
                idea.startup_cost,
                profile.expertise,
                profile.budget,
                profile.skills
            ),
        },
        BuilderAction::CompetitorAnalysis => PromptPair {
            system: COMPETITOR_SYSTEM_PROMPT.to_string(),
            user: format!(
                "Analyze the competitive landscape for: \"{}\" - {}. Industry focus: {}. Identify direct competitors, indirect competitors, market gaps, and positioning strategies.",
                idea.name, idea.description, profile.interests
            ),
        },
        BuilderAction::MarketingCopy => PromptPair {
            system: MARKETING_SYSTEM_PROMPT.to_string(),
            user: format!(
                "Generate marketing copy for: \"{}\" - {}. Target audience based on: {}. Budget: {}.",
                idea.name, idea.description, profile.interests, profile.budget
            ),
        },
    }
}
