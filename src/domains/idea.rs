use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

use crate::domains::profile::Profile;
use crate::error::{IdeaForgeError, Result};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IdeaMode {
    #[default]
    Generate,
    Validate,
}

impl IdeaMode {
    pub fn as_str(self) -> &'static str {
        match self {
            IdeaMode::Generate => "generate",
            IdeaMode::Validate => "validate",
        }
    }

    pub fn loading_message(self) -> &'static str {
        match self {
            IdeaMode::Generate => "Discovering Your Perfect Business...",
            IdeaMode::Validate => "Analyzing Your Idea...",
        }
    }
}

impl fmt::Display for IdeaMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IdeaMode {
    type Err = IdeaForgeError;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "generate" => Ok(IdeaMode::Generate),
            "validate" => Ok(IdeaMode::Validate),
            other => Err(IdeaForgeError::UnknownMode(other.to_string())),
        }
    }
}

/// Input to one generation or validation round.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdeaRequest {
    pub profile: Profile,
    pub mode: IdeaMode,
    pub user_idea: String,
}

impl IdeaRequest {
    pub fn generate(profile: Profile) -> Self {
        Self {
            profile,
            mode: IdeaMode::Generate,
            user_idea: String::new(),
        }
    }

    pub fn validate(profile: Profile, user_idea: impl Into<String>) -> Self {
        Self {
            profile,
            mode: IdeaMode::Validate,
            user_idea: user_idea.into(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UrgencyLevel {
    Critical,
    High,
    Medium,
}

impl UrgencyLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            UrgencyLevel::Critical => "critical",
            UrgencyLevel::High => "high",
            UrgencyLevel::Medium => "medium",
        }
    }
}

/// An idea exactly as the model returns it, before an id is assigned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IdeaDraft {
    pub name: String,
    pub description: String,
    pub problem: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub viability_score: u8,
    pub profit_potential: String,
    pub time_to_launch: String,
    pub startup_cost: String,
    pub experience_needed: String,
    pub urgency_level: UrgencyLevel,
    pub tags: Vec<String>,
}

/// One candidate business concept. `id` is only unique within the batch it
/// was delivered in; every new batch numbers again from "1".
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Idea {
    pub id: String,
    pub name: String,
    pub description: String,
    pub problem: String,
    #[serde(deserialize_with = "deserialize_score")]
    pub viability_score: u8,
    pub profit_potential: String,
    pub time_to_launch: String,
    pub startup_cost: String,
    pub experience_needed: String,
    pub urgency_level: UrgencyLevel,
    pub tags: Vec<String>,
}

impl Idea {
    pub fn from_draft(id: String, draft: IdeaDraft) -> Self {
        Self {
            id,
            name: draft.name,
            description: draft.description,
            problem: draft.problem,
            viability_score: draft.viability_score,
            profit_potential: draft.profit_potential,
            time_to_launch: draft.time_to_launch,
            startup_cost: draft.startup_cost,
            experience_needed: draft.experience_needed,
            urgency_level: draft.urgency_level,
            tags: draft.tags,
        }
    }
}

/// Numbers drafts "1".."N" by array position. Pure function of position.
pub fn assign_ids(drafts: Vec<IdeaDraft>) -> Vec<Idea> {
    drafts
        .into_iter()
        .enumerate()
        .map(|(index, draft)| Idea::from_draft((index + 1).to_string(), draft))
        .collect()
}

fn deserialize_score<'de, D>(deserializer: D) -> std::result::Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = f64::deserialize(deserializer)?;
    if !raw.is_finite() || !(0.0..=100.0).contains(&raw) {
        return Err(serde::de::Error::custom(format!(
            "viabilityScore {raw} outside 0..=100"
        )));
    }
    Ok(raw.round() as u8)
}

#[cfg(test)]
pub(crate) fn sample_draft(name: &str) -> IdeaDraft {
    IdeaDraft {
        name: name.to_string(),
        description: "Turnkey chatbots for local shops.".to_string(),
        problem: "Leads are lost after hours.".to_string(),
        viability_score: 88,
        profit_potential: "$5K-20K/mo".to_string(),
        time_to_launch: "3-5 days".to_string(),
        startup_cost: "$50-150".to_string(),
        experience_needed: "Beginner".to_string(),
        urgency_level: UrgencyLevel::High,
        tags: vec!["AI".to_string(), "B2B".to_string()],
    }
}
