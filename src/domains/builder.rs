use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{IdeaForgeError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BuilderAction {
    FullPlan,
    CompetitorAnalysis,
    MarketingCopy,
}

impl BuilderAction {
    pub const ALL: [BuilderAction; 3] = [
        BuilderAction::FullPlan,
        BuilderAction::CompetitorAnalysis,
        BuilderAction::MarketingCopy,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            BuilderAction::FullPlan => "full_plan",
            BuilderAction::CompetitorAnalysis => "competitor_analysis",
            BuilderAction::MarketingCopy => "marketing_copy",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            BuilderAction::FullPlan => "Full Business Plan",
            BuilderAction::CompetitorAnalysis => "Competitor Analysis",
            BuilderAction::MarketingCopy => "Marketing Copy",
        }
    }
}

impl fmt::Display for BuilderAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BuilderAction {
    type Err = IdeaForgeError;

    fn from_str(value: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|action| action.as_str() == value)
            .ok_or_else(|| IdeaForgeError::UnknownAction(value.to_string()))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BrandIdentity {
    pub tone: String,
    pub colors: Vec<String>,
    pub fonts: Vec<String>,
    pub personality: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LaunchWeek {
    pub week: String,
    pub title: String,
    pub tasks: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MarketingStrategy {
    pub channels: Vec<String>,
    pub content_ideas: Vec<String>,
    pub launch_tactics: Vec<String>,
    pub budget_allocation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialProjection {
    pub month1: String,
    pub month3: String,
    pub month6: String,
    pub month12: String,
    pub break_even_timeline: String,
    pub key_expenses: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct BusinessPlan {
    pub business_name: String,
    pub tagline: String,
    pub elevator_pitch: String,
    pub target_audience: String,
    pub revenue_model: String,
    pub competitive_advantage: String,
    pub brand_identity: BrandIdentity,
    pub launch_timeline: Vec<LaunchWeek>,
    pub marketing_strategy: MarketingStrategy,
    pub financial_projection: FinancialProjection,
    pub risks: Vec<String>,
    pub next_steps: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Competitor {
    pub name: String,
    pub strengths: String,
    pub weaknesses: String,
    pub pricing: String,
    pub market_share: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ThreatLevel {
    Low,
    Medium,
    High,
}

impl ThreatLevel {
    pub fn as_str(self) -> &'static str {
        match self {
            ThreatLevel::Low => "Low",
            ThreatLevel::Medium => "Medium",
            ThreatLevel::High => "High",
        }
    }
}

impl FromStr for ThreatLevel {
    type Err = IdeaForgeError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "low" => Ok(ThreatLevel::Low),
            "medium" => Ok(ThreatLevel::Medium),
            "high" => Ok(ThreatLevel::High),
            other => Err(IdeaForgeError::MalformedResponse(format!(
                "unknown threat level: {other}"
            ))),
        }
    }
}

impl<'de> Deserialize<'de> for ThreatLevel {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        raw.parse().map_err(serde::de::Error::custom)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompetitorAnalysis {
    pub market_overview: String,
    pub direct_competitors: Vec<Competitor>,
    pub market_gaps: Vec<String>,
    pub positioning_strategy: String,
    pub differentiators: Vec<String>,
    pub threat_level: ThreatLevel,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailMessage {
    pub subject: String,
    pub preview: String,
    pub body: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LandingPageCopy {
    pub hero_headline: String,
    pub hero_subheadline: String,
    pub features: Vec<String>,
    pub cta: String,
    pub testimonial_templates: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct MarketingCopy {
    pub headlines: Vec<String>,
    pub email_sequence: Vec<EmailMessage>,
    pub social_posts: Vec<String>,
    pub landing_page_copy: LandingPageCopy,
    pub ad_copy: Vec<String>,
}

/// Result of one builder action. Serializes as the bare action object, the
/// action name travels beside it on the wire.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum BuilderResult {
    BusinessPlan(BusinessPlan),
    CompetitorAnalysis(CompetitorAnalysis),
    MarketingCopy(MarketingCopy),
}

impl BuilderResult {
    pub fn action(&self) -> BuilderAction {
        match self {
            BuilderResult::BusinessPlan(_) => BuilderAction::FullPlan,
            BuilderResult::CompetitorAnalysis(_) => BuilderAction::CompetitorAnalysis,
            BuilderResult::MarketingCopy(_) => BuilderAction::MarketingCopy,
        }
    }

    /// Strictly decodes `value` as the shape belonging to `action`.
    pub fn decode(action: BuilderAction, value: Value) -> Result<Self> {
        let malformed = |e: serde_json::Error| {
            IdeaForgeError::MalformedResponse(format!("{action} result: {e}"))
        };
        Ok(match action {
            BuilderAction::FullPlan => {
                BuilderResult::BusinessPlan(serde_json::from_value(value).map_err(malformed)?)
            }
            BuilderAction::CompetitorAnalysis => {
                BuilderResult::CompetitorAnalysis(serde_json::from_value(value).map_err(malformed)?)
            }
            BuilderAction::MarketingCopy => {
                BuilderResult::MarketingCopy(serde_json::from_value(value).map_err(malformed)?)
            }
        })
    }
}
