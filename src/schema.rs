//! Tool definitions forcing the model into each response shape.

use serde_json::{json, Value};

use crate::domains::{BuilderAction, IdeaMode};
use crate::interfaces::providers::ToolDefinition;
use crate::prompts::GENERATED_IDEA_COUNT;

pub const IDEAS_TOOL: &str = "return_business_ideas";
pub const BUSINESS_PLAN_TOOL: &str = "return_business_plan";
pub const COMPETITOR_TOOL: &str = "return_competitor_analysis";
pub const MARKETING_TOOL: &str = "return_marketing_copy";

fn string_array() -> Value {
    json!({ "type": "array", "items": { "type": "string" } })
}

fn idea_item_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "Business name/concept" },
            "description": {
                "type": "string",
                "description": "2-3 sentence description of the business model"
            },
            "problem": {
                "type": "string",
                "description": "The urgent problem this solves with data/stats if possible"
            },
            "viabilityScore": {
                "type": "integer",
                "minimum": 0,
                "maximum": 100,
                "description": "Score 0-100 based on market demand, competition, and feasibility"
            },
            "profitPotential": {
                "type": "string",
                "description": "Monthly revenue range e.g. '$5K-20K/mo'"
            },
            "timeToLaunch": { "type": "string", "description": "e.g. '1-2 weeks', '3-5 days'" },
            "startupCost": { "type": "string", "description": "e.g. '$100-300'" },
            "experienceNeeded": {
                "type": "string",
                "description": "Beginner, Intermediate, or Experienced"
            },
            "urgencyLevel": {
                "type": "string",
                "enum": ["critical", "high", "medium"],
                "description": "How urgent is the market demand"
            },
            "tags": {
                "type": "array",
                "items": { "type": "string" },
                "description": "3-4 relevant category tags"
            }
        },
        "required": [
            "name", "description", "problem", "viabilityScore", "profitPotential",
            "timeToLaunch", "startupCost", "experienceNeeded", "urgencyLevel", "tags"
        ],
        "additionalProperties": false
    })
}

pub fn ideas_tool(mode: IdeaMode) -> ToolDefinition {
    let mut ideas = json!({ "type": "array", "items": idea_item_schema() });
    match mode {
        IdeaMode::Generate => {
            ideas["minItems"] = json!(GENERATED_IDEA_COUNT);
            ideas["maxItems"] = json!(GENERATED_IDEA_COUNT);
        }
        IdeaMode::Validate => {
            ideas["minItems"] = json!(1);
        }
    }
    ToolDefinition::new(
        IDEAS_TOOL,
        "Return a list of business ideas with detailed analysis.",
        json!({
            "type": "object",
            "properties": { "ideas": ideas },
            "required": ["ideas"],
            "additionalProperties": false
        }),
    )
}

fn business_plan_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "businessName": { "type": "string", "description": "Recommended business name" },
            "tagline": { "type": "string", "description": "Catchy tagline/slogan" },
            "elevatorPitch": { "type": "string", "description": "30-second elevator pitch" },
            "targetAudience": {
                "type": "string",
                "description": "Detailed target audience description"
            },
            "revenueModel": { "type": "string", "description": "How the business makes money" },
            "competitiveAdvantage": {
                "type": "string",
                "description": "What makes this business unique"
            },
            "brandIdentity": {
                "type": "object",
                "properties": {
                    "tone": { "type": "string" },
                    "colors": string_array(),
                    "fonts": string_array(),
                    "personality": { "type": "string" }
                },
                "required": ["tone", "colors", "fonts", "personality"]
            },
            "launchTimeline": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "week": { "type": "string" },
                        "title": { "type": "string" },
                        "tasks": string_array()
                    },
                    "required": ["week", "title", "tasks"]
                }
            },
            "marketingStrategy": {
                "type": "object",
                "properties": {
                    "channels": string_array(),
                    "contentIdeas": string_array(),
                    "launchTactics": string_array(),
                    "budgetAllocation": { "type": "string" }
                },
                "required": ["channels", "contentIdeas", "launchTactics", "budgetAllocation"]
            },
            "financialProjection": {
                "type": "object",
                "properties": {
                    "month1": { "type": "string" },
                    "month3": { "type": "string" },
                    "month6": { "type": "string" },
                    "month12": { "type": "string" },
                    "breakEvenTimeline": { "type": "string" },
                    "keyExpenses": string_array()
                },
                "required": [
                    "month1", "month3", "month6", "month12", "breakEvenTimeline", "keyExpenses"
                ]
            },
            "risks": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Top 5 risks and mitigations"
            },
            "nextSteps": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Immediate next 5 actions to take today"
            }
        },
        "required": [
            "businessName", "tagline", "elevatorPitch", "targetAudience", "revenueModel",
            "competitiveAdvantage", "brandIdentity", "launchTimeline", "marketingStrategy",
            "financialProjection", "risks", "nextSteps"
        ],
        "additionalProperties": false
    })
}

fn competitor_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "marketOverview": { "type": "string" },
            "directCompetitors": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "name": { "type": "string" },
                        "strengths": { "type": "string" },
                        "weaknesses": { "type": "string" },
                        "pricing": { "type": "string" },
                        "marketShare": { "type": "string" }
                    },
                    "required": ["name", "strengths", "weaknesses", "pricing", "marketShare"]
                }
            },
            "marketGaps": string_array(),
            "positioningStrategy": { "type": "string" },
            "differentiators": string_array(),
            "threatLevel": {
                "type": "string",
                "enum": ["Low", "Medium", "High"],
                "description": "Low, Medium, or High"
            }
        },
        "required": [
            "marketOverview", "directCompetitors", "marketGaps", "positioningStrategy",
            "differentiators", "threatLevel"
        ],
        "additionalProperties": false
    })
}

fn marketing_parameters() -> Value {
    json!({
        "type": "object",
        "properties": {
            "headlines": {
                "type": "array",
                "items": { "type": "string" },
                "description": "5 attention-grabbing headlines"
            },
            "emailSequence": {
                "type": "array",
                "items": {
                    "type": "object",
                    "properties": {
                        "subject": { "type": "string" },
                        "preview": { "type": "string" },
                        "body": { "type": "string" }
                    },
                    "required": ["subject", "preview", "body"]
                }
            },
            "socialPosts": {
                "type": "array",
                "items": { "type": "string" },
                "description": "5 social media posts"
            },
            "landingPageCopy": {
                "type": "object",
                "properties": {
                    "heroHeadline": { "type": "string" },
                    "heroSubheadline": { "type": "string" },
                    "features": string_array(),
                    "cta": { "type": "string" },
                    "testimonialTemplates": string_array()
                },
                "required": [
                    "heroHeadline", "heroSubheadline", "features", "cta", "testimonialTemplates"
                ]
            },
            "adCopy": {
                "type": "array",
                "items": { "type": "string" },
                "description": "3 ad copy variants"
            }
        },
        "required": ["headlines", "emailSequence", "socialPosts", "landingPageCopy", "adCopy"],
        "additionalProperties": false
    })
}

pub fn builder_tool(action: BuilderAction) -> ToolDefinition {
    match action {
        BuilderAction::FullPlan => ToolDefinition::new(
            BUSINESS_PLAN_TOOL,
            "Return a comprehensive business plan",
            business_plan_parameters(),
        ),
        BuilderAction::CompetitorAnalysis => ToolDefinition::new(
            COMPETITOR_TOOL,
            "Return competitive analysis",
            competitor_parameters(),
        ),
        BuilderAction::MarketingCopy => ToolDefinition::new(
            MARKETING_TOOL,
            "Return marketing copy",
            marketing_parameters(),
        ),
    }
}
