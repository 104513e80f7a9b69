#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use httpmock::MockServer;
use serde_json::{json, Value};

use idea_forge::daemon::{build_router, AppState};
use idea_forge::domains::{Budget, Expertise, Profile};
use idea_forge::providers::openai::OpenAiProvider;
use idea_forge::services::IdeaServices;

pub fn profile() -> Profile {
    Profile::new(Expertise::Beginner, "dogs and baking", Budget::UpTo500, "photography")
}

pub fn profile_json() -> Value {
    json!({
        "expertise": "beginner",
        "interests": "dogs and baking",
        "budget": "$100-$500",
        "skills": "photography"
    })
}

pub fn draft(name: &str) -> Value {
    json!({
        "name": name,
        "description": "Baked treats for picky dogs.",
        "problem": "Store treats are full of fillers.",
        "viabilityScore": 82,
        "profitPotential": "$2K-8K/mo",
        "timeToLaunch": "2 weeks",
        "startupCost": "$200",
        "experienceNeeded": "Beginner",
        "urgencyLevel": "medium",
        "tags": ["pets", "food"]
    })
}

pub fn ideas_arguments(count: usize) -> Value {
    let ideas: Vec<Value> = (1..=count).map(|i| draft(&format!("Idea {i}"))).collect();
    json!({ "ideas": ideas })
}

pub fn idea_json(id: &str) -> Value {
    let mut idea = draft("Barkery");
    idea["id"] = json!(id);
    idea
}

/// A chat-completions body whose first choice calls `tool` with `arguments`.
pub fn tool_completion(tool: &str, arguments: &Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "created": 1,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {
                "role": "assistant",
                "content": null,
                "tool_calls": [{
                    "id": "call_1",
                    "type": "function",
                    "function": {"name": tool, "arguments": arguments.to_string()}
                }]
            },
            "finish_reason": "tool_calls"
        }]
    })
}

pub fn text_completion(content: &str) -> Value {
    json!({
        "id": "chatcmpl-text",
        "object": "chat.completion",
        "created": 1,
        "model": "test-model",
        "choices": [{
            "index": 0,
            "message": {"role": "assistant", "content": content},
            "finish_reason": "stop"
        }]
    })
}

pub fn business_plan() -> Value {
    json!({
        "businessName": "Barkery",
        "tagline": "Treats worth sitting for",
        "elevatorPitch": "Small-batch dog treats delivered monthly.",
        "targetAudience": "Urban dog owners",
        "revenueModel": "Subscription boxes",
        "competitiveAdvantage": "Vet-reviewed recipes",
        "brandIdentity": {
            "tone": "friendly",
            "colors": ["#F4A261"],
            "fonts": ["Poppins"],
            "personality": "cheerful"
        },
        "launchTimeline": [
            {"week": "Week 1", "title": "Recipes", "tasks": ["Bake samples"]},
            {"week": "Week 2", "title": "Presales", "tasks": ["Open waitlist"]}
        ],
        "marketingStrategy": {
            "channels": ["Instagram", "Farmers markets"],
            "contentIdeas": ["Taste-test videos"],
            "launchTactics": ["Free first box"],
            "budgetAllocation": "$300 ads, $200 packaging"
        },
        "financialProjection": {
            "month1": "$400",
            "month3": "$2K",
            "month6": "$5K",
            "month12": "$11K",
            "breakEvenTimeline": "Month 2",
            "keyExpenses": ["Ingredients", "Packaging"]
        },
        "risks": ["Food safety rules"],
        "nextSteps": ["Check cottage food law"]
    })
}

pub fn competitor_analysis() -> Value {
    json!({
        "marketOverview": "Growing premium pet food segment",
        "directCompetitors": [{
            "name": "BarkBox",
            "strengths": "Scale",
            "weaknesses": "Generic treats",
            "pricing": "$35/mo",
            "marketShare": "Large"
        }],
        "marketGaps": ["Local freshness"],
        "positioningStrategy": "Fresh and local",
        "differentiators": ["Same-week baking"],
        "threatLevel": "high"
    })
}

pub fn marketing_copy() -> Value {
    json!({
        "headlines": ["Fresh treats", "Sit. Stay. Snack.", "Bake day", "Good dog food", "Tail wags"],
        "emailSequence": [
            {"subject": "Welcome", "preview": "Your first box", "body": "Thanks for joining."},
            {"subject": "Recipes", "preview": "What's inside", "body": "Only five ingredients."},
            {"subject": "Last call", "preview": "Box ships Friday", "body": "Order by Thursday."}
        ],
        "socialPosts": ["Meet our taste tester", "Behind the oven", "Customer pup of the week"],
        "landingPageCopy": {
            "heroHeadline": "Treats your dog deserves",
            "heroSubheadline": "Baked fresh every week",
            "features": ["Five ingredients", "Local delivery", "Cancel anytime"],
            "cta": "Start my box",
            "testimonialTemplates": ["My dog waits by the door on box day"]
        },
        "adCopy": ["Fresh dog treats, delivered", "Skip the fillers"]
    })
}

pub fn gateway_provider(server: &MockServer) -> OpenAiProvider {
    OpenAiProvider::new(
        "gateway-key".to_string(),
        Some("test-model".to_string()),
        Some(server.base_url()),
    )
    .unwrap()
}

/// Router wired to services that call `server` as the AI gateway.
pub fn gateway_app(server: &MockServer, token: Option<&str>) -> Router {
    let services = IdeaServices::new(Arc::new(gateway_provider(server)));
    build_router(AppState {
        backend: Arc::new(services),
        token: token.map(str::to_string),
    })
}
