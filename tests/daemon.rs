mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use httpmock::Method::POST;
use httpmock::MockServer;
use serde_json::{json, Value};
use tower::ServiceExt;

use common::{gateway_app, ideas_arguments, idea_json, profile_json, text_completion, tool_completion};

async fn send(app: Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let body = response.into_body().collect().await.unwrap().to_bytes();
    let value = if body.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&body).unwrap()
    };
    (status, value)
}

fn post(path: &str, token: Option<&str>, body: &Value) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(path)
        .header("content-type", "application/json");
    if let Some(token) = token {
        builder = builder.header("authorization", format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

#[tokio::test]
async fn health_reports_ok() {
    let server = MockServer::start_async().await;
    let request = Request::builder()
        .uri("/health")
        .body(Body::empty())
        .unwrap();
    let (status, body) = send(gateway_app(&server, None), request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert!(body["version"].as_str().unwrap().starts_with(env!("CARGO_PKG_VERSION")));
}

#[tokio::test]
async fn preflight_allows_any_origin() {
    let server = MockServer::start_async().await;
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/generate-ideas")
        .header("origin", "https://example.com")
        .header("access-control-request-method", "POST")
        .header(
            "access-control-request-headers",
            "authorization,x-client-info,apikey,content-type",
        )
        .body(Body::empty())
        .unwrap();
    let response = gateway_app(&server, None).oneshot(request).await.unwrap();

    assert!(response.status().is_success());
    let headers = response.headers();
    assert_eq!(headers["access-control-allow-origin"], "*");
    let allowed = headers["access-control-allow-headers"]
        .to_str()
        .unwrap()
        .to_ascii_lowercase();
    for name in ["authorization", "x-client-info", "apikey", "content-type"] {
        assert!(allowed.contains(name), "{name} missing from {allowed}");
    }
}

#[tokio::test]
async fn missing_bearer_is_rejected_before_the_gateway() {
    let server = MockServer::start_async().await;
    let gateway = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(tool_completion("return_business_ideas", &ideas_arguments(6)));
        })
        .await;

    let body = json!({"profile": profile_json()});
    let (status, value) = send(gateway_app(&server, None), post("/generate-ideas", None, &body)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(value["error"], "Missing authorization header");

    let (status, _) = send(
        gateway_app(&server, Some("shared")),
        post("/generate-ideas", Some("other"), &body),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    gateway.assert_calls(0);
}

#[tokio::test]
async fn generate_returns_six_numbered_ideas() {
    let server = MockServer::start_async().await;
    let gateway = server
        .mock_async(|when, then| {
            when.method(POST)
                .path("/chat/completions")
                .header("authorization", "Bearer gateway-key");
            then.status(200)
                .json_body(tool_completion("return_business_ideas", &ideas_arguments(7)));
        })
        .await;

    let body = json!({"profile": profile_json(), "mode": "generate"});
    let (status, value) = send(
        gateway_app(&server, Some("shared")),
        post("/generate-ideas", Some("shared"), &body),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let ideas = value["ideas"].as_array().unwrap();
    assert_eq!(ideas.len(), 6);
    let ids: Vec<&str> = ideas.iter().map(|idea| idea["id"].as_str().unwrap()).collect();
    assert_eq!(ids, ["1", "2", "3", "4", "5", "6"]);
    assert_eq!(ideas[0]["name"], "Idea 1");
    assert_eq!(ideas[0]["viabilityScore"], 82);
    gateway.assert_calls(1);
}

#[tokio::test]
async fn validate_mode_keeps_model_batch_size() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(tool_completion("return_business_ideas", &ideas_arguments(4)));
        })
        .await;

    let body = json!({
        "profile": profile_json(),
        "mode": "validate",
        "userIdea": "Subscription box of homemade dog biscuits"
    });
    let (status, value) = send(gateway_app(&server, None), post("/generate-ideas", Some("anon"), &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["ideas"].as_array().unwrap().len(), 4);
    assert_eq!(value["ideas"][3]["id"], "4");
}

#[tokio::test]
async fn blank_validate_idea_is_a_bad_request() {
    let server = MockServer::start_async().await;
    let gateway = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(tool_completion("return_business_ideas", &ideas_arguments(1)));
        })
        .await;

    let body = json!({"profile": profile_json(), "mode": "validate", "userIdea": "  "});
    let (status, value) = send(gateway_app(&server, None), post("/generate-ideas", Some("anon"), &body)).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(value["error"].is_string());
    gateway.assert_calls(0);
}

#[tokio::test]
async fn gateway_throttling_passes_through() {
    for (upstream, expected, message) in [
        (429, StatusCode::TOO_MANY_REQUESTS, "Rate limit exceeded. Please try again in a moment."),
        (402, StatusCode::PAYMENT_REQUIRED, "AI credits exhausted. Please add credits to continue."),
    ] {
        let server = MockServer::start_async().await;
        server
            .mock_async(|when, then| {
                when.method(POST).path("/chat/completions");
                then.status(upstream).body("slow down");
            })
            .await;

        let body = json!({"profile": profile_json()});
        let (status, value) =
            send(gateway_app(&server, None), post("/generate-ideas", Some("anon"), &body)).await;
        assert_eq!(status, expected);
        assert_eq!(value["error"], message);
    }
}

#[tokio::test]
async fn gateway_failure_and_missing_tool_call_are_server_errors() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(503).body("unavailable");
        })
        .await;
    let body = json!({"profile": profile_json()});
    let (status, value) = send(gateway_app(&server, None), post("/generate-ideas", Some("anon"), &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "AI gateway error: 503");

    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(text_completion("Here are some ideas!"));
        })
        .await;
    let (status, value) = send(gateway_app(&server, None), post("/generate-ideas", Some("anon"), &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(value["error"]
        .as_str()
        .unwrap()
        .starts_with("No structured response from AI"));
    assert!(value.get("ideas").is_none());
}

#[tokio::test]
async fn unknown_mode_and_bad_body_are_server_errors() {
    let server = MockServer::start_async().await;
    let body = json!({"profile": profile_json(), "mode": "brainstorm"});
    let (status, value) = send(gateway_app(&server, None), post("/generate-ideas", Some("anon"), &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "Unknown mode: brainstorm");

    let body = json!({"profile": {"expertise": "guru"}});
    let (status, value) = send(gateway_app(&server, None), post("/generate-ideas", Some("anon"), &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(value["error"].is_string());
}

#[tokio::test]
async fn build_business_returns_marketing_copy() {
    let server = MockServer::start_async().await;
    let gateway = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200)
                .json_body(tool_completion("return_marketing_copy", &common::marketing_copy()));
        })
        .await;

    let body = json!({
        "idea": idea_json("3"),
        "profile": profile_json(),
        "action": "marketing_copy"
    });
    let (status, value) = send(gateway_app(&server, None), post("/build-business", Some("anon"), &body)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["action"], "marketing_copy");
    assert_eq!(value["result"]["headlines"].as_array().unwrap().len(), 5);
    assert_eq!(value["result"]["emailSequence"].as_array().unwrap().len(), 3);
    assert_eq!(value["result"]["landingPageCopy"]["cta"], "Start my box");
    gateway.assert_calls(1);
}

#[tokio::test]
async fn build_business_normalizes_threat_level() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(tool_completion(
                "return_competitor_analysis",
                &common::competitor_analysis(),
            ));
        })
        .await;

    let body = json!({
        "idea": idea_json("1"),
        "profile": profile_json(),
        "action": "competitor_analysis"
    });
    let (status, value) = send(gateway_app(&server, None), post("/build-business", Some("anon"), &body)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(value["result"]["threatLevel"], "High");
    assert_eq!(value["result"]["directCompetitors"][0]["name"], "BarkBox");
}

#[tokio::test]
async fn build_business_unknown_action_never_reaches_gateway() {
    let server = MockServer::start_async().await;
    let gateway = server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(200).json_body(tool_completion("x", &json!({})));
        })
        .await;

    let body = json!({
        "idea": idea_json("1"),
        "profile": profile_json(),
        "action": "pitch_deck"
    });
    let (status, value) = send(gateway_app(&server, None), post("/build-business", Some("anon"), &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "Unknown action: pitch_deck");
    gateway.assert_calls(0);
}

#[tokio::test]
async fn build_business_reports_exhausted_credits_as_gateway_error() {
    let server = MockServer::start_async().await;
    server
        .mock_async(|when, then| {
            when.method(POST).path("/chat/completions");
            then.status(402).body("payment required");
        })
        .await;

    let body = json!({
        "idea": idea_json("1"),
        "profile": profile_json(),
        "action": "full_plan"
    });
    let (status, value) = send(gateway_app(&server, None), post("/build-business", Some("anon"), &body)).await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(value["error"], "AI gateway error: 402");
}
