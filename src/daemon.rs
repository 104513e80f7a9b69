use std::future::Future;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Json, State},
    http::{header, HeaderMap, HeaderName, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::{Deserialize, Serialize};
use tower_http::cors::{Any, CorsLayer};
use tracing::{error, info, warn};

use crate::config::Config;
use crate::domains::{BuilderAction, BuilderResult, Idea, IdeaMode, IdeaRequest, Profile};
use crate::error::{IdeaForgeError, Result};
use crate::interfaces::services::IdeaBackend;
use crate::providers::openai::OpenAiProvider;
use crate::services::IdeaServices;

#[derive(Clone)]
pub struct AppState {
    pub backend: Arc<dyn IdeaBackend>,
    /// Shared bearer token; `None` accepts any well-formed bearer credential.
    pub token: Option<String>,
}

#[derive(Serialize)]
struct HealthResponse {
    status: String,
    version: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateIdeasRequest {
    profile: Profile,
    mode: Option<String>,
    #[serde(default)]
    user_idea: Option<String>,
}

#[derive(Serialize)]
struct GenerateIdeasResponse {
    ideas: Vec<Idea>,
}

#[derive(Deserialize)]
struct BuildBusinessRequest {
    idea: Idea,
    profile: Profile,
    action: String,
}

#[derive(Serialize)]
struct BuildBusinessResponse {
    result: BuilderResult,
    action: BuilderAction,
}

#[derive(Serialize)]
struct ErrorResponse {
    error: String,
}

pub fn cors_layer() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([
            header::AUTHORIZATION,
            HeaderName::from_static("x-client-info"),
            HeaderName::from_static("apikey"),
            header::CONTENT_TYPE,
        ])
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/generate-ideas", post(generate_ideas))
        .route("/build-business", post(build_business))
        .with_state(state)
        .layer(cors_layer())
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: format!("{}+{}", env!("CARGO_PKG_VERSION"), crate::GIT_SHA),
    })
}

async fn generate_ideas(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<GenerateIdeasRequest>, JsonRejection>,
) -> Response {
    if let Err(err) = authorize(&headers, state.token.as_deref()) {
        return error_response("generate-ideas", err);
    }

    let outcome = async {
        let Json(payload) = payload.map_err(rejection_error)?;
        let mode = match payload.mode.as_deref() {
            None => IdeaMode::Generate,
            Some(raw) => raw.parse()?,
        };
        let request = IdeaRequest {
            profile: payload.profile,
            mode,
            user_idea: payload.user_idea.unwrap_or_default(),
        };
        state.backend.generate_ideas(&request).await
    }
    .await;

    match outcome {
        Ok(ideas) => (StatusCode::OK, Json(GenerateIdeasResponse { ideas })).into_response(),
        Err(err) => error_response("generate-ideas", err),
    }
}

async fn build_business(
    State(state): State<AppState>,
    headers: HeaderMap,
    payload: std::result::Result<Json<BuildBusinessRequest>, JsonRejection>,
) -> Response {
    if let Err(err) = authorize(&headers, state.token.as_deref()) {
        return error_response("build-business", err);
    }

    let outcome = async {
        let Json(payload) = payload.map_err(rejection_error)?;
        let action: BuilderAction = payload.action.parse()?;
        let result = state
            .backend
            .run_builder(&payload.idea, &payload.profile, action)
            .await?;
        Ok::<_, IdeaForgeError>(BuildBusinessResponse { result, action })
    }
    .await;

    match outcome {
        Ok(body) => (StatusCode::OK, Json(body)).into_response(),
        Err(err) => error_response("build-business", err),
    }
}

fn rejection_error(rejection: JsonRejection) -> IdeaForgeError {
    IdeaForgeError::Serialization(rejection.body_text())
}

fn error_response(endpoint: &str, err: IdeaForgeError) -> Response {
    let status =
        StatusCode::from_u16(err.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
    if status.is_server_error() {
        error!("{endpoint} error: {err}");
    } else {
        warn!("{endpoint} rejected: {err}");
    }
    (
        status,
        Json(ErrorResponse {
            error: err.public_message(),
        }),
    )
        .into_response()
}

fn authorize(headers: &HeaderMap, token: Option<&str>) -> Result<()> {
    let credential = headers
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .unwrap_or_default();
    let bearer = credential
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .ok_or(IdeaForgeError::MissingCredential)?;

    match token.map(str::trim) {
        Some(expected) if expected != bearer => Err(IdeaForgeError::MissingCredential),
        _ => Ok(()),
    }
}

pub async fn run(config: Config) -> Result<()> {
    run_with_shutdown(config, futures::future::pending::<()>()).await
}

pub async fn run_with_shutdown<F>(config: Config, shutdown: F) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let provider = OpenAiProvider::from_config(&config.gateway)?;
    info!(model = %provider.model(), base_url = %config.gateway.base_url(), "AI gateway configured");
    if config.auth.token.is_none() {
        warn!("No shared auth token configured; accepting any bearer credential");
    }

    let state = AppState {
        backend: Arc::new(IdeaServices::new(Arc::new(provider))),
        token: config.auth.token.clone(),
    };
    let app = build_router(state);

    let addr = format!("{}:{}", config.host(), config.port());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| IdeaForgeError::Runtime(e.to_string()))?;
    info!("idea-forged listening on {addr}");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await
        .map_err(|e| IdeaForgeError::Runtime(e.to_string()))?;

    Ok(())
}
