//! HTTP API server for integration with other systems.
//!
//! Exposes the three input kinds (text, image, audio) as REST endpoints.

use crate::cli::preflight::{self, Operation};
use crate::cli::Output;
use crate::config::Settings;
use crate::error::LibrisError;
use crate::orchestrator::{Orchestrator, Outcome};
use crate::recommend::Advice;
use axum::{
    body::Bytes,
    extract::{rejection::JsonRejection, DefaultBodyLimit, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tracing::warn;

/// Largest accepted upload (images and voice notes).
const MAX_UPLOAD_BYTES: usize = 25 * 1024 * 1024;

/// Shared application state.
struct AppState {
    orchestrator: Orchestrator,
}

/// Run the HTTP API server.
pub async fn run_serve(host: &str, port: u16, settings: Settings) -> anyhow::Result<()> {
    if let Err(e) = preflight::check(Operation::RecommendText, &settings) {
        Output::error(&format!("{}", e));
        return Err(e.into());
    }

    let orchestrator = Orchestrator::new(settings)?;
    if !orchestrator.has_classifier() {
        Output::warning("No trained genre model found. Run 'libris train' first.");
    }
    if !orchestrator.has_speech() {
        Output::warning("Speech-to-text API key missing; /recommend/audio will fail.");
    }

    let state = Arc::new(AppState { orchestrator });

    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let app = Router::new()
        .route("/health", get(health))
        .route("/recommend/text", post(recommend_text))
        .route("/recommend/image", post(recommend_image))
        .route("/recommend/audio", post(recommend_audio))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(cors)
        .with_state(state);

    let addr = format!("{}:{}", host, port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    Output::header("Libris API Server");
    println!();
    Output::success(&format!("Listening on http://{}", addr));
    println!();
    println!("Endpoints:");
    Output::kv("Health", "GET  /health");
    Output::kv("Text", "POST /recommend/text   {\"text\": \"...\"}");
    Output::kv("Image", "POST /recommend/image  (image/png, image/jpeg body)");
    Output::kv("Audio", "POST /recommend/audio  (audio/wav, audio/mp3, audio/mp4 body)");
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    axum::serve(listener, app).await?;

    Ok(())
}

// === Request/Response Types ===

#[derive(Deserialize, Debug)]
struct TextRequest {
    text: String,
}

#[derive(Serialize, Debug, Default)]
struct RecommendResponse {
    success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    genre: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    recommendation: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    extracted_text: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
}

fn outcome_response(outcome: Outcome) -> (StatusCode, RecommendResponse) {
    match outcome.result {
        Ok(rec) => (
            StatusCode::OK,
            RecommendResponse {
                success: rec.advice.is_generated(),
                error: match &rec.advice {
                    Advice::Generated(_) => None,
                    other => Some(other.to_string()),
                },
                recommendation: match rec.advice {
                    Advice::Generated(text) => Some(text),
                    _ => None,
                },
                genre: Some(rec.genre),
                extracted_text: outcome.extracted_text,
            },
        ),
        Err(rejection) => (
            StatusCode::UNPROCESSABLE_ENTITY,
            RecommendResponse {
                extracted_text: outcome.extracted_text,
                error: Some(rejection.to_string()),
                ..Default::default()
            },
        ),
    }
}

fn error_response(err: LibrisError) -> (StatusCode, RecommendResponse) {
    let status = match &err {
        LibrisError::NoTextDetected | LibrisError::NoSpeechDetected => {
            StatusCode::UNPROCESSABLE_ENTITY
        }
        LibrisError::InvalidInput(_) => StatusCode::BAD_REQUEST,
        LibrisError::UnsupportedFormat(_) => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        LibrisError::Config(_) | LibrisError::ToolNotFound(_) => StatusCode::SERVICE_UNAVAILABLE,
        LibrisError::Speech(_) | LibrisError::Http(_) => StatusCode::BAD_GATEWAY,
        _ => StatusCode::INTERNAL_SERVER_ERROR,
    };

    warn!("Request failed: {}", err);
    (
        status,
        RecommendResponse {
            error: Some(err.to_string()),
            ..Default::default()
        },
    )
}

fn into_http(result: crate::error::Result<Outcome>) -> axum::response::Response {
    let (status, body) = match result {
        Ok(outcome) => outcome_response(outcome),
        Err(e) => error_response(e),
    };
    (status, Json(body)).into_response()
}

fn text_request(
    payload: std::result::Result<Json<TextRequest>, JsonRejection>,
) -> crate::error::Result<TextRequest> {
    payload
        .map(|Json(req)| req)
        .map_err(|rejection| LibrisError::InvalidInput(rejection.body_text()))
}

fn content_type(headers: &HeaderMap) -> String {
    headers
        .get(CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("")
        .to_string()
}

// === Handlers ===

async fn health() -> impl IntoResponse {
    Json(serde_json::json!({ "status": "ok" }))
}

async fn recommend_text(
    State(state): State<Arc<AppState>>,
    payload: std::result::Result<Json<TextRequest>, JsonRejection>,
) -> impl IntoResponse {
    match text_request(payload) {
        Ok(req) => into_http(Ok(state.orchestrator.from_text(&req.text).await)),
        Err(e) => into_http(Err(e)),
    }
}

async fn recommend_image(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let mime = content_type(&headers);
    into_http(state.orchestrator.from_image_bytes(&body, &mime).await)
}

async fn recommend_audio(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> impl IntoResponse {
    let mime = content_type(&headers);
    into_http(state.orchestrator.from_audio_bytes(body.to_vec(), &mime).await)
}
