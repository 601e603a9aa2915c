//! HTTP surface
//!
//! `GET /generate_course?topic=...` is the only route. Topic presence and
//! length are checked while binding the query (422); content rules are the
//! validator's job (400).

use std::sync::Arc;

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::http::{HeaderValue, Method, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tracing::{error, info, warn};

use crate::error::CourseError;
use crate::orchestrator::CourseOrchestrator;
use crate::syllabus::Syllabus;
use crate::topic::MAX_TOPIC_CHARS;

pub const GENERATION_FAILED_DETAIL: &str = "Unable to generate course content. Please try again later.";
pub const UNEXPECTED_DETAIL: &str = "An unexpected error occurred. Please try again later.";

pub const DEFAULT_ALLOWED_ORIGINS: &str = "http://localhost:5173,https://gomicrolearn.vercel.app";

#[derive(Clone)]
pub struct AppState {
    orchestrator: Arc<CourseOrchestrator>,
}

impl AppState {
    pub fn new(orchestrator: CourseOrchestrator) -> Self {
        Self {
            orchestrator: Arc::new(orchestrator),
        }
    }
}

/// Error body and status returned to callers.
#[derive(Debug)]
pub enum ApiError {
    Unprocessable(String),
    BadRequest(String),
    Internal(&'static str),
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub detail: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, detail) = match self {
            ApiError::Unprocessable(detail) => (StatusCode::UNPROCESSABLE_ENTITY, detail),
            ApiError::BadRequest(detail) => (StatusCode::BAD_REQUEST, detail),
            ApiError::Internal(detail) => (StatusCode::INTERNAL_SERVER_ERROR, detail.to_string()),
        };
        (status, Json(ErrorDetail { detail })).into_response()
    }
}

impl From<CourseError> for ApiError {
    fn from(err: CourseError) -> Self {
        match err {
            CourseError::Validation(e) => {
                warn!("Rejected topic: {}", e);
                ApiError::BadRequest(e.to_string())
            }
            CourseError::Generation(e) => {
                error!("Course generation failed: {}", e);
                ApiError::Internal(GENERATION_FAILED_DETAIL)
            }
            CourseError::Unexpected(e) => {
                error!("Unexpected error while generating course: {}", e);
                ApiError::Internal(UNEXPECTED_DETAIL)
            }
        }
    }
}

#[derive(Debug, Deserialize)]
struct CourseQuery {
    topic: Option<String>,
}

/// Enforce presence and the 1..=200 character bound on the raw parameter.
fn bind_topic(topic: Option<String>) -> Result<String, ApiError> {
    let topic = topic.ok_or_else(|| {
        ApiError::Unprocessable("Query parameter 'topic' is required".to_string())
    })?;
    let len = topic.chars().count();
    if len == 0 {
        return Err(ApiError::Unprocessable(
            "Query parameter 'topic' must have at least 1 character".to_string(),
        ));
    }
    if len > MAX_TOPIC_CHARS {
        return Err(ApiError::Unprocessable(format!(
            "Query parameter 'topic' must have at most {} characters",
            MAX_TOPIC_CHARS
        )));
    }
    Ok(topic)
}

async fn generate_course_handler(
    State(state): State<AppState>,
    query: Result<Query<CourseQuery>, QueryRejection>,
) -> Result<Json<Syllabus>, ApiError> {
    let Query(params) = query.map_err(|rejection| {
        warn!("Rejected query string: {}", rejection.body_text());
        ApiError::Unprocessable(rejection.body_text())
    })?;
    let topic = bind_topic(params.topic)?;
    info!("Course requested for topic ({} chars)", topic.chars().count());

    let syllabus = state.orchestrator.handle_guarded(Some(topic)).await?;
    Ok(Json(syllabus))
}

/// Parse a comma-separated origin list. Blank entries are skipped and
/// trailing slashes removed, since browsers never send them.
pub fn parse_allowed_origins(raw: &str) -> Result<Vec<HeaderValue>, String> {
    raw.split(',')
        .map(|origin| origin.trim().trim_end_matches('/'))
        .filter(|origin| !origin.is_empty())
        .map(|origin| {
            HeaderValue::from_str(origin).map_err(|e| format!("Invalid origin '{}': {}", origin, e))
        })
        .collect()
}

/// A `*` entry anywhere in `origins` allows every origin.
pub fn cors_layer(origins: Vec<HeaderValue>) -> CorsLayer {
    let allow_origin = if origins.iter().any(|origin| origin == "*") {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };
    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET])
        .allow_headers(Any)
}

pub fn router(state: AppState, cors: CorsLayer) -> Router {
    Router::new()
        .route("/generate_course", get(generate_course_handler))
        .layer(cors)
        .with_state(state)
}

/// Serve `router` on `listener` until `shutdown` resolves.
pub async fn serve<F>(listener: TcpListener, router: Router, shutdown: F) -> std::io::Result<()>
where
    F: std::future::Future<Output = ()> + Send + 'static,
{
    if let Ok(addr) = listener.local_addr() {
        info!("MicroLearn listening on http://{}", addr);
    }
    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown)
        .await
}
