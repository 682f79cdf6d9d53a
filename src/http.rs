//! HTTP API over the puzzle service.

use crate::catalog::PuzzleSummary;
use crate::games::voxels::{ActionError, ActionResult, Voxel};
use crate::service::{PuzzleDetail, PuzzleService, ServiceError, SessionView};
use crate::session::SessionStore;
use axum::Router;
use axum::body::Body;
use axum::extract::rejection::JsonRejection;
use axum::extract::{Path, State};
use axum::http::{HeaderMap, HeaderValue, Request, StatusCode};
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::sync::Arc;
use tower::ServiceBuilder;
use tracing::{debug, error, info, instrument, warn};

/// Header carrying the player's session key.
pub const SESSION_HEADER: &str = "x-session-id";

/// Body of a carve request.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct ActionRequest {
    /// Column.
    pub x: i64,
    /// Row.
    pub y: i64,
    /// Layer.
    pub z: i64,
}

/// Response to starting a puzzle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartResponse {
    /// Session key to send back in the `x-session-id` header.
    pub session_id: String,
    /// Starting lives.
    pub lives: i64,
}

/// Builds the API router.
pub fn router<S>(service: Arc<PuzzleService<S>>) -> Router
where
    S: SessionStore + 'static,
{
    Router::new()
        .route("/api/healthz", get(healthz))
        .route("/api/puzzles", get(list_puzzles::<S>))
        .route("/api/puzzles/{id}", get(get_puzzle::<S>))
        .route("/api/puzzles/{id}/start", post(start_puzzle::<S>))
        .route("/api/puzzles/{id}/actions", post(submit_action::<S>))
        .route(
            "/api/session",
            get(get_session::<S>).delete(abandon_session::<S>),
        )
        .layer(ServiceBuilder::new().map_request(|req: Request<Body>| {
            info!(method = %req.method(), uri = %req.uri(), "Incoming HTTP request");
            req
        }))
        .with_state(service)
}

/// Error body returned by every failing endpoint.
#[derive(Debug)]
struct ApiError {
    status: StatusCode,
    message: String,
}

impl ApiError {
    fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            status,
            message: message.into(),
        }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match &err {
            ServiceError::NotFound(_) => Self::new(StatusCode::NOT_FOUND, "puzzle not found"),
            ServiceError::Action(ActionError::SessionMismatch { .. }) => {
                Self::new(StatusCode::BAD_REQUEST, "session mismatch")
            }
            ServiceError::Action(ActionError::AlreadyRemoved(_)) => {
                Self::new(StatusCode::BAD_REQUEST, "voxel already removed")
            }
            ServiceError::Action(ActionError::OutOfBounds(_)) => {
                Self::new(StatusCode::BAD_REQUEST, "coordinates out of bounds")
            }
            ServiceError::NoSession => Self::new(StatusCode::BAD_REQUEST, "no game in progress"),
            ServiceError::Persistence(e) => {
                error!(error = %e, "Session persistence failed");
                Self::new(StatusCode::INTERNAL_SERVER_ERROR, "failed to save session")
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (self.status, Json(json!({ "error": self.message }))).into_response()
    }
}

fn session_key(headers: &HeaderMap) -> Option<String> {
    headers
        .get(SESSION_HEADER)
        .and_then(|value| value.to_str().ok())
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::to_string)
}

async fn healthz() -> &'static str {
    "ok"
}

/// GET /api/puzzles - summaries of every puzzle.
async fn list_puzzles<S: SessionStore>(
    State(service): State<Arc<PuzzleService<S>>>,
) -> Json<Vec<PuzzleSummary>> {
    Json(service.summaries())
}

/// GET /api/puzzles/{id} - puzzle detail with clues.
#[instrument(skip(service))]
async fn get_puzzle<S: SessionStore>(
    State(service): State<Arc<PuzzleService<S>>>,
    Path(id): Path<String>,
) -> Result<Json<PuzzleDetail>, ApiError> {
    Ok(Json(service.detail(&id)?))
}

/// POST /api/puzzles/{id}/start - starts a game, issuing a session key if needed.
#[instrument(skip(service, headers))]
async fn start_puzzle<S: SessionStore>(
    State(service): State<Arc<PuzzleService<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
) -> Result<Response, ApiError> {
    let key = session_key(&headers).unwrap_or_else(|| {
        let key = uuid::Uuid::new_v4().to_string();
        debug!(session_id = %key, "Issued new session key");
        key
    });

    let state = service.start_game(&key, &id)?;

    let header = HeaderValue::from_str(&key)
        .map_err(|_| ApiError::new(StatusCode::BAD_REQUEST, "invalid session key"))?;
    let body = StartResponse {
        session_id: key,
        lives: *state.remaining_lives(),
    };
    Ok(([(SESSION_HEADER, header)], Json(body)).into_response())
}

/// POST /api/puzzles/{id}/actions - carve one voxel.
#[instrument(skip(service, headers, payload))]
async fn submit_action<S: SessionStore>(
    State(service): State<Arc<PuzzleService<S>>>,
    Path(id): Path<String>,
    headers: HeaderMap,
    payload: Result<Json<ActionRequest>, JsonRejection>,
) -> Result<Json<ActionResult>, ApiError> {
    let Some(key) = session_key(&headers) else {
        warn!("Action without session");
        return Err(ApiError::new(StatusCode::BAD_REQUEST, "session mismatch"));
    };

    let Json(action) = payload.map_err(|e| {
        debug!(error = %e, "Rejected action payload");
        ApiError::new(StatusCode::BAD_REQUEST, "invalid payload")
    })?;

    let voxel = Voxel::new(action.x, action.y, action.z);
    Ok(Json(service.submit_action(&key, &id, voxel)?))
}

/// GET /api/session - progress of the current game.
async fn get_session<S: SessionStore>(
    State(service): State<Arc<PuzzleService<S>>>,
    headers: HeaderMap,
) -> Result<Json<SessionView>, ApiError> {
    let key = session_key(&headers).ok_or(ServiceError::NoSession)?;
    Ok(Json(service.session(&key)?))
}

/// DELETE /api/session - abandon the current game.
async fn abandon_session<S: SessionStore>(
    State(service): State<Arc<PuzzleService<S>>>,
    headers: HeaderMap,
) -> Result<StatusCode, ApiError> {
    if let Some(key) = session_key(&headers) {
        service.abandon(&key)?;
    }
    Ok(StatusCode::NO_CONTENT)
}
