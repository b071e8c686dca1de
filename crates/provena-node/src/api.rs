//! HTTP API server for the Provena node.
//!
//! Read endpoints answer straight from the in-memory registry; every
//! mutation is authenticated, then forwarded to the node's event loop so
//! state transitions stay globally ordered. Failure kinds map to distinct
//! status codes and a machine-readable `kind` so callers can tell "already
//! registered" from "not permitted" from "connection lost".

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use std::net::SocketAddr;
use std::sync::Arc;

use provena_core::{Address, ContentId, ContentRecord, ModificationRecord, Source};
use provena_crypto::payload;
use provena_registry::RegistryError;

use crate::auth::{self, AuthError};
use crate::commands::NodeCommand;
use crate::state::NodeState;

// --- Request types ---

#[derive(Deserialize)]
pub struct RegisterSourceRequest {
    pub name: String,
    pub public_key: String,
    pub signature: String,
}

#[derive(Deserialize)]
pub struct PublishContentRequest {
    pub fingerprint: String,
    pub content_type: String,
    pub public_key: String,
    pub signature: String,
}

#[derive(Deserialize)]
pub struct RecordModificationRequest {
    pub fingerprint: String,
    pub description: String,
    pub public_key: String,
    pub signature: String,
}

#[derive(Deserialize)]
pub struct AdjustCredibilityRequest {
    pub target: String,
    pub delta: i64,
    pub public_key: String,
    pub signature: String,
}

#[derive(Deserialize)]
pub struct VerifySourceRequest {
    pub target: String,
    pub verified: bool,
    pub public_key: String,
    pub signature: String,
}

#[derive(Deserialize)]
pub struct VerifyContentRequest {
    pub content_id: String,
    pub verified: bool,
    pub public_key: String,
    pub signature: String,
}

// --- Response types ---

#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Serialize)]
pub struct StatusResponse {
    pub version: String,
    pub source_count: usize,
    pub content_count: usize,
    pub uptime_secs: u64,
    pub storage_errors: u64,
}

#[derive(Serialize)]
pub struct ModificationIndexResponse {
    pub content_id: ContentId,
    pub index: u64,
}

#[derive(Serialize)]
pub struct HistoryResponse {
    pub content_id: ContentId,
    pub modifications: Vec<ModificationRecord>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct PublisherContentResponse {
    pub publisher: Address,
    pub content_ids: Vec<ContentId>,
    pub count: usize,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub kind: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn registry_error(e: RegistryError) -> ApiError {
    let (status, kind) = match &e {
        RegistryError::AlreadyRegistered(_) => (StatusCode::CONFLICT, "already_registered"),
        RegistryError::UnregisteredPublisher(_) => {
            (StatusCode::UNPROCESSABLE_ENTITY, "unregistered_publisher")
        }
        RegistryError::SourceNotFound(_) | RegistryError::ContentNotFound(_) => {
            (StatusCode::NOT_FOUND, "not_found")
        }
        RegistryError::NotAuthorized(_) => (StatusCode::FORBIDDEN, "not_authorized"),
        RegistryError::OutOfRange { .. } => (StatusCode::NOT_FOUND, "out_of_range"),
        RegistryError::InvalidName(_) => (StatusCode::BAD_REQUEST, "invalid_name"),
        RegistryError::Substrate(_) => (StatusCode::SERVICE_UNAVAILABLE, "substrate_unavailable"),
        RegistryError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, "internal"),
    };
    (
        status,
        Json(ErrorResponse {
            error: e.to_string(),
            kind: kind.into(),
        }),
    )
}

fn auth_error(e: AuthError) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: e.to_string(),
            kind: "authentication_failed".into(),
        }),
    )
}

fn bad_request(message: String) -> ApiError {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message,
            kind: "bad_request".into(),
        }),
    )
}

fn parse_address(s: &str) -> Result<Address, ApiError> {
    Address::new(s).map_err(|e| bad_request(e.to_string()))
}

fn parse_content_id(s: &str) -> Result<ContentId, ApiError> {
    ContentId::new(s).map_err(|e| bad_request(e.to_string()))
}

// --- Handlers ---

async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".into(),
    })
}

async fn handle_status(State(state): State<Arc<NodeState>>) -> Json<StatusResponse> {
    Json(StatusResponse {
        version: env!("CARGO_PKG_VERSION").to_string(),
        source_count: state.registry.source_count(),
        content_count: state.registry.content_count(),
        uptime_secs: state.start_time.elapsed().as_secs(),
        storage_errors: state.storage_error_count(),
    })
}

async fn handle_register_source(
    State(state): State<Arc<NodeState>>,
    Json(req): Json<RegisterSourceRequest>,
) -> Result<Json<Source>, ApiError> {
    let message = payload::register_payload(&req.name);
    let address =
        auth::authenticate(&req.public_key, &req.signature, &message).map_err(auth_error)?;

    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    let cmd = NodeCommand::RegisterSource {
        address,
        public_key: req.public_key.to_lowercase(),
        name: req.name,
        reply: reply_tx,
    };
    send_command_and_await(&state, cmd, reply_rx).await
}

async fn handle_get_source(
    State(state): State<Arc<NodeState>>,
    Path(address): Path<String>,
) -> Result<Json<Source>, ApiError> {
    let address = parse_address(&address)?;
    state
        .registry
        .get_source(&address)
        .map(Json)
        .map_err(registry_error)
}

async fn handle_publish_content(
    State(state): State<Arc<NodeState>>,
    Json(req): Json<PublishContentRequest>,
) -> Result<Json<ContentRecord>, ApiError> {
    let message = payload::publish_payload(&req.fingerprint, &req.content_type);
    let publisher =
        auth::authenticate(&req.public_key, &req.signature, &message).map_err(auth_error)?;
    auth::require_known_key(&state.registry, &publisher, &req.public_key.to_lowercase())
        .map_err(auth_error)?;

    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    let cmd = NodeCommand::PublishContent {
        publisher,
        fingerprint: req.fingerprint,
        content_type: req.content_type,
        reply: reply_tx,
    };
    send_command_and_await(&state, cmd, reply_rx).await
}

async fn handle_get_content(
    State(state): State<Arc<NodeState>>,
    Path(content_id): Path<String>,
) -> Result<Json<ContentRecord>, ApiError> {
    let content_id = parse_content_id(&content_id)?;
    state
        .registry
        .get_content(&content_id)
        .map(Json)
        .map_err(registry_error)
}

async fn handle_record_modification(
    State(state): State<Arc<NodeState>>,
    Path(content_id): Path<String>,
    Json(req): Json<RecordModificationRequest>,
) -> Result<Json<ModificationIndexResponse>, ApiError> {
    let content_id = parse_content_id(&content_id)?;
    let message = payload::modify_payload(content_id.as_str(), &req.fingerprint, &req.description);
    let modifier =
        auth::authenticate(&req.public_key, &req.signature, &message).map_err(auth_error)?;
    auth::require_known_key(&state.registry, &modifier, &req.public_key.to_lowercase())
        .map_err(auth_error)?;

    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    let cmd = NodeCommand::RecordModification {
        content_id: content_id.clone(),
        fingerprint: req.fingerprint,
        description: req.description,
        modifier,
        reply: reply_tx,
    };
    let index = send_command_and_await_raw(&state, cmd, reply_rx).await?;
    Ok(Json(ModificationIndexResponse { content_id, index }))
}

async fn handle_get_modification(
    State(state): State<Arc<NodeState>>,
    Path((content_id, index)): Path<(String, u64)>,
) -> Result<Json<ModificationRecord>, ApiError> {
    let content_id = parse_content_id(&content_id)?;
    state
        .registry
        .get_modification(&content_id, index)
        .map(Json)
        .map_err(registry_error)
}

async fn handle_get_history(
    State(state): State<Arc<NodeState>>,
    Path(content_id): Path<String>,
) -> Result<Json<HistoryResponse>, ApiError> {
    let content_id = parse_content_id(&content_id)?;
    let modifications = state
        .registry
        .get_history(&content_id)
        .map_err(registry_error)?;
    let count = modifications.len();
    Ok(Json(HistoryResponse {
        content_id,
        modifications,
        count,
    }))
}

async fn handle_list_publisher_content(
    State(state): State<Arc<NodeState>>,
    Path(address): Path<String>,
) -> Result<Json<PublisherContentResponse>, ApiError> {
    let publisher = parse_address(&address)?;
    let content_ids = state.registry.list_content_by_publisher(&publisher);
    let count = content_ids.len();
    Ok(Json(PublisherContentResponse {
        publisher,
        content_ids,
        count,
    }))
}

async fn handle_adjust_credibility(
    State(state): State<Arc<NodeState>>,
    Json(req): Json<AdjustCredibilityRequest>,
) -> Result<Json<Source>, ApiError> {
    let message = payload::adjust_payload(&req.target, req.delta);
    let caller =
        auth::authenticate(&req.public_key, &req.signature, &message).map_err(auth_error)?;
    let target = parse_address(&req.target)?;

    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    let cmd = NodeCommand::AdjustCredibility {
        caller,
        target,
        delta: req.delta,
        reply: reply_tx,
    };
    send_command_and_await(&state, cmd, reply_rx).await
}

async fn handle_verify_source(
    State(state): State<Arc<NodeState>>,
    Json(req): Json<VerifySourceRequest>,
) -> Result<Json<Source>, ApiError> {
    let message = payload::verify_source_payload(&req.target, req.verified);
    let caller =
        auth::authenticate(&req.public_key, &req.signature, &message).map_err(auth_error)?;
    let target = parse_address(&req.target)?;

    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    let cmd = NodeCommand::SetSourceVerified {
        caller,
        target,
        verified: req.verified,
        reply: reply_tx,
    };
    send_command_and_await(&state, cmd, reply_rx).await
}

async fn handle_verify_content(
    State(state): State<Arc<NodeState>>,
    Json(req): Json<VerifyContentRequest>,
) -> Result<Json<ContentRecord>, ApiError> {
    let message = payload::verify_content_payload(&req.content_id, req.verified);
    let caller =
        auth::authenticate(&req.public_key, &req.signature, &message).map_err(auth_error)?;
    let content_id = parse_content_id(&req.content_id)?;

    let (reply_tx, reply_rx) = tokio::sync::oneshot::channel();
    let cmd = NodeCommand::SetContentVerified {
        caller,
        content_id,
        verified: req.verified,
        reply: reply_tx,
    };
    send_command_and_await(&state, cmd, reply_rx).await
}

/// Send a command and await the reply, wrapping the result in Json.
async fn send_command_and_await<T: Serialize>(
    state: &Arc<NodeState>,
    cmd: NodeCommand,
    reply_rx: tokio::sync::oneshot::Receiver<Result<T, RegistryError>>,
) -> Result<Json<T>, ApiError> {
    send_command_and_await_raw(state, cmd, reply_rx).await.map(Json)
}

/// Send a command and await the raw reply.
///
/// An unreachable mutation loop is the substrate being unavailable.
async fn send_command_and_await_raw<T>(
    state: &Arc<NodeState>,
    cmd: NodeCommand,
    reply_rx: tokio::sync::oneshot::Receiver<Result<T, RegistryError>>,
) -> Result<T, ApiError> {
    state.command_tx.send(cmd).await.map_err(|_| {
        registry_error(RegistryError::Substrate("mutation loop not running".into()))
    })?;

    match reply_rx.await {
        Ok(Ok(resp)) => Ok(resp),
        Ok(Err(e)) => Err(registry_error(e)),
        Err(_) => Err(registry_error(RegistryError::Substrate(
            "mutation loop dropped the reply channel".into(),
        ))),
    }
}

// --- Server ---

pub fn build_router(state: Arc<NodeState>) -> Router {
    Router::new()
        .route("/api/v1/health", get(handle_health))
        .route("/api/v1/status", get(handle_status))
        .route("/api/v1/sources/register", post(handle_register_source))
        .route("/api/v1/sources/{address}", get(handle_get_source))
        .route(
            "/api/v1/sources/{address}/content",
            get(handle_list_publisher_content),
        )
        .route("/api/v1/content/publish", post(handle_publish_content))
        .route("/api/v1/content/{content_id}", get(handle_get_content))
        .route("/api/v1/content/{content_id}/history", get(handle_get_history))
        .route(
            "/api/v1/content/{content_id}/modifications",
            post(handle_record_modification),
        )
        .route(
            "/api/v1/content/{content_id}/modifications/{index}",
            get(handle_get_modification),
        )
        .route("/api/v1/admin/credibility", post(handle_adjust_credibility))
        .route("/api/v1/admin/verify-source", post(handle_verify_source))
        .route("/api/v1/admin/verify-content", post(handle_verify_content))
        .with_state(state)
}

pub async fn start_api_server(listen_addr: SocketAddr, state: Arc<NodeState>) -> anyhow::Result<()> {
    let app = build_router(state);
    let listener = tokio::net::TcpListener::bind(listen_addr).await?;
    tracing::info!(%listen_addr, "HTTP API server started");
    axum::serve(listener, app).await?;
    Ok(())
}
