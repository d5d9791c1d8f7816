//! HTTP routes for the mint API
//!
//! Every body is `{"success": true, "data": ...}` or `{"success": false, "error": "..."}`.

use axum::{
    extract::{rejection::JsonRejection, DefaultBodyLimit, Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::core::constants::{api, app, upload};
use crate::core::model::{
    Collection, CollectionStats, Id, MintReceipt, MintingTransaction, Ordinal, Quality, ThreeDOrdinal, Upload, ValidationResult,
};
use crate::error::MinterError;
use crate::minter::Minter;

/// Decoded uploads are capped by `upload::MAX_BYTES`; this leaves room for base64 overhead.
const BODY_LIMIT: usize = upload::MAX_BYTES * 4 / 3 + 64 * 1024;

#[derive(Clone)]
pub struct AppState { pub minter: Arc<Minter>, pub app_name: String }

impl AppState {
    pub fn new(minter: Arc<Minter>, app_name: impl Into<String>) -> Self {
        Self { minter, app_name: app_name.into() }
    }
}

#[derive(Serialize)]
struct Envelope<T> { success: bool, data: T }

fn ok<T: Serialize>(data: T) -> Json<Envelope<T>> { Json(Envelope { success: true, data }) }

type ApiResult<T> = Result<Json<Envelope<T>>, ApiError>;

#[derive(Debug)]
pub struct ApiError { status: StatusCode, message: String }

impl ApiError {
    fn bad_request(message: impl Into<String>) -> Self { Self { status: StatusCode::BAD_REQUEST, message: message.into() } }
}

impl From<MinterError> for ApiError {
    fn from(e: MinterError) -> Self {
        let status = match &e {
            MinterError::NotFound(_) => StatusCode::NOT_FOUND,
            MinterError::Invalid(_) | MinterError::Duplicate(_) => StatusCode::BAD_REQUEST,
            MinterError::NotOwner => StatusCode::FORBIDDEN,
            MinterError::Poisoned | MinterError::Chain(_) | MinterError::RestartRequired(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        Self { status, message: e.to_string() }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(r: JsonRejection) -> Self { Self::bad_request(r.body_text()) }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        if self.status.is_server_error() {
            tracing::error!(status = %self.status, "{}", self.message);
        } else {
            tracing::debug!(status = %self.status, "{}", self.message);
        }
        (self.status, Json(serde_json::json!({"success": false, "error": self.message}))).into_response()
    }
}

pub fn create_router(minter: Arc<Minter>) -> Router { create_router_with_name(minter, app::SERVICE) }

pub fn create_router_with_name(minter: Arc<Minter>, app_name: &str) -> Router {
    Router::new()
        .route(api::HEALTH, get(health))
        .route(api::VALIDATE, post(validate_ordinal))
        .route(api::GENERATE_3D, get(generate_three_d))
        .route(api::MINT_3D, post(mint_three_d))
        .route(api::TRANSACTION, get(transaction))
        .route(api::RECENT, get(recent))
        .route(api::BY_OWNER, get(by_owner))
        .route(api::SEARCH, get(search))
        .route(api::EXAMPLES, get(examples))
        .route(api::ORDINAL, get(ordinal))
        .route(api::COLLECTIONS, get(collections))
        .route(api::COLLECTION_STATS, get(collection_stats))
        .layer(DefaultBodyLimit::max(BODY_LIMIT))
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TraceLayer::new_for_http())
        .with_state(AppState::new(minter, app_name))
}

async fn health(State(s): State<AppState>) -> impl IntoResponse {
    Json(serde_json::json!({"status": "ok", "name": app::NAME, "service": s.app_name, "network": s.minter.network()}))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct ValidateRequest {
    wallet: Option<String>,
    collection_id: Option<String>,
    /// Base64, optionally as a `data:<type>;base64,` URL.
    content: Option<String>,
    content_type: Option<String>,
    file_name: Option<String>,
}

/// Splits an optional data-URL prefix off `content`, returning (declared type, payload).
fn split_data_url(content: &str) -> (Option<&str>, &str) {
    content
        .strip_prefix("data:")
        .and_then(|rest| rest.split_once(";base64,"))
        .map(|(ty, payload)| (Some(ty), payload))
        .unwrap_or((None, content))
}

fn decode_upload(req: ValidateRequest) -> Result<(Upload, String, Option<String>), ApiError> {
    let content = req.content.filter(|c| !c.trim().is_empty()).ok_or_else(|| ApiError::bad_request("No file uploaded"))?;
    let wallet = req.wallet.filter(|w| !w.trim().is_empty()).ok_or_else(|| ApiError::bad_request("Wallet address is required"))?;

    let (declared, payload) = split_data_url(content.trim());
    let bytes = BASE64.decode(payload).map_err(|_| ApiError::bad_request("File content is not valid base64"))?;
    if bytes.is_empty() {
        return Err(ApiError::bad_request("No file uploaded"));
    }
    if bytes.len() > upload::MAX_BYTES {
        return Err(ApiError::bad_request("File exceeds the 10 MB upload limit"));
    }

    let content_type = req.content_type
        .or_else(|| declared.map(str::to_string))
        .unwrap_or_else(|| upload::DEFAULT_TYPE.to_string());
    let file = Upload::new(req.file_name.unwrap_or_else(|| "upload".into()), content_type, bytes);
    if !file.is_image() {
        return Err(ApiError::bad_request(upload::INVALID_TYPE_MESSAGE));
    }
    Ok((file, wallet, req.collection_id))
}

async fn validate_ordinal(
    State(s): State<AppState>,
    body: Result<Json<ValidateRequest>, JsonRejection>,
) -> ApiResult<ValidationResult> {
    let Json(req) = body?;
    let (file, wallet, collection) = decode_upload(req)?;
    Ok(ok(s.minter.validate(&file, &wallet, collection.as_deref())?))
}

#[derive(Deserialize)]
struct QualityQuery { quality: Option<String> }

async fn generate_three_d(
    State(s): State<AppState>,
    Path(id): Path<String>,
    Query(q): Query<QualityQuery>,
) -> ApiResult<ThreeDOrdinal> {
    let quality = q.quality.as_deref().map(Quality::from_label).unwrap_or_default();
    Ok(ok(s.minter.generate(&id, quality)?))
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct MintRequest {
    ordinal_id: String,
    quality: String,
    wallet: String,
}

async fn mint_three_d(
    State(s): State<AppState>,
    body: Result<Json<MintRequest>, JsonRejection>,
) -> ApiResult<MintReceipt> {
    let Json(req) = body?;
    if req.ordinal_id.trim().is_empty() {
        return Err(ApiError::bad_request("Ordinal ID is required"));
    }
    if req.wallet.trim().is_empty() {
        return Err(ApiError::bad_request("Wallet address is required"));
    }
    let receipt = s.minter.mint(req.ordinal_id.trim(), &req.wallet, Quality::from_label(&req.quality)).await?;
    Ok(ok(receipt))
}

async fn transaction(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<MintingTransaction> {
    let id: Id = id.parse().map_err(|_| ApiError::bad_request(format!("Invalid 3D ordinal id: {}", id)))?;
    Ok(ok(s.minter.transaction(id)?))
}

async fn recent(State(s): State<AppState>) -> ApiResult<Vec<ThreeDOrdinal>> {
    Ok(ok(s.minter.recent(api::RECENT_LIMIT)?))
}

async fn by_owner(State(s): State<AppState>, Path(address): Path<String>) -> ApiResult<Vec<ThreeDOrdinal>> {
    Ok(ok(s.minter.by_owner(&address)?))
}

#[derive(Deserialize)]
struct SearchQuery { q: Option<String> }

async fn search(State(s): State<AppState>, Query(q): Query<SearchQuery>) -> ApiResult<Vec<ThreeDOrdinal>> {
    Ok(ok(s.minter.search(q.q.as_deref().unwrap_or_default(), api::MIN_SEARCH_LEN)?))
}

async fn examples(State(s): State<AppState>) -> ApiResult<Vec<ThreeDOrdinal>> {
    Ok(ok(s.minter.examples()?))
}

async fn ordinal(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<Ordinal> {
    Ok(ok(s.minter.ordinal(&id)?))
}

async fn collections(State(s): State<AppState>) -> ApiResult<Vec<Collection>> {
    Ok(ok(s.minter.collections()?))
}

async fn collection_stats(State(s): State<AppState>, Path(id): Path<String>) -> ApiResult<CollectionStats> {
    Ok(ok(s.minter.collection_stats(&id)?))
}
