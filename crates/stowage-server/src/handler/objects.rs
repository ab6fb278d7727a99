//! Object upload, download, and management handlers.
//!
//! This module exposes the storage operations over HTTP. Uploads arrive as
//! multipart form data and are stored under a generated key; every other
//! operation addresses an object by its full key via query parameters.

use axum::Json;
use axum::Router;
use axum::extract::{DefaultBodyLimit, Multipart, Query, State};
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::routing::{get, head};
use bytes::Bytes;
use stowage_s3::AclPolicy;
use tower_http::limit::RequestBodyLimitLayer;
use uuid::Uuid;

use crate::handler::request::{KeyParams, ListParams, PresignParams, SetAclParams};
use crate::handler::response::{
    AclResponse, DeleteResponse, ObjectsPage, PresignedUrlResponse, UploadResponse,
};
use crate::handler::{ErrorKind, Result};
use crate::state::AppState;

/// Tracing target for object storage operations.
const TRACING_TARGET: &str = "stowage_server::handler::objects";

/// Maximum file size: 100MB
const MAX_FILE_SIZE: usize = 100 * 1024 * 1024;

/// Request body cap: the file limit plus room for multipart framing.
const MAX_BODY_SIZE: usize = MAX_FILE_SIZE + 1024 * 1024;

/// Reports whether an object exists.
///
/// Responds 204 when the object is present and 404 when it is absent,
/// without a body either way.
#[tracing::instrument(skip(state), fields(key = %params.key))]
async fn head_object(
    State(state): State<AppState>,
    Query(params): Query<KeyParams>,
) -> Result<StatusCode> {
    if state.store.exists(&params.key).await? {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(ErrorKind::NotFound.with_resource(params.key))
    }
}

/// Uploads an object from multipart form data.
///
/// Form data:
/// - `file`: The file to store; the first field carrying a filename wins
///
/// The stored key is the configured prefix followed by a generated name
/// that keeps the original file extension.
#[tracing::instrument(skip(state, multipart))]
async fn upload_object(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    tracing::debug!(target: TRACING_TARGET, "Starting object upload");

    while let Some(field) = multipart.next_field().await.map_err(|err| {
        tracing::error!(target: TRACING_TARGET, error = %err, "failed to read multipart field");
        ErrorKind::BadRequest
            .with_message("Invalid multipart data")
            .with_context(format!("Failed to parse multipart form: {err}"))
    })? {
        let filename = if let Some(filename) = field.file_name() {
            filename.to_string()
        } else {
            tracing::debug!(target: TRACING_TARGET, "Skipping field without filename");
            continue;
        };

        // Validate and sanitize filename
        let filename = validate_filename(&filename)?;

        tracing::debug!(
            target: TRACING_TARGET,
            filename = %filename,
            "processing object upload"
        );

        // Read file data with size limit to prevent DoS
        let mut data = Vec::new();
        let mut stream = field;

        while let Some(chunk) = stream.chunk().await.map_err(|err| {
            tracing::error!(target: TRACING_TARGET, error = %err, filename = %filename, "Failed to read file chunk");
            ErrorKind::BadRequest
                .with_message("Failed to read file data")
                .with_context(format!("Could not read file '{filename}': {err}"))
        })? {
            // Check size before adding chunk to prevent memory exhaustion
            if data.len() + chunk.len() > MAX_FILE_SIZE {
                return Err(ErrorKind::BadRequest
                    .with_message("File too large")
                    .with_context(format!(
                        "File '{}' exceeds maximum size of {} MB",
                        filename,
                        MAX_FILE_SIZE / (1024 * 1024)
                    )));
            }
            data.extend_from_slice(&chunk);
        }

        let object_name = generate_object_name(&filename);
        let size_bytes = data.len() as u64;

        let uploaded = state
            .store
            .upload(&state.upload_prefix, &object_name, Bytes::from(data))
            .await?;

        tracing::debug!(
            target: TRACING_TARGET,
            key = %uploaded.key,
            filename = %filename,
            size = size_bytes,
            elapsed = ?uploaded.duration,
            "object upload completed"
        );

        return Ok((
            StatusCode::CREATED,
            Json(UploadResponse {
                key: uploaded.key,
                size_bytes,
                etag: uploaded.etag,
            }),
        ));
    }

    Err(ErrorKind::BadRequest.with_message("No file provided in multipart request"))
}

/// Downloads an object's content.
///
/// The response carries the stored bytes verbatim, with a
/// content-disposition header naming the last segment of the key.
#[tracing::instrument(skip(state), fields(key = %params.key))]
async fn download_object(
    State(state): State<AppState>,
    Query(params): Query<KeyParams>,
) -> Result<(StatusCode, HeaderMap, Bytes)> {
    let Some(content) = state.store.download(&params.key).await? else {
        tracing::warn!(target: TRACING_TARGET, key = %params.key, "object not found");
        return Err(ErrorKind::NotFound.with_resource(params.key));
    };

    // Set up response headers
    let mut headers = HeaderMap::new();

    headers.insert(
        "content-disposition",
        format!(
            "attachment; filename=\"{}\"",
            attachment_filename(&params.key)
        )
        .parse()
        .unwrap(),
    );
    headers.insert(
        "content-type",
        content
            .content_type
            .as_deref()
            .unwrap_or("application/octet-stream")
            .parse()
            .unwrap_or_else(|_| HeaderValue::from_static("application/octet-stream")),
    );
    headers.insert(
        "content-length",
        content.data.len().to_string().parse().unwrap(),
    );

    tracing::debug!(
        target: TRACING_TARGET,
        key = %params.key,
        size = content.data.len(),
        elapsed = ?content.duration,
        "object downloaded successfully"
    );

    Ok((StatusCode::OK, headers, content.data))
}

/// Deletes an object.
///
/// Deleting an absent object reports `deleted: false` rather than failing.
#[tracing::instrument(skip(state), fields(key = %params.key))]
async fn delete_object(
    State(state): State<AppState>,
    Query(params): Query<KeyParams>,
) -> Result<Json<DeleteResponse>> {
    let deleted = state.store.delete(&params.key).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        key = %params.key,
        deleted,
        "object delete completed"
    );

    Ok(Json(DeleteResponse {
        key: params.key,
        deleted,
    }))
}

/// Fetches an object's access policy.
#[tracing::instrument(skip(state), fields(key = %params.key))]
async fn get_object_acl(
    State(state): State<AppState>,
    Query(params): Query<KeyParams>,
) -> Result<Json<AclResponse>> {
    let policy = state.store.get_acl(&params.key).await?;

    Ok(Json(AclResponse {
        key: params.key,
        policy,
    }))
}

/// Applies an access policy to an object.
///
/// Unknown policy names are rejected before the store is contacted.
#[tracing::instrument(skip(state), fields(key = %params.key, policy = %params.policy))]
async fn set_object_acl(
    State(state): State<AppState>,
    Query(params): Query<SetAclParams>,
) -> Result<Json<AclResponse>> {
    let policy: AclPolicy = params.policy.parse().map_err(|_| {
        ErrorKind::BadRequest
            .with_message("Unknown ACL policy")
            .with_context(format!(
                "Policy '{}' is not one of: private, public-read, public-read-write, default",
                params.policy
            ))
    })?;

    let applied = state.store.set_acl(&params.key, policy).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        key = %params.key,
        policy = %applied,
        "object ACL applied"
    );

    Ok(Json(AclResponse {
        key: params.key,
        policy: applied,
    }))
}

/// Generates a presigned download URL.
///
/// The URL embeds its own expiry and needs no credentials to use.
#[tracing::instrument(skip(state), fields(key = %params.key))]
async fn presign_object_url(
    State(state): State<AppState>,
    Query(params): Query<PresignParams>,
) -> Result<Json<PresignedUrlResponse>> {
    let ttl_seconds = params.ttl_seconds();
    let url = state.store.presigned_url(&params.key, ttl_seconds).await?;

    tracing::debug!(
        target: TRACING_TARGET,
        key = %params.key,
        ttl_seconds,
        "presigned URL generated"
    );

    Ok(Json(PresignedUrlResponse {
        key: params.key,
        url: url.to_string(),
        expires_in_seconds: ttl_seconds,
    }))
}

/// Lists one page of objects under a prefix.
#[tracing::instrument(skip(state), fields(prefix = %params.prefix()))]
async fn list_objects(
    State(state): State<AppState>,
    Query(params): Query<ListParams>,
) -> Result<Json<ObjectsPage>> {
    let page = state
        .store
        .list_objects(params.prefix(), params.max_keys, params.marker())
        .await?;

    tracing::debug!(
        target: TRACING_TARGET,
        prefix = %params.prefix(),
        count = page.items.len(),
        has_more = page.has_more,
        "object listing completed"
    );

    Ok(Json(ObjectsPage::from_page(page)))
}

/// Builds the stored object name: a random hex identifier keeping the
/// original file extension.
fn generate_object_name(filename: &str) -> String {
    let extension = std::path::Path::new(filename)
        .extension()
        .and_then(|ext| ext.to_str())
        .unwrap_or("")
        .to_lowercase();

    let identifier = Uuid::new_v4().simple().to_string();

    if extension.is_empty() {
        identifier
    } else {
        format!("{identifier}.{extension}")
    }
}

/// Derives a safe attachment name from the last segment of a key.
fn attachment_filename(object_key: &str) -> String {
    let segment = object_key.split('/').next_back().unwrap_or(object_key);

    let sanitized: String = segment
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
        .collect();

    if sanitized.is_empty() {
        "download".to_string()
    } else {
        sanitized
    }
}

/// Validates file name to prevent path traversal and other attacks.
fn validate_filename(filename: &str) -> Result<String> {
    // Block path traversal attempts
    if filename.contains("..") || filename.contains('/') || filename.contains('\\') {
        return Err(ErrorKind::BadRequest
            .with_message("Invalid filename")
            .with_context("Filename contains path traversal characters"));
    }

    // Block filenames that start with dangerous patterns
    if filename.starts_with('.') {
        return Err(ErrorKind::BadRequest
            .with_message("Invalid filename")
            .with_context("Filename cannot start with a dot"));
    }

    // Sanitize filename - remove potentially dangerous characters
    let sanitized: String = filename
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, '.' | '_' | '-' | ' '))
        .collect();

    if sanitized.is_empty() {
        return Err(ErrorKind::BadRequest
            .with_message("Invalid filename")
            .with_context("Filename contains no valid characters"));
    }

    Ok(sanitized)
}

/// Returns a [`Router`] with all object storage routes.
///
/// [`Router`]: axum::routing::Router
pub fn routes() -> Router<AppState> {
    Router::new()
        .route(
            "/objects",
            head(head_object)
                .get(list_objects)
                .post(upload_object)
                .delete(delete_object),
        )
        .route("/objects/content", get(download_object))
        .route("/objects/acl", get(get_object_acl).put(set_object_acl))
        .route("/objects/url", get(presign_object_url))
        .layer(DefaultBodyLimit::max(MAX_BODY_SIZE))
        .layer(RequestBodyLimitLayer::new(MAX_BODY_SIZE))
}
