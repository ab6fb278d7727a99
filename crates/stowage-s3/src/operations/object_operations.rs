//! Object operations scoped to the configured bucket.
//!
//! This module provides the operation surface over a shared
//! [`ConnectionConfig`]: existence check, upload, download, delete, ACL
//! get/set, presigned-URL generation, and prefix-based paginated listing.

use std::sync::Arc;
use std::time::Duration;

use aws_sdk_s3::error::SdkError;
use aws_sdk_s3::presigning::PresigningConfig;
use aws_sdk_s3::primitives::ByteStream;
use bytes::Bytes;
use tracing::{debug, error, info, instrument};
use url::Url;

use crate::client::{ConnectionConfig, StorageSession};
use crate::types::{AclPolicy, ObjectPage};
use crate::{Error, Result, TRACING_TARGET_OBJECTS};

/// Page size applied when a listing call does not specify one.
pub const DEFAULT_MAX_KEYS: i32 = 100;

/// Result of an upload operation.
#[derive(Debug, Clone)]
pub struct UploadResult {
    /// Object key the content was stored under.
    pub key: String,
    /// ETag reported by the service, when provided.
    pub etag: Option<String>,
    /// Upload duration.
    pub duration: Duration,
}

/// Result of a download operation.
#[derive(Clone)]
pub struct DownloadResult {
    /// Object key that was downloaded.
    pub key: String,
    /// The object's content.
    pub data: Bytes,
    /// Content type reported by the service, when provided.
    pub content_type: Option<String>,
    /// Download duration.
    pub duration: Duration,
}

impl std::fmt::Debug for DownloadResult {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DownloadResult")
            .field("key", &self.key)
            .field("size", &self.data.len())
            .field("content_type", &self.content_type)
            .field("duration", &self.duration)
            .finish()
    }
}

/// Object operations over a shared connection configuration.
///
/// Each operation opens a fresh [`StorageSession`], performs one remote
/// call (or a short checked sequence such as existence-check-then-delete),
/// and releases the session before returning, on every exit path. The
/// surface holds no mutable state, so one instance is safe to share across
/// concurrent callers.
#[derive(Debug, Clone)]
pub struct ObjectOperations {
    config: Arc<ConnectionConfig>,
}

impl ObjectOperations {
    /// Creates the operation surface for the given configuration.
    pub fn new(config: ConnectionConfig) -> Self {
        Self {
            config: Arc::new(config),
        }
    }

    /// Returns the connection configuration.
    #[inline]
    pub fn config(&self) -> &ConnectionConfig {
        &self.config
    }

    /// Checks whether an object exists in the configured bucket.
    ///
    /// Absence is a legitimate `false` result, not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the underlying call fails for reasons other than
    /// the object being missing.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.config.bucket_name(), key = %object_key))]
    pub async fn exists(&self, object_key: &str) -> Result<bool> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            key = %object_key,
            "Checking object existence"
        );

        let session = StorageSession::open(Arc::clone(&self.config));
        let start = std::time::Instant::now();

        let result = key_exists(&session, object_key).await;
        let elapsed = start.elapsed();

        match result {
            Ok(found) => {
                debug!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    found = %found,
                    elapsed = ?elapsed,
                    "Object existence checked"
                );
                Ok(found)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to check object existence"
                );
                Err(e)
            }
        }
    }

    /// Uploads an object under `path_prefix + file_name`.
    ///
    /// The key is the verbatim concatenation of both parts; no separator is
    /// inserted and no uniqueness check is performed, so an existing object
    /// at the same key is overwritten (last write wins). The content is
    /// streamed through to the service without rebuffering.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if the content stream fails mid-transfer. The
    /// session is still released, and a partially uploaded object may
    /// remain in the bucket; no atomicity is guaranteed.
    #[instrument(skip(self, content), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.config.bucket_name(), prefix = %path_prefix, file_name = %file_name))]
    pub async fn upload(
        &self,
        path_prefix: &str,
        file_name: &str,
        content: impl Into<ByteStream> + Send,
    ) -> Result<UploadResult> {
        let key = join_key(path_prefix, file_name);

        debug!(
            target: TRACING_TARGET_OBJECTS,
            key = %key,
            "Uploading object"
        );

        let session = StorageSession::open(Arc::clone(&self.config));
        let start = std::time::Instant::now();

        let result = session
            .as_inner()
            .put_object()
            .bucket(session.bucket_name())
            .key(&key)
            .body(content.into())
            .send()
            .await
            .map_err(|err| session.map_error(err));

        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                let etag = response.e_tag().map(str::to_string);

                info!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %key,
                    etag = ?etag,
                    elapsed = ?elapsed,
                    "Object uploaded"
                );

                Ok(UploadResult {
                    key,
                    etag,
                    duration: elapsed,
                })
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to upload object"
                );
                Err(e)
            }
        }
    }

    /// Downloads an object's content.
    ///
    /// Returns `Ok(None)` when the object is absent; absence is a normal
    /// outcome, not an error. The content stream is copied into memory in
    /// bounded chunks, so peak copy overhead stays independent of object
    /// size.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Io`] if reading the content stream fails
    /// mid-transfer.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.config.bucket_name(), key = %object_key))]
    pub async fn download(&self, object_key: &str) -> Result<Option<DownloadResult>> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            key = %object_key,
            "Downloading object"
        );

        let session = StorageSession::open(Arc::clone(&self.config));
        let start = std::time::Instant::now();

        let exists = match key_exists(&session, object_key).await {
            Ok(exists) => exists,
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    "Failed to check object existence"
                );
                return Err(e);
            }
        };

        if !exists {
            debug!(
                target: TRACING_TARGET_OBJECTS,
                key = %object_key,
                elapsed = ?start.elapsed(),
                "Object not found, nothing to download"
            );
            return Ok(None);
        }

        let result = session
            .as_inner()
            .get_object()
            .bucket(session.bucket_name())
            .key(object_key)
            .send()
            .await;

        let output = match result {
            Ok(output) => output,
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_no_such_key() => {
                // Deleted between the existence check and the read.
                debug!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    "Object vanished before download"
                );
                return Ok(None);
            }
            Err(err) => {
                let e = session.map_error(err);
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    elapsed = ?start.elapsed(),
                    "Failed to download object"
                );
                return Err(e);
            }
        };

        let content_type = output.content_type().map(str::to_string);
        let mut body = output.body;
        let mut data = Vec::new();

        loop {
            match body.try_next().await {
                Ok(Some(chunk)) => data.extend_from_slice(&chunk),
                Ok(None) => break,
                Err(err) => {
                    let e = Error::Io(std::io::Error::other(err));
                    error!(
                        target: TRACING_TARGET_OBJECTS,
                        key = %object_key,
                        error = %e,
                        elapsed = ?start.elapsed(),
                        "Failed to read object content"
                    );
                    return Err(e);
                }
            }
        }

        let data = Bytes::from(data);
        let elapsed = start.elapsed();

        info!(
            target: TRACING_TARGET_OBJECTS,
            key = %object_key,
            size = %data.len(),
            elapsed = ?elapsed,
            "Object downloaded"
        );

        Ok(Some(DownloadResult {
            key: object_key.to_string(),
            data,
            content_type,
            duration: elapsed,
        }))
    }

    /// Deletes an object if it exists.
    ///
    /// Returns `false` without issuing a delete call when the object is
    /// absent; deleting something that does not exist is a no-op, not an
    /// error, so the operation is idempotent.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.config.bucket_name(), key = %object_key))]
    pub async fn delete(&self, object_key: &str) -> Result<bool> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            key = %object_key,
            "Deleting object"
        );

        let session = StorageSession::open(Arc::clone(&self.config));
        let start = std::time::Instant::now();

        let exists = match key_exists(&session, object_key).await {
            Ok(exists) => exists,
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    "Failed to check object existence"
                );
                return Err(e);
            }
        };

        if !exists {
            debug!(
                target: TRACING_TARGET_OBJECTS,
                key = %object_key,
                elapsed = ?start.elapsed(),
                "Object not found, nothing to delete"
            );
            return Ok(false);
        }

        let result = session
            .as_inner()
            .delete_object()
            .bucket(session.bucket_name())
            .key(object_key)
            .send()
            .await
            .map_err(|err| session.map_error(err));

        let elapsed = start.elapsed();

        match result {
            Ok(_) => {
                info!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    elapsed = ?elapsed,
                    "Object deleted"
                );
                Ok(true)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to delete object"
                );
                Err(e)
            }
        }
    }

    /// Fetches an object's current access-control policy.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the object is absent.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.config.bucket_name(), key = %object_key))]
    pub async fn get_acl(&self, object_key: &str) -> Result<AclPolicy> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            key = %object_key,
            "Fetching object ACL"
        );

        let session = StorageSession::open(Arc::clone(&self.config));
        let start = std::time::Instant::now();

        let exists = match key_exists(&session, object_key).await {
            Ok(exists) => exists,
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    "Failed to check object existence"
                );
                return Err(e);
            }
        };

        if !exists {
            debug!(
                target: TRACING_TARGET_OBJECTS,
                key = %object_key,
                elapsed = ?start.elapsed(),
                "Object not found"
            );
            return Err(Error::NotFound(object_key.to_string()));
        }

        let result = session
            .as_inner()
            .get_object_acl()
            .bucket(session.bucket_name())
            .key(object_key)
            .send()
            .await;

        let elapsed = start.elapsed();

        match result {
            Ok(output) => {
                let policy = AclPolicy::from_grants(output.grants());

                info!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    policy = %policy,
                    elapsed = ?elapsed,
                    "Object ACL fetched"
                );
                Ok(policy)
            }
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_no_such_key() => {
                debug!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    "Object vanished before the ACL read"
                );
                Err(Error::NotFound(object_key.to_string()))
            }
            Err(err) => {
                let e = session.map_error(err);
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to fetch object ACL"
                );
                Err(e)
            }
        }
    }

    /// Applies an access-control policy to an object.
    ///
    /// On success the applied policy is echoed back without re-querying the
    /// service.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NotFound`] when the object is absent.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.config.bucket_name(), key = %object_key, policy = %policy))]
    pub async fn set_acl(&self, object_key: &str, policy: AclPolicy) -> Result<AclPolicy> {
        debug!(
            target: TRACING_TARGET_OBJECTS,
            key = %object_key,
            policy = %policy,
            "Applying object ACL"
        );

        let session = StorageSession::open(Arc::clone(&self.config));
        let start = std::time::Instant::now();

        let exists = match key_exists(&session, object_key).await {
            Ok(exists) => exists,
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    "Failed to check object existence"
                );
                return Err(e);
            }
        };

        if !exists {
            debug!(
                target: TRACING_TARGET_OBJECTS,
                key = %object_key,
                elapsed = ?start.elapsed(),
                "Object not found"
            );
            return Err(Error::NotFound(object_key.to_string()));
        }

        let result = session
            .as_inner()
            .put_object_acl()
            .bucket(session.bucket_name())
            .key(object_key)
            .acl(policy.to_canned_acl())
            .send()
            .await;

        let elapsed = start.elapsed();

        match result {
            Ok(_) => {
                info!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    policy = %policy,
                    elapsed = ?elapsed,
                    "Object ACL applied"
                );
                Ok(policy)
            }
            Err(SdkError::ServiceError(ctx)) if ctx.err().is_no_such_key() => {
                debug!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    "Object vanished before the ACL write"
                );
                Err(Error::NotFound(object_key.to_string()))
            }
            Err(err) => {
                let e = session.map_error(err);
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to apply object ACL"
                );
                Err(e)
            }
        }
    }

    /// Generates a time-limited presigned URL for an object.
    ///
    /// The URL expires `ttl_seconds` after the moment of the call; validity
    /// enforcement is the service's own signing scheme.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `ttl_seconds` is zero or
    /// exceeds the signing scheme's maximum, and [`Error::NotFound`] when
    /// the object is absent.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.config.bucket_name(), key = %object_key, ttl_seconds = %ttl_seconds))]
    pub async fn presigned_url(&self, object_key: &str, ttl_seconds: u64) -> Result<Url> {
        if ttl_seconds == 0 {
            return Err(Error::InvalidArgument(
                "Presign ttl must be positive".to_string(),
            ));
        }

        debug!(
            target: TRACING_TARGET_OBJECTS,
            key = %object_key,
            ttl_seconds = %ttl_seconds,
            "Generating presigned URL"
        );

        let session = StorageSession::open(Arc::clone(&self.config));
        let start = std::time::Instant::now();

        let exists = match key_exists(&session, object_key).await {
            Ok(exists) => exists,
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    "Failed to check object existence"
                );
                return Err(e);
            }
        };

        if !exists {
            debug!(
                target: TRACING_TARGET_OBJECTS,
                key = %object_key,
                elapsed = ?start.elapsed(),
                "Object not found"
            );
            return Err(Error::NotFound(object_key.to_string()));
        }

        let presign_config = PresigningConfig::expires_in(Duration::from_secs(ttl_seconds))
            .map_err(|e| Error::InvalidArgument(format!("Invalid presign expiry: {e}")))?;

        let result = session
            .as_inner()
            .get_object()
            .bucket(session.bucket_name())
            .key(object_key)
            .presigned(presign_config)
            .await;

        let elapsed = start.elapsed();

        match result {
            Ok(presigned) => {
                let uri = presigned.uri().to_string();
                let url = match Url::parse(&uri) {
                    Ok(url) => url,
                    Err(e) => {
                        let e = Error::TransientNetwork(format!(
                            "Presigned URL is not a valid URL: {e}"
                        ));
                        error!(
                            target: TRACING_TARGET_OBJECTS,
                            key = %object_key,
                            error = %e,
                            elapsed = ?elapsed,
                            "Failed to generate presigned URL"
                        );
                        return Err(e);
                    }
                };

                info!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    ttl_seconds = %ttl_seconds,
                    elapsed = ?elapsed,
                    "Presigned URL generated"
                );
                Ok(url)
            }
            Err(err) => {
                let e = session.map_error(err);
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    key = %object_key,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to generate presigned URL"
                );
                Err(e)
            }
        }
    }

    /// Lists one page of objects under a key prefix.
    ///
    /// An empty prefix lists the whole bucket. The page holds at most
    /// `max_keys` entries ([`DEFAULT_MAX_KEYS`] when unspecified) in
    /// service-defined order, continuing after `marker` when one is given.
    /// No auto-pagination happens here; the caller decides whether to
    /// request the next page with the returned marker.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidArgument`] when `max_keys` is not positive.
    #[instrument(skip(self), target = TRACING_TARGET_OBJECTS, fields(bucket = %self.config.bucket_name(), prefix = %prefix))]
    pub async fn list_objects(
        &self,
        prefix: &str,
        max_keys: Option<i32>,
        marker: Option<&str>,
    ) -> Result<ObjectPage> {
        let max_keys = max_keys.unwrap_or(DEFAULT_MAX_KEYS);
        if max_keys <= 0 {
            return Err(Error::InvalidArgument(format!(
                "max_keys must be positive, got {max_keys}"
            )));
        }

        debug!(
            target: TRACING_TARGET_OBJECTS,
            prefix = %prefix,
            max_keys = %max_keys,
            marker = ?marker,
            "Listing objects"
        );

        let session = StorageSession::open(Arc::clone(&self.config));
        let start = std::time::Instant::now();

        let mut request = session
            .as_inner()
            .list_objects()
            .bucket(session.bucket_name())
            .prefix(prefix)
            .max_keys(max_keys);

        if let Some(marker) = marker {
            request = request.marker(marker);
        }

        let result = request.send().await.map_err(|err| session.map_error(err));
        let elapsed = start.elapsed();

        match result {
            Ok(response) => {
                let page = ObjectPage::from_response(session.bucket_name(), response);

                info!(
                    target: TRACING_TARGET_OBJECTS,
                    prefix = %prefix,
                    count = page.items.len(),
                    has_more = %page.has_more,
                    elapsed = ?elapsed,
                    "Objects listed"
                );
                Ok(page)
            }
            Err(e) => {
                error!(
                    target: TRACING_TARGET_OBJECTS,
                    prefix = %prefix,
                    error = %e,
                    elapsed = ?elapsed,
                    "Failed to list objects"
                );
                Err(e)
            }
        }
    }
}

/// Joins the caller-supplied prefix and file name into an object key.
///
/// The concatenation is verbatim; no separator is inserted or stripped.
fn join_key(path_prefix: &str, file_name: &str) -> String {
    format!("{path_prefix}{file_name}")
}

/// Queries the service for the presence of `object_key`.
///
/// Absence reported by the service is a `false` result; any other failure
/// maps onto the crate error taxonomy.
async fn key_exists(session: &StorageSession, object_key: &str) -> Result<bool> {
    let result = session
        .as_inner()
        .head_object()
        .bucket(session.bucket_name())
        .key(object_key)
        .send()
        .await;

    match result {
        Ok(_) => Ok(true),
        Err(SdkError::ServiceError(ctx))
            if ctx.err().is_not_found() || ctx.raw().status().as_u16() == 404 =>
        {
            Ok(false)
        }
        Err(err) => Err(session.map_error(err)),
    }
}

#[cfg(test)]
mod tests {
    use url::Url;
    use uuid::Uuid;

    use super::*;
    use crate::StorageCredentials;

    fn test_operations() -> ObjectOperations {
        let endpoint = Url::parse("http://localhost:9000").unwrap();
        let credentials = StorageCredentials::new("access", "secret");
        let config = ConnectionConfig::new(endpoint, credentials, "artifacts").unwrap();
        ObjectOperations::new(config)
    }

    fn live_store() -> ObjectOperations {
        dotenvy::dotenv().ok();

        let endpoint = std::env::var("STOWAGE_TEST_ENDPOINT")
            .unwrap_or_else(|_| "http://localhost:9000".to_string());
        let access_key =
            std::env::var("STOWAGE_TEST_ACCESS_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let secret_key =
            std::env::var("STOWAGE_TEST_SECRET_KEY").unwrap_or_else(|_| "minioadmin".to_string());
        let bucket =
            std::env::var("STOWAGE_TEST_BUCKET").unwrap_or_else(|_| "stowage-test".to_string());

        let endpoint = Url::parse(&endpoint).unwrap();
        let credentials = StorageCredentials::new(access_key, secret_key);
        let config = ConnectionConfig::new(endpoint, credentials, bucket)
            .unwrap()
            .with_support_virtual_host(false);

        ObjectOperations::new(config)
    }

    async fn ensure_bucket(store: &ObjectOperations) {
        let session = StorageSession::open(Arc::new(store.config().clone()));

        // Tolerates the bucket already existing.
        let _ = session
            .as_inner()
            .create_bucket()
            .bucket(session.bucket_name())
            .send()
            .await;
    }

    #[test]
    fn test_join_key_is_verbatim() {
        assert_eq!(join_key("test/", "abc.png"), "test/abc.png");
        assert_eq!(join_key("test", "abc.png"), "testabc.png");
        assert_eq!(join_key("", "abc.png"), "abc.png");
        assert_eq!(join_key("a/b/", ""), "a/b/");
    }

    #[tokio::test]
    async fn test_presign_rejects_zero_ttl() {
        let store = test_operations();

        let result = store.presigned_url("reports/summary.txt", 0).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[tokio::test]
    async fn test_list_rejects_non_positive_page_size() {
        let store = test_operations();

        let result = store.list_objects("reports/", Some(0), None).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));

        let result = store.list_objects("reports/", Some(-5), None).await;
        assert!(matches!(result, Err(Error::InvalidArgument(_))));
    }

    #[test]
    fn test_operations_are_cheaply_cloneable() {
        let store = test_operations();
        let clone = store.clone();

        assert_eq!(store.config().bucket_name(), clone.config().bucket_name());
    }

    #[test]
    fn test_download_result_debug_hides_payload() {
        let result = DownloadResult {
            key: "reports/summary.txt".to_string(),
            data: Bytes::from_static(b"confidential payload"),
            content_type: Some("text/plain".to_string()),
            duration: Duration::from_millis(12),
        };

        let debug_str = format!("{result:?}");
        assert!(debug_str.contains("reports/summary.txt"));
        assert!(debug_str.contains("size"));
        assert!(!debug_str.contains("confidential"));
    }

    #[tokio::test]
    #[ignore] // Requires a running S3-compatible object store
    async fn test_live_object_round_trip() {
        let store = live_store();
        ensure_bucket(&store).await;

        let content: &[u8] = b"\x89\x50\x4e\x47\x0d\x0a\x1a\x0a\x00\x01";
        assert_eq!(content.len(), 10);

        let uploaded = store
            .upload("test/", "abc.png", Bytes::from_static(content))
            .await
            .unwrap();
        assert_eq!(uploaded.key, "test/abc.png");

        assert!(store.exists(&uploaded.key).await.unwrap());

        let downloaded = store.download(&uploaded.key).await.unwrap().unwrap();
        assert_eq!(downloaded.data.as_ref(), content);

        assert!(store.delete(&uploaded.key).await.unwrap());
        assert!(!store.exists(&uploaded.key).await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Requires a running S3-compatible object store
    async fn test_live_delete_is_idempotent() {
        let store = live_store();
        ensure_bucket(&store).await;

        let key = format!("test/{}.bin", Uuid::new_v4().simple());
        assert!(!store.delete(&key).await.unwrap());
        assert!(!store.delete(&key).await.unwrap());
    }

    #[tokio::test]
    #[ignore] // Requires a running S3-compatible object store
    async fn test_live_missing_object_behaviors() {
        let store = live_store();
        ensure_bucket(&store).await;

        let key = format!("test/{}.bin", Uuid::new_v4().simple());

        assert!(!store.exists(&key).await.unwrap());
        assert!(store.download(&key).await.unwrap().is_none());
        assert!(matches!(
            store.get_acl(&key).await,
            Err(Error::NotFound(_))
        ));
        assert!(matches!(
            store.presigned_url(&key, 900).await,
            Err(Error::NotFound(_))
        ));
    }

    #[tokio::test]
    #[ignore] // Requires a running S3-compatible object store with ACL support
    async fn test_live_acl_round_trip() {
        let store = live_store();
        ensure_bucket(&store).await;

        let key = format!("test/{}.txt", Uuid::new_v4().simple());
        store
            .upload("", &key, Bytes::from_static(b"acl probe"))
            .await
            .unwrap();

        for policy in [
            AclPolicy::Private,
            AclPolicy::PublicRead,
            AclPolicy::PublicReadWrite,
        ] {
            let applied = store.set_acl(&key, policy).await.unwrap();
            assert_eq!(applied, policy);
            assert_eq!(store.get_acl(&key).await.unwrap(), policy);
        }

        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires a running S3-compatible object store
    async fn test_live_listing_paginates() {
        let store = live_store();
        ensure_bucket(&store).await;

        let prefix = format!("test-listing-{}/", Uuid::new_v4().simple());
        for i in 0..5 {
            store
                .upload(&prefix, &format!("item-{i}.txt"), Bytes::from_static(b"x"))
                .await
                .unwrap();
        }

        let first = store.list_objects(&prefix, Some(2), None).await.unwrap();
        assert_eq!(first.items.len(), 2);
        assert!(first.has_more);
        let marker = first.next_marker.unwrap();

        let mut seen: Vec<String> = first.items.iter().map(|o| o.key.clone()).collect();
        let mut cursor = Some(marker);
        while let Some(marker) = cursor {
            let page = store
                .list_objects(&prefix, Some(2), Some(&marker))
                .await
                .unwrap();
            seen.extend(page.items.iter().map(|o| o.key.clone()));
            assert_eq!(page.has_more, page.next_marker.is_some());
            cursor = page.next_marker;
        }

        assert_eq!(seen.len(), 5);
        for i in 0..5 {
            assert!(seen.contains(&format!("{prefix}item-{i}.txt")));
        }

        for key in seen {
            store.delete(&key).await.unwrap();
        }
    }

    #[tokio::test]
    #[ignore] // Requires a running S3-compatible object store
    async fn test_live_presigned_url_carries_expiry() {
        let store = live_store();
        ensure_bucket(&store).await;

        let key = format!("test/{}.txt", Uuid::new_v4().simple());
        store
            .upload("", &key, Bytes::from_static(b"presign probe"))
            .await
            .unwrap();

        let url = store.presigned_url(&key, 900).await.unwrap();
        let query = url.query().unwrap_or_default();
        assert!(query.contains("X-Amz-Expires=900"));

        store.delete(&key).await.unwrap();
    }

    #[tokio::test]
    #[ignore] // Requires a running S3-compatible object store
    async fn test_live_upload_overwrites_existing() {
        let store = live_store();
        ensure_bucket(&store).await;

        let prefix = format!("test-overwrite-{}/", Uuid::new_v4().simple());

        let first = store
            .upload(&prefix, "report.txt", Bytes::from_static(b"first version"))
            .await
            .unwrap();
        let second = store
            .upload(&prefix, "report.txt", Bytes::from_static(b"second version"))
            .await
            .unwrap();
        assert_eq!(first.key, second.key);

        let downloaded = store.download(&second.key).await.unwrap().unwrap();
        assert_eq!(downloaded.data.as_ref(), b"second version");

        store.delete(&second.key).await.unwrap();
    }
}
