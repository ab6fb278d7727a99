//! Operations on objects in the configured bucket.
//!
//! This module provides the operation surface of the crate: existence
//! checks, uploads, downloads, deletion, ACL management, presigned URLs,
//! and paginated listing. Every operation opens its own session, performs
//! one remote call or a short checked sequence, and releases the session
//! before returning.
//!
//! ## Features
//!
//! - **Stateless Calls**: No state is carried across operations; each call
//!   is one independent request/response transaction
//! - **Absence as Data**: Missing objects surface as `false`/`None`/a
//!   not-found signal, never as a panic or an opaque failure
//! - **Observability**: Structured tracing with per-operation timing

mod object_operations;

pub use object_operations::{DownloadResult, ObjectOperations, UploadResult};
