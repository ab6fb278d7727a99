//! Connection configuration and per-operation session management.
//!
//! This module provides the pieces every operation builds on: an immutable
//! [`ConnectionConfig`] shared for the process lifetime, the credential pair
//! with masking for safe logging, and the short-lived [`StorageSession`]
//! opened for exactly one operation and released when dropped.
//!
//! ## Features
//!
//! - **Configuration**: Validated, immutable connection settings safe to
//!   share across concurrent operations
//! - **Authentication**: Credential handling that keeps secrets out of logs
//!   and serialized output
//! - **Session Lifecycle**: Scoped acquisition with guaranteed release on
//!   every exit path

mod connection_config;
mod storage_credentials;
mod storage_session;

pub use connection_config::ConnectionConfig;
pub use storage_credentials::StorageCredentials;
pub use storage_session::StorageSession;
