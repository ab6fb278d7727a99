//! Value types for object storage operations.
//!
//! This module provides the access-control policy vocabulary and the
//! read-only listing output types produced by the operation surface. All of
//! them are immutable value objects with no further lifecycle.

mod acl_policy;
mod object_page;
mod object_summary;

pub use acl_policy::AclPolicy;
pub use object_page::ObjectPage;
pub use object_summary::ObjectSummary;
