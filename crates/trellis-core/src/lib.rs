//! Trellis Core - Platform Foundation
//!
//! Foundational types shared across the Trellis resource-sharing
//! platform: the unified error type and the identifiers for the
//! entities that hold and carry grants (users, groups, resources).
//!
//! This crate contains no authorization logic. The grant hierarchy,
//! the privilege requirement map, and the resolution engine live in
//! `trellis-authorization`; storage, transport, and presentation
//! layers live in their own crates and consume these types.

#![forbid(unsafe_code)]

/// Unified error handling
pub mod errors;

/// User, group, and resource identifiers
pub mod identifiers;

pub use errors::{Result, TrellisError};
pub use identifiers::{GroupId, ResourceId, Subject, UserId};
