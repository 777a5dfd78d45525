//! Grant hierarchy and resolution engine for Trellis
//!
//! This crate decides what grant changes an acting user may be offered
//! and whether a submitted change is permissible. It encodes the
//! platform's core sharing invariant: no user may create, extend, or
//! revoke a privilege level they do not themselves hold.
//!
//! # Components
//!
//! - [`GrantHierarchy`]: the ordered grant levels of a resource type
//!   and the privilege set each level confers. Immutable configuration,
//!   validated for strict monotonicity at construction.
//! - [`RequirementMap`]: for each assignable target (a level, or full
//!   revocation) the single privilege the acting user must hold to
//!   assign it. Derived from the hierarchy, immutable.
//! - [`resolve_grant_options`]: the pure resolution engine. Given a
//!   subject's current grant and the acting user's privilege set, it
//!   returns the selectable options and a read-only flag.
//! - [`check_assignment`]: the pure write-side rule checks applied when
//!   a grant change is actually submitted (last-owner protection, self
//!   promotion/demotion rules, owner-only revocation).
//! - [`ResourceGrant`] / [`ResourcePrivilege`]: the built-in vocabulary
//!   for shared resources (Reader < Writer < Owner).
//!
//! The engine is synchronous and side-effect free. Fetching subjects
//! and their grants, persisting changes, and rendering display labels
//! belong to other layers; callers hand this crate a snapshot and get
//! a value back.

#![forbid(unsafe_code)]

pub mod assignment;
pub mod errors;
pub mod hierarchy;
pub mod requirement;
pub mod resolver;
pub mod resource;

pub use assignment::{check_assignment, AssignmentDecision, AssignmentRequest};
pub use errors::HierarchyError;
pub use hierarchy::{GrantHierarchy, GrantLevel, LevelSpec, Privilege};
pub use requirement::{GrantOption, RequirementMap};
pub use resolver::{resolve_grant_options, ResolutionResult};
pub use resource::{ResourceGrant, ResourcePrivilege};
