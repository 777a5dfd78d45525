//! Grant resolution engine
//!
//! Pure decision function: given a subject's current grant and the
//! acting user's privilege set on the resource, compute the grant
//! options the acting user may be offered and whether the selection
//! must be locked. Called once per (subject, resource) pair on every
//! render or edit cycle; the result is a throwaway value.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::hierarchy::{GrantHierarchy, GrantLevel, Privilege};
use crate::requirement::GrantOption;

/// Outcome of resolving the grant options for one subject
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResolutionResult<L> {
    /// The subject's current grant, always echoed back unchanged
    pub current: L,
    /// Selectable targets in canonical order: Revoke first (when
    /// permitted), then levels ascending. When `read_only` is set this
    /// collapses to the current grant alone.
    pub options: Vec<GrantOption<L>>,
    /// Whether the caller must disable editing for this subject
    pub read_only: bool,
}

/// Compute the assignable grant options for one subject
///
/// A target is allowed when the acting user holds the privilege the
/// requirement map demands for it. If the acting user cannot even
/// match the subject's *current* level, they may not touch this
/// subject's access at all: the result collapses to the current grant
/// as the only option, marked read-only. Exposing anything else would
/// offer an operation the backend must reject — or worse, a downgrade
/// that looks safe but is not assignable without the matching
/// capability.
///
/// Pure and total over valid inputs: no I/O, deterministic, safe to
/// call concurrently.
///
/// # Panics
///
/// Panics if `subject_grant` is not part of `hierarchy`. That signals
/// a configuration or version mismatch between the acting client and
/// the hierarchy definition, and guessing a default could under- or
/// over-grant options.
pub fn resolve_grant_options<L: GrantLevel, P: Privilege>(
    hierarchy: &GrantHierarchy<L, P>,
    subject_grant: L,
    user_privileges: &HashSet<P>,
) -> ResolutionResult<L> {
    assert!(
        hierarchy.contains(subject_grant),
        "grant level {subject_grant:?} is not part of the configured hierarchy"
    );

    let requirements = hierarchy.requirements();
    let allowed: Vec<GrantOption<L>> = requirements
        .targets()
        .filter(|target| user_privileges.contains(&requirements.required_privilege(*target)))
        .collect();

    if allowed.contains(&GrantOption::Level(subject_grant)) {
        tracing::debug!(
            ?subject_grant,
            options = allowed.len(),
            "resolved grant options"
        );
        ResolutionResult {
            current: subject_grant,
            options: allowed,
            read_only: false,
        }
    } else {
        // The acting user lacks even the privilege matching the
        // subject's current level: show the accurate value, locked.
        tracing::debug!(?subject_grant, "grant selection locked");
        ResolutionResult {
            current: subject_grant,
            options: vec![GrantOption::Level(subject_grant)],
            read_only: true,
        }
    }
}
