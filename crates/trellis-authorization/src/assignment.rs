//! Write-side assignment rule checks
//!
//! [`resolve_grant_options`](crate::resolve_grant_options) decides what
//! may be *offered*; this module decides whether a submitted change is
//! actually permissible. The extra rules protect resource membership as
//! a whole: a resource must never lose its last owner, and a user must
//! not rearrange grants above their own standing.
//!
//! Like the resolver this is a pure computation. The caller supplies a
//! snapshot (grants, admin flag, owner count) fetched from the
//! registry; atomicity of the eventual write stays with the caller.

use std::collections::HashSet;

use trellis_core::{Subject, UserId};

use crate::hierarchy::{GrantHierarchy, GrantLevel, Privilege};
use crate::requirement::GrantOption;

/// Outcome of an assignment rule check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AssignmentDecision {
    /// The change is permitted
    Granted,
    /// The change is permitted because the issuer is a platform admin
    Bypassed,
    /// The change must be rejected
    Denied {
        /// Why the change was rejected
        reason: &'static str,
    },
}

impl AssignmentDecision {
    /// Whether the change may proceed
    pub fn is_allowed(&self) -> bool {
        !matches!(self, AssignmentDecision::Denied { .. })
    }
}

/// A proposed grant change, with the snapshot needed to judge it
///
/// `owner_count` is the number of subjects currently holding the
/// hierarchy's highest level on the resource; listing those subjects
/// belongs to the registry, only the count matters here.
#[derive(Debug, Clone)]
pub struct AssignmentRequest<'a, L, P> {
    /// The acting user submitting the change
    pub issuer: UserId,
    /// The acting user's own grant on the resource, if any
    pub issuer_grant: Option<L>,
    /// Whether the acting user is a platform admin
    pub issuer_is_admin: bool,
    /// The acting user's privilege set on the resource
    pub issuer_privileges: &'a HashSet<P>,
    /// The subject whose grant would change
    pub subject: Subject,
    /// The subject's current grant on the resource, if any
    pub subject_grant: Option<L>,
    /// How many subjects currently hold the highest level
    pub owner_count: usize,
    /// The proposed target: a level, or full revocation
    pub target: GrantOption<L>,
}

/// Judge a proposed grant change against the assignment rules
///
/// Rules, in the order they short-circuit:
/// 1. The last holder of the highest level can never be demoted or
///    revoked, not even by an admin or by themselves.
/// 2. Admin issuers bypass the remaining rules.
/// 3. A non-admin issuer may demote another subject only while holding
///    a strictly higher grant than the subject's (demoting oneself is
///    always allowed at this step).
/// 4. Revocation is reserved to holders of the highest level, who
///    still cannot revoke a peer at that level.
/// 5. Granting a level finally requires the sharing privilege the
///    requirement map demands for it. Promotion of oneself fails here
///    naturally: the needed share privilege belongs to a level the
///    issuer does not hold.
///
/// # Panics
///
/// Panics if any grant in the request names a level outside
/// `hierarchy` (caller/configuration mismatch, fail-fast).
pub fn check_assignment<L: GrantLevel, P: Privilege>(
    hierarchy: &GrantHierarchy<L, P>,
    request: &AssignmentRequest<'_, L, P>,
) -> AssignmentDecision {
    for level in [
        request.issuer_grant,
        request.subject_grant,
        request.target.level(),
    ]
    .into_iter()
    .flatten()
    {
        assert!(
            hierarchy.contains(level),
            "grant level {level:?} is not part of the configured hierarchy"
        );
    }

    let decision = match request.target {
        GrantOption::Level(new_grant) => check_grant(hierarchy, request, new_grant),
        GrantOption::Revoke => check_revoke(hierarchy, request),
    };

    if let AssignmentDecision::Denied { reason } = decision {
        tracing::warn!(
            issuer = %request.issuer,
            subject = %request.subject,
            target = ?request.target,
            reason,
            "grant assignment denied"
        );
    }
    decision
}

fn check_grant<L: GrantLevel, P: Privilege>(
    hierarchy: &GrantHierarchy<L, P>,
    request: &AssignmentRequest<'_, L, P>,
    new_grant: L,
) -> AssignmentDecision {
    let top = hierarchy.highest();

    // Sharing privilege gate. Computed first, applied last, so the
    // membership rules below report their more precise reasons.
    let share = if request.issuer_is_admin {
        AssignmentDecision::Bypassed
    } else {
        let required = hierarchy
            .requirements()
            .required_privilege(GrantOption::Level(new_grant));
        if request.issuer_privileges.contains(&required) {
            AssignmentDecision::Granted
        } else {
            AssignmentDecision::Denied {
                reason: "issuer does not hold the sharing privilege for the requested level",
            }
        }
    };

    if request.subject_grant == Some(top) && new_grant < top && request.owner_count == 1 {
        return AssignmentDecision::Denied {
            reason: "cannot demote the last owner",
        };
    }

    let issuer_is_subject = Subject::User(request.issuer) == request.subject;
    if !request.issuer_is_admin && !issuer_is_subject {
        if let (Some(issuer_grant), Some(subject_grant)) =
            (request.issuer_grant, request.subject_grant)
        {
            if new_grant < subject_grant && issuer_grant <= subject_grant {
                return AssignmentDecision::Denied {
                    reason: "cannot demote a subject without holding a higher grant",
                };
            }
        }
    }

    share
}

fn check_revoke<L: GrantLevel, P: Privilege>(
    hierarchy: &GrantHierarchy<L, P>,
    request: &AssignmentRequest<'_, L, P>,
) -> AssignmentDecision {
    let top = hierarchy.highest();

    // Holds even for admins.
    if request.subject_grant == Some(top) && request.owner_count == 1 {
        return AssignmentDecision::Denied {
            reason: "cannot remove the last owner",
        };
    }

    if request.issuer_is_admin {
        return AssignmentDecision::Bypassed;
    }

    if request.issuer_grant != Some(top) {
        return AssignmentDecision::Denied {
            reason: "only owners can revoke grants",
        };
    }

    if request.subject_grant == Some(top) {
        return AssignmentDecision::Denied {
            reason: "an owner cannot revoke another owner",
        };
    }

    AssignmentDecision::Granted
}
