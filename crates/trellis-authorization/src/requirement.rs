//! Privilege requirement map
//!
//! For every assignable target — each grant level, and full revocation
//! — exactly one privilege gates the assignment: the sharing privilege
//! newly introduced at that level. Revocation is gated by the highest
//! level's share privilege, because removing a subject changes resource
//! membership just like granting top-level ownership does.
//!
//! The map is derived once from the validated hierarchy and never
//! changes afterwards.

use serde::{Deserialize, Serialize};

use crate::hierarchy::{GrantLevel, LevelSpec, Privilege};

/// An assignable target: a grant level, or full revocation
///
/// `Revoke` is a sentinel distinct from every level. It orders below
/// the lowest level, which is a display convention only — it takes no
/// part in the monotonic privilege mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GrantOption<L> {
    /// Remove the subject's grant entirely
    Revoke,
    /// Assign (or keep) the contained grant level
    Level(L),
}

impl<L> GrantOption<L> {
    /// The contained level, if this is not a revocation
    pub fn level(self) -> Option<L> {
        match self {
            GrantOption::Revoke => None,
            GrantOption::Level(level) => Some(level),
        }
    }
}

/// Target-to-required-privilege mapping derived from a hierarchy
///
/// Owned by [`GrantHierarchy`](crate::GrantHierarchy); obtain it via
/// [`GrantHierarchy::requirements`](crate::GrantHierarchy::requirements).
#[derive(Debug, Clone)]
pub struct RequirementMap<L, P> {
    // Revoke first, then levels ascending: the canonical target order.
    entries: Vec<(GrantOption<L>, P)>,
}

impl<L: GrantLevel, P: Privilege> RequirementMap<L, P> {
    /// Derive the map from validated level specs (lowest first)
    pub(crate) fn derive(levels: &[LevelSpec<L, P>]) -> Self {
        let top_share = levels[levels.len() - 1].share_privilege();
        let mut entries = Vec::with_capacity(levels.len() + 1);
        entries.push((GrantOption::Revoke, top_share));
        entries.extend(
            levels
                .iter()
                .map(|spec| (GrantOption::Level(spec.level()), spec.share_privilege())),
        );
        Self { entries }
    }

    /// Every assignable target in canonical order: Revoke first, then
    /// the levels ascending
    pub fn targets(&self) -> impl Iterator<Item = GrantOption<L>> + '_ {
        self.entries.iter().map(|(target, _)| *target)
    }

    /// The single privilege required to assign `target`
    ///
    /// # Panics
    ///
    /// Panics if `target` names a level outside the hierarchy this map
    /// was derived from (a caller/configuration mismatch).
    pub fn required_privilege(&self, target: GrantOption<L>) -> P {
        self.entries
            .iter()
            .find(|(candidate, _)| *candidate == target)
            .map(|(_, privilege)| *privilege)
            .unwrap_or_else(|| {
                panic!("target {target:?} is not part of the configured hierarchy")
            })
    }
}
