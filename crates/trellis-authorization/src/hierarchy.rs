//! Grant hierarchy model
//!
//! A [`GrantHierarchy`] is immutable, process-wide configuration: the
//! ordered grant levels of one resource type and the privilege set
//! each level confers. The mapping must be strictly monotonic — every
//! level's privileges are a strict superset of every lower level's —
//! which is validated once at construction. The hierarchy is parametric
//! over the level and privilege types so that resource types with
//! different privilege vocabularies reuse the same engine, and so tests
//! can supply synthetic hierarchies.

use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;

use crate::errors::HierarchyError;
use crate::requirement::RequirementMap;

/// Bound for grant level types: a small, closed, totally ordered set
///
/// Blanket-implemented; platform vocabularies just derive the std
/// traits on their level enum.
pub trait GrantLevel: Copy + Eq + Ord + Hash + fmt::Debug {}

impl<T> GrantLevel for T where T: Copy + Eq + Ord + Hash + fmt::Debug {}

/// Bound for privilege types: opaque, identity-comparable tokens
pub trait Privilege: Copy + Eq + Hash + fmt::Debug {}

impl<T> Privilege for T where T: Copy + Eq + Hash + fmt::Debug {}

/// Definition of one grant level: the privileges it confers and the
/// sharing privilege newly introduced at this level
///
/// The share privilege is the capability required of an acting user to
/// assign this level to someone else. Privileges are opaque tokens, so
/// it is declared rather than inferred; the hierarchy constructor
/// validates that it is conferred by this level and by no lower level.
#[derive(Debug, Clone)]
pub struct LevelSpec<L, P> {
    level: L,
    privileges: HashSet<P>,
    share_privilege: P,
}

impl<L: GrantLevel, P: Privilege> LevelSpec<L, P> {
    /// Define a level with its conferred privileges and share privilege
    pub fn new(level: L, privileges: impl IntoIterator<Item = P>, share_privilege: P) -> Self {
        Self {
            level,
            privileges: privileges.into_iter().collect(),
            share_privilege,
        }
    }

    /// The level this spec defines
    pub fn level(&self) -> L {
        self.level
    }

    /// The privileges this level confers
    pub fn privileges(&self) -> &HashSet<P> {
        &self.privileges
    }

    /// The sharing privilege newly introduced at this level
    pub fn share_privilege(&self) -> P {
        self.share_privilege
    }
}

/// Ordered grant levels of a resource type and their privilege sets
///
/// Construct once at startup with [`GrantHierarchy::new`]; a rejected
/// definition is a fatal configuration error. After construction the
/// hierarchy is read-only and freely shared (`Send + Sync` for the
/// usual level/privilege types).
#[derive(Debug, Clone)]
pub struct GrantHierarchy<L, P> {
    levels: Vec<LevelSpec<L, P>>,
    requirements: RequirementMap<L, P>,
}

impl<L: GrantLevel, P: Privilege> GrantHierarchy<L, P> {
    /// Validate a hierarchy definition
    ///
    /// `levels` must be supplied lowest first. Rejects empty
    /// hierarchies, unordered or duplicated levels, non-monotonic
    /// privilege sets, and share privileges that are missing from
    /// their level or already present in a lower one.
    pub fn new(levels: Vec<LevelSpec<L, P>>) -> Result<Self, HierarchyError> {
        if levels.is_empty() {
            return Err(HierarchyError::Empty);
        }

        for (position, spec) in levels.iter().enumerate() {
            let debug_level = || format!("{:?}", spec.level);

            if spec.privileges.is_empty() {
                return Err(HierarchyError::NoPrivileges {
                    level: debug_level(),
                });
            }
            if !spec.privileges.contains(&spec.share_privilege) {
                return Err(HierarchyError::ShareNotConferred {
                    level: debug_level(),
                });
            }

            if position == 0 {
                continue;
            }
            let below = &levels[position - 1];
            if below.level >= spec.level {
                return Err(HierarchyError::UnorderedLevels {
                    level: debug_level(),
                });
            }
            // Strict superset of the level below; transitively of every
            // lower level, since the chain is checked pairwise.
            if !below.privileges.is_subset(&spec.privileges)
                || below.privileges.len() == spec.privileges.len()
            {
                return Err(HierarchyError::NotMonotonic {
                    level: debug_level(),
                });
            }
            if below.privileges.contains(&spec.share_privilege) {
                return Err(HierarchyError::ShareNotNew {
                    level: debug_level(),
                });
            }
        }

        let requirements = RequirementMap::derive(&levels);
        Ok(Self {
            levels,
            requirements,
        })
    }

    /// The canonical display and iteration order, lowest level first
    pub fn levels_ascending(&self) -> impl Iterator<Item = L> + '_ {
        self.levels.iter().map(LevelSpec::level)
    }

    /// Whether `level` is part of this hierarchy
    pub fn contains(&self, level: L) -> bool {
        self.levels.iter().any(|spec| spec.level == level)
    }

    /// The highest grant level
    pub fn highest(&self) -> L {
        // non-empty by construction
        self.levels[self.levels.len() - 1].level
    }

    /// The lowest grant level
    pub fn lowest(&self) -> L {
        self.levels[0].level
    }

    /// The fixed privilege set a level confers
    ///
    /// # Panics
    ///
    /// Panics if `level` is not part of this hierarchy. An unknown
    /// level signals a configuration or version mismatch between the
    /// caller and the hierarchy definition, which must not be papered
    /// over with a guessed default.
    pub fn privileges_of(&self, level: L) -> &HashSet<P> {
        self.spec_of(level).privileges()
    }

    /// The privilege required to assign each target, including revocation
    pub fn requirements(&self) -> &RequirementMap<L, P> {
        &self.requirements
    }

    fn spec_of(&self, level: L) -> &LevelSpec<L, P> {
        self.levels
            .iter()
            .find(|spec| spec.level == level)
            .unwrap_or_else(|| {
                panic!("grant level {level:?} is not part of the configured hierarchy")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn two_levels() -> Vec<LevelSpec<u8, &'static str>> {
        vec![
            LevelSpec::new(0, ["read", "share_read"], "share_read"),
            LevelSpec::new(1, ["read", "share_read", "write", "share_write"], "share_write"),
        ]
    }

    #[test]
    fn accepts_monotonic_hierarchy() {
        let hierarchy = GrantHierarchy::new(two_levels()).expect("well-formed");
        assert_eq!(hierarchy.levels_ascending().collect::<Vec<_>>(), [0, 1]);
        assert_eq!(hierarchy.lowest(), 0);
        assert_eq!(hierarchy.highest(), 1);
        assert!(hierarchy.contains(1));
        assert!(!hierarchy.contains(7));
        assert_eq!(hierarchy.privileges_of(0).len(), 2);
    }

    #[test]
    fn rejects_empty_hierarchy() {
        let err = GrantHierarchy::<u8, &str>::new(vec![]).unwrap_err();
        assert_eq!(err, HierarchyError::Empty);
    }

    #[test]
    fn rejects_unordered_levels() {
        let mut levels = two_levels();
        levels.swap(0, 1);
        let dup = vec![
            LevelSpec::new(1, ["read"], "read"),
            LevelSpec::new(1, ["read", "write"], "write"),
        ];
        assert_eq!(
            GrantHierarchy::new(dup).unwrap_err(),
            HierarchyError::UnorderedLevels {
                level: "1".to_string()
            }
        );
        assert!(GrantHierarchy::new(levels).is_err());
    }

    #[test]
    fn rejects_non_strict_superset() {
        let levels = vec![
            LevelSpec::new(0, ["read", "share_read"], "share_read"),
            LevelSpec::new(1, ["read", "write"], "write"),
        ];
        assert_eq!(
            GrantHierarchy::new(levels).unwrap_err(),
            HierarchyError::NotMonotonic {
                level: "1".to_string()
            }
        );

        // Equal sets are not a *strict* superset either.
        let levels = vec![
            LevelSpec::new(0, ["read", "share_read"], "share_read"),
            LevelSpec::new(1, ["read", "share_read"], "share_read"),
        ];
        assert_eq!(
            GrantHierarchy::new(levels).unwrap_err(),
            HierarchyError::NotMonotonic {
                level: "1".to_string()
            }
        );
    }

    #[test]
    fn rejects_share_privilege_outside_level() {
        let levels = vec![LevelSpec::new(0, ["read"], "share_read")];
        assert_eq!(
            GrantHierarchy::new(levels).unwrap_err(),
            HierarchyError::ShareNotConferred {
                level: "0".to_string()
            }
        );
    }

    #[test]
    fn rejects_share_privilege_inherited_from_below() {
        let levels = vec![
            LevelSpec::new(0, ["read", "share_read"], "share_read"),
            LevelSpec::new(1, ["read", "share_read", "write"], "share_read"),
        ];
        assert_eq!(
            GrantHierarchy::new(levels).unwrap_err(),
            HierarchyError::ShareNotNew {
                level: "1".to_string()
            }
        );
    }

    #[test]
    fn rejects_level_without_privileges() {
        let levels = vec![
            LevelSpec::new(0, Vec::<&str>::new(), "read"),
        ];
        assert_eq!(
            GrantHierarchy::new(levels).unwrap_err(),
            HierarchyError::NoPrivileges {
                level: "0".to_string()
            }
        );
    }

    #[test]
    #[should_panic(expected = "not part of the configured hierarchy")]
    fn unknown_level_panics() {
        let hierarchy = GrantHierarchy::new(two_levels()).expect("well-formed");
        let _ = hierarchy.privileges_of(9);
    }
}
