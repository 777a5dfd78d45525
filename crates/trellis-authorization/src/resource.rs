//! Built-in grant vocabulary for shared resources
//!
//! Infrastructures, projects, and the other shared resource types use
//! the same three-level vocabulary: Reader < Writer < Owner, with a
//! read/write/delete privilege triple and a sharing privilege
//! introduced at each level. Other vocabularies can be defined by
//! constructing their own [`GrantHierarchy`]; nothing in the engine is
//! specific to this one.

use std::collections::HashSet;
use std::fmt;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::hierarchy::{GrantHierarchy, LevelSpec};

/// An atomic capability on a shared resource
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourcePrivilege {
    /// Read the resource
    CanRead,
    /// Grant read access to others
    CanShareRead,
    /// Modify the resource
    CanWrite,
    /// Grant write access to others
    CanShareWrite,
    /// Delete the resource
    CanDelete,
    /// Grant ownership to others (and revoke grants)
    CanShareOwnership,
}

impl fmt::Display for ResourcePrivilege {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourcePrivilege::CanRead => "can_read",
            ResourcePrivilege::CanShareRead => "can_share_read",
            ResourcePrivilege::CanWrite => "can_write",
            ResourcePrivilege::CanShareWrite => "can_share_write",
            ResourcePrivilege::CanDelete => "can_delete",
            ResourcePrivilege::CanShareOwnership => "can_share_ownership",
        };
        f.write_str(name)
    }
}

/// Grant level a subject can hold on a shared resource
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ResourceGrant {
    /// Read-only access
    Reader,
    /// Read and write access
    Writer,
    /// Full control, including deletion and membership changes
    Owner,
}

static RESOURCE_HIERARCHY: Lazy<GrantHierarchy<ResourceGrant, ResourcePrivilege>> =
    Lazy::new(|| {
        use ResourcePrivilege::*;
        GrantHierarchy::new(vec![
            LevelSpec::new(ResourceGrant::Reader, [CanRead, CanShareRead], CanShareRead),
            LevelSpec::new(
                ResourceGrant::Writer,
                [CanRead, CanShareRead, CanWrite, CanShareWrite],
                CanShareWrite,
            ),
            LevelSpec::new(
                ResourceGrant::Owner,
                [
                    CanRead,
                    CanShareRead,
                    CanWrite,
                    CanShareWrite,
                    CanDelete,
                    CanShareOwnership,
                ],
                CanShareOwnership,
            ),
        ])
        .expect("built-in resource hierarchy is well-formed")
    });

impl ResourceGrant {
    /// The process-wide hierarchy for shared resources
    pub fn hierarchy() -> &'static GrantHierarchy<ResourceGrant, ResourcePrivilege> {
        &RESOURCE_HIERARCHY
    }

    /// The privileges this level confers
    ///
    /// This is also how an acting user's own privilege set on a
    /// resource is derived from their grant, before admin roles and
    /// group inheritance are folded in by the authorization lookup.
    pub fn privileges(self) -> &'static HashSet<ResourcePrivilege> {
        Self::hierarchy().privileges_of(self)
    }

    /// The sharing privilege required to assign this level to someone
    pub fn share_privilege(self) -> ResourcePrivilege {
        match self {
            ResourceGrant::Reader => ResourcePrivilege::CanShareRead,
            ResourceGrant::Writer => ResourcePrivilege::CanShareWrite,
            ResourceGrant::Owner => ResourcePrivilege::CanShareOwnership,
        }
    }
}

impl fmt::Display for ResourceGrant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ResourceGrant::Reader => "READER",
            ResourceGrant::Writer => "WRITER",
            ResourceGrant::Owner => "OWNER",
        };
        f.write_str(name)
    }
}
