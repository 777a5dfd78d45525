//! Identifiers for the entities that hold and carry grants
//!
//! Users, groups, and resources are registered and named by the
//! external registry; these newtypes only carry stable identity
//! through the platform. Display labels are owned by the presentation
//! layer and never appear here.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier of a registered user
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct UserId(pub Uuid);

/// Identifier of a registered group of users
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct GroupId(pub Uuid);

/// Identifier of a shared resource (an infrastructure, a project, ...)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ResourceId(pub Uuid);

macro_rules! uuid_id_impls {
    ($name:ident) => {
        impl $name {
            /// Create from a UUID
            pub fn from_uuid(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}", self.0)
            }
        }

        impl FromStr for $name {
            type Err = uuid::Error;

            fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl From<Uuid> for $name {
            fn from(uuid: Uuid) -> Self {
                Self(uuid)
            }
        }

        impl From<$name> for Uuid {
            fn from(id: $name) -> Self {
                id.0
            }
        }
    };
}

uuid_id_impls!(UserId);
uuid_id_impls!(GroupId);
uuid_id_impls!(ResourceId);

/// An entity that can hold a grant on a resource
///
/// A subject holds at most one grant level per resource. Group
/// membership resolution (which users a group grant reaches) belongs
/// to the external registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Subject {
    /// An individual user
    User(UserId),
    /// A group of users
    Group(GroupId),
}

impl Subject {
    /// The underlying identifier, without the user/group distinction
    pub fn id(&self) -> Uuid {
        match self {
            Subject::User(user) => user.0,
            Subject::Group(group) => group.0,
        }
    }
}

impl From<UserId> for Subject {
    fn from(user: UserId) -> Self {
        Subject::User(user)
    }
}

impl From<GroupId> for Subject {
    fn from(group: GroupId) -> Self {
        Subject::Group(group)
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Subject::User(user) => write!(f, "user:{user}"),
            Subject::Group(group) => write!(f, "group:{group}"),
        }
    }
}
