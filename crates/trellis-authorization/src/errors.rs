//! Hierarchy configuration errors
//!
//! A broken hierarchy directly threatens the sharing invariant, so
//! every violation here is fatal at startup: the constructor refuses
//! to produce a usable hierarchy. At the platform boundary these
//! convert into the unified [`TrellisError`].

use trellis_core::TrellisError;

/// Rejection of a grant hierarchy definition at construction
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HierarchyError {
    /// The hierarchy declares no levels at all
    #[error("grant hierarchy must declare at least one level")]
    Empty,

    /// Levels were not supplied in strictly ascending order
    #[error("grant level {level} is out of order or duplicated")]
    UnorderedLevels {
        /// Debug rendering of the offending level
        level: String,
    },

    /// A level confers no privileges
    #[error("grant level {level} confers no privileges")]
    NoPrivileges {
        /// Debug rendering of the offending level
        level: String,
    },

    /// A level's privilege set is not a strict superset of the level below
    #[error("privileges of grant level {level} are not a strict superset of the level below")]
    NotMonotonic {
        /// Debug rendering of the offending level
        level: String,
    },

    /// A level's share privilege is not part of its own privilege set
    #[error("share privilege of grant level {level} is not conferred by that level")]
    ShareNotConferred {
        /// Debug rendering of the offending level
        level: String,
    },

    /// A level's share privilege is already conferred by a lower level
    #[error("share privilege of grant level {level} is already conferred by a lower level")]
    ShareNotNew {
        /// Debug rendering of the offending level
        level: String,
    },
}

impl From<HierarchyError> for TrellisError {
    fn from(err: HierarchyError) -> Self {
        TrellisError::invalid(err.to_string())
    }
}
