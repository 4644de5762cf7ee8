//! Group membership model shared with the coordination service.
//!
//! This module:
//! - Defines [`Membership`], the opaque handle for one group participant
//! - Defines [`GroupSnapshot`], the set of participants a watch reports
//! - Defines the [`Group`] collaborator trait the detector watches through
//!
//! The detector never joins or leaves the group itself; it only consumes the
//! change-notifying view the `Group` collaborator exposes.


use std::cmp::Ordering;
use std::collections::HashSet;
use std::fmt;
use std::hash::Hash;
use std::hash::Hasher;

use async_trait::async_trait;
#[cfg(test)]
use mockall::automock;
use serde::Deserialize;
use serde::Serialize;

use crate::WatchError;

/// One participant in the group.
///
/// Carries the numeric identifier the coordination service assigned when the
/// participant joined; identifiers grow monotonically across the group's
/// history, so the smallest identifier belongs to the oldest member.
/// Equality, ordering and hashing use the identifier alone — the label is
/// ancillary metadata and never participates in comparisons.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Membership {
    id: u64,
    label: String,
}

impl Membership {
    pub fn new(
        id: u64,
        label: impl Into<String>,
    ) -> Self {
        Membership {
            id,
            label: label.into(),
        }
    }

    /// The identifier assigned by the coordination service.
    pub fn id(&self) -> u64 {
        self.id
    }

    /// The coordination-service node label the identifier was minted from
    /// (e.g. a sequence znode name).
    pub fn label(&self) -> &str {
        &self.label
    }
}

impl PartialEq for Membership {
    fn eq(
        &self,
        other: &Self,
    ) -> bool {
        self.id == other.id
    }
}

impl Eq for Membership {}

impl PartialOrd for Membership {
    fn partial_cmp(
        &self,
        other: &Self,
    ) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Membership {
    fn cmp(
        &self,
        other: &Self,
    ) -> Ordering {
        self.id.cmp(&other.id)
    }
}

impl Hash for Membership {
    fn hash<H: Hasher>(
        &self,
        state: &mut H,
    ) {
        self.id.hash(state);
    }
}

impl fmt::Display for Membership {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "(id={})", self.id)
    }
}

/// The set of participants reported by one watch notification.
/// Unique by identifier, unordered.
pub type GroupSnapshot = HashSet<Membership>;

/// Outcome of one watch request.
pub type WatchResult = std::result::Result<GroupSnapshot, WatchError>;

/// External group abstraction backed by a coordination service.
///
/// The detector issues one watch at a time and trusts the collaborator for a
/// linearizable view of membership; consensus and replication guarantees
/// live behind this boundary.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait Group: Send + Sync + 'static {
    /// Resolves once the group's actual membership differs from `expected`,
    /// yielding the new snapshot.
    ///
    /// Fails with [`WatchError`] on coordination-service loss. Dropping the
    /// returned future discards the pending request without resolving it as
    /// either success or failure.
    async fn watch(
        &self,
        expected: GroupSnapshot,
    ) -> WatchResult;
}
