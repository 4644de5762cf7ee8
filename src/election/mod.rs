//! The election rule: map a membership snapshot to a leader.
//!
//! The leader is the oldest member of the group, i.e. the one whose
//! coordination-service identifier is smallest. Identifiers are unique, so
//! no further tie-break exists.


use crate::GroupSnapshot;
use crate::Membership;

/// Runs an election over `snapshot`.
///
/// Returns the membership with the smallest identifier, or `None` when the
/// snapshot is empty. Pure and O(n). The comparator is explicit over the
/// identifier field so the result never depends on container iteration
/// order.
pub fn elect(snapshot: &GroupSnapshot) -> Option<Membership> {
    snapshot.iter().min_by(|a, b| a.id().cmp(&b.id())).cloned()
}
