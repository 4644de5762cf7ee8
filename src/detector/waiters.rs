use tracing::trace;

use super::ReplySlot;
use crate::Error;
use crate::Membership;
use crate::WatchError;

/// Pending `detect()` requests awaiting the next leadership change.
///
/// The registry is drained as a unit: every slot registered before a
/// leadership transition observes exactly that transition's outcome, and a
/// slot can never be resolved twice because resolution consumes the sender.
#[derive(Debug, Default)]
pub(crate) struct WaiterRegistry {
    slots: Vec<ReplySlot>,
}

impl WaiterRegistry {
    pub(crate) fn register(
        &mut self,
        reply: ReplySlot,
    ) {
        self.slots.push(reply);
    }

    pub(crate) fn len(&self) -> usize {
        self.slots.len()
    }

    /// Resolves every pending waiter with the newly elected leader.
    pub(crate) fn resolve_all(
        &mut self,
        leader: &Option<Membership>,
    ) {
        trace!("resolving {} waiter(s)", self.slots.len());
        for slot in self.slots.drain(..) {
            // The caller may have dropped the receiving half; not an error
            // for the loop.
            let _ = slot.send(Ok(leader.clone()));
        }
    }

    /// Fails every pending waiter with the watch error.
    pub(crate) fn fail_all(
        &mut self,
        error: &WatchError,
    ) {
        trace!("failing {} waiter(s)", self.slots.len());
        for slot in self.slots.drain(..) {
            let _ = slot.send(Err(Error::Watch(error.clone())));
        }
    }

    /// Cancels every pending waiter on detector teardown.
    pub(crate) fn cancel_all(&mut self) {
        trace!("cancelling {} waiter(s)", self.slots.len());
        for slot in self.slots.drain(..) {
            let _ = slot.send(Err(Error::Canceled));
        }
    }
}
