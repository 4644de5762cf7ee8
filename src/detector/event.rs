use tokio::sync::oneshot;

use crate::Membership;
use crate::Result;

/// Result slot of one pending `detect()` call. Resolved exactly once.
pub(crate) type ReplySlot = oneshot::Sender<Result<Option<Membership>>>;

/// Commands forwarded from the facade to the watch-loop task.
#[derive(Debug)]
pub(crate) enum DetectorCommand {
    /// Report the current leader if it already differs from `previous`,
    /// otherwise park the reply slot until the next leadership change.
    Detect {
        previous: Option<Membership>,
        reply: ReplySlot,
    },
}
