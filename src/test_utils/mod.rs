use std::sync::atomic::AtomicUsize;
use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use once_cell::sync::OnceCell;
use tokio::sync::mpsc;
use tokio::sync::Mutex;

use crate::Group;
use crate::GroupSnapshot;
use crate::Membership;
use crate::WatchResult;

static LOGGER: OnceCell<()> = OnceCell::new();

/// This will ensure the tracing subscriber is only initialized once.
pub(crate) fn enable_logs() {
    LOGGER.get_or_init(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_test_writer()
            .try_init();
    });
}

pub(crate) fn member(id: u64) -> Membership {
    // Labels mimic coordination-service sequence node names.
    Membership::new(id, format!("member_{id:010}"))
}

pub(crate) fn snapshot_of(ids: &[u64]) -> GroupSnapshot {
    ids.iter().map(|id| member(*id)).collect()
}

/// Lets the spawned loop task drain everything it can before the test
/// asserts. Tests run with a paused clock, so this costs no wall time.
pub(crate) async fn settle() {
    tokio::time::sleep(Duration::from_millis(10)).await;
}

/// A `Group` driven by a script of watch outcomes.
///
/// Each `watch` call consumes the next scripted outcome; once the script is
/// exhausted the call stays pending, like a real watch with no membership
/// change. Call counts are recorded for expectations on re-watch behavior.
pub(crate) struct ScriptedGroup {
    outcomes: Mutex<mpsc::UnboundedReceiver<WatchResult>>,
    watch_calls: AtomicUsize,
}

impl ScriptedGroup {
    pub(crate) fn new() -> (Arc<Self>, mpsc::UnboundedSender<WatchResult>) {
        let (script_tx, script_rx) = mpsc::unbounded_channel();
        let group = Arc::new(ScriptedGroup {
            outcomes: Mutex::new(script_rx),
            watch_calls: AtomicUsize::new(0),
        });
        (group, script_tx)
    }

    pub(crate) fn watch_calls(&self) -> usize {
        self.watch_calls.load(Ordering::Acquire)
    }
}

#[async_trait]
impl Group for ScriptedGroup {
    async fn watch(
        &self,
        _expected: GroupSnapshot,
    ) -> WatchResult {
        self.watch_calls.fetch_add(1, Ordering::AcqRel);

        let mut outcomes = self.outcomes.lock().await;
        match outcomes.recv().await {
            Some(outcome) => outcome,
            // Script dropped: this watch never resolves.
            None => std::future::pending().await,
        }
    }
}
