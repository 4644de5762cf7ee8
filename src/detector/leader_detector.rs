//! The public detector handle.
//!
//! ## Example Usage
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use leader_detector::{Group, LeaderDetector};
//! # async fn example<G: Group>(group: Arc<G>) {
//! let detector = LeaderDetector::new(group);
//! let leader = detector.detect(None).await.expect("watch alive");
//! // ... the next call parks until leadership moves away from `leader`
//! let next = detector.detect(leader).await;
//! # }
//! ```

use std::sync::Arc;

use tokio::sync::mpsc;
use tokio::sync::oneshot;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use super::DetectorCommand;
use super::DetectorCore;
use crate::DetectorConfig;
use crate::Error;
use crate::Group;
use crate::Membership;
use crate::Result;

/// Client-side leadership observer over a [`Group`].
///
/// Watching begins at construction: a dedicated task owns every piece of
/// mutable state and serializes `detect()` calls with watch completions, so
/// callers on any task observe linearized semantics.
pub struct LeaderDetector {
    cmd_tx: mpsc::Sender<DetectorCommand>,
    shutdown: CancellationToken,
    // Joined exactly once, by the first `shutdown` call
    loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl LeaderDetector {
    pub fn new<G>(group: Arc<G>) -> Self
    where
        G: Group,
    {
        Self::with_config(group, DetectorConfig::default())
    }

    pub fn with_config<G>(
        group: Arc<G>,
        config: DetectorConfig,
    ) -> Self
    where
        G: Group,
    {
        // A zero-capacity channel cannot carry any command.
        let (cmd_tx, cmd_rx) = mpsc::channel(config.command_buffer.max(1));
        let shutdown = CancellationToken::new();

        let core = DetectorCore::new(group, cmd_rx, shutdown.clone());
        let loop_handle = tokio::spawn(core.run());

        LeaderDetector {
            cmd_tx,
            shutdown,
            loop_handle: Mutex::new(Some(loop_handle)),
        }
    }

    /// Reports the current leader as soon as it differs from `previous`.
    ///
    /// Resolves immediately when the detector's view already differs from
    /// what the caller last observed; otherwise the call stays pending until
    /// the next leadership change. Never blocks the caller's task.
    ///
    /// # Errors
    /// - [`Error::Watch`] when the underlying watch failed while the call
    ///   was pending
    /// - [`Error::Canceled`] when the detector was torn down first
    pub async fn detect(
        &self,
        previous: Option<Membership>,
    ) -> Result<Option<Membership>> {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.cmd_tx
            .send(DetectorCommand::Detect {
                previous,
                reply: reply_tx,
            })
            .await
            .map_err(|_| Error::Canceled)?;

        // A dropped slot means the loop went away before resolving us.
        reply_rx.await.map_err(|_| Error::Canceled)?
    }

    /// Stops the watch loop: the in-flight watch request is discarded and
    /// every pending `detect` call resolves as canceled. Idempotent.
    pub async fn shutdown(&self) {
        self.shutdown.cancel();

        let handle = self.loop_handle.lock().await.take();
        if let Some(handle) = handle {
            debug!("waiting for the watch loop to finish");
            let _ = handle.await;
        }
    }
}

impl Drop for LeaderDetector {
    fn drop(&mut self) {
        // Best effort: the loop observes the token and cancels its waiters.
        self.shutdown.cancel();
    }
}
