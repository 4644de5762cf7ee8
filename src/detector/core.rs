//! The watch-loop task behind the facade.
//!
//! One `DetectorCore` owns the current leader, the waiter registry and the
//! in-flight watch request. Its `run` loop is the single logical thread of
//! control: every `detect` command and every watch completion is processed
//! strictly serially, so no two state transitions ever interleave.

use std::sync::Arc;

use futures::future;
use futures::future::BoxFuture;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::debug;
use tracing::error;
use tracing::info;
use tracing::trace;
use tracing::warn;

use super::DetectorCommand;
use super::WaiterRegistry;
use crate::elect;
use crate::Error;
use crate::Group;
use crate::GroupSnapshot;
use crate::Membership;
use crate::WatchError;
use crate::WatchResult;

type WatchFuture = BoxFuture<'static, WatchResult>;

pub(crate) struct DetectorCore<G>
where
    G: Group,
{
    group: Arc<G>,
    leader: Option<Membership>,
    waiters: WaiterRegistry,

    // Commands from the facade
    cmd_rx: mpsc::Receiver<DetectorCommand>,

    /// In-flight watch request. `None` once the loop has stopped after a
    /// watch failure; no further request is ever issued then. Stopping for
    /// good mirrors the source design: resumption is the caller's job, by
    /// recreating the detector.
    watch: Option<WatchFuture>,

    // Teardown signal, shared with the facade
    shutdown: CancellationToken,
}

impl<G> DetectorCore<G>
where
    G: Group,
{
    pub(crate) fn new(
        group: Arc<G>,
        cmd_rx: mpsc::Receiver<DetectorCommand>,
        shutdown: CancellationToken,
    ) -> Self {
        DetectorCore {
            group,
            leader: None,
            waiters: WaiterRegistry::default(),
            cmd_rx,
            watch: None,
            shutdown,
        }
    }

    pub(crate) async fn run(mut self) {
        // First expectation is the empty snapshot: any existing membership
        // already differs from it, so the initial election happens on the
        // first notification.
        self.issue_watch(GroupSnapshot::new());

        loop {
            tokio::select! {
                // Use biased to ensure branch order
                biased;
                // P0: teardown
                _ = self.shutdown.cancelled() => {
                    self.cancel();
                    return;
                }
                // P1: watch completion
                outcome = Self::next_change(&mut self.watch) => {
                    match outcome {
                        Ok(snapshot) => self.on_membership_change(snapshot),
                        Err(e) => self.on_watch_failure(e),
                    }
                }
                // P2: detect commands
                cmd = self.cmd_rx.recv() => {
                    match cmd {
                        Some(cmd) => self.handle_command(cmd),
                        // Every facade handle is gone; nobody can observe a
                        // result anymore.
                        None => {
                            self.cancel();
                            return;
                        }
                    }
                }
            }
        }
    }

    /// Polls the in-flight watch request, or parks forever once the loop
    /// has stopped (commands are still served).
    async fn next_change(watch: &mut Option<WatchFuture>) -> WatchResult {
        match watch {
            Some(fut) => fut.await,
            None => future::pending().await,
        }
    }

    /// `Updated` transition: re-run the election and fulfill waiters when
    /// leadership moved.
    fn on_membership_change(
        &mut self,
        snapshot: GroupSnapshot,
    ) {
        trace!("watch resolved with {} member(s)", snapshot.len());

        if let Some(leader) = &self.leader {
            if !snapshot.contains(leader) {
                // Observational only: the single waiter resolution below is
                // tied to the recomputed leader, not to this event.
                warn!("the current leader {leader} is lost");
            }
        }

        // The incumbent winning again fulfills nothing.
        let elected = elect(&snapshot);
        if elected != self.leader {
            info!(
                "detected a new leader: {} (was {})",
                display_leader(&elected),
                display_leader(&self.leader),
            );
            self.waiters.resolve_all(&elected);
            self.leader = elected;
        }

        self.issue_watch(snapshot);
    }

    /// `Failed` transition: terminal for the loop. Leadership becomes
    /// permanently unknown and every pending waiter observes the error.
    fn on_watch_failure(
        &mut self,
        error: WatchError,
    ) {
        error!("failed to watch group memberships: {error}");

        self.leader = None;
        self.waiters.fail_all(&error);
        self.watch = None;
    }

    fn handle_command(
        &mut self,
        cmd: DetectorCommand,
    ) {
        match cmd {
            DetectorCommand::Detect { previous, reply } => {
                // The incumbent already differs from what the caller last
                // observed: answer immediately, no registration.
                if self.leader != previous {
                    let _ = reply.send(Ok(self.leader.clone()));
                    return;
                }

                trace!(
                    "caller waits for the next election result ({} now pending)",
                    self.waiters.len() + 1
                );
                self.waiters.register(reply);
            }
        }
    }

    fn issue_watch(
        &mut self,
        expected: GroupSnapshot,
    ) {
        let group = Arc::clone(&self.group);
        self.watch = Some(Box::pin(async move { group.watch(expected).await }));
    }

    /// Teardown, distinct from watch failure: the in-flight watch request is
    /// dropped (best-effort cooperative cancel towards the collaborator) and
    /// every pending caller observes `Canceled`.
    fn cancel(&mut self) {
        debug!("detector torn down; cancelling {} pending waiter(s)", self.waiters.len());

        self.watch = None;
        self.waiters.cancel_all();

        // Commands already queued behind the teardown signal would otherwise
        // be dropped silently; cancel them explicitly.
        self.cmd_rx.close();
        while let Ok(DetectorCommand::Detect { reply, .. }) = self.cmd_rx.try_recv() {
            let _ = reply.send(Err(Error::Canceled));
        }
    }
}

fn display_leader(leader: &Option<Membership>) -> String {
    match leader {
        Some(membership) => membership.to_string(),
        None => "none".to_string(),
    }
}
