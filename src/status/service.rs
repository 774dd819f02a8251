//! Coordinator task that owns the status board.
//!
//! Only [`StatusService::run`] touches the board. Discovery and lookups run
//! on other tasks and report back as events tagged with their cycle id;
//! user actions arrive through [`StatusHandle`].

use std::sync::Arc;

use serde::Serialize;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::task::JoinSet;

use crate::lookup::{AddressLookup, PublicAddressResult, PublicIpResolver};
use crate::network::{AddressFamily, DiscoveryError, InterfaceAddress, InterfaceSource, discover};

use super::board::{CycleId, CyclePhase, DiscoveryOutcome, StatusBoard};
use super::row::MenuEntry;

/// A complete copy of what should be on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MenuSnapshot {
    /// The cycle this menu belongs to.
    pub cycle: u64,
    /// How far that cycle has progressed.
    pub phase: CyclePhase,
    /// Entries in display order.
    pub entries: Vec<MenuEntry>,
}

impl MenuSnapshot {
    fn of(board: &StatusBoard) -> Self {
        Self {
            cycle: board.cycle().get(),
            phase: board.phase(),
            entries: board.entries().to_vec(),
        }
    }

    /// Returns true once the cycle will not change further.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.phase == CyclePhase::Complete
    }
}

/// The display adapter boundary.
///
/// Called from the coordinator after every change. Implementations should
/// return quickly; anything slow belongs on another task.
pub trait DisplaySink: Send {
    /// Replaces whatever is on screen with `snapshot`.
    fn render(&mut self, snapshot: MenuSnapshot);
}

/// A sink that publishes snapshots on a `watch` channel.
///
/// Useful for embedding the service in another event loop and for
/// waiting until a cycle completes.
#[derive(Debug)]
pub struct WatchSink {
    tx: watch::Sender<MenuSnapshot>,
}

impl WatchSink {
    /// Creates the sink and a receiver that starts with an empty idle menu.
    #[must_use]
    pub fn new() -> (Self, watch::Receiver<MenuSnapshot>) {
        let (tx, rx) = watch::channel(MenuSnapshot::of(&StatusBoard::new()));
        (Self { tx }, rx)
    }
}

impl DisplaySink for WatchSink {
    fn render(&mut self, snapshot: MenuSnapshot) {
        self.tx.send_replace(snapshot);
    }
}

/// Error returned when the coordinator has already stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("Status service has stopped")]
pub struct ServiceStopped;

/// Requests from outside the coordinator.
#[derive(Debug)]
enum Command {
    Refresh,
    Copy {
        index: usize,
        reply: oneshot::Sender<Option<String>>,
    },
    Quit,
}

/// Results from background work.
#[derive(Debug)]
enum Event {
    Discovered {
        cycle: CycleId,
        result: Result<Vec<InterfaceAddress>, DiscoveryError>,
    },
    Resolved {
        cycle: CycleId,
        result: PublicAddressResult,
    },
}

/// Cloneable handle exposing the three external operations.
#[derive(Debug, Clone)]
pub struct StatusHandle {
    tx: mpsc::UnboundedSender<Command>,
}

impl StatusHandle {
    /// Starts a new refresh cycle.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceStopped`] if the coordinator is no longer running.
    pub fn refresh(&self) -> Result<(), ServiceStopped> {
        self.tx.send(Command::Refresh).map_err(|_| ServiceStopped)
    }

    /// Returns the clipboard text for the entry at `index`.
    ///
    /// `None` for separators, disabled rows, unknown indices, or when the
    /// coordinator has stopped.
    pub async fn copy(&self, index: usize) -> Option<String> {
        let (reply, rx) = oneshot::channel();
        self.tx.send(Command::Copy { index, reply }).ok()?;
        rx.await.ok().flatten()
    }

    /// Stops the coordinator. Outstanding lookups are abandoned.
    ///
    /// # Errors
    ///
    /// Returns [`ServiceStopped`] if the coordinator already stopped.
    pub fn quit(&self) -> Result<(), ServiceStopped> {
        self.tx.send(Command::Quit).map_err(|_| ServiceStopped)
    }
}

/// The coordinator.
///
/// # Type Parameters
///
/// - `S`: where interface listings come from
/// - `L`: the public lookup backend
/// - `D`: where snapshots are rendered
pub struct StatusService<S, L, D> {
    source: Arc<S>,
    resolver: Arc<PublicIpResolver<L>>,
    sink: D,
    board: StatusBoard,
    commands: mpsc::UnboundedReceiver<Command>,
    events_tx: mpsc::UnboundedSender<Event>,
    events_rx: mpsc::UnboundedReceiver<Event>,
    tasks: JoinSet<()>,
}

impl<S, L, D> StatusService<S, L, D>
where
    S: InterfaceSource + 'static,
    L: AddressLookup + 'static,
    D: DisplaySink,
{
    /// Creates the coordinator and its first handle.
    ///
    /// Nothing happens until [`run`](Self::run) is polled and a refresh
    /// is requested.
    #[must_use]
    pub fn new(source: S, resolver: PublicIpResolver<L>, sink: D) -> (Self, StatusHandle) {
        let (tx, commands) = mpsc::unbounded_channel();
        let (events_tx, events_rx) = mpsc::unbounded_channel();

        let service = Self {
            source: Arc::new(source),
            resolver: Arc::new(resolver),
            sink,
            board: StatusBoard::new(),
            commands,
            events_tx,
            events_rx,
            tasks: JoinSet::new(),
        };

        (service, StatusHandle { tx })
    }

    /// Processes commands and events until quit or until every handle is dropped.
    ///
    /// Background tasks still running at that point are aborted.
    pub async fn run(mut self) {
        loop {
            tokio::select! {
                biased;

                Some(event) = self.events_rx.recv() => self.handle_event(event),

                command = self.commands.recv() => match command {
                    Some(Command::Refresh) => self.start_cycle(),
                    Some(Command::Copy { index, reply }) => {
                        let _ = reply.send(self.board.copy(index));
                    }
                    Some(Command::Quit) => {
                        tracing::info!("Quit requested, stopping status service");
                        break;
                    }
                    None => {
                        tracing::debug!("All status handles dropped, stopping status service");
                        break;
                    }
                },

                Some(_) = self.tasks.join_next(), if !self.tasks.is_empty() => {}
            }
        }

        self.tasks.abort_all();
    }

    fn render(&mut self) {
        self.sink.render(MenuSnapshot::of(&self.board));
    }

    fn start_cycle(&mut self) {
        let cycle = self.board.begin_cycle();
        tracing::info!("Refreshing network status (cycle {cycle})");
        self.render();

        let source = Arc::clone(&self.source);
        let events = self.events_tx.clone();
        self.tasks.spawn(async move {
            let result = tokio::task::spawn_blocking(move || discover(source.as_ref()))
                .await
                .unwrap_or_else(|e| {
                    Err(DiscoveryError::Task {
                        message: e.to_string(),
                    })
                });
            let _ = events.send(Event::Discovered { cycle, result });
        });
    }

    fn handle_event(&mut self, event: Event) {
        match event {
            Event::Discovered { cycle, result } => self.on_discovered(cycle, result),
            Event::Resolved { cycle, result } => self.on_resolved(cycle, &result),
        }
    }

    fn on_discovered(
        &mut self,
        cycle: CycleId,
        result: Result<Vec<InterfaceAddress>, DiscoveryError>,
    ) {
        match &result {
            Ok(records) => tracing::info!("Discovered {} interface address(es)", records.len()),
            Err(e) => tracing::warn!("Interface discovery failed: {e}"),
        }

        match self.board.apply_discovery(cycle, result) {
            DiscoveryOutcome::Stale => {
                tracing::debug!("Dropping discovery result from stale cycle {cycle}");
            }
            DiscoveryOutcome::Settled => self.render(),
            DiscoveryOutcome::AwaitingPublic => {
                // Lookups start only after the interface rows are on screen.
                self.render();
                for family in AddressFamily::ALL {
                    self.spawn_lookup(cycle, family);
                }
            }
        }
    }

    fn spawn_lookup(&mut self, cycle: CycleId, family: AddressFamily) {
        let resolver = Arc::clone(&self.resolver);
        let events = self.events_tx.clone();
        self.tasks.spawn(async move {
            let result = resolver.resolve(family).await;
            let _ = events.send(Event::Resolved { cycle, result });
        });
    }

    fn on_resolved(&mut self, cycle: CycleId, result: &PublicAddressResult) {
        if self.board.apply_public(cycle, result) {
            if result.is_available() {
                tracing::debug!("Public {} address found (cycle {cycle})", result.family);
            } else {
                tracing::info!("Public {} address unavailable (cycle {cycle})", result.family);
            }
            if self.board.phase() == CyclePhase::Complete {
                tracing::info!("Refresh cycle {cycle} complete");
            }
            self.render();
        } else {
            tracing::debug!(
                "Dropping public {} result from stale cycle {cycle}",
                result.family
            );
        }
    }
}

#[cfg(test)]
#[path = "service_tests.rs"]
mod tests;
