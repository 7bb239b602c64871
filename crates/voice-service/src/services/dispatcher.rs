//! Presence dispatcher
//!
//! A tokio actor that exclusively owns the [`PresenceTracker`]. Every transition and every
//! query is a [`Command`] on one bounded channel, so they are applied in arrival order and
//! no lock guards tracker state. Records emitted by a transition are appended to the store
//! before the next command is handled.

use std::sync::Arc;

use chrono::Utc;
use thiserror::Error;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};
use voice_core::{
    ActiveSession, Period, PresenceKey, SessionRecord, SessionRepository, Snowflake,
    VoiceOccupant, VoiceStateUpdate,
};

use super::query::{DebugSnapshot, QueryEngine, TotalOutcome};
use super::tracker::{PresenceTracker, TransitionOutcome};

/// The dispatcher is no longer accepting commands
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DispatcherError {
    #[error("presence dispatcher is not running")]
    Closed,
}

impl<T> From<mpsc::error::SendError<T>> for DispatcherError {
    fn from(_: mpsc::error::SendError<T>) -> Self {
        Self::Closed
    }
}

impl From<oneshot::error::RecvError> for DispatcherError {
    fn from(_: oneshot::error::RecvError) -> Self {
        Self::Closed
    }
}

enum Command {
    Transition {
        update: VoiceStateUpdate,
        ack: Option<oneshot::Sender<TransitionOutcome>>,
    },
    Reconcile {
        occupants: Vec<VoiceOccupant>,
        reply: oneshot::Sender<usize>,
    },
    ActiveSession {
        key: PresenceKey,
        reply: oneshot::Sender<Option<ActiveSession>>,
    },
    ActiveCount {
        reply: oneshot::Sender<usize>,
    },
    ComputeTotal {
        key: PresenceKey,
        period: Period,
        channel_id: Option<Snowflake>,
        reply: oneshot::Sender<TotalOutcome>,
    },
    StoredTotal {
        key: PresenceKey,
        channel_id: Option<Snowflake>,
        since: i64,
        reply: oneshot::Sender<i64>,
    },
    Debug {
        key: PresenceKey,
        reply: oneshot::Sender<DebugSnapshot>,
    },
    Shutdown,
}

/// Cloneable handle for sending commands to the dispatcher
#[derive(Debug, Clone)]
pub struct PresenceHandle {
    sender: mpsc::Sender<Command>,
}

impl PresenceHandle {
    /// Enqueue a voice-state update without waiting for it to be applied
    pub async fn submit(&self, update: VoiceStateUpdate) -> Result<(), DispatcherError> {
        self.sender
            .send(Command::Transition { update, ack: None })
            .await?;
        Ok(())
    }

    /// Apply a voice-state update and wait for its outcome (record persisted or dropped)
    pub async fn apply(&self, update: VoiceStateUpdate) -> Result<TransitionOutcome, DispatcherError> {
        self.request(|reply| Command::Transition {
            update,
            ack: Some(reply),
        })
        .await
    }

    /// Start tracking members already in voice; returns how many were newly tracked
    pub async fn reconcile(&self, occupants: Vec<VoiceOccupant>) -> Result<usize, DispatcherError> {
        self.request(|reply| Command::Reconcile { occupants, reply })
            .await
    }

    /// Live session of a member
    pub async fn get_active_session(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<Option<ActiveSession>, DispatcherError> {
        let key = PresenceKey::new(guild_id, user_id);
        self.request(|reply| Command::ActiveSession { key, reply })
            .await
    }

    /// Number of live sessions
    pub async fn active_count(&self) -> Result<usize, DispatcherError> {
        self.request(|reply| Command::ActiveCount { reply }).await
    }

    /// Total for a period
    pub async fn compute_total(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
        period: Period,
        channel_id: Option<Snowflake>,
    ) -> Result<TotalOutcome, DispatcherError> {
        let key = PresenceKey::new(guild_id, user_id);
        self.request(|reply| Command::ComputeTotal {
            key,
            period,
            channel_id,
            reply,
        })
        .await
    }

    /// Stored seconds since `since` (unix milliseconds)
    pub async fn get_total(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
        since: i64,
    ) -> Result<i64, DispatcherError> {
        self.stored_total(PresenceKey::new(guild_id, user_id), None, since)
            .await
    }

    /// Stored seconds in one channel since `since` (unix milliseconds)
    pub async fn get_total_by_channel(
        &self,
        user_id: Snowflake,
        guild_id: Snowflake,
        channel_id: Snowflake,
        since: i64,
    ) -> Result<i64, DispatcherError> {
        self.stored_total(PresenceKey::new(guild_id, user_id), Some(channel_id), since)
            .await
    }

    /// Diagnostic view of a member
    pub async fn debug_snapshot(
        &self,
        guild_id: Snowflake,
        user_id: Snowflake,
    ) -> Result<DebugSnapshot, DispatcherError> {
        let key = PresenceKey::new(guild_id, user_id);
        self.request(|reply| Command::Debug { key, reply }).await
    }

    /// Ask the dispatcher to stop once the commands already queued are handled
    pub async fn shutdown(&self) -> Result<(), DispatcherError> {
        self.sender.send(Command::Shutdown).await?;
        Ok(())
    }

    /// Whether the dispatcher has stopped
    pub fn is_closed(&self) -> bool {
        self.sender.is_closed()
    }

    async fn stored_total(
        &self,
        key: PresenceKey,
        channel_id: Option<Snowflake>,
        since: i64,
    ) -> Result<i64, DispatcherError> {
        self.request(|reply| Command::StoredTotal {
            key,
            channel_id,
            since,
            reply,
        })
        .await
    }

    async fn request<T>(
        &self,
        command: impl FnOnce(oneshot::Sender<T>) -> Command,
    ) -> Result<T, DispatcherError> {
        let (reply, response) = oneshot::channel();
        self.sender.send(command(reply)).await?;
        Ok(response.await?)
    }
}

/// Single-writer actor owning the presence state
pub struct PresenceDispatcher {
    tracker: PresenceTracker,
    store: Arc<dyn SessionRepository>,
    queries: QueryEngine,
    receiver: mpsc::Receiver<Command>,
}

impl PresenceDispatcher {
    /// Create a dispatcher whose tracker started at `started_at` (unix milliseconds).
    ///
    /// `buffer` bounds the number of queued commands; senders wait when it is full.
    pub fn new(
        store: Arc<dyn SessionRepository>,
        buffer: usize,
        started_at: i64,
    ) -> (Self, PresenceHandle) {
        let (sender, receiver) = mpsc::channel(buffer.max(1));
        let dispatcher = Self {
            tracker: PresenceTracker::new(started_at),
            queries: QueryEngine::new(Arc::clone(&store)),
            store,
            receiver,
        };

        (dispatcher, PresenceHandle { sender })
    }

    /// Start a dispatcher on the tokio runtime, tracking from now
    pub fn spawn(
        store: Arc<dyn SessionRepository>,
        buffer: usize,
    ) -> (PresenceHandle, JoinHandle<PresenceTracker>) {
        let (dispatcher, handle) = Self::new(store, buffer, Utc::now().timestamp_millis());
        (handle, tokio::spawn(dispatcher.run()))
    }

    /// Handle commands until every handle is dropped or shutdown is requested.
    ///
    /// Returns the final tracker state.
    pub async fn run(mut self) -> PresenceTracker {
        info!(started_at = self.tracker.started_at(), "Presence dispatcher started");

        while let Some(command) = self.receiver.recv().await {
            if let Command::Shutdown = command {
                // Stop accepting, then drain what is already queued
                self.receiver.close();
                continue;
            }
            self.handle(command).await;
        }

        info!(
            active_sessions = self.tracker.active_count(),
            "Presence dispatcher stopped"
        );
        self.tracker
    }

    async fn handle(&mut self, command: Command) {
        match command {
            Command::Transition { update, ack } => {
                let outcome = self.tracker.apply(&update);
                if let Some(record) = &outcome.record {
                    self.persist(record).await;
                }
                if let Some(ack) = ack {
                    let _ = ack.send(outcome);
                }
            }
            Command::Reconcile { occupants, reply } => {
                let _ = reply.send(self.tracker.reconcile(&occupants));
            }
            Command::ActiveSession { key, reply } => {
                let _ = reply.send(self.tracker.active_session(key));
            }
            Command::ActiveCount { reply } => {
                let _ = reply.send(self.tracker.active_count());
            }
            Command::ComputeTotal {
                key,
                period,
                channel_id,
                reply,
            } => {
                let outcome = self
                    .queries
                    .compute_total(&self.tracker, key, period, channel_id)
                    .await;
                let _ = reply.send(outcome);
            }
            Command::StoredTotal {
                key,
                channel_id,
                since,
                reply,
            } => {
                let seconds = match channel_id {
                    Some(channel_id) => {
                        self.queries
                            .get_total_by_channel(key.user_id, key.guild_id, channel_id, since)
                            .await
                    }
                    None => self.queries.get_total(key.user_id, key.guild_id, since).await,
                };
                let _ = reply.send(seconds);
            }
            Command::Debug { key, reply } => {
                let snapshot = self
                    .queries
                    .debug_snapshot(&self.tracker, key, Utc::now().timestamp_millis())
                    .await;
                let _ = reply.send(snapshot);
            }
            Command::Shutdown => {}
        }
    }

    async fn persist(&self, record: &SessionRecord) {
        match self.store.append(record).await {
            Ok(()) => debug!(
                key = %record.key(),
                duration_ms = record.duration_ms(),
                "Voice session recorded"
            ),
            Err(e) => error!(
                key = %record.key(),
                channel_id = ?record.channel_id,
                started_at = record.started_at,
                ended_at = record.ended_at,
                error = %e,
                "Failed to persist voice session, record dropped"
            ),
        }
    }
}
