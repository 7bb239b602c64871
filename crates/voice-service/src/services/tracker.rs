//! Presence tracker
//!
//! Holds the currently active voice sessions, keyed by (guild, user), and turns
//! voice-state transitions into completed [`SessionRecord`]s. The tracker never touches
//! the store: persisting emitted records is the caller's job.

use std::collections::HashMap;

use tracing::{debug, info, warn};
use voice_core::{
    is_valid_timestamp, ActiveSession, PresenceKey, SessionRecord, TrackingStateError,
    Transition, VoiceOccupant, VoiceStateUpdate,
};

/// Result of applying one transition to one key
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TransitionOutcome {
    /// Session held for the key after the transition
    pub session: Option<ActiveSession>,
    /// Completed interval to persist, if the transition closed a session
    pub record: Option<SessionRecord>,
    /// Unexpected state the transition ran into (logged, never propagated)
    pub fault: Option<TrackingStateError>,
}

impl TransitionOutcome {
    fn keep(session: Option<ActiveSession>) -> Self {
        Self {
            session,
            ..Default::default()
        }
    }

    fn with_fault(mut self, fault: TrackingStateError) -> Self {
        self.fault = Some(fault);
        self
    }
}

/// Compute the next state of one key.
///
/// `current` is the session held for `key` before the transition. Pure: the caller
/// installs `outcome.session` and persists `outcome.record`. A state change stamped
/// outside the accepted time range leaves `current` untouched.
pub fn transition(
    key: PresenceKey,
    current: Option<ActiveSession>,
    change: Transition,
    now: i64,
) -> TransitionOutcome {
    if change != Transition::NoOp && !is_valid_timestamp(now) {
        return TransitionOutcome::keep(current)
            .with_fault(TrackingStateError::TimestampOutOfRange { key, timestamp: now });
    }

    match (change, current) {
        (Transition::NoOp, current) => TransitionOutcome::keep(current),

        (Transition::Join { channel_id }, None) => {
            TransitionOutcome::keep(Some(ActiveSession::new(channel_id, now)))
        }
        (Transition::Join { channel_id }, Some(active)) => TransitionOutcome::keep(Some(active))
            .with_fault(TrackingStateError::AlreadyTracked {
                key,
                channel_id,
                active_channel_id: active.channel_id,
            }),

        (Transition::Leave { channel_id }, None) => TransitionOutcome::keep(None)
            .with_fault(TrackingStateError::LeaveWithoutSession { key, channel_id }),
        (Transition::Leave { .. }, Some(active)) => close(key, active, now, None),

        (Transition::Move { to, .. }, None) => {
            TransitionOutcome::keep(Some(ActiveSession::new(to, now)))
                .with_fault(TrackingStateError::MoveWithoutSession { key, channel_id: to })
        }
        (Transition::Move { to, .. }, Some(active)) => {
            close(key, active, now, Some(ActiveSession::new(to, now)))
        }
    }
}

/// Close `active` at `now`, leaving `next` in its place
fn close(
    key: PresenceKey,
    active: ActiveSession,
    now: i64,
    next: Option<ActiveSession>,
) -> TransitionOutcome {
    match SessionRecord::close(key, &active, now) {
        Some(record) => TransitionOutcome {
            session: next,
            record: Some(record),
            fault: None,
        },
        None => TransitionOutcome::keep(next).with_fault(TrackingStateError::EmptyInterval {
            key,
            started_at: active.started_at,
            ended_at: now,
        }),
    }
}

/// In-memory presence state
///
/// At most one [`ActiveSession`] exists per [`PresenceKey`].
#[derive(Debug)]
pub struct PresenceTracker {
    sessions: HashMap<PresenceKey, ActiveSession>,
    started_at: i64,
}

impl PresenceTracker {
    /// Create an empty tracker that started at `started_at` (unix milliseconds)
    pub fn new(started_at: i64) -> Self {
        Self {
            sessions: HashMap::new(),
            started_at,
        }
    }

    /// When tracking started; used as the join time of reconciled occupants
    pub fn started_at(&self) -> i64 {
        self.started_at
    }

    /// Apply one voice-state update.
    ///
    /// Faults are logged at WARN and returned in the outcome; the state of other keys is
    /// never touched.
    pub fn apply(&mut self, update: &VoiceStateUpdate) -> TransitionOutcome {
        let key = update.key();
        let change = update.transition();
        let outcome = transition(key, self.sessions.get(&key).copied(), change, update.timestamp);

        match outcome.session {
            Some(session) => {
                self.sessions.insert(key, session);
            }
            None => {
                self.sessions.remove(&key);
            }
        }

        if let Some(fault) = &outcome.fault {
            warn!(key = %key, error = %fault, "Ignoring unexpected voice-state transition");
        } else if change != Transition::NoOp {
            debug!(key = %key, transition = ?change, timestamp = update.timestamp, "Voice state applied");
        }

        outcome
    }

    /// Start tracking members already sitting in voice channels.
    ///
    /// Every occupant not yet tracked gets a session starting at [`Self::started_at`].
    /// Returns the number of sessions created. No records are produced.
    pub fn reconcile(&mut self, occupants: &[VoiceOccupant]) -> usize {
        let mut tracked = 0;

        for occupant in occupants {
            let key = occupant.key();
            let change = Transition::Join {
                channel_id: occupant.channel_id,
            };

            match transition(key, self.sessions.get(&key).copied(), change, self.started_at) {
                TransitionOutcome {
                    fault: Some(fault), ..
                } => {
                    warn!(key = %key, error = %fault, "Skipping already tracked occupant");
                }
                TransitionOutcome {
                    session: Some(session),
                    ..
                } => {
                    self.sessions.insert(key, session);
                    tracked += 1;
                }
                TransitionOutcome { session: None, .. } => {}
            }
        }

        info!(
            occupants = occupants.len(),
            tracked,
            started_at = self.started_at,
            "Reconciled existing voice occupants"
        );

        tracked
    }

    /// Live session of a key
    pub fn active_session(&self, key: PresenceKey) -> Option<ActiveSession> {
        self.sessions.get(&key).copied()
    }

    /// Whether a key currently has a live session
    pub fn is_tracked(&self, key: PresenceKey) -> bool {
        self.sessions.contains_key(&key)
    }

    /// Number of live sessions
    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}
