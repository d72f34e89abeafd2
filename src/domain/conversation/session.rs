//! Per-conversation dialog state kept between inbound messages.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{SessionId, StateMachine, Timestamp, TransitionError};
use crate::domain::visa::{DetailStep, UserInfo};

use super::phase::DialogPhase;

/// A detail collection suspended on a prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PendingDetails {
    /// Step whose answer the next message provides.
    pub step: DetailStep,
    /// Record filled so far.
    pub info: UserInfo,
}

/// What the next inbound message will be taken as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "step", rename_all = "snake_case")]
pub enum Awaiting {
    /// Any message starts the conversation.
    Start,
    /// A free-text request.
    Request,
    /// The answer to a detail prompt.
    Detail(DetailStep),
}

/// One ongoing exchange between a user and the bot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DialogSession {
    id: SessionId,
    phase: DialogPhase,
    pending: Option<PendingDetails>,
    turn_count: u32,
    created_at: Timestamp,
    updated_at: Timestamp,
}

impl DialogSession {
    /// Creates a fresh session in `Idle`.
    pub fn new(id: SessionId) -> Self {
        let now = Timestamp::now();
        Self {
            id,
            phase: DialogPhase::Idle,
            pending: None,
            turn_count: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn phase(&self) -> DialogPhase {
        self.phase
    }

    pub fn pending(&self) -> Option<&PendingDetails> {
        self.pending.as_ref()
    }

    /// Number of inbound messages processed.
    pub fn turn_count(&self) -> u32 {
        self.turn_count
    }

    pub fn created_at(&self) -> Timestamp {
        self.created_at
    }

    pub fn updated_at(&self) -> Timestamp {
        self.updated_at
    }

    pub fn awaiting(&self) -> Awaiting {
        match (&self.phase, &self.pending) {
            (DialogPhase::Idle, _) => Awaiting::Start,
            (DialogPhase::DetailCollection, Some(pending)) => Awaiting::Detail(pending.step),
            _ => Awaiting::Request,
        }
    }

    pub(crate) fn record_turn(&mut self) {
        self.turn_count = self.turn_count.saturating_add(1);
        self.updated_at = Timestamp::now();
    }

    pub(crate) fn transition(&mut self, to: DialogPhase) -> Result<(), TransitionError> {
        self.phase = self.phase.transition_to(to)?;
        self.updated_at = Timestamp::now();
        Ok(())
    }

    pub(crate) fn suspend(&mut self, step: DetailStep, info: UserInfo) {
        self.pending = Some(PendingDetails { step, info });
    }

    pub(crate) fn take_pending(&mut self) -> Option<PendingDetails> {
        self.pending.take()
    }
}
