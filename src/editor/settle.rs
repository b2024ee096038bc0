// SPDX-License-Identifier: MPL-2.0
//! Deferred settle sequence run after a drag ends.
//!
//! The sequence has two stages: reveal the dimming effect, then finalize the
//! zoom/offset snap. At most one sequence is outstanding. Each schedule bumps
//! a generation counter and every tick carries the generation it was issued
//! for, so ticks from a cancelled or superseded sequence are dropped.
//!
//! [`SettleTask`] is the synchronous bookkeeping owned by the session.
//! [`run_settle`] is the timer side and can be spawned on any tokio runtime.

use std::time::Duration;
use tokio::sync::mpsc::UnboundedSender;

use crate::config::{SETTLE_FINALIZE_DELAY_MS, SETTLE_REVEAL_DELAY_MS};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleDelays {
    /// Wait after the drag ends before revealing the dimming effect.
    pub reveal: Duration,
    /// Further wait before finalizing.
    pub finalize: Duration,
}

impl Default for SettleDelays {
    fn default() -> Self {
        Self {
            reveal: Duration::from_millis(SETTLE_REVEAL_DELAY_MS),
            finalize: Duration::from_millis(SETTLE_FINALIZE_DELAY_MS),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleStage {
    RevealDimming,
    Finalize,
}

/// Handle for one scheduled sequence.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTicket {
    generation: u64,
}

impl SettleTicket {
    #[must_use]
    pub fn generation(&self) -> u64 {
        self.generation
    }

    #[must_use]
    pub fn tick(&self, stage: SettleStage) -> SettleTick {
        SettleTick {
            generation: self.generation,
            stage,
        }
    }
}

/// Timer event delivered back to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SettleTick {
    pub generation: u64,
    pub stage: SettleStage,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum SettleState {
    #[default]
    Idle,
    Pending,
    /// A pending sequence was interrupted by scrolling and resumes when it ends.
    SuspendedByScroll,
}

#[derive(Debug, Default)]
pub struct SettleTask {
    generation: u64,
    state: SettleState,
}

impl SettleTask {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new sequence, superseding any outstanding one.
    pub fn schedule(&mut self) -> SettleTicket {
        self.generation = self.generation.wrapping_add(1);
        self.state = SettleState::Pending;
        tracing::debug!(generation = self.generation, "settle scheduled");
        SettleTicket {
            generation: self.generation,
        }
    }

    /// Drops the outstanding sequence, if any.
    pub fn cancel(&mut self) {
        if self.state != SettleState::Idle {
            tracing::debug!(generation = self.generation, "settle cancelled");
        }
        self.generation = self.generation.wrapping_add(1);
        self.state = SettleState::Idle;
    }

    /// Suspends a pending sequence until [`SettleTask::scroll_ended`].
    pub fn scroll_began(&mut self) {
        if self.state == SettleState::Pending {
            self.generation = self.generation.wrapping_add(1);
            self.state = SettleState::SuspendedByScroll;
            tracing::debug!(generation = self.generation, "settle suspended by scroll");
        }
    }

    /// Reschedules a sequence that scrolling interrupted.
    pub fn scroll_ended(&mut self) -> Option<SettleTicket> {
        (self.state == SettleState::SuspendedByScroll).then(|| self.schedule())
    }

    #[must_use]
    pub fn is_pending(&self) -> bool {
        self.state == SettleState::Pending
    }

    #[must_use]
    pub fn is_suspended(&self) -> bool {
        self.state == SettleState::SuspendedByScroll
    }

    /// Checks a timer tick against the current generation. A finalize tick
    /// completes the sequence.
    pub fn accept(&mut self, tick: SettleTick) -> bool {
        if self.state != SettleState::Pending || tick.generation != self.generation {
            tracing::debug!(
                tick = tick.generation,
                current = self.generation,
                "stale settle tick ignored"
            );
            return false;
        }
        if tick.stage == SettleStage::Finalize {
            self.state = SettleState::Idle;
        }
        true
    }
}

/// Sleeps through both stages, sending a tick after each.
///
/// Returns early if the receiver is gone.
pub async fn run_settle(
    ticket: SettleTicket,
    delays: SettleDelays,
    sender: UnboundedSender<SettleTick>,
) {
    tokio::time::sleep(delays.reveal).await;
    if sender.send(ticket.tick(SettleStage::RevealDimming)).is_err() {
        return;
    }
    tokio::time::sleep(delays.finalize).await;
    let _ = sender.send(ticket.tick(SettleStage::Finalize));
}
