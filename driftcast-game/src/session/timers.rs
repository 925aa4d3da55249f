//! Scheduler port and timer tokens.
//!
//! Timers drive the wait period and the free-running special-fish window.
//! The host owns the actual clock: the session asks its scheduler for a
//! callback after a delay and receives the token back via
//! `FishingSession::handle_timer`. Tokens carry a generation counter; the
//! session discards any token whose generation no longer matches, which is
//! how cancellation works (generation bump, never callback surgery).

use std::time::Duration;

/// What a scheduled timer means when it fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimerKind {
    /// The bite wait period elapsed; resolve the catch.
    WaitElapsed,
    /// Open the next special-fish window.
    SpecialWindowOpen,
    /// Close the currently open special-fish window.
    SpecialWindowClose,
}

/// Opaque token handed back to the session when a timer fires.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerToken {
    pub kind: TimerKind,
    /// Generation at schedule time; stale generations are ignored.
    pub generation: u64,
}

/// A request for a single callback after a delay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimerRequest {
    pub token: TimerToken,
    pub delay: Duration,
}

/// Host-provided single-shot timer capability.
pub trait Scheduler {
    /// Arrange for `request.token` to be delivered back to the session after
    /// `request.delay`. Single-threaded cooperative dispatch is assumed:
    /// callbacks never interleave with actions.
    fn schedule(&mut self, request: TimerRequest);
}

/// A scheduler that queues requests for the host loop (or a test) to drain
/// and dispatch.
#[derive(Debug, Clone, Default)]
pub struct QueueScheduler {
    pending: Vec<TimerRequest>,
}

impl QueueScheduler {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Requests scheduled since the last drain, oldest first.
    #[must_use]
    pub fn pending(&self) -> &[TimerRequest] {
        &self.pending
    }

    /// Take all pending requests, leaving the queue empty.
    pub fn drain(&mut self) -> Vec<TimerRequest> {
        std::mem::take(&mut self.pending)
    }
}

impl Scheduler for QueueScheduler {
    fn schedule(&mut self, request: TimerRequest) {
        self.pending.push(request);
    }
}
