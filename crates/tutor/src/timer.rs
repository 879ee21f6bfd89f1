use std::time::{Duration, Instant};

/// A delayed "move to the next question" request, polled from the UI loop.
///
/// Each schedule is tied to the question serial it was made for. A pending
/// advance whose serial no longer matches the live question is dropped
/// instead of firing.
#[derive(Debug, Clone)]
pub struct AutoAdvance {
    delay: Duration,
    pending: Option<PendingAdvance>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingAdvance {
    due: Instant,
    serial: u64,
}

impl AutoAdvance {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn delay(&self) -> Duration {
        self.delay
    }

    /// Takes effect from the next schedule; a pending advance keeps its deadline.
    pub fn set_delay(&mut self, delay: Duration) {
        self.delay = delay;
    }

    pub fn schedule(&mut self, now: Instant, serial: u64) {
        self.pending = Some(PendingAdvance {
            due: now + self.delay,
            serial,
        });
    }

    /// Returns true if something was pending.
    pub fn cancel(&mut self) -> bool {
        self.pending.take().is_some()
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }

    /// Time left before the pending advance fires, for repaint scheduling.
    pub fn remaining(&self, now: Instant) -> Option<Duration> {
        self.pending
            .map(|pending| pending.due.saturating_duration_since(now))
    }

    /// Consumes the pending advance if it is due for `serial`. Stale entries
    /// are discarded.
    pub fn take_due(&mut self, now: Instant, serial: u64) -> bool {
        match self.pending {
            Some(pending) if pending.serial != serial => {
                self.pending = None;
                false
            }
            Some(pending) if now >= pending.due => {
                self.pending = None;
                true
            }
            _ => false,
        }
    }
}
