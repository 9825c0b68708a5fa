//! Frame scheduling for the host loop.
//!
//! The loop asks for frames only while the simulation is running. Cancelling
//! drops the pending frame; cancelling twice is the same as cancelling once.

use std::time::{Duration, Instant};

#[derive(Debug, Clone)]
pub struct FrameClock {
    period: Duration,
    next_due: Option<Instant>,
}

impl FrameClock {
    pub fn new(period: Duration) -> Self {
        Self {
            period,
            next_due: None,
        }
    }

    /// Schedule the next frame one period from `now`, unless one is already pending.
    pub fn request(&mut self, now: Instant) {
        if self.next_due.is_none() {
            self.next_due = Some(now + self.period);
        }
    }

    pub fn cancel(&mut self) {
        self.next_due = None;
    }

    /// Keep a frame pending while the simulation runs, and none otherwise.
    pub fn follow(&mut self, running: bool, now: Instant) {
        if running {
            self.request(now);
        } else {
            self.cancel();
        }
    }

    pub fn is_scheduled(&self) -> bool {
        self.next_due.is_some()
    }

    /// Time left until the pending frame, zero if overdue, `None` if nothing is scheduled.
    pub fn time_until_due(&self, now: Instant) -> Option<Duration> {
        self.next_due
            .map(|due| due.checked_duration_since(now).unwrap_or(Duration::ZERO))
    }

    /// Consume the pending frame if it is due and schedule the following one.
    ///
    /// When the loop has fallen more than a period behind, the backlog is
    /// dropped rather than replayed as a burst of frames.
    pub fn take_due(&mut self, now: Instant) -> bool {
        match self.next_due {
            Some(due) if due <= now => {
                let next = due + self.period;
                self.next_due = Some(if next <= now { now + self.period } else { next });
                true
            }
            _ => false,
        }
    }
}
