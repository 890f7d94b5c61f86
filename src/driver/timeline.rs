//! One-shot timer queue on a single simulated clock
//!
//! Timers fire in due-time order; timers due at the same moment fire in the
//! order they were scheduled.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

/// Deferred work the driver knows how to run
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Timer {
    /// Run one simulation tick
    Tick,
    /// Serve a fresh ball after a lost round
    Setup,
    /// Remove a spark burst
    ExpireSparks(u32),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
struct Scheduled {
    due_ms: u64,
    seq: u64,
    timer: Timer,
}

#[derive(Debug, Default)]
pub struct Timeline {
    now_ms: u64,
    seq: u64,
    queue: BinaryHeap<Reverse<Scheduled>>,
}

impl Timeline {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current time in ms since the timeline started
    pub fn now_ms(&self) -> u64 {
        self.now_ms
    }

    /// Run `timer` once, `delay_ms` from now
    pub fn schedule(&mut self, delay_ms: u64, timer: Timer) {
        let scheduled = Scheduled {
            due_ms: self.now_ms + delay_ms,
            seq: self.seq,
            timer,
        };
        self.seq += 1;
        self.queue.push(Reverse(scheduled));
    }

    /// Due time of the next timer
    pub fn next_due(&self) -> Option<u64> {
        self.queue.peek().map(|Reverse(s)| s.due_ms)
    }

    /// Pop the next timer due at or before `until_ms`, advancing the clock
    pub fn pop_due(&mut self, until_ms: u64) -> Option<Timer> {
        if self.next_due()? > until_ms {
            return None;
        }
        let Reverse(scheduled) = self.queue.pop()?;
        self.now_ms = self.now_ms.max(scheduled.due_ms);
        Some(scheduled.timer)
    }

    /// Move the clock forward without firing anything
    pub fn advance_to(&mut self, ms: u64) {
        self.now_ms = self.now_ms.max(ms);
    }

    pub fn pending(&self) -> usize {
        self.queue.len()
    }

    /// Whether a timer of this kind is waiting
    pub fn is_pending(&self, timer: Timer) -> bool {
        self.queue.iter().any(|Reverse(s)| s.timer == timer)
    }
}
