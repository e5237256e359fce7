//! The event queue and simulation clock.
//!
//! The scheduler is the entire control-flow driver of the simulation: it
//! holds every not-yet-executed event in a min-heap and advances the clock
//! to each popped event's timestamp. Nothing else in the crate keeps time.

use std::collections::BinaryHeap;

use crate::event::{Action, ScheduledEvent};
use crate::types::SimTime;

/// Min-heap event queue with a monotonically non-decreasing clock.
///
/// Same-timestamp events execute in insertion (FIFO) order, so a run over a
/// fixed configuration is fully deterministic.
#[derive(Debug, Default)]
pub struct Scheduler {
    queue: BinaryHeap<ScheduledEvent>,
    clock: SimTime,
    seq: u64,
    events_executed: u64,
    peak_queue_len: usize,
}

impl Scheduler {
    /// Creates an empty scheduler with the clock at 0.0.
    pub fn new() -> Self {
        Self::default()
    }

    /// Schedules `action` to execute at simulated time `time`.
    ///
    /// # Panics
    ///
    /// Panics if `time` is earlier than the current clock. Scheduling into
    /// the past is a causality bug in the caller, not a recoverable
    /// condition.
    pub fn schedule(&mut self, time: SimTime, action: Action) {
        assert!(
            time >= self.clock,
            "scheduled event at t={time} before current time t={}",
            self.clock
        );
        tracing::trace!(time, ?action, "schedule");

        self.queue.push(ScheduledEvent {
            time,
            seq: self.seq,
            action,
        });
        self.seq += 1;
        self.peak_queue_len = self.peak_queue_len.max(self.queue.len());
    }

    /// Removes the earliest pending event, advances the clock to its
    /// timestamp, and returns it. Returns `None` when the queue is empty,
    /// which terminates the run.
    pub fn pop(&mut self) -> Option<ScheduledEvent> {
        let event = self.queue.pop()?;
        self.clock = event.time;
        self.events_executed += 1;
        Some(event)
    }

    /// The current simulated time. Non-decreasing across a run.
    pub fn current_time(&self) -> SimTime {
        self.clock
    }

    /// Number of events still pending.
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when no events remain.
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Total events popped and executed so far.
    pub fn events_executed(&self) -> u64 {
        self.events_executed
    }

    /// Largest queue length observed while scheduling.
    pub fn peak_queue_len(&self) -> usize {
        self.peak_queue_len
    }
}
