//! Event definitions for the simulation kernel.
//!
//! An event pairs a timestamp with an `Action` — one of a closed set of
//! domain operations the production line knows how to dispatch. Keeping the
//! set closed (instead of boxing arbitrary closures) makes the queue
//! introspectable and the run order testable.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::types::{ProductType, SimTime, StageIndex};

/// A deferred domain operation, executed when simulated time reaches the
/// timestamp it was scheduled at.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Begin the next shift: set the shift-end deadline and feed the line.
    StartShift,
    /// The shift-end deadline for the given shift number has arrived.
    EndShift { shift: u32 },
    /// Offer a unit to a stage (intake or shift-start feed).
    AdmitUnit {
        stage: StageIndex,
        product: ProductType,
    },
    /// A broken-down stage has finished maintenance; re-attempt the same
    /// unit against the same shift-end deadline.
    RetryAfterBreakdown {
        stage: StageIndex,
        product: ProductType,
        deadline: SimTime,
    },
    /// A stage finishes its in-flight unit and hands it onward.
    CompleteStage {
        stage: StageIndex,
        product: ProductType,
    },
}

/// An `Action` queued for execution at a point in simulated time.
///
/// Ordering is by timestamp, earliest first, with ties broken by insertion
/// sequence so that same-time events execute in FIFO order. The comparison
/// is inverted because `BinaryHeap` is a max-heap.
#[derive(Clone, Debug)]
pub struct ScheduledEvent {
    pub time: SimTime,
    pub seq: u64,
    pub action: Action,
}

impl PartialEq for ScheduledEvent {
    fn eq(&self, other: &Self) -> bool {
        self.time == other.time && self.seq == other.seq
    }
}

impl Eq for ScheduledEvent {}

impl PartialOrd for ScheduledEvent {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for ScheduledEvent {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .time
            .total_cmp(&self.time)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::BinaryHeap;

    fn ev(time: SimTime, seq: u64) -> ScheduledEvent {
        ScheduledEvent {
            time,
            seq,
            action: Action::StartShift,
        }
    }

    #[test]
    fn test_earlier_time_pops_first() {
        let mut heap = BinaryHeap::new();
        heap.push(ev(5.0, 0));
        heap.push(ev(1.0, 1));
        heap.push(ev(3.0, 2));

        assert_eq!(heap.pop().unwrap().time, 1.0);
        assert_eq!(heap.pop().unwrap().time, 3.0);
        assert_eq!(heap.pop().unwrap().time, 5.0);
    }

    #[test]
    fn test_ties_pop_in_insertion_order() {
        let mut heap = BinaryHeap::new();
        heap.push(ev(2.0, 0));
        heap.push(ev(2.0, 1));
        heap.push(ev(2.0, 2));

        assert_eq!(heap.pop().unwrap().seq, 0);
        assert_eq!(heap.pop().unwrap().seq, 1);
        assert_eq!(heap.pop().unwrap().seq, 2);
    }

    #[test]
    fn test_fractional_times_order_correctly() {
        let mut heap = BinaryHeap::new();
        heap.push(ev(0.30000000000000004, 0));
        heap.push(ev(0.3, 1));

        assert_eq!(heap.pop().unwrap().seq, 1);
    }
}
