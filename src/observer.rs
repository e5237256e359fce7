//! One-way notification sink for simulation progress.
//!
//! The core emits structured notifications at defined points; an observer
//! renders or records them. Nothing in the core depends on a response, so
//! reporting stays fully decoupled from the kernel. All methods default to
//! no-ops — implementors override only what they care about.

use crate::stats::RunStats;
use crate::types::{ProductType, SimTime};

/// Receiver for the simulation's progress notifications.
///
/// The kernel is single-threaded, so observers need no `Send` bound; tests
/// commonly share a recorder through `Rc<RefCell<_>>`.
pub trait Observer {
    /// A shift began.
    fn shift_started(&mut self, _shift: u32, _time: SimTime) {}

    /// A shift's end deadline arrived.
    fn shift_ended(&mut self, _shift: u32, _time: SimTime) {}

    /// A stage started working on a unit (also fired on each retry
    /// attempt after maintenance).
    fn stage_started(&mut self, _stage_name: &str, _product: ProductType, _time: SimTime) {}

    /// A stage broke down and entered maintenance.
    fn stage_breakdown(&mut self, _stage_name: &str, _time: SimTime) {}

    /// A stage finished its in-flight unit.
    fn stage_finished(&mut self, _stage_name: &str, _product: ProductType, _time: SimTime) {}

    /// A unit left the last stage and counts as completed.
    fn product_finished(&mut self, _product: ProductType, _time: SimTime) {}

    /// A unit was rejected (busy stage or shift-end cut-off) and is lost
    /// for the run.
    fn unit_dropped(&mut self, _stage_name: &str, _product: ProductType, _time: SimTime) {}

    /// The event queue drained; aggregate results are final.
    fn final_report(&mut self, _stats: &RunStats) {}
}

/// Discards every notification. Useful for benchmarks and tests that only
/// inspect [`RunStats`].
#[derive(Debug, Default)]
pub struct NullObserver;

impl Observer for NullObserver {}

/// Renders each notification as a `tracing` log line, mirroring the
/// progress output of the console front end.
#[derive(Debug, Default)]
pub struct TraceObserver;

impl Observer for TraceObserver {
    fn shift_started(&mut self, shift: u32, time: SimTime) {
        tracing::info!(shift, time = format_args!("{time:.2}"), "shift started");
    }

    fn shift_ended(&mut self, shift: u32, time: SimTime) {
        tracing::info!(shift, time = format_args!("{time:.2}"), "shift ended");
    }

    fn stage_started(&mut self, stage_name: &str, product: ProductType, time: SimTime) {
        tracing::info!(
            stage = stage_name,
            product = %product,
            time = format_args!("{time:.2}"),
            "started processing"
        );
    }

    fn stage_breakdown(&mut self, stage_name: &str, time: SimTime) {
        tracing::warn!(
            stage = stage_name,
            time = format_args!("{time:.2}"),
            "breakdown, maintenance required"
        );
    }

    fn stage_finished(&mut self, stage_name: &str, product: ProductType, time: SimTime) {
        tracing::info!(
            stage = stage_name,
            product = %product,
            time = format_args!("{time:.2}"),
            "finished processing"
        );
    }

    fn product_finished(&mut self, product: ProductType, time: SimTime) {
        tracing::info!(product = %product, time = format_args!("{time:.2}"), "product finished");
    }

    fn unit_dropped(&mut self, stage_name: &str, product: ProductType, time: SimTime) {
        tracing::warn!(
            stage = stage_name,
            product = %product,
            time = format_args!("{time:.2}"),
            "unit dropped"
        );
    }

    fn final_report(&mut self, stats: &RunStats) {
        tracing::info!(
            completed = stats.completed,
            dropped = stats.dropped,
            total_time = format_args!("{:.2}", stats.total_time),
            "simulation finished"
        );
    }
}
