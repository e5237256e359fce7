//! Production line orchestration.
//!
//! The `ProductionLine` owns the pipeline of stages, the backlog of pending
//! units, the shift bookkeeping, and the scheduler. Its `run` loop is the
//! only control flow in the simulation: it pops events in causal order and
//! dispatches each `Action` to the matching handler.
//!
//! Units flow front-to-back with implicit backpressure: a new unit enters
//! the first stage only when one leaves the last stage (or at shift start),
//! so there are never more units in flight than there are stages. A stage
//! that completes hands its unit to the next stage's accept immediately,
//! within the same event; only maintenance retries, completions, and shift
//! boundaries go through the queue.

use std::collections::VecDeque;

use crate::config::SimConfig;
use crate::event::Action;
use crate::observer::Observer;
use crate::scheduler::Scheduler;
use crate::stage::{AcceptOutcome, Stage};
use crate::stats::RunStats;
use crate::types::{ProductType, SimTime, StageIndex};

/// A multi-stage manufacturing line driven by discrete events.
pub struct ProductionLine {
    stages: Vec<Stage>,
    backlog: VecDeque<ProductType>,
    shift_duration: f64,
    shift_count: u32,
    current_shift: u32,
    shift_end_time: SimTime,
    scheduler: Scheduler,
    observer: Box<dyn Observer>,
    completed: u64,
    admitted: u64,
}

impl ProductionLine {
    /// Builds a line from a validated configuration.
    ///
    /// Stage `i` receives seed `config.seed + i`, so every stage draws
    /// from an independent, reproducible random source.
    pub fn new(config: &SimConfig, observer: Box<dyn Observer>) -> Self {
        let stages = config
            .stages
            .iter()
            .enumerate()
            .map(|(i, stage_config)| Stage::from_config(stage_config, config.seed + i as u64))
            .collect();

        Self {
            stages,
            backlog: config.build_backlog(),
            shift_duration: config.shift.duration_hours as f64,
            shift_count: config.shift.count,
            current_shift: 0,
            shift_end_time: 0.0,
            scheduler: Scheduler::new(),
            observer,
            completed: 0,
            admitted: 0,
        }
    }

    /// Replaces the configured backlog with an explicit sequence of units.
    pub fn with_backlog(mut self, backlog: impl Into<VecDeque<ProductType>>) -> Self {
        self.backlog = backlog.into();
        self
    }

    /// Runs the simulation to completion.
    ///
    /// Schedules the first shift at t = 0.0, then drains the event queue.
    /// The run terminates once the final shift has ended and no retries or
    /// in-flight completions remain. Returns the aggregate statistics
    /// after emitting `final_report` to the observer.
    pub fn run(&mut self) -> RunStats {
        self.scheduler.schedule(0.0, Action::StartShift);
        while let Some(event) = self.scheduler.pop() {
            self.dispatch(event.action);
        }

        let stats = self.collect_stats();
        self.observer.final_report(&stats);
        stats
    }

    /// Current simulated time.
    pub fn current_time(&self) -> SimTime {
        self.scheduler.current_time()
    }

    /// Units that have left the last stage so far.
    pub fn completed(&self) -> u64 {
        self.completed
    }

    /// The shift currently running (0 before the first shift starts).
    pub fn current_shift(&self) -> u32 {
        self.current_shift
    }

    /// Units still waiting in the backlog.
    pub fn backlog_len(&self) -> usize {
        self.backlog.len()
    }

    fn dispatch(&mut self, action: Action) {
        match action {
            Action::StartShift => self.start_shift(),
            Action::EndShift { shift } => self.end_shift(shift),
            Action::AdmitUnit { stage, product } => self.admit(stage, product),
            Action::RetryAfterBreakdown {
                stage,
                product,
                deadline,
            } => {
                self.stages[stage].finish_maintenance();
                self.try_accept(stage, product, deadline);
            }
            Action::CompleteStage { stage, product } => self.complete_stage(stage, product),
        }
    }

    fn start_shift(&mut self) {
        let now = self.scheduler.current_time();
        self.current_shift += 1;
        self.shift_end_time = now + self.shift_duration;

        tracing::debug!(
            shift = self.current_shift,
            end = self.shift_end_time,
            "starting shift"
        );
        self.observer.shift_started(self.current_shift, now);
        self.scheduler.schedule(
            self.shift_end_time,
            Action::EndShift {
                shift: self.current_shift,
            },
        );
        self.start_production();
    }

    fn end_shift(&mut self, shift: u32) {
        let now = self.scheduler.current_time();
        self.observer.shift_ended(shift, now);

        if self.current_shift < self.shift_count {
            // The next shift begins back-to-back, at the current time.
            self.scheduler.schedule(now, Action::StartShift);
        }
        // Otherwise the queue simply drains: pending retries and in-flight
        // completions still fire, then the run loop ends.
    }

    /// Pulls the next backlog unit (if any) and offers it to the first
    /// stage.
    fn start_production(&mut self) {
        if let Some(product) = self.backlog.pop_front() {
            let now = self.scheduler.current_time();
            self.scheduler.schedule(now, Action::AdmitUnit { stage: 0, product });
        }
    }

    fn admit(&mut self, stage: StageIndex, product: ProductType) {
        let accepted = self.try_accept(stage, product, self.shift_end_time);
        if accepted && stage == 0 {
            self.admitted += 1;
        }
    }

    /// Runs one accept decision on `stage` and schedules its consequence.
    /// Returns true unless the unit was rejected.
    fn try_accept(&mut self, stage: StageIndex, product: ProductType, deadline: SimTime) -> bool {
        let now = self.scheduler.current_time();
        let outcome = self.stages[stage].accept(now, product, deadline);
        let name = self.stages[stage].name();

        match outcome {
            AcceptOutcome::Rejected => {
                tracing::debug!(stage = name, product = %product, time = now, "unit dropped");
                self.observer.unit_dropped(name, product, now);
                false
            }
            AcceptOutcome::Breakdown { retry_at } => {
                self.observer.stage_started(name, product, now);
                self.observer.stage_breakdown(name, now);
                self.scheduler.schedule(
                    retry_at,
                    Action::RetryAfterBreakdown {
                        stage,
                        product,
                        deadline,
                    },
                );
                true
            }
            AcceptOutcome::Started { complete_at } => {
                self.observer.stage_started(name, product, now);
                self.scheduler
                    .schedule(complete_at, Action::CompleteStage { stage, product });
                true
            }
        }
    }

    fn complete_stage(&mut self, stage: StageIndex, product: ProductType) {
        let now = self.scheduler.current_time();
        self.stages[stage].complete();
        self.observer
            .stage_finished(self.stages[stage].name(), product, now);

        if stage + 1 < self.stages.len() {
            // Hand the unit straight into the next stage's accept. If that
            // stage is busy or the shift is closing, the unit is lost.
            self.try_accept(stage + 1, product, self.shift_end_time);
        } else {
            self.finish(product);
        }
    }

    fn finish(&mut self, product: ProductType) {
        let now = self.scheduler.current_time();
        self.completed += 1;
        self.observer.product_finished(product, now);

        // Egress-triggered intake: a new unit enters the front only when
        // one exits the back, and only while the shift is still open.
        if now < self.shift_end_time {
            self.start_production();
        }
    }

    fn collect_stats(&self) -> RunStats {
        let stages: Vec<_> = self.stages.iter().map(|s| s.stats()).collect();
        RunStats {
            completed: self.completed,
            admitted: self.admitted,
            dropped: stages.iter().map(|s| s.units_dropped).sum(),
            shifts_run: self.current_shift,
            total_time: self.scheduler.current_time(),
            events_executed: self.scheduler.events_executed(),
            peak_queue_len: self.scheduler.peak_queue_len(),
            stages,
        }
    }
}
