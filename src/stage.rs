//! The machine model: a single-unit-capacity processing station.
//!
//! A stage accepts one unit at a time, takes a per-product processing plus
//! setup duration, and may break down with a configured probability, in
//! which case the same unit is re-attempted after a maintenance delay. A
//! unit whose processing would cross the shift-end deadline is rejected
//! outright; rejected units are lost for the run, never queued.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

use crate::config::StageConfig;
use crate::stats::StageStats;
use crate::types::{ProductType, SimTime};

/// The result of offering a unit to a stage.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum AcceptOutcome {
    /// The stage was busy, or processing would not finish before the
    /// shift-end deadline. The unit is dropped.
    Rejected,
    /// The stage broke down on this attempt; re-offer the same unit once
    /// maintenance completes at `retry_at`.
    Breakdown { retry_at: SimTime },
    /// Processing started; the unit completes at `complete_at`.
    Started { complete_at: SimTime },
}

/// A processing station with per-product durations and stochastic
/// breakdowns.
///
/// Each stage owns an independent seeded RNG so runs are reproducible and
/// stages are testable in isolation.
#[derive(Debug)]
pub struct Stage {
    name: String,
    processing_times: HashMap<ProductType, f64>,
    setup_times: HashMap<ProductType, f64>,
    breakdown_probability: f64,
    maintenance_time: f64,
    busy: bool,
    rng: SmallRng,
    units_started: u64,
    units_finished: u64,
    breakdowns: u64,
    units_dropped: u64,
}

impl Stage {
    /// Creates an idle stage with no durations, no breakdowns, and the
    /// given seed. Intended for tests and hand-built lines; production
    /// lines use [`Stage::from_config`].
    pub fn new(name: impl Into<String>, seed: u64) -> Self {
        Self {
            name: name.into(),
            processing_times: HashMap::new(),
            setup_times: HashMap::new(),
            breakdown_probability: 0.0,
            maintenance_time: 0.0,
            busy: false,
            rng: SmallRng::seed_from_u64(seed),
            units_started: 0,
            units_finished: 0,
            breakdowns: 0,
            units_dropped: 0,
        }
    }

    /// Builds a stage from its configuration and an explicit RNG seed.
    pub fn from_config(config: &StageConfig, seed: u64) -> Self {
        let mut stage = Stage::new(config.name.clone(), seed);
        stage.processing_times = config.processing_times.clone();
        stage.setup_times = config.setup_times.clone();
        stage.breakdown_probability = config.breakdown_probability;
        stage.maintenance_time = config.maintenance_time;
        stage
    }

    /// Sets the processing duration for a product type.
    pub fn with_processing_time(mut self, product: ProductType, time: f64) -> Self {
        self.processing_times.insert(product, time);
        self
    }

    /// Sets the setup duration for a product type.
    pub fn with_setup_time(mut self, product: ProductType, time: f64) -> Self {
        self.setup_times.insert(product, time);
        self
    }

    /// Sets the breakdown probability and the maintenance delay paid per
    /// breakdown.
    pub fn with_breakdowns(mut self, probability: f64, maintenance_time: f64) -> Self {
        self.breakdown_probability = probability;
        self.maintenance_time = maintenance_time;
        self
    }

    /// The stage's display name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// True iff the stage holds no in-flight unit.
    pub fn is_available(&self) -> bool {
        !self.busy
    }

    /// Offers `product` to the stage at time `now` under the shift-end
    /// `deadline`.
    ///
    /// The attempt is rejected if the stage is busy or if processing alone
    /// would overrun the deadline. Otherwise the stage becomes busy and
    /// rolls for breakdown: on a breakdown the unit stays with the stage
    /// and is re-attempted after the maintenance delay; on success the
    /// unit completes after processing plus setup.
    ///
    /// A retried attempt re-enters this same decision logic, so repeated
    /// breakdowns are possible and a retried unit can still be rejected
    /// once the deadline closes in.
    pub fn accept(&mut self, now: SimTime, product: ProductType, deadline: SimTime) -> AcceptOutcome {
        let processing = self.processing_times.get(&product).copied().unwrap_or(0.0);
        if self.busy || now + processing > deadline {
            self.units_dropped += 1;
            return AcceptOutcome::Rejected;
        }

        self.busy = true;
        self.units_started += 1;

        if self.rng.gen::<f64>() < self.breakdown_probability {
            self.breakdowns += 1;
            return AcceptOutcome::Breakdown {
                retry_at: now + self.maintenance_time,
            };
        }

        let setup = self.setup_times.get(&product).copied().unwrap_or(0.0);
        AcceptOutcome::Started {
            complete_at: now + processing + setup,
        }
    }

    /// Maintenance after a breakdown has finished; the stage is free to
    /// re-attempt the unit it was holding.
    pub fn finish_maintenance(&mut self) {
        self.busy = false;
    }

    /// The in-flight unit finished processing; the stage returns to idle.
    pub fn complete(&mut self) {
        self.busy = false;
        self.units_finished += 1;
    }

    /// Snapshot of this stage's counters.
    pub fn stats(&self) -> StageStats {
        StageStats {
            name: self.name.clone(),
            units_started: self.units_started,
            units_finished: self.units_finished,
            breakdowns: self.breakdowns,
            units_dropped: self.units_dropped,
        }
    }
}
