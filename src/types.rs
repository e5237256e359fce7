//! Core type definitions for the line simulator.
//!
//! This module defines the fundamental types used throughout the simulation.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Simulated time in hours.
///
/// The clock starts at 0.0 and has no fixed epoch; all durations
/// (processing, setup, maintenance, shift length) share this unit.
pub type SimTime = f64;

/// Index of a stage within the production line's pipeline.
///
/// Stage 0 is the intake; the highest index is the last stage before a
/// unit counts as finished.
pub type StageIndex = usize;

/// The kind of product unit moving through the line.
///
/// Product types key the per-stage processing and setup durations.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ProductType {
    A,
    B,
}

impl fmt::Display for ProductType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProductType::A => write!(f, "ProductA"),
            ProductType::B => write!(f, "ProductB"),
        }
    }
}
