//! Run statistics and export.
//!
//! A completed run yields a [`RunStats`] snapshot: aggregate counts, the
//! final simulated time, kernel counters, and per-stage breakdowns. Stats
//! serialize to JSON for downstream analysis and render as a plain-text
//! summary for the console.

use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

use crate::types::SimTime;

/// Counters for a single stage across a run.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StageStats {
    /// Stage display name
    pub name: String,
    /// Processing attempts that made the stage busy (retries re-count)
    pub units_started: u64,
    /// Units that finished processing at this stage
    pub units_finished: u64,
    /// Breakdown events
    pub breakdowns: u64,
    /// Units rejected at this stage (busy, or shift-end cut-off)
    pub units_dropped: u64,
}

/// Aggregate results of one simulation run.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct RunStats {
    /// Units that left the last stage
    pub completed: u64,
    /// Units ever admitted into the first stage
    pub admitted: u64,
    /// Units lost anywhere on the line
    pub dropped: u64,
    /// Shifts that ran to their end deadline
    pub shifts_run: u32,
    /// Simulated time when the event queue drained
    pub total_time: SimTime,
    /// Events executed by the scheduler
    pub events_executed: u64,
    /// Largest pending-event count observed
    pub peak_queue_len: usize,
    /// Per-stage counters, in pipeline order
    pub stages: Vec<StageStats>,
}

impl RunStats {
    /// Serializes the stats to pretty-printed JSON.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Writes the stats as JSON to a file.
    pub fn to_json_file<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = self.to_json().map_err(std::io::Error::other)?;
        std::fs::write(path, json)
    }

    /// Writes a human-readable summary block.
    pub fn write_summary<W: Write>(&self, mut w: W) -> std::io::Result<()> {
        writeln!(w, "\nSimulation Results:")?;
        writeln!(w, "-------------------")?;
        writeln!(w, "Total Products Completed: {}", self.completed)?;
        writeln!(w, "Total Simulation Time: {:.2}", self.total_time)?;
        writeln!(w, "Units Admitted: {}", self.admitted)?;
        writeln!(w, "Units Dropped: {}", self.dropped)?;
        writeln!(w, "Shifts Run: {}", self.shifts_run)?;
        writeln!(w, "-------------------")?;
        for stage in &self.stages {
            writeln!(
                w,
                "{}: started {}, finished {}, breakdowns {}, dropped {}",
                stage.name,
                stage.units_started,
                stage.units_finished,
                stage.breakdowns,
                stage.units_dropped
            )?;
        }
        Ok(())
    }

    /// Returns the summary block as a string.
    pub fn summary(&self) -> String {
        let mut buf = Vec::new();
        // Writing to a Vec cannot fail.
        let _ = self.write_summary(&mut buf);
        String::from_utf8_lossy(&buf).into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> RunStats {
        RunStats {
            completed: 12,
            admitted: 15,
            dropped: 3,
            shifts_run: 2,
            total_time: 16.0,
            events_executed: 90,
            peak_queue_len: 4,
            stages: vec![StageStats {
                name: "Machining".to_string(),
                units_started: 15,
                units_finished: 13,
                breakdowns: 2,
                units_dropped: 1,
            }],
        }
    }

    #[test]
    fn test_json_roundtrip() {
        let stats = sample();
        let json = stats.to_json().unwrap();
        let back: RunStats = serde_json::from_str(&json).unwrap();
        assert_eq!(back.completed, 12);
        assert_eq!(back.stages, stats.stages);
    }

    #[test]
    fn test_summary_contains_counts() {
        let text = sample().summary();
        assert!(text.contains("Total Products Completed: 12"));
        assert!(text.contains("Total Simulation Time: 16.00"));
        assert!(text.contains("Machining"));
    }
}
