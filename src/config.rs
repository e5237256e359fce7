//! Configuration for the line simulator.
//!
//! A simulation is described declaratively: shift parameters, the ordered
//! pipeline of stage configurations, the backlog size, and the RNG seed.
//! Configurations load from YAML or JSON files and validate before the
//! core is constructed — the core assumes a valid configuration.
//!
//! # Configuration file structure
//!
//! ```yaml
//! shift:
//!   duration_hours: 8
//!   count: 3
//!
//! backlog:
//!   pairs: 100
//!
//! seed: 12345
//!
//! stages:
//!   - name: Machining
//!     processing_times: { A: 3.0, B: 4.0 }
//!     setup_times: { A: 1.0, B: 2.0 }
//!     breakdown_probability: 0.1
//!     maintenance_time: 1.5
//! ```

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::Path;
use thiserror::Error;

use crate::types::ProductType;

/// Errors that can occur during configuration loading.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unknown file format: {0}")]
    UnknownFormat(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

/// Shift parameters: the two positive integers supplied before a run.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ShiftParams {
    /// Length of one shift in hours
    pub duration_hours: u32,
    /// Number of back-to-back shifts
    pub count: u32,
}

impl Default for ShiftParams {
    fn default() -> Self {
        Self {
            duration_hours: 8,
            count: 1,
        }
    }
}

/// Backlog parameters.
///
/// The backlog is a deterministic alternating sequence of product types:
/// `pairs` repetitions of (A, B).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct BacklogParams {
    #[serde(default = "default_pairs")]
    pub pairs: u32,
}

fn default_pairs() -> u32 {
    100
}

impl Default for BacklogParams {
    fn default() -> Self {
        Self {
            pairs: default_pairs(),
        }
    }
}

/// Configuration of a single stage in the pipeline.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct StageConfig {
    /// Stage display name
    pub name: String,
    /// Processing duration per product type
    pub processing_times: HashMap<ProductType, f64>,
    /// Setup duration per product type
    #[serde(default)]
    pub setup_times: HashMap<ProductType, f64>,
    /// Probability in [0, 1] that an accepted unit triggers a breakdown
    #[serde(default)]
    pub breakdown_probability: f64,
    /// Delay before a broken-down stage re-attempts its unit
    #[serde(default)]
    pub maintenance_time: f64,
}

impl StageConfig {
    /// Creates a stage configuration with the given name and no durations.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            processing_times: HashMap::new(),
            setup_times: HashMap::new(),
            breakdown_probability: 0.0,
            maintenance_time: 0.0,
        }
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

    /// Sets breakdown probability and maintenance delay.
    pub fn with_breakdowns(mut self, probability: f64, maintenance_time: f64) -> Self {
        self.breakdown_probability = probability;
        self.maintenance_time = maintenance_time;
        self
    }
}

/// Top-level simulation configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Shift parameters
    #[serde(default)]
    pub shift: ShiftParams,

    /// The ordered pipeline of stages
    pub stages: Vec<StageConfig>,

    /// Backlog parameters
    #[serde(default)]
    pub backlog: BacklogParams,

    /// Base RNG seed; stage `i` is seeded with `seed + i`
    #[serde(default = "default_seed")]
    pub seed: u64,

    /// Logging level (trace, debug, info, warn, error)
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_seed() -> u64 {
    12345
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for SimConfig {
    /// The reference five-stage line: raw material handling, machining,
    /// assembly, quality control, packaging, with a 200-unit alternating
    /// backlog.
    fn default() -> Self {
        Self {
            shift: ShiftParams::default(),
            stages: vec![
                StageConfig::new("Raw Material Handler")
                    .with_processing_time(ProductType::A, 2.0)
                    .with_processing_time(ProductType::B, 3.0)
                    .with_setup_time(ProductType::A, 1.0)
                    .with_setup_time(ProductType::B, 1.5)
                    .with_breakdowns(0.1, 1.0),
                StageConfig::new("Machining")
                    .with_processing_time(ProductType::A, 3.0)
                    .with_processing_time(ProductType::B, 4.0)
                    .with_setup_time(ProductType::A, 1.0)
                    .with_setup_time(ProductType::B, 2.0)
                    .with_breakdowns(0.1, 1.5),
                StageConfig::new("Assembly")
                    .with_processing_time(ProductType::A, 4.0)
                    .with_processing_time(ProductType::B, 5.0)
                    .with_setup_time(ProductType::A, 1.5)
                    .with_setup_time(ProductType::B, 2.5)
                    .with_breakdowns(0.1, 2.0),
                StageConfig::new("Quality Control")
                    .with_processing_time(ProductType::A, 1.0)
                    .with_processing_time(ProductType::B, 1.5)
                    .with_setup_time(ProductType::A, 0.5)
                    .with_setup_time(ProductType::B, 1.0)
                    .with_breakdowns(0.05, 0.5),
                StageConfig::new("Packaging")
                    .with_processing_time(ProductType::A, 2.0)
                    .with_processing_time(ProductType::B, 2.5)
                    .with_setup_time(ProductType::A, 0.5)
                    .with_setup_time(ProductType::B, 1.0)
                    .with_breakdowns(0.05, 0.5),
            ],
            backlog: BacklogParams::default(),
            seed: default_seed(),
            log_level: default_log_level(),
        }
    }
}

impl SimConfig {
    /// Loads configuration from a YAML file.
    pub fn from_yaml_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_yaml(&content)
    }

    /// Parses configuration from a YAML string.
    pub fn from_yaml(yaml: &str) -> ConfigResult<Self> {
        let config: SimConfig = serde_yaml::from_str(yaml)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a JSON file.
    pub fn from_json_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parses configuration from a JSON string.
    pub fn from_json(json: &str) -> ConfigResult<Self> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Loads configuration from a file, detecting the format from the
    /// extension (`.yaml`, `.yml`, or `.json`).
    pub fn from_file<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        let path = path.as_ref();
        match path.extension().and_then(|e| e.to_str()) {
            Some("yaml") | Some("yml") => Self::from_yaml_file(path),
            Some("json") => Self::from_json_file(path),
            other => Err(ConfigError::UnknownFormat(
                other.unwrap_or("<none>").to_string(),
            )),
        }
    }

    /// Serializes the configuration to YAML.
    pub fn to_yaml(&self) -> ConfigResult<String> {
        Ok(serde_yaml::to_string(self)?)
    }

    /// Validates the configuration.
    ///
    /// Shift duration and count must be positive, the pipeline must be
    /// non-empty, every stage needs a processing time for both product
    /// types, probabilities must lie in [0, 1], and durations must be
    /// non-negative.
    pub fn validate(&self) -> ConfigResult<()> {
        if self.shift.duration_hours == 0 {
            return Err(ConfigError::Validation(
                "shift duration must be positive".to_string(),
            ));
        }
        if self.shift.count == 0 {
            return Err(ConfigError::Validation(
                "shift count must be positive".to_string(),
            ));
        }
        if self.stages.is_empty() {
            return Err(ConfigError::Validation(
                "at least one stage is required".to_string(),
            ));
        }

        for stage in &self.stages {
            if !(0.0..=1.0).contains(&stage.breakdown_probability) {
                return Err(ConfigError::Validation(format!(
                    "stage '{}': breakdown probability {} outside [0, 1]",
                    stage.name, stage.breakdown_probability
                )));
            }
            if stage.maintenance_time < 0.0 {
                return Err(ConfigError::Validation(format!(
                    "stage '{}': negative maintenance time",
                    stage.name
                )));
            }
            for product in [ProductType::A, ProductType::B] {
                match stage.processing_times.get(&product) {
                    None => {
                        return Err(ConfigError::Validation(format!(
                            "stage '{}': missing processing time for {}",
                            stage.name, product
                        )));
                    }
                    Some(t) if *t < 0.0 => {
                        return Err(ConfigError::Validation(format!(
                            "stage '{}': negative processing time for {}",
                            stage.name, product
                        )));
                    }
                    Some(_) => {}
                }
                if let Some(t) = stage.setup_times.get(&product) {
                    if *t < 0.0 {
                        return Err(ConfigError::Validation(format!(
                            "stage '{}': negative setup time for {}",
                            stage.name, product
                        )));
                    }
                }
            }
        }

        Ok(())
    }

    /// Builds the pre-populated backlog: `pairs` alternating (A, B) units.
    pub fn build_backlog(&self) -> std::collections::VecDeque<ProductType> {
        let mut backlog = std::collections::VecDeque::with_capacity(self.backlog.pairs as usize * 2);
        for _ in 0..self.backlog.pairs {
            backlog.push_back(ProductType::A);
            backlog.push_back(ProductType::B);
        }
        backlog
    }

    /// Number of stages in the pipeline.
    pub fn stage_count(&self) -> usize {
        self.stages.len()
    }
}
