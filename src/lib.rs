//! # Shopfloor
//!
//! A discrete-event simulation of a multi-stage manufacturing line.
//!
//! A sequence of machine stages processes discrete product units. Each
//! stage takes a per-product processing plus setup duration, may break
//! down probabilistically and re-attempt its unit after maintenance, and
//! never carries work across a shift boundary. A single-threaded scheduler
//! advances simulated time by executing timestamped actions in causal
//! order; it is the only control flow in a run.
//!
//! ## Design principles
//!
//! - **One event loop**: the scheduler's min-heap is the sole driver;
//!   "waiting" means scheduling a future event, never blocking.
//! - **Closed action set**: events carry a tagged `Action` variant rather
//!   than an opaque closure, keeping the queue introspectable.
//! - **Deterministic**: time advances monotonically, same-time events run
//!   in FIFO order, and every stage draws from its own seeded RNG, so a
//!   run over a fixed configuration reproduces exactly.
//! - **Decoupled reporting**: the core emits one-way notifications through
//!   an `Observer`; rendering lives entirely outside the kernel.
//!
//! ## Quick start
//!
//! ```rust
//! use shopfloor::{NullObserver, ProductionLine, SimConfig};
//!
//! let mut config = SimConfig::default();
//! config.shift.duration_hours = 8;
//! config.shift.count = 2;
//!
//! let mut line = ProductionLine::new(&config, Box::new(NullObserver));
//! let stats = line.run();
//!
//! assert!(stats.completed <= stats.admitted);
//! println!("{}", stats.summary());
//! ```

pub mod config;
pub mod event;
pub mod line;
pub mod observer;
pub mod scheduler;
pub mod stage;
pub mod stats;
pub mod types;

// Re-export commonly used types
pub use config::{BacklogParams, ConfigError, ConfigResult, ShiftParams, SimConfig, StageConfig};
pub use event::{Action, ScheduledEvent};
pub use line::ProductionLine;
pub use observer::{NullObserver, Observer, TraceObserver};
pub use scheduler::Scheduler;
pub use stage::{AcceptOutcome, Stage};
pub use stats::{RunStats, StageStats};
pub use types::{ProductType, SimTime, StageIndex};

/// Initialize the tracing subscriber for logging.
///
/// Call this at the start of your program to enable logging.
pub fn init_logging(level: &str) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}
