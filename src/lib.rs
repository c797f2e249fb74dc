//! CPU scheduling simulation for the U-Engine ecosystem.
//!
//! Computes the exact execution timeline of a set of CPU-bound processes
//! under a chosen scheduling policy, and derives the standard performance
//! metrics (waiting, turnaround and response time, utilization, throughput).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `ProcessSpec`, `ProcessRunState`,
//!   `ExecutionInterval`, `Timeline`
//! - **`validation`**: Input integrity checks (duplicate IDs, time ranges)
//! - **`dispatching`**: Selection rules (arrival order, shortest remaining,
//!   highest priority) with a deterministic lowest-id tie-break
//! - **`scheduler`**: Policies, run parameters, metrics and step replay
//! - **`workload`**: Sample and seeded random process sets
//! - **`import`**: JSON import/export of process lists
//!
//! # Example
//!
//! ```
//! use u_cpusched::models::ProcessSpec;
//! use u_cpusched::scheduler::{run, Policy, SimulationParams};
//!
//! let processes = vec![
//!     ProcessSpec::new(1, 0, 5),
//!     ProcessSpec::new(2, 2, 3),
//!     ProcessSpec::new(3, 4, 8),
//! ];
//! let result = run(&processes, Policy::Fcfs, &SimulationParams::new()).unwrap();
//! assert_eq!(result.final_clock, 16);
//! assert_eq!(result.metrics.rounded().average_waiting_time, 2.33);
//! ```
//!
//! # Architecture
//!
//! The engine is a pure function of its inputs: callers hand over an
//! immutable slice of `ProcessSpec`, and every run builds fresh run state
//! that is never shared with the caller. There is no background clock;
//! animating a timeline is left to the presentation layer.
//!
//! # References
//!
//! - Silberschatz, Galvin & Gagne (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

pub mod dispatching;
pub mod error;
pub mod import;
pub mod models;
pub mod scheduler;
pub mod validation;
pub mod workload;

pub use error::{ConfigurationError, ImportError, SimulationError};
