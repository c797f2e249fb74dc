//! CPU scheduling domain models.
//!
//! Provides the input descriptors, per-run execution state and output
//! timeline types shared by every policy.
//!
//! # Ownership
//!
//! | Type | Owner | Lifetime |
//! |------|-------|----------|
//! | `ProcessSpec` | Caller | Immutable input, never aliased by the engine |
//! | `ProcessRunState` | Engine | Created fresh per run, handed back when complete |
//! | `Timeline` | Caller | Returned with the run result |

mod process;
mod timeline;

pub use process::{reset_run_states, ProcessId, ProcessRunState, ProcessSpec, DEFAULT_PRIORITY};
pub use timeline::{ExecutionInterval, Timeline};
