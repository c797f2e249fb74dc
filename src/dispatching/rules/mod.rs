//! Built-in dispatching rules.
//!
//! # Rules
//!
//! | Rule | Score | Used by |
//! |------|-------|---------|
//! | `ArrivalOrder` | arrival time | FCFS, FCFS sub-queues |
//! | `ShortestRemaining` | remaining CPU time | SJF, SRTF, SJF sub-queues |
//! | `HighestPriority` | priority value | Priority, Priority Preemptive, priority sub-queues |
//!
//! # Score Convention
//! All rules return lower scores for processes that should run first.

use super::{DispatchingRule, RuleScore};
use crate::models::ProcessRunState;

/// First Come, First Served.
///
/// Prioritizes processes that arrived earlier.
#[derive(Debug, Clone, Copy)]
pub struct ArrivalOrder;

impl DispatchingRule for ArrivalOrder {
    fn name(&self) -> &'static str {
        "FCFS"
    }

    fn evaluate(&self, process: &ProcessRunState) -> RuleScore {
        process.arrival_time
    }

    fn description(&self) -> &'static str {
        "First Come, First Served"
    }
}

/// Shortest Remaining Time.
///
/// Prioritizes processes with the least CPU time still owed. For a
/// process that has not run yet this equals its burst time, so the same
/// rule drives both SJF and SRTF.
///
/// # Reference
/// Smith (1956), optimal for minimizing mean flow time on a single machine.
#[derive(Debug, Clone, Copy)]
pub struct ShortestRemaining;

impl DispatchingRule for ShortestRemaining {
    fn name(&self) -> &'static str {
        "SRT"
    }

    fn evaluate(&self, process: &ProcessRunState) -> RuleScore {
        process.remaining_time
    }

    fn description(&self) -> &'static str {
        "Shortest Remaining Time"
    }
}

/// Highest priority first.
///
/// **Lower numeric priority = higher priority.**
#[derive(Debug, Clone, Copy)]
pub struct HighestPriority;

impl DispatchingRule for HighestPriority {
    fn name(&self) -> &'static str {
        "PRIORITY"
    }

    fn evaluate(&self, process: &ProcessRunState) -> RuleScore {
        RuleScore::from(process.priority)
    }

    fn description(&self) -> &'static str {
        "Highest Priority (lowest value) First"
    }
}
