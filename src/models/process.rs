//! Process model.
//!
//! A `ProcessSpec` is the caller-owned, immutable description of a
//! CPU-bound process. A `ProcessRunState` is the engine-owned execution
//! record built fresh from a spec at the start of every run.
//!
//! # Time Representation
//! All times are integer time units relative to the simulation epoch (t=0).

use serde::{Deserialize, Serialize};

/// Process identifier (unique within a run, caller-assigned).
pub type ProcessId = u32;

/// Default priority assigned by [`ProcessSpec::new`].
pub const DEFAULT_PRIORITY: i32 = 1;

/// An immutable process descriptor supplied by the caller.
///
/// # Priority Convention
/// **Lower numeric value = higher priority.** A process with priority 1
/// is dispatched before one with priority 3 under the priority policies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessSpec {
    /// Unique process identifier.
    pub id: ProcessId,
    /// Display label (e.g. "P1").
    pub label: String,
    /// Time at which the process becomes eligible for scheduling.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
    /// Scheduling priority (lower = more important).
    pub priority: i32,
}

impl ProcessSpec {
    /// Creates a process labelled `P{id}` with the default priority.
    pub fn new(id: ProcessId, arrival_time: i64, burst_time: i64) -> Self {
        Self {
            id,
            label: format!("P{id}"),
            arrival_time,
            burst_time,
            priority: DEFAULT_PRIORITY,
        }
    }

    /// Sets the display label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }

    /// Sets the scheduling priority.
    pub fn with_priority(mut self, priority: i32) -> Self {
        self.priority = priority;
        self
    }
}

/// Per-run execution state of a process.
///
/// Created by [`ProcessRunState::from_spec`] with `remaining_time == burst_time`
/// and no start or completion time. Only the scheduler mutates it, through
/// [`ProcessRunState::run_for`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessRunState {
    /// Process identifier.
    pub id: ProcessId,
    /// Display label.
    pub label: String,
    /// Arrival time.
    pub arrival_time: i64,
    /// Total CPU time required.
    pub burst_time: i64,
    /// Scheduling priority (lower = more important).
    pub priority: i32,
    /// CPU time still owed. Always in `[0, burst_time]`.
    pub remaining_time: i64,
    /// Time of first dispatch. Set exactly once.
    pub start_time: Option<i64>,
    /// End of the last execution interval. Set when `remaining_time` hits 0.
    pub completion_time: Option<i64>,
    /// Whether the process has finished.
    pub completed: bool,
}

impl ProcessRunState {
    /// Builds a reset run state from a spec.
    pub fn from_spec(spec: &ProcessSpec) -> Self {
        Self {
            id: spec.id,
            label: spec.label.clone(),
            arrival_time: spec.arrival_time,
            burst_time: spec.burst_time,
            priority: spec.priority,
            remaining_time: spec.burst_time,
            start_time: None,
            completion_time: None,
            completed: false,
        }
    }

    /// Whether the process has arrived by `clock` and still needs CPU time.
    #[inline]
    pub fn is_ready(&self, clock: i64) -> bool {
        !self.completed && self.arrival_time <= clock
    }

    /// Executes the process for `amount` units starting at `clock`.
    ///
    /// Records the first-dispatch time, and the completion time once the
    /// remaining time reaches zero. Returns `true` if the process finished.
    /// `amount` is clamped to the remaining time.
    pub fn run_for(&mut self, clock: i64, amount: i64) -> bool {
        let amount = amount.clamp(0, self.remaining_time);
        if self.start_time.is_none() {
            self.start_time = Some(clock);
        }
        self.remaining_time -= amount;
        if self.remaining_time == 0 {
            self.completed = true;
            self.completion_time = Some(clock + amount);
        }
        self.completed
    }

    /// Turnaround time: completion − arrival.
    pub fn turnaround_time(&self) -> Option<i64> {
        self.completion_time.map(|c| c - self.arrival_time)
    }

    /// Waiting time: turnaround − burst.
    pub fn waiting_time(&self) -> Option<i64> {
        self.turnaround_time().map(|t| t - self.burst_time)
    }

    /// Response time: first dispatch − arrival.
    pub fn response_time(&self) -> Option<i64> {
        self.start_time.map(|s| s - self.arrival_time)
    }
}

/// Builds fresh run states for a process set.
///
/// The result is ordered by arrival time, ties by id, which is the order
/// every policy admits processes in.
pub fn reset_run_states(specs: &[ProcessSpec]) -> Vec<ProcessRunState> {
    let mut states: Vec<ProcessRunState> = specs.iter().map(ProcessRunState::from_spec).collect();
    states.sort_by(|a, b| {
        a.arrival_time
            .cmp(&b.arrival_time)
            .then_with(|| a.id.cmp(&b.id))
    });
    states
}
