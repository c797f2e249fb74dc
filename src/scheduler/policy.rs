//! Scheduling policies and run parameters.
//!
//! # Policies
//!
//! | Identifier | Policy | Preemptive | Needs |
//! |------------|--------|------------|-------|
//! | `fcfs` | First Come, First Served | no | - |
//! | `sjf` | Shortest Job First | no | - |
//! | `sjf-preemptive` | Shortest Remaining Time First | yes | - |
//! | `priority` | Priority | no | - |
//! | `priority-preemptive` | Priority | yes | - |
//! | `round-robin` | Round Robin | yes (quantum) | `quantum` |
//! | `multilevel` | Multilevel Queue | yes (across queues) | `multilevel` |
//!
//! **Lower numeric priority value = higher priority** everywhere.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{ConfigurationError, SimulationError};
use crate::models::{ProcessId, ProcessSpec};
use crate::validation::validate_quantum;

/// Default cap on simulated time for a single run.
pub const DEFAULT_TIME_LIMIT: i64 = 1_000_000;

/// A CPU scheduling discipline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Policy {
    /// First Come, First Served (non-preemptive).
    #[serde(rename = "fcfs")]
    Fcfs,
    /// Shortest Job First (non-preemptive).
    #[serde(rename = "sjf")]
    Sjf,
    /// Shortest Remaining Time First (preemptive SJF).
    #[serde(rename = "sjf-preemptive", alias = "srtf")]
    Srtf,
    /// Priority (non-preemptive).
    #[serde(rename = "priority")]
    Priority,
    /// Priority (preemptive).
    #[serde(rename = "priority-preemptive")]
    PriorityPreemptive,
    /// Round Robin with a fixed quantum.
    #[serde(rename = "round-robin")]
    RoundRobin,
    /// Multilevel Queue.
    #[serde(rename = "multilevel")]
    Multilevel,
}

impl Policy {
    /// Every supported policy.
    pub const ALL: [Policy; 7] = [
        Policy::Fcfs,
        Policy::Sjf,
        Policy::Srtf,
        Policy::Priority,
        Policy::PriorityPreemptive,
        Policy::RoundRobin,
        Policy::Multilevel,
    ];

    /// Stable identifier (e.g. `"round-robin"`).
    pub fn as_str(&self) -> &'static str {
        match self {
            Policy::Fcfs => "fcfs",
            Policy::Sjf => "sjf",
            Policy::Srtf => "sjf-preemptive",
            Policy::Priority => "priority",
            Policy::PriorityPreemptive => "priority-preemptive",
            Policy::RoundRobin => "round-robin",
            Policy::Multilevel => "multilevel",
        }
    }

    /// Human-readable name.
    pub fn display_name(&self) -> &'static str {
        match self {
            Policy::Fcfs => "First Come First Serve",
            Policy::Sjf => "Shortest Job First",
            Policy::Srtf => "Shortest Remaining Time First",
            Policy::Priority => "Priority Scheduling",
            Policy::PriorityPreemptive => "Preemptive Priority Scheduling",
            Policy::RoundRobin => "Round Robin",
            Policy::Multilevel => "Multilevel Queue",
        }
    }

    /// Whether a running process can be interrupted before it finishes.
    pub fn is_preemptive(&self) -> bool {
        matches!(
            self,
            Policy::Srtf | Policy::PriorityPreemptive | Policy::RoundRobin | Policy::Multilevel
        )
    }

    /// Whether the policy needs `SimulationParams::quantum`.
    pub fn requires_quantum(&self) -> bool {
        matches!(self, Policy::RoundRobin)
    }
}

impl fmt::Display for Policy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Policy {
    type Err = ConfigurationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "fcfs" => Ok(Policy::Fcfs),
            "sjf" => Ok(Policy::Sjf),
            "sjf-preemptive" | "srtf" => Ok(Policy::Srtf),
            "priority" => Ok(Policy::Priority),
            "priority-preemptive" => Ok(Policy::PriorityPreemptive),
            "round-robin" | "rr" => Ok(Policy::RoundRobin),
            "multilevel" => Ok(Policy::Multilevel),
            _ => Err(ConfigurationError::UnsupportedPolicy(s.to_string())),
        }
    }
}

/// Dispatch discipline inside one multilevel sub-queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case", tag = "kind")]
pub enum QueuePolicy {
    /// Arrival order, run to completion.
    Fcfs,
    /// Shortest remaining time, run to completion.
    Sjf,
    /// Lowest priority value, run to completion.
    Priority,
    /// Arrival order, time-sliced.
    RoundRobin {
        /// Time slice per dispatch.
        quantum: i64,
    },
}

/// One sub-queue of a multilevel configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueConfig {
    /// Selection priority of the queue (lower = served first).
    pub level: u32,
    /// Dispatch discipline within the queue.
    pub policy: QueuePolicy,
}

impl QueueConfig {
    /// Creates a queue config.
    pub fn new(level: u32, policy: QueuePolicy) -> Self {
        Self { level, policy }
    }
}

/// Multilevel Queue configuration.
///
/// The processor always serves the highest non-empty queue (lowest
/// `level`; equal levels in declaration order). Lower queues run only
/// while every higher queue is empty, so they can starve.
///
/// Processes missing from `assignment` go to the lowest queue.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MultilevelConfig {
    /// Sub-queues, indexed by position.
    pub queues: Vec<QueueConfig>,
    /// Process → queue index.
    pub assignment: BTreeMap<ProcessId, usize>,
}

impl MultilevelConfig {
    /// Creates an empty configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a sub-queue.
    pub fn with_queue(mut self, level: u32, policy: QueuePolicy) -> Self {
        self.queues.push(QueueConfig::new(level, policy));
        self
    }

    /// Assigns a process to a queue index.
    pub fn assign(mut self, process_id: ProcessId, queue: usize) -> Self {
        self.assignment.insert(process_id, queue);
        self
    }

    /// The usual two-level setup.
    ///
    /// Queue 0 (foreground) is Round Robin with `quantum` and receives every
    /// process with `priority <= threshold`; queue 1 (background) is FCFS
    /// and receives the rest.
    pub fn by_priority(processes: &[ProcessSpec], threshold: i32, quantum: i64) -> Self {
        let assignment = processes
            .iter()
            .map(|p| (p.id, usize::from(p.priority > threshold)))
            .collect();
        Self {
            queues: vec![
                QueueConfig::new(0, QueuePolicy::RoundRobin { quantum }),
                QueueConfig::new(1, QueuePolicy::Fcfs),
            ],
            assignment,
        }
    }

    /// Queue indices in service order: by level, then position.
    pub fn service_order(&self) -> Vec<usize> {
        let mut order: Vec<usize> = (0..self.queues.len()).collect();
        order.sort_by_key(|&i| (self.queues[i].level, i));
        order
    }

    /// Queue index a process belongs to.
    ///
    /// Unassigned processes land in the last queue of the service order.
    pub fn queue_for(&self, process_id: ProcessId) -> usize {
        match self.assignment.get(&process_id) {
            Some(&q) => q,
            None => self.service_order().last().copied().unwrap_or(0),
        }
    }

    /// Checks the configuration.
    ///
    /// Fewer than two queues or an assignment to a missing queue is a
    /// configuration error; a non-positive Round Robin quantum is a
    /// validation error.
    pub fn validate(&self) -> Result<(), SimulationError> {
        if self.queues.len() < 2 {
            return Err(ConfigurationError::InvalidQueueSetup(format!(
                "at least two queues are required, got {}",
                self.queues.len()
            ))
            .into());
        }

        if let Some((pid, q)) = self
            .assignment
            .iter()
            .find(|(_, q)| **q >= self.queues.len())
        {
            return Err(ConfigurationError::InvalidQueueSetup(format!(
                "process {pid} assigned to queue {q}, but only {} queues exist",
                self.queues.len()
            ))
            .into());
        }

        let errors: Vec<_> = self
            .queues
            .iter()
            .enumerate()
            .filter_map(|(i, q)| match q.policy {
                QueuePolicy::RoundRobin { quantum } => {
                    validate_quantum(quantum, &format!("queue {i}")).err()
                }
                _ => None,
            })
            .collect();
        if !errors.is_empty() {
            return Err(SimulationError::Validation(errors));
        }

        Ok(())
    }
}

/// Parameters for a simulation run.
///
/// # Example
/// ```
/// use u_cpusched::scheduler::SimulationParams;
///
/// let params = SimulationParams::new().with_quantum(2).with_time_limit(10_000);
/// assert_eq!(params.quantum, Some(2));
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationParams {
    /// Round Robin time quantum.
    #[serde(default)]
    pub quantum: Option<i64>,
    /// Multilevel Queue setup.
    #[serde(default, rename = "queueAssignment")]
    pub multilevel: Option<MultilevelConfig>,
    /// Cap on simulated time; a run that would pass it fails.
    #[serde(default = "default_time_limit")]
    pub time_limit: i64,
}

fn default_time_limit() -> i64 {
    DEFAULT_TIME_LIMIT
}

impl SimulationParams {
    /// Creates parameters with no quantum, no multilevel setup and the
    /// default time limit.
    pub fn new() -> Self {
        Self {
            quantum: None,
            multilevel: None,
            time_limit: DEFAULT_TIME_LIMIT,
        }
    }

    /// Sets the Round Robin quantum.
    pub fn with_quantum(mut self, quantum: i64) -> Self {
        self.quantum = Some(quantum);
        self
    }

    /// Sets the multilevel queue configuration.
    pub fn with_multilevel(mut self, config: MultilevelConfig) -> Self {
        self.multilevel = Some(config);
        self
    }

    /// Sets the simulated time cap.
    pub fn with_time_limit(mut self, time_limit: i64) -> Self {
        self.time_limit = time_limit;
        self
    }

    /// Checks that `policy` has what it needs.
    ///
    /// Missing parameters are configuration errors; a supplied but
    /// non-positive quantum is a validation error.
    pub fn check_for(&self, policy: Policy) -> Result<(), SimulationError> {
        match policy {
            Policy::RoundRobin => {
                let quantum = self.quantum.ok_or(ConfigurationError::MissingParameter {
                    policy: policy.as_str(),
                    parameter: "quantum",
                })?;
                validate_quantum(quantum, policy.as_str())?;
            }
            Policy::Multilevel => {
                self.multilevel
                    .as_ref()
                    .ok_or(ConfigurationError::MissingParameter {
                        policy: policy.as_str(),
                        parameter: "queueAssignment",
                    })?
                    .validate()?;
            }
            _ => {}
        }
        Ok(())
    }
}

impl Default for SimulationParams {
    fn default() -> Self {
        Self::new()
    }
}
