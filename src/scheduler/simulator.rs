//! Simulation entry point.
//!
//! # Algorithm
//!
//! 1. Validate the process set (all issues reported together).
//! 2. Check the policy has its required parameters.
//! 3. Build fresh run state and dispatch to the policy.
//! 4. Compute metrics from the completion records and the final clock.
//!
//! Nothing is simulated unless steps 1 and 2 pass. Runs are independent:
//! the same inputs always produce the same result.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::engine::Engine;
use super::metrics::{Metrics, ProcessMetrics};
use super::multilevel::run_multilevel;
use super::policy::{Policy, SimulationParams};
use super::round_robin::run_round_robin;
use super::rule_based::{run_non_preemptive, run_preemptive};
use crate::dispatching::rules;
use crate::error::{ConfigurationError, SimulationError};
use crate::models::{ProcessRunState, ProcessSpec, Timeline};
use crate::validation::validate_processes;

/// Result of a simulation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimulationResult {
    /// Policy that produced this result.
    pub policy: Policy,
    /// Execution intervals in start-time order.
    pub timeline: Timeline,
    /// Final run states, in completion order.
    pub completed: Vec<ProcessRunState>,
    /// Clock value when the last process completed.
    pub final_clock: i64,
    /// Aggregate metrics (full precision).
    pub metrics: Metrics,
}

impl SimulationResult {
    /// Per-process timings, in completion order.
    pub fn process_metrics(&self) -> Vec<ProcessMetrics> {
        self.completed
            .iter()
            .filter_map(ProcessMetrics::from_state)
            .collect()
    }

    /// Completed run state for a process.
    pub fn completed_process(&self, id: u32) -> Option<&ProcessRunState> {
        self.completed.iter().find(|p| p.id == id)
    }
}

/// Simulates `processes` under `policy`.
///
/// # Errors
/// - [`SimulationError::Validation`] for malformed processes or a
///   non-positive quantum.
/// - [`SimulationError::Configuration`] when a required parameter is missing.
/// - [`SimulationError::ResourceExhausted`] when the run would pass
///   `params.time_limit`.
/// - [`SimulationError::InvariantViolation`] on an internal defect.
///
/// # Example
/// ```
/// use u_cpusched::models::ProcessSpec;
/// use u_cpusched::scheduler::{run, Policy, SimulationParams};
///
/// let processes = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
/// let params = SimulationParams::new().with_quantum(2);
/// let result = run(&processes, Policy::RoundRobin, &params).unwrap();
/// assert_eq!(result.final_clock, 8);
/// assert_eq!(result.timeline.len(), 5);
/// ```
pub fn run(
    processes: &[ProcessSpec],
    policy: Policy,
    params: &SimulationParams,
) -> Result<SimulationResult, SimulationError> {
    validate_processes(processes)?;
    params.check_for(policy)?;

    debug!(%policy, processes = processes.len(), "starting simulation run");

    let mut engine = Engine::new(processes, params.time_limit);
    match policy {
        Policy::Fcfs => run_non_preemptive(&mut engine, &rules::ArrivalOrder)?,
        Policy::Sjf => run_non_preemptive(&mut engine, &rules::ShortestRemaining)?,
        Policy::Srtf => run_preemptive(&mut engine, &rules::ShortestRemaining)?,
        Policy::Priority => run_non_preemptive(&mut engine, &rules::HighestPriority)?,
        Policy::PriorityPreemptive => run_preemptive(&mut engine, &rules::HighestPriority)?,
        Policy::RoundRobin => {
            let quantum = params.quantum.ok_or(ConfigurationError::MissingParameter {
                policy: policy.as_str(),
                parameter: "quantum",
            })?;
            run_round_robin(&mut engine, quantum)?
        }
        Policy::Multilevel => {
            let config =
                params
                    .multilevel
                    .as_ref()
                    .ok_or(ConfigurationError::MissingParameter {
                        policy: policy.as_str(),
                        parameter: "queueAssignment",
                    })?;
            run_multilevel(&mut engine, config)?
        }
    }

    let outcome = engine.finish();
    let metrics = Metrics::calculate(&outcome.completed, outcome.final_clock);

    debug!(
        %policy,
        final_clock = outcome.final_clock,
        intervals = outcome.timeline.len(),
        avg_waiting = metrics.average_waiting_time,
        "simulation run finished"
    );

    Ok(SimulationResult {
        policy,
        timeline: outcome.timeline,
        completed: outcome.completed,
        final_clock: outcome.final_clock,
        metrics,
    })
}

/// Simulates every policy that `params` supports on the same input.
///
/// Policies whose parameters are missing are skipped; any other error
/// aborts the comparison.
pub fn compare(
    processes: &[ProcessSpec],
    params: &SimulationParams,
) -> Result<Vec<SimulationResult>, SimulationError> {
    let mut results = Vec::new();
    for policy in Policy::ALL {
        match run(processes, policy, params) {
            Ok(result) => results.push(result),
            Err(SimulationError::Configuration(ConfigurationError::MissingParameter { .. })) => {
                continue
            }
            Err(err) => return Err(err),
        }
    }
    Ok(results)
}
