//! CPU scheduling policies, run entry point and metrics.
//!
//! Every policy is a pure function of the process set and its parameters:
//! it builds fresh run state, advances a simulated clock that never moves
//! backward, and produces a merged timeline plus completion records.
//!
//! # Policies
//!
//! `run_non_preemptive` and `run_preemptive` drive FCFS, SJF, SRTF and both
//! priority variants from a [`DispatchingRule`](crate::dispatching::DispatchingRule);
//! Round Robin and Multilevel Queue keep their own ready queues.
//!
//! # Tie-break
//!
//! When processes are equally eligible the lowest process id wins. A
//! running process is only preempted by a strictly better candidate.
//!
//! # Metrics
//!
//! `Metrics` computes average waiting, turnaround and response time, CPU
//! utilization and throughput.
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5
//! - Tanenbaum & Bos (2014), "Modern Operating Systems", Ch. 2.4

mod engine;
mod metrics;
mod multilevel;
mod policy;
mod round_robin;
mod rule_based;
mod simulator;
mod step;

pub use metrics::{round2, round_ratio, Metrics, ProcessMetrics};
pub use policy::{
    MultilevelConfig, Policy, QueueConfig, QueuePolicy, SimulationParams, DEFAULT_TIME_LIMIT,
};
pub use simulator::{compare, run, SimulationResult};
pub use step::{StepDelta, StepSimulation};
