//! Shared run state for every policy.
//!
//! The engine owns the per-run `ProcessRunState` list, the simulated
//! clock and the timeline being built. Policies only decide *which*
//! process runs and for *how long*; the engine applies the dispatch and
//! enforces the clock invariants:
//!
//! - the clock never moves backward,
//! - every dispatch or idle jump strictly advances it,
//! - it never passes the configured time limit.

use tracing::{trace, warn};

use crate::dispatching::{select_best, DispatchingRule};
use crate::error::SimulationError;
use crate::models::{reset_run_states, ExecutionInterval, ProcessRunState, ProcessSpec, Timeline};

/// Raw output of a policy run, before metrics.
#[derive(Debug, Clone)]
pub(crate) struct RunOutcome {
    pub timeline: Timeline,
    pub completed: Vec<ProcessRunState>,
    pub final_clock: i64,
}

/// Per-run simulation state.
#[derive(Debug)]
pub(crate) struct Engine {
    /// Run states ordered by arrival time, ties by id.
    processes: Vec<ProcessRunState>,
    clock: i64,
    timeline: Timeline,
    /// Snapshots taken at completion, in completion order.
    completed: Vec<ProcessRunState>,
    time_limit: i64,
}

impl Engine {
    /// Builds fresh run state from a validated process set.
    pub fn new(specs: &[ProcessSpec], time_limit: i64) -> Self {
        Self {
            processes: reset_run_states(specs),
            clock: 0,
            timeline: Timeline::new(),
            completed: Vec::with_capacity(specs.len()),
            time_limit,
        }
    }

    #[inline]
    pub fn clock(&self) -> i64 {
        self.clock
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.processes.len()
    }

    #[inline]
    pub fn process(&self, idx: usize) -> &ProcessRunState {
        &self.processes[idx]
    }

    /// Whether every process has completed.
    #[inline]
    pub fn is_done(&self) -> bool {
        self.completed.len() == self.processes.len()
    }

    /// Best ready process under `rule`, ties by lowest id.
    pub fn select<R: DispatchingRule + ?Sized>(&self, rule: &R) -> Option<usize> {
        let clock = self.clock;
        select_best(
            rule,
            &self.processes,
            (0..self.processes.len()).filter(|&i| self.processes[i].is_ready(clock)),
        )
    }

    /// Earliest arrival strictly after the current clock among
    /// processes that have not completed.
    pub fn next_arrival(&self) -> Option<i64> {
        self.processes
            .iter()
            .filter(|p| !p.completed && p.arrival_time > self.clock)
            .map(|p| p.arrival_time)
            .min()
    }

    /// Runs `idx` for up to `amount` units from the current clock.
    ///
    /// Returns `true` if the process completed.
    pub fn execute(&mut self, idx: usize, amount: i64) -> Result<bool, SimulationError> {
        let amount = amount.min(self.processes[idx].remaining_time);
        if amount <= 0 || !self.processes[idx].is_ready(self.clock) {
            return Err(self.invariant(format!(
                "dispatch of process {} for {amount} unit(s) would not advance the clock",
                self.processes[idx].id
            )));
        }

        let start = self.clock;
        let end = match start.checked_add(amount) {
            Some(end) if end <= self.time_limit => end,
            _ => return Err(self.exhausted()),
        };

        let process = &mut self.processes[idx];
        let finished = process.run_for(start, amount);
        trace!(process = process.id, start, end, finished, "dispatch");
        self.timeline.push(ExecutionInterval::new(
            process.id,
            process.label.clone(),
            start,
            end,
        ));
        if finished {
            self.completed.push(process.clone());
        }
        self.clock = end;
        Ok(finished)
    }

    /// Leaves the processor idle until the next arrival.
    ///
    /// Fails if nothing is left to arrive while work remains, which means
    /// a policy lost track of a ready process.
    pub fn idle_until_next_arrival(&mut self) -> Result<(), SimulationError> {
        match self.next_arrival() {
            Some(t) if t > self.time_limit => Err(self.exhausted()),
            Some(t) => {
                trace!(from = self.clock, to = t, "idle");
                self.clock = t;
                Ok(())
            }
            None => Err(self.invariant(
                "no pending process can ever become eligible".to_string(),
            )),
        }
    }

    fn exhausted(&self) -> SimulationError {
        warn!(limit = self.time_limit, clock = self.clock, "simulated time limit exceeded");
        SimulationError::ResourceExhausted {
            limit: self.time_limit,
            clock: self.clock,
        }
    }

    /// Builds an invariant-violation error carrying the pending state.
    pub fn invariant(&self, message: String) -> SimulationError {
        warn!(clock = self.clock, %message, "scheduler invariant violated");
        SimulationError::InvariantViolation {
            clock: self.clock,
            message,
            pending: self
                .processes
                .iter()
                .filter(|p| !p.completed)
                .cloned()
                .collect(),
        }
    }

    pub fn finish(self) -> RunOutcome {
        RunOutcome {
            timeline: self.timeline,
            completed: self.completed,
            final_clock: self.clock,
        }
    }
}
