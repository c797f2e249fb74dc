//! Unit-by-unit replay of a computed run.
//!
//! The schedule is computed once, up front; stepping only walks it. Each
//! `step` advances the clock by exactly one time unit and reports what
//! happened during that unit, so a presentation layer can animate a run at
//! any pace without re-simulating.

use serde::{Deserialize, Serialize};

use super::policy::{Policy, SimulationParams};
use super::simulator::{run, SimulationResult};
use crate::error::SimulationError;
use crate::models::{ExecutionInterval, ProcessId, ProcessSpec, Timeline};

/// What happened during one time unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StepDelta {
    /// Clock after the step.
    pub clock: i64,
    /// Unit slice `[clock - 1, clock)` executed, or `None` if idle.
    pub interval: Option<ExecutionInterval>,
    /// Processes that completed at `clock`.
    pub completed: Vec<ProcessId>,
}

/// Step-wise replay over a [`SimulationResult`].
///
/// # Example
/// ```
/// use u_cpusched::models::ProcessSpec;
/// use u_cpusched::scheduler::{Policy, SimulationParams, StepSimulation};
///
/// let processes = vec![ProcessSpec::new(1, 0, 2), ProcessSpec::new(2, 3, 1)];
/// let mut sim = StepSimulation::start(&processes, Policy::Fcfs, &SimulationParams::new()).unwrap();
///
/// let first = sim.step().unwrap();
/// assert_eq!(first.clock, 1);
/// assert_eq!(first.interval.map(|i| i.process_id), Some(1));
///
/// while sim.step().is_some() {}
/// assert!(sim.is_finished());
/// assert_eq!(sim.timeline(), &sim.result().timeline);
/// ```
#[derive(Debug, Clone)]
pub struct StepSimulation {
    result: SimulationResult,
    clock: i64,
    cursor: usize,
    emitted: Timeline,
}

impl StepSimulation {
    /// Wraps a computed result, positioned at t=0.
    pub fn new(result: SimulationResult) -> Self {
        Self {
            result,
            clock: 0,
            cursor: 0,
            emitted: Timeline::new(),
        }
    }

    /// Runs the simulation and wraps the result.
    pub fn start(
        processes: &[ProcessSpec],
        policy: Policy,
        params: &SimulationParams,
    ) -> Result<Self, SimulationError> {
        run(processes, policy, params).map(Self::new)
    }

    /// Current clock.
    pub fn clock(&self) -> i64 {
        self.clock
    }

    /// Whether the clock reached the run's final clock.
    pub fn is_finished(&self) -> bool {
        self.clock >= self.result.final_clock
    }

    /// The full, precomputed result.
    pub fn result(&self) -> &SimulationResult {
        &self.result
    }

    /// Timeline of everything replayed so far (merged).
    pub fn timeline(&self) -> &Timeline {
        &self.emitted
    }

    /// Advances the clock by one unit.
    ///
    /// Returns `None` once the run is finished.
    pub fn step(&mut self) -> Option<StepDelta> {
        if self.is_finished() {
            return None;
        }

        let t = self.clock;
        let intervals = self.result.timeline.intervals();
        while self.cursor < intervals.len() && intervals[self.cursor].end <= t {
            self.cursor += 1;
        }

        let interval = intervals
            .get(self.cursor)
            .filter(|i| i.start <= t)
            .map(|i| ExecutionInterval::new(i.process_id, i.label.clone(), t, t + 1));
        if let Some(slice) = &interval {
            self.emitted.push(slice.clone());
        }

        self.clock = t + 1;
        let completed = self
            .result
            .completed
            .iter()
            .filter(|p| p.completion_time == Some(self.clock))
            .map(|p| p.id)
            .collect();

        Some(StepDelta {
            clock: self.clock,
            interval,
            completed,
        })
    }

    /// Rewinds to t=0.
    pub fn reset(&mut self) {
        self.clock = 0;
        self.cursor = 0;
        self.emitted = Timeline::new();
    }
}

impl Iterator for StepSimulation {
    type Item = StepDelta;

    fn next(&mut self) -> Option<Self::Item> {
        self.step()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sim(processes: &[ProcessSpec], policy: Policy) -> StepSimulation {
        StepSimulation::start(processes, policy, &SimulationParams::new().with_quantum(2)).unwrap()
    }

    #[test]
    fn test_step_advances_one_unit() {
        let mut s = sim(&[ProcessSpec::new(1, 0, 3)], Policy::Fcfs);
        let clocks: Vec<i64> = s.by_ref().map(|d| d.clock).collect();
        assert_eq!(clocks, vec![1, 2, 3]);
        assert!(s.is_finished());
        assert!(s.step().is_none());
    }

    #[test]
    fn test_idle_steps() {
        let mut s = sim(&[ProcessSpec::new(1, 2, 1)], Policy::Fcfs);
        assert_eq!(s.step().unwrap().interval, None);
        assert_eq!(s.step().unwrap().interval, None);
        let last = s.step().unwrap();
        assert_eq!(last.interval, Some(ExecutionInterval::new(1, "P1", 2, 3)));
        assert_eq!(last.completed, vec![1]);
    }

    #[test]
    fn test_completion_reported_once() {
        let processes = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
        let deltas: Vec<StepDelta> = sim(&processes, Policy::RoundRobin).collect();
        let done: Vec<(i64, ProcessId)> = deltas
            .iter()
            .flat_map(|d| d.completed.iter().map(move |&p| (d.clock, p)))
            .collect();
        assert_eq!(done, vec![(7, 2), (8, 1)]);
    }

    #[test]
    fn test_replay_rebuilds_timeline() {
        let processes = vec![
            ProcessSpec::new(1, 0, 8),
            ProcessSpec::new(2, 1, 2),
            ProcessSpec::new(3, 12, 2),
        ];
        let mut s = sim(&processes, Policy::Srtf);
        while s.step().is_some() {}
        assert_eq!(s.timeline(), &s.result().timeline);
    }

    #[test]
    fn test_reset() {
        let mut s = sim(&[ProcessSpec::new(1, 0, 2)], Policy::Fcfs);
        s.step();
        s.reset();
        assert_eq!(s.clock(), 0);
        assert!(s.timeline().is_empty());
        assert_eq!(s.count(), 2);
    }

    #[test]
    fn test_empty_run_is_finished() {
        let mut s = sim(&[], Policy::Fcfs);
        assert!(s.is_finished());
        assert!(s.step().is_none());
    }
}
