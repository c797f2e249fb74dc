//! Rule-driven single-queue policies.
//!
//! # Algorithm
//!
//! **Non-preemptive** (FCFS, SJF, Priority): at every decision point
//! (processor idle or a process completed), dispatch the best ready process
//! under the rule and run it to completion. If nothing is ready, jump the
//! clock to the next arrival.
//!
//! **Preemptive** (SRTF, Priority Preemptive): the ready set only changes
//! at arrivals and completions, so the running process is re-evaluated at
//! those events instead of every time unit. A newcomer preempts only with
//! a strictly better score; the running process keeps ties.
//!
//! # Complexity
//! O(n²) where n = number of processes (one linear scan per event).

use tracing::debug;

use super::engine::Engine;
use crate::dispatching::{preempts, DispatchingRule};
use crate::error::SimulationError;

/// Runs every process to completion in rule order.
pub(crate) fn run_non_preemptive<R: DispatchingRule + ?Sized>(
    engine: &mut Engine,
    rule: &R,
) -> Result<(), SimulationError> {
    while !engine.is_done() {
        match engine.select(rule) {
            Some(idx) => {
                let remaining = engine.process(idx).remaining_time;
                engine.execute(idx, remaining)?;
            }
            None => engine.idle_until_next_arrival()?,
        }
    }
    Ok(())
}

/// Runs the best ready process, re-evaluating at every arrival.
pub(crate) fn run_preemptive<R: DispatchingRule + ?Sized>(
    engine: &mut Engine,
    rule: &R,
) -> Result<(), SimulationError> {
    let mut running: Option<usize> = None;

    while !engine.is_done() {
        let Some(best) = engine.select(rule) else {
            running = None;
            engine.idle_until_next_arrival()?;
            continue;
        };

        let idx = match running {
            Some(cur) if !preempts(rule, engine.process(best), engine.process(cur)) => cur,
            Some(cur) => {
                debug!(
                    clock = engine.clock(),
                    preempted = engine.process(cur).id,
                    by = engine.process(best).id,
                    rule = rule.name(),
                    "preemption"
                );
                best
            }
            None => best,
        };

        let remaining = engine.process(idx).remaining_time;
        let slice = match engine.next_arrival() {
            Some(t) => remaining.min(t - engine.clock()),
            None => remaining,
        };

        let finished = engine.execute(idx, slice)?;
        running = if finished { None } else { Some(idx) };
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dispatching::rules;
    use crate::models::{ExecutionInterval, ProcessSpec};

    fn spans(engine: Engine) -> Vec<(u32, i64, i64)> {
        engine
            .finish()
            .timeline
            .iter()
            .map(|i: &ExecutionInterval| (i.process_id, i.start, i.end))
            .collect()
    }

    fn sample() -> Vec<ProcessSpec> {
        vec![
            ProcessSpec::new(1, 0, 5).with_priority(3),
            ProcessSpec::new(2, 2, 3).with_priority(1),
            ProcessSpec::new(3, 4, 8).with_priority(2),
        ]
    }

    #[test]
    fn test_fcfs_order() {
        let mut e = Engine::new(&sample(), 1_000);
        run_non_preemptive(&mut e, &rules::ArrivalOrder).unwrap();
        assert_eq!(spans(e), vec![(1, 0, 5), (2, 5, 8), (3, 8, 16)]);
    }

    #[test]
    fn test_fcfs_idle_gap() {
        let specs = vec![ProcessSpec::new(1, 0, 2), ProcessSpec::new(2, 5, 1)];
        let mut e = Engine::new(&specs, 1_000);
        run_non_preemptive(&mut e, &rules::ArrivalOrder).unwrap();
        assert_eq!(spans(e), vec![(1, 0, 2), (2, 5, 6)]);
    }

    #[test]
    fn test_sjf_picks_shortest_among_ready() {
        let specs = vec![
            ProcessSpec::new(1, 0, 4),
            ProcessSpec::new(2, 1, 6),
            ProcessSpec::new(3, 2, 2),
        ];
        let mut e = Engine::new(&specs, 1_000);
        run_non_preemptive(&mut e, &rules::ShortestRemaining).unwrap();
        assert_eq!(spans(e), vec![(1, 0, 4), (3, 4, 6), (2, 6, 12)]);
    }

    #[test]
    fn test_priority_non_preemptive() {
        let mut e = Engine::new(&sample(), 1_000);
        run_non_preemptive(&mut e, &rules::HighestPriority).unwrap();
        assert_eq!(spans(e), vec![(1, 0, 5), (2, 5, 8), (3, 8, 16)]);
    }

    #[test]
    fn test_srtf_preempts_on_strictly_shorter() {
        let specs = vec![ProcessSpec::new(1, 0, 8), ProcessSpec::new(2, 1, 2)];
        let mut e = Engine::new(&specs, 1_000);
        run_preemptive(&mut e, &rules::ShortestRemaining).unwrap();
        assert_eq!(spans(e), vec![(1, 0, 1), (2, 1, 3), (1, 3, 10)]);
    }

    #[test]
    fn test_srtf_tie_keeps_running_process() {
        let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 2, 3)];
        let mut e = Engine::new(&specs, 1_000);
        run_preemptive(&mut e, &rules::ShortestRemaining).unwrap();
        assert_eq!(spans(e), vec![(1, 0, 5), (2, 5, 8)]);
    }

    #[test]
    fn test_srtf_tie_newcomer_with_lower_id_does_not_preempt() {
        let specs = vec![ProcessSpec::new(2, 0, 5), ProcessSpec::new(1, 2, 3)];
        let mut e = Engine::new(&specs, 1_000);
        run_preemptive(&mut e, &rules::ShortestRemaining).unwrap();
        assert_eq!(spans(e), vec![(2, 0, 5), (1, 5, 8)]);
    }

    #[test]
    fn test_priority_preemptive() {
        let mut e = Engine::new(&sample(), 1_000);
        run_preemptive(&mut e, &rules::HighestPriority).unwrap();
        // P2 (prio 1) preempts P1 at 2; P3 (prio 2) waits for P2, then beats P1.
        assert_eq!(
            spans(e),
            vec![(1, 0, 2), (2, 2, 5), (3, 5, 13), (1, 13, 16)]
        );
    }

    #[test]
    fn test_response_time_recorded_at_first_dispatch() {
        let specs = vec![ProcessSpec::new(1, 0, 8), ProcessSpec::new(2, 1, 2)];
        let mut e = Engine::new(&specs, 1_000);
        run_preemptive(&mut e, &rules::ShortestRemaining).unwrap();
        let out = e.finish();
        let p1 = out.completed.iter().find(|p| p.id == 1).unwrap();
        assert_eq!(p1.start_time, Some(0));
        assert_eq!(p1.completion_time, Some(10));
    }
}
