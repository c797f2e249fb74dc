//! Round Robin.
//!
//! # Algorithm
//!
//! 1. Admit every process whose arrival time has passed into a FIFO ready
//!    queue, in arrival order (ties by id).
//! 2. Dispatch the front process for `min(quantum, remaining)` units.
//! 3. Admit processes that arrived during the slice, *then* re-append the
//!    dispatched process to the back if it has work left.
//! 4. If the queue is empty, jump the clock to the next arrival.
//!
//! A process alone in the queue is re-dispatched immediately; the timeline
//! merges its consecutive slices.

use std::collections::VecDeque;

use super::engine::Engine;
use crate::error::SimulationError;

/// Admits processes with `arrival_time <= clock`, starting at `*cursor`.
///
/// Relies on the engine's arrival ordering.
fn admit(engine: &Engine, cursor: &mut usize, queue: &mut VecDeque<usize>) {
    while *cursor < engine.len() && engine.process(*cursor).arrival_time <= engine.clock() {
        queue.push_back(*cursor);
        *cursor += 1;
    }
}

/// Runs the process set under Round Robin with a positive `quantum`.
pub(crate) fn run_round_robin(engine: &mut Engine, quantum: i64) -> Result<(), SimulationError> {
    let mut queue = VecDeque::with_capacity(engine.len());
    let mut cursor = 0;

    while !engine.is_done() {
        admit(engine, &mut cursor, &mut queue);

        let Some(idx) = queue.pop_front() else {
            engine.idle_until_next_arrival()?;
            continue;
        };

        let finished = engine.execute(idx, quantum)?;

        admit(engine, &mut cursor, &mut queue);
        if !finished {
            queue.push_back(idx);
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    fn spans(engine: Engine) -> Vec<(u32, i64, i64)> {
        engine
            .finish()
            .timeline
            .iter()
            .map(|i| (i.process_id, i.start, i.end))
            .collect()
    }

    #[test]
    fn test_requeue_at_back() {
        let specs = vec![ProcessSpec::new(1, 0, 5), ProcessSpec::new(2, 1, 3)];
        let mut e = Engine::new(&specs, 1_000);
        run_round_robin(&mut e, 2).unwrap();
        assert_eq!(e.clock(), 8);
        assert_eq!(
            spans(e),
            vec![(1, 0, 2), (2, 2, 4), (1, 4, 6), (2, 6, 7), (1, 7, 8)]
        );
    }

    #[test]
    fn test_arrivals_during_slice_go_before_requeued() {
        // P2 and P3 both arrive while P1 holds the processor.
        let specs = vec![
            ProcessSpec::new(1, 0, 4),
            ProcessSpec::new(2, 1, 2),
            ProcessSpec::new(3, 3, 2),
        ];
        let mut e = Engine::new(&specs, 1_000);
        run_round_robin(&mut e, 3).unwrap();
        assert_eq!(spans(e), vec![(1, 0, 3), (2, 3, 5), (3, 5, 7), (1, 7, 8)]);
    }

    #[test]
    fn test_single_process_is_merged() {
        let specs = vec![ProcessSpec::new(1, 0, 7)];
        let mut e = Engine::new(&specs, 1_000);
        run_round_robin(&mut e, 2).unwrap();
        assert_eq!(spans(e), vec![(1, 0, 7)]);
    }

    #[test]
    fn test_idle_until_arrival() {
        let specs = vec![ProcessSpec::new(1, 2, 1), ProcessSpec::new(2, 10, 3)];
        let mut e = Engine::new(&specs, 1_000);
        run_round_robin(&mut e, 2).unwrap();
        assert_eq!(spans(e), vec![(1, 2, 3), (2, 10, 13)]);
    }

    #[test]
    fn test_simultaneous_arrivals_by_id() {
        let specs = vec![
            ProcessSpec::new(3, 0, 2),
            ProcessSpec::new(1, 0, 2),
            ProcessSpec::new(2, 0, 2),
        ];
        let mut e = Engine::new(&specs, 1_000);
        run_round_robin(&mut e, 1).unwrap();
        let order: Vec<u32> = spans(e).iter().map(|s| s.0).collect();
        assert_eq!(order, vec![1, 2, 3, 1, 2, 3]);
    }
}
