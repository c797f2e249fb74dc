//! Multilevel Queue.
//!
//! # Algorithm
//!
//! Each process is permanently assigned to one sub-queue. Sub-queues are
//! served in fixed order (lowest level first):
//!
//! 1. Admit arrivals into their own queue, in arrival order (ties by id).
//! 2. If a process from a lower queue is running and a higher queue is
//!    non-empty, preempt it: it goes back to the *front* of its queue and
//!    gets a fresh quantum when resumed. It is resumed before the queue's
//!    own discipline picks again, so a same-queue arrival cannot overtake it.
//! 3. Otherwise keep the running process, or pick from the highest
//!    non-empty queue using that queue's own discipline.
//! 4. Run until the next arrival, completion, or quantum expiry
//!    (Round Robin queues), whichever comes first.
//!
//! Lower queues run only while every higher queue is empty; continuous
//! high-priority work starves them.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3.5

use std::collections::VecDeque;

use tracing::debug;

use super::engine::Engine;
use super::policy::{MultilevelConfig, QueuePolicy};
use crate::dispatching::{dispatch_key, rules, DispatchingRule};
use crate::error::SimulationError;

/// The process holding the processor and how much of its quantum it used.
#[derive(Debug, Clone, Copy)]
struct Running {
    idx: usize,
    queue: usize,
    used: i64,
}

/// Position in `queue` of the best process under `rule`.
fn best_position<R: DispatchingRule>(engine: &Engine, queue: &VecDeque<usize>, rule: &R) -> usize {
    (0..queue.len())
        .min_by_key(|&pos| dispatch_key(rule, engine.process(queue[pos])))
        .unwrap_or(0)
}

/// Removes the next process to dispatch from a sub-queue.
///
/// A process interrupted by a higher queue sits at the front and is taken
/// first when `resume` is set.
fn take_next(
    engine: &Engine,
    queue: &mut VecDeque<usize>,
    policy: QueuePolicy,
    resume: bool,
) -> Option<usize> {
    let pos = match policy {
        _ if resume => 0,
        QueuePolicy::Fcfs | QueuePolicy::RoundRobin { .. } => 0,
        QueuePolicy::Sjf => best_position(engine, queue, &rules::ShortestRemaining),
        QueuePolicy::Priority => best_position(engine, queue, &rules::HighestPriority),
    };
    queue.remove(pos)
}

/// Admits processes with `arrival_time <= clock` into their home queues.
fn admit(engine: &Engine, home: &[usize], cursor: &mut usize, queues: &mut [VecDeque<usize>]) {
    while *cursor < engine.len() && engine.process(*cursor).arrival_time <= engine.clock() {
        queues[home[*cursor]].push_back(*cursor);
        *cursor += 1;
    }
}

/// Runs the process set under a validated multilevel configuration.
pub(crate) fn run_multilevel(
    engine: &mut Engine,
    config: &MultilevelConfig,
) -> Result<(), SimulationError> {
    let order = config.service_order();
    let mut rank = vec![0; order.len()];
    for (r, &q) in order.iter().enumerate() {
        rank[q] = r;
    }
    let home: Vec<usize> = (0..engine.len())
        .map(|i| config.queue_for(engine.process(i).id))
        .collect();

    let mut queues: Vec<VecDeque<usize>> = vec![VecDeque::new(); config.queues.len()];
    let mut interrupted = vec![false; config.queues.len()];
    let mut cursor = 0;
    let mut running: Option<Running> = None;

    while !engine.is_done() {
        admit(engine, &home, &mut cursor, &mut queues);

        let waiting_rank = order.iter().position(|&q| !queues[q].is_empty());
        if let Some(r) = running {
            if waiting_rank.is_some_and(|w| w < rank[r.queue]) {
                debug!(
                    clock = engine.clock(),
                    preempted = engine.process(r.idx).id,
                    queue = r.queue,
                    "higher queue preempts"
                );
                queues[r.queue].push_front(r.idx);
                interrupted[r.queue] = true;
                running = None;
            }
        }

        let current = match running.take() {
            Some(r) => r,
            None => {
                let Some(q) = order.iter().copied().find(|&q| !queues[q].is_empty()) else {
                    engine.idle_until_next_arrival()?;
                    continue;
                };
                let resume = std::mem::take(&mut interrupted[q]);
                let Some(idx) = take_next(engine, &mut queues[q], config.queues[q].policy, resume)
                else {
                    return Err(engine.invariant(format!("queue {q} reported work but was empty")));
                };
                Running { idx, queue: q, used: 0 }
            }
        };

        let quantum = match config.queues[current.queue].policy {
            QueuePolicy::RoundRobin { quantum } => Some(quantum),
            _ => None,
        };

        let mut budget = engine.process(current.idx).remaining_time;
        if let Some(quantum) = quantum {
            budget = budget.min(quantum - current.used);
        }
        if let Some(t) = engine.next_arrival() {
            budget = budget.min(t - engine.clock());
        }

        let finished = engine.execute(current.idx, budget)?;
        let used = current.used + budget;

        if finished {
            running = None;
        } else if quantum.is_some_and(|q| used >= q) {
            admit(engine, &home, &mut cursor, &mut queues);
            queues[current.queue].push_back(current.idx);
            running = None;
        } else {
            running = Some(Running { used, ..current });
        }
    }
    Ok(())
}
