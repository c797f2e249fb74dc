//! Dispatching rules for CPU scheduling.
//!
//! A dispatching rule scores a ready process; the scheduler dispatches
//! the process with the lowest score. Equal scores are always broken by
//! the lowest process id, so selection never depends on iteration order.
//!
//! # Usage
//!
//! ```
//! use u_cpusched::dispatching::{rules, select_best};
//! use u_cpusched::models::{ProcessRunState, ProcessSpec};
//!
//! let ready = vec![
//!     ProcessRunState::from_spec(&ProcessSpec::new(2, 0, 3)),
//!     ProcessRunState::from_spec(&ProcessSpec::new(1, 0, 8)),
//! ];
//! let best = select_best(&rules::ShortestRemaining, &ready, 0..ready.len());
//! assert_eq!(best, Some(0));
//! ```
//!
//! # References
//!
//! - Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.3
//! - Pinedo (2016), "Scheduling: Theory, Algorithms, and Systems", Ch. 4

pub mod rules;

use std::fmt::Debug;

use crate::models::ProcessRunState;

/// Score returned by a dispatching rule.
///
/// Lower scores = dispatched first.
pub type RuleScore = i64;

/// A rule that orders ready processes.
///
/// # Score Convention
/// **Lower score = higher priority.** Rules return smaller values for
/// processes that should run first. Ties are broken by the caller using
/// the process id.
pub trait DispatchingRule: Send + Sync + Debug {
    /// Rule name (e.g., "SRT").
    fn name(&self) -> &'static str;

    /// Scores a process.
    fn evaluate(&self, process: &ProcessRunState) -> RuleScore;

    /// Rule description.
    fn description(&self) -> &'static str {
        self.name()
    }
}

/// Selection key: rule score, then process id.
#[inline]
pub fn dispatch_key<R: DispatchingRule + ?Sized>(
    rule: &R,
    process: &ProcessRunState,
) -> (RuleScore, u32) {
    (rule.evaluate(process), process.id)
}

/// Returns the index of the best candidate under `rule`.
///
/// `candidates` are indices into `processes`. Returns `None` if there are
/// no candidates.
pub fn select_best<R, I>(rule: &R, processes: &[ProcessRunState], candidates: I) -> Option<usize>
where
    R: DispatchingRule + ?Sized,
    I: IntoIterator<Item = usize>,
{
    candidates
        .into_iter()
        .min_by_key(|&i| dispatch_key(rule, &processes[i]))
}

/// Whether `challenger` should preempt `incumbent` under `rule`.
///
/// Only a strictly better score preempts; on equal scores the running
/// process keeps the processor.
#[inline]
pub fn preempts<R: DispatchingRule + ?Sized>(
    rule: &R,
    challenger: &ProcessRunState,
    incumbent: &ProcessRunState,
) -> bool {
    rule.evaluate(challenger) < rule.evaluate(incumbent)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    fn state(id: u32, arrival: i64, burst: i64, priority: i32) -> ProcessRunState {
        ProcessRunState::from_spec(&ProcessSpec::new(id, arrival, burst).with_priority(priority))
    }

    #[test]
    fn test_select_shortest() {
        let ps = vec![state(1, 0, 5, 1), state(2, 0, 1, 1), state(3, 0, 3, 1)];
        assert_eq!(select_best(&rules::ShortestRemaining, &ps, 0..3), Some(1));
    }

    #[test]
    fn test_tie_broken_by_lowest_id() {
        let ps = vec![state(9, 0, 2, 1), state(4, 0, 2, 1), state(7, 0, 2, 1)];
        assert_eq!(select_best(&rules::ShortestRemaining, &ps, 0..3), Some(1));
    }

    #[test]
    fn test_candidates_subset() {
        let ps = vec![state(1, 0, 1, 1), state(2, 0, 4, 1), state(3, 0, 3, 1)];
        assert_eq!(select_best(&rules::ShortestRemaining, &ps, [1, 2]), Some(2));
    }

    #[test]
    fn test_no_candidates() {
        let ps = vec![state(1, 0, 1, 1)];
        assert_eq!(select_best(&rules::ShortestRemaining, &ps, std::iter::empty()), None);
    }

    #[test]
    fn test_preempts_only_when_strictly_better() {
        let running = state(1, 0, 3, 2);
        let same = state(2, 2, 3, 2);
        let shorter = state(3, 2, 2, 2);

        assert!(!preempts(&rules::ShortestRemaining, &same, &running));
        assert!(preempts(&rules::ShortestRemaining, &shorter, &running));
    }

    #[test]
    fn test_dyn_rule() {
        let rule: Box<dyn DispatchingRule> = Box::new(rules::HighestPriority);
        let ps = vec![state(1, 0, 1, 5), state(2, 0, 1, 2)];
        assert_eq!(select_best(rule.as_ref(), &ps, 0..2), Some(1));
    }
}
