//! Timeline (solution) model.
//!
//! A timeline is the ordered sequence of execution intervals produced by
//! a simulation run: which process held the processor, and when. It is
//! the data a Gantt chart is drawn from.

use serde::{Deserialize, Serialize};

use super::ProcessId;

/// A half-open interval `[start, end)` during which one process ran.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutionInterval {
    /// Process that held the processor.
    pub process_id: ProcessId,
    /// Display label of that process.
    pub label: String,
    /// Start time.
    pub start: i64,
    /// End time (exclusive, always > start).
    pub end: i64,
}

impl ExecutionInterval {
    /// Creates a new interval.
    pub fn new(process_id: ProcessId, label: impl Into<String>, start: i64, end: i64) -> Self {
        Self {
            process_id,
            label: label.into(),
            start,
            end,
        }
    }

    /// Length of the interval.
    #[inline]
    pub fn duration(&self) -> i64 {
        self.end - self.start
    }
}

/// Ordered, non-overlapping execution intervals.
///
/// [`Timeline::push`] merges an interval into the previous one when both
/// belong to the same process and are adjacent in time, so a process
/// that runs uninterrupted always appears as a single interval.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Timeline {
    intervals: Vec<ExecutionInterval>,
}

impl Timeline {
    /// Creates an empty timeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends an interval, merging it with the last one if contiguous.
    ///
    /// Empty intervals (`end <= start`) are ignored.
    pub fn push(&mut self, interval: ExecutionInterval) {
        if interval.end <= interval.start {
            return;
        }
        if let Some(last) = self.intervals.last_mut() {
            if last.process_id == interval.process_id && last.end == interval.start {
                last.end = interval.end;
                return;
            }
        }
        self.intervals.push(interval);
    }

    /// All intervals, in start-time order.
    pub fn intervals(&self) -> &[ExecutionInterval] {
        &self.intervals
    }

    /// Iterates over the intervals.
    pub fn iter(&self) -> std::slice::Iter<'_, ExecutionInterval> {
        self.intervals.iter()
    }

    /// Number of intervals.
    pub fn len(&self) -> usize {
        self.intervals.len()
    }

    /// Whether the timeline has no intervals.
    pub fn is_empty(&self) -> bool {
        self.intervals.is_empty()
    }

    /// Total CPU time across all intervals.
    pub fn busy_time(&self) -> i64 {
        self.intervals.iter().map(|i| i.duration()).sum()
    }

    /// End of the last interval, or 0 for an empty timeline.
    pub fn makespan(&self) -> i64 {
        self.intervals.last().map_or(0, |i| i.end)
    }

    /// Returns all intervals for a given process.
    pub fn intervals_for_process(&self, process_id: ProcessId) -> Vec<&ExecutionInterval> {
        self.intervals
            .iter()
            .filter(|i| i.process_id == process_id)
            .collect()
    }

    /// The process running during `[time, time + 1)`, if any.
    pub fn process_at(&self, time: i64) -> Option<&ExecutionInterval> {
        self.intervals
            .iter()
            .find(|i| i.start <= time && time < i.end)
    }

    /// Consumes the timeline, returning its intervals.
    pub fn into_intervals(self) -> Vec<ExecutionInterval> {
        self.intervals
    }
}

impl<'a> IntoIterator for &'a Timeline {
    type Item = &'a ExecutionInterval;
    type IntoIter = std::slice::Iter<'a, ExecutionInterval>;

    fn into_iter(self) -> Self::IntoIter {
        self.intervals.iter()
    }
}
