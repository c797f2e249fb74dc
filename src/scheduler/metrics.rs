//! Run performance metrics.
//!
//! Computes standard CPU scheduling indicators from the completed
//! processes of a run and its final clock.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Turnaround | completion − arrival |
//! | Waiting | turnaround − burst |
//! | Response | first dispatch − arrival |
//! | CPU Utilization | Σ burst / final clock × 100 |
//! | Throughput | completed count / final clock |
//!
//! Averages keep full precision; [`Metrics::rounded`] applies a single
//! rounding rule (half away from zero, 2 decimals) for display. Every metric
//! is a ratio of integers, so rounding is done on the exact ratio rather than
//! on its binary approximation.
//!
//! # Reference
//! Silberschatz et al. (2018), "Operating System Concepts", Ch. 5.2: Scheduling Criteria

use serde::{Deserialize, Serialize};

use crate::models::{ProcessId, ProcessRunState};

/// Aggregate run metrics. All times are in simulated time units.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Metrics {
    /// Mean waiting time.
    pub average_waiting_time: f64,
    /// Mean turnaround time.
    pub average_turnaround_time: f64,
    /// Mean response time.
    pub average_response_time: f64,
    /// Busy share of the elapsed time, in percent.
    pub cpu_utilization: f64,
    /// Completed processes per time unit.
    pub throughput: f64,
    /// Exact ratios behind the values above, when computed from a run.
    #[serde(skip)]
    exact: Option<ExactRatios>,
}

/// Integer numerator / denominator of each metric.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ExactRatios {
    waiting: (i128, i128),
    turnaround: (i128, i128),
    response: (i128, i128),
    utilization: (i128, i128),
    throughput: (i128, i128),
}

/// Per-process timing of a completed process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProcessMetrics {
    /// Process identifier.
    pub id: ProcessId,
    /// Display label.
    pub label: String,
    /// Completion − arrival.
    pub turnaround_time: i64,
    /// Turnaround − burst.
    pub waiting_time: i64,
    /// First dispatch − arrival.
    pub response_time: i64,
}

impl ProcessMetrics {
    /// Timing of a run state, or `None` if it has not completed.
    pub fn from_state(state: &ProcessRunState) -> Option<Self> {
        Some(Self {
            id: state.id,
            label: state.label.clone(),
            turnaround_time: state.turnaround_time()?,
            waiting_time: state.waiting_time()?,
            response_time: state.response_time()?,
        })
    }
}

/// Rounds half away from zero to 2 decimal places.
///
/// A scaled value within a few ulps of a half is treated as that half, so
/// decimal ties such as `0.285` or `1.005` round up even though their
/// binary approximation sits just below the tie.
pub fn round2(value: f64) -> f64 {
    let scaled = value * 100.0;
    let half = (scaled * 2.0).round() / 2.0;
    let tolerance = 4.0 * f64::EPSILON * scaled.abs().max(1.0);
    let snapped = if (scaled - half).abs() <= tolerance {
        half
    } else {
        scaled
    };
    snapped.round() / 100.0
}

/// Rounds `numerator / denominator` half away from zero to 2 decimal places
/// using integer arithmetic. A zero denominator yields `0.0`.
pub fn round_ratio(numerator: i128, denominator: i128) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let (numerator, denominator) = if denominator < 0 {
        (-numerator, -denominator)
    } else {
        (numerator, denominator)
    };
    let scaled = numerator * 100;
    let mut hundredths = scaled / denominator;
    if 2 * (scaled % denominator).abs() >= denominator {
        hundredths += scaled.signum();
    }
    hundredths as f64 / 100.0
}

impl Metrics {
    /// Computes metrics from completed processes and the final clock.
    ///
    /// Returns all zeros if nothing completed or the clock never moved.
    /// Processes without a completion record are skipped.
    pub fn calculate(completed: &[ProcessRunState], final_clock: i64) -> Self {
        let per_process: Vec<ProcessMetrics> = completed
            .iter()
            .filter_map(ProcessMetrics::from_state)
            .collect();

        if per_process.is_empty() || final_clock <= 0 {
            return Self::default();
        }

        let count = per_process.len() as i128;
        let total_waiting: i128 = per_process.iter().map(|p| i128::from(p.waiting_time)).sum();
        let total_turnaround: i128 = per_process
            .iter()
            .map(|p| i128::from(p.turnaround_time))
            .sum();
        let total_response: i128 = per_process.iter().map(|p| i128::from(p.response_time)).sum();
        let total_burst: i128 = completed
            .iter()
            .filter(|p| p.completion_time.is_some())
            .map(|p| i128::from(p.burst_time))
            .sum();
        let elapsed = i128::from(final_clock);

        let exact = ExactRatios {
            waiting: (total_waiting, count),
            turnaround: (total_turnaround, count),
            response: (total_response, count),
            utilization: (total_burst * 100, elapsed),
            throughput: (count, elapsed),
        };
        let ratio = |(num, den): (i128, i128)| num as f64 / den as f64;

        Self {
            average_waiting_time: ratio(exact.waiting),
            average_turnaround_time: ratio(exact.turnaround),
            average_response_time: ratio(exact.response),
            cpu_utilization: ratio(exact.utilization),
            throughput: ratio(exact.throughput),
            exact: Some(exact),
        }
    }

    /// Copy rounded for display (half away from zero, 2 decimals).
    ///
    /// Metrics computed by [`Metrics::calculate`] are rounded from their
    /// exact ratios; deserialized values fall back to [`round2`].
    pub fn rounded(&self) -> Self {
        match self.exact {
            Some(exact) => Self {
                average_waiting_time: round_ratio(exact.waiting.0, exact.waiting.1),
                average_turnaround_time: round_ratio(exact.turnaround.0, exact.turnaround.1),
                average_response_time: round_ratio(exact.response.0, exact.response.1),
                cpu_utilization: round_ratio(exact.utilization.0, exact.utilization.1),
                throughput: round_ratio(exact.throughput.0, exact.throughput.1),
                exact: None,
            },
            None => Self {
                average_waiting_time: round2(self.average_waiting_time),
                average_turnaround_time: round2(self.average_turnaround_time),
                average_response_time: round2(self.average_response_time),
                cpu_utilization: round2(self.cpu_utilization),
                throughput: round2(self.throughput),
                exact: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ProcessSpec;

    fn completed(id: u32, arrival: i64, burst: i64, start: i64, end: i64) -> ProcessRunState {
        let mut s = ProcessRunState::from_spec(&ProcessSpec::new(id, arrival, burst));
        s.start_time = Some(start);
        s.completion_time = Some(end);
        s.remaining_time = 0;
        s.completed = true;
        s
    }

    fn fcfs_sample() -> Vec<ProcessRunState> {
        vec![
            completed(1, 0, 5, 0, 5),
            completed(2, 2, 3, 5, 8),
            completed(3, 4, 8, 8, 16),
        ]
    }

    #[test]
    fn test_metrics_basic() {
        let m = Metrics::calculate(&fcfs_sample(), 16);
        // waiting: 0, 3, 4
        assert!((m.average_waiting_time - 7.0 / 3.0).abs() < 1e-10);
        // turnaround: 5, 6, 12
        assert!((m.average_turnaround_time - 23.0 / 3.0).abs() < 1e-10);
        assert!((m.average_response_time - 7.0 / 3.0).abs() < 1e-10);
        assert!((m.cpu_utilization - 100.0).abs() < 1e-10);
        assert!((m.throughput - 3.0 / 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_rounded() {
        let m = Metrics::calculate(&fcfs_sample(), 16).rounded();
        assert_eq!(m.average_waiting_time, 2.33);
        assert_eq!(m.average_turnaround_time, 7.67);
        assert_eq!(m.cpu_utilization, 100.0);
        assert_eq!(m.throughput, 0.19);
    }

    #[test]
    fn test_utilization_with_idle() {
        let ps = vec![completed(1, 2, 3, 2, 5)];
        let m = Metrics::calculate(&ps, 5);
        assert!((m.cpu_utilization - 60.0).abs() < 1e-10);
    }

    #[test]
    fn test_metrics_empty() {
        assert_eq!(Metrics::calculate(&[], 0), Metrics::default());
        assert_eq!(Metrics::calculate(&[], 10), Metrics::default());
    }

    #[test]
    fn test_zero_clock_guard() {
        let m = Metrics::calculate(&fcfs_sample(), 0);
        assert_eq!(m, Metrics::default());
        assert!(!m.throughput.is_nan());
    }

    #[test]
    fn test_incomplete_processes_skipped() {
        let mut ps = fcfs_sample();
        ps.push(ProcessRunState::from_spec(&ProcessSpec::new(4, 0, 9)));
        let m = Metrics::calculate(&ps, 16);
        assert!((m.cpu_utilization - 100.0).abs() < 1e-10);
        assert!((m.throughput - 3.0 / 16.0).abs() < 1e-10);
    }

    #[test]
    fn test_round2_half_away_from_zero() {
        assert_eq!(round2(0.125), 0.13);
        assert_eq!(round2(-0.125), -0.13);
        assert_eq!(round2(2.0 / 3.0), 0.67);
    }

    #[test]
    fn test_round2_decimal_ties() {
        assert_eq!(round2(57.0 / 200.0), 0.29);
        assert_eq!(round2(201.0 / 200.0), 1.01);
        assert_eq!(round2(-57.0 / 200.0), -0.29);
        assert_eq!(round2(0.2849), 0.28);
    }

    #[test]
    fn test_round_ratio() {
        assert_eq!(round_ratio(57, 200), 0.29);
        assert_eq!(round_ratio(201, 200), 1.01);
        assert_eq!(round_ratio(-57, 200), -0.29);
        assert_eq!(round_ratio(57, -200), -0.29);
        assert_eq!(round_ratio(7, 3), 2.33);
        assert_eq!(round_ratio(2849, 10_000), 0.28);
        assert_eq!(round_ratio(5, 0), 0.0);
    }

    #[test]
    fn test_rounded_uses_exact_ratio() {
        // Busy 57 of 20000 units: utilization is exactly 0.285 percent.
        let m = Metrics::calculate(&[completed(1, 19_943, 57, 19_943, 20_000)], 20_000);
        assert_eq!(m.rounded().cpu_utilization, 0.29);

        // 200 processes whose waiting times sum to 201: average 1.005.
        let mut ps: Vec<ProcessRunState> = (1..=200)
            .map(|id| completed(id, 0, 1, 0, 1))
            .collect();
        ps[0] = completed(1, 0, 1, 201, 202);
        let m = Metrics::calculate(&ps, 202);
        assert_eq!(m.rounded().average_waiting_time, 1.01);
    }

    #[test]
    fn test_rounded_after_deserialize() {
        let m = Metrics::calculate(&fcfs_sample(), 16);
        let json = serde_json::to_string(&m).unwrap();
        assert!(!json.contains("exact"));
        let back: Metrics = serde_json::from_str(&json).unwrap();
        assert_eq!(back.rounded(), m.rounded());
    }

    #[test]
    fn test_process_metrics() {
        let pm = ProcessMetrics::from_state(&completed(2, 2, 3, 5, 8)).unwrap();
        assert_eq!(pm.turnaround_time, 6);
        assert_eq!(pm.waiting_time, 3);
        assert_eq!(pm.response_time, 3);
        assert!(ProcessMetrics::from_state(&ProcessRunState::from_spec(&ProcessSpec::new(
            1, 0, 1
        )))
        .is_none());
    }
}
