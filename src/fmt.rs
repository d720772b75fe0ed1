//! Rendering helpers for reports, Gantt charts and trace dumps.

use std::fmt;
use std::fmt::Write as _;

use serde::Serialize;

use crate::error::Result;
use crate::metrics::{per_process, Metrics, ProcessMetrics};
use crate::policy::Schedule;
use crate::trace::TraceKind;
use crate::types::Time;

/// Format a u64 with underscore grouping (groups of 3 from the right).
pub(crate) fn fmt_grouped(v: u64) -> String {
    let digits = v.to_string();
    let len = digits.len();
    if len <= 3 {
        return digits;
    }
    let mut result = String::with_capacity(len + (len - 1) / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            result.push('_');
        }
        result.push(ch);
    }
    result
}

/// Right-aligned, underscore-grouped simulated timestamp.
pub struct FmtTime(pub Time);

impl fmt::Display for FmtTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:>7}", fmt_grouped(self.0))
    }
}

/// Everything reported about one policy run.
#[derive(Debug, Clone, Serialize)]
pub struct PolicyReport {
    pub policy: &'static str,
    pub metrics: Metrics,
    pub processes: Vec<ProcessMetrics>,
}

impl PolicyReport {
    pub fn new(schedule: &Schedule) -> Result<Self> {
        Ok(PolicyReport {
            policy: schedule.policy(),
            metrics: Metrics::from_schedule(schedule)?,
            processes: per_process(schedule.completed())?,
        })
    }
}

/// Plain-text metrics report in the classic layout:
///
/// ```text
/// Performance Metrics:
///
/// Round Robin:
///   Avg Waiting Time: 4.20
///   ...
/// ```
pub fn render_text(reports: &[PolicyReport]) -> String {
    let mut out = String::from("\nPerformance Metrics:\n");
    for report in reports {
        let _ = write!(out, "\n{}:\n{}", report.policy, report.metrics);
    }
    out
}

/// One line per trace segment listing execution slices and idle gaps.
///
/// ```text
///   | P1 0..2 | P2 2..4 | idle 4..6 | P3 6..9 |
/// ```
pub fn render_gantt(schedule: &Schedule) -> String {
    let mut out = String::new();
    for segment in schedule.trace().segments() {
        let mut line = String::new();
        let mut label = None;
        for event in segment {
            match event.kind {
                TraceKind::TierStart { tier } => label = Some(tier),
                TraceKind::Dispatched { pid, slice } => {
                    let _ = write!(line, "| P{pid} {}..{} ", event.time, event.time + slice);
                }
                TraceKind::Idle { until } => {
                    let _ = write!(line, "| idle {}..{} ", event.time, until);
                }
                _ => {}
            }
        }
        if line.is_empty() {
            line.push_str("| (empty) ");
        }
        match label {
            Some(tier) => {
                let _ = writeln!(out, "  {tier}: {line}|");
            }
            None => {
                let _ = writeln!(out, "  {line}|");
            }
        }
    }
    out
}
