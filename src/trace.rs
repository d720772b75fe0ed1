//! Trace event recording for scheduler runs.
//!
//! Every scheduling action (admission, dispatch, preemption, completion,
//! idle gap) is recorded as a `TraceEvent` stamped with the simulated
//! clock at which it happened. Multilevel Queue runs concatenate one
//! segment per tier, each opened by a `TierStart` marker.

use crate::fmt::FmtTime;
use crate::types::{Pid, Tier, Time};

/// A single trace event produced by a scheduler run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TraceEvent {
    /// Simulated time when this event occurred.
    pub time: Time,
    /// The kind of event.
    pub kind: TraceKind,
}

/// The type of scheduling event recorded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TraceKind {
    /// A Multilevel Queue tier begins simulating.
    TierStart { tier: Tier },
    /// A process arrived and entered the ready queue.
    Admitted { pid: Pid },
    /// A process got the CPU for `slice` ticks starting at the event time.
    Dispatched { pid: Pid, slice: Time },
    /// A process used its slice with work left and went back to the queue.
    Preempted { pid: Pid },
    /// A process finished.
    Completed { pid: Pid },
    /// Nothing was runnable; the CPU sat idle until `until`.
    Idle { until: Time },
}

/// A contiguous stretch of execution, derived from a `Dispatched` event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Slice {
    pub pid: Pid,
    pub start: Time,
    pub end: Time,
}

/// A complete run trace, containing all events in recording order.
#[derive(Debug, Clone, Default)]
pub struct Trace {
    events: Vec<TraceEvent>,
}

impl Trace {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn record(&mut self, time: Time, kind: TraceKind) {
        self.events.push(TraceEvent { time, kind });
    }

    /// Append another run's events after this one's.
    pub(crate) fn append(&mut self, mut other: Trace) {
        self.events.append(&mut other.events);
    }

    /// Get all events in recording order.
    pub fn events(&self) -> &[TraceEvent] {
        &self.events
    }

    /// All execution slices, in dispatch order.
    pub fn slices(&self) -> Vec<Slice> {
        self.events
            .iter()
            .filter_map(|e| match e.kind {
                TraceKind::Dispatched { pid, slice } => Some(Slice {
                    pid,
                    start: e.time,
                    end: e.time + slice,
                }),
                _ => None,
            })
            .collect()
    }

    /// Total ticks of CPU time given to `pid`.
    pub fn total_runtime(&self, pid: Pid) -> Time {
        self.slices()
            .iter()
            .filter(|s| s.pid == pid)
            .map(|s| s.end - s.start)
            .sum()
    }

    /// Number of times `pid` was dispatched.
    pub fn dispatch_count(&self, pid: Pid) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, TraceKind::Dispatched { pid: p, .. } if p == pid))
            .count()
    }

    /// Number of times `pid` was preempted at the end of its quantum.
    pub fn preempt_count(&self, pid: Pid) -> usize {
        self.events
            .iter()
            .filter(|e| matches!(e.kind, TraceKind::Preempted { pid: p } if p == pid))
            .count()
    }

    /// Total idle ticks across all segments.
    pub fn idle_time(&self) -> Time {
        self.events
            .iter()
            .filter_map(|e| match e.kind {
                TraceKind::Idle { until } => Some(until - e.time),
                _ => None,
            })
            .sum()
    }

    /// Split the trace at each `TierStart`. Single-queue runs have exactly
    /// one segment. Each segment runs on its own clock.
    pub fn segments(&self) -> Vec<&[TraceEvent]> {
        let mut segments = Vec::new();
        let mut begin = 0;
        for (i, e) in self.events.iter().enumerate() {
            if matches!(e.kind, TraceKind::TierStart { .. }) && i > begin {
                segments.push(&self.events[begin..i]);
                begin = i;
            }
        }
        if begin < self.events.len() {
            segments.push(&self.events[begin..]);
        }
        segments
    }

    /// Whether the clock never runs backwards within any segment.
    pub fn is_monotonic(&self) -> bool {
        self.segments()
            .iter()
            .all(|seg| seg.windows(2).all(|w| w[0].time <= w[1].time))
    }

    /// Print all events to stderr.
    pub fn dump(&self) {
        for event in &self.events {
            let desc = match event.kind {
                TraceKind::TierStart { tier } => format!("TIER     {tier}"),
                TraceKind::Admitted { pid } => format!("ADMIT    pid={pid}"),
                TraceKind::Dispatched { pid, slice } => {
                    format!("DISPATCH pid={pid} slice={slice}")
                }
                TraceKind::Preempted { pid } => format!("PREEMPT  pid={pid}"),
                TraceKind::Completed { pid } => format!("COMPLETE pid={pid}"),
                TraceKind::Idle { until } => format!("IDLE     until={until}"),
            };
            eprintln!("[{}] {}", FmtTime(event.time), desc);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Trace {
        let mut t = Trace::new();
        t.record(0, TraceKind::Idle { until: 2 });
        t.record(2, TraceKind::Admitted { pid: Pid(1) });
        t.record(2, TraceKind::Dispatched { pid: Pid(1), slice: 3 });
        t.record(5, TraceKind::Preempted { pid: Pid(1) });
        t.record(5, TraceKind::Dispatched { pid: Pid(1), slice: 1 });
        t.record(6, TraceKind::Completed { pid: Pid(1) });
        t
    }

    #[test]
    fn test_runtime_and_counts() {
        let t = sample();
        assert_eq!(t.total_runtime(Pid(1)), 4);
        assert_eq!(t.total_runtime(Pid(2)), 0);
        assert_eq!(t.dispatch_count(Pid(1)), 2);
        assert_eq!(t.preempt_count(Pid(1)), 1);
        assert_eq!(t.idle_time(), 2);
        assert_eq!(
            t.slices(),
            vec![
                Slice { pid: Pid(1), start: 2, end: 5 },
                Slice { pid: Pid(1), start: 5, end: 6 },
            ]
        );
    }

    #[test]
    fn test_segments_split_at_tier_start() {
        let mut t = Trace::new();
        t.record(0, TraceKind::TierStart { tier: Tier::Top });
        t.record(0, TraceKind::Dispatched { pid: Pid(1), slice: 4 });
        t.record(4, TraceKind::Completed { pid: Pid(1) });
        t.record(0, TraceKind::TierStart { tier: Tier::Middle });
        t.record(0, TraceKind::Dispatched { pid: Pid(2), slice: 1 });
        t.record(1, TraceKind::Completed { pid: Pid(2) });

        let segs = t.segments();
        assert_eq!(segs.len(), 2);
        assert_eq!(segs[0].len(), 3);
        assert_eq!(segs[1].len(), 3);
        assert!(t.is_monotonic(), "each tier restarts its own clock");
    }

    #[test]
    fn test_non_monotonic_detected() {
        let mut t = Trace::new();
        t.record(5, TraceKind::Completed { pid: Pid(1) });
        t.record(3, TraceKind::Completed { pid: Pid(2) });
        assert!(!t.is_monotonic());
    }

    #[test]
    fn test_empty_trace() {
        let t = Trace::new();
        assert!(t.segments().is_empty());
        assert!(t.is_monotonic());
        assert_eq!(t.idle_time(), 0);
    }
}
