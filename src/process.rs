//! Process Record: the unit of work every policy reads and advances.
//!
//! The identifying fields (`pid`, `arrival_time`, `burst_time`,
//! `priority`) are fixed at construction. Run state (`remaining_time`,
//! `start_time`, `completion_time`) is only changed by the scheduling
//! engine through `dispatch`, `run_for` and `finish`, which hold the
//! record invariants at the update site.

use std::collections::HashSet;

use serde::Serialize;

use crate::error::{Result, SchedError};
use crate::types::{Pid, Time, MAX_TIME};

/// One schedulable process.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Process {
    pid: Pid,
    arrival_time: Time,
    burst_time: Time,
    priority: i64,
    remaining_time: Time,
    start_time: Option<Time>,
    completion_time: Option<Time>,
}

impl Process {
    /// Build a fresh record, rejecting values no policy can simulate.
    ///
    /// `priority` is kept raw: only the Multilevel Queue requires it to be
    /// one of 1, 2 or 3, and it checks that itself.
    pub fn new(pid: i64, arrival_time: i64, burst_time: i64, priority: i64) -> Result<Self> {
        let pid = u32::try_from(pid)
            .ok()
            .filter(|&p| p >= 1)
            .ok_or_else(|| SchedError::InvalidInput(format!("pid {pid} must be a positive integer")))?;
        let arrival_time = Time::try_from(arrival_time)
            .ok()
            .filter(|&t| t <= MAX_TIME)
            .ok_or_else(|| {
                SchedError::InvalidInput(format!(
                    "pid {pid}: arrival_time {arrival_time} must be in 0..={MAX_TIME}"
                ))
            })?;
        let burst_time = Time::try_from(burst_time)
            .ok()
            .filter(|&t| (1..=MAX_TIME).contains(&t))
            .ok_or_else(|| {
                SchedError::InvalidInput(format!(
                    "pid {pid}: burst_time {burst_time} must be in 1..={MAX_TIME}"
                ))
            })?;
        Ok(Process::from_valid(Pid(pid), arrival_time, burst_time, priority))
    }

    /// Build a fresh record from fields already known to be in range.
    pub(crate) fn from_valid(pid: Pid, arrival_time: Time, burst_time: Time, priority: i64) -> Self {
        debug_assert!(pid.0 >= 1 && burst_time >= 1);
        Process {
            pid,
            arrival_time,
            burst_time,
            priority,
            remaining_time: burst_time,
            start_time: None,
            completion_time: None,
        }
    }

    pub fn pid(&self) -> Pid {
        self.pid
    }

    pub fn arrival_time(&self) -> Time {
        self.arrival_time
    }

    pub fn burst_time(&self) -> Time {
        self.burst_time
    }

    pub fn priority(&self) -> i64 {
        self.priority
    }

    pub fn remaining_time(&self) -> Time {
        self.remaining_time
    }

    /// When the process was first dispatched, if ever.
    pub fn start_time(&self) -> Option<Time> {
        self.start_time
    }

    /// When the process finished, if it has.
    pub fn completion_time(&self) -> Option<Time> {
        self.completion_time
    }

    pub fn is_finished(&self) -> bool {
        self.completion_time.is_some()
    }

    /// A copy of this record with all run state discarded.
    pub fn pristine(&self) -> Process {
        Process {
            remaining_time: self.burst_time,
            start_time: None,
            completion_time: None,
            ..self.clone()
        }
    }

    /// Record a dispatch at `now`. Only the first dispatch sets `start_time`.
    pub(crate) fn dispatch(&mut self, now: Time) {
        debug_assert!(now >= self.arrival_time, "pid {} dispatched before arrival", self.pid);
        debug_assert!(!self.is_finished(), "pid {} dispatched after completion", self.pid);
        if self.start_time.is_none() {
            self.start_time = Some(now);
        }
    }

    /// Execute for at most `units`. Returns how many units actually ran.
    pub(crate) fn run_for(&mut self, units: Time) -> Time {
        let ran = units.min(self.remaining_time);
        self.remaining_time -= ran;
        ran
    }

    /// Mark completion at `now`. The record must have no work left.
    pub(crate) fn finish(&mut self, now: Time) {
        debug_assert_eq!(self.remaining_time, 0, "pid {} finished with work left", self.pid);
        debug_assert!(self.completion_time.is_none(), "pid {} finished twice", self.pid);
        debug_assert!(self.start_time.is_some_and(|s| s <= now));
        self.completion_time = Some(now);
    }
}

/// Reject process sets that reuse a pid; the completed sequence could not
/// otherwise be matched back to its input.
pub(crate) fn check_unique_pids(processes: &[Process]) -> Result<()> {
    let mut seen = HashSet::with_capacity(processes.len());
    for p in processes {
        if !seen.insert(p.pid) {
            return Err(SchedError::InvalidInput(format!("duplicate pid {}", p.pid)));
        }
    }
    Ok(())
}
