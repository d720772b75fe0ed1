//! Metrics Aggregator: per-process timings and schedule-wide averages.
//!
//! # Metrics Computed
//!
//! - **Turnaround**: `completion_time - arrival_time`
//! - **Waiting**: `turnaround - burst_time`
//! - **Response**: `start_time - arrival_time`
//! - **CPU utilization**: `100 * sum(burst_time) / max(completion_time)`
//!
//! Only finalized records are accepted. Nothing here mutates a record.

use std::fmt;

use serde::Serialize;

use crate::error::{Result, SchedError};
use crate::policy::Schedule;
use crate::process::Process;
use crate::types::{Pid, Time};

/// Timings of one completed process.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProcessMetrics {
    pub pid: Pid,
    pub waiting: Time,
    pub turnaround: Time,
    pub response: Time,
}

impl ProcessMetrics {
    /// Fails with `PreconditionViolation` if `p` never started or finished.
    pub fn of(p: &Process) -> Result<Self> {
        let (Some(start), Some(completion)) = (p.start_time(), p.completion_time()) else {
            return Err(SchedError::PreconditionViolation { pid: p.pid() });
        };
        let turnaround = completion - p.arrival_time();
        Ok(ProcessMetrics {
            pid: p.pid(),
            waiting: turnaround - p.burst_time(),
            turnaround,
            response: start - p.arrival_time(),
        })
    }
}

/// Summary of a completed schedule.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Metrics {
    pub avg_waiting_time: f64,
    pub avg_turnaround_time: f64,
    pub avg_response_time: f64,
    /// Percentage of the timeline (0 to the last completion) spent
    /// executing.
    pub cpu_utilization: f64,
    /// Latest completion time.
    pub makespan: Time,
    pub nr_processes: usize,
}

impl Metrics {
    /// Aggregate a completed sequence.
    ///
    /// Fails with `EmptySchedule` for an empty slice and with
    /// `PreconditionViolation` if any record is unfinished.
    pub fn from_processes(processes: &[Process]) -> Result<Self> {
        if processes.is_empty() {
            return Err(SchedError::EmptySchedule);
        }
        let timings = per_process(processes)?;

        let n = processes.len() as f64;
        // Sums are widened so long schedules cannot overflow.
        let mean = |f: fn(&ProcessMetrics) -> Time| -> f64 {
            timings.iter().map(|m| u128::from(f(m))).sum::<u128>() as f64 / n
        };
        let total_burst: u128 = processes
            .iter()
            .map(|p| u128::from(p.burst_time()))
            .sum();
        let makespan = processes
            .iter()
            .filter_map(Process::completion_time)
            .max()
            .unwrap_or(0);

        Ok(Metrics {
            avg_waiting_time: mean(|m| m.waiting),
            avg_turnaround_time: mean(|m| m.turnaround),
            avg_response_time: mean(|m| m.response),
            cpu_utilization: 100.0 * total_burst as f64 / makespan as f64,
            makespan,
            nr_processes: processes.len(),
        })
    }

    pub fn from_schedule(schedule: &Schedule) -> Result<Self> {
        Self::from_processes(schedule.completed())
    }
}

/// Per-process timings, in the order given.
pub fn per_process(processes: &[Process]) -> Result<Vec<ProcessMetrics>> {
    processes.iter().map(ProcessMetrics::of).collect()
}

impl fmt::Display for Metrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  Avg Waiting Time: {:.2}", self.avg_waiting_time)?;
        writeln!(f, "  Avg Turnaround Time: {:.2}", self.avg_turnaround_time)?;
        writeln!(f, "  Avg Response Time: {:.2}", self.avg_response_time)?;
        writeln!(f, "  Cpu Utilization: {:.2}", self.cpu_utilization)
    }
}
