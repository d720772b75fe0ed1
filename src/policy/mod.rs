//! Scheduling policies.
//!
//! Each policy is a pure function of its input: it copies the records,
//! simulates them on a private clock, and returns the completed sequence
//! together with the trace of what happened. Policies share no state, so
//! independent runs may be executed in any order or in parallel.

pub mod mlq;
pub mod priority;
pub mod rr;
pub mod sjf;

use std::fmt;

use crate::config::SimConfig;
use crate::error::Result;
use crate::process::Process;
use crate::trace::Trace;
use crate::types::Time;

pub use mlq::{multilevel_queue, ClockMode, MultilevelQueue};
pub use priority::{priority_scheduling, PriorityFcfs};
pub use rr::{round_robin, RoundRobin};
pub use sjf::{shortest_job_first, ShortestJobFirst};

/// A scheduling discipline.
pub trait Policy: Send + Sync {
    /// Human-readable name, used as the report heading.
    fn name(&self) -> &'static str;

    /// Simulate `processes` to completion. The input is never mutated.
    fn schedule(&self, processes: &[Process]) -> Result<Schedule>;
}

/// A finished run: every record completed, in completion order.
#[derive(Debug, Clone)]
pub struct Schedule {
    policy: &'static str,
    completed: Vec<Process>,
    trace: Trace,
}

impl Schedule {
    pub(crate) fn new(policy: &'static str, completed: Vec<Process>, trace: Trace) -> Self {
        Schedule {
            policy,
            completed,
            trace,
        }
    }

    /// Name of the policy that produced this schedule.
    pub fn policy(&self) -> &'static str {
        self.policy
    }

    pub fn completed(&self) -> &[Process] {
        &self.completed
    }

    pub fn trace(&self) -> &Trace {
        &self.trace
    }

    /// Latest completion time, or 0 for an empty schedule.
    pub fn makespan(&self) -> Time {
        self.completed
            .iter()
            .filter_map(Process::completion_time)
            .max()
            .unwrap_or(0)
    }

    pub fn into_completed(self) -> Vec<Process> {
        self.completed
    }
}

/// Selector for the built-in policies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PolicyKind {
    RoundRobin,
    ShortestJobFirst,
    Priority,
    MultilevelQueue,
}

impl PolicyKind {
    /// Every built-in policy, in report order.
    pub const ALL: [PolicyKind; 4] = [
        PolicyKind::RoundRobin,
        PolicyKind::ShortestJobFirst,
        PolicyKind::Priority,
        PolicyKind::MultilevelQueue,
    ];

    /// Instantiate the policy with the run parameters from `config`.
    pub fn build(self, config: &SimConfig) -> Result<Box<dyn Policy>> {
        let policy: Box<dyn Policy> = match self {
            PolicyKind::RoundRobin => Box::new(RoundRobin::new(config.time_quantum)?),
            PolicyKind::ShortestJobFirst => Box::new(ShortestJobFirst),
            PolicyKind::Priority => Box::new(PriorityFcfs),
            PolicyKind::MultilevelQueue => Box::new(
                MultilevelQueue::new(config.time_quantum)?.clock_mode(config.clock_mode),
            ),
        };
        Ok(policy)
    }
}

impl fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            PolicyKind::RoundRobin => rr::NAME,
            PolicyKind::ShortestJobFirst => sjf::NAME,
            PolicyKind::Priority => priority::NAME,
            PolicyKind::MultilevelQueue => mlq::NAME,
        };
        f.write_str(name)
    }
}

/// Run every policy in `kinds` on its own copy of `processes`.
pub fn run_policies(
    kinds: &[PolicyKind],
    processes: &[Process],
    config: &SimConfig,
) -> Result<Vec<Schedule>> {
    kinds
        .iter()
        .map(|kind| kind.build(config)?.schedule(processes))
        .collect()
}
