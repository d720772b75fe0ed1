//! Multilevel Queue: three fixed tiers, one single-queue policy each.
//!
//! Records are partitioned by priority class: priority 1 runs Round
//! Robin, priority 2 runs Shortest Job First, priority 3 runs Priority
//! scheduling. Tiers are simulated one after another as independent
//! batches and their completed sequences are concatenated in tier order.
//! There is no preemption across tiers.

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{Result, SchedError};
use crate::policy::{priority, rr, sjf, Policy, Schedule};
use crate::process::{check_unique_pids, Process};
use crate::trace::{Trace, TraceKind};
use crate::types::{Tier, Time};

pub(crate) const NAME: &str = "Multilevel Queue";

/// How the tiers' clocks relate to each other.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    /// Every tier simulates on its own clock starting at 0. Metrics over
    /// the concatenated result then mix independently timed tiers, and
    /// utilization can exceed 100%.
    #[default]
    Isolated,
    /// One CPU drains the tiers back to back: each tier's clock starts
    /// where the previous tier's last process finished.
    Shared,
}

/// Three-tier Multilevel Queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MultilevelQueue {
    quantum: Time,
    clock_mode: ClockMode,
}

impl MultilevelQueue {
    /// `quantum` is the Round Robin quantum of the top tier.
    pub fn new(quantum: Time) -> Result<Self> {
        // Validates the quantum the same way the top tier would.
        rr::RoundRobin::new(quantum)?;
        Ok(MultilevelQueue {
            quantum,
            clock_mode: ClockMode::default(),
        })
    }

    pub fn clock_mode(mut self, mode: ClockMode) -> Self {
        self.clock_mode = mode;
        self
    }
}

impl Policy for MultilevelQueue {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule> {
        check_unique_pids(processes)?;
        let tiers = partition(processes)?;

        let mut completed = Vec::with_capacity(processes.len());
        let mut trace = Trace::new();
        let mut finished_at: Time = 0;

        for tier in Tier::ALL {
            let group = &tiers[tier.index()];
            let origin = match self.clock_mode {
                ClockMode::Isolated => 0,
                ClockMode::Shared => finished_at,
            };
            trace.record(origin, TraceKind::TierStart { tier });

            let run = match tier {
                Tier::Top => rr::simulate(group, self.quantum, origin),
                Tier::Middle => sjf::simulate(group, origin),
                Tier::Bottom => priority::simulate(group, origin),
            };
            info!(tier = %tier, nr = group.len(), origin, end = run.clock, "TIER DONE");

            finished_at = run.clock;
            completed.extend(run.completed);
            trace.append(run.trace);
        }

        Ok(Schedule::new(NAME, completed, trace))
    }
}

/// Multilevel Queue with per-tier clocks over `processes`, returning
/// tier 1 results, then tier 2, then tier 3.
pub fn multilevel_queue(processes: &[Process], quantum: Time) -> Result<Vec<Process>> {
    Ok(MultilevelQueue::new(quantum)?
        .schedule(processes)?
        .into_completed())
}

/// Split `processes` by tier, keeping input order inside each tier.
/// Fails before anything is simulated if any priority has no tier.
fn partition(processes: &[Process]) -> Result<[Vec<Process>; 3]> {
    let mut tiers: [Vec<Process>; 3] = Default::default();
    for p in processes {
        let tier = Tier::from_priority(p.priority()).ok_or_else(|| {
            SchedError::InvalidInput(format!(
                "pid {}: priority {} has no queue level (expected 1, 2 or 3)",
                p.pid(),
                p.priority()
            ))
        })?;
        tiers[tier.index()].push(p.clone());
    }
    Ok(tiers)
}
