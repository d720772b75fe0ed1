//! Priority scheduling: non-preemptive, first-come first-served within a
//! priority class.
//!
//! The run order is fixed up front by `(priority, arrival_time)` with
//! input order breaking remaining ties; lower numbers run first. The
//! clock then walks that order, idling whenever the next process in line
//! has not arrived yet. Nothing is re-ranked once the order is fixed, so
//! a later high-priority arrival does not overtake a lower-priority
//! process that is already next in line.

use tracing::debug;

use crate::engine::{Run, Simulation};
use crate::error::Result;
use crate::policy::{Policy, Schedule};
use crate::process::{check_unique_pids, Process};
use crate::types::Time;

pub(crate) const NAME: &str = "Priority";

/// Non-preemptive priority scheduling, FCFS within equal priority.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PriorityFcfs;

impl Policy for PriorityFcfs {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule> {
        check_unique_pids(processes)?;
        let run = simulate(processes, 0);
        Ok(Schedule::new(NAME, run.completed, run.trace))
    }
}

/// Priority scheduling over `processes`, returning the records in
/// completion order.
pub fn priority_scheduling(processes: &[Process]) -> Result<Vec<Process>> {
    Ok(PriorityFcfs.schedule(processes)?.into_completed())
}

pub(crate) fn simulate(processes: &[Process], origin: Time) -> Run {
    debug!(nr = processes.len(), origin, "priority");
    let mut sim = Simulation::new(processes, origin);

    for slot in sim.slots_by(|p| (p.priority(), p.arrival_time())) {
        let arrival = sim.process(slot).arrival_time();
        sim.idle_until(arrival);
        sim.run_to_completion(slot);
    }

    sim.finish()
}
