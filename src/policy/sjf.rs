//! Shortest Job First, non-preemptive.

use tracing::debug;

use crate::engine::{Run, Simulation};
use crate::error::Result;
use crate::policy::{Policy, Schedule};
use crate::process::{check_unique_pids, Process};
use crate::queue::BurstPool;
use crate::types::Time;

pub(crate) const NAME: &str = "Shortest Job First";

/// Non-preemptive Shortest Job First.
///
/// Whenever the CPU is free, the ready process with the smallest
/// `burst_time` runs to completion. Ties go to the earlier arrival, then
/// to input order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ShortestJobFirst;

impl Policy for ShortestJobFirst {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule> {
        check_unique_pids(processes)?;
        let run = simulate(processes, 0);
        Ok(Schedule::new(NAME, run.completed, run.trace))
    }
}

/// Shortest Job First over `processes`, returning the records in
/// completion order.
pub fn shortest_job_first(processes: &[Process]) -> Result<Vec<Process>> {
    Ok(ShortestJobFirst.schedule(processes)?.into_completed())
}

pub(crate) fn simulate(processes: &[Process], origin: Time) -> Run {
    debug!(nr = processes.len(), origin, "shortest job first");
    let mut sim = Simulation::new(processes, origin);
    let mut pool = BurstPool::new();

    loop {
        while let Some(slot) = sim.next_arrived() {
            let proc = sim.process(slot);
            pool.insert(slot, proc.burst_time(), proc.arrival_time());
        }
        match pool.pop_shortest() {
            Some(slot) => sim.run_to_completion(slot),
            None if sim.has_pending() => sim.idle_until_next_arrival(),
            None => break,
        }
    }

    sim.finish()
}
