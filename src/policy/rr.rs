//! Round Robin: FIFO ready queue with a fixed time quantum.

use tracing::debug;

use crate::engine::{Run, Simulation};
use crate::error::{Result, SchedError};
use crate::policy::{Policy, Schedule};
use crate::process::{check_unique_pids, Process};
use crate::queue::FifoQueue;
use crate::types::Time;

pub(crate) const NAME: &str = "Round Robin";

/// Round Robin with a fixed quantum. Priorities are ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoundRobin {
    quantum: Time,
}

impl RoundRobin {
    pub fn new(quantum: Time) -> Result<Self> {
        if quantum == 0 {
            return Err(SchedError::InvalidConfiguration(
                "time quantum must be positive".into(),
            ));
        }
        Ok(RoundRobin { quantum })
    }
}

impl Policy for RoundRobin {
    fn name(&self) -> &'static str {
        NAME
    }

    fn schedule(&self, processes: &[Process]) -> Result<Schedule> {
        check_unique_pids(processes)?;
        let run = simulate(processes, self.quantum, 0);
        Ok(Schedule::new(NAME, run.completed, run.trace))
    }
}

/// Round Robin over `processes` with `quantum`, returning the records in
/// completion order.
pub fn round_robin(processes: &[Process], quantum: Time) -> Result<Vec<Process>> {
    Ok(RoundRobin::new(quantum)?.schedule(processes)?.into_completed())
}

/// Simulate starting the clock at `origin`.
///
/// Each step first admits everything that has arrived (a process preempted
/// in the previous step is already back at the tail, so it stays ahead of
/// same-instant arrivals), then runs the queue head for one quantum.
pub(crate) fn simulate(processes: &[Process], quantum: Time, origin: Time) -> Run {
    debug!(nr = processes.len(), quantum, origin, "round robin");
    let mut sim = Simulation::new(processes, origin);
    let mut ready = FifoQueue::new();

    loop {
        while let Some(slot) = sim.next_arrived() {
            ready.push(slot);
        }
        match ready.pop() {
            Some(slot) => {
                if !sim.execute(slot, quantum) {
                    ready.push(slot);
                }
            }
            None if sim.has_pending() => sim.idle_until_next_arrival(),
            None => break,
        }
    }

    sim.finish()
}
