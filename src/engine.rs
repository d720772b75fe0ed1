//! Discrete-time simulation state shared by every policy.
//!
//! A `Simulation` owns a pristine copy of the input records (the arena),
//! the simulated clock, the trace, and the completion order. Policies
//! decide *which* slot runs next; the engine does the bookkeeping so the
//! record invariants hold no matter which policy drives it.

use std::collections::VecDeque;

use tracing::{debug, info, trace};

use crate::process::Process;
use crate::trace::{Trace, TraceKind};
use crate::types::Time;

/// The outcome of one simulated run.
pub(crate) struct Run {
    /// Finished records in completion order.
    pub completed: Vec<Process>,
    pub trace: Trace,
    /// Clock value when the last record finished.
    pub clock: Time,
}

pub(crate) struct Simulation {
    /// Records in input order. Slots index into this.
    procs: Vec<Process>,
    /// Slots not yet admitted, by (arrival_time, input order).
    pending: VecDeque<usize>,
    /// Slots in completion order.
    completed: Vec<usize>,
    clock: Time,
    trace: Trace,
}

impl Simulation {
    /// Start a run at `origin` over fresh copies of `processes`.
    pub fn new(processes: &[Process], origin: Time) -> Self {
        let procs: Vec<Process> = processes.iter().map(Process::pristine).collect();
        let mut order: Vec<usize> = (0..procs.len()).collect();
        // Stable: equal arrivals keep input order.
        order.sort_by_key(|&slot| procs[slot].arrival_time());
        Simulation {
            procs,
            pending: order.into(),
            completed: Vec::new(),
            clock: origin,
            trace: Trace::new(),
        }
    }

    pub fn now(&self) -> Time {
        self.clock
    }

    pub fn process(&self, slot: usize) -> &Process {
        &self.procs[slot]
    }

    /// All slots, stably sorted by `key`.
    pub fn slots_by<K: Ord>(&self, key: impl Fn(&Process) -> K) -> Vec<usize> {
        let mut slots: Vec<usize> = (0..self.procs.len()).collect();
        slots.sort_by_key(|&slot| key(&self.procs[slot]));
        slots
    }

    /// Whether any record has not arrived yet.
    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Admit the next record whose arrival time has been reached, if any.
    pub fn next_arrived(&mut self) -> Option<usize> {
        let &slot = self.pending.front()?;
        if self.procs[slot].arrival_time() > self.clock {
            return None;
        }
        self.pending.pop_front();
        let pid = self.procs[slot].pid();
        trace!(pid = pid.0, now = self.clock, "admit");
        self.trace.record(self.clock, TraceKind::Admitted { pid });
        Some(slot)
    }

    /// Nothing is runnable: jump the clock to the next arrival.
    ///
    /// Equivalent to ticking one unit at a time until something arrives.
    pub fn idle_until_next_arrival(&mut self) {
        if let Some(&slot) = self.pending.front() {
            let arrival = self.procs[slot].arrival_time();
            self.idle_until(arrival);
        }
    }

    /// Leave the CPU idle until `t`. No-op if the clock is already there.
    pub fn idle_until(&mut self, t: Time) {
        if t <= self.clock {
            return;
        }
        debug!(from = self.clock, until = t, "IDLE");
        self.trace.record(self.clock, TraceKind::Idle { until: t });
        self.clock = t;
    }

    /// Give `slot` the CPU for at most `max_units`. Returns whether the
    /// process finished in this slice.
    pub fn execute(&mut self, slot: usize, max_units: Time) -> bool {
        let now = self.clock;
        let proc = &mut self.procs[slot];
        let pid = proc.pid();
        proc.dispatch(now);
        let ran = proc.run_for(max_units);
        debug!(pid = pid.0, now, ran, remaining = proc.remaining_time(), "DISPATCH");
        self.trace
            .record(now, TraceKind::Dispatched { pid, slice: ran });
        self.clock += ran;

        let proc = &mut self.procs[slot];
        if proc.remaining_time() == 0 {
            proc.finish(self.clock);
            info!(
                pid = pid.0,
                start = proc.start_time().unwrap_or(now),
                completion = self.clock,
                "COMPLETED"
            );
            self.trace.record(self.clock, TraceKind::Completed { pid });
            self.completed.push(slot);
            true
        } else {
            debug!(pid = pid.0, now = self.clock, "PREEMPTED");
            self.trace.record(self.clock, TraceKind::Preempted { pid });
            false
        }
    }

    /// Run `slot` without interruption until it finishes.
    pub fn run_to_completion(&mut self, slot: usize) {
        let remaining = self.procs[slot].remaining_time();
        let finished = self.execute(slot, remaining);
        debug_assert!(finished);
    }

    /// Consume the simulation once every record has completed.
    pub fn finish(self) -> Run {
        debug_assert_eq!(
            self.completed.len(),
            self.procs.len(),
            "run ended with unfinished records"
        );
        let mut arena: Vec<Option<Process>> = self.procs.into_iter().map(Some).collect();
        let completed = self
            .completed
            .iter()
            .filter_map(|&slot| arena[slot].take())
            .collect();
        Run {
            completed,
            trace: self.trace,
            clock: self.clock,
        }
    }
}
