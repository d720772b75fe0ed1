//! Ready queues.
//!
//! Both queues hold slots (indices into the run's process arena) rather
//! than records, so a record is owned in exactly one place while it is
//! being simulated.

use std::collections::{BTreeMap, VecDeque};

use crate::types::Time;

/// FIFO ready queue used by Round Robin.
#[derive(Debug, Default)]
pub struct FifoQueue {
    entries: VecDeque<usize>,
}

impl FifoQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the tail.
    pub fn push(&mut self, slot: usize) {
        self.entries.push_back(slot);
    }

    /// Take the head.
    pub fn pop(&mut self) -> Option<usize> {
        self.entries.pop_front()
    }
}

/// Ready pool ordered by shortest burst.
///
/// Entries are keyed by `(burst_time, arrival_time, insertion order)`, so
/// ties on burst go to the earlier arrival and then to whichever slot was
/// admitted first. Admission follows input order for equal arrivals.
#[derive(Debug, Default)]
pub struct BurstPool {
    entries: BTreeMap<(Time, Time, u64), usize>,
    insertion_counter: u64,
}

impl BurstPool {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, slot: usize, burst_time: Time, arrival_time: Time) {
        let order = self.insertion_counter;
        self.insertion_counter += 1;
        self.entries.insert((burst_time, arrival_time, order), slot);
    }

    /// Remove and return the shortest job.
    pub fn pop_shortest(&mut self) -> Option<usize> {
        self.entries.pop_first().map(|(_, slot)| slot)
    }
}
