//! Process-set sources: a seeded random generator and a JSON loader.
//!
//! The generator draws from an injected `Rng`, so the same seed always
//! yields the same process set and the scheduling core never touches
//! global randomness.
//!
//! # Workload file format
//!
//! Either a bare array of processes or an object with an optional
//! quantum:
//!
//! ```json
//! {
//!   "time_quantum": 2,
//!   "processes": [
//!     { "pid": 1, "arrival_time": 0, "burst_time": 4, "priority": 1 },
//!     { "pid": 2, "arrival_time": 1, "burst_time": 3, "priority": 2 }
//!   ]
//! }
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::debug;

use crate::error::{Result, SchedError};
use crate::process::{check_unique_pids, Process};
use crate::types::{Pid, Time};

/// Inclusive range of generated arrival times.
pub const ARRIVAL_RANGE: (u32, u32) = (0, 10);
/// Inclusive range of generated burst times.
pub const BURST_RANGE: (u32, u32) = (1, 10);
/// Inclusive range of generated priority classes.
pub const PRIORITY_RANGE: (u32, u32) = (1, 3);

/// Simple xorshift32 PRNG for deterministic process generation.
#[derive(Debug, Clone)]
pub struct Rng {
    state: u32,
}

impl Rng {
    /// Seed 0 is a fixed point for xorshift and is remapped to 1.
    pub fn new(seed: u32) -> Self {
        Self {
            state: if seed == 0 { 1 } else { seed },
        }
    }

    pub fn next_u32(&mut self) -> u32 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 17;
        x ^= x << 5;
        self.state = x;
        x
    }

    /// Uniform-ish draw from `min..=max`.
    pub fn range(&mut self, min: u32, max: u32) -> u32 {
        min + (self.next_u32() % (max - min + 1))
    }
}

/// Generate `n` processes with pids `1..=n`, sorted by arrival time.
pub fn generate_processes(n: u32, rng: &mut Rng) -> Vec<Process> {
    let mut processes: Vec<Process> = (1..=n)
        .map(|pid| {
            let arrival = rng.range(ARRIVAL_RANGE.0, ARRIVAL_RANGE.1);
            let burst = rng.range(BURST_RANGE.0, BURST_RANGE.1);
            let priority = rng.range(PRIORITY_RANGE.0, PRIORITY_RANGE.1);
            Process::from_valid(Pid(pid), arrival.into(), burst.into(), priority.into())
        })
        .collect();
    processes.sort_by_key(Process::arrival_time);
    debug!(n, "generated processes");
    processes
}

/// One process as written in a workload file.
#[derive(Debug, Clone, Deserialize)]
struct ProcessEntry {
    pid: i64,
    arrival_time: i64,
    burst_time: i64,
    priority: i64,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum WorkloadFile {
    Bare(Vec<ProcessEntry>),
    Full {
        #[serde(default)]
        time_quantum: Option<Time>,
        processes: Vec<ProcessEntry>,
    },
}

/// A process set loaded from a workload file.
#[derive(Debug, Clone)]
pub struct Workload {
    pub processes: Vec<Process>,
    /// Quantum requested by the file, if any.
    pub time_quantum: Option<Time>,
}

/// Parse a workload from JSON. Every entry is validated and pids must be
/// unique.
pub fn load_workload(json: &str) -> Result<Workload> {
    let (entries, time_quantum) = match serde_json::from_str::<WorkloadFile>(json)? {
        WorkloadFile::Bare(entries) => (entries, None),
        WorkloadFile::Full {
            time_quantum,
            processes,
        } => (processes, time_quantum),
    };
    let processes = entries
        .into_iter()
        .map(|e| Process::new(e.pid, e.arrival_time, e.burst_time, e.priority))
        .collect::<Result<Vec<_>>>()?;
    check_unique_pids(&processes)?;
    Ok(Workload {
        processes,
        time_quantum,
    })
}

/// Read and parse a workload file.
pub fn read_workload(path: &Path) -> Result<Workload> {
    let json = std::fs::read_to_string(path).map_err(|e| {
        SchedError::InvalidInput(format!("failed to read {}: {e}", path.display()))
    })?;
    load_workload(&json)
}
