//! schedsim - Deterministic discrete-time simulator for classic CPU
//! scheduling policies.
//!
//! A single simulated CPU runs a set of processes under Round Robin,
//! non-preemptive Shortest Job First, non-preemptive Priority, or a
//! three-tier Multilevel Queue, and the completed schedules are summarized
//! as waiting, turnaround and response times plus CPU utilization.
//!
//! # Architecture
//!
//! - **Process**: Immutable workload description plus per-run timings
//! - **Engine**: Simulated clock, arrival admission and slice execution
//! - **Queues**: FIFO ready queue and burst-ordered pool
//! - **Policies**: One pure function per scheduling discipline
//! - **Metrics**: Per-process and schedule-wide statistics
//! - **Workload**: Seeded process generator and JSON workload loader
//!
//! # Usage
//!
//! ```rust
//! use schedsim::*;
//!
//! let processes = generate_processes(5, &mut Rng::new(42));
//! let schedules = run_policies(&PolicyKind::ALL, &processes, &SimConfig::default())?;
//! for schedule in &schedules {
//!     let metrics = Metrics::from_schedule(schedule)?;
//!     println!("{}:\n{metrics}", schedule.policy());
//! }
//! # Ok::<(), SchedError>(())
//! ```

pub mod config;
mod engine;
pub mod error;
pub mod fmt;
pub mod metrics;
pub mod policy;
pub mod process;
pub mod queue;
pub mod trace;
pub mod types;
pub mod workload;

// Re-export the main public types for convenience.
pub use config::{parse_quantum, parse_seed, SimConfig};
pub use error::{Result, SchedError};
pub use fmt::{render_gantt, render_text, FmtTime, PolicyReport};
pub use metrics::{per_process, Metrics, ProcessMetrics};
pub use policy::{
    multilevel_queue, priority_scheduling, round_robin, run_policies, shortest_job_first,
    ClockMode, MultilevelQueue, Policy, PolicyKind, PriorityFcfs, RoundRobin, Schedule,
    ShortestJobFirst,
};
pub use process::Process;
pub use trace::{Slice, Trace, TraceEvent, TraceKind};
pub use types::{Pid, Tier, Time, MAX_TIME};
pub use workload::{generate_processes, load_workload, read_workload, Rng, Workload};
