#![allow(dead_code)]

use schedsim::Process;

/// Initialize tracing from `RUST_LOG`.
///
/// `try_init()` is idempotent: first call in the process succeeds,
/// subsequent calls are silently ignored.
pub fn setup_test() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Build a process set from `(pid, arrival, burst, priority)` tuples.
pub fn procs(defs: &[(i64, i64, i64, i64)]) -> Vec<Process> {
    defs.iter()
        .map(|&(pid, arrival, burst, priority)| {
            Process::new(pid, arrival, burst, priority).expect("valid process definition")
        })
        .collect()
}

/// `(pid, start, completion)` of each completed record, in completion order.
pub fn timings(completed: &[Process]) -> Vec<(u32, u64, u64)> {
    completed
        .iter()
        .map(|p| {
            (
                p.pid().0,
                p.start_time().expect("started"),
                p.completion_time().expect("completed"),
            )
        })
        .collect()
}
