//! Randomized invariant sweeps over generated process sets.
//!
//! Configuration via environment variables:
//! - `SWEEP_SEED`: Base seed (default: 42)
//! - `SWEEP_ROUNDS`: Number of process sets to try (default: 200)

use std::collections::BTreeSet;

use schedsim::*;

mod common;
use common::setup_test;

fn env_or(name: &str, default: u32) -> u32 {
    std::env::var(name)
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(default)
}

/// Yield `(round, quantum, processes)` for every sweep round.
fn sweep() -> impl Iterator<Item = (u32, Time, Vec<Process>)> {
    let base = env_or("SWEEP_SEED", 42);
    let rounds = env_or("SWEEP_ROUNDS", 200);
    (0..rounds).map(move |round| {
        let mut rng = Rng::new(base.wrapping_add(round));
        let n = rng.range(0, 12);
        let quantum = rng.range(1, 5) as Time;
        (round, quantum, generate_processes(n, &mut rng))
    })
}

fn configs(quantum: Time) -> [SimConfig; 2] {
    let isolated = SimConfig {
        time_quantum: quantum,
        ..SimConfig::default()
    };
    let shared = SimConfig {
        clock_mode: ClockMode::Shared,
        ..isolated.clone()
    };
    [isolated, shared]
}

fn pid_set(processes: &[Process]) -> BTreeSet<Pid> {
    processes.iter().map(Process::pid).collect()
}

#[test]
fn test_every_process_completes_exactly_once() {
    setup_test();
    for (round, quantum, input) in sweep() {
        for config in configs(quantum) {
            for schedule in run_policies(&PolicyKind::ALL, &input, &config).unwrap() {
                let done = schedule.completed();
                assert_eq!(done.len(), input.len(), "round {round}: {}", schedule.policy());
                assert_eq!(pid_set(done), pid_set(&input), "round {round}");
                for p in done {
                    assert!(p.is_finished());
                    assert_eq!(p.remaining_time(), 0);
                }
            }
        }
    }
}

#[test]
fn test_trace_accounts_for_every_burst() {
    setup_test();
    for (round, quantum, input) in sweep() {
        for schedule in run_policies(&PolicyKind::ALL, &input, &configs(quantum)[0]).unwrap() {
            for p in &input {
                assert_eq!(
                    schedule.trace().total_runtime(p.pid()),
                    p.burst_time(),
                    "round {round}: {} pid {}",
                    schedule.policy(),
                    p.pid()
                );
            }
        }
    }
}

#[test]
fn test_round_robin_slices_respect_quantum() {
    setup_test();
    for (round, quantum, input) in sweep() {
        let schedule = RoundRobin::new(quantum).unwrap().schedule(&input).unwrap();
        for slice in schedule.trace().slices() {
            assert!(
                slice.end - slice.start <= quantum,
                "round {round}: slice {slice:?} exceeds quantum {quantum}"
            );
        }
    }
}

#[test]
fn test_timings_are_consistent() {
    setup_test();
    for (round, quantum, input) in sweep() {
        for config in configs(quantum) {
            for schedule in run_policies(&PolicyKind::ALL, &input, &config).unwrap() {
                for p in schedule.completed() {
                    let start = p.start_time().unwrap();
                    let completion = p.completion_time().unwrap();
                    assert!(start >= p.arrival_time(), "round {round}: pid {}", p.pid());
                    assert!(completion >= start + p.burst_time(), "round {round}");
                }
                assert!(schedule.trace().is_monotonic(), "round {round}");
            }
        }
    }
}

#[test]
fn test_non_preemptive_policies_run_to_completion() {
    setup_test();
    for (round, _, input) in sweep() {
        for done in [
            shortest_job_first(&input).unwrap(),
            priority_scheduling(&input).unwrap(),
        ] {
            for p in &done {
                assert_eq!(
                    p.completion_time(),
                    p.start_time().map(|s| s + p.burst_time()),
                    "round {round}: pid {}",
                    p.pid()
                );
            }
            // One CPU: runs never overlap.
            assert!(done
                .windows(2)
                .all(|w| w[0].completion_time() <= w[1].start_time()));
        }
    }
}

#[test]
fn test_shared_clock_never_overlaps() {
    setup_test();
    for (round, quantum, input) in sweep() {
        let policy = MultilevelQueue::new(quantum)
            .unwrap()
            .clock_mode(ClockMode::Shared);
        let schedule = policy.schedule(&input).unwrap();
        let slices = schedule.trace().slices();
        assert!(
            slices.windows(2).all(|w| w[0].end <= w[1].start),
            "round {round}: overlapping slices"
        );
        if !input.is_empty() {
            let metrics = Metrics::from_schedule(&schedule).unwrap();
            assert!(metrics.cpu_utilization <= 100.0, "round {round}");
        }
    }
}

#[test]
fn test_runs_are_idempotent() {
    setup_test();
    for (round, quantum, input) in sweep() {
        let snapshot = input.clone();
        let config = &configs(quantum)[0];
        let first = run_policies(&PolicyKind::ALL, &input, config).unwrap();
        let second = run_policies(&PolicyKind::ALL, &input, config).unwrap();
        assert_eq!(input, snapshot, "round {round}: input mutated");
        for (a, b) in first.iter().zip(&second) {
            assert_eq!(a.completed(), b.completed(), "round {round}: {}", a.policy());
            assert_eq!(a.trace().events(), b.trace().events());
        }
    }
}
