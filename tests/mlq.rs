//! Multilevel Queue clock modes and tier routing.

use schedsim::*;

mod common;
use common::{procs, setup_test, timings};

fn mixed() -> Vec<Process> {
    procs(&[(1, 0, 4, 3), (2, 1, 5, 1), (3, 0, 3, 2), (4, 2, 1, 1), (5, 1, 1, 2)])
}

#[test]
fn test_isolated_tiers_restart_clock() {
    setup_test();
    let done = multilevel_queue(&mixed(), 2).unwrap();
    assert_eq!(
        timings(&done),
        vec![(4, 5, 6), (2, 1, 7), (3, 0, 3), (5, 3, 4), (1, 0, 4)]
    );
}

#[test]
fn test_shared_clock_runs_tiers_back_to_back() {
    setup_test();
    let schedule = MultilevelQueue::new(2)
        .unwrap()
        .clock_mode(ClockMode::Shared)
        .schedule(&mixed())
        .unwrap();
    assert_eq!(
        timings(schedule.completed()),
        vec![(4, 5, 6), (2, 1, 7), (5, 7, 8), (3, 8, 11), (1, 11, 15)]
    );
    assert_eq!(schedule.makespan(), 15);
}

#[test]
fn test_clock_modes_change_metrics() {
    setup_test();
    let input = mixed();
    let isolated = MultilevelQueue::new(2).unwrap().schedule(&input).unwrap();
    let shared = MultilevelQueue::new(2)
        .unwrap()
        .clock_mode(ClockMode::Shared)
        .schedule(&input)
        .unwrap();
    let a = Metrics::from_schedule(&isolated).unwrap();
    let b = Metrics::from_schedule(&shared).unwrap();
    assert_ne!(a, b);
    assert!(a.avg_waiting_time < b.avg_waiting_time);
    assert_eq!(a.makespan, 7);
    assert_eq!(b.makespan, 15);
    // Isolated tiers overlap in time, so utilization can exceed 100%.
    assert!(a.cpu_utilization > 100.0);
    assert!(b.cpu_utilization <= 100.0);
}

#[test]
fn test_each_tier_gets_a_segment() {
    setup_test();
    let schedule = MultilevelQueue::new(2).unwrap().schedule(&mixed()).unwrap();
    let segments = schedule.trace().segments();
    assert_eq!(segments.len(), 3);
    for (segment, tier) in segments.iter().zip(Tier::ALL) {
        assert_eq!(segment[0].kind, TraceKind::TierStart { tier });
        assert_eq!(segment[0].time, 0);
    }
}

#[test]
fn test_unmapped_priority_rejected() {
    setup_test();
    let input = procs(&[(1, 0, 2, 1), (2, 0, 2, 4)]);
    match multilevel_queue(&input, 2) {
        Err(SchedError::InvalidInput(msg)) => assert!(msg.contains("pid 2"), "{msg}"),
        other => panic!("expected InvalidInput, got {other:?}"),
    }
    // Single-queue policies accept any priority value.
    assert_eq!(priority_scheduling(&input).unwrap().len(), 2);
}

#[test]
fn test_tier_order_matches_standalone_policies() {
    setup_test();
    let top = procs(&[(2, 1, 5, 1), (4, 2, 1, 1)]);
    let middle = procs(&[(3, 0, 3, 2), (5, 1, 1, 2)]);
    let bottom = procs(&[(1, 0, 4, 3)]);
    let mut expected = round_robin(&top, 2).unwrap();
    expected.extend(shortest_job_first(&middle).unwrap());
    expected.extend(priority_scheduling(&bottom).unwrap());
    assert_eq!(multilevel_queue(&mixed(), 2).unwrap(), expected);
}
