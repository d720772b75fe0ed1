//! Workload files on disk.

use std::io::Write;

use schedsim::*;

mod common;
use common::setup_test;

fn write_tmp(json: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(json.as_bytes()).unwrap();
    file
}

#[test]
fn test_read_workload_and_schedule() {
    setup_test();
    let file = write_tmp(
        r#"{
            "time_quantum": 2,
            "processes": [
                { "pid": 1, "arrival_time": 0, "burst_time": 4, "priority": 1 },
                { "pid": 2, "arrival_time": 1, "burst_time": 3, "priority": 1 }
            ]
        }"#,
    );
    let workload = read_workload(file.path()).unwrap();
    assert_eq!(workload.time_quantum, Some(2));

    let config = SimConfig {
        time_quantum: workload.time_quantum.unwrap(),
        ..SimConfig::default()
    };
    let schedules =
        run_policies(&[PolicyKind::RoundRobin], &workload.processes, &config).unwrap();
    assert_eq!(schedules[0].makespan(), 7);
}

#[test]
fn test_read_missing_file() {
    setup_test();
    let dir = tempfile::tempdir().unwrap();
    let missing = dir.path().join("nope.json");
    assert!(matches!(
        read_workload(&missing),
        Err(SchedError::InvalidInput(_))
    ));
}

#[test]
fn test_read_invalid_entry() {
    setup_test();
    let file = write_tmp(r#"[{ "pid": 1, "arrival_time": 0, "burst_time": 0, "priority": 1 }]"#);
    assert!(matches!(
        read_workload(file.path()),
        Err(SchedError::InvalidInput(_))
    ));
}

#[test]
fn test_generated_set_matches_seed() {
    setup_test();
    let a = generate_processes(8, &mut Rng::new(1234));
    let b = generate_processes(8, &mut Rng::new(1234));
    let c = generate_processes(8, &mut Rng::new(4321));
    assert_eq!(a, b);
    assert_ne!(a, c);
}
