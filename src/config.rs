//! Run configuration with defaults influenced by environment variables.

use tracing::warn;

use crate::error::{Result, SchedError};
use crate::policy::ClockMode;
use crate::types::Time;

/// Default PRNG seed used when no seed is specified.
pub const DEFAULT_SEED: u32 = 42;
/// Default number of generated processes.
pub const DEFAULT_NR_PROCESSES: u32 = 5;
/// Default Round Robin quantum.
pub const DEFAULT_TIME_QUANTUM: Time = 3;

/// Parameters shared by a batch of policy runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimConfig {
    /// How many processes to generate when no workload file is given.
    pub nr_processes: u32,
    /// Quantum for Round Robin and the top Multilevel Queue tier.
    pub time_quantum: Time,
    /// Generator seed.
    pub seed: u32,
    /// Multilevel Queue tier clock relationship.
    pub clock_mode: ClockMode,
}

impl Default for SimConfig {
    fn default() -> Self {
        SimConfig {
            nr_processes: DEFAULT_NR_PROCESSES,
            time_quantum: DEFAULT_TIME_QUANTUM,
            seed: DEFAULT_SEED,
            clock_mode: ClockMode::Isolated,
        }
    }
}

impl SimConfig {
    /// Defaults overridden by `SCHEDSIM_SEED` and `SCHEDSIM_QUANTUM`.
    ///
    /// - `SCHEDSIM_SEED`: a `u32` or `"entropy"` (see [`parse_seed`]).
    /// - `SCHEDSIM_QUANTUM`: a positive integer.
    ///
    /// Unset or empty variables leave the default in place.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = SimConfig {
            seed: parse_seed(var("SCHEDSIM_SEED").as_deref())?,
            ..Self::default()
        };
        match var("SCHEDSIM_QUANTUM").as_deref() {
            None | Some("") => {}
            Some(s) => config.time_quantum = parse_quantum(s)?,
        }
        Ok(config)
    }
}

/// Parse a quantum string. Zero and non-numbers are rejected.
pub fn parse_quantum(s: &str) -> Result<Time> {
    match s.trim().parse::<Time>() {
        Ok(q) if q > 0 => Ok(q),
        _ => Err(SchedError::InvalidConfiguration(format!(
            "time quantum {s:?}: expected a positive integer"
        ))),
    }
}

/// Parse a seed string: a `u32` integer or `"entropy"` for OS randomness.
///
/// Returns `DEFAULT_SEED` (42) for `None` or empty strings.
pub fn parse_seed(s: Option<&str>) -> Result<u32> {
    match s {
        None | Some("") => Ok(DEFAULT_SEED),
        Some(s) if s.eq_ignore_ascii_case("entropy") => {
            let seed = entropy_seed();
            warn!(
                seed,
                "seed=entropy: seeding generator with OS randomness \
                 (set seed={seed} to reproduce this run)"
            );
            Ok(seed)
        }
        Some(s) => s.parse::<u32>().map_err(|_| {
            SchedError::InvalidConfiguration(format!(
                "seed={s:?}: expected a u32 integer or \"entropy\""
            ))
        }),
    }
}

/// Read 4 bytes from /dev/urandom, falling back to pid ^ timestamp.
fn entropy_seed() -> u32 {
    use std::io::Read;
    let mut buf = [0u8; 4];
    let seed = std::fs::File::open("/dev/urandom")
        .and_then(|mut f| f.read_exact(&mut buf).map(|_| u32::from_le_bytes(buf)))
        .unwrap_or_else(|_| {
            let pid = std::process::id();
            let ts = std::time::SystemTime::now()
                .duration_since(std::time::UNIX_EPOCH)
                .map(|d| d.as_nanos() as u32)
                .unwrap_or(0);
            pid ^ ts
        });
    // Avoid seed 0 which is a fixed point for xorshift.
    if seed == 0 {
        1
    } else {
        seed
    }
}
