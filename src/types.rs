//! Newtype wrappers and type aliases for domain concepts.
//!
//! Process identifiers get a newtype so they cannot be confused with
//! times or priorities. Simulated time is a plain alias: it is only ever
//! added to and compared, so arithmetic traits would be boilerplate.

use std::fmt;

use serde::Serialize;

/// Process identifier. Always >= 1 once validated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Pid(pub u32);

impl fmt::Display for Pid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Simulated time in discrete ticks. Starts at 0 for every run.
pub type Time = u64;

/// Largest accepted arrival or burst time. Keeps the clock of any run
/// that fits in memory far below `u64::MAX`.
pub const MAX_TIME: Time = u32::MAX as Time;

/// A Multilevel Queue level. Each level maps to one priority class and
/// one single-queue policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Tier {
    /// Priority 1, scheduled Round Robin.
    Top,
    /// Priority 2, scheduled Shortest Job First.
    Middle,
    /// Priority 3, scheduled by priority order.
    Bottom,
}

impl Tier {
    /// All tiers in the order their results are concatenated.
    pub const ALL: [Tier; 3] = [Tier::Top, Tier::Middle, Tier::Bottom];

    /// Map a raw priority class to its tier. Unmapped values are `None`;
    /// callers must surface that as an error rather than pick a default.
    pub fn from_priority(priority: i64) -> Option<Tier> {
        match priority {
            1 => Some(Tier::Top),
            2 => Some(Tier::Middle),
            3 => Some(Tier::Bottom),
            _ => None,
        }
    }

    /// Position in `Tier::ALL`.
    pub fn index(self) -> usize {
        match self {
            Tier::Top => 0,
            Tier::Middle => 1,
            Tier::Bottom => 2,
        }
    }

    pub fn priority(self) -> i64 {
        self.index() as i64 + 1
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "tier{}", self.priority())
    }
}
