//! Speed levels and the pace between consecutive step effects

use std::fmt;
use std::str::FromStr;
use std::time::Duration;
use thiserror::Error;

/// Speed level outside the enumerated set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpeedError {
    #[error("speed level {0} is not one of 5, 10, ..., 50")]
    Unmapped(u32),
    #[error("speed level '{0}' is not a number")]
    NotANumber(String),
}

/// Zero-length pace would collapse every offset onto the same instant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[error("pace must be strictly positive")]
pub struct PaceError;

/// Interval between two consecutive step effects
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Pace(Duration);

impl Pace {
    pub fn new(interval: Duration) -> Result<Self, PaceError> {
        if interval.is_zero() {
            return Err(PaceError);
        }
        Ok(Pace(interval))
    }

    pub fn from_millis(millis: u64) -> Result<Self, PaceError> {
        Self::new(Duration::from_millis(millis))
    }

    pub fn interval(self) -> Duration {
        self.0
    }

    /// Offset of the step at `position` from the start of playback
    pub fn offset(self, position: usize) -> Duration {
        self.0.saturating_mul(u32::try_from(position).unwrap_or(u32::MAX))
    }

    /// Time from the first to the last of `steps` effects
    pub fn span(self, steps: usize) -> Duration {
        self.offset(steps.saturating_sub(1))
    }
}

/// Discrete playback speed; higher levels play faster
///
/// Holds a row of the pace table, so every level has a pace by construction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SpeedLevel(usize);

/// `(level, pace in milliseconds)`, slowest first
const PACE_TABLE: [(u32, u64); 10] = [
    (5, 87),
    (10, 75),
    (15, 64),
    (20, 54),
    (25, 45),
    (30, 37),
    (35, 29),
    (40, 21),
    (45, 13),
    (50, 5),
];

const fn row_of(level: u32) -> Option<usize> {
    let mut row = 0;
    while row < PACE_TABLE.len() {
        if PACE_TABLE[row].0 == level {
            return Some(row);
        }
        row += 1;
    }
    None
}

impl SpeedLevel {
    pub const MIN: SpeedLevel = SpeedLevel(0);
    pub const MAX: SpeedLevel = SpeedLevel(PACE_TABLE.len() - 1);
    pub const DEFAULT: SpeedLevel = match row_of(crate::config::DEFAULT_SPEED) {
        Some(row) => SpeedLevel(row),
        None => panic!("default speed is missing from the pace table"),
    };

    pub fn new(level: u32) -> Result<Self, SpeedError> {
        row_of(level).map(SpeedLevel).ok_or(SpeedError::Unmapped(level))
    }

    /// Every valid level, slowest first
    pub fn all() -> impl Iterator<Item = SpeedLevel> {
        (0..PACE_TABLE.len()).map(SpeedLevel)
    }

    pub fn value(self) -> u32 {
        PACE_TABLE[self.0].0
    }

    pub fn pace(self) -> Pace {
        Pace(Duration::from_millis(PACE_TABLE[self.0].1))
    }

    pub fn faster(self) -> Self {
        if self < Self::MAX {
            SpeedLevel(self.0 + 1)
        } else {
            self
        }
    }

    pub fn slower(self) -> Self {
        self.0.checked_sub(1).map_or(self, SpeedLevel)
    }
}

impl Default for SpeedLevel {
    fn default() -> Self {
        SpeedLevel::DEFAULT
    }
}

impl TryFrom<u32> for SpeedLevel {
    type Error = SpeedError;

    fn try_from(level: u32) -> Result<Self, Self::Error> {
        SpeedLevel::new(level)
    }
}

impl FromStr for SpeedLevel {
    type Err = SpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let level: u32 = s
            .trim()
            .parse()
            .map_err(|_| SpeedError::NotANumber(s.to_string()))?;
        SpeedLevel::new(level)
    }
}

impl fmt::Display for SpeedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value())
    }
}

/// Look up the pace for a raw level
pub fn pace_for_level(level: u32) -> Result<Pace, SpeedError> {
    SpeedLevel::new(level).map(SpeedLevel::pace)
}
