//! Instrumented sorting algorithms
//!
//! Each algorithm sorts a slice in place and records what it did into a
//! [`StepLog`]:
//! - [`bubble`]: exchange sort with early exit
//! - [`selection`]: selection sort
//! - [`insertion`]: insertion sort
//! - [`quick`]: iterative partition sort with an explicit range stack
//! - [`merge`]: top-down merge sort
//!
//! # Step emission
//!
//! Every comparison is recorded as a highlight immediately followed by its
//! revert, and every slot whose magnitude changes gets a relocation carrying
//! the new value. Played back in order, any log reproduces the sort without
//! the player knowing which algorithm produced it.

pub mod bubble;
pub mod insertion;
pub mod merge;
pub mod quick;
pub mod selection;

use crate::step::StepLog;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;
use tracing::debug;

/// The closed set of algorithms that can be run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Algorithm {
    Bubble,
    Selection,
    Insertion,
    Quick,
    Merge,
}

/// Returned when parsing an algorithm name outside the closed set
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown sorting algorithm '{0}' (expected bubble, selection, insertion, quick or merge)")]
pub struct UnknownAlgorithm(pub String);

impl Algorithm {
    pub const ALL: [Algorithm; 5] = [
        Algorithm::Bubble,
        Algorithm::Selection,
        Algorithm::Insertion,
        Algorithm::Quick,
        Algorithm::Merge,
    ];

    /// Human readable name
    pub fn name(self) -> &'static str {
        match self {
            Algorithm::Bubble => "Bubble Sort",
            Algorithm::Selection => "Selection Sort",
            Algorithm::Insertion => "Insertion Sort",
            Algorithm::Quick => "Quick Sort",
            Algorithm::Merge => "Merge Sort",
        }
    }

    /// Sort `array` in place, appending every step to `log`
    pub fn sort_into(self, array: &mut [u32], log: &mut StepLog) {
        match self {
            Algorithm::Bubble => bubble::sort(array, log),
            Algorithm::Selection => selection::sort(array, log),
            Algorithm::Insertion => insertion::sort(array, log),
            Algorithm::Quick => quick::sort(array, log),
            Algorithm::Merge => merge::sort(array, log),
        }
    }

    /// Sort `array` in place and return a fresh log of the run
    pub fn run(self, array: &mut [u32]) -> StepLog {
        let mut log = StepLog::new(array.len());
        self.sort_into(array, &mut log);
        debug!(
            algorithm = self.name(),
            len = array.len(),
            steps = log.len(),
            relocations = log.relocations(),
            "generated step log"
        );
        log
    }

    /// Next algorithm in menu order, wrapping around
    pub fn next(self) -> Self {
        match self {
            Algorithm::Bubble => Algorithm::Selection,
            Algorithm::Selection => Algorithm::Insertion,
            Algorithm::Insertion => Algorithm::Quick,
            Algorithm::Quick => Algorithm::Merge,
            Algorithm::Merge => Algorithm::Bubble,
        }
    }

    /// Previous algorithm in menu order, wrapping around
    pub fn prev(self) -> Self {
        match self {
            Algorithm::Bubble => Algorithm::Merge,
            Algorithm::Selection => Algorithm::Bubble,
            Algorithm::Insertion => Algorithm::Selection,
            Algorithm::Quick => Algorithm::Insertion,
            Algorithm::Merge => Algorithm::Quick,
        }
    }
}

impl fmt::Display for Algorithm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Algorithm {
    type Err = UnknownAlgorithm;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key: String = s
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .collect::<String>()
            .to_ascii_lowercase();
        match key.trim_end_matches("sort") {
            "bubble" | "exchange" => Ok(Algorithm::Bubble),
            "selection" => Ok(Algorithm::Selection),
            "insertion" => Ok(Algorithm::Insertion),
            "quick" | "partition" => Ok(Algorithm::Quick),
            "merge" => Ok(Algorithm::Merge),
            _ => Err(UnknownAlgorithm(s.to_string())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_names() {
        assert_eq!("bubble".parse::<Algorithm>(), Ok(Algorithm::Bubble));
        assert_eq!("quickSort".parse::<Algorithm>(), Ok(Algorithm::Quick));
        assert_eq!("Merge Sort".parse::<Algorithm>(), Ok(Algorithm::Merge));
        assert_eq!("partition".parse::<Algorithm>(), Ok(Algorithm::Quick));
        assert!("heap".parse::<Algorithm>().is_err());
    }

    #[test]
    fn test_menu_order_cycles() {
        let mut algo = Algorithm::Bubble;
        for expected in Algorithm::ALL.iter().skip(1) {
            algo = algo.next();
            assert_eq!(algo, *expected);
        }
        assert_eq!(algo.next(), Algorithm::Bubble);
        assert_eq!(Algorithm::Bubble.prev(), Algorithm::Merge);
    }

    #[test]
    fn test_run_sizes_log_to_array() {
        let mut array = vec![4, 2, 9];
        let log = Algorithm::Insertion.run(&mut array);
        assert_eq!(log.slots(), 3);
        assert_eq!(array, vec![2, 4, 9]);
    }
}
