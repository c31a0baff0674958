//! Timed replay of a step log onto a display target
//!
//! This module provides:
//! - [`Player`]: schedules one effect per step and signals completion
//! - [`pace`]: speed levels and the [`Pace`] between effects
//! - [`scheduler`]: the [`Scheduler`] port and the [`TimerQueue`] clock
//! - [`display`]: the [`DisplayTarget`] trait and the [`BarRow`] target
//!
//! # Schedule
//!
//! The step at log position `i` fires at `i * pace` after [`Player::play`].
//! Offsets are strictly increasing, so no two steps share a due time and a
//! single timer queue applies them in log order.
//!
//! # Superseded runs
//!
//! Every call to [`Player::play`] takes a fresh [`RunToken`]. Effects carry
//! the token they were scheduled under and do nothing once a newer run (or
//! [`Player::cancel`]) has replaced it, so a stale run can neither touch the
//! target nor fire its completion signal.

pub mod display;
pub mod pace;
pub mod scheduler;

pub use display::{Bar, BarRow, ControlSurface, DisplayTarget};
pub use pace::{Pace, PaceError, SpeedError, SpeedLevel};
pub use scheduler::{Effect, Scheduler, TimerQueue};

use crate::step::{ColorTag, Step, StepLog};
use std::cell::Cell;
use std::rc::Rc;
use thiserror::Error;
use tracing::{debug, trace};

/// Playback refused before anything was scheduled
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlaybackError {
    #[error("display has {actual} elements but the log was recorded for {expected}")]
    CardinalityMismatch { expected: usize, actual: usize },

    #[error("step {position} addresses slot {index}, display has {len} elements")]
    IndexOutOfRange {
        position: usize,
        index: usize,
        len: usize,
    },
}

/// Identifies one call to [`Player::play`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RunToken(u64);

impl RunToken {
    pub fn generation(self) -> u64 {
        self.0
    }
}

/// Replays step logs through a scheduler
#[derive(Debug, Default)]
pub struct Player {
    generation: Rc<Cell<u64>>,
}

impl Player {
    pub fn new() -> Self {
        Player {
            generation: Rc::new(Cell::new(0)),
        }
    }

    /// Whether `token` still belongs to the latest run
    pub fn is_current(&self, token: RunToken) -> bool {
        self.generation.get() == token.0
    }

    /// Invalidate every effect scheduled so far
    pub fn cancel(&mut self) {
        let next = self.generation.get() + 1;
        self.generation.set(next);
        debug!(generation = next, "playback cancelled");
    }

    /// Schedule `log` against `target`
    ///
    /// `on_complete` runs right after the last step's effect, or immediately
    /// when the log is empty. It never runs for a run that was superseded.
    pub fn play<T, S, F>(
        &mut self,
        log: StepLog,
        pace: Pace,
        target: &mut T,
        scheduler: &mut S,
        on_complete: F,
    ) -> Result<RunToken, PlaybackError>
    where
        T: DisplayTarget + 'static,
        S: Scheduler<T> + ?Sized,
        F: FnOnce(&mut T) + 'static,
    {
        validate(&log, target)?;

        self.cancel();
        let token = RunToken(self.generation.get());

        if log.is_empty() {
            debug!(generation = token.0, "empty log, completing immediately");
            on_complete(target);
            return Ok(token);
        }

        let last = log.len() - 1;
        let mut on_complete = Some(on_complete);

        for (position, &step) in log.iter().enumerate() {
            let generation = Rc::clone(&self.generation);
            let done = if position == last {
                on_complete.take()
            } else {
                None
            };

            scheduler.schedule(
                Box::new(move |target: &mut T| {
                    if generation.get() != token.0 {
                        return;
                    }
                    trace!(position, ?step, "applying step");
                    apply_step(target, step);
                    if let Some(done) = done {
                        done(target);
                    }
                }),
                pace.offset(position),
            );
        }

        debug!(
            generation = token.0,
            steps = log.len(),
            pace_ms = pace.interval().as_millis() as u64,
            "playback scheduled"
        );
        Ok(token)
    }
}

/// Apply the visual effect of a single step
pub fn apply_step<T: DisplayTarget + ?Sized>(target: &mut T, step: Step) {
    match step {
        Step::Relocate { at, value } => {
            target.set_magnitude(at, value);
            target.set_color(at, ColorTag::Base);
        }
        Step::Compare { first, second, tag } => {
            target.set_color(first, tag);
            if let Some(second) = second {
                target.set_color(second, tag);
            }
        }
    }
}

/// Apply every step of `log` immediately, in order
pub fn replay<T: DisplayTarget + ?Sized>(log: &StepLog, target: &mut T) -> Result<(), PlaybackError> {
    validate(log, target)?;
    for &step in log {
        apply_step(target, step);
    }
    Ok(())
}

fn validate<T: DisplayTarget + ?Sized>(log: &StepLog, target: &T) -> Result<(), PlaybackError> {
    let len = target.len();
    if len != log.slots() {
        return Err(PlaybackError::CardinalityMismatch {
            expected: log.slots(),
            actual: len,
        });
    }

    if let Some((position, step)) = log.iter().enumerate().find(|(_, s)| s.max_index() >= len) {
        return Err(PlaybackError::IndexOutOfRange {
            position,
            index: step.max_index(),
            len,
        });
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    fn pace() -> Pace {
        Pace::from_millis(10).unwrap()
    }

    #[test]
    fn test_step_fires_at_its_offset() {
        let mut row = BarRow::from_values(&[2, 1]);
        let mut queue = TimerQueue::new();
        let mut log = StepLog::new(2);
        log.flash(0, Some(1));
        log.push(Step::relocate(0, 1));

        Player::new()
            .play(log, pace(), &mut row, &mut queue, |_| {})
            .unwrap();

        queue.advance(Duration::ZERO, &mut row);
        assert_eq!(row.bars()[0].color, ColorTag::Comparison);
        assert_eq!(row.bars()[1].color, ColorTag::Comparison);

        queue.advance(Duration::from_millis(10), &mut row);
        assert_eq!(row.bars()[0].color, ColorTag::Base);
        assert_eq!(row.values(), vec![2, 1]);

        queue.advance(Duration::from_millis(10), &mut row);
        assert_eq!(row.values(), vec![1, 1]);
        assert!(queue.is_idle());
    }

    #[test]
    fn test_sentinel_colors_one_element() {
        let mut row = BarRow::from_values(&[3, 4, 5]);
        apply_step(&mut row, Step::single(2, ColorTag::Pivot));

        assert_eq!(row.bars()[2].color, ColorTag::Pivot);
        assert_eq!(row.bars()[0].color, ColorTag::Base);
        assert_eq!(row.bars()[1].color, ColorTag::Base);
    }

    #[test]
    fn test_cardinality_mismatch_fails_fast() {
        let mut row = BarRow::from_values(&[1, 2]);
        let mut queue = TimerQueue::new();
        let log = StepLog::new(3);

        let result = Player::new().play(log, pace(), &mut row, &mut queue, |_| {});
        assert_eq!(
            result,
            Err(PlaybackError::CardinalityMismatch {
                expected: 3,
                actual: 2
            })
        );
        assert!(queue.is_idle());
    }

    #[test]
    fn test_out_of_range_step_fails_fast() {
        let mut row = BarRow::from_values(&[1, 2]);
        let mut log = StepLog::new(2);
        log.flash(0, Some(5));

        let result = replay(&log, &mut row);
        assert_eq!(
            result,
            Err(PlaybackError::IndexOutOfRange {
                position: 0,
                index: 5,
                len: 2
            })
        );
    }

    #[test]
    fn test_cancel_silences_pending_effects() {
        let mut row = BarRow::from_values(&[2, 1]);
        row.set_controls_enabled(false);
        let mut queue = TimerQueue::new();
        let mut log = StepLog::new(2);
        log.exchanged(&[1, 2], 0, 1);

        let mut player = Player::new();
        let token = player
            .play(log, pace(), &mut row, &mut queue, |row: &mut BarRow| {
                row.set_controls_enabled(true)
            })
            .unwrap();
        player.cancel();

        assert!(!player.is_current(token));
        queue.run_until_idle(&mut row);
        assert_eq!(row.values(), vec![2, 1]);
        assert!(!row.controls_enabled());
    }
}
