//! Run orchestration
//!
//! [`RunController`] owns the logical array between runs. A run moves the
//! array into a fresh [`RunContext`], lets the chosen algorithm sort it and
//! record a log, takes the sorted array back and hands the log to the
//! [`Player`]. Controls are disabled for the duration of the playback and
//! re-enabled by the player's completion signal.

use crate::algorithms::Algorithm;
use crate::config::ArrayConfig;
use crate::playback::{
    ControlSurface, DisplayTarget, PlaybackError, Player, RunToken, Scheduler, SpeedLevel,
};
use crate::step::StepLog;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RunError {
    #[error(transparent)]
    Playback(#[from] PlaybackError),
}

/// State of a single run, created fresh for every sort
#[derive(Debug)]
pub struct RunContext {
    algorithm: Algorithm,
    speed: SpeedLevel,
    array: Vec<u32>,
}

impl RunContext {
    pub fn new(array: Vec<u32>, algorithm: Algorithm, speed: SpeedLevel) -> Self {
        RunContext {
            algorithm,
            speed,
            array,
        }
    }

    pub fn algorithm(&self) -> Algorithm {
        self.algorithm
    }

    pub fn speed(&self) -> SpeedLevel {
        self.speed
    }

    pub fn array(&self) -> &[u32] {
        &self.array
    }

    /// Sort the array and return the recording
    pub fn generate(&mut self) -> StepLog {
        self.algorithm.run(&mut self.array)
    }

    pub fn into_array(self) -> Vec<u32> {
        self.array
    }
}

/// What a started run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RunReport {
    pub algorithm: Algorithm,
    pub speed: SpeedLevel,
    pub input: Vec<u32>,
    pub sorted: Vec<u32>,
    pub steps: usize,
    pub comparisons: usize,
    pub relocations: usize,
    pub token: RunToken,
}

/// Owns the logical array and drives runs against a display
pub struct RunController {
    array: Vec<u32>,
    config: ArrayConfig,
    rng: StdRng,
    player: Player,
    active: Option<RunToken>,
}

impl RunController {
    /// Create a controller with an empty array; `seed` makes generation
    /// reproducible
    pub fn new(config: ArrayConfig, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        RunController {
            array: Vec::new(),
            config,
            rng,
            player: Player::new(),
            active: None,
        }
    }

    pub fn array(&self) -> &[u32] {
        &self.array
    }

    /// Whether the last started run's effects are still allowed to fire
    pub fn has_active_run(&self) -> bool {
        self.active.is_some_and(|token| self.player.is_current(token))
    }

    /// Replace the array with fresh random magnitudes and render it
    pub fn generate<T>(&mut self, target: &mut T) -> &[u32]
    where
        T: DisplayTarget + ControlSurface,
    {
        let (min, max) = (self.config.min(), self.config.max());
        let values: Vec<u32> = (0..self.config.count())
            .map(|_| self.rng.random_range(min..=max))
            .collect();
        debug!(len = values.len(), min, max, "generated array");
        self.load(values, target)
    }

    /// Replace the array with `values` and render it
    pub fn load<T>(&mut self, values: Vec<u32>, target: &mut T) -> &[u32]
    where
        T: DisplayTarget + ControlSurface,
    {
        self.stop();
        self.array = values;
        target.render_initial(&self.array);
        target.set_controls_enabled(true);
        &self.array
    }

    /// Sort the array with `algorithm` and schedule its playback
    ///
    /// A run that is still playing is superseded: its remaining effects are
    /// dropped and the display is re-rendered from the logical array before
    /// the new log is generated.
    pub fn run<T, S>(
        &mut self,
        algorithm: Algorithm,
        speed: SpeedLevel,
        target: &mut T,
        scheduler: &mut S,
    ) -> Result<RunReport, RunError>
    where
        T: DisplayTarget + ControlSurface + 'static,
        S: Scheduler<T> + ?Sized,
    {
        if target.len() != self.array.len() {
            return Err(PlaybackError::CardinalityMismatch {
                expected: self.array.len(),
                actual: target.len(),
            }
            .into());
        }

        self.stop();
        target.render_initial(&self.array);

        let input = self.array.clone();
        let mut context = RunContext::new(std::mem::take(&mut self.array), algorithm, speed);
        let log = context.generate();
        let (steps, comparisons, relocations) = (log.len(), log.comparisons(), log.relocations());
        let (algorithm, speed) = (context.algorithm(), context.speed());
        self.array = context.into_array();

        target.set_controls_enabled(false);
        let token = match self.player.play(log, speed.pace(), target, scheduler, |t: &mut T| {
            t.set_controls_enabled(true)
        }) {
            Ok(token) => token,
            Err(e) => {
                target.set_controls_enabled(true);
                return Err(e.into());
            }
        };
        self.active = Some(token);

        info!(
            algorithm = algorithm.name(),
            speed = speed.value(),
            generation = token.generation(),
            steps,
            relocations,
            "run started"
        );

        Ok(RunReport {
            algorithm,
            speed,
            input,
            sorted: self.array.clone(),
            steps,
            comparisons,
            relocations,
            token,
        })
    }

    /// Abandon the current playback and show the sorted result
    pub fn skip_to_end<T>(&mut self, target: &mut T)
    where
        T: DisplayTarget + ControlSurface,
    {
        if self.stop() {
            info!("run skipped to end");
        }
        target.render_initial(&self.array);
        target.set_controls_enabled(true);
    }

    /// Invalidate the active run's pending effects; true if one was playing
    fn stop(&mut self) -> bool {
        let was_active = self.has_active_run();
        if self.active.take().is_some() {
            self.player.cancel();
        }
        was_active
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::{BarRow, TimerQueue};

    fn controller() -> RunController {
        RunController::new(ArrayConfig::default(), Some(7))
    }

    #[test]
    fn test_generate_respects_config() {
        let mut row = BarRow::new();
        let mut ctl = RunController::new(ArrayConfig::new(12, 10, 20).unwrap(), Some(1));
        let values = ctl.generate(&mut row).to_vec();

        assert_eq!(values.len(), 12);
        assert!(values.iter().all(|v| (10..=20).contains(v)));
        assert_eq!(row.values(), values);
    }

    #[test]
    fn test_seed_makes_generation_reproducible() {
        let (mut a, mut b) = (BarRow::new(), BarRow::new());
        let first = controller().generate(&mut a).to_vec();
        let second = controller().generate(&mut b).to_vec();
        assert_eq!(first, second);
    }

    #[test]
    fn test_run_disables_then_completion_enables() {
        let mut row = BarRow::new();
        let mut queue = TimerQueue::new();
        let mut ctl = controller();
        ctl.load(vec![4, 3, 2, 1], &mut row);

        let report = ctl
            .run(Algorithm::Selection, SpeedLevel::MAX, &mut row, &mut queue)
            .unwrap();

        assert_eq!(report.sorted, vec![1, 2, 3, 4]);
        assert_eq!(ctl.array(), &[1, 2, 3, 4]);
        assert!(!row.controls_enabled());

        queue.run_until_idle(&mut row);
        assert!(row.controls_enabled());
        assert_eq!(row.values(), vec![1, 2, 3, 4]);
    }

    #[test]
    fn test_context_keeps_run_settings() {
        let mut context = RunContext::new(vec![3, 1, 2], Algorithm::Insertion, SpeedLevel::MAX);
        assert_eq!(context.algorithm(), Algorithm::Insertion);
        assert_eq!(context.speed(), SpeedLevel::MAX);

        let log = context.generate();
        assert_eq!(log.slots(), 3);
        assert_eq!(context.array(), &[1, 2, 3]);
    }

    #[test]
    fn test_new_run_supersedes_previous_token() {
        let mut row = BarRow::new();
        let mut queue = TimerQueue::new();
        let mut ctl = controller();
        ctl.load(vec![2, 1, 3], &mut row);

        let first = ctl
            .run(Algorithm::Bubble, SpeedLevel::MIN, &mut row, &mut queue)
            .unwrap();
        let second = ctl
            .run(Algorithm::Quick, SpeedLevel::MAX, &mut row, &mut queue)
            .unwrap();

        assert!(second.token.generation() > first.token.generation());
        assert_eq!((second.algorithm, second.speed), (Algorithm::Quick, SpeedLevel::MAX));
        assert!(ctl.has_active_run());

        queue.run_until_idle(&mut row);
        assert!(row.controls_enabled());
        assert_eq!(row.values(), vec![1, 2, 3]);
    }

    #[test]
    fn test_empty_array_completes_immediately() {
        let mut row = BarRow::new();
        let mut queue = TimerQueue::new();
        let mut ctl = controller();
        ctl.load(Vec::new(), &mut row);

        let report = ctl
            .run(Algorithm::Merge, SpeedLevel::default(), &mut row, &mut queue)
            .unwrap();

        assert_eq!(report.steps, 0);
        assert!(queue.is_idle());
        assert!(row.controls_enabled());
    }

    #[test]
    fn test_mismatched_display_leaves_array_untouched() {
        let mut row = BarRow::from_values(&[1, 2]);
        let mut queue = TimerQueue::new();
        let mut ctl = controller();
        ctl.load(vec![3, 2, 1], &mut BarRow::new());

        let result = ctl.run(Algorithm::Bubble, SpeedLevel::default(), &mut row, &mut queue);
        assert!(matches!(
            result,
            Err(RunError::Playback(PlaybackError::CardinalityMismatch { .. }))
        ));
        assert_eq!(ctl.array(), &[3, 2, 1]);
    }
}
