//! # Introduction
//!
//! sortty runs comparison sorts over a small array of magnitudes, records
//! every comparison and every value write as a [`step::Step`], and replays
//! the recording as a timed bar animation in a terminal UI built with
//! [ratatui](https://docs.rs/ratatui).
//!
//! ## Pipeline
//!
//! ```text
//! Array → Algorithm → StepLog → Player → TimerQueue → BarRow → TUI
//! ```
//!
//! 1. [`step`] — the recorded step model and the append-only [`step::StepLog`].
//! 2. [`algorithms`] — bubble, selection, insertion, quick and merge sort,
//!    each a pure function over `&mut [u32]` that fills a log.
//! 3. [`playback`] — the [`playback::Player`] that schedules one effect per
//!    step at `position * pace`, the [`playback::Scheduler`] port and its
//!    [`playback::TimerQueue`] implementation, speed levels and display
//!    targets.
//! 4. [`controller`] — owns the array, generates new ones and starts runs,
//!    locking the controls until the completion signal.
//! 5. [`config`] — defaults and array generation settings.
//! 6. [`ui`] — ratatui-based TUI; not part of the stable library API.
//!
//! Generation always finishes before playback starts: a log is complete and
//! immutable by the time its first effect is scheduled.

pub mod algorithms;
pub mod config;
pub mod controller;
pub mod playback;
pub mod step;
pub mod ui;
