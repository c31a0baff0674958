//! Deferred execution of step effects
//!
//! [`Scheduler`] is the port the player schedules through. [`TimerQueue`] is
//! the single-queue implementation: a virtual clock that only moves when the
//! owner calls [`TimerQueue::advance`]. The TUI advances it by real elapsed
//! time; tests advance it by hand.
//!
//! # Ordering
//!
//! Timers fire in `(due, sequence)` order. Two effects with the same due time
//! fire in the order they were scheduled, so a monotonically increasing delay
//! sequence always fires in scheduling order.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::time::Duration;

/// Deferred unit of work applied to the display target when it fires
pub type Effect<T> = Box<dyn FnOnce(&mut T)>;

/// Schedules effects relative to the scheduler's current time
pub trait Scheduler<T> {
    fn schedule(&mut self, effect: Effect<T>, delay: Duration);
}

struct Timer<T> {
    due: Duration,
    sequence: u64,
    effect: Effect<T>,
}

impl<T> PartialEq for Timer<T> {
    fn eq(&self, other: &Self) -> bool {
        self.due == other.due && self.sequence == other.sequence
    }
}

impl<T> Eq for Timer<T> {}

impl<T> PartialOrd for Timer<T> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<T> Ord for Timer<T> {
    // Reversed so the max-heap pops the earliest timer first
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .due
            .cmp(&self.due)
            .then_with(|| other.sequence.cmp(&self.sequence))
    }
}

/// Virtual-clock timer queue
pub struct TimerQueue<T> {
    now: Duration,
    next_sequence: u64,
    timers: BinaryHeap<Timer<T>>,
}

impl<T> TimerQueue<T> {
    pub fn new() -> Self {
        TimerQueue {
            now: Duration::ZERO,
            next_sequence: 0,
            timers: BinaryHeap::new(),
        }
    }

    /// Current virtual time
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Number of effects still waiting to fire
    pub fn pending(&self) -> usize {
        self.timers.len()
    }

    pub fn is_idle(&self) -> bool {
        self.timers.is_empty()
    }

    /// Due time of the next effect, if any
    pub fn next_due(&self) -> Option<Duration> {
        self.timers.peek().map(|t| t.due)
    }

    /// Move the clock forward by `elapsed`, firing every effect that falls due
    ///
    /// Returns the number of effects fired.
    pub fn advance(&mut self, elapsed: Duration, target: &mut T) -> usize {
        let until = self.now.saturating_add(elapsed);
        let mut fired = 0;

        while let Some(timer) = self.pop_due(until) {
            self.now = timer.due;
            (timer.effect)(target);
            fired += 1;
        }

        self.now = until;
        fired
    }

    /// Fire everything that is pending, jumping the clock to the last due time
    pub fn run_until_idle(&mut self, target: &mut T) -> usize {
        match self.timers.iter().map(|t| t.due).max() {
            Some(last) => {
                let elapsed = last.saturating_sub(self.now);
                self.advance(elapsed, target)
            }
            None => 0,
        }
    }

    /// Drop every pending effect without running it
    pub fn clear(&mut self) -> usize {
        let dropped = self.timers.len();
        self.timers.clear();
        dropped
    }

    fn pop_due(&mut self, until: Duration) -> Option<Timer<T>> {
        match self.timers.peek() {
            Some(timer) if timer.due <= until => self.timers.pop(),
            _ => None,
        }
    }
}

impl<T> Default for TimerQueue<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> Scheduler<T> for TimerQueue<T> {
    fn schedule(&mut self, effect: Effect<T>, delay: Duration) {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        self.timers.push(Timer {
            due: self.now.saturating_add(delay),
            sequence,
            effect,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(value: u32) -> Effect<Vec<u32>> {
        Box::new(move |out: &mut Vec<u32>| out.push(value))
    }

    #[test]
    fn test_fires_in_due_order() {
        let mut queue = TimerQueue::new();
        queue.schedule(record(3), Duration::from_millis(30));
        queue.schedule(record(1), Duration::from_millis(10));
        queue.schedule(record(2), Duration::from_millis(20));

        let mut out = Vec::new();
        assert_eq!(queue.advance(Duration::from_millis(15), &mut out), 1);
        assert_eq!(out, vec![1]);
        assert_eq!(queue.run_until_idle(&mut out), 2);
        assert_eq!(out, vec![1, 2, 3]);
        assert_eq!(queue.now(), Duration::from_millis(30));
    }

    #[test]
    fn test_equal_due_keeps_schedule_order() {
        let mut queue = TimerQueue::new();
        for value in 0..5 {
            queue.schedule(record(value), Duration::from_millis(7));
        }

        let mut out = Vec::new();
        queue.advance(Duration::from_millis(7), &mut out);
        assert_eq!(out, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_delay_is_relative_to_now() {
        let mut queue = TimerQueue::new();
        let mut out = Vec::new();
        queue.advance(Duration::from_millis(100), &mut out);
        queue.schedule(record(9), Duration::from_millis(5));

        assert_eq!(queue.next_due(), Some(Duration::from_millis(105)));
        assert_eq!(queue.advance(Duration::from_millis(4), &mut out), 0);
        assert_eq!(queue.advance(Duration::from_millis(1), &mut out), 1);
    }

    #[test]
    fn test_clear_drops_pending() {
        let mut queue = TimerQueue::new();
        queue.schedule(record(1), Duration::from_millis(1));
        queue.schedule(record(2), Duration::from_millis(2));

        assert_eq!(queue.clear(), 2);
        let mut out = Vec::new();
        assert_eq!(queue.run_until_idle(&mut out), 0);
        assert!(out.is_empty());
    }
}
