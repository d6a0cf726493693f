//! Injected time and the grid's polled timers.
//!
//! The grid runs inside a single-threaded UI loop, so timers are deadlines that
//! the owner polls once per frame. Nothing here spawns threads or sleeps.

use chrono::{DateTime, Local};
use std::cell::Cell;
use std::time::{Duration, Instant};

pub trait Clock {
    /// Wall-clock time, for the now-indicator
    fn now(&self) -> DateTime<Local>;
    /// Monotonic time, for gesture timers
    fn instant(&self) -> Instant;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn instant(&self) -> Instant {
        Instant::now()
    }
}

/// Clock that only moves when told to.
#[derive(Debug)]
pub struct ManualClock {
    base_time: DateTime<Local>,
    base_instant: Instant,
    elapsed: Cell<Duration>,
}

impl ManualClock {
    pub fn starting_at(time: DateTime<Local>) -> Self {
        Self {
            base_time: time,
            base_instant: Instant::now(),
            elapsed: Cell::new(Duration::ZERO),
        }
    }

    pub fn advance(&self, by: Duration) {
        self.elapsed.set(self.elapsed.get() + by);
    }

    pub fn advance_ms(&self, ms: u64) {
        self.advance(Duration::from_millis(ms));
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Local> {
        let elapsed = chrono::Duration::from_std(self.elapsed.get()).unwrap_or_else(|_| chrono::Duration::zero());
        self.base_time + elapsed
    }

    fn instant(&self) -> Instant {
        self.base_instant + self.elapsed.get()
    }
}

/// A single cancellable deadline.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OneShot {
    due: Option<Instant>,
}

impl OneShot {
    /// Arm (or re-arm) the deadline `delay` from `now`.
    pub fn arm(&mut self, now: Instant, delay: Duration) {
        self.due = Some(now + delay);
    }

    /// Returns whether a deadline was pending.
    pub fn cancel(&mut self) -> bool {
        self.due.take().is_some()
    }

    pub fn is_armed(&self) -> bool {
        self.due.is_some()
    }

    /// Armed and not yet due at `now`.
    pub fn is_pending(&self, now: Instant) -> bool {
        matches!(self.due, Some(due) if now < due)
    }

    /// Disarms and returns true once the deadline has passed.
    pub fn fire(&mut self, now: Instant) -> bool {
        match self.due {
            Some(due) if due <= now => {
                self.due = None;
                true
            }
            _ => false,
        }
    }
}

/// Fixed-period repeating timer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Interval {
    period: Duration,
    next: Option<Instant>,
}

impl Interval {
    pub fn new(period: Duration) -> Self {
        Self { period, next: None }
    }

    pub fn start(&mut self, now: Instant) {
        self.next = Some(now + self.period);
    }

    pub fn stop(&mut self) {
        self.next = None;
    }

    pub fn is_running(&self) -> bool {
        self.next.is_some()
    }

    /// True at most once per poll when one or more periods have elapsed.
    /// Missed periods are coalesced.
    pub fn poll(&mut self, now: Instant) -> bool {
        let Some(mut next) = self.next else {
            return false;
        };
        if now < next {
            return false;
        }
        while next <= now {
            next += self.period;
        }
        self.next = Some(next);
        true
    }
}

/// Trailing-edge debounce: only the last value pushed within `delay` survives.
#[derive(Debug, Clone)]
pub struct Debounce<T> {
    delay: Duration,
    pending: Option<(T, Instant)>,
}

impl<T> Debounce<T> {
    pub fn new(delay: Duration) -> Self {
        Self {
            delay,
            pending: None,
        }
    }

    pub fn push(&mut self, value: T, now: Instant) {
        self.pending = Some((value, now + self.delay));
    }

    pub fn take_ready(&mut self, now: Instant) -> Option<T> {
        match &self.pending {
            Some((_, due)) if *due <= now => self.pending.take().map(|(value, _)| value),
            _ => None,
        }
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_pending(&self) -> bool {
        self.pending.is_some()
    }
}
