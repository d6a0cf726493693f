//! Current-time line, refreshed on a fixed tick.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

use super::mapper::TimeSpaceMapper;
use super::timer::Interval;

#[derive(Debug, Clone)]
pub struct NowIndicator {
    interval: Interval,
    now: Option<DateTime<Local>>,
}

impl NowIndicator {
    pub fn new(period: Duration) -> Self {
        Self {
            interval: Interval::new(period),
            now: None,
        }
    }

    /// Record the current time and start ticking.
    pub fn mount(&mut self, now: DateTime<Local>, instant: Instant) {
        self.now = Some(now);
        self.interval.start(instant);
    }

    pub fn unmount(&mut self) {
        self.interval.stop();
        self.now = None;
    }

    pub fn is_running(&self) -> bool {
        self.interval.is_running()
    }

    /// Refresh the recorded time when a tick is due. Returns true on refresh.
    pub fn poll(&mut self, now: DateTime<Local>, instant: Instant) -> bool {
        if !self.interval.poll(instant) {
            return false;
        }
        self.now = Some(now);
        true
    }

    pub fn current(&self) -> Option<DateTime<Local>> {
        self.now
    }

    /// Offset of the line, or `None` when the time is outside the rendered span.
    pub fn top(&self, mapper: &TimeSpaceMapper) -> Option<f32> {
        let now = self.now?;
        mapper.contains(now).then(|| mapper.time_to_pixel(now))
    }
}
