//! Pixel offset ⇄ calendar time conversion for a single grid column.
//!
//! All offsets are grid-relative: `y = 0` is the day-start anchor.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};

use crate::utils::date::local_datetime;

/// Immutable geometry of one grid instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridGeometry {
    pub hour_height_px: f32,
    pub snap_interval_minutes: i64,
    /// Length of the rendered span starting at the anchor
    pub visible_minutes: i64,
}

impl GridGeometry {
    pub fn pixels_per_minute(&self) -> f32 {
        self.hour_height_px / 60.0
    }

    pub fn grid_height(&self) -> f32 {
        self.minutes_to_px(self.visible_minutes as f64)
    }

    fn minutes_to_px(&self, minutes: f64) -> f32 {
        (minutes * self.hour_height_px as f64 / 60.0) as f32
    }

    fn px_to_minutes(&self, y: f32) -> f64 {
        y as f64 * 60.0 / self.hour_height_px as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TimeSpaceMapper {
    anchor: DateTime<Local>,
    geometry: GridGeometry,
}

impl TimeSpaceMapper {
    pub fn new(anchor: DateTime<Local>, geometry: GridGeometry) -> Self {
        Self { anchor, geometry }
    }

    /// Mapper for `date` whose `y = 0` sits at `day_start` local time.
    pub fn for_day(date: NaiveDate, day_start: NaiveTime, geometry: GridGeometry) -> Self {
        Self::new(local_datetime(date, day_start), geometry)
    }

    pub fn anchor(&self) -> DateTime<Local> {
        self.anchor
    }

    pub fn geometry(&self) -> GridGeometry {
        self.geometry
    }

    /// End of the rendered span (exclusive).
    pub fn span_end(&self) -> DateTime<Local> {
        self.anchor + Duration::minutes(self.geometry.visible_minutes)
    }

    pub fn contains(&self, instant: DateTime<Local>) -> bool {
        instant >= self.anchor && instant < self.span_end()
    }

    /// Snapped time for a grid-relative offset.
    ///
    /// Offsets are clamped into the grid first, then rounded half-up to the snap
    /// interval.
    pub fn pixel_to_time(&self, y: f32) -> DateTime<Local> {
        let y = if y.is_finite() {
            y.clamp(0.0, self.geometry.grid_height())
        } else {
            0.0
        };
        let minutes = self.geometry.px_to_minutes(y);
        let snap = self.geometry.snap_interval_minutes as f64;
        let snapped = ((minutes / snap) + 0.5).floor() * snap;
        self.anchor + Duration::minutes(snapped as i64)
    }

    /// Offset of `instant` from the anchor. Unclamped: may be negative or past
    /// the grid bottom.
    pub fn time_to_pixel(&self, instant: DateTime<Local>) -> f32 {
        let seconds = (instant - self.anchor).num_seconds() as f64;
        self.geometry.minutes_to_px(seconds / 60.0)
    }

    pub fn duration_to_pixels(&self, duration: Duration) -> f32 {
        self.geometry.minutes_to_px(duration.num_seconds() as f64 / 60.0)
    }
}
