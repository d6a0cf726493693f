// Settings module
// Tunables for one scheduling grid, loaded from grid.toml

use chrono::{Duration, NaiveTime};
use serde::{Deserialize, Serialize};

use crate::grid::gesture::GestureConfig;
use crate::grid::layout::LayoutConfig;
use crate::grid::mapper::GridGeometry;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GridSettings {
    /// Height of one hour row in pixels
    pub hour_height_px: f32,
    pub snap_interval_minutes: i64,
    /// Pointer travel at which a press on empty space becomes a drag-select
    pub min_drag_px: f32,
    /// Pointer travel at which a press on an event becomes a move
    pub drag_activation_px: f32,
    pub double_click_window_ms: u64,
    pub click_duration_minutes: i64,
    pub double_click_duration_minutes: i64,
    /// Events shorter than this are still drawn this tall
    pub min_event_minutes: i64,
    pub stack_step_px: f32,
    pub now_tick_secs: u64,
    pub pointer_debounce_ms: u64,
    pub day_start_hour: u32,
    pub day_start_minute: u32,
    pub visible_hours: u32,
    pub first_day_of_week: u8, // 0 = Sunday
    pub month_cell_event_cap: usize,
}

impl Default for GridSettings {
    fn default() -> Self {
        Self {
            hour_height_px: 64.0,
            snap_interval_minutes: 15,
            min_drag_px: 6.0,
            drag_activation_px: 10.0,
            double_click_window_ms: 220,
            click_duration_minutes: 30,
            double_click_duration_minutes: 60,
            min_event_minutes: 30,
            stack_step_px: 20.0,
            now_tick_secs: 60,
            pointer_debounce_ms: 16,
            day_start_hour: 0,
            day_start_minute: 0,
            visible_hours: 24,
            first_day_of_week: 0,
            month_cell_event_cap: 3,
        }
    }
}

impl GridSettings {
    /// Validate the settings
    pub fn validate(&self) -> Result<(), String> {
        if !(self.hour_height_px.is_finite() && self.hour_height_px > 0.0) {
            return Err("hour_height_px must be a positive number".to_string());
        }

        if self.snap_interval_minutes <= 0 || 60 % self.snap_interval_minutes != 0 {
            return Err("snap_interval_minutes must divide an hour evenly".to_string());
        }

        if self.min_drag_px < 0.0 || self.drag_activation_px < 0.0 || self.stack_step_px < 0.0 {
            return Err("pixel thresholds cannot be negative".to_string());
        }

        if self.click_duration_minutes <= 0
            || self.double_click_duration_minutes <= 0
            || self.min_event_minutes <= 0
        {
            return Err("default durations must be positive".to_string());
        }

        if self.day_start_hour > 23 || self.day_start_minute > 59 {
            return Err("day start must be a valid time of day".to_string());
        }

        if self.day_start_minute as i64 % self.snap_interval_minutes != 0 {
            return Err("day start must sit on a snap boundary".to_string());
        }

        if self.visible_hours == 0 || self.visible_hours > 24 {
            return Err("visible_hours must be between 1 and 24".to_string());
        }

        if self.first_day_of_week > 6 {
            return Err("first_day_of_week must be 0-6".to_string());
        }

        if self.now_tick_secs == 0 {
            return Err("now_tick_secs must be positive".to_string());
        }

        Ok(())
    }

    pub fn geometry(&self) -> GridGeometry {
        GridGeometry {
            hour_height_px: self.hour_height_px,
            snap_interval_minutes: self.snap_interval_minutes,
            visible_minutes: self.visible_hours as i64 * 60,
        }
    }

    pub fn day_start(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.day_start_hour, self.day_start_minute, 0)
            .unwrap_or(NaiveTime::MIN)
    }

    pub fn snap_interval(&self) -> Duration {
        Duration::minutes(self.snap_interval_minutes)
    }

    pub fn double_click_window(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.double_click_window_ms)
    }

    pub fn pointer_debounce(&self) -> std::time::Duration {
        std::time::Duration::from_millis(self.pointer_debounce_ms)
    }

    pub fn now_tick(&self) -> std::time::Duration {
        std::time::Duration::from_secs(self.now_tick_secs)
    }

    pub fn min_event_height_px(&self) -> f32 {
        self.min_event_minutes as f32 * self.hour_height_px / 60.0
    }

    pub fn gesture_config(&self) -> GestureConfig {
        GestureConfig {
            min_drag_px: self.min_drag_px,
            drag_activation_px: self.drag_activation_px,
            double_click_window: self.double_click_window(),
        }
    }

    pub fn layout_config(&self) -> LayoutConfig {
        LayoutConfig {
            min_height_px: self.min_event_height_px(),
            stack_step_px: self.stack_step_px,
        }
    }
}
