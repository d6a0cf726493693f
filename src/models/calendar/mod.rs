// Calendar module
// Read-only calendar reference data and color lookup

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub type CalendarId = i64;

/// Fallback when a calendar has no color or is unknown.
pub const DEFAULT_CALENDAR_COLOR: &str = "#3b82f6";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Calendar {
    pub id: CalendarId,
    pub name: String,
    pub color: Option<String>,
    pub is_primary: bool,
}

impl Calendar {
    pub fn new(id: CalendarId, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            color: None,
            is_primary: false,
        }
    }

    pub fn with_color(mut self, color: impl Into<String>) -> Self {
        self.color = Some(color.into());
        self
    }

    pub fn primary(mut self) -> Self {
        self.is_primary = true;
        self
    }
}

/// Calendar id → display color, built once per snapshot.
#[derive(Debug, Clone, Default)]
pub struct CalendarPalette {
    colors: HashMap<CalendarId, String>,
    default_calendar: Option<CalendarId>,
}

impl CalendarPalette {
    pub fn from_calendars(calendars: &[Calendar]) -> Self {
        let colors = calendars
            .iter()
            .map(|cal| {
                let color = cal
                    .color
                    .as_deref()
                    .map(str::trim)
                    .filter(|c| !c.is_empty())
                    .unwrap_or(DEFAULT_CALENDAR_COLOR)
                    .to_string();
                (cal.id, color)
            })
            .collect();

        let default_calendar = calendars
            .iter()
            .find(|cal| cal.is_primary)
            .or_else(|| calendars.first())
            .map(|cal| cal.id);

        Self {
            colors,
            default_calendar,
        }
    }

    pub fn color_for(&self, calendar_id: CalendarId) -> &str {
        self.colors
            .get(&calendar_id)
            .map(String::as_str)
            .unwrap_or(DEFAULT_CALENDAR_COLOR)
    }

    /// Primary calendar, else the first one listed.
    pub fn default_calendar(&self) -> Option<CalendarId> {
        self.default_calendar
    }
}
