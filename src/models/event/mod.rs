// Event module
// Calendar event snapshot as consumed by the scheduling grid

use chrono::{DateTime, Duration, Local};
use serde::{Deserialize, Serialize};

use crate::models::calendar::CalendarId;

pub type EventId = i64;

/// Calendar event as handed to the grid by the host.
///
/// The grid never mutates events. A snapshot with `end <= start` is corrected on
/// ingestion (see [`Event::normalized`]) rather than rejected.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Event {
    pub id: EventId,
    pub title: String,
    pub calendar_id: CalendarId,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub all_day: bool,
    pub location: Option<String>,
}

impl Event {
    /// Create a timed event
    ///
    /// # Examples
    /// ```
    /// use schedule_grid::models::event::Event;
    /// use chrono::Local;
    ///
    /// let start = Local::now();
    /// let end = start + chrono::Duration::hours(1);
    /// let event = Event::new(7, "Team Meeting", 1, start, end);
    /// assert_eq!(event.duration(), chrono::Duration::hours(1));
    /// ```
    pub fn new(
        id: EventId,
        title: impl Into<String>,
        calendar_id: CalendarId,
        start: DateTime<Local>,
        end: DateTime<Local>,
    ) -> Self {
        Self {
            id,
            title: title.into(),
            calendar_id,
            start,
            end,
            all_day: false,
            location: None,
        }
    }

    /// Mark the event as all-day
    pub fn with_all_day(mut self, all_day: bool) -> Self {
        self.all_day = all_day;
        self
    }

    /// Set the event location
    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    /// Get the duration of the event
    pub fn duration(&self) -> Duration {
        self.end - self.start
    }

    /// Returns the event with `end > start` guaranteed, pushing a non-positive
    /// end out to `start + min_duration`.
    pub fn normalized(mut self, min_duration: Duration) -> Self {
        if self.end <= self.start {
            log::warn!(
                "Event {} has end {} not after start {}; correcting",
                self.id,
                self.end,
                self.start
            );
            self.end = self.start + min_duration;
        }
        self
    }

    /// Strict half-open overlap: touching endpoints do not count.
    pub fn overlaps(&self, other: &Event) -> bool {
        self.start < other.end && self.end > other.start
    }
}

/// A proposed `[start, end)` time range produced by a grid gesture.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DraftRange {
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl DraftRange {
    /// Build a range, clamping `end <= start` to `start + fallback`.
    pub fn new(start: DateTime<Local>, end: DateTime<Local>, fallback: Duration) -> Self {
        let end = if end <= start {
            log::debug!("Clamping empty draft range at {}", start);
            start + fallback
        } else {
            end
        };
        Self { start, end }
    }

    /// A range of `minutes` length starting at `start`
    pub fn starting_at(start: DateTime<Local>, minutes: i64) -> Self {
        Self {
            start,
            end: start + Duration::minutes(minutes),
        }
    }

    pub fn duration(&self) -> Duration {
        self.end - self.start
    }
}

/// Payload handed to `on_event_create` / `on_event_double_click`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EventDraft {
    /// Set when the draft describes an existing event (full-editor request).
    pub event_id: Option<EventId>,
    pub title: Option<String>,
    pub calendar_id: Option<CalendarId>,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
}

impl EventDraft {
    pub fn from_range(range: DraftRange) -> Self {
        Self {
            event_id: None,
            title: None,
            calendar_id: None,
            start: range.start,
            end: range.end,
        }
    }

    pub fn from_event(event: &Event) -> Self {
        Self {
            event_id: Some(event.id),
            title: Some(event.title.clone()),
            calendar_id: Some(event.calendar_id),
            start: event.start,
            end: event.end,
        }
    }

    pub fn range(&self) -> DraftRange {
        DraftRange {
            start: self.start,
            end: self.end,
        }
    }

    /// Serialize for hosts that forward drafts to a JSON API
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}
