// Test fixtures - reusable test data
// Provides a recording host and a grid wired to a manual clock
#![allow(dead_code)]

use chrono::{DateTime, Local, NaiveDate, TimeZone};
use std::rc::Rc;

use schedule_grid::grid::{DayGrid, GridHost, ManualClock, SharedSurfaces, SurfaceStack};
use schedule_grid::models::calendar::Calendar;
use schedule_grid::models::event::{Event, EventDraft, EventId};
use schedule_grid::models::settings::GridSettings;

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, March 10, 2025
    pub fn monday() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 3, 10).unwrap()
    }

    /// Local time on `monday()`
    pub fn at(hour: u32, minute: u32) -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, hour, minute, 0).unwrap()
    }
}

/// Host that records every callback.
#[derive(Debug)]
pub struct RecordingHost {
    pub clicked: Vec<EventId>,
    pub full_editor: Vec<EventDraft>,
    pub created: Vec<EventDraft>,
    pub moved: Vec<(EventId, DateTime<Local>, DateTime<Local>)>,
    pub move_enabled: bool,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self {
            clicked: Vec::new(),
            full_editor: Vec::new(),
            created: Vec::new(),
            moved: Vec::new(),
            move_enabled: true,
        }
    }

    pub fn read_only() -> Self {
        Self {
            move_enabled: false,
            ..Self::new()
        }
    }
}

impl GridHost for RecordingHost {
    fn on_event_click(&mut self, event: &Event) {
        self.clicked.push(event.id);
    }

    fn on_event_double_click(&mut self, draft: &EventDraft) {
        self.full_editor.push(draft.clone());
    }

    fn on_event_create(&mut self, draft: &EventDraft) {
        self.created.push(draft.clone());
    }

    fn on_event_move(&mut self, event_id: EventId, new_start: DateTime<Local>, new_end: DateTime<Local>) {
        self.moved.push((event_id, new_start, new_end));
    }

    fn can_move(&self) -> bool {
        self.move_enabled
    }
}

/// 08:00 day start, 64px hours, 15 minute snap
pub fn settings() -> GridSettings {
    GridSettings {
        day_start_hour: 8,
        visible_hours: 14,
        ..GridSettings::default()
    }
}

pub fn calendars() -> Vec<Calendar> {
    vec![Calendar::new(1, "Work").primary(), Calendar::new(2, "Home").with_color("#16a34a")]
}

pub fn clock() -> Rc<ManualClock> {
    Rc::new(ManualClock::starting_at(dates::at(8, 30)))
}

pub fn day_grid(clock: Rc<ManualClock>, surfaces: SharedSurfaces, events: &[Event]) -> DayGrid {
    let mut grid = DayGrid::new(dates::monday(), settings(), clock, surfaces);
    grid.set_snapshot(events, &calendars());
    grid
}

pub fn lone_grid(clock: Rc<ManualClock>, events: &[Event]) -> DayGrid {
    day_grid(clock, SurfaceStack::shared(), events)
}
