//! Week view: seven day columns with drag-to-day rescheduling.

use chrono::{Duration, NaiveDate};

use super::day_grid::GridHost;
use super::drag::{DragController, Reschedule};
use super::editor::SharedSurfaces;
use crate::models::event::{Event, EventId};
use crate::utils::date::week_start;

#[derive(Debug, Clone, PartialEq)]
pub struct WeekColumn {
    pub date: NaiveDate,
    pub is_today: bool,
    /// Sorted by start time
    pub events: Vec<EventId>,
}

/// Ids of the events that start or end on `date`, earliest start first.
pub(crate) fn bucket_for_day(events: &[Event], date: NaiveDate) -> Vec<EventId> {
    let mut day: Vec<&Event> = events
        .iter()
        .filter(|e| e.start.date_naive() == date || e.end.date_naive() == date)
        .collect();
    day.sort_by(|a, b| a.start.cmp(&b.start).then(a.id.cmp(&b.id)));
    day.into_iter().map(|e| e.id).collect()
}

/// Reschedule `event_id` onto `target`, keeping its time of day and duration.
///
/// Dropping on the event's own day, or onto a grid whose host has no move
/// handler, is a no-op.
pub(crate) fn drop_on_day(
    events: &[Event],
    event_id: EventId,
    target: NaiveDate,
    surfaces: &SharedSurfaces,
    host: &mut dyn GridHost,
) -> Option<Reschedule> {
    if surfaces.borrow().is_modal_open() {
        log::trace!("drop ignored while a modal surface is open");
        return None;
    }
    let event = events.iter().find(|e| e.id == event_id)?;
    if event.start.date_naive() == target {
        return None;
    }
    if !host.can_move() {
        log::debug!("no move handler bound; reverting drop of event {}", event_id);
        return None;
    }
    let moved = DragController::reschedule_to_day(event, target);
    log::info!("moving event {} to {}", event_id, target);
    host.on_event_move(moved.event_id, moved.new_start, moved.new_end);
    Some(moved)
}

pub struct WeekGrid {
    start: NaiveDate,
    first_day_of_week: u8,
    events: Vec<Event>,
    columns: Vec<WeekColumn>,
    surfaces: SharedSurfaces,
}

impl WeekGrid {
    pub fn new(date: NaiveDate, first_day_of_week: u8, surfaces: SharedSurfaces) -> Self {
        let start = week_start(date, first_day_of_week);
        Self {
            start,
            first_day_of_week,
            events: Vec::new(),
            columns: Self::empty_columns(start),
            surfaces,
        }
    }

    fn empty_columns(start: NaiveDate) -> Vec<WeekColumn> {
        (0..7)
            .map(|offset| WeekColumn {
                date: start + Duration::days(offset),
                is_today: false,
                events: Vec::new(),
            })
            .collect()
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.start + Duration::days(6)
    }

    pub fn days(&self) -> impl Iterator<Item = NaiveDate> + '_ {
        self.columns.iter().map(|c| c.date)
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        let start = week_start(date, self.first_day_of_week);
        if start != self.start {
            self.start = start;
            self.columns = Self::empty_columns(start);
            self.events.clear();
        }
    }

    pub fn set_snapshot(&mut self, events: &[Event], today: NaiveDate, snap: Duration) {
        let (first, last) = (self.start, self.end());
        self.events = events
            .iter()
            .filter(|e| e.end.date_naive() >= first && e.start.date_naive() <= last)
            .map(|e| e.clone().normalized(snap))
            .collect();
        for column in &mut self.columns {
            column.is_today = column.date == today;
            column.events = bucket_for_day(&self.events, column.date);
        }
    }

    pub fn columns(&self) -> &[WeekColumn] {
        &self.columns
    }

    pub fn event(&self, event_id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    /// Column under `x` in a week of `width` pixels.
    pub fn day_at_x(&self, x: f32, width: f32) -> Option<NaiveDate> {
        if width <= 0.0 || !(0.0..width).contains(&x) {
            return None;
        }
        let index = ((x / width) * 7.0).floor() as usize;
        self.columns.get(index).map(|c| c.date)
    }

    pub fn drop_event(&self, event_id: EventId, target: NaiveDate, host: &mut dyn GridHost) -> Option<Reschedule> {
        drop_on_day(&self.events, event_id, target, &self.surfaces, host)
    }
}
