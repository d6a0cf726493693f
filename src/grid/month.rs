//! Month view: whole weeks covering a month, a capped event list per cell.

use chrono::{Datelike, Duration, NaiveDate};

use super::day_grid::GridHost;
use super::drag::Reschedule;
use super::editor::SharedSurfaces;
use super::week::{bucket_for_day, drop_on_day};
use crate::models::event::{Event, EventId};
use crate::utils::date::month_grid_bounds;

#[derive(Debug, Clone, PartialEq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub outside_month: bool,
    pub is_today: bool,
    /// Visible events, earliest start first
    pub events: Vec<EventId>,
    /// Events hidden behind the "+N more" marker
    pub overflow: usize,
}

impl MonthCell {
    pub fn overflow_label(&self) -> Option<String> {
        (self.overflow > 0).then(|| format!("+{} more", self.overflow))
    }
}

pub struct MonthGrid {
    month: NaiveDate,
    first_day_of_week: u8,
    cell_cap: usize,
    events: Vec<Event>,
    cells: Vec<MonthCell>,
    surfaces: SharedSurfaces,
}

impl MonthGrid {
    pub fn new(date: NaiveDate, first_day_of_week: u8, cell_cap: usize, surfaces: SharedSurfaces) -> Self {
        let mut grid = Self {
            month: date.with_day(1).unwrap_or(date),
            first_day_of_week,
            cell_cap,
            events: Vec::new(),
            cells: Vec::new(),
            surfaces,
        };
        grid.rebuild(None);
        grid
    }

    pub fn month(&self) -> NaiveDate {
        self.month
    }

    pub fn set_date(&mut self, date: NaiveDate) {
        let month = date.with_day(1).unwrap_or(date);
        if month != self.month {
            self.month = month;
            self.events.clear();
            self.rebuild(None);
        }
    }

    pub fn set_snapshot(&mut self, events: &[Event], today: NaiveDate, snap: Duration) {
        let (first, last) = month_grid_bounds(self.month, self.first_day_of_week);
        self.events = events
            .iter()
            .filter(|e| e.end.date_naive() >= first && e.start.date_naive() <= last)
            .map(|e| e.clone().normalized(snap))
            .collect();
        self.rebuild(Some(today));
    }

    fn rebuild(&mut self, today: Option<NaiveDate>) {
        let (first, last) = month_grid_bounds(self.month, self.first_day_of_week);
        let days = (last - first).num_days() + 1;
        self.cells = (0..days)
            .map(|offset| {
                let date = first + Duration::days(offset);
                let mut events = bucket_for_day(&self.events, date);
                let overflow = events.len().saturating_sub(self.cell_cap);
                events.truncate(self.cell_cap);
                MonthCell {
                    date,
                    outside_month: date.month() != self.month.month(),
                    is_today: Some(date) == today,
                    events,
                    overflow,
                }
            })
            .collect();
    }

    pub fn cells(&self) -> &[MonthCell] {
        &self.cells
    }

    /// Cells grouped into rows of seven.
    pub fn weeks(&self) -> impl Iterator<Item = &[MonthCell]> {
        self.cells.chunks(7)
    }

    pub fn cell(&self, date: NaiveDate) -> Option<&MonthCell> {
        self.cells.iter().find(|c| c.date == date)
    }

    pub fn event(&self, event_id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    pub fn drop_event(&self, event_id: EventId, target: NaiveDate, host: &mut dyn GridHost) -> Option<Reschedule> {
        drop_on_day(&self.events, event_id, target, &self.surfaces, host)
    }
}
