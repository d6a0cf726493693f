use chrono::{DateTime, Duration, Local, NaiveDate};

use super::mapper::TimeSpaceMapper;
use crate::models::event::{Event, EventId};
use crate::utils::date::with_date;

/// Live state of a press-and-drag on an existing event.
///
/// Pointer values are screen coordinates. `grab_offset_y` is how far below the
/// event's top edge the pointer was pressed, so the event's top (not the pointer)
/// is what lands on the snapped time.
#[derive(Clone, Debug, PartialEq)]
pub struct DragSession {
    pub event_id: EventId,
    pub original_start: DateTime<Local>,
    pub original_end: DateTime<Local>,
    pub pointer_start_y: f32,
    pub grab_offset_y: f32,
    /// Total pointer travel since the press
    pub delta_y: f32,
}

impl DragSession {
    /// Session for `event` grabbed at screen `pointer_y` while its top edge is at
    /// screen `event_top_y`.
    pub fn from_event(event: &Event, pointer_y: f32, event_top_y: f32) -> Self {
        Self {
            event_id: event.id,
            original_start: event.start,
            original_end: event.end,
            pointer_start_y: pointer_y,
            grab_offset_y: pointer_y - event_top_y,
            delta_y: 0.0,
        }
    }

    pub fn duration(&self) -> Duration {
        self.original_end - self.original_start
    }
}

/// Outcome of a completed drag, ready for the host's move commit.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Reschedule {
    pub event_id: EventId,
    pub new_start: DateTime<Local>,
    pub new_end: DateTime<Local>,
}

/// Turns drag deltas into duration-preserving reschedules.
pub struct DragController;

impl DragController {
    /// Where the dragged event lands for a total pointer travel of `delta_y`.
    ///
    /// `grid_screen_top` is the screen y of the grid's `y = 0`.
    pub fn reschedule(
        session: &DragSession,
        delta_y: f32,
        grid_screen_top: f32,
        mapper: &TimeSpaceMapper,
    ) -> Reschedule {
        let pointer_end_y = session.pointer_start_y + delta_y;
        let relative_y = pointer_end_y - grid_screen_top - session.grab_offset_y;
        let new_start = mapper.pixel_to_time(relative_y);
        Reschedule {
            event_id: session.event_id,
            new_start,
            new_end: new_start + session.duration(),
        }
    }

    /// Drop an event on another day (week/month views), keeping its local time of
    /// day and its duration.
    pub fn reschedule_to_day(event: &Event, target: NaiveDate) -> Reschedule {
        let new_start = with_date(event.start, target);
        Reschedule {
            event_id: event.id,
            new_start,
            new_end: new_start + event.duration(),
        }
    }
}
