//! In-memory event store standing in for the persistence layer.

use chrono::{DateTime, Duration, Local, NaiveDate, NaiveTime};

use crate::grid::GridHost;
use crate::models::calendar::Calendar;
use crate::models::event::{Event, EventDraft, EventId};
use crate::utils::date::local_datetime;

pub struct EventStore {
    events: Vec<Event>,
    calendars: Vec<Calendar>,
    next_id: EventId,
    /// Draft waiting for the full editor, set by double-click and "more options"
    pub full_editor: Option<EventDraft>,
    pub last_clicked: Option<EventId>,
    pub read_only: bool,
}

impl EventStore {
    pub fn new(calendars: Vec<Calendar>) -> Self {
        Self {
            events: Vec::new(),
            calendars,
            next_id: 1,
            full_editor: None,
            last_clicked: None,
            read_only: false,
        }
    }

    /// A store with a few events around `today` to play with.
    pub fn with_sample_data(today: NaiveDate) -> Self {
        let mut store = Self::new(vec![
            Calendar::new(1, "Personal").with_color("#16a34a"),
            Calendar::new(2, "Work").primary(),
            Calendar::new(3, "Family").with_color("#e11d48"),
        ]);
        let at = |day_offset: i64, hour: u32, minute: u32| -> DateTime<Local> {
            let time = NaiveTime::from_hms_opt(hour, minute, 0).unwrap_or(NaiveTime::MIN);
            local_datetime(today + Duration::days(day_offset), time)
        };
        store.insert("Standup", 2, at(0, 9, 0), at(0, 9, 15));
        store.insert("Design review", 2, at(0, 9, 0), at(0, 10, 0));
        store.insert("Pairing", 2, at(0, 9, 30), at(0, 10, 30));
        store.insert("Lunch", 1, at(0, 12, 0), at(0, 13, 0));
        store.insert("School run", 3, at(1, 15, 0), at(1, 15, 45));
        store.insert("Planning", 2, at(2, 10, 0), at(2, 11, 30));
        log::debug!("sample data loaded: {} events", store.events.len());
        store
    }

    fn insert(&mut self, title: &str, calendar_id: i64, start: DateTime<Local>, end: DateTime<Local>) -> EventId {
        let id = self.next_id;
        self.next_id += 1;
        self.events.push(Event::new(id, title, calendar_id, start, end));
        id
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn calendars(&self) -> &[Calendar] {
        &self.calendars
    }

    /// Create or update from a full-editor draft.
    pub fn save_draft(&mut self, draft: &EventDraft) {
        let title = draft.title.clone().unwrap_or_else(|| "New event".to_string());
        let calendar_id = draft
            .calendar_id
            .or_else(|| self.calendars.first().map(|c| c.id))
            .unwrap_or_default();
        match draft.event_id.and_then(|id| self.events.iter_mut().find(|e| e.id == id)) {
            Some(event) => {
                event.title = title;
                event.calendar_id = calendar_id;
                event.start = draft.start;
                event.end = draft.end;
            }
            None => {
                self.insert(&title, calendar_id, draft.start, draft.end);
            }
        }
    }
}

impl GridHost for EventStore {
    fn on_event_click(&mut self, event: &Event) {
        self.last_clicked = Some(event.id);
    }

    fn on_event_double_click(&mut self, draft: &EventDraft) {
        self.full_editor = Some(draft.clone());
    }

    fn on_event_create(&mut self, draft: &EventDraft) {
        self.save_draft(draft);
    }

    fn on_event_move(&mut self, event_id: EventId, new_start: DateTime<Local>, new_end: DateTime<Local>) {
        if let Some(event) = self.events.iter_mut().find(|e| e.id == event_id) {
            event.start = new_start;
            event.end = new_end;
        }
    }

    fn can_move(&self) -> bool {
        !self.read_only
    }
}
