//! Day-view scheduling grid.
//!
//! Wires the mapper, layout, gesture classifier, drag controller, editors and the
//! now-indicator into one widget-sized state object. The host feeds it pointer
//! input in screen coordinates plus one `tick` per frame, and reads back the
//! geometry and overlays to paint.

use chrono::{DateTime, Duration, Local, NaiveDate};
use std::rc::Rc;

use super::drag::{DragController, DragSession, Reschedule};
use super::editor::{DraftError, EditorCoordinator, EditorState, SharedSurfaces};
use super::gesture::{Gesture, GestureClassifier};
use super::layout::{events_for_day, layout_day, DayLayout, LayoutConfig};
use super::mapper::TimeSpaceMapper;
use super::now_indicator::NowIndicator;
use super::timer::{Clock, Debounce};
use crate::models::calendar::{Calendar, CalendarId, CalendarPalette};
use crate::models::event::{DraftRange, Event, EventDraft, EventId};
use crate::models::settings::GridSettings;
use crate::models::ui::{GridPoint, GridRect};

/// External collaborator that owns events and reacts to classified gestures.
///
/// Calls are fire-and-forget: the grid never inspects a result.
#[cfg_attr(test, mockall::automock)]
pub trait GridHost {
    fn on_event_click(&mut self, event: &Event);
    /// Full-editor request, for a new range or an existing event
    fn on_event_double_click(&mut self, draft: &EventDraft);
    fn on_event_create(&mut self, draft: &EventDraft);
    fn on_event_move(&mut self, event_id: EventId, new_start: DateTime<Local>, new_end: DateTime<Local>);
    /// False when no move handler is bound; drags then revert.
    fn can_move(&self) -> bool;
}

#[derive(Debug, Clone, PartialEq)]
pub struct HoverLine {
    pub y: f32,
    /// Snapped time under the pointer, `HH:MM`
    pub label: String,
}

/// Ghost of the event being dragged, at the time it would land on.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DragPreview {
    pub event_id: EventId,
    pub start: DateTime<Local>,
    pub end: DateTime<Local>,
    pub top: f32,
    pub height: f32,
}

pub struct DayGrid {
    date: NaiveDate,
    settings: GridSettings,
    mapper: TimeSpaceMapper,
    layout_config: LayoutConfig,
    clock: Rc<dyn Clock>,
    gestures: GestureClassifier,
    editors: EditorCoordinator,
    now: NowIndicator,
    pointer_moves: Debounce<f32>,
    hover_y: Option<f32>,
    events: Vec<Event>,
    palette: CalendarPalette,
    layout: DayLayout,
    /// Screen position of the grid's top-left corner (`y = 0` of the mapper)
    origin: GridPoint,
}

impl DayGrid {
    pub fn new(date: NaiveDate, settings: GridSettings, clock: Rc<dyn Clock>, surfaces: SharedSurfaces) -> Self {
        let mapper = TimeSpaceMapper::for_day(date, settings.day_start(), settings.geometry());
        let mut now = NowIndicator::new(settings.now_tick());
        now.mount(clock.now(), clock.instant());

        Self {
            date,
            mapper,
            layout_config: settings.layout_config(),
            gestures: GestureClassifier::new(settings.gesture_config()),
            editors: EditorCoordinator::new(surfaces),
            pointer_moves: Debounce::new(settings.pointer_debounce()),
            now,
            clock,
            settings,
            hover_y: None,
            events: Vec::new(),
            palette: CalendarPalette::default(),
            layout: DayLayout::default(),
            origin: GridPoint::default(),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn mapper(&self) -> &TimeSpaceMapper {
        &self.mapper
    }

    pub fn settings(&self) -> &GridSettings {
        &self.settings
    }

    pub fn palette(&self) -> &CalendarPalette {
        &self.palette
    }

    pub fn editors(&self) -> &EditorCoordinator {
        &self.editors
    }

    pub fn editor_state(&self) -> &EditorState {
        self.editors.state()
    }

    pub fn set_origin(&mut self, origin: GridPoint) {
        self.origin = origin;
    }

    /// Show another day. Transient gesture state does not carry over.
    pub fn set_date(&mut self, date: NaiveDate) {
        if date == self.date {
            return;
        }
        self.date = date;
        self.mapper = TimeSpaceMapper::for_day(date, self.settings.day_start(), self.settings.geometry());
        self.gestures.reset();
        self.pointer_moves.cancel();
        self.editors.close_all();
        self.events.clear();
        self.layout = DayLayout::default();
    }

    /// Replace the event and calendar snapshot for this render.
    pub fn set_snapshot(&mut self, events: &[Event], calendars: &[Calendar]) {
        let snap = self.settings.snap_interval();
        self.events = events_for_day(events, self.date)
            .into_iter()
            .map(|event| event.clone().normalized(snap))
            .collect();
        self.palette = CalendarPalette::from_calendars(calendars);
        let refs: Vec<&Event> = self.events.iter().collect();
        self.layout = layout_day(&refs, &self.mapper, self.layout_config);
    }

    pub fn events(&self) -> &[Event] {
        &self.events
    }

    pub fn event(&self, event_id: EventId) -> Option<&Event> {
        self.events.iter().find(|e| e.id == event_id)
    }

    pub fn layout(&self) -> &DayLayout {
        &self.layout
    }

    pub fn all_day_events(&self) -> impl Iterator<Item = &Event> {
        self.layout.all_day.iter().filter_map(|id| self.event(*id))
    }

    fn to_grid(&self, screen: GridPoint) -> GridPoint {
        GridPoint::new(screen.x - self.origin.x, screen.y - self.origin.y)
    }

    fn blocked(&self, point: GridPoint) -> bool {
        let blocked = self.editors.blocks_pointer(point);
        if blocked {
            log::trace!("pointer input at {:?} ignored", point);
        }
        blocked
    }

    // --- Pointer input on empty grid space ---

    pub fn pointer_down(&mut self, screen: GridPoint) {
        let point = self.to_grid(screen);
        if self.blocked(point) {
            return;
        }
        // A press outside the open popover dismisses it.
        self.editors.close_all();
        let start_time = self.mapper.pixel_to_time(point.y);
        self.gestures.pointer_down(point, start_time);
    }

    /// Hover and selection updates are debounced; they land on the next `tick`.
    pub fn pointer_move(&mut self, screen: GridPoint) {
        let point = self.to_grid(screen);
        if self.blocked(point) || self.gestures.drag().is_some() {
            return;
        }
        self.pointer_moves.push(point.y, self.clock.instant());
    }

    pub fn pointer_up(&mut self, screen: GridPoint, click_count: u32, host: &mut dyn GridHost) -> Option<Gesture> {
        let point = self.to_grid(screen);
        if self.blocked(point) {
            return None;
        }
        self.pointer_moves.cancel();
        self.hover_y = Some(point.y);
        let gesture = self.gestures.pointer_up(point, click_count, self.clock.instant())?;
        self.apply(&gesture, host);
        Some(gesture)
    }

    pub fn pointer_leave(&mut self) {
        self.pointer_moves.cancel();
        self.hover_y = None;
        self.gestures.pointer_leave();
    }

    // --- Drag on an existing event ---

    /// Press on an event. Returns false when the press is ignored.
    pub fn pointer_down_on_event(&mut self, event_id: EventId, screen: GridPoint) -> bool {
        if self.blocked(self.to_grid(screen)) {
            return false;
        }
        let Some(event) = self.event(event_id) else {
            log::warn!("press on unknown event {}", event_id);
            return false;
        };
        let top = self
            .layout
            .get(event_id)
            .map(|l| l.top)
            .unwrap_or_else(|| self.mapper.time_to_pixel(event.start));
        let session = DragSession::from_event(event, screen.y, self.origin.y + top);
        self.pointer_moves.cancel();
        self.gestures.begin_drag(session);
        true
    }

    /// Total pointer travel since the press. Not debounced.
    pub fn drag_to(&mut self, total_delta_y: f32) {
        self.gestures.drag_to(total_delta_y);
    }

    pub fn end_drag(&mut self, total_delta_y: f32, click_count: u32, host: &mut dyn GridHost) -> Option<Gesture> {
        let gesture = self.gestures.end_drag(total_delta_y, click_count)?;
        self.apply(&gesture, host);
        Some(gesture)
    }

    pub fn cancel_drag(&mut self) {
        if let Some(session) = self.gestures.cancel_drag() {
            log::debug!("drag of event {} cancelled", session.event_id);
        }
    }

    pub fn drag_preview(&self) -> Option<DragPreview> {
        let session = self.gestures.drag()?;
        let landing = DragController::reschedule(session, session.delta_y, self.origin.y, &self.mapper);
        let top = self.mapper.time_to_pixel(landing.new_start);
        Some(DragPreview {
            event_id: landing.event_id,
            start: landing.new_start,
            end: landing.new_end,
            top,
            height: self
                .mapper
                .duration_to_pixels(session.duration())
                .max(self.layout_config.min_height_px),
        })
    }

    // --- Timers ---

    /// Advance every timer to the clock's current time. Returns a click that
    /// completed its disambiguation window.
    pub fn tick(&mut self) -> Option<Gesture> {
        let instant = self.clock.instant();

        self.editors.sync();

        if let Some(y) = self.pointer_moves.take_ready(instant) {
            self.hover_y = Some(y);
            self.gestures.pointer_move(y);
        }

        self.now.poll(self.clock.now(), instant);

        let gesture = self.gestures.tick(instant)?;
        if let Gesture::Click { point } = gesture {
            self.open_click_editor(point);
        }
        Some(gesture)
    }

    /// Cancel every timer, drop transient state and release the editor slot.
    pub fn teardown(&mut self) {
        self.gestures.reset();
        self.pointer_moves.cancel();
        self.now.unmount();
        self.editors.close_all();
        self.hover_y = None;
        log::debug!("day grid for {} torn down", self.date);
    }

    // --- Overlays ---

    pub fn hover_line(&self) -> Option<HoverLine> {
        if self.gestures.selection().is_some() || self.gestures.drag().is_some() {
            return None;
        }
        let y = self.hover_y?;
        let time = self.mapper.pixel_to_time(y);
        Some(HoverLine {
            y,
            label: time.format("%H:%M").to_string(),
        })
    }

    /// `(top, bottom)` of the in-progress selection box.
    pub fn selection_box(&self) -> Option<(f32, f32)> {
        self.gestures.selection().map(|s| s.span())
    }

    pub fn now_line(&self) -> Option<f32> {
        self.now.top(&self.mapper)
    }

    // --- Editors ---

    pub fn set_editor_bounds(&mut self, bounds: GridRect) {
        self.editors.set_bounds(bounds);
    }

    pub fn set_quick_create_title(&mut self, title: impl Into<String>) {
        if let Some(editor) = self.editors.quick_create_mut() {
            editor.title = title.into();
        }
    }

    pub fn select_calendar(&mut self, calendar_id: CalendarId) {
        if let Some(editor) = self.editors.quick_create_mut() {
            editor.calendar_id = Some(calendar_id);
        }
    }

    pub fn submit_quick_create(&mut self, host: &mut dyn GridHost) -> Result<EventDraft, DraftError> {
        let draft = self.editors.take_submission()?;
        log::info!("creating event {:?} at {}", draft.title, draft.start);
        host.on_event_create(&draft);
        Ok(draft)
    }

    /// Escalate the quick-create draft to the full editor.
    pub fn more_options(&mut self, host: &mut dyn GridHost) -> Option<EventDraft> {
        let draft = self.editors.take_for_full_editor()?;
        host.on_event_double_click(&draft);
        Some(draft)
    }

    pub fn close_editors(&mut self) {
        self.editors.close_all();
    }

    // --- Gesture outcomes ---

    fn apply(&mut self, gesture: &Gesture, host: &mut dyn GridHost) {
        match gesture {
            Gesture::Click { point } => self.open_click_editor(*point),
            Gesture::DoubleClick { point } => {
                let start = self.mapper.pixel_to_time(point.y);
                let range = self.range_from(start, self.settings.double_click_duration_minutes);
                self.editors.close_all();
                host.on_event_double_click(&EventDraft::from_range(range));
            }
            Gesture::DragSelect { start_px, end_px, anchor } => {
                let range = DraftRange::new(
                    self.mapper.pixel_to_time(*start_px),
                    self.mapper.pixel_to_time(*end_px),
                    self.settings.snap_interval(),
                );
                self.editors.open_quick_create(range, *anchor, self.palette.default_calendar());
            }
            Gesture::EventClick { event_id } => {
                let Some(event) = self.event(*event_id) else {
                    return;
                };
                host.on_event_click(event);
                let anchor = GridPoint::new(0.0, self.layout.get(*event_id).map_or(0.0, |l| l.top));
                self.editors.open_detail(*event_id, anchor);
            }
            Gesture::EventDoubleClick { event_id } => {
                let Some(event) = self.event(*event_id) else {
                    return;
                };
                let draft = EventDraft::from_event(event);
                self.editors.close_all();
                host.on_event_double_click(&draft);
            }
            Gesture::DragMove { session, delta_y } => self.commit_move(session, *delta_y, host),
        }
    }

    fn open_click_editor(&mut self, point: GridPoint) {
        let start = self.mapper.pixel_to_time(point.y);
        let range = self.range_from(start, self.settings.click_duration_minutes);
        self.editors.open_quick_create(range, point, self.palette.default_calendar());
    }

    fn range_from(&self, start: DateTime<Local>, minutes: i64) -> DraftRange {
        DraftRange::new(start, start + Duration::minutes(minutes), self.settings.snap_interval())
    }

    fn commit_move(&mut self, session: &DragSession, delta_y: f32, host: &mut dyn GridHost) {
        if !host.can_move() {
            log::debug!("no move handler bound; reverting drag of event {}", session.event_id);
            return;
        }
        let Reschedule {
            event_id,
            new_start,
            new_end,
        } = DragController::reschedule(session, delta_y, self.origin.y, &self.mapper);
        log::info!("moving event {} to {} - {}", event_id, new_start, new_end);
        host.on_event_move(event_id, new_start, new_end);
    }
}

impl Drop for DayGrid {
    fn drop(&mut self) {
        self.teardown();
    }
}
