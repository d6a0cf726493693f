//! Single-active-editor coordination and the shared surface stack.
//!
//! Each grid owns one [`EditorCoordinator`]; its state is an enum, so quick-create
//! and detail can never be open together. Grids in the same window share a
//! [`SurfaceStack`]: the host pushes modal surfaces (full editors, dialogs) onto
//! it, and coordinators claim the single contextual-editor slot through it so an
//! editor opened in one grid closes the one open in another.

use std::cell::RefCell;
use std::rc::Rc;
use thiserror::Error;

use crate::models::calendar::CalendarId;
use crate::models::event::{DraftRange, EventDraft, EventId};
use crate::models::ui::{GridPoint, GridRect};

pub type SharedSurfaces = Rc<RefCell<SurfaceStack>>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SurfaceKind {
    /// Full-attention overlay; suppresses all grid input
    Modal,
    /// Popover anchored in a grid
    Contextual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SurfaceToken(u64);

#[derive(Debug, Default)]
pub struct SurfaceStack {
    next_id: u64,
    entries: Vec<(SurfaceToken, SurfaceKind)>,
}

impl SurfaceStack {
    pub fn shared() -> SharedSurfaces {
        Rc::new(RefCell::new(Self::default()))
    }

    pub fn push(&mut self, kind: SurfaceKind) -> SurfaceToken {
        self.next_id += 1;
        let token = SurfaceToken(self.next_id);
        self.entries.push((token, kind));
        token
    }

    /// Remove `token`. Returns false if it was already gone (evicted or popped).
    pub fn pop(&mut self, token: SurfaceToken) -> bool {
        let Some(index) = self.entries.iter().position(|(t, _)| *t == token) else {
            return false;
        };
        if index + 1 != self.entries.len() {
            log::warn!("surface {:?} popped out of order", token);
        }
        self.entries.remove(index);
        true
    }

    /// Take the contextual-editor slot, evicting whichever editor held it.
    pub fn claim_editor(&mut self) -> SurfaceToken {
        self.entries.retain(|(_, kind)| *kind != SurfaceKind::Contextual);
        self.push(SurfaceKind::Contextual)
    }

    pub fn holds(&self, token: SurfaceToken) -> bool {
        self.entries.iter().any(|(t, _)| *t == token)
    }

    pub fn is_modal_open(&self) -> bool {
        self.entries.iter().any(|(_, kind)| *kind == SurfaceKind::Modal)
    }

    pub fn is_any_editor_open(&self) -> bool {
        self.entries.iter().any(|(_, kind)| *kind == SurfaceKind::Contextual)
    }

    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum DraftError {
    #[error("event title cannot be empty")]
    EmptyTitle,
    #[error("no calendar selected")]
    NoCalendar,
    #[error("quick-create editor is not open")]
    NotOpen,
}

/// Draft being edited in the quick-create popover.
#[derive(Debug, Clone, PartialEq)]
pub struct QuickCreateEditor {
    pub range: DraftRange,
    pub anchor: GridPoint,
    pub title: String,
    pub calendar_id: Option<CalendarId>,
}

impl QuickCreateEditor {
    pub fn draft(&self) -> EventDraft {
        let title = self.title.trim();
        EventDraft {
            title: (!title.is_empty()).then(|| title.to_string()),
            calendar_id: self.calendar_id,
            ..EventDraft::from_range(self.range)
        }
    }

    pub fn validate(&self) -> Result<EventDraft, DraftError> {
        if self.title.trim().is_empty() {
            return Err(DraftError::EmptyTitle);
        }
        if self.calendar_id.is_none() {
            return Err(DraftError::NoCalendar);
        }
        Ok(self.draft())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
pub enum EditorState {
    #[default]
    Closed,
    QuickCreate(QuickCreateEditor),
    Detail { event_id: EventId, anchor: GridPoint },
}

pub struct EditorCoordinator {
    state: EditorState,
    bounds: Option<GridRect>,
    surfaces: SharedSurfaces,
    token: Option<SurfaceToken>,
}

impl EditorCoordinator {
    pub fn new(surfaces: SharedSurfaces) -> Self {
        Self {
            state: EditorState::Closed,
            bounds: None,
            surfaces,
            token: None,
        }
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    pub fn surfaces(&self) -> &SharedSurfaces {
        &self.surfaces
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, EditorState::Closed)
    }

    pub fn is_quick_create_open(&self) -> bool {
        matches!(self.state, EditorState::QuickCreate(_))
    }

    pub fn is_detail_open(&self) -> bool {
        matches!(self.state, EditorState::Detail { .. })
    }

    pub fn quick_create(&self) -> Option<&QuickCreateEditor> {
        match &self.state {
            EditorState::QuickCreate(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn quick_create_mut(&mut self) -> Option<&mut QuickCreateEditor> {
        match &mut self.state {
            EditorState::QuickCreate(editor) => Some(editor),
            _ => None,
        }
    }

    pub fn open_quick_create(
        &mut self,
        range: DraftRange,
        anchor: GridPoint,
        default_calendar: Option<CalendarId>,
    ) {
        self.replace(EditorState::QuickCreate(QuickCreateEditor {
            range,
            anchor,
            title: String::new(),
            calendar_id: default_calendar,
        }));
        log::info!("quick-create opened for {} - {}", range.start.format("%H:%M"), range.end.format("%H:%M"));
    }

    pub fn open_detail(&mut self, event_id: EventId, anchor: GridPoint) {
        self.replace(EditorState::Detail { event_id, anchor });
        log::info!("detail editor opened for event {}", event_id);
    }

    pub fn close_all(&mut self) {
        if self.is_open() {
            log::debug!("editor closed");
        }
        self.state = EditorState::Closed;
        self.bounds = None;
        if let Some(token) = self.token.take() {
            self.surfaces.borrow_mut().pop(token);
        }
    }

    // Close whatever is open, then open `next`.
    fn replace(&mut self, next: EditorState) {
        self.close_all();
        self.token = Some(self.surfaces.borrow_mut().claim_editor());
        self.state = next;
    }

    /// Host-reported on-screen bounds of the open editor, in grid pixels.
    pub fn set_bounds(&mut self, bounds: GridRect) {
        if self.is_open() {
            self.bounds = Some(bounds);
        }
    }

    /// Whether grid input at `point` must be ignored: a modal surface is up, or the
    /// point falls inside this grid's open editor.
    pub fn blocks_pointer(&self, point: GridPoint) -> bool {
        if self.surfaces.borrow().is_modal_open() {
            return true;
        }
        self.is_open() && self.bounds.is_some_and(|b| b.contains(point))
    }

    /// Close locally if another grid's editor took the shared slot. Returns true
    /// when this editor was closed.
    pub fn sync(&mut self) -> bool {
        let Some(token) = self.token else {
            return false;
        };
        if self.surfaces.borrow().holds(token) {
            return false;
        }
        log::debug!("editor superseded by another grid");
        self.token = None;
        self.state = EditorState::Closed;
        self.bounds = None;
        true
    }

    /// Validate the quick-create draft and close the editor on success.
    pub fn take_submission(&mut self) -> Result<EventDraft, DraftError> {
        let draft = self.quick_create().ok_or(DraftError::NotOpen)?.validate()?;
        self.close_all();
        Ok(draft)
    }

    /// Close quick-create and hand back its draft for the full editor.
    pub fn take_for_full_editor(&mut self) -> Option<EventDraft> {
        let draft = self.quick_create()?.draft();
        self.close_all();
        Some(draft)
    }
}

impl Drop for EditorCoordinator {
    fn drop(&mut self) {
        if let Some(token) = self.token.take() {
            if let Ok(mut surfaces) = self.surfaces.try_borrow_mut() {
                surfaces.pop(token);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Local, TimeZone};

    fn range() -> DraftRange {
        DraftRange::starting_at(Local.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap(), 30)
    }

    #[test]
    fn test_opening_detail_closes_quick_create() {
        let mut editors = EditorCoordinator::new(SurfaceStack::shared());
        editors.open_quick_create(range(), GridPoint::new(0.0, 128.0), Some(1));
        editors.open_detail(7, GridPoint::new(0.0, 64.0));
        assert!(editors.is_detail_open());
        assert!(!editors.is_quick_create_open());
        assert_eq!(editors.surfaces().borrow().depth(), 1);
    }

    #[test]
    fn test_close_all_releases_slot() {
        let surfaces = SurfaceStack::shared();
        let mut editors = EditorCoordinator::new(surfaces.clone());
        editors.open_detail(7, GridPoint::default());
        assert!(surfaces.borrow().is_any_editor_open());
        editors.close_all();
        assert!(!surfaces.borrow().is_any_editor_open());
        assert!(!editors.is_open());
    }

    #[test]
    fn test_editor_in_other_grid_is_superseded() {
        let surfaces = SurfaceStack::shared();
        let mut day = EditorCoordinator::new(surfaces.clone());
        let mut week = EditorCoordinator::new(surfaces.clone());
        day.open_quick_create(range(), GridPoint::default(), None);
        week.open_detail(3, GridPoint::default());

        assert!(day.sync());
        assert!(!day.is_open());
        assert!(!week.sync());
        assert!(week.is_detail_open());
    }

    #[test]
    fn test_modal_blocks_everywhere() {
        let surfaces = SurfaceStack::shared();
        let editors = EditorCoordinator::new(surfaces.clone());
        let token = surfaces.borrow_mut().push(SurfaceKind::Modal);
        assert!(editors.blocks_pointer(GridPoint::new(500.0, 500.0)));
        assert!(surfaces.borrow_mut().pop(token));
        assert!(!editors.blocks_pointer(GridPoint::new(500.0, 500.0)));
    }

    #[test]
    fn test_pointer_inside_editor_bounds_is_blocked() {
        let mut editors = EditorCoordinator::new(SurfaceStack::shared());
        editors.open_quick_create(range(), GridPoint::new(20.0, 128.0), Some(1));
        editors.set_bounds(GridRect::new(20.0, 128.0, 300.0, 180.0));
        assert!(editors.blocks_pointer(GridPoint::new(100.0, 200.0)));
        assert!(!editors.blocks_pointer(GridPoint::new(10.0, 10.0)));
    }

    #[test]
    fn test_bounds_ignored_when_closed() {
        let mut editors = EditorCoordinator::new(SurfaceStack::shared());
        editors.set_bounds(GridRect::new(0.0, 0.0, 1000.0, 1000.0));
        assert!(!editors.blocks_pointer(GridPoint::new(10.0, 10.0)));
    }

    #[test]
    fn test_submission_requires_title_and_calendar() {
        let mut editors = EditorCoordinator::new(SurfaceStack::shared());
        assert_eq!(editors.take_submission(), Err(DraftError::NotOpen));

        editors.open_quick_create(range(), GridPoint::default(), None);
        assert_eq!(editors.take_submission(), Err(DraftError::EmptyTitle));

        editors.quick_create_mut().unwrap().title = "  Lunch ".to_string();
        assert_eq!(editors.take_submission(), Err(DraftError::NoCalendar));
        assert!(editors.is_quick_create_open());

        editors.quick_create_mut().unwrap().calendar_id = Some(2);
        let draft = editors.take_submission().unwrap();
        assert_eq!(draft.title.as_deref(), Some("Lunch"));
        assert_eq!(draft.calendar_id, Some(2));
        assert!(!editors.is_open());
    }

    #[test]
    fn test_full_editor_handoff_closes_quick_create() {
        let mut editors = EditorCoordinator::new(SurfaceStack::shared());
        editors.open_quick_create(range(), GridPoint::default(), Some(1));
        let draft = editors.take_for_full_editor().unwrap();
        assert_eq!(draft.range(), range());
        assert!(!editors.is_open());
        assert!(editors.take_for_full_editor().is_none());
    }

    #[test]
    fn test_drop_releases_slot() {
        let surfaces = SurfaceStack::shared();
        {
            let mut editors = EditorCoordinator::new(surfaces.clone());
            editors.open_detail(1, GridPoint::default());
        }
        assert_eq!(surfaces.borrow().depth(), 0);
    }
}
