//! Pointer gesture classification for a time grid.
//!
//! A press on empty grid space goes `Idle → SelectingOrPending`. Releasing after
//! at least `min_drag_px` of travel is a drag-select. A shorter release arms the
//! click timer (`PendingClick`): a second release inside the window becomes a
//! double-click, otherwise the timer fires a click. A press on an event enters
//! `Dragging`, which runs beside the selection machine and ignores grid presses
//! until the drag protocol ends it.
//!
//! Offsets are grid-relative pixels except inside [`DragSession`], which tracks
//! screen coordinates.

use chrono::{DateTime, Local};
use std::time::{Duration, Instant};

use super::drag::DragSession;
use super::timer::OneShot;
use crate::models::event::EventId;
use crate::models::ui::GridPoint;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GestureConfig {
    pub min_drag_px: f32,
    pub drag_activation_px: f32,
    pub double_click_window: Duration,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GestureState {
    Idle,
    /// Pressed, not yet far enough to be a drag-select
    SelectingOrPending,
    Selecting,
    /// Released; waiting to tell a click from a double-click
    PendingClick,
    Dragging,
}

/// In-progress press on empty grid space.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Selection {
    pub start_px: f32,
    pub end_px: Option<f32>,
    pub start_time: DateTime<Local>,
    pub anchor_x: f32,
}

impl Selection {
    /// `(top, bottom)` of the selection box.
    pub fn span(&self) -> (f32, f32) {
        let end = self.end_px.unwrap_or(self.start_px);
        (self.start_px.min(end), self.start_px.max(end))
    }

    fn travel(&self) -> f32 {
        let (top, bottom) = self.span();
        bottom - top
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Gesture {
    Click { point: GridPoint },
    DoubleClick { point: GridPoint },
    DragSelect { start_px: f32, end_px: f32, anchor: GridPoint },
    DragMove { session: DragSession, delta_y: f32 },
    /// Press-release on an event without enough travel to move it
    EventClick { event_id: EventId },
    EventDoubleClick { event_id: EventId },
}

#[derive(Debug, Clone)]
pub struct GestureClassifier {
    config: GestureConfig,
    selection: Option<Selection>,
    click_timer: OneShot,
    pending_point: Option<GridPoint>,
    /// Click whose window elapsed before `tick` saw it
    due_click: Option<GridPoint>,
    drag: Option<DragSession>,
}

impl GestureClassifier {
    pub fn new(config: GestureConfig) -> Self {
        Self {
            config,
            selection: None,
            click_timer: OneShot::default(),
            pending_point: None,
            due_click: None,
            drag: None,
        }
    }

    pub fn state(&self) -> GestureState {
        if self.drag.is_some() {
            return GestureState::Dragging;
        }
        match &self.selection {
            Some(selection) if selection.travel() >= self.config.min_drag_px => GestureState::Selecting,
            Some(_) => GestureState::SelectingOrPending,
            None if self.click_timer.is_armed() => GestureState::PendingClick,
            None => GestureState::Idle,
        }
    }

    pub fn selection(&self) -> Option<&Selection> {
        self.selection.as_ref()
    }

    pub fn drag(&self) -> Option<&DragSession> {
        self.drag.as_ref()
    }

    /// Press on empty grid space.
    pub fn pointer_down(&mut self, point: GridPoint, start_time: DateTime<Local>) {
        if self.drag.is_some() {
            return;
        }
        log::debug!("grid press at y={:.1}", point.y);
        self.selection = Some(Selection {
            start_px: point.y,
            end_px: Some(point.y),
            start_time,
            anchor_x: point.x,
        });
    }

    /// Extend the active selection, if any.
    pub fn pointer_move(&mut self, y: f32) {
        if let Some(selection) = self.selection.as_mut() {
            selection.end_px = Some(y);
        }
    }

    /// Release over the grid. `click_count` follows native semantics (2 for the
    /// second release of a double-click).
    pub fn pointer_up(&mut self, point: GridPoint, click_count: u32, now: Instant) -> Option<Gesture> {
        if self.drag.is_some() {
            return None;
        }

        // Keep an elapsed click from being overwritten by this release.
        if self.click_timer.fire(now) {
            self.due_click = self.pending_point.take();
        }

        let is_second_release = click_count > 1 || self.click_timer.is_pending(now);

        let Some(mut selection) = self.selection.take() else {
            // A release without a press we saw still completes a double-click.
            if is_second_release {
                return Some(self.double_click(point));
            }
            return None;
        };
        selection.end_px = Some(point.y);

        if selection.travel() >= self.config.min_drag_px {
            self.cancel_click_timer();
            let (start_px, end_px) = selection.span();
            log::debug!("drag-select {:.1}..{:.1}", start_px, end_px);
            return Some(Gesture::DragSelect {
                start_px,
                end_px,
                anchor: GridPoint::new(selection.anchor_x, start_px),
            });
        }

        if is_second_release {
            return Some(self.double_click(point));
        }

        self.click_timer.arm(now, self.config.double_click_window);
        self.pending_point = Some(point);
        None
    }

    fn double_click(&mut self, point: GridPoint) -> Gesture {
        self.cancel_click_timer();
        log::debug!("double-click at y={:.1}", point.y);
        Gesture::DoubleClick { point }
    }

    fn cancel_click_timer(&mut self) {
        self.click_timer.cancel();
        self.pending_point = None;
    }

    /// Fire the click timer if it is due.
    pub fn tick(&mut self, now: Instant) -> Option<Gesture> {
        if let Some(point) = self.due_click.take() {
            log::debug!("click at y={:.1}", point.y);
            return Some(Gesture::Click { point });
        }
        if !self.click_timer.fire(now) {
            return None;
        }
        let point = self.pending_point.take()?;
        log::debug!("click at y={:.1}", point.y);
        Some(Gesture::Click { point })
    }

    /// Pointer left the grid: drop the selection, keep any drag.
    pub fn pointer_leave(&mut self) {
        if self.selection.take().is_some() {
            log::debug!("selection cancelled by pointer leave");
        }
    }

    /// Press on an event's drag handle.
    pub fn begin_drag(&mut self, session: DragSession) {
        log::debug!("drag start for event {}", session.event_id);
        self.selection = None;
        self.drag = Some(session);
    }

    /// Track the drag with the total pointer delta since the press.
    pub fn drag_to(&mut self, total_delta_y: f32) {
        if let Some(session) = self.drag.as_mut() {
            session.delta_y = total_delta_y;
        }
    }

    /// End the drag. Travel under `drag_activation_px` is a click on the event.
    pub fn end_drag(&mut self, total_delta_y: f32, click_count: u32) -> Option<Gesture> {
        let mut session = self.drag.take()?;
        session.delta_y = total_delta_y;

        if total_delta_y.abs() < self.config.drag_activation_px {
            let event_id = session.event_id;
            return Some(if click_count > 1 {
                Gesture::EventDoubleClick { event_id }
            } else {
                Gesture::EventClick { event_id }
            });
        }

        Some(Gesture::DragMove {
            delta_y: total_delta_y,
            session,
        })
    }

    /// Abort an in-flight drag without classifying it.
    pub fn cancel_drag(&mut self) -> Option<DragSession> {
        self.drag.take()
    }

    /// Drop every transient state and timer.
    pub fn reset(&mut self) {
        self.selection = None;
        self.drag = None;
        self.due_click = None;
        self.cancel_click_timer();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn classifier() -> GestureClassifier {
        GestureClassifier::new(GestureConfig {
            min_drag_px: 6.0,
            drag_activation_px: 10.0,
            double_click_window: Duration::from_millis(220),
        })
    }

    fn start_time() -> DateTime<Local> {
        Local.with_ymd_and_hms(2025, 3, 10, 10, 0, 0).unwrap()
    }

    fn ms(n: u64) -> Duration {
        Duration::from_millis(n)
    }

    fn session() -> DragSession {
        DragSession {
            event_id: 9,
            original_start: start_time(),
            original_end: start_time() + chrono::Duration::minutes(45),
            pointer_start_y: 300.0,
            grab_offset_y: 0.0,
            delta_y: 0.0,
        }
    }

    #[test]
    fn test_press_enters_selecting_or_pending() {
        let mut g = classifier();
        assert_eq!(g.state(), GestureState::Idle);
        g.pointer_down(GridPoint::new(10.0, 128.0), start_time());
        assert_eq!(g.state(), GestureState::SelectingOrPending);
        g.pointer_move(140.0);
        assert_eq!(g.state(), GestureState::Selecting);
    }

    #[test]
    fn test_single_click_fires_after_window() {
        let t0 = Instant::now();
        let mut g = classifier();
        g.pointer_down(GridPoint::new(10.0, 128.0), start_time());
        assert_eq!(g.pointer_up(GridPoint::new(10.0, 128.0), 1, t0), None);
        assert_eq!(g.state(), GestureState::PendingClick);
        assert_eq!(g.tick(t0 + ms(219)), None);
        assert_eq!(
            g.tick(t0 + ms(220)),
            Some(Gesture::Click { point: GridPoint::new(10.0, 128.0) })
        );
        assert_eq!(g.state(), GestureState::Idle);
    }

    #[test]
    fn test_second_release_within_window_is_double_click() {
        let t0 = Instant::now();
        let mut g = classifier();
        let p = GridPoint::new(10.0, 128.0);
        g.pointer_down(p, start_time());
        g.pointer_up(p, 1, t0);
        g.pointer_down(p, start_time());
        assert_eq!(g.pointer_up(p, 2, t0 + ms(150)), Some(Gesture::DoubleClick { point: p }));
        assert_eq!(g.tick(t0 + ms(500)), None);
    }

    #[test]
    fn test_second_release_without_click_count_uses_timer() {
        let t0 = Instant::now();
        let mut g = classifier();
        let p = GridPoint::new(10.0, 128.0);
        g.pointer_down(p, start_time());
        g.pointer_up(p, 1, t0);
        g.pointer_down(p, start_time());
        assert_eq!(g.pointer_up(p, 1, t0 + ms(100)), Some(Gesture::DoubleClick { point: p }));
    }

    #[test]
    fn test_release_after_window_is_new_click() {
        let t0 = Instant::now();
        let mut g = classifier();
        let p = GridPoint::new(10.0, 128.0);
        g.pointer_down(p, start_time());
        g.pointer_up(p, 1, t0);
        assert!(g.tick(t0 + ms(230)).is_some());
        g.pointer_down(p, start_time());
        assert_eq!(g.pointer_up(p, 1, t0 + ms(400)), None);
        assert_eq!(g.state(), GestureState::PendingClick);
    }

    #[test]
    fn test_elapsed_click_survives_next_release() {
        let t0 = Instant::now();
        let mut g = classifier();
        let first = GridPoint::new(10.0, 128.0);
        let second = GridPoint::new(10.0, 256.0);
        g.pointer_down(first, start_time());
        g.pointer_up(first, 1, t0);

        // no tick between the window closing and the next release
        g.pointer_down(second, start_time());
        assert_eq!(g.pointer_up(second, 1, t0 + ms(400)), None);

        assert_eq!(g.tick(t0 + ms(400)), Some(Gesture::Click { point: first }));
        assert_eq!(g.tick(t0 + ms(500)), None);
        assert_eq!(g.tick(t0 + ms(620)), Some(Gesture::Click { point: second }));
    }

    #[test]
    fn test_travel_at_threshold_is_drag_select() {
        let t0 = Instant::now();
        let mut g = classifier();
        g.pointer_down(GridPoint::new(10.0, 100.0), start_time());
        let gesture = g.pointer_up(GridPoint::new(12.0, 94.0), 1, t0);
        assert_eq!(
            gesture,
            Some(Gesture::DragSelect {
                start_px: 94.0,
                end_px: 100.0,
                anchor: GridPoint::new(10.0, 94.0),
            })
        );
        assert_eq!(g.state(), GestureState::Idle);
    }

    #[test]
    fn test_travel_below_threshold_is_click_candidate() {
        let t0 = Instant::now();
        let mut g = classifier();
        g.pointer_down(GridPoint::new(10.0, 100.0), start_time());
        assert_eq!(g.pointer_up(GridPoint::new(10.0, 105.5), 1, t0), None);
        assert_eq!(g.state(), GestureState::PendingClick);
    }

    #[test]
    fn test_drag_select_cancels_pending_click() {
        let t0 = Instant::now();
        let mut g = classifier();
        g.pointer_down(GridPoint::new(0.0, 10.0), start_time());
        g.pointer_up(GridPoint::new(0.0, 10.0), 1, t0);
        g.pointer_down(GridPoint::new(0.0, 50.0), start_time());
        assert!(matches!(
            g.pointer_up(GridPoint::new(0.0, 120.0), 1, t0 + ms(100)),
            Some(Gesture::DragSelect { .. })
        ));
        assert_eq!(g.tick(t0 + ms(400)), None);
    }

    #[test]
    fn test_pointer_leave_cancels_selection_only() {
        let mut g = classifier();
        g.pointer_down(GridPoint::new(0.0, 10.0), start_time());
        g.pointer_leave();
        assert!(g.selection().is_none());

        g.begin_drag(session());
        g.pointer_leave();
        assert_eq!(g.state(), GestureState::Dragging);
    }

    #[test]
    fn test_grid_press_ignored_while_dragging() {
        let t0 = Instant::now();
        let mut g = classifier();
        g.begin_drag(session());
        g.pointer_down(GridPoint::new(0.0, 10.0), start_time());
        assert!(g.selection().is_none());
        assert_eq!(g.pointer_up(GridPoint::new(0.0, 10.0), 1, t0), None);
    }

    #[test]
    fn test_drag_past_activation_is_move() {
        let mut g = classifier();
        g.begin_drag(session());
        g.drag_to(64.0);
        assert_eq!(g.drag().map(|s| s.delta_y), Some(64.0));
        match g.end_drag(128.0, 1) {
            Some(Gesture::DragMove { session, delta_y }) => {
                assert_eq!(session.event_id, 9);
                assert_eq!(delta_y, 128.0);
            }
            other => panic!("expected drag move, got {other:?}"),
        }
        assert_eq!(g.state(), GestureState::Idle);
    }

    #[test]
    fn test_short_drag_is_event_click() {
        let mut g = classifier();
        g.begin_drag(session());
        assert_eq!(g.end_drag(3.0, 1), Some(Gesture::EventClick { event_id: 9 }));
        g.begin_drag(session());
        assert_eq!(g.end_drag(0.0, 2), Some(Gesture::EventDoubleClick { event_id: 9 }));
    }

    #[test]
    fn test_end_drag_without_session() {
        let mut g = classifier();
        assert_eq!(g.end_drag(100.0, 1), None);
    }

    #[test]
    fn test_reset_clears_everything() {
        let t0 = Instant::now();
        let mut g = classifier();
        g.pointer_down(GridPoint::new(0.0, 10.0), start_time());
        g.pointer_up(GridPoint::new(0.0, 10.0), 1, t0);
        g.begin_drag(session());
        g.reset();
        assert_eq!(g.state(), GestureState::Idle);
        assert_eq!(g.tick(t0 + ms(1000)), None);
    }
}
