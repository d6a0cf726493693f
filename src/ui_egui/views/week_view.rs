use chrono::NaiveDate;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

use super::utils::{event_color, format_event_tooltip, text_color_on};
use crate::grid::{GridHost, WeekGrid};
use crate::models::calendar::CalendarPalette;
use crate::models::event::{EventDraft, EventId};
use crate::ui_egui::store::EventStore;

const HEADER_HEIGHT: f32 = 36.0;
const CHIP_HEIGHT: f32 = 22.0;
const COLUMN_SPACING: f32 = 2.0;

/// Event chip being dragged towards another day.
#[derive(Default)]
pub struct WeekViewState {
    dragging: Option<EventId>,
}

pub struct WeekView;

impl WeekView {
    /// Returns the day the user picked to open in the day view.
    pub fn show(
        ui: &mut egui::Ui,
        week: &mut WeekGrid,
        store: &mut EventStore,
        state: &mut WeekViewState,
        today: NaiveDate,
        snap: chrono::Duration,
    ) -> Option<NaiveDate> {
        week.set_snapshot(store.events(), today, snap);
        let palette = CalendarPalette::from_calendars(store.calendars());
        let mut open_day = None;

        let width = ui.available_width();
        let col_width = (width - COLUMN_SPACING * 6.0) / 7.0;
        let height = ui.available_height().max(HEADER_HEIGHT + CHIP_HEIGHT);
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());

        for (index, column) in week.columns().iter().enumerate() {
            let left = rect.left() + index as f32 * (col_width + COLUMN_SPACING);
            let col_rect = Rect::from_min_size(Pos2::new(left, rect.top()), Vec2::new(col_width, height));
            let fill = if column.is_today {
                ui.visuals().selection.bg_fill.gamma_multiply(0.25)
            } else {
                ui.visuals().extreme_bg_color
            };
            ui.painter().rect_filled(col_rect, Rounding::same(6.0), fill);
            ui.painter().rect_stroke(
                col_rect,
                Rounding::same(6.0),
                Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
            );

            let header = Rect::from_min_size(col_rect.min, Vec2::new(col_width, HEADER_HEIGHT));
            let header_response = ui.interact(header, ui.id().with(("week_header", column.date)), Sense::click());
            ui.painter().text(
                header.center(),
                egui::Align2::CENTER_CENTER,
                column.date.format("%a %d").to_string(),
                egui::FontId::proportional(14.0),
                ui.visuals().text_color(),
            );
            if header_response.clicked() {
                open_day = Some(column.date);
            }

            for (row, event_id) in column.events.iter().enumerate() {
                let Some(event) = week.event(*event_id) else {
                    continue;
                };
                let chip = Rect::from_min_size(
                    Pos2::new(col_rect.left() + 3.0, col_rect.top() + HEADER_HEIGHT + row as f32 * (CHIP_HEIGHT + 2.0)),
                    Vec2::new(col_width - 6.0, CHIP_HEIGHT),
                );
                let response = ui
                    .interact(chip, ui.id().with(("week_chip", column.date, *event_id)), Sense::click_and_drag())
                    .on_hover_text(format_event_tooltip(event));
                let color = event_color(&palette, event);
                let fill = if state.dragging == Some(*event_id) {
                    color.gamma_multiply(0.4)
                } else {
                    color
                };
                ui.painter().rect_filled(chip, Rounding::same(4.0), fill);
                let label = if event.all_day {
                    event.title.clone()
                } else {
                    format!("{} {}", event.start.format("%H:%M"), event.title)
                };
                ui.painter().text(
                    chip.left_center() + Vec2::new(4.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    label,
                    egui::FontId::proportional(12.0),
                    text_color_on(fill),
                );

                if response.drag_started() {
                    state.dragging = Some(*event_id);
                } else if response.double_clicked() {
                    let draft = EventDraft::from_event(event);
                    store.on_event_double_click(&draft);
                } else if response.clicked() {
                    store.on_event_click(event);
                }
            }
        }

        Self::finish_drag(ui, rect, col_width, week, store, state);
        open_day
    }

    fn finish_drag(
        ui: &egui::Ui,
        rect: Rect,
        col_width: f32,
        week: &WeekGrid,
        store: &mut EventStore,
        state: &mut WeekViewState,
    ) {
        let Some(event_id) = state.dragging else {
            return;
        };
        let (released, pos) = ui.input(|i| (i.pointer.any_released(), i.pointer.interact_pos()));

        if let Some(pos) = pos {
            if let Some(date) = week.day_at_x(pos.x - rect.left(), rect.width()) {
                let index = week.days().position(|d| d == date).unwrap_or(0);
                let left = rect.left() + index as f32 * (col_width + COLUMN_SPACING);
                let target = Rect::from_min_size(Pos2::new(left, rect.top()), Vec2::new(col_width, rect.height()));
                ui.painter()
                    .rect_stroke(target, Rounding::same(6.0), Stroke::new(2.0, Color32::from_rgb(59, 130, 246)));
            }
        }

        if released {
            state.dragging = None;
            if let Some(date) = pos.and_then(|p| week.day_at_x(p.x - rect.left(), rect.width())) {
                week.drop_event(event_id, date, store);
            }
        }
    }
}
