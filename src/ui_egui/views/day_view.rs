use egui::{Align2, Color32, FontId, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

use super::utils::{event_color, format_event_tooltip, text_color_on};
use crate::grid::{DayGrid, EditorState, GridHost};
use crate::models::event::{EventDraft, EventId};
use crate::models::ui::{GridPoint, GridRect};
use crate::ui_egui::store::EventStore;

const TIME_LABEL_WIDTH: f32 = 56.0;
const ALL_DAY_ROW_HEIGHT: f32 = 22.0;
const POPOVER_WIDTH: f32 = 260.0;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Press {
    Grid,
    Event { origin: Pos2 },
}

/// Pointer bookkeeping the engine does not own.
#[derive(Default)]
pub struct DayViewState {
    press: Option<Press>,
    inside: bool,
    draft_error: Option<String>,
}

fn to_point(pos: Pos2) -> GridPoint {
    GridPoint::new(pos.x, pos.y)
}

pub struct DayView;

impl DayView {
    pub fn show(ui: &mut egui::Ui, grid: &mut DayGrid, store: &mut EventStore, state: &mut DayViewState) {
        grid.set_snapshot(store.events(), store.calendars());

        ui.heading(grid.date().format("%A, %B %d, %Y").to_string());
        Self::all_day_strip(ui, grid);

        egui::ScrollArea::vertical().auto_shrink([false, false]).show(ui, |ui| {
            let height = grid.mapper().geometry().grid_height();
            let (rect, _response) = ui.allocate_exact_size(Vec2::new(ui.available_width(), height), Sense::click_and_drag());
            let column = Rect::from_min_max(Pos2::new(rect.left() + TIME_LABEL_WIDTH, rect.top()), rect.max);
            grid.set_origin(to_point(column.min));

            Self::handle_input(ui, column, grid, store, state);
            grid.tick();

            Self::paint_hours(ui, rect, column, grid);
            Self::paint_events(ui, column, grid);
            Self::paint_overlays(ui, column, grid);
            Self::show_editor(ui, column, grid, store, state);
        });
    }

    fn all_day_strip(ui: &mut egui::Ui, grid: &DayGrid) {
        let events: Vec<_> = grid.all_day_events().cloned().collect();
        if events.is_empty() {
            return;
        }
        ui.horizontal(|ui| {
            ui.add_space(TIME_LABEL_WIDTH);
            for event in &events {
                let fill = event_color(grid.palette(), event);
                egui::Frame::none()
                    .fill(fill)
                    .rounding(Rounding::same(4.0))
                    .inner_margin(egui::Margin::symmetric(6.0, 2.0))
                    .show(ui, |ui| {
                        ui.set_min_height(ALL_DAY_ROW_HEIGHT - 4.0);
                        ui.label(egui::RichText::new(event.title.as_str()).color(text_color_on(fill)))
                            .on_hover_text(format_event_tooltip(event));
                    });
            }
        });
    }

    fn event_hit(column: Rect, grid: &DayGrid, pos: Pos2) -> Option<EventId> {
        // Later entries are painted on top, so test them first.
        grid.layout().timed.iter().rev().find_map(|layout| {
            let rect = Rect::from_min_size(
                Pos2::new(column.left() + layout.left_offset_px, column.top() + layout.top),
                Vec2::new(layout.width_in(column.width()), layout.height),
            );
            rect.contains(pos).then_some(layout.event_id)
        })
    }

    fn handle_input(ui: &egui::Ui, column: Rect, grid: &mut DayGrid, store: &mut EventStore, state: &mut DayViewState) {
        let (pressed, released, double, hover, interact) = ui.input(|i| {
            (
                i.pointer.primary_pressed(),
                i.pointer.primary_released(),
                i.pointer.button_double_clicked(egui::PointerButton::Primary),
                i.pointer.hover_pos(),
                i.pointer.interact_pos(),
            )
        });
        let click_count = if double { 2 } else { 1 };
        let over_column = hover.is_some_and(|p| column.contains(p));

        if pressed {
            if let Some(pos) = interact.filter(|p| column.contains(*p)) {
                match Self::event_hit(column, grid, pos) {
                    Some(id) if grid.pointer_down_on_event(id, to_point(pos)) => {
                        state.press = Some(Press::Event { origin: pos });
                    }
                    Some(_) => {}
                    None => {
                        grid.pointer_down(to_point(pos));
                        state.press = Some(Press::Grid);
                    }
                }
            }
        }

        match (state.press, hover) {
            (Some(Press::Event { origin }), Some(pos)) => grid.drag_to(pos.y - origin.y),
            (_, Some(pos)) if over_column => grid.pointer_move(to_point(pos)),
            _ => {}
        }

        if released {
            let pos = interact.or(hover);
            match (state.press.take(), pos) {
                (Some(Press::Event { origin }), Some(pos)) => {
                    grid.end_drag(pos.y - origin.y, click_count, store);
                }
                (Some(Press::Event { .. }), None) => grid.cancel_drag(),
                (Some(Press::Grid), Some(pos)) | (None, Some(pos)) if column.contains(pos) => {
                    grid.pointer_up(to_point(pos), click_count, store);
                }
                _ => {}
            }
        }

        if state.inside && !over_column && state.press.is_none() {
            grid.pointer_leave();
        }
        state.inside = over_column;
    }

    fn paint_hours(ui: &egui::Ui, rect: Rect, column: Rect, grid: &DayGrid) {
        let painter = ui.painter();
        let mapper = grid.mapper();
        let geometry = mapper.geometry();
        let hours = geometry.visible_minutes / 60;
        let line = Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color);

        painter.rect_filled(column, Rounding::ZERO, ui.visuals().extreme_bg_color);
        for hour in 0..=hours {
            let y = column.top() + hour as f32 * geometry.hour_height_px;
            painter.hline(column.x_range(), y, line);
            let label_time = mapper.anchor() + chrono::Duration::hours(hour);
            if hour < hours {
                painter.text(
                    Pos2::new(rect.left() + TIME_LABEL_WIDTH - 6.0, y + 2.0),
                    Align2::RIGHT_TOP,
                    label_time.format("%H:%M").to_string(),
                    FontId::proportional(12.0),
                    Color32::GRAY,
                );
            }
        }
    }

    fn paint_events(ui: &egui::Ui, column: Rect, grid: &DayGrid) {
        let painter = ui.painter();
        let dragged = grid.drag_preview().map(|p| p.event_id);

        for layout in &grid.layout().timed {
            let Some(event) = grid.event(layout.event_id) else {
                continue;
            };
            let rect = Rect::from_min_size(
                Pos2::new(column.left() + layout.left_offset_px, column.top() + layout.top),
                Vec2::new(layout.width_in(column.width()), layout.height),
            )
            .shrink(1.0);
            let mut fill = event_color(grid.palette(), event);
            if dragged == Some(event.id) {
                fill = fill.gamma_multiply(0.4);
            }
            painter.rect_filled(rect, Rounding::same(4.0), fill);
            painter.rect_stroke(rect, Rounding::same(4.0), Stroke::new(1.0, ui.visuals().extreme_bg_color));
            painter.text(
                rect.left_top() + Vec2::new(6.0, 4.0),
                Align2::LEFT_TOP,
                format!("{}  {}", event.start.format("%H:%M"), event.title),
                FontId::proportional(12.0),
                text_color_on(fill),
            );
        }
    }

    fn paint_overlays(ui: &egui::Ui, column: Rect, grid: &DayGrid) {
        let painter = ui.painter();
        let accent = ui.visuals().selection.bg_fill;

        if let Some((top, bottom)) = grid.selection_box() {
            let rect = Rect::from_min_max(
                Pos2::new(column.left(), column.top() + top),
                Pos2::new(column.right(), column.top() + bottom.max(top + 2.0)),
            );
            painter.rect_filled(rect, Rounding::same(2.0), accent.gamma_multiply(0.35));
        }

        if let Some(hover) = grid.hover_line() {
            let y = column.top() + hover.y;
            painter.hline(column.x_range(), y, Stroke::new(1.0, accent));
            painter.text(
                Pos2::new(column.right() - 4.0, y - 2.0),
                Align2::RIGHT_BOTTOM,
                hover.label,
                FontId::monospace(11.0),
                accent,
            );
        }

        if let Some(preview) = grid.drag_preview() {
            let rect = Rect::from_min_size(
                Pos2::new(column.left(), column.top() + preview.top),
                Vec2::new(column.width(), preview.height),
            )
            .shrink(1.0);
            painter.rect_stroke(rect, Rounding::same(4.0), Stroke::new(2.0, accent));
            painter.text(
                rect.left_top() + Vec2::new(6.0, 4.0),
                Align2::LEFT_TOP,
                format!("{} - {}", preview.start.format("%H:%M"), preview.end.format("%H:%M")),
                FontId::proportional(12.0),
                accent,
            );
        }

        if let Some(top) = grid.now_line() {
            let y = column.top() + top;
            let red = Color32::from_rgb(255, 100, 100);
            painter.circle_filled(Pos2::new(column.left() - 4.0, y), 3.0, red);
            painter.hline(column.x_range(), y, Stroke::new(2.0, red));
        }
    }

    fn show_editor(ui: &egui::Ui, column: Rect, grid: &mut DayGrid, store: &mut EventStore, state: &mut DayViewState) {
        let ctx = ui.ctx().clone();
        let state_snapshot = grid.editor_state().clone();

        let area_rect = match state_snapshot {
            EditorState::Closed => {
                state.draft_error = None;
                return;
            }
            EditorState::QuickCreate(editor) => {
                let pos = column.min + Vec2::new(editor.anchor.x, editor.anchor.y);
                let mut title = editor.title.clone();
                let mut calendar = editor.calendar_id;
                let mut action = None;

                let response = egui::Area::new(egui::Id::new("quick_create_popover"))
                    .order(egui::Order::Foreground)
                    .fixed_pos(pos)
                    .show(&ctx, |ui| {
                        egui::Frame::popup(ui.style()).show(ui, |ui| {
                            ui.set_width(POPOVER_WIDTH);
                            ui.label(format!(
                                "{} - {}",
                                editor.range.start.format("%a %H:%M"),
                                editor.range.end.format("%H:%M")
                            ));
                            ui.add(egui::TextEdit::singleline(&mut title).hint_text("Add title"));
                            let selected = calendar
                                .and_then(|id| store.calendars().iter().find(|c| c.id == id))
                                .map(|c| c.name.clone())
                                .unwrap_or_else(|| "Choose calendar".to_string());
                            egui::ComboBox::from_id_source("quick_create_calendar")
                                .selected_text(selected)
                                .show_ui(ui, |ui| {
                                    for cal in store.calendars() {
                                        ui.selectable_value(&mut calendar, Some(cal.id), cal.name.as_str());
                                    }
                                });
                            if let Some(err) = &state.draft_error {
                                ui.colored_label(ui.visuals().error_fg_color, err.as_str());
                            }
                            ui.horizontal(|ui| {
                                if ui.button("Save").clicked() {
                                    action = Some(QuickAction::Save);
                                }
                                if ui.button("More options").clicked() {
                                    action = Some(QuickAction::MoreOptions);
                                }
                                if ui.button("Cancel").clicked() {
                                    action = Some(QuickAction::Cancel);
                                }
                            });
                        });
                    });

                grid.set_quick_create_title(title);
                if let Some(id) = calendar {
                    grid.select_calendar(id);
                }
                match action {
                    Some(QuickAction::Save) => match grid.submit_quick_create(store) {
                        Ok(_) => state.draft_error = None,
                        Err(e) => state.draft_error = Some(e.to_string()),
                    },
                    Some(QuickAction::MoreOptions) => {
                        grid.more_options(store);
                    }
                    Some(QuickAction::Cancel) => grid.close_editors(),
                    None => {}
                }
                response.response.rect
            }
            EditorState::Detail { event_id, anchor } => {
                let Some(event) = grid.event(event_id).cloned() else {
                    grid.close_editors();
                    return;
                };
                let pos = column.min + Vec2::new(anchor.x, anchor.y);
                let mut action = None;
                let response = egui::Area::new(egui::Id::new("event_detail_popover"))
                    .order(egui::Order::Foreground)
                    .fixed_pos(pos)
                    .show(&ctx, |ui| {
                        egui::Frame::popup(ui.style()).show(ui, |ui| {
                            ui.set_width(POPOVER_WIDTH);
                            ui.strong(event.title.as_str());
                            ui.label(format_event_tooltip(&event));
                            ui.horizontal(|ui| {
                                if ui.button("Edit").clicked() {
                                    action = Some(QuickAction::MoreOptions);
                                }
                                if ui.button("Close").clicked() {
                                    action = Some(QuickAction::Cancel);
                                }
                            });
                        });
                    });
                match action {
                    Some(QuickAction::MoreOptions) => {
                        grid.close_editors();
                        store.on_event_double_click(&EventDraft::from_event(&event));
                    }
                    Some(_) => grid.close_editors(),
                    None => {}
                }
                response.response.rect
            }
        };

        grid.set_editor_bounds(GridRect::new(
            area_rect.left() - column.left(),
            area_rect.top() - column.top(),
            area_rect.width(),
            area_rect.height(),
        ));
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum QuickAction {
    Save,
    MoreOptions,
    Cancel,
}
