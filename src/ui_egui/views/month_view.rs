use chrono::NaiveDate;
use egui::{Color32, Pos2, Rect, Rounding, Sense, Stroke, Vec2};

use super::utils::{event_color, format_event_tooltip, text_color_on};
use crate::grid::{GridHost, MonthGrid};
use crate::models::calendar::CalendarPalette;
use crate::models::event::{EventDraft, EventId};
use crate::ui_egui::store::EventStore;

const DAY_NAMES: [&str; 7] = ["Sun", "Mon", "Tue", "Wed", "Thu", "Fri", "Sat"];
const HEADER_HEIGHT: f32 = 28.0;
const CHIP_HEIGHT: f32 = 18.0;
const SPACING: f32 = 2.0;

#[derive(Default)]
pub struct MonthViewState {
    dragging: Option<EventId>,
}

pub struct MonthView;

impl MonthView {
    /// Returns the day whose number was clicked.
    pub fn show(
        ui: &mut egui::Ui,
        month: &mut MonthGrid,
        store: &mut EventStore,
        state: &mut MonthViewState,
        first_day_of_week: u8,
        today: NaiveDate,
        snap: chrono::Duration,
    ) -> Option<NaiveDate> {
        month.set_snapshot(store.events(), today, snap);
        let palette = CalendarPalette::from_calendars(store.calendars());
        let mut open_day = None;

        let width = ui.available_width();
        let col_width = (width - SPACING * 6.0) / 7.0;
        let rows = month.weeks().count().max(1);
        let height = ui.available_height().max(HEADER_HEIGHT + rows as f32 * 80.0);
        let row_height = (height - HEADER_HEIGHT) / rows as f32;
        let (rect, _) = ui.allocate_exact_size(Vec2::new(width, height), Sense::hover());

        for index in 0..7 {
            let name = DAY_NAMES[(first_day_of_week as usize + index) % 7];
            let center = Pos2::new(
                rect.left() + index as f32 * (col_width + SPACING) + col_width / 2.0,
                rect.top() + HEADER_HEIGHT / 2.0,
            );
            ui.painter().text(
                center,
                egui::Align2::CENTER_CENTER,
                name,
                egui::FontId::proportional(13.0),
                ui.visuals().strong_text_color(),
            );
        }

        let mut cell_rects: Vec<(NaiveDate, Rect)> = Vec::with_capacity(month.cells().len());
        for (row, week) in month.weeks().enumerate() {
            for (index, cell) in week.iter().enumerate() {
                let min = Pos2::new(
                    rect.left() + index as f32 * (col_width + SPACING),
                    rect.top() + HEADER_HEIGHT + row as f32 * row_height,
                );
                let cell_rect = Rect::from_min_size(min, Vec2::new(col_width, row_height - SPACING));
                cell_rects.push((cell.date, cell_rect));

                let fill = if cell.is_today {
                    ui.visuals().selection.bg_fill.gamma_multiply(0.25)
                } else if cell.outside_month {
                    ui.visuals().faint_bg_color
                } else {
                    ui.visuals().extreme_bg_color
                };
                ui.painter().rect_filled(cell_rect, Rounding::same(4.0), fill);
                ui.painter().rect_stroke(
                    cell_rect,
                    Rounding::same(4.0),
                    Stroke::new(1.0, ui.visuals().widgets.noninteractive.bg_stroke.color),
                );

                let number_rect = Rect::from_min_size(cell_rect.min, Vec2::new(col_width, CHIP_HEIGHT));
                let text_color = if cell.outside_month {
                    ui.visuals().weak_text_color()
                } else {
                    ui.visuals().text_color()
                };
                ui.painter().text(
                    number_rect.left_center() + Vec2::new(4.0, 0.0),
                    egui::Align2::LEFT_CENTER,
                    cell.date.format("%d").to_string(),
                    egui::FontId::proportional(12.0),
                    text_color,
                );
                if ui
                    .interact(number_rect, ui.id().with(("month_day", cell.date)), Sense::click())
                    .clicked()
                {
                    open_day = Some(cell.date);
                }

                for (slot, event_id) in cell.events.iter().enumerate() {
                    let Some(event) = month.event(*event_id) else {
                        continue;
                    };
                    let chip = Rect::from_min_size(
                        Pos2::new(cell_rect.left() + 2.0, number_rect.bottom() + slot as f32 * (CHIP_HEIGHT + 1.0)),
                        Vec2::new(col_width - 4.0, CHIP_HEIGHT),
                    );
                    let response = ui
                        .interact(chip, ui.id().with(("month_chip", cell.date, *event_id)), Sense::click_and_drag())
                        .on_hover_text(format_event_tooltip(event));
                    let color = event_color(&palette, event);
                    let fill = if state.dragging == Some(*event_id) {
                        color.gamma_multiply(0.4)
                    } else {
                        color
                    };
                    ui.painter().rect_filled(chip, Rounding::same(3.0), fill);
                    ui.painter().text(
                        chip.left_center() + Vec2::new(3.0, 0.0),
                        egui::Align2::LEFT_CENTER,
                        event.title.as_str(),
                        egui::FontId::proportional(11.0),
                        text_color_on(fill),
                    );

                    if response.drag_started() {
                        state.dragging = Some(*event_id);
                    } else if response.double_clicked() {
                        store.on_event_double_click(&EventDraft::from_event(event));
                    } else if response.clicked() {
                        store.on_event_click(event);
                    }
                }

                if let Some(label) = cell.overflow_label() {
                    let y = number_rect.bottom() + cell.events.len() as f32 * (CHIP_HEIGHT + 1.0);
                    ui.painter().text(
                        Pos2::new(cell_rect.left() + 4.0, y + CHIP_HEIGHT / 2.0),
                        egui::Align2::LEFT_CENTER,
                        label,
                        egui::FontId::proportional(11.0),
                        ui.visuals().weak_text_color(),
                    );
                }
            }
        }

        Self::finish_drag(ui, &cell_rects, month, store, state);
        open_day
    }

    fn finish_drag(
        ui: &egui::Ui,
        cells: &[(NaiveDate, Rect)],
        month: &MonthGrid,
        store: &mut EventStore,
        state: &mut MonthViewState,
    ) {
        let Some(event_id) = state.dragging else {
            return;
        };
        let (released, pos) = ui.input(|i| (i.pointer.any_released(), i.pointer.interact_pos()));
        let target = pos.and_then(|p| cells.iter().find(|(_, rect)| rect.contains(p)));

        if let Some((_, rect)) = target {
            ui.painter()
                .rect_stroke(*rect, Rounding::same(4.0), Stroke::new(2.0, Color32::from_rgb(59, 130, 246)));
        }

        if released {
            state.dragging = None;
            if let Some((date, _)) = target {
                month.drop_event(event_id, *date, store);
            }
        }
    }
}
