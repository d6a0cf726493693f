use chrono::{Local, NaiveDate};
use std::rc::Rc;

use super::store::EventStore;
use super::views::{DayView, DayViewState, MonthView, MonthViewState, WeekView, WeekViewState};
use crate::grid::{DayGrid, MonthGrid, SharedSurfaces, SurfaceKind, SurfaceStack, SurfaceToken, SystemClock, WeekGrid};
use crate::models::settings::GridSettings;
use crate::models::ui::ViewType;

mod navigation;

pub struct ScheduleApp {
    settings: GridSettings,
    current_view: ViewType,
    current_date: NaiveDate,
    surfaces: SharedSurfaces,
    day: DayGrid,
    week: WeekGrid,
    month: MonthGrid,
    store: EventStore,
    day_state: DayViewState,
    week_state: WeekViewState,
    month_state: MonthViewState,
    /// Modal surface held while the full editor window is up
    full_editor_token: Option<SurfaceToken>,
    full_editor_title: String,
}

impl eframe::App for ScheduleApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.sync_dates();
        self.show_toolbar(ctx);
        self.show_full_editor(ctx);

        egui::CentralPanel::default().show(ctx, |ui| self.show_view(ui));

        // Keep timers (click window, debounce, now line) moving without input.
        ctx.request_repaint_after(self.settings.pointer_debounce());
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.day.teardown();
        log::info!("Schedule grid closed");
    }
}

impl ScheduleApp {
    pub fn new(settings: GridSettings) -> Self {
        let today = Local::now().date_naive();
        let surfaces = SurfaceStack::shared();
        let clock = Rc::new(SystemClock);

        Self {
            day: DayGrid::new(today, settings.clone(), clock, surfaces.clone()),
            week: WeekGrid::new(today, settings.first_day_of_week, surfaces.clone()),
            month: MonthGrid::new(
                today,
                settings.first_day_of_week,
                settings.month_cell_event_cap,
                surfaces.clone(),
            ),
            store: EventStore::with_sample_data(today),
            settings,
            current_view: ViewType::Day,
            current_date: today,
            surfaces,
            day_state: DayViewState::default(),
            week_state: WeekViewState::default(),
            month_state: MonthViewState::default(),
            full_editor_token: None,
            full_editor_title: String::new(),
        }
    }

    fn sync_dates(&mut self) {
        self.day.set_date(self.current_date);
        self.week.set_date(self.current_date);
        self.month.set_date(self.current_date);
    }

    fn show_toolbar(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("◀").clicked() {
                    self.navigate_previous();
                }
                if ui.button("Today").clicked() {
                    self.jump_to_today();
                }
                if ui.button("▶").clicked() {
                    self.navigate_next();
                }
                ui.separator();
                ui.selectable_value(&mut self.current_view, ViewType::Day, "Day");
                ui.selectable_value(&mut self.current_view, ViewType::Week, "Week");
                ui.selectable_value(&mut self.current_view, ViewType::Month, "Month");
                ui.separator();
                ui.checkbox(&mut self.store.read_only, "Read-only");
                ui.separator();
                ui.label(self.current_date.format("%B %Y").to_string());
            });
        });
    }

    fn show_view(&mut self, ui: &mut egui::Ui) {
        let today = Local::now().date_naive();
        let snap = self.settings.snap_interval();
        let open_day = match self.current_view {
            ViewType::Day => {
                DayView::show(ui, &mut self.day, &mut self.store, &mut self.day_state);
                None
            }
            ViewType::Week => WeekView::show(ui, &mut self.week, &mut self.store, &mut self.week_state, today, snap),
            ViewType::Month => MonthView::show(
                ui,
                &mut self.month,
                &mut self.store,
                &mut self.month_state,
                self.settings.first_day_of_week,
                today,
                snap,
            ),
        };

        if let Some(date) = open_day {
            self.current_date = date;
            self.current_view = ViewType::Day;
        }
    }

    /// Stand-in for the external full editor. While it is open it sits on the
    /// surface stack as a modal, so every grid ignores pointer input.
    fn show_full_editor(&mut self, ctx: &egui::Context) {
        let Some(draft) = self.store.full_editor.clone() else {
            return;
        };
        if self.full_editor_token.is_none() {
            self.day.close_editors();
            self.full_editor_token = Some(self.surfaces.borrow_mut().push(SurfaceKind::Modal));
            self.full_editor_title = draft.title.clone().unwrap_or_default();
        }

        let mut open = true;
        let mut save = false;
        let mut cancel = false;
        egui::Window::new(if draft.event_id.is_some() { "Edit event" } else { "New event" })
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .show(ctx, |ui| {
                ui.text_edit_singleline(&mut self.full_editor_title);
                ui.label(format!(
                    "{} - {}",
                    draft.start.format("%a %d %b %H:%M"),
                    draft.end.format("%H:%M")
                ));
                if let Ok(json) = draft.to_json() {
                    ui.collapsing("Payload", |ui| ui.monospace(json));
                }
                ui.horizontal(|ui| {
                    save = ui.button("Save").clicked();
                    cancel = ui.button("Cancel").clicked();
                });
            });

        if save {
            let mut draft = draft;
            let title = self.full_editor_title.trim();
            draft.title = (!title.is_empty()).then(|| title.to_string());
            self.store.save_draft(&draft);
        }
        if save || cancel || !open {
            self.store.full_editor = None;
            if let Some(token) = self.full_editor_token.take() {
                self.surfaces.borrow_mut().pop(token);
            }
        }
    }
}
