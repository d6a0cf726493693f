use super::ScheduleApp;
use crate::models::ui::ViewType;
use chrono::{Datelike, Local, NaiveDate};

impl ScheduleApp {
    pub(super) fn navigate_previous(&mut self) {
        self.current_date = match self.current_view {
            ViewType::Day => self.current_date - chrono::Duration::days(1),
            ViewType::Week => self.current_date - chrono::Duration::weeks(1),
            ViewType::Month => shift_month_preserving_day(self.current_date, -1),
        };
    }

    pub(super) fn navigate_next(&mut self) {
        self.current_date = match self.current_view {
            ViewType::Day => self.current_date + chrono::Duration::days(1),
            ViewType::Week => self.current_date + chrono::Duration::weeks(1),
            ViewType::Month => shift_month_preserving_day(self.current_date, 1),
        };
    }

    pub(super) fn jump_to_today(&mut self) {
        self.current_date = Local::now().date_naive();
    }
}

fn shift_month_preserving_day(current: NaiveDate, delta_months: i32) -> NaiveDate {
    let total_months = (current.year() * 12) + (current.month() as i32 - 1) + delta_months;
    let new_year = total_months.div_euclid(12);
    let new_month = total_months.rem_euclid(12) as u32 + 1;
    (1..=current.day())
        .rev()
        .find_map(|day| NaiveDate::from_ymd_opt(new_year, new_month, day))
        .unwrap_or(current)
}
