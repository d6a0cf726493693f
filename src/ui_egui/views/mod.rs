pub mod day_view;
pub mod month_view;
mod utils;
pub mod week_view;

pub use day_view::{DayView, DayViewState};
pub use month_view::{MonthView, MonthViewState};
pub use week_view::{WeekView, WeekViewState};
