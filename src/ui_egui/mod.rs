mod app;
pub mod store;
mod views;

pub use app::ScheduleApp;
