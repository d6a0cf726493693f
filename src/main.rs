// Schedule Grid Application
// Main entry point

use anyhow::{anyhow, Result};
use schedule_grid::services::settings::SettingsService;
use schedule_grid::ui_egui::ScheduleApp;

fn main() -> Result<()> {
    // Initialize logging
    env_logger::init();

    log::info!("Starting Schedule Grid");

    let settings_service = SettingsService::from_project_dirs();
    let settings = settings_service.load_or_default();
    log::debug!("Grid settings from {}: {:?}", settings_service.path().display(), settings);

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size([1200.0, 800.0])
            .with_min_inner_size([800.0, 600.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Schedule Grid",
        options,
        Box::new(move |_cc| Ok(Box::new(ScheduleApp::new(settings)))),
    )
    .map_err(|e| anyhow!("failed to run the schedule grid window: {e}"))
}
