// Schedule Grid Library
// Headless scheduling-grid engine plus the egui host that drives it

pub mod grid;
pub mod models;
pub mod services;
pub mod ui_egui;
pub mod utils;
