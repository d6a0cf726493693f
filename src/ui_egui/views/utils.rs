//! Common utility functions for the grid views.

use egui::Color32;

use crate::models::calendar::{CalendarPalette, DEFAULT_CALENDAR_COLOR};
use crate::models::event::Event;

/// Parse a hex color string to Color32.
///
/// # Arguments
/// * `hex` - A hex color string, optionally prefixed with '#' (e.g., "#FF5500" or "FF5500")
///
/// # Returns
/// * `Some(Color32)` if parsing succeeds
/// * `None` if the input is empty or invalid
pub fn parse_color(hex: &str) -> Option<Color32> {
    let hex = hex.trim().trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }

    let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
    let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
    let b = u8::from_str_radix(&hex[4..6], 16).ok()?;

    Some(Color32::from_rgb(r, g, b))
}

/// Fill color for an event's calendar.
pub fn event_color(palette: &CalendarPalette, event: &Event) -> Color32 {
    parse_color(palette.color_for(event.calendar_id))
        .or_else(|| parse_color(DEFAULT_CALENDAR_COLOR))
        .unwrap_or(Color32::from_rgb(59, 130, 246))
}

/// Black or white, whichever reads better on `background`.
pub fn text_color_on(background: Color32) -> Color32 {
    let luma = 0.299 * background.r() as f32 + 0.587 * background.g() as f32 + 0.114 * background.b() as f32;
    if luma > 160.0 {
        Color32::BLACK
    } else {
        Color32::WHITE
    }
}

/// Tooltip text for an event chip.
pub fn format_event_tooltip(event: &Event) -> String {
    let mut lines = vec![event.title.clone()];

    if event.all_day {
        lines.push(format!("All day - {}", event.start.format("%A, %B %d, %Y")));
    } else {
        lines.push(format!(
            "{} - {} ({})",
            event.start.format("%H:%M"),
            event.end.format("%H:%M"),
            event.start.format("%A, %B %d")
        ));
    }

    if let Some(location) = event.location.as_deref().filter(|l| !l.is_empty()) {
        lines.push(location.to_string());
    }

    lines.join("\n")
}
