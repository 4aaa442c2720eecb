use egui::Color32;
use loupe_core::FilterMode;

pub const MENU_BACKGROUND: Color32 = Color32::from_rgba_premultiplied(20, 20, 24, 200);
pub const MENU_TEXT: Color32 = Color32::from_rgb(240, 240, 238);
pub const MENU_HINT: Color32 = Color32::from_rgb(150, 152, 160);

const ACCENT_NORMAL: Color32 = Color32::from_rgb(240, 240, 238);
const ACCENT_AMBER: Color32 = Color32::from_rgb(255, 184, 108);
const ACCENT_GRAY: Color32 = Color32::from_rgb(168, 168, 168);

/// Accent color reflecting the active filter, echoed by the menu chrome so
/// the selection is visible at a glance.
pub fn accent(mode: FilterMode) -> Color32 {
    match mode {
        FilterMode::Normal => ACCENT_NORMAL,
        FilterMode::Amber => ACCENT_AMBER,
        FilterMode::Grayscale => ACCENT_GRAY,
    }
}

static INIT: std::sync::Once = std::sync::Once::new();

/// Apply the dark full-screen visuals once.
pub fn apply(ctx: &egui::Context) {
    INIT.call_once(|| {
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = Color32::BLACK;
        visuals.window_fill = MENU_BACKGROUND;
        visuals.override_text_color = Some(MENU_TEXT);
        ctx.set_visuals(visuals);
    });
}
