use std::time::Instant;

use egui::{Align2, Color32, CornerRadius, RichText};
use loupe_core::{
    InteractionStateMachine, NavigationState, ParameterKind, ParameterStore, FILTER_CHOICES,
    MAIN_MENU,
};

use crate::theme;

/// Draw the whole interaction layer: menu bar or active popup, the commit
/// toast, and the screen-brightness dim. Pure presentation over the machine
/// and store; nothing here mutates state.
pub fn draw_overlay(
    ctx: &egui::Context,
    machine: &InteractionStateMachine,
    params: &ParameterStore,
    now: Instant,
) {
    theme::apply(ctx);

    if machine.menu_visible(now) {
        match machine.navigation() {
            NavigationState::MainMenu { selected } => draw_main_menu(ctx, params, selected),
            NavigationState::FilterPicker { selected } => draw_filter_picker(ctx, selected),
            NavigationState::Adjusting { kind, pending } => draw_adjust_popup(ctx, kind, pending),
        }
    }

    if let Some(text) = machine.notice(now) {
        draw_notice(ctx, text);
    }

    draw_dim_layer(ctx, params.screen_brightness());
}

fn menu_frame() -> egui::Frame {
    egui::Frame::default()
        .fill(theme::MENU_BACKGROUND)
        .corner_radius(CornerRadius::same(10))
        .inner_margin(egui::Margin::symmetric(18, 10))
}

fn draw_main_menu(ctx: &egui::Context, params: &ParameterStore, selected: usize) {
    let accent = theme::accent(params.filter_mode());
    egui::Area::new(egui::Id::new("loupe-main-menu"))
        .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            menu_frame().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(
                        RichText::new(MAIN_MENU[selected].label)
                            .size(26.0)
                            .strong()
                            .color(accent),
                    );
                    ui.label(
                        RichText::new("scroll to browse, select to open")
                            .size(12.0)
                            .color(theme::MENU_HINT),
                    );
                });
            });
        });
}

fn draw_filter_picker(ctx: &egui::Context, selected: usize) {
    egui::Area::new(egui::Id::new("loupe-filter-picker"))
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            menu_frame().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new("Filters").size(14.0).color(theme::MENU_HINT));
                    for (i, mode) in FILTER_CHOICES.iter().enumerate() {
                        let text = if i == selected {
                            RichText::new(mode.label())
                                .size(24.0)
                                .strong()
                                .color(theme::accent(*mode))
                        } else {
                            RichText::new(mode.label())
                                .size(18.0)
                                .color(theme::MENU_HINT)
                        };
                        ui.label(text);
                    }
                });
            });
        });
}

fn draw_adjust_popup(ctx: &egui::Context, kind: ParameterKind, pending: i32) {
    egui::Area::new(egui::Id::new("loupe-adjust"))
        .anchor(Align2::CENTER_CENTER, egui::Vec2::ZERO)
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            menu_frame().show(ui, |ui| {
                ui.vertical_centered(|ui| {
                    ui.label(RichText::new(kind.title()).size(20.0).strong());
                    ui.add(
                        egui::ProgressBar::new(pending as f32 / 100.0).desired_width(240.0),
                    );
                    ui.label(RichText::new(value_text(kind, pending)).size(16.0));
                });
            });
        });
}

fn draw_notice(ctx: &egui::Context, text: &str) {
    egui::Area::new(egui::Id::new("loupe-notice"))
        .anchor(Align2::CENTER_TOP, egui::vec2(0.0, 32.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            menu_frame().show(ui, |ui| {
                ui.label(RichText::new(text).size(14.0));
            });
        });
}

/// Emulates the display-brightness control: a translucent black layer above
/// everything. This path never touches the GPU compositor.
fn draw_dim_layer(ctx: &egui::Context, screen_brightness: f32) {
    if screen_brightness >= 1.0 {
        return;
    }
    let alpha = ((1.0 - screen_brightness) * 240.0) as u8;
    let painter = ctx.layer_painter(egui::LayerId::new(
        egui::Order::Tooltip,
        egui::Id::new("loupe-dim"),
    ));
    painter.rect_filled(
        ctx.screen_rect(),
        CornerRadius::ZERO,
        Color32::from_black_alpha(alpha),
    );
}

/// Human-readable value for the adjust popup: zoom shows the factor, the
/// rest show percentages.
fn value_text(kind: ParameterKind, pending: i32) -> String {
    match kind {
        ParameterKind::Zoom => format!("{:.1}x", kind.from_percent(pending)),
        _ => format!("{pending}%"),
    }
}
