//! Editor preferences modal.

use eframe::egui;

use crate::app_state::{AppState, FONT_SIZES};
use crate::states::debounce::QUIET_PERIOD;

pub fn show(ctx: &egui::Context, state: &mut AppState) {
    let screen_rect = ctx.screen_rect();
    let t = ctx.animate_bool("settings_modal_fade".into(), state.show_settings);
    if t <= 0.0 {
        return;
    }

    egui::Area::new("settings_overlay")
        .fixed_pos(egui::pos2(0.0, 0.0))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            // Dimmed backdrop.
            ui.painter().rect_filled(
                screen_rect,
                0.0,
                egui::Color32::from_black_alpha((140.0 * t) as u8),
            );

            let window_size = egui::vec2(340.0, 220.0);
            let window_rect =
                egui::Rect::from_center_size(screen_rect.center(), window_size);

            let mut panel_ui = ui.child_ui(window_rect, egui::Layout::top_down(egui::Align::Min));
            egui::Frame::window(panel_ui.style())
                .fill(egui::Color32::from_rgb(32, 32, 36))
                .rounding(10.0)
                .inner_margin(16.0)
                .show(&mut panel_ui, |ui| {
                    ui.set_min_size(window_size - egui::vec2(32.0, 32.0));

                    ui.horizontal(|ui| {
                        ui.heading("Editor Settings");
                        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                            if ui.button("✕").clicked() {
                                state.show_settings = false;
                            }
                        });
                    });
                    ui.separator();
                    ui.add_space(6.0);

                    egui::ComboBox::from_label("Font size")
                        .selected_text(format!("{}px", state.prefs.font_size))
                        .show_ui(ui, |ui| {
                            for &size in FONT_SIZES {
                                ui.selectable_value(
                                    &mut state.prefs.font_size,
                                    size,
                                    format!("{size}px"),
                                );
                            }
                        });
                    ui.add_space(4.0);

                    ui.checkbox(&mut state.prefs.show_line_numbers, "Show line numbers");
                    ui.checkbox(&mut state.prefs.auto_compile, "Auto-compile");
                    ui.add_space(8.0);

                    ui.label(
                        egui::RichText::new(format!(
                            "Auto-compile waits {}ms after your last keystroke.",
                            (QUIET_PERIOD * 1000.0) as u32
                        ))
                        .weak()
                        .size(11.0),
                    );
                });
        });
}
