//! Editor surface: the editable LESS pane and the read-only CSS output pane.
//!
//! Both are `TextEdit`s inside a scroll area with an optional painted line
//! gutter; the LESS pane uses the hand-rolled layouter from [`highlighter`],
//! the CSS pane goes through syntect since plain CSS is well covered there.

pub mod highlighter;

use eframe::egui;

use crate::app_state::EditorPrefs;

const EDITOR_BG: egui::Color32 = egui::Color32::from_rgb(24, 24, 26);
const HEADER_BG: egui::Color32 = egui::Color32::from_rgb(37, 37, 38);
const HEADER_FG: egui::Color32 = egui::Color32::from_rgb(224, 224, 224);
const GUTTER_BG: egui::Color32 = egui::Color32::from_rgb(30, 30, 30);
const GUTTER_FG: egui::Color32 = egui::Color32::from_rgb(133, 133, 133);

/// Editable LESS pane. Returns true when the user changed the source.
pub fn show_source(ui: &mut egui::Ui, source: &mut String, prefs: &EditorPrefs) -> bool {
    header(ui, "styles.less", ".less");

    let font_size = prefs.font_size as f32;
    let mut layouter = |ui: &egui::Ui, text: &str, _wrap_width: f32| {
        let mut job = egui::text::LayoutJob::default();
        highlighter::highlight_less(&mut job, text, font_size);
        // No wrapping, keeps gutter rows in sync with logical lines.
        job.wrap.max_width = f32::INFINITY;
        ui.fonts(|f| f.layout_job(job))
    };

    let mut changed = false;
    let num_lines = source.split('\n').count().max(1);
    pane(ui, "less_editor_scroll", num_lines, prefs, |ui| {
        let response = ui.add(
            egui::TextEdit::multiline(source)
                .id_source("less_source_edit")
                .font(egui::FontId::monospace(font_size))
                .code_editor()
                .frame(false)
                .desired_width(f32::INFINITY)
                .lock_focus(true)
                .layouter(&mut layouter),
        );
        changed = response.changed();
    });
    changed
}

/// Read-only compiled-CSS pane.
pub fn show_output(ui: &mut egui::Ui, css: &str, prefs: &EditorPrefs) {
    header(ui, "styles.css", ".css");

    let font_size = prefs.font_size as f32;
    let theme = egui_extras::syntax_highlighting::CodeTheme::dark();
    let mut layouter = |ui: &egui::Ui, text: &str, _wrap_width: f32| {
        let mut job = egui_extras::syntax_highlighting::highlight(ui.ctx(), &theme, text, "css");
        job.wrap.max_width = f32::INFINITY;
        ui.fonts(|f| f.layout_job(job))
    };

    pane(ui, "css_output_scroll", css.split('\n').count().max(1), prefs, |ui| {
        let mut readonly = css;
        ui.add(
            egui::TextEdit::multiline(&mut readonly)
                .id_source("css_output_view")
                .font(egui::FontId::monospace(font_size))
                .code_editor()
                .frame(false)
                .desired_width(f32::INFINITY)
                .layouter(&mut layouter),
        );
    });
}

fn header(ui: &mut egui::Ui, file_name: &str, badge: &str) {
    egui::Frame::none()
        .fill(HEADER_BG)
        .inner_margin(egui::vec2(12.0, 6.0))
        .show(ui, |ui| {
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(format!("📄 {file_name}")).color(HEADER_FG).size(13.0));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(egui::RichText::new(badge).weak().size(11.0));
                });
            });
        });
    ui.add_space(1.0);
}

/// Shared scaffolding: background, scroll area, and the line gutter to the
/// left of whatever text widget `add_text` provides.
fn pane(
    ui: &mut egui::Ui,
    scroll_id: &str,
    num_lines: usize,
    prefs: &EditorPrefs,
    add_text: impl FnOnce(&mut egui::Ui),
) {
    let font_id = egui::FontId::monospace(prefs.font_size as f32);
    let row_height = ui.fonts(|f| f.row_height(&font_id));
    let available_height = ui.available_height();

    ui.painter().rect_filled(
        ui.available_rect_before_wrap(),
        0.0,
        EDITOR_BG,
    );

    egui::ScrollArea::both()
        .id_source(scroll_id)
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                ui.spacing_mut().item_spacing.x = 0.0;

                if prefs.show_line_numbers {
                    let digits = num_lines.to_string().len().max(2);
                    let digit_width = ui.fonts(|f| f.glyph_width(&font_id, '0'));
                    let gutter_width = digits as f32 * digit_width + 20.0;
                    let content_height = (num_lines as f32 * row_height).max(available_height);

                    let (gutter_rect, _) = ui.allocate_exact_size(
                        egui::vec2(gutter_width, content_height),
                        egui::Sense::hover(),
                    );
                    ui.painter().rect_filled(gutter_rect, 0.0, GUTTER_BG);

                    for i in 1..=num_lines {
                        let y = gutter_rect.top() + (i - 1) as f32 * row_height;
                        if y + row_height < ui.clip_rect().top() {
                            continue;
                        }
                        if y > ui.clip_rect().bottom() {
                            break;
                        }
                        ui.painter().text(
                            egui::pos2(gutter_rect.right() - 8.0, y),
                            egui::Align2::RIGHT_TOP,
                            i.to_string(),
                            font_id.clone(),
                            GUTTER_FG,
                        );
                    }
                    ui.add_space(4.0);
                }

                ui.vertical(|ui| {
                    ui.set_min_height(available_height);
                    add_text(ui);
                });
            });
        });
}
