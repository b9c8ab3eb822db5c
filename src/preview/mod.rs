//! Live preview: a fixed sample fragment painted with whatever the compiled
//! CSS says about it. Visual proof that the styles came out, not a browser.

pub mod style;

use eframe::egui;

use crate::app_state::AppState;
use style::{RuleStyle, StyleSheet};

const SAMPLE_BG: egui::Color32 = egui::Color32::from_rgb(245, 246, 250);
const SAMPLE_TEXT: egui::Color32 = egui::Color32::from_rgb(40, 40, 48);

pub fn show(ui: &mut egui::Ui, state: &AppState) {
    let sheet = StyleSheet::scan(&state.document.css);

    egui::Frame::none()
        .fill(SAMPLE_BG)
        .rounding(6.0)
        .inner_margin(16.0)
        .show(ui, |ui| {
            ui.set_min_width(ui.available_width());
            egui::ScrollArea::vertical()
                .id_source("preview_scroll")
                .auto_shrink([false, false])
                .show(ui, |ui| {
                    hero(ui, &sheet);
                    ui.add_space(12.0);
                    dashboard(ui, &sheet);
                });
        });
}

fn hero(ui: &mut egui::Ui, sheet: &StyleSheet) {
    let rule = sheet.class("hero-section");
    let h1 = sheet.descendant("hero-section", "h1");
    let bg = rule
        .background
        .unwrap_or(egui::Color32::from_rgb(99, 102, 241));
    let fg = rule.color.unwrap_or(egui::Color32::WHITE);

    styled_frame(&rule, bg).show(ui, |ui| {
        ui.set_min_width(ui.available_width());
        ui.vertical_centered(|ui| {
            ui.label(
                egui::RichText::new("Live Preview")
                    .size(28.0)
                    .strong()
                    .color(h1.color.unwrap_or(fg)),
            );
            ui.label(
                egui::RichText::new("Your LESS styles are applied here in real time")
                    .size(14.0)
                    .color(fg),
            );
        });
    });
}

fn dashboard(ui: &mut egui::Ui, sheet: &StyleSheet) {
    let widget = sheet.class("widget");
    let highlight = {
        let mut h = widget;
        let extra = sheet.class("highlight");
        if extra.background.is_some() {
            h.background = extra.background;
        }
        if extra.color.is_some() {
            h.color = extra.color;
        }
        h
    };

    let cards: [(&str, &str, &str, RuleStyle); 3] = [
        (
            "Feature Card",
            "This demonstrates your compiled styles",
            "btn-primary",
            highlight,
        ),
        (
            "Another Widget",
            "See how your variables and mixins work",
            "btn-secondary",
            widget,
        ),
        (
            "Glass Effect",
            "Modern glassmorphism design",
            "btn-glass",
            widget,
        ),
    ];

    ui.columns(3, |cols| {
        for (col, (title, body, button_class, rule)) in cols.iter_mut().zip(cards) {
            widget_card(col, sheet, title, body, button_class, &rule);
        }
    });
}

fn widget_card(
    ui: &mut egui::Ui,
    sheet: &StyleSheet,
    title: &str,
    body: &str,
    button_class: &str,
    rule: &RuleStyle,
) {
    let bg = rule.background.unwrap_or(egui::Color32::WHITE);
    let fg = rule.color.unwrap_or(SAMPLE_TEXT);

    styled_frame(rule, bg).show(ui, |ui| {
        ui.set_min_height(110.0);
        ui.label(egui::RichText::new(title).size(16.0).strong().color(fg));
        ui.label(egui::RichText::new(body).size(12.0).color(fg.gamma_multiply(0.8)));
        ui.add_space(8.0);
        sample_button(ui, sheet, button_class);
    });
}

/// A non-interactive button painted from the stylesheet's class rule.
fn sample_button(ui: &mut egui::Ui, sheet: &StyleSheet, class: &str) {
    let rule = sheet.class(class);
    let bg = rule
        .background
        .unwrap_or(egui::Color32::from_rgb(99, 102, 241));
    let fg = rule.color.unwrap_or(egui::Color32::WHITE);
    let rounding = rule.border_radius.unwrap_or(6.0);
    let padding = rule.padding.unwrap_or(8.0).clamp(2.0, 24.0);

    let label = class.strip_prefix("btn-").unwrap_or(class);
    egui::Frame::none()
        .fill(bg)
        .rounding(rounding)
        .inner_margin(egui::vec2(padding * 1.5, padding * 0.75))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(capitalize(label)).size(13.0).color(fg));
        });
}

fn styled_frame(rule: &RuleStyle, bg: egui::Color32) -> egui::Frame {
    egui::Frame::none()
        .fill(bg)
        .rounding(rule.border_radius.unwrap_or(8.0))
        .inner_margin(rule.padding.unwrap_or(16.0).clamp(4.0, 48.0))
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn capitalize_handles_edges() {
        assert_eq!(capitalize("primary"), "Primary");
        assert_eq!(capitalize(""), "");
        assert_eq!(capitalize("x"), "X");
    }
}
