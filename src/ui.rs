//! Shell/view controller: tabs, toolbar, banner, toasts, and the per-frame
//! update loop that drives the compile pipeline.

use std::sync::Arc;
use std::time::Duration;

use eframe::egui;

use crate::actions;
use crate::app_state::{AppState, EditorPrefs, PanelTab, ToastKind};
use crate::code_panel;
use crate::compiler::Compiler;
use crate::preview;
use crate::settings;
use crate::states::document::CompileStatus;
use crate::templates;

const PREFS_KEY: &str = "editor_prefs";

pub struct PlaygroundApp {
    state: AppState,
}

pub fn create_app(
    cc: &eframe::CreationContext<'_>,
    compiler: Arc<dyn Compiler>,
    initial_source: Option<String>,
) -> PlaygroundApp {
    let prefs: EditorPrefs = cc
        .storage
        .and_then(|s| eframe::get_value(s, PREFS_KEY))
        .unwrap_or_default();
    PlaygroundApp {
        state: AppState::new(compiler, initial_source, prefs),
    }
}

impl eframe::App for PlaygroundApp {
    fn save(&mut self, storage: &mut dyn eframe::Storage) {
        eframe::set_value(storage, PREFS_KEY, &self.state.prefs);
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let state = &mut self.state;
        let now = ctx.input(|i| i.time);

        state.tick(now);

        // The debounce timer and in-flight compiles need frames without input.
        if let Some(remaining) = state.next_wakeup(now) {
            ctx.request_repaint_after(Duration::from_secs_f64(remaining.max(0.01)));
        }
        if state.pipeline.is_busy() {
            ctx.request_repaint_after(Duration::from_millis(50));
        }

        if !state.fullscreen {
            egui::TopBottomPanel::top("header_panel")
                .show(ctx, |ui| header(ui, state, ctx, now));
        } else {
            // Minimal escape hatch while the chrome is hidden.
            egui::Area::new("fullscreen_exit")
                .order(egui::Order::Foreground)
                .anchor(egui::Align2::RIGHT_TOP, egui::vec2(-8.0, 8.0))
                .show(ctx, |ui| {
                    if ui.button("🗗").on_hover_text("Exit fullscreen").clicked() {
                        state.fullscreen = false;
                    }
                });
        }

        if let Some(message) = state.document.diagnostic.clone() {
            egui::TopBottomPanel::top("error_banner").show(ctx, |ui| {
                error_banner(ui, &message);
            });
        }

        egui::CentralPanel::default().show(ctx, |ui| match state.active_tab {
            PanelTab::Editor => {
                ui.columns(2, |cols| {
                    if code_panel::show_source(&mut cols[0], &mut state.document.source, &state.prefs)
                    {
                        state.on_source_edited(now);
                    }
                    code_panel::show_output(&mut cols[1], &state.document.css, &state.prefs);
                });
            }
            PanelTab::Preview => preview::show(ui, state),
            PanelTab::Split => {
                ui.columns(3, |cols| {
                    if code_panel::show_source(&mut cols[0], &mut state.document.source, &state.prefs)
                    {
                        state.on_source_edited(now);
                    }
                    code_panel::show_output(&mut cols[1], &state.document.css, &state.prefs);
                    preview::show(&mut cols[2], state);
                });
            }
            PanelTab::Templates => templates_tab(ui, state, now),
        });

        settings::show(ctx, state);
        toast(ctx, state);
    }
}

fn header(ui: &mut egui::Ui, state: &mut AppState, ctx: &egui::Context, now: f64) {
    ui.add_space(6.0);
    ui.horizontal(|ui| {
        ui.label(egui::RichText::new("✨").size(20.0));
        ui.vertical(|ui| {
            ui.label(egui::RichText::new("LESS Playground").heading().strong());
            ui.label(
                egui::RichText::new("Write LESS, watch the CSS and preview update live")
                    .weak()
                    .size(11.0),
            );
        });

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("⛶").on_hover_text("Fullscreen").clicked() {
                state.fullscreen = true;
            }
            if ui.button("⚙").on_hover_text("Settings").clicked() {
                state.show_settings = !state.show_settings;
            }
            let theme_icon = if state.dark_mode { "☀" } else { "🌙" };
            if ui.button(theme_icon).on_hover_text("Toggle theme").clicked() {
                actions::toggle_theme(state, ctx);
            }
            if ui.button("🔗 Share").on_hover_text("Copy a share link").clicked() {
                actions::share_link(state, ctx, now);
            }
        });
    });
    ui.add_space(6.0);

    // Controls row: status, toggles, toolbar actions.
    ui.horizontal(|ui| {
        status_badge(ui, state);
        ui.separator();
        ui.checkbox(&mut state.prefs.auto_compile, "Auto-compile");

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            if ui.button("💾 Download").clicked() {
                actions::download_css(state, now);
            }
            if ui.button("📋 Copy").clicked() {
                actions::copy_css(state, ctx, now);
            }
            if ui.button("↺ Reset").clicked() {
                actions::reset(state, now);
            }
            let compiling = state.document.status == CompileStatus::Compiling;
            if ui
                .add_enabled(!compiling, egui::Button::new("▶ Compile"))
                .clicked()
            {
                state.debounce.request_manual();
            }
        });
    });
    ui.add_space(4.0);

    // Tab strip.
    ui.horizontal(|ui| {
        for (tab, label) in [
            (PanelTab::Editor, "{ } Editor"),
            (PanelTab::Preview, "👁 Live Preview"),
            (PanelTab::Split, "⊞ Split View"),
            (PanelTab::Templates, "📖 Templates"),
        ] {
            if ui
                .selectable_label(state.active_tab == tab, label)
                .clicked()
            {
                state.active_tab = tab;
            }
        }
    });
    ui.add_space(4.0);
}

fn status_badge(ui: &mut egui::Ui, state: &AppState) {
    let (text, color) = match state.document.status {
        CompileStatus::Idle => ("· Idle", egui::Color32::from_gray(140)),
        CompileStatus::Compiling => ("⏳ Compiling…", egui::Color32::from_rgb(200, 170, 60)),
        CompileStatus::Ready => ("⚡ Ready", egui::Color32::from_rgb(100, 200, 120)),
        CompileStatus::Failed => ("⚠ Error", egui::Color32::from_rgb(220, 100, 100)),
    };
    ui.colored_label(color, text);
}

fn error_banner(ui: &mut egui::Ui, message: &str) {
    egui::Frame::none()
        .fill(egui::Color32::from_rgb(60, 24, 24))
        .inner_margin(egui::vec2(12.0, 8.0))
        .show(ui, |ui| {
            ui.horizontal_wrapped(|ui| {
                ui.colored_label(egui::Color32::from_rgb(240, 140, 140), "⚠ Compilation error:");
                ui.label(egui::RichText::new(message).color(egui::Color32::from_rgb(230, 200, 200)));
            });
        });
}

fn templates_tab(ui: &mut egui::Ui, state: &mut AppState, now: f64) {
    egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            ui.columns(templates::TEMPLATES.len(), |cols| {
                for (col, template) in cols.iter_mut().zip(templates::TEMPLATES) {
                    egui::Frame::group(col.style())
                        .rounding(8.0)
                        .inner_margin(12.0)
                        .show(col, |ui| {
                            ui.label(egui::RichText::new(template.name).size(16.0).strong());
                            ui.label(egui::RichText::new(template.description).weak().size(12.0));
                            ui.add_space(6.0);

                            let excerpt: String = template.source.chars().take(100).collect();
                            egui::Frame::none()
                                .fill(egui::Color32::from_rgb(24, 24, 26))
                                .rounding(6.0)
                                .inner_margin(8.0)
                                .show(ui, |ui| {
                                    ui.label(
                                        egui::RichText::new(format!("{excerpt}…"))
                                            .monospace()
                                            .size(10.0),
                                    );
                                });
                            ui.add_space(6.0);

                            if ui.button("Load Template").clicked() {
                                actions::load_template(state, template, now);
                            }
                        });
                }
            });
        });
}

fn toast(ctx: &egui::Context, state: &mut AppState) {
    let Some(toast) = &state.toast else {
        return;
    };
    let bg = match toast.kind {
        ToastKind::Error => egui::Color32::from_rgb(200, 50, 50),
        ToastKind::Success => egui::Color32::from_rgb(50, 150, 50),
        ToastKind::Info => egui::Color32::from_gray(80),
    };

    egui::Area::new("toast_notification")
        .order(egui::Order::Tooltip)
        .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -40.0))
        .show(ctx, |ui| {
            egui::Frame::none()
                .fill(bg)
                .rounding(8.0)
                .stroke(egui::Stroke::new(1.0, egui::Color32::from_white_alpha(50)))
                .inner_margin(12.0)
                .shadow(egui::epaint::Shadow::small_dark())
                .show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(&toast.message)
                            .color(egui::Color32::WHITE)
                            .size(14.0),
                    );
                });
        });
    // Wake up to clear the toast once its deadline passes.
    ctx.request_repaint_after(Duration::from_millis(250));
}
