//! Toolbar actions: copy, download, share, reset.
//!
//! None of these touch the compiled output directly; they read Document State
//! or mutate the source and let the scheduler react. Failures are toasts,
//! never state corruption.

use std::path::Path;

use eframe::egui;
use log::{info, warn};

use crate::app_state::{AppState, ToastKind};
use crate::share;

/// Put the compiled CSS on the system clipboard.
pub fn copy_css(state: &mut AppState, ctx: &egui::Context, now: f64) {
    if state.document.css.is_empty() {
        state.show_toast(ToastKind::Info, "Nothing compiled yet", now);
        return;
    }
    ctx.output_mut(|o| o.copied_text = state.document.css.clone());
    state.show_toast(ToastKind::Success, "CSS copied to clipboard", now);
}

/// Ask for a destination (defaulting to `styles.css`) and write the CSS.
pub fn download_css(state: &mut AppState, now: f64) {
    if state.document.css.is_empty() {
        state.show_toast(ToastKind::Info, "Nothing compiled yet", now);
        return;
    }
    let Some(path) = rfd::FileDialog::new()
        .set_file_name("styles.css")
        .add_filter("CSS", &["css"])
        .save_file()
    else {
        return; // user cancelled
    };
    match write_css(&path, &state.document.css) {
        Ok(()) => {
            info!("wrote compiled CSS to {}", path.display());
            state.show_toast(ToastKind::Success, "CSS file saved", now);
        }
        Err(err) => {
            warn!("failed to write {}: {err}", path.display());
            state.show_toast(ToastKind::Error, format!("Could not save file: {err}"), now);
        }
    }
}

pub fn write_css(path: &Path, css: &str) -> std::io::Result<()> {
    std::fs::write(path, css)
}

/// Encode the current source into a share URL and copy it.
pub fn share_link(state: &mut AppState, ctx: &egui::Context, now: f64) {
    let url = share::share_url(&state.document.source);
    ctx.output_mut(|o| o.copied_text = url);
    state.show_toast(ToastKind::Success, "Share link copied", now);
}

/// Swap the chrome between dark and light. Session-local only; the choice is
/// never persisted.
pub fn toggle_theme(state: &mut AppState, ctx: &egui::Context) {
    state.dark_mode = !state.dark_mode;
    ctx.set_visuals(if state.dark_mode {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
}

/// Restore the built-in default source.
pub fn reset(state: &mut AppState, now: f64) {
    state.document.reset();
    state.on_source_edited(now);
    state.show_toast(ToastKind::Info, "Reset to default template", now);
}

/// Load a catalog template into the editor.
pub fn load_template(state: &mut AppState, template: &crate::templates::Template, now: f64) {
    state.document.load_template(template);
    state.on_source_edited(now);
    state.show_toast(
        ToastKind::Success,
        format!("Loaded template: {}", template.name),
        now,
    );
}
