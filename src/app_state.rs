//! Application state: one struct, one writer (the update loop).

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::compiler::{CompilePipeline, Compiler};
use crate::states::debounce::DebounceState;
use crate::states::document::DocumentState;

#[derive(PartialEq, Eq, Clone, Copy, Debug, Serialize, Deserialize)]
pub enum PanelTab {
    Editor,
    Preview,
    Split,
    Templates,
}

/// Font sizes offered by the preferences UI.
pub const FONT_SIZES: &[u8] = &[12, 14, 16, 18];

/// Process-wide editor preferences. Persisted best-effort via eframe storage.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct EditorPrefs {
    pub font_size: u8,
    pub show_line_numbers: bool,
    pub auto_compile: bool,
}

impl Default for EditorPrefs {
    fn default() -> Self {
        Self {
            font_size: 14,
            show_line_numbers: true,
            auto_compile: true,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ToastKind {
    Info,
    Success,
    Error,
}

/// A transient notification; cleared once `deadline` passes.
pub struct Toast {
    pub message: String,
    pub kind: ToastKind,
    pub deadline: f64,
}

const TOAST_SECONDS: f64 = 2.5;

pub struct AppState {
    pub document: DocumentState,
    pub debounce: DebounceState,
    pub pipeline: CompilePipeline,
    pub prefs: EditorPrefs,

    pub active_tab: PanelTab,
    pub fullscreen: bool,
    pub show_settings: bool,
    /// Session-local chrome theme; deliberately not part of [`EditorPrefs`].
    pub dark_mode: bool,
    pub toast: Option<Toast>,
}

impl AppState {
    pub fn new(
        compiler: Arc<dyn Compiler>,
        initial_source: Option<String>,
        prefs: EditorPrefs,
    ) -> Self {
        let mut document = DocumentState::default();
        if let Some(source) = initial_source {
            // Share-link payload lands before the first render.
            document.set_source(source);
        }
        let mut debounce = DebounceState::default();
        // Populate the output pane shortly after startup (if auto is on).
        debounce.on_change(0.0);

        Self {
            document,
            debounce,
            pipeline: CompilePipeline::spawn(compiler),
            prefs,
            active_tab: PanelTab::Editor,
            fullscreen: false,
            show_settings: false,
            dark_mode: true,
            toast: None,
        }
    }

    /// Per-frame driving: drain finished compiles, then let the debounce
    /// timer (or a manual request) start the next one. Returns true when a
    /// result was applied this frame.
    pub fn tick(&mut self, now: f64) -> bool {
        let applied = self.pipeline.poll(&mut self.document);
        if self.debounce.poll(now, self.prefs.auto_compile) {
            self.pipeline.request(&mut self.document);
        }
        if let Some(toast) = &self.toast {
            if now > toast.deadline {
                self.toast = None;
            }
        }
        applied
    }

    /// Seconds until the scheduler next needs a frame, if any. While
    /// auto-compile is off a pending edit never fires on its own (only a
    /// manual request does), so no wakeup is scheduled for it.
    pub fn next_wakeup(&self, now: f64) -> Option<f64> {
        if !self.prefs.auto_compile {
            return None;
        }
        self.debounce.remaining(now)
    }

    /// Record a source mutation (keystroke, template load, reset).
    pub fn on_source_edited(&mut self, now: f64) {
        self.debounce.on_change(now);
    }

    pub fn show_toast(&mut self, kind: ToastKind, message: impl Into<String>, now: f64) {
        self.toast = Some(Toast {
            message: message.into(),
            kind,
            deadline: now + TOAST_SECONDS,
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::compiler::CompileError;
    use crate::states::debounce::QUIET_PERIOD;
    use crate::states::document::CompileStatus;
    use std::time::{Duration, Instant};

    struct EchoCompiler;

    impl Compiler for EchoCompiler {
        fn compile(&self, source: &str) -> Result<String, CompileError> {
            if source.contains("bad") {
                Err(CompileError::new("unexpected token"))
            } else {
                Ok(format!("/* ok */ {source}"))
            }
        }
    }

    fn fresh(auto: bool) -> AppState {
        let prefs = EditorPrefs {
            auto_compile: auto,
            ..EditorPrefs::default()
        };
        AppState::new(Arc::new(EchoCompiler), None, prefs)
    }

    fn tick_until_settled(state: &mut AppState, now: f64) {
        let deadline = Instant::now() + Duration::from_secs(5);
        loop {
            state.tick(now);
            if state.document.status != CompileStatus::Compiling {
                return;
            }
            assert!(Instant::now() < deadline, "compile never settled");
            std::thread::sleep(Duration::from_millis(5));
        }
    }

    #[test]
    fn startup_compiles_default_source_when_auto_on() {
        let mut state = fresh(true);
        state.tick(QUIET_PERIOD + 0.01);
        tick_until_settled(&mut state, QUIET_PERIOD + 0.02);
        assert_eq!(state.document.status, CompileStatus::Ready);
        assert!(state.document.css.starts_with("/* ok */"));
    }

    #[test]
    fn edits_do_not_compile_with_auto_off_until_manual() {
        let mut state = fresh(false);
        state.document.set_source("@x: 1;");
        state.on_source_edited(1.0);
        state.tick(100.0);
        assert_eq!(state.document.status, CompileStatus::Idle);

        state.debounce.request_manual();
        state.tick(100.0);
        tick_until_settled(&mut state, 100.0);
        assert_eq!(state.document.status, CompileStatus::Ready);
        assert!(state.document.css.contains("@x: 1;"));
    }

    #[test]
    fn burst_of_edits_compiles_final_source_once() {
        let mut state = fresh(true);
        // Swallow the startup compile trigger first.
        state.tick(QUIET_PERIOD + 0.01);
        tick_until_settled(&mut state, QUIET_PERIOD + 0.02);

        let base = 10.0;
        for (i, text) in ["@a", "@a:", "@a: 1", "@a: 1;"].iter().enumerate() {
            let now = base + i as f64 * 0.05;
            state.document.set_source(*text);
            state.on_source_edited(now);
            state.tick(now);
        }
        let fire_at = base + 3.0 * 0.05 + QUIET_PERIOD;
        state.tick(fire_at);
        tick_until_settled(&mut state, fire_at);
        assert_eq!(state.document.css, "/* ok */ @a: 1;");
        assert!(!state.debounce.timer_pending());
    }

    #[test]
    fn failed_compile_surfaces_diagnostic_and_keeps_css() {
        let mut state = fresh(true);
        state.tick(QUIET_PERIOD + 0.01);
        tick_until_settled(&mut state, QUIET_PERIOD + 0.02);
        let good_css = state.document.css.clone();

        state.document.set_source("bad {");
        state.on_source_edited(5.0);
        state.tick(5.0 + QUIET_PERIOD);
        tick_until_settled(&mut state, 5.0 + QUIET_PERIOD);
        assert_eq!(state.document.status, CompileStatus::Failed);
        assert_eq!(state.document.diagnostic.as_deref(), Some("unexpected token"));
        assert_eq!(state.document.css, good_css);
    }

    #[test]
    fn no_wakeups_scheduled_while_auto_compile_is_off() {
        let mut state = fresh(false);
        state.document.set_source("@x: 1;");
        state.on_source_edited(1.0);
        // The edit stays recorded but must not demand frames, however long
        // it sits there.
        assert_eq!(state.next_wakeup(2.0), None);
        assert_eq!(state.next_wakeup(100.0), None);
        assert!(state.debounce.timer_pending());
        // Re-enabling auto resumes normal wakeup scheduling.
        state.prefs.auto_compile = true;
        assert_eq!(state.next_wakeup(100.0), Some(0.0));
    }

    #[test]
    fn toast_expires_on_tick() {
        let mut state = fresh(false);
        state.show_toast(ToastKind::Success, "CSS copied", 1.0);
        state.tick(2.0);
        assert!(state.toast.is_some());
        state.tick(10.0);
        assert!(state.toast.is_none());
    }
}
