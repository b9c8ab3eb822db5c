//! Document state: the single source of truth the surfaces render from.

use crate::templates::{Template, DEFAULT_SOURCE};

/// Where the most recent compile attempt stands.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum CompileStatus {
    /// No compile has run yet.
    #[default]
    Idle,
    /// At least one compile is in flight.
    Compiling,
    /// The latest applied attempt succeeded.
    Ready,
    /// The latest applied attempt failed.
    Failed,
}

/// Holds the LESS source, the last successful CSS output, and the last
/// diagnostic. Exactly one writer (the UI update loop) mutates this.
#[derive(Clone, Debug)]
pub struct DocumentState {
    pub source: String,
    /// Last *successful* compile output. A failed attempt leaves it untouched
    /// so the output pane and preview keep showing valid CSS.
    pub css: String,
    /// Message from the most recent failed attempt. Cleared by the next
    /// success; a single attempt never both changes `css` and sets this.
    pub diagnostic: Option<String>,
    pub status: CompileStatus,
}

impl Default for DocumentState {
    fn default() -> Self {
        Self {
            source: DEFAULT_SOURCE.to_string(),
            css: String::new(),
            diagnostic: None,
            status: CompileStatus::Idle,
        }
    }
}

impl DocumentState {
    /// Replace the source text. Nothing else changes synchronously; stale
    /// output stays visible until the next compile lands.
    pub fn set_source(&mut self, text: impl Into<String>) {
        self.source = text.into();
    }

    pub fn begin_compile(&mut self) {
        self.status = CompileStatus::Compiling;
    }

    /// Apply the outcome of a compile attempt.
    pub fn complete_compile(&mut self, result: Result<String, crate::compiler::CompileError>) {
        match result {
            Ok(css) => {
                self.css = css;
                self.diagnostic = None;
                self.status = CompileStatus::Ready;
            }
            Err(err) => {
                self.diagnostic = Some(err.to_string());
                self.status = CompileStatus::Failed;
            }
        }
    }

    /// Load a catalog template, overwriting the source wholesale. Does not
    /// compile; the scheduler reacts to the mutation.
    pub fn load_template(&mut self, template: &Template) {
        self.source = template.source.to_string();
    }

    /// Restore the built-in default source.
    pub fn reset(&mut self) {
        self.source = DEFAULT_SOURCE.to_string();
    }
}
