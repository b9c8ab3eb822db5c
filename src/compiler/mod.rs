//! Compiler gateway: the boundary to the external LESS compiler.
//!
//! The compiler itself is a black box. Everything behind [`Compiler::compile`]
//! is someone else's problem; everything in front of it only ever sees a CSS
//! string or a [`CompileError`] message.

pub mod lessc;
pub mod worker;

pub use lessc::LesscCompiler;
pub use worker::CompilePipeline;

use thiserror::Error;

/// Largest source accepted by the gateway. Anything bigger is refused with a
/// diagnostic before the external compiler is invoked.
pub const MAX_SOURCE_BYTES: usize = 256 * 1024;

/// The single error kind the rest of the system observes: a compile failure
/// carrying the external compiler's message, surfaced verbatim.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{message}")]
pub struct CompileError {
    message: String,
}

impl CompileError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// A LESS-to-CSS compiler. Implementations run to completion once invoked;
/// cancellation is handled upstream by discarding stale results.
pub trait Compiler: Send + Sync {
    fn compile(&self, source: &str) -> Result<String, CompileError>;
}

/// Reject over-large sources uniformly across implementations.
pub(crate) fn check_source_size(source: &str) -> Result<(), CompileError> {
    if source.len() > MAX_SOURCE_BYTES {
        return Err(CompileError::new(format!(
            "source is {} bytes; the playground accepts at most {} bytes",
            source.len(),
            MAX_SOURCE_BYTES
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_displays_message_verbatim() {
        let err = CompileError::new("Unrecognised input. Possibly missing '}'");
        assert_eq!(err.to_string(), "Unrecognised input. Possibly missing '}'");
    }

    #[test]
    fn size_check_rejects_oversized_source() {
        assert!(check_source_size("a").is_ok());
        let big = "x".repeat(MAX_SOURCE_BYTES + 1);
        let err = check_source_size(&big).unwrap_err();
        assert!(err.to_string().contains("at most"));
    }
}
