//! Gateway to the `lessc` command-line compiler.
//!
//! `lessc --no-color -` reads LESS from stdin and writes CSS to stdout; a
//! non-zero exit puts the parse error on stderr. Both channels become the
//! gateway contract: CSS text or a message string, nothing else.

use std::io::Write;
use std::process::{Command, Stdio};

use super::{check_source_size, CompileError, Compiler};

/// Compiles by spawning the external `lessc` binary per request.
pub struct LesscCompiler {
    program: String,
}

impl Default for LesscCompiler {
    fn default() -> Self {
        Self {
            program: "lessc".to_string(),
        }
    }
}

impl LesscCompiler {
    /// Use a non-default compiler executable (path or name on `PATH`).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Compiler for LesscCompiler {
    fn compile(&self, source: &str) -> Result<String, CompileError> {
        check_source_size(source)?;

        let mut child = Command::new(&self.program)
            .args(["--no-color", "-"])
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| CompileError::new(format!("failed to launch {}: {e}", self.program)))?;

        // stdin is dropped after the write so lessc sees EOF.
        if let Some(mut stdin) = child.stdin.take() {
            stdin
                .write_all(source.as_bytes())
                .map_err(|e| CompileError::new(format!("failed to send source: {e}")))?;
        }

        let output = child
            .wait_with_output()
            .map_err(|e| CompileError::new(format!("{} did not finish: {e}", self.program)))?;

        if output.status.success() {
            String::from_utf8(output.stdout)
                .map_err(|_| CompileError::new("compiler produced non-UTF-8 output"))
        } else {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let message = stderr.trim();
            if message.is_empty() {
                Err(CompileError::new(format!(
                    "{} exited with {}",
                    self.program, output.status
                )))
            } else {
                Err(CompileError::new(message))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_binary_becomes_a_diagnostic() {
        let compiler = LesscCompiler::with_program("definitely-not-a-real-lessc");
        let err = compiler.compile(".a { color: red; }").unwrap_err();
        assert!(err.to_string().contains("failed to launch"));
    }

    #[test]
    fn oversized_source_is_refused_before_spawning() {
        let compiler = LesscCompiler::with_program("definitely-not-a-real-lessc");
        let big = "x".repeat(super::super::MAX_SOURCE_BYTES + 1);
        let err = compiler.compile(&big).unwrap_err();
        // The size message, not the missing-binary message.
        assert!(err.to_string().contains("at most"));
    }
}
