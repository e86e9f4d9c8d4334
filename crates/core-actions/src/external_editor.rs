//! External editor round trip for `vi-edit-command-line`.
//!
//! The buffer is written to a temp file named after the file-type hint, the editor runs to
//! completion on it, and the file is read back. The command comes from `$VISUAL`, then
//! `$EDITOR`, then the configured fallback.

use std::fs;
use std::path::Path;
use std::process::Command;
use thiserror::Error;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("no editor command configured")]
    NoEditor,
    #[error("temp file: {0}")]
    TempFile(#[from] std::io::Error),
    #[error("failed to start `{command}`: {source}")]
    Spawn {
        command: String,
        source: std::io::Error,
    },
    #[error("`{command}` exited with {status}")]
    Exit { command: String, status: String },
    #[error("edited text is not valid UTF-8")]
    NotUtf8,
    #[error("terminal: {0}")]
    Terminal(std::io::Error),
}

/// Hands the buffer to a program and returns its replacement.
pub trait EditorLauncher {
    fn edit(&mut self, text: &str, file_type: &str) -> Result<String, LaunchError>;
}

/// Launcher that never runs anything; the widget sees an error and stays a no-op.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoEditor;

impl EditorLauncher for NoEditor {
    fn edit(&mut self, _text: &str, _file_type: &str) -> Result<String, LaunchError> {
        Err(LaunchError::NoEditor)
    }
}

#[derive(Debug, Clone)]
pub struct ExternalEditor {
    command: String,
}

impl ExternalEditor {
    /// Resolve the command from the environment, falling back to `fallback`.
    pub fn from_env(fallback: &str) -> Self {
        let command = ["VISUAL", "EDITOR"]
            .into_iter()
            .filter_map(|var| std::env::var(var).ok())
            .find(|v| !v.trim().is_empty())
            .unwrap_or_else(|| fallback.to_string());
        Self { command }
    }

    /// Use `command` as is (split on whitespace, the file path appended).
    pub fn with_command(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
        }
    }

    pub fn command(&self) -> &str {
        &self.command
    }

    fn run(&self, path: &Path) -> Result<(), LaunchError> {
        let mut parts = self.command.split_whitespace();
        let program = parts.next().ok_or(LaunchError::NoEditor)?;
        let status = Command::new(program)
            .args(parts)
            .arg(path)
            .status()
            .map_err(|source| LaunchError::Spawn {
                command: self.command.clone(),
                source,
            })?;
        if !status.success() {
            return Err(LaunchError::Exit {
                command: self.command.clone(),
                status: status.to_string(),
            });
        }
        Ok(())
    }
}

impl EditorLauncher for ExternalEditor {
    fn edit(&mut self, text: &str, file_type: &str) -> Result<String, LaunchError> {
        let suffix = if file_type.is_empty() {
            String::new()
        } else {
            format!(".{file_type}")
        };
        let file = tempfile::Builder::new()
            .prefix("vimline-")
            .suffix(&suffix)
            .tempfile()?;
        fs::write(file.path(), text)?;
        debug!(target: "actions.external", command = %self.command, path = %file.path().display(), "editor_launch");
        self.run(file.path())?;
        let bytes = fs::read(file.path())?;
        String::from_utf8(bytes).map_err(|_| LaunchError::NotUtf8)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_command_is_no_editor() {
        let mut ed = ExternalEditor::with_command("   ");
        assert!(matches!(ed.edit("x", "sh"), Err(LaunchError::NoEditor)));
    }

    #[test]
    fn missing_program_is_spawn_error() {
        let mut ed = ExternalEditor::with_command("vimline-no-such-editor-binary");
        assert!(matches!(ed.edit("x", "sh"), Err(LaunchError::Spawn { .. })));
    }

    #[cfg(unix)]
    #[test]
    fn failing_editor_reports_exit() {
        let mut ed = ExternalEditor::with_command("false");
        let err = ed.edit("x", "sh").unwrap_err();
        assert!(matches!(err, LaunchError::Exit { .. }), "{err}");
    }

    #[cfg(unix)]
    #[test]
    fn untouched_file_round_trips() {
        let mut ed = ExternalEditor::with_command("true");
        assert_eq!(ed.edit("echo hi", "sh").unwrap(), "echo hi");
    }

    #[test]
    fn no_editor_launcher_always_fails() {
        assert!(NoEditor.edit("x", "").is_err());
    }
}
