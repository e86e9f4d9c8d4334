//! Collaborator seams: render hook and dispatcher options.

use core_config::{Config, CursorConfig, CursorShape, EditorConfig};
use core_state::Mode;
use core_text::Buffer;

/// Called after state changes that must reach the screen. All methods default to no-ops so a
/// front-end only implements what it draws.
pub trait RenderHook {
    /// Entered `mode`; `shape` is the configured cursor shape for it.
    fn mode_changed(&mut self, _mode: Mode, _shape: CursorShape) {}

    fn cursor_moved(&mut self, _cursor: usize) {}

    fn buffer_edited(&mut self, _buffer: &Buffer, _cursor: usize) {}

    /// One-line message for the user (search prompt, errors).
    fn hint(&mut self, _message: &str) {}
}

/// Render hook for headless use.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoRender;

impl RenderHook for NoRender {}

/// Settings the widgets read on every dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    pub cursor: CursorConfig,
    /// File-type hint for the external editor.
    pub file_type: String,
}

impl Default for Options {
    fn default() -> Self {
        Self {
            cursor: CursorConfig::default(),
            file_type: EditorConfig::default().file_type,
        }
    }
}

impl Options {
    pub fn from_config(cfg: &Config) -> Self {
        Self {
            cursor: cfg.file.cursor.clone(),
            file_type: cfg.file.editor.file_type.clone(),
        }
    }

    pub fn shape_for(&self, mode: Mode) -> CursorShape {
        match mode {
            Mode::Insert => self.cursor.insert,
            Mode::Command => self.cursor.command,
            Mode::Visual | Mode::VisualLine => self.cursor.visual,
            Mode::OperatorPending => self.cursor.pending,
        }
    }
}
