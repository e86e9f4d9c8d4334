//! Raw-mode terminal plumbing for the interactive prompt.

use crate::key_map::map_key_event;
use anyhow::Result;
use core_actions::{EditorLauncher, LaunchError, RenderHook};
use core_config::CursorShape;
use core_events::{KeyEvent, KeySource};
use core_state::Mode;
use core_text::Buffer;
use crossterm::cursor::{MoveToColumn, SetCursorStyle};
use crossterm::event::{self, Event};
use crossterm::style::Print;
use crossterm::terminal::{Clear, ClearType, disable_raw_mode, enable_raw_mode};
use crossterm::{execute, queue};
use std::io::{self, Stdout, Write, stdout};
use tracing::warn;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Raw mode for as long as the guard lives.
pub struct RawMode {
    active: bool,
}

impl RawMode {
    pub fn enter() -> Result<Self> {
        enable_raw_mode()?;
        Ok(Self { active: true })
    }

    /// Leave raw mode early; dropping afterwards is a no-op.
    pub fn leave(&mut self) -> Result<()> {
        if self.active {
            execute!(stdout(), SetCursorStyle::DefaultUserShape)?;
            disable_raw_mode()?;
            self.active = false;
        }
        Ok(())
    }
}

impl Drop for RawMode {
    fn drop(&mut self) {
        let _ = self.leave();
    }
}

/// Blocking key reader over crossterm events. A read error ends the source.
pub struct TerminalKeys;

impl KeySource for TerminalKeys {
    fn next_key(&mut self) -> Option<KeyEvent> {
        loop {
            match event::read() {
                Ok(Event::Key(ev)) => {
                    if let Some(key) = map_key_event(&ev) {
                        return Some(key);
                    }
                }
                Ok(_) => {}
                Err(err) => {
                    warn!(target: "runtime", error = %err, "terminal_read_failed");
                    return None;
                }
            }
        }
    }
}

/// Draws `prompt + buffer` on the current terminal line. Line breaks in the buffer show as
/// `↵` so the whole edit stays on one row.
pub struct LineView {
    prompt: String,
    text: String,
    cursor: usize,
    hint: String,
    out: Stdout,
}

impl LineView {
    pub fn new(prompt: impl Into<String>, buffer: &Buffer, cursor: usize) -> Self {
        Self {
            prompt: prompt.into(),
            text: buffer.to_string(),
            cursor,
            hint: String::new(),
            out: stdout(),
        }
    }

    pub fn redraw(&mut self) {
        if let Err(err) = self.draw() {
            warn!(target: "runtime", error = %err, "render_failed");
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let shown: String = self
            .text
            .chars()
            .map(|c| if c == '\n' { '↵' } else { c })
            .collect();
        let column = self.prompt.width() + display_width(&shown, self.cursor);
        queue!(
            self.out,
            MoveToColumn(0),
            Clear(ClearType::CurrentLine),
            Print(&self.prompt),
            Print(&shown),
        )?;
        if !self.hint.is_empty() {
            queue!(self.out, Print("  "), Print(&self.hint))?;
        }
        queue!(self.out, MoveToColumn(u16::try_from(column).unwrap_or(u16::MAX)))?;
        self.out.flush()
    }

    /// Leave the finished line on screen and move below it.
    pub fn finish(&mut self) {
        self.hint.clear();
        self.redraw();
        if let Err(err) = execute!(self.out, Print("\r\n")) {
            warn!(target: "runtime", error = %err, "render_failed");
        }
    }
}

/// Columns taken by the first `chars` characters of `text`.
fn display_width(text: &str, chars: usize) -> usize {
    text.chars().take(chars).map(|c| c.width().unwrap_or(0)).sum()
}

impl RenderHook for LineView {
    fn mode_changed(&mut self, _mode: Mode, shape: CursorShape) {
        let style = match shape {
            CursorShape::Block => SetCursorStyle::SteadyBlock,
            CursorShape::Beam => SetCursorStyle::SteadyBar,
            CursorShape::Underline => SetCursorStyle::SteadyUnderScore,
        };
        if let Err(err) = execute!(self.out, style) {
            warn!(target: "runtime", error = %err, "cursor_style_failed");
        }
    }

    fn cursor_moved(&mut self, cursor: usize) {
        self.cursor = cursor;
        self.redraw();
    }

    fn buffer_edited(&mut self, buffer: &Buffer, cursor: usize) {
        self.text = buffer.to_string();
        self.cursor = cursor;
        self.redraw();
    }

    fn hint(&mut self, message: &str) {
        self.hint = message.to_string();
        self.redraw();
    }
}

/// Hands the terminal back while the external editor runs.
pub struct CookedWhileEditing<L> {
    inner: L,
}

impl<L> CookedWhileEditing<L> {
    pub fn new(inner: L) -> Self {
        Self { inner }
    }
}

impl<L: EditorLauncher> EditorLauncher for CookedWhileEditing<L> {
    fn edit(&mut self, text: &str, file_type: &str) -> Result<String, LaunchError> {
        disable_raw_mode().map_err(LaunchError::Terminal)?;
        let edited = self.inner.edit(text, file_type);
        enable_raw_mode().map_err(LaunchError::Terminal)?;
        edited
    }
}
