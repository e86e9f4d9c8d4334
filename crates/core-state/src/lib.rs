//! Editing session state for the vi engine.
//!
//! `EditorState` is passed by exclusive reference into every widget. Related fields are
//! grouped so each component borrows only what it needs:
//! - `mode`: main mode + local overlay + pending operator (`mode.rs`)
//! - `selection`: mark / active region / linewise flag (`selection.rs`)
//! - `iterations`: repeat count accumulator (`iterations.rs`)
//! - `registers`: register store (`registers.rs`)
//! - `undo`: per-invocation undo-skip flag (`undo.rs`)
//! - `motions`: last find-char / search, for `;` `,` `n` `N`
//!
//! Cursor invariant: `0 <= cursor <= buffer.len()`. In command and visual modes motions
//! stop at `len - 1` so the cursor rests on a character.

use core_text::Buffer;
use core_text::motion::CharFind;

pub mod iterations;
pub mod mode;
pub mod registers;
pub mod selection;
pub mod undo;

pub use iterations::{DigitOutcome, Iterations, MAX_ITERATIONS};
pub use mode::{LocalMode, MainMode, Mode, ModeState, Operator};
pub use registers::{RegisterContent, RegisterKind, Registers};
pub use selection::{Selection, SelectionSpan};
pub use undo::{Checkpoint, UNDO_HISTORY_MAX, UndoEngine, UndoFlags, UndoRecorder};

/// Last `/` or `?` pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchMemory {
    pub pattern: String,
    pub forward: bool,
}

/// Motions that `;` `,` `n` `N` repeat.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MotionMemory {
    pub last_find: Option<CharFind>,
    pub last_search: Option<SearchMemory>,
}

#[derive(Debug, Clone, Default)]
pub struct EditorState {
    pub buffer: Buffer,
    pub cursor: usize,
    pub mode: ModeState,
    pub selection: Selection,
    pub iterations: Iterations,
    pub registers: Registers,
    pub undo: UndoFlags,
    pub motions: MotionMemory,
}

impl EditorState {
    /// New session in insert mode with the cursor after the text.
    pub fn new(text: &str) -> Self {
        let buffer = Buffer::from(text);
        let cursor = buffer.len();
        Self {
            buffer,
            cursor,
            ..Self::default()
        }
    }

    pub fn with_registers(mut self, registers: Registers) -> Self {
        self.registers = registers;
        self
    }

    /// Highest index a motion may reach in the current mode.
    pub fn motion_limit(&self) -> usize {
        let len = self.buffer.len();
        match self.mode.mode() {
            Mode::Insert | Mode::OperatorPending => len,
            Mode::Command | Mode::Visual | Mode::VisualLine => len.saturating_sub(1),
        }
    }

    pub fn clamp_cursor(&mut self) {
        self.cursor = self.cursor.min(self.motion_limit());
    }

    /// Move to `pos`, clamped to the motion limit.
    pub fn set_cursor(&mut self, pos: usize) {
        self.cursor = pos.min(self.motion_limit());
    }

    /// Apply a signed delta, clamped at both ends. Returns whether the cursor moved.
    pub fn move_cursor_by(&mut self, delta: isize) -> bool {
        let before = self.cursor;
        let target = self.cursor.saturating_add_signed(delta);
        self.set_cursor(target);
        self.cursor != before
    }

    /// Consume the repeat count. A count typed before a pending operator multiplies the one
    /// typed after it (`2d3w` moves six words). `None` when neither was typed.
    pub fn take_explicit_count(&mut self) -> Option<usize> {
        let inner = self.iterations.take();
        let outer = self.mode.take_pending_count();
        match (outer, inner) {
            (None, None) => None,
            (outer, inner) => Some(
                outer
                    .unwrap_or(1)
                    .saturating_mul(inner.unwrap_or(1))
                    .min(MAX_ITERATIONS),
            ),
        }
    }

    /// [`take_explicit_count`](Self::take_explicit_count) with the default of 1.
    pub fn take_count(&mut self) -> usize {
        self.take_explicit_count().unwrap_or(1)
    }

    /// Current region, if a mark is set.
    pub fn selection_span(&self) -> Option<SelectionSpan> {
        self.selection.span(&self.buffer, self.cursor)
    }

    /// Replace the whole buffer (external editor result, undo restore).
    pub fn replace_buffer(&mut self, buffer: Buffer, cursor: usize) {
        self.buffer = buffer;
        self.cursor = cursor;
        self.clamp_cursor();
    }
}
