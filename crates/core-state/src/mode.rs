//! Mode manager: one main mode plus at most one local overlay.
//!
//! `ModeState` only stores the combination; the transitions live on `EditorState` because
//! every one of them also resets selection, iteration and undo state.

use crate::EditorState;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MainMode {
    #[default]
    Insert,
    Command,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LocalMode {
    Visual,
    VisualLine,
    OperatorPending,
}

/// Operators that can wait in operator-pending mode for their range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operator {
    Delete,
    Yank,
    Change,
    SwapCase,
    AddSurround,
}

/// The observable mode, flattened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Insert,
    Command,
    Visual,
    VisualLine,
    OperatorPending,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ModeState {
    main: MainMode,
    local: Option<LocalMode>,
    pending: Option<Operator>,
    /// Count typed before the pending operator (`2` in `2d3w`).
    count: Option<usize>,
    /// Local mode that was active when operator-pending was entered.
    restore: Option<LocalMode>,
}

impl ModeState {
    pub fn main(&self) -> MainMode {
        self.main
    }

    pub fn local(&self) -> Option<LocalMode> {
        self.local
    }

    /// Operator waiting for a motion, if any. Operator-pending entered only to read an
    /// argument key has no operator.
    pub fn pending(&self) -> Option<Operator> {
        self.pending
    }

    pub fn pending_count(&self) -> Option<usize> {
        self.count
    }

    pub fn set_pending_count(&mut self, count: Option<usize>) {
        self.count = count;
    }

    pub fn take_pending_count(&mut self) -> Option<usize> {
        self.count.take()
    }

    pub fn mode(&self) -> Mode {
        match self.local {
            Some(LocalMode::Visual) => Mode::Visual,
            Some(LocalMode::VisualLine) => Mode::VisualLine,
            Some(LocalMode::OperatorPending) => Mode::OperatorPending,
            None => match self.main {
                MainMode::Insert => Mode::Insert,
                MainMode::Command => Mode::Command,
            },
        }
    }

    pub fn is_insert(&self) -> bool {
        self.mode() == Mode::Insert
    }

    pub fn is_visual(&self) -> bool {
        matches!(
            self.local,
            Some(LocalMode::Visual | LocalMode::VisualLine)
        )
    }

    pub fn is_operator_pending(&self) -> bool {
        self.local == Some(LocalMode::OperatorPending)
    }

    /// Visual mode that operator-pending will return to.
    pub fn restores_visual(&self) -> bool {
        self.is_operator_pending()
            && matches!(
                self.restore,
                Some(LocalMode::Visual | LocalMode::VisualLine)
            )
    }
}

impl EditorState {
    pub fn enter_insert(&mut self) {
        let from = self.mode.mode();
        self.mode = ModeState {
            main: MainMode::Insert,
            ..ModeState::default()
        };
        self.selection.reset();
        self.iterations.reset();
        debug!(target: "state.mode", from = ?from, to = ?Mode::Insert, "mode_change");
    }

    pub fn enter_command(&mut self) {
        let from = self.mode.mode();
        self.iterations.reset();
        self.undo.skip();
        self.selection.reset();
        if self.mode.main == MainMode::Insert && self.cursor > self.buffer.line_start(self.cursor) {
            self.cursor -= 1;
        }
        self.mode = ModeState {
            main: MainMode::Command,
            ..ModeState::default()
        };
        self.clamp_cursor();
        debug!(target: "state.mode", from = ?from, to = ?Mode::Command, "mode_change");
    }

    pub fn enter_visual(&mut self) {
        self.enter_region_mode(LocalMode::Visual);
    }

    pub fn enter_visual_line(&mut self) {
        self.enter_region_mode(LocalMode::VisualLine);
    }

    /// Re-requesting the active variant toggles visual mode off; the other variant switches.
    fn enter_region_mode(&mut self, requested: LocalMode) {
        let from = self.mode.mode();
        self.iterations.reset();
        self.undo.skip();
        match self.mode.local {
            Some(current) if current == requested => {
                self.exit_visual();
                return;
            }
            Some(LocalMode::Visual | LocalMode::VisualLine) => {
                self.mode.local = Some(requested);
            }
            _ => {
                self.mode = ModeState {
                    main: MainMode::Command,
                    local: Some(requested),
                    ..ModeState::default()
                };
                self.clamp_cursor();
                self.selection.begin(self.cursor);
            }
        }
        self.selection
            .set_linewise(requested == LocalMode::VisualLine);
        debug!(target: "state.mode", from = ?from, to = ?self.mode.mode(), "mode_change");
    }

    /// Drop the visual overlay and the selection; main mode is unchanged.
    pub fn exit_visual(&mut self) {
        if !self.mode.is_visual() {
            return;
        }
        let from = self.mode.mode();
        self.mode.local = None;
        self.selection.reset();
        self.clamp_cursor();
        debug!(target: "state.mode", from = ?from, to = ?self.mode.mode(), "mode_change");
    }

    /// Enter operator-pending, remembering `op` (or nothing, when only an argument key is
    /// needed). Re-entry keeps the original restore target.
    pub fn enter_operator_pending(&mut self, op: Option<Operator>) {
        if self.mode.local != Some(LocalMode::OperatorPending) {
            self.mode.restore = self.mode.local;
        }
        self.mode.local = Some(LocalMode::OperatorPending);
        self.mode.pending = op;
        debug!(target: "state.mode", operator = ?op, "operator_pending_enter");
    }

    pub fn exit_operator_pending(&mut self) {
        if self.mode.local != Some(LocalMode::OperatorPending) {
            return;
        }
        self.mode.local = self.mode.restore.take();
        self.mode.pending = None;
        self.mode.count = None;
        self.clamp_cursor();
        debug!(target: "state.mode", to = ?self.mode.mode(), "operator_pending_exit");
    }

    /// Escape while a pending operator waits: leave operator-pending and drop the implicit
    /// region it opened. A visual selection underneath survives.
    pub fn cancel_operator_pending(&mut self) {
        if !self.mode.is_operator_pending() {
            return;
        }
        let restores_visual = self.mode.restores_visual();
        if let (false, Some(mark)) = (restores_visual, self.selection.mark())
            && self.mode.pending.is_some()
        {
            self.cursor = mark;
            self.selection.reset();
        }
        self.exit_operator_pending();
        debug!(target: "state.mode", "operator_pending_cancelled");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn command(text: &str, cursor: usize) -> EditorState {
        let mut st = EditorState::new(text);
        st.enter_command();
        st.cursor = cursor;
        st
    }

    #[test]
    fn leaving_insert_steps_back() {
        let mut st = EditorState::new("abc");
        assert_eq!(st.cursor, 3);
        st.enter_command();
        assert_eq!(st.cursor, 2);
        assert_eq!(st.mode.mode(), Mode::Command);
        assert!(st.undo.is_skipped());
        // Already in command mode: no further step back.
        st.enter_command();
        assert_eq!(st.cursor, 2);
    }

    #[test]
    fn leaving_insert_at_line_start_stays_on_line() {
        let mut st = EditorState::new("ab\n\nc");
        st.cursor = 3;
        st.enter_command();
        assert_eq!(st.cursor, 3);
    }

    #[test]
    fn leaving_insert_on_empty_buffer_stays_at_zero() {
        let mut st = EditorState::new("");
        st.enter_command();
        assert_eq!(st.cursor, 0);
    }

    #[test]
    fn visual_toggle_same_variant_exits() {
        let mut st = command("hello", 1);
        st.enter_visual();
        assert_eq!(st.mode.mode(), Mode::Visual);
        assert_eq!(st.selection.mark(), Some(1));
        st.enter_visual();
        assert_eq!(st.mode.mode(), Mode::Command);
        assert_eq!(st.selection.mark(), None);
        assert!(!st.selection.is_active());
    }

    #[test]
    fn visual_variants_switch_without_losing_mark() {
        let mut st = command("hello", 1);
        st.enter_visual();
        st.cursor = 3;
        st.enter_visual_line();
        assert_eq!(st.mode.mode(), Mode::VisualLine);
        assert_eq!(st.selection.mark(), Some(1));
        assert!(st.selection.is_linewise());
        st.enter_visual();
        assert!(!st.selection.is_linewise());
    }

    #[test]
    fn operator_pending_restores_previous_local_mode() {
        let mut st = command("hello", 1);
        st.enter_visual();
        st.enter_operator_pending(None);
        assert!(st.mode.restores_visual());
        st.exit_operator_pending();
        assert_eq!(st.mode.mode(), Mode::Visual);
        assert_eq!(st.selection.mark(), Some(1));
    }

    #[test]
    fn cancel_pending_operator_drops_implicit_region() {
        let mut st = command("hello", 2);
        st.selection.begin(2);
        st.enter_operator_pending(Some(Operator::Delete));
        assert_eq!(st.mode.pending(), Some(Operator::Delete));
        st.cancel_operator_pending();
        assert_eq!(st.mode.mode(), Mode::Command);
        assert_eq!(st.mode.pending(), None);
        assert_eq!(st.selection.mark(), None);
        assert_eq!(st.cursor, 2);
    }

    #[test]
    fn insert_resets_selection_and_count() {
        let mut st = command("hello", 1);
        st.enter_visual();
        st.iterations.add_digit('3');
        st.enter_insert();
        assert_eq!(st.mode.mode(), Mode::Insert);
        assert!(!st.selection.is_active());
        assert!(st.iterations.is_empty());
    }
}
