//! Dispatcher applying a [`Widget`] to mutable editor state.
//!
//! Sub-modules by widget family:
//! * `mode`     - mode transitions and the count prefix
//! * `motion`   - cursor movement, including operator-pending completion
//! * `operator` - delete / yank / change / swap-case / add-surround
//! * `object`   - word, quote and bracket text objects
//! * `surround` - change-surround and the bracket object range
//! * `edit`     - single-key edits (x, p, r, R, ~ ...)
//! * `search`   - `/` `?` `n` `N`
//! * `undo`     - undo / redo through the recorder
//! * `external` - edit the buffer in an external program
//!
//! Every dispatch follows the same protocol: the undo-skip flag is cleared, the widget
//! runs, the undo recorder learns whether an insert run is open, and one checkpoint is
//! recorded iff the buffer changed and the widget did not raise the skip flag. The render
//! hook is told about mode, buffer and cursor changes afterwards.

use crate::external_editor::EditorLauncher;
use crate::hooks::{Options, RenderHook};
use crate::widget::{Widget, WidgetGroup};
use core_events::{KeyEvent, KeySource};
use core_state::{EditorState, UndoRecorder};
use tracing::trace;

mod argument;
mod edit;
mod external;
mod mode;
mod motion;
mod object;
mod operator;
mod search;
mod surround;
mod undo;

pub use search::SEARCH_FAILED_HINT;

/// Everything a widget may call out to.
pub struct Collaborators<'a> {
    /// Source for argument keys (find target, register name, delimiter...).
    pub keys: &'a mut dyn KeySource,
    pub undo: &'a mut dyn UndoRecorder,
    pub render: &'a mut dyn RenderHook,
    pub launcher: &'a mut dyn EditorLauncher,
    pub options: &'a Options,
}

impl Collaborators<'_> {
    pub(crate) fn mode_changed(&mut self, state: &EditorState) {
        let mode = state.mode.mode();
        self.render.mode_changed(mode, self.options.shape_for(mode));
    }
}

/// What a single dispatch did.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DispatchOutcome {
    pub buffer_changed: bool,
    pub cursor_moved: bool,
    pub mode_changed: bool,
    /// An undo checkpoint was recorded.
    pub checkpoint: bool,
}

/// Run `widget` against `state`. `trigger` holds the keys that resolved to the widget.
pub fn dispatch(
    widget: Widget,
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
    trigger: &[KeyEvent],
) -> DispatchOutcome {
    state.undo.reset();
    let before = state.buffer.clone();
    let before_cursor = state.cursor;
    let before_mode = state.mode.mode();
    trace!(target: "actions.dispatch", widget = %widget, mode = ?before_mode, cursor = before_cursor, "widget");

    match widget.group() {
        WidgetGroup::Mode => mode::handle(widget, state),
        WidgetGroup::Count => mode::handle_count(widget, state, cx, trigger),
        WidgetGroup::Motion => motion::handle(widget, state, cx),
        WidgetGroup::Operator => operator::handle(widget, state, cx),
        WidgetGroup::TextObject => object::handle(widget, state, cx, trigger),
        WidgetGroup::Edit => edit::handle(widget, state, cx, trigger),
        WidgetGroup::Search => search::handle(widget, state, cx),
        WidgetGroup::History => undo::handle(widget, state, cx),
        WidgetGroup::External => external::handle(state, cx),
    }

    if state.mode.is_insert() {
        cx.undo.begin_group();
    } else {
        cx.undo.end_group();
    }
    let buffer_changed = state.buffer != before;
    let checkpoint = buffer_changed && !state.undo.is_skipped();
    if checkpoint {
        cx.undo.record_checkpoint(&before, before_cursor);
    }

    let outcome = DispatchOutcome {
        buffer_changed,
        cursor_moved: state.cursor != before_cursor,
        mode_changed: state.mode.mode() != before_mode,
        checkpoint,
    };
    if outcome.mode_changed {
        cx.mode_changed(state);
    }
    if buffer_changed {
        cx.render.buffer_edited(&state.buffer, state.cursor);
    } else if outcome.cursor_moved {
        cx.render.cursor_moved(state.cursor);
    }
    trace!(target: "actions.dispatch", widget = %widget, ?outcome, "dispatched");
    outcome
}
