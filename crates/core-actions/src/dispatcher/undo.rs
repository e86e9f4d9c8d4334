use super::Collaborators;
use crate::widget::Widget;
use core_state::EditorState;
use tracing::trace;

/// Restore the previous (or next) checkpoint. The restore itself is never recorded.
pub(crate) fn handle(widget: Widget, state: &mut EditorState, cx: &mut Collaborators<'_>) {
    state.undo.skip();
    state.iterations.reset();
    let restored = match widget {
        Widget::Undo => cx.undo.undo(&state.buffer, state.cursor),
        Widget::Redo => cx.undo.redo(&state.buffer, state.cursor),
        _ => None,
    };
    match restored {
        Some(checkpoint) => {
            trace!(target: "actions.dispatch", op = %widget, cursor = checkpoint.cursor, "history_restore");
            state.replace_buffer(checkpoint.buffer, checkpoint.cursor);
        }
        None => trace!(target: "actions.dispatch", op = %widget, "history_empty"),
    }
}
