//! Reading keys from inside a widget.
//!
//! Operators and motions that need one more key (find target, replacement character,
//! register name, surround delimiter) or a short line (search pattern) block here. While
//! reading, the session is in operator-pending mode; escape or an exhausted source cancels
//! and restores the mode that was active before.

use super::Collaborators;
use core_events::{ArgKey, KeyCode};
use core_state::EditorState;

/// Read one argument key, honouring escape-cancel.
pub(crate) fn read_arg(state: &mut EditorState, cx: &mut Collaborators<'_>) -> ArgKey {
    let entered = begin_read(state, cx);
    let arg = ArgKey::from_key(cx.keys.next_key());
    match arg {
        ArgKey::Cancelled => cancel_read(state),
        ArgKey::Key(_) if entered => state.exit_operator_pending(),
        ArgKey::Key(_) => {}
    }
    arg
}

/// Read keys up to Enter. Backspace on an empty line cancels, like escape.
pub(crate) fn read_line(
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
    prompt: &str,
) -> Option<String> {
    let entered = begin_read(state, cx);
    let mut line = String::new();
    cx.render.hint(prompt);
    let result = loop {
        let Some(key) = cx.keys.next_key() else {
            break None;
        };
        match key.code {
            KeyCode::Enter => break Some(line),
            KeyCode::Esc => break None,
            KeyCode::Backspace => {
                if line.pop().is_none() {
                    break None;
                }
            }
            _ => {
                if let Some(c) = key.as_char() {
                    line.push(c);
                }
            }
        }
        cx.render.hint(&format!("{prompt}{line}"));
    };
    cx.render.hint("");
    match &result {
        None => cancel_read(state),
        Some(_) if entered => state.exit_operator_pending(),
        Some(_) => {}
    }
    result
}

/// Enter operator-pending unless a pending operator already put us there.
fn begin_read(state: &mut EditorState, cx: &mut Collaborators<'_>) -> bool {
    if state.mode.is_operator_pending() {
        return false;
    }
    state.enter_operator_pending(None);
    cx.mode_changed(state);
    true
}

fn cancel_read(state: &mut EditorState) {
    state.cancel_operator_pending();
    state.undo.skip();
}
