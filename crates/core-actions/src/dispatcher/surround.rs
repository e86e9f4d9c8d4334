//! Surround pairs: the `i(`/`a"`... object range and `cs`.
//!
//! Bracket keys map to their pair from either side, `b` and `B` alias `(` and `{`, and any
//! other character delimits both sides.

use super::Collaborators;
use super::argument::read_arg;
use core_events::{ArgKey, KeyEvent};
use core_state::EditorState;
use core_text::ObjectScope;
use core_text::object::{delimiters, enclosing_pair, pair_object};
use std::ops::Range;
use tracing::debug;

fn alias(key: char) -> char {
    match key {
        'b' => '(',
        'B' => '{',
        other => other,
    }
}

/// Range for `vi-select-surround`. The first trigger key picks the scope (`a` is around);
/// the delimiter is the last trigger key, or read as an argument when the binding had only
/// one key.
pub(crate) fn select(
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
    trigger: &[KeyEvent],
) -> Option<Range<usize>> {
    let scope = match trigger.first().and_then(KeyEvent::as_char) {
        Some('a') => ObjectScope::Around,
        _ => ObjectScope::Inner,
    };
    let key = match trigger {
        [_, .., last] => last.as_char()?,
        _ => match read_arg(state, cx) {
            ArgKey::Key(c) => c,
            ArgKey::Cancelled => return None,
        },
    };
    pair_object(&state.buffer, state.cursor, alias(key), scope)
}

/// `cs`: read the delimiter to replace and its replacement; both ends change in place.
pub(crate) fn change(state: &mut EditorState, cx: &mut Collaborators<'_>) {
    state.iterations.reset();
    let ArgKey::Key(old) = read_arg(state, cx) else {
        return;
    };
    let (open, close) = delimiters(alias(old));
    let Some((o, c)) = enclosing_pair(&state.buffer, state.cursor, open, close) else {
        debug!(target: "actions.operator", delimiter = %old, "surround_not_found");
        state.undo.skip();
        return;
    };
    let ArgKey::Key(new) = read_arg(state, cx) else {
        return;
    };
    let (new_open, new_close) = delimiters(alias(new));
    state.buffer.replace_char(c, new_close);
    state.buffer.replace_char(o, new_open);
    state.cursor = o;
    state.clamp_cursor();
}
