//! Cursor motions.
//!
//! Outside operator-pending a motion only moves the cursor. Under a pending operator the
//! motion closes the region opened by the operator: exclusive motions give up the character
//! they land on, inclusive ones keep it. A failed motion cancels the operator.

use super::argument::read_arg;
use super::{Collaborators, operator};
use crate::widget::Widget;
use core_events::ArgKey;
use core_state::{EditorState, Mode, Operator};
use core_text::motion::{
    CharFind, bracket_jump, find_char, repeat_find, word_end_backward, word_end_forward,
    word_start_backward, word_start_forward,
};
use core_text::token::{is_blank, tokenize};
use core_text::{Buffer, Tokenizer};
use tracing::trace;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Reach {
    Inclusive,
    Exclusive,
}

pub(crate) fn handle(widget: Widget, state: &mut EditorState, cx: &mut Collaborators<'_>) {
    let pending = state.mode.pending();
    let count = state.take_explicit_count();
    let from = state.cursor;
    let reach = resolve(widget, state, cx, count, pending);
    trace!(target: "actions.dispatch", widget = %widget, from, to = state.cursor, ?reach, "motion");
    finish(pending, reach, state, cx);
}

/// Hand a resolved motion to the pending operator, or cancel it when the motion failed.
pub(crate) fn finish(
    pending: Option<Operator>,
    reach: Option<Reach>,
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
) {
    match (pending, reach) {
        (Some(op), Some(reach)) if state.mode.is_operator_pending() => {
            operator::complete_motion(op, reach, state, cx)
        }
        (Some(_), None) => state.cancel_operator_pending(),
        _ => state.undo.skip(),
    }
}

fn resolve(
    widget: Widget,
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
    count: Option<usize>,
    pending: Option<Operator>,
) -> Option<Reach> {
    let n = count.unwrap_or(1);
    match widget {
        Widget::ViBackwardChar => {
            let start = state.buffer.line_start(state.cursor);
            state.set_cursor(state.cursor.saturating_sub(n).max(start));
            Some(Reach::Exclusive)
        }
        Widget::ViForwardChar => {
            let last = line_last(state);
            state.set_cursor(state.cursor.saturating_add(n).min(last));
            Some(Reach::Exclusive)
        }
        Widget::ViForwardWord | Widget::ViForwardBlankWord => {
            let kind = tokenizer(widget);
            // `cw` on a word changes to its end, like `ce`.
            if pending == Some(Operator::Change)
                && state.buffer.char_at(state.cursor).is_some_and(|c| !is_blank(c))
            {
                change_word(state, kind, n);
                return Some(Reach::Inclusive);
            }
            repeat(state, n, |b, p| word_start_forward(b, kind, p));
            Some(Reach::Exclusive)
        }
        Widget::ViForwardWordEnd | Widget::ViForwardBlankWordEnd => {
            let kind = tokenizer(widget);
            repeat(state, n, |b, p| word_end_forward(b, kind, p));
            Some(Reach::Inclusive)
        }
        Widget::ViBackwardWord | Widget::ViBackwardBlankWord => {
            let kind = tokenizer(widget);
            repeat(state, n, |b, p| word_start_backward(b, kind, p));
            Some(Reach::Exclusive)
        }
        Widget::ViBackwardWordEnd | Widget::ViBackwardBlankWordEnd => {
            let kind = tokenizer(widget);
            repeat(state, n, |b, p| word_end_backward(b, kind, p));
            Some(Reach::Inclusive)
        }
        Widget::ViDigitOrBeginningOfLine => {
            state.set_cursor(state.buffer.line_start(state.cursor));
            Some(Reach::Exclusive)
        }
        Widget::ViFirstNonBlank => {
            state.set_cursor(state.buffer.first_non_blank(state.cursor));
            Some(Reach::Exclusive)
        }
        Widget::ViEndOfLine => Some(end_of_line(state, n)),
        Widget::ViGotoColumn => {
            let start = state.buffer.line_start(state.cursor);
            let last = line_last(state);
            state.set_cursor(start.saturating_add(count.unwrap_or(0)).min(last));
            Some(Reach::Exclusive)
        }
        Widget::ViMatchBracket => {
            let target = bracket_jump(&state.buffer, state.cursor)?;
            state.set_cursor(target);
            Some(Reach::Inclusive)
        }
        Widget::ViFindNextChar
        | Widget::ViFindNextCharSkip
        | Widget::ViFindPrevChar
        | Widget::ViFindPrevCharSkip => {
            let ArgKey::Key(target) = read_arg(state, cx) else {
                return None;
            };
            let find = CharFind {
                target,
                forward: matches!(widget, Widget::ViFindNextChar | Widget::ViFindNextCharSkip),
                till: matches!(widget, Widget::ViFindNextCharSkip | Widget::ViFindPrevCharSkip),
            };
            state.motions.last_find = Some(find);
            jump_to_char(state, find, n, find_char)
        }
        Widget::ViRepeatFind | Widget::ViRevRepeatFind => {
            let find = state.motions.last_find?;
            let find = if widget == Widget::ViRevRepeatFind {
                find.reversed()
            } else {
                find
            };
            jump_to_char(state, find, n, repeat_find)
        }
        _ => None,
    }
}

fn tokenizer(widget: Widget) -> Tokenizer {
    match widget {
        Widget::ViForwardBlankWord
        | Widget::ViForwardBlankWordEnd
        | Widget::ViBackwardBlankWord
        | Widget::ViBackwardBlankWordEnd => Tokenizer::BlankWord,
        _ => Tokenizer::Word,
    }
}

/// Last index `l` and `|` may reach on the cursor's line. Insert and operator-pending may
/// sit on the line terminator.
fn line_last(state: &EditorState) -> usize {
    let end = state.buffer.line_end(state.cursor);
    match state.mode.mode() {
        Mode::Insert | Mode::OperatorPending => end,
        _ => end
            .saturating_sub(1)
            .max(state.buffer.line_start(state.cursor)),
    }
}

/// Apply a jump `n` times, stopping as soon as it no longer moves the cursor.
fn repeat(state: &mut EditorState, n: usize, jump: impl Fn(&Buffer, usize) -> isize) {
    for _ in 0..n {
        let delta = jump(&state.buffer, state.cursor);
        if delta == 0 || !state.move_cursor_by(delta) {
            break;
        }
    }
}

/// `cw`: to the end of the word. On the last character of a word a single `cw` changes
/// just that character.
fn change_word(state: &mut EditorState, kind: Tokenizer, n: usize) {
    let toks = tokenize(&state.buffer, kind, state.cursor);
    let on_word_end = toks
        .current()
        .and_then(|t| t.word_end())
        .is_some_and(|end| end == state.cursor);
    let steps = if on_word_end { n - 1 } else { n };
    repeat(state, steps, |b, p| word_end_forward(b, kind, p));
}

/// `$` with a count moves down `n - 1` lines first.
fn end_of_line(state: &mut EditorState, n: usize) -> Reach {
    let len = state.buffer.len();
    let mut end = state.buffer.line_end(state.cursor);
    for _ in 1..n {
        if end >= len {
            break;
        }
        end = state.buffer.line_end(end + 1);
    }
    match state.mode.mode() {
        Mode::Insert | Mode::OperatorPending => {
            state.set_cursor(end);
            Reach::Exclusive
        }
        _ => {
            let start = state.buffer.line_start(end);
            state.set_cursor(end.saturating_sub(1).max(start));
            Reach::Inclusive
        }
    }
}

fn jump_to_char(
    state: &mut EditorState,
    find: CharFind,
    n: usize,
    search: fn(&Buffer, usize, CharFind, usize) -> Option<usize>,
) -> Option<Reach> {
    let target = search(&state.buffer, state.cursor, find, n)?;
    // A till search already next to its target has nowhere to go.
    if target == state.cursor {
        return None;
    }
    state.set_cursor(target);
    Some(if find.forward {
        Reach::Inclusive
    } else {
        Reach::Exclusive
    })
}
