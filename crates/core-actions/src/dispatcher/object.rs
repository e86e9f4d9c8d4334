//! Text objects. Under a pending operator the object is the operator's region; in visual mode
//! it replaces the selection; in command mode the cursor moves to its last character.

use super::{Collaborators, operator, surround};
use crate::widget::Widget;
use core_events::KeyEvent;
use core_state::EditorState;
use core_text::object::{quote_object, word_object};
use core_text::{Buffer, ObjectScope, Tokenizer};
use operator::Region;
use std::ops::Range;

pub(crate) fn handle(
    widget: Widget,
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
    trigger: &[KeyEvent],
) {
    let pending = state.mode.pending();
    let count = state.take_count();
    let range = match widget {
        Widget::SelectAWord => {
            words(&state.buffer, state.cursor, Tokenizer::Word, ObjectScope::Around, count)
        }
        Widget::SelectInWord => {
            words(&state.buffer, state.cursor, Tokenizer::Word, ObjectScope::Inner, count)
        }
        Widget::SelectABlankWord => {
            words(&state.buffer, state.cursor, Tokenizer::BlankWord, ObjectScope::Around, count)
        }
        Widget::SelectInBlankWord => {
            words(&state.buffer, state.cursor, Tokenizer::BlankWord, ObjectScope::Inner, count)
        }
        Widget::SelectAShellWord => quote_object(&state.buffer, state.cursor, ObjectScope::Around),
        Widget::SelectInShellWord => quote_object(&state.buffer, state.cursor, ObjectScope::Inner),
        Widget::ViSelectSurround => surround::select(state, cx, trigger),
        _ => None,
    };

    let Some(range) = range else {
        if pending.is_some() {
            state.cancel_operator_pending();
        } else {
            state.undo.skip();
        }
        return;
    };
    if let Some(op) = pending
        && state.mode.is_operator_pending()
    {
        operator::apply(op, Region::chars(range), state, cx);
        return;
    }
    state.undo.skip();
    if state.mode.is_visual() {
        state.selection.set_mark(range.start);
    }
    state.set_cursor(range.end.saturating_sub(1).max(range.start));
}

/// `count` consecutive word objects. An `a` object without trailing blanks takes the blanks
/// before the word instead.
fn words(
    buf: &Buffer,
    pos: usize,
    kind: Tokenizer,
    scope: ObjectScope,
    count: usize,
) -> Option<Range<usize>> {
    let mut range = word_object(buf, kind, pos, scope)?;
    for _ in 1..count {
        if range.end >= buf.len() {
            break;
        }
        // An inner count counts each run of blanks as one object.
        let next_end = if scope == ObjectScope::Inner && is_space(buf.char_at(range.end)) {
            let mut end = range.end;
            while is_space(buf.char_at(end)) {
                end += 1;
            }
            end
        } else {
            match word_object(buf, kind, range.end, scope) {
                Some(next) => next.end,
                None => break,
            }
        };
        if next_end <= range.end {
            break;
        }
        range.end = next_end;
    }
    let trailing_blank = range.end > range.start && is_space(buf.char_at(range.end - 1));
    if scope == ObjectScope::Around && !trailing_blank {
        while range.start > 0 && is_space(buf.char_at(range.start - 1)) {
            range.start -= 1;
        }
    }
    Some(range)
}

fn is_space(c: Option<char>) -> bool {
    matches!(c, Some(' ' | '\t'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn around_word_prefers_trailing_blanks() {
        let buf = Buffer::from("foo bar baz");
        assert_eq!(words(&buf, 5, Tokenizer::Word, ObjectScope::Around, 1), Some(4..8));
        assert_eq!(words(&buf, 9, Tokenizer::Word, ObjectScope::Around, 1), Some(7..11));
    }

    #[test]
    fn counted_words_extend() {
        let buf = Buffer::from("foo bar baz");
        assert_eq!(words(&buf, 0, Tokenizer::Word, ObjectScope::Around, 2), Some(0..8));
        assert_eq!(words(&buf, 0, Tokenizer::Word, ObjectScope::Inner, 9), Some(0..11));
    }
}
