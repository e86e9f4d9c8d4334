use super::argument::read_arg;
use super::{Collaborators, operator, surround};
use crate::widget::Widget;
use core_events::{ArgKey, KeyCode, KeyEvent};
use core_state::{EditorState, RegisterKind};

pub(crate) fn handle(
    widget: Widget,
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
    trigger: &[KeyEvent],
) {
    match widget {
        Widget::ViDeleteChar => delete_under(state),
        Widget::ViBackwardDeleteChar => delete_before(state),
        Widget::ViKillEol => kill_eol(state, false),
        Widget::ViChangeEol => kill_eol(state, true),
        Widget::ViPutAfter => put(state, true),
        Widget::ViPutBefore => put(state, false),
        Widget::ViSetBuffer => {
            state.undo.skip();
            if let ArgKey::Key(key) = read_arg(state, cx) {
                state.registers.arm(key);
            }
        }
        Widget::ViYankWholeLine => operator::yank_lines(state, cx),
        Widget::ViReplaceChars => replace_chars(state, cx),
        Widget::ViReplace => replace_mode(state, cx),
        Widget::ViSwapCase => swap_case(state),
        Widget::ViSubstitute => substitute(state),
        Widget::ViChangeSurround => surround::change(state, cx),
        Widget::SelfInsert => self_insert(state, trigger),
        Widget::BackwardDeleteChar => backward_delete(state),
        _ => {}
    }
}

/// `x`: up to `count` characters from the cursor, never past the end of the line. In insert
/// mode (`<Del>`) no register is written.
fn delete_under(state: &mut EditorState) {
    let n = state.take_count();
    let cursor = state.cursor;
    let end = cursor.saturating_add(n).min(state.buffer.line_end(cursor));
    if end <= cursor {
        state.undo.skip();
        return;
    }
    let removed = state.buffer.remove(cursor..end);
    if !state.mode.is_insert() {
        state.registers.save(removed, RegisterKind::Charwise);
    }
    operator::clamp_to_line(state);
}

/// `X`: up to `count` characters before the cursor on the same line.
fn delete_before(state: &mut EditorState) {
    let n = state.take_count();
    let cursor = state.cursor;
    let begin = cursor
        .saturating_sub(n)
        .max(state.buffer.line_start(cursor));
    if begin == cursor {
        state.undo.skip();
        return;
    }
    let removed = state.buffer.remove(begin..cursor);
    state.registers.save(removed, RegisterKind::Charwise);
    state.cursor = begin;
    state.clamp_cursor();
}

/// `D` / `C`: from the cursor to the end of the line.
fn kill_eol(state: &mut EditorState, change: bool) {
    state.iterations.reset();
    let cursor = state.cursor;
    let end = state.buffer.line_end(cursor);
    let removed = state.buffer.remove(cursor..end);
    state.registers.save(removed, RegisterKind::Charwise);
    if change {
        state.enter_insert();
        state.set_cursor(cursor);
    } else {
        operator::clamp_to_line(state);
    }
}

/// `s`: delete `count` characters and enter insert mode.
fn substitute(state: &mut EditorState) {
    let n = state.take_count();
    let cursor = state.cursor;
    let end = cursor.saturating_add(n).min(state.buffer.line_end(cursor));
    let removed = state.buffer.remove(cursor..end);
    state.registers.save(removed, RegisterKind::Charwise);
    state.enter_insert();
    state.set_cursor(cursor);
}

/// `p` / `P`. Linewise content goes on its own line below or above the cursor's line;
/// charwise content goes after or at the cursor. The cursor lands on the pasted text.
fn put(state: &mut EditorState, after: bool) {
    let count = state.take_count();
    let Some(content) = state.registers.paste().filter(|c| !c.text.is_empty()) else {
        state.undo.skip();
        return;
    };
    if content.is_linewise() {
        let body = content.text.strip_suffix('\n').unwrap_or(&content.text);
        let block = vec![body; count].join("\n");
        let (at, text, first) = if after {
            let at = state.buffer.line_end(state.cursor);
            (at, format!("\n{block}"), at + 1)
        } else {
            let at = state.buffer.line_start(state.cursor);
            (at, format!("{block}\n"), at)
        };
        state.buffer.insert(at, &text);
        state.cursor = state.buffer.first_non_blank(first);
    } else {
        let text = content.text.repeat(count);
        let on_text = state
            .buffer
            .char_at(state.cursor)
            .is_some_and(|c| c != '\n');
        let at = if after && on_text {
            state.cursor + 1
        } else {
            state.cursor
        };
        let inserted = state.buffer.insert(at, &text);
        state.cursor = at + inserted.saturating_sub(1);
    }
    state.clamp_cursor();
}

/// `r`: overwrite `count` characters with the argument key. Fails when the line is too
/// short. Replacing with Enter swaps the whole run for one line break.
fn replace_chars(state: &mut EditorState, cx: &mut Collaborators<'_>) {
    let n = state.take_count();
    let ArgKey::Key(with) = read_arg(state, cx) else {
        return;
    };
    let cursor = state.cursor;
    let end = cursor.saturating_add(n);
    if end > state.buffer.line_end(cursor) {
        state.undo.skip();
        return;
    }
    if with == '\n' {
        state.buffer.remove(cursor..end);
        state.buffer.insert(cursor, "\n");
        state.cursor = cursor + 1;
    } else {
        for idx in cursor..end {
            state.buffer.replace_char(idx, with);
        }
        state.cursor = end - 1;
    }
    state.clamp_cursor();
}

/// `R`: overtype until escape. Backspace restores what was overwritten; typing past the end
/// of the line appends.
fn replace_mode(state: &mut EditorState, cx: &mut Collaborators<'_>) {
    state.iterations.reset();
    let start = state.cursor;
    state.enter_insert();
    cx.mode_changed(state);
    // Original character per typed position; `None` where the key was appended.
    let mut overwritten: Vec<Option<char>> = Vec::new();
    while let Some(key) = cx.keys.next_key() {
        match key.code {
            KeyCode::Esc => break,
            KeyCode::Backspace => {
                if state.cursor <= start {
                    continue;
                }
                let Some(original) = overwritten.pop() else {
                    continue;
                };
                state.cursor -= 1;
                match original {
                    Some(c) => {
                        state.buffer.replace_char(state.cursor, c);
                    }
                    None => {
                        state.buffer.remove(state.cursor..state.cursor + 1);
                    }
                }
            }
            _ => {
                let typed = if key.code == KeyCode::Enter {
                    Some('\n')
                } else {
                    key.as_char()
                };
                let Some(c) = typed else {
                    continue;
                };
                let pos = state.cursor;
                let at_line_end = state.buffer.char_at(pos).is_none_or(|ch| ch == '\n');
                if at_line_end || c == '\n' {
                    state.buffer.insert(pos, &c.to_string());
                    overwritten.push(None);
                } else {
                    overwritten.push(state.buffer.replace_char(pos, c));
                }
                state.cursor = pos + 1;
            }
        }
        cx.render.buffer_edited(&state.buffer, state.cursor);
    }
    state.enter_command();
    // The whole overtype run is one undoable change.
    state.undo.reset();
}

/// `~`: toggle case of `count` characters and step past them.
fn swap_case(state: &mut EditorState) {
    let n = state.take_count();
    let cursor = state.cursor;
    let line_end = state.buffer.line_end(cursor);
    let end = cursor.saturating_add(n).min(line_end);
    if end <= cursor {
        state.undo.skip();
        return;
    }
    operator::swap_case(&mut state.buffer, cursor..end);
    state.cursor = end.min(line_end - 1);
    state.clamp_cursor();
}

fn self_insert(state: &mut EditorState, trigger: &[KeyEvent]) {
    let Some(c) = trigger.last().and_then(KeyEvent::as_char) else {
        state.undo.skip();
        return;
    };
    let inserted = state.buffer.insert(state.cursor, &c.to_string());
    state.cursor += inserted;
}

/// Insert-mode backspace. Joins lines; writes no register.
fn backward_delete(state: &mut EditorState) {
    let cursor = state.cursor;
    if cursor == 0 {
        state.undo.skip();
        return;
    }
    state.buffer.remove(cursor - 1..cursor);
    state.cursor = cursor - 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::{Mode, RegisterContent};

    fn command(text: &str, cursor: usize) -> EditorState {
        let mut st = EditorState::new(text);
        st.enter_command();
        st.cursor = cursor;
        st
    }

    #[test]
    fn delete_under_stops_at_line_end() {
        let mut st = command("ab\ncd", 1);
        st.iterations.add_digit('5');
        delete_under(&mut st);
        assert_eq!(st.buffer.to_string(), "a\ncd");
        assert_eq!(st.cursor, 0);
        assert_eq!(st.registers.unnamed().map(|c| c.text.as_str()), Some("b"));
    }

    #[test]
    fn put_linewise_below_and_above() {
        let mut st = command("one\ntwo", 1);
        st.registers.save("  new\n", RegisterKind::Linewise);
        put(&mut st, true);
        assert_eq!(st.buffer.to_string(), "one\n  new\ntwo");
        assert_eq!(st.cursor, 6);

        let mut st = command("one\ntwo", 5);
        st.registers.save("new\n", RegisterKind::Linewise);
        put(&mut st, false);
        assert_eq!(st.buffer.to_string(), "one\nnew\ntwo");
        assert_eq!(st.cursor, 4);
    }

    #[test]
    fn put_charwise_repeats_count() {
        let mut st = command("ab", 0);
        st.registers.save("xy", RegisterKind::Charwise);
        st.iterations.add_digit('2');
        put(&mut st, true);
        assert_eq!(st.buffer.to_string(), "axyxyb");
        assert_eq!(st.cursor, 4);
    }

    #[test]
    fn put_from_empty_register_is_noop() {
        let mut st = command("ab", 0);
        put(&mut st, true);
        assert_eq!(st.buffer.to_string(), "ab");
        assert!(st.undo.is_skipped());
    }

    #[test]
    fn kill_eol_keeps_newline() {
        let mut st = command("abc\ndef", 1);
        kill_eol(&mut st, false);
        assert_eq!(st.buffer.to_string(), "a\ndef");
        assert_eq!(st.cursor, 0);
        assert_eq!(
            st.registers.unnamed(),
            Some(&RegisterContent::new("bc", RegisterKind::Charwise))
        );
    }

    #[test]
    fn change_eol_enters_insert_at_cut() {
        let mut st = command("abc", 1);
        kill_eol(&mut st, true);
        assert_eq!(st.mode.mode(), Mode::Insert);
        assert_eq!((st.buffer.to_string().as_str(), st.cursor), ("a", 1));
    }

    #[test]
    fn tilde_advances_and_stays_on_line() {
        let mut st = command("abC\nx", 0);
        st.iterations.add_digit('9');
        swap_case(&mut st);
        assert_eq!(st.buffer.to_string(), "ABc\nx");
        assert_eq!(st.cursor, 2);
    }

    #[test]
    fn insert_backspace_joins_lines() {
        let mut st = EditorState::new("a\nb");
        st.cursor = 2;
        backward_delete(&mut st);
        assert_eq!(st.buffer.to_string(), "ab");
        assert_eq!(st.cursor, 1);
        assert!(st.registers.unnamed().is_none());
    }
}
