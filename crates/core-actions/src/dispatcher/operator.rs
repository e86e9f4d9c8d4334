//! Operators: delete, yank, change, swap-case and add-surround.
//!
//! An operator acts on a visual selection immediately. Otherwise it sets the mark, enters
//! operator-pending and waits for a motion or text object to close the region. Typing the
//! same operator again (`dd`, `yy`, `cc`, `yss`) applies it to whole lines.

use super::Collaborators;
use super::argument::read_arg;
use super::motion::Reach;
use crate::widget::Widget;
use core_events::ArgKey;
use core_state::selection::bounds;
use core_state::{EditorState, Operator, RegisterKind};
use core_text::Buffer;
use core_text::object::delimiters;
use std::ops::Range;
use tracing::debug;

/// Half-open char range an operator acts on.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Region {
    pub range: Range<usize>,
    pub linewise: bool,
}

impl Region {
    pub fn chars(range: Range<usize>) -> Self {
        Self {
            range,
            linewise: false,
        }
    }

    pub fn lines(range: Range<usize>) -> Self {
        Self {
            range,
            linewise: true,
        }
    }
}

fn operator_for(widget: Widget) -> Option<Operator> {
    Some(match widget {
        Widget::ViDelete => Operator::Delete,
        Widget::ViYank => Operator::Yank,
        Widget::ViChange => Operator::Change,
        Widget::ViOperSwapCase => Operator::SwapCase,
        Widget::ViAddSurround => Operator::AddSurround,
        _ => return None,
    })
}

pub(crate) fn handle(widget: Widget, state: &mut EditorState, cx: &mut Collaborators<'_>) {
    let Some(op) = operator_for(widget) else {
        return;
    };
    if state.mode.is_visual() {
        state.iterations.reset();
        match state.selection_span() {
            Some(span) => {
                let linewise = state.selection.is_linewise();
                apply(
                    op,
                    Region {
                        range: span.range(),
                        linewise,
                    },
                    state,
                    cx,
                );
            }
            None => state.undo.skip(),
        }
        return;
    }
    if state.mode.is_operator_pending() {
        if state.mode.pending() == Some(op) {
            let count = state.take_count();
            let region = line_region(&state.buffer, state.cursor, op, count);
            apply(op, region, state, cx);
        } else {
            state.cancel_operator_pending();
        }
        return;
    }
    let count = state.iterations.take();
    state.selection.begin(state.cursor);
    state.enter_operator_pending(Some(op));
    state.mode.set_pending_count(count);
    state.undo.skip();
    debug!(target: "actions.operator", operator = ?op, ?count, "operator_pending");
}

/// `Y`: yank `count` whole lines.
pub(crate) fn yank_lines(state: &mut EditorState, cx: &mut Collaborators<'_>) {
    let count = state.take_count();
    let region = line_region(&state.buffer, state.cursor, Operator::Yank, count);
    apply(Operator::Yank, region, state, cx);
}

/// Close the region opened by `op` at the cursor a motion just reached.
pub(crate) fn complete_motion(
    op: Operator,
    reach: Reach,
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
) {
    let Some(mark) = state.selection.mark() else {
        state.cancel_operator_pending();
        return;
    };
    let cursor = state.cursor;
    let (mark, cursor) = match reach {
        Reach::Inclusive => (mark, cursor),
        Reach::Exclusive if cursor == mark => {
            state.cancel_operator_pending();
            return;
        }
        Reach::Exclusive if cursor > mark => (mark, cursor - 1),
        Reach::Exclusive => (mark - 1, cursor),
    };
    let (begin, end) = bounds(mark, cursor, state.buffer.len());
    apply(op, Region::chars(begin..end), state, cx);
}

/// `count` lines starting at the cursor's line. Change and add-surround leave the final
/// newline alone; add-surround also skips leading indentation.
pub(crate) fn line_region(buf: &Buffer, pos: usize, op: Operator, count: usize) -> Region {
    let begin = buf.line_start(pos);
    let mut end = buf.line_end(pos);
    for _ in 1..count {
        if end >= buf.len() {
            break;
        }
        end = buf.line_end(end + 1);
    }
    match op {
        Operator::Change => Region::lines(begin..end),
        Operator::AddSurround => Region::lines(buf.first_non_blank(begin).min(end)..end),
        _ if buf.char_at(end) == Some('\n') => Region::lines(begin..end + 1),
        _ => Region::lines(begin..end),
    }
}

pub(crate) fn apply(
    op: Operator,
    region: Region,
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
) {
    let Region { mut range, linewise } = region;
    let kind = if linewise {
        RegisterKind::Linewise
    } else {
        RegisterKind::Charwise
    };
    debug!(
        target: "actions.operator",
        operator = ?op,
        begin = range.start,
        end = range.end,
        linewise,
        "operator_apply"
    );
    match op {
        Operator::Yank => {
            let text = state.buffer.slice(range.clone());
            state.registers.save(text, kind);
            // Whole-line yanks keep the column when the cursor is on the first yanked line.
            let on_first_line = state.buffer.line_start(state.cursor) == range.start;
            if !linewise || !on_first_line {
                state.cursor = range.start;
            }
        }
        Operator::Delete => {
            let text = state.buffer.slice(range.clone());
            state.registers.save(text, kind);
            if linewise {
                range = take_separator(&state.buffer, range);
            }
            state.buffer.remove(range.clone());
            state.cursor = range.start.min(state.buffer.len());
            if linewise {
                state.cursor = state.buffer.first_non_blank(state.cursor);
            }
        }
        Operator::Change => {
            if linewise
                && range.end > range.start
                && state.buffer.char_at(range.end - 1) == Some('\n')
            {
                range.end -= 1;
            }
            let text = state.buffer.slice(range.clone());
            state.registers.save(text, kind);
            state.buffer.remove(range.clone());
            state.enter_insert();
            state.set_cursor(range.start);
            return;
        }
        Operator::SwapCase => {
            swap_case(&mut state.buffer, range.clone());
            state.cursor = range.start;
        }
        Operator::AddSurround => {
            let ArgKey::Key(key) = read_arg(state, cx) else {
                return;
            };
            let (open, close) = delimiters(key);
            state.buffer.insert(range.end, &close.to_string());
            state.buffer.insert(range.start, &open.to_string());
            state.cursor = range.start;
        }
    }
    finish(state);
}

/// Deleting the last line, which has no newline of its own, also takes the newline before it.
fn take_separator(buf: &Buffer, range: Range<usize>) -> Range<usize> {
    let ends_with_newline = range.end > range.start && buf.char_at(range.end - 1) == Some('\n');
    if !ends_with_newline && range.start > 0 && buf.char_at(range.start - 1) == Some('\n') {
        range.start - 1..range.end
    } else {
        range
    }
}

fn finish(state: &mut EditorState) {
    state.selection.reset();
    state.iterations.reset();
    state.exit_operator_pending();
    state.exit_visual();
    clamp_to_line(state);
}

/// Outside insert mode the cursor may not rest on a line terminator unless the line is empty.
pub(crate) fn clamp_to_line(state: &mut EditorState) {
    state.clamp_cursor();
    if state.mode.is_insert() {
        return;
    }
    let start = state.buffer.line_start(state.cursor);
    let end = state.buffer.line_end(state.cursor);
    if state.cursor >= end && end > start {
        state.cursor = end - 1;
    }
}

/// Toggle the case of every character in `range` that has a single-character counterpart.
pub(crate) fn swap_case(buf: &mut Buffer, range: Range<usize>) {
    for idx in range {
        let Some(c) = buf.char_at(idx) else {
            break;
        };
        let toggled = toggle_case(c);
        if toggled != c {
            buf.replace_char(idx, toggled);
        }
    }
}

fn toggle_case(c: char) -> char {
    let mapped: Vec<char> = if c.is_lowercase() {
        c.to_uppercase().collect()
    } else if c.is_uppercase() {
        c.to_lowercase().collect()
    } else {
        return c;
    };
    match mapped.as_slice() {
        [single] => *single,
        _ => c,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn line_region_per_operator() {
        let buf = Buffer::from("  one\ntwo\nthree");
        assert_eq!(line_region(&buf, 2, Operator::Delete, 1), Region::lines(0..6));
        assert_eq!(line_region(&buf, 2, Operator::Change, 1), Region::lines(0..5));
        assert_eq!(line_region(&buf, 2, Operator::AddSurround, 1), Region::lines(2..5));
        assert_eq!(line_region(&buf, 2, Operator::Yank, 2), Region::lines(0..10));
        assert_eq!(line_region(&buf, 12, Operator::Delete, 5), Region::lines(10..15));
    }

    #[test]
    fn last_line_takes_preceding_newline() {
        let buf = Buffer::from("one\ntwo");
        assert_eq!(take_separator(&buf, 4..7), 3..7);
        assert_eq!(take_separator(&buf, 0..4), 0..4);
        assert_eq!(take_separator(&Buffer::from("solo"), 0..4), 0..4);
    }

    #[test]
    fn swap_case_skips_multi_char_mappings() {
        let mut buf = Buffer::from("aBß1");
        swap_case(&mut buf, 0..4);
        assert_eq!(buf.to_string(), "Abß1");
    }

    #[test]
    fn toggle_case_single_char_mappings() {
        assert_eq!(toggle_case('a'), 'A');
        assert_eq!(toggle_case('Z'), 'z');
        assert_eq!(toggle_case('É'), 'é');
        assert_eq!(toggle_case('-'), '-');
        assert_eq!(toggle_case('ß'), 'ß');
    }
}
