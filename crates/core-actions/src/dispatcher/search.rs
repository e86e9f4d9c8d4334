//! `/` `?` `n` `N`: case-insensitive regex search over the whole buffer, without wrapping.
//!
//! An empty pattern reuses the last one. `n` repeats in the remembered direction and `N`
//! reverses it. Search is an exclusive motion, so `d/foo<CR>` deletes up to the match.

use super::Collaborators;
use super::argument::read_line;
use super::motion::{self, Reach};
use crate::widget::Widget;
use core_state::{EditorState, SearchMemory};
use regex::{Regex, RegexBuilder};
use tracing::{debug, warn};

/// Hint shown when a pattern fails to compile.
pub const SEARCH_FAILED_HINT: &str = "Failed to match search regexp";

pub(crate) fn handle(widget: Widget, state: &mut EditorState, cx: &mut Collaborators<'_>) {
    let pending = state.mode.pending();
    let count = state.take_count();
    let Some(query) = query_for(widget, state, cx) else {
        motion::finish(pending, None, state, cx);
        return;
    };
    let re = match compile(&query.pattern) {
        Ok(re) => re,
        Err(err) => {
            warn!(target: "actions.search", pattern = %query.pattern, error = %err, "search_regex_invalid");
            cx.render.hint(SEARCH_FAILED_HINT);
            state.undo.skip();
            motion::finish(pending, None, state, cx);
            return;
        }
    };
    if matches!(widget, Widget::ViSearchForward | Widget::ViSearchBackward) {
        state.motions.last_search = Some(query.clone());
    }
    let found = jump(state, &re, query.forward, count);
    debug!(target: "actions.search", pattern = %query.pattern, forward = query.forward, found, "search");
    motion::finish(pending, found.then_some(Reach::Exclusive), state, cx);
}

/// Pattern and direction for this search. `n`/`N` never overwrite the remembered direction.
fn query_for(
    widget: Widget,
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
) -> Option<SearchMemory> {
    match widget {
        Widget::ViSearchForward | Widget::ViSearchBackward => {
            let forward = widget == Widget::ViSearchForward;
            let prompt = if forward { "/" } else { "?" };
            let typed = read_line(state, cx, prompt)?;
            let pattern = if typed.is_empty() {
                state.motions.last_search.as_ref()?.pattern.clone()
            } else {
                typed
            };
            Some(SearchMemory { pattern, forward })
        }
        Widget::ViRepeatSearch | Widget::ViRevRepeatSearch => {
            let last = state.motions.last_search.clone()?;
            Some(SearchMemory {
                forward: last.forward == (widget == Widget::ViRepeatSearch),
                pattern: last.pattern,
            })
        }
        _ => None,
    }
}

fn compile(pattern: &str) -> Result<Regex, regex::Error> {
    RegexBuilder::new(pattern).case_insensitive(true).build()
}

/// Move to the `count`-th match strictly after (or before) the cursor. Fewer matches stop at
/// the last one found; none leaves the cursor alone and returns false.
fn jump(state: &mut EditorState, re: &Regex, forward: bool, count: usize) -> bool {
    let text = state.buffer.to_string();
    let len = state.buffer.len();
    let mut pos = state.cursor;
    for _ in 0..count {
        let next = if forward {
            let from = state.buffer.char_to_byte((pos + 1).min(len));
            re.find_at(&text, from).map(|m| m.start())
        } else {
            let limit = state.buffer.char_to_byte(pos);
            re.find_iter(&text)
                .map(|m| m.start())
                .take_while(|&start| start < limit)
                .last()
        };
        let Some(byte) = next else {
            break;
        };
        let candidate = state.buffer.byte_to_char(byte);
        if candidate == pos || (forward && pos >= len) {
            break;
        }
        pos = candidate;
    }
    if pos == state.cursor {
        return false;
    }
    state.set_cursor(pos);
    true
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
    fn forward_search_skips_match_under_cursor() {
        let mut st = command("foo bar foo baz foo", 0);
        let re = compile("FOO").unwrap();
        assert!(jump(&mut st, &re, true, 1));
        assert_eq!(st.cursor, 8);
        assert!(jump(&mut st, &re, true, 5));
        assert_eq!(st.cursor, 16);
        assert!(!jump(&mut st, &re, true, 1));
    }

    #[test]
    fn backward_search_finds_previous() {
        let mut st = command("foo bar foo baz", 12);
        let re = compile("foo").unwrap();
        assert!(jump(&mut st, &re, false, 1));
        assert_eq!(st.cursor, 8);
        assert!(jump(&mut st, &re, false, 1));
        assert_eq!(st.cursor, 0);
        assert!(!jump(&mut st, &re, false, 1));
    }

    #[test]
    fn multibyte_text_maps_back_to_chars() {
        let mut st = command("ééé x", 0);
        let re = compile("x").unwrap();
        assert!(jump(&mut st, &re, true, 1));
        assert_eq!(st.cursor, 4);
    }

    #[test]
    fn invalid_pattern_is_an_error() {
        assert!(compile("(").is_err());
    }
}
