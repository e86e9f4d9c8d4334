use super::{Collaborators, motion};
use crate::widget::Widget;
use core_events::KeyEvent;
use core_state::{DigitOutcome, EditorState};

pub(crate) fn handle(widget: Widget, state: &mut EditorState) {
    match widget {
        Widget::ViInsertMode => state.enter_insert(),
        Widget::ViCmdMode => {
            state.cancel_operator_pending();
            state.enter_command();
        }
        Widget::VisualMode => state.enter_visual(),
        Widget::VisualLineMode => state.enter_visual_line(),
        Widget::ViInsertBol => {
            let target = state.buffer.first_non_blank(state.cursor);
            state.enter_insert();
            state.set_cursor(target);
        }
        Widget::ViAddNext => {
            let on_text = state
                .buffer
                .char_at(state.cursor)
                .is_some_and(|c| c != '\n');
            state.enter_insert();
            if on_text {
                state.set_cursor(state.cursor + 1);
            }
        }
        Widget::ViAddEol => {
            let end = state.buffer.line_end(state.cursor);
            state.enter_insert();
            state.set_cursor(end);
        }
        _ => {}
    }
}

/// Count prefix. `0` only counts once a count has started; otherwise it is the
/// beginning-of-line motion.
pub(crate) fn handle_count(
    widget: Widget,
    state: &mut EditorState,
    cx: &mut Collaborators<'_>,
    trigger: &[KeyEvent],
) {
    match widget {
        Widget::DigitArgument => {
            state.undo.skip();
            if let Some(digit) = trigger.last().and_then(KeyEvent::as_char) {
                state.iterations.add_digit(digit);
            }
        }
        Widget::ViDigitOrBeginningOfLine => {
            if state.iterations.add_digit('0') == DigitOutcome::BeginningOfLine {
                motion::handle(widget, state, cx);
            } else {
                state.undo.skip();
            }
        }
        _ => {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_state::Mode;

    fn command(text: &str, cursor: usize) -> EditorState {
        let mut st = EditorState::new(text);
        st.enter_command();
        st.cursor = cursor;
        st
    }

    #[test]
    fn append_variants() {
        let mut st = command("  ab\ncd", 2);
        handle(Widget::ViAddNext, &mut st);
        assert_eq!((st.mode.mode(), st.cursor), (Mode::Insert, 3));

        let mut st = command("  ab\ncd", 0);
        handle(Widget::ViAddEol, &mut st);
        assert_eq!(st.cursor, 4);

        let mut st = command("  ab\ncd", 3);
        handle(Widget::ViInsertBol, &mut st);
        assert_eq!(st.cursor, 2);
    }

    #[test]
    fn append_on_empty_line_stays() {
        let mut st = command("a\n\nb", 2);
        handle(Widget::ViAddNext, &mut st);
        assert_eq!(st.cursor, 2);
    }

    #[test]
    fn visual_toggles_off_on_repeat() {
        let mut st = command("hello", 1);
        handle(Widget::VisualMode, &mut st);
        assert_eq!(st.mode.mode(), Mode::Visual);
        handle(Widget::VisualMode, &mut st);
        assert_eq!(st.mode.mode(), Mode::Command);
        assert_eq!(st.selection.mark(), None);
    }
}
