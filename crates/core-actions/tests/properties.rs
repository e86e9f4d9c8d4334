//! Behavioural properties that must hold for any input.

mod common;

use common::{Session, linewise, run};
use core_state::{Mode, RegisterContent};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

fn snapshot(s: &Session) -> (String, usize, Mode, Option<RegisterContent>, Vec<RegisterContent>) {
    (
        s.text(),
        s.cursor(),
        s.mode(),
        s.unnamed(),
        s.engine.state.registers.numbered().cloned().collect(),
    )
}

#[test]
fn dd_on_single_line_empties_buffer() {
    let s = run("echo hello", 3, "dd");
    assert_eq!((s.text().as_str(), s.cursor()), ("", 0));
    assert_eq!(s.unnamed(), linewise("echo hello"));
}

#[test]
fn visual_toggle_twice_leaves_no_selection() {
    let s = run("hello", 2, "vv");
    assert_eq!(s.mode(), Mode::Command);
    assert_eq!(s.engine.state.selection.mark(), None);
    assert!(!s.engine.state.selection.is_active());
    assert_eq!(s.text(), "hello");
}

#[test]
fn surround_inner_word() {
    assert_eq!(run("ab", 0, "ysiw*").text(), "*ab*");
}

proptest! {
    #[test]
    fn operator_then_escape_changes_nothing(
        text in "[a-z ]{1,20}",
        cursor in 0usize..20,
        op in prop::sample::select(vec!["d", "y", "c", "g~", "ys"]),
    ) {
        let before = run(&text, cursor, "");
        let after = run(&text, cursor, &format!("{op}<Esc>"));
        prop_assert_eq!(snapshot(&after), snapshot(&before));
    }

    #[test]
    fn visual_yank_ignores_selection_direction(
        text in "[a-z]{1,16}",
        m in 0usize..16,
        p in 0usize..16,
    ) {
        let len = text.chars().count();
        let (m, p) = (m % len, p % len);
        let forward = run(&text, m, &format!("v{p}|y"));
        let backward = run(&text, p, &format!("v{m}|y"));
        prop_assert_eq!(forward.unnamed(), backward.unnamed());
        let (lo, hi) = (m.min(p), m.max(p));
        let expected: String = text.chars().skip(lo).take(hi - lo + 1).collect();
        prop_assert_eq!(forward.unnamed().map(|c| c.text), Some(expected));
    }

    #[test]
    fn counted_word_motion_equals_repetition(
        text in "[a-z. ]{0,30}",
        n in 1usize..6,
    ) {
        let counted = run(&text, 0, &format!("{n}w"));
        let repeated = run(&text, 0, &"w".repeat(n));
        prop_assert_eq!(counted.cursor(), repeated.cursor());
    }

    #[test]
    fn word_motion_at_end_stays(text in "[a-z. ]{1,30}") {
        let last = text.chars().count() - 1;
        prop_assert_eq!(run(&text, last, "w").cursor(), last);
    }

    #[test]
    fn find_and_till_differ_by_one(text in "[ab]{1,20}", k in 2usize..5) {
        let f = run(&text, 0, &format!("{k}fa")).cursor();
        let t = run(&text, 0, &format!("{k}ta")).cursor();
        if f == 0 {
            prop_assert_eq!(t, 0);
        } else {
            prop_assert_eq!(f - t, 1);
        }

        let end = text.chars().count() - 1;
        let big_f = run(&text, end, &format!("{k}Fa")).cursor();
        let big_t = run(&text, end, &format!("{k}Ta")).cursor();
        if big_f == end {
            prop_assert_eq!(big_t, end);
        } else {
            prop_assert_eq!(big_t - big_f, 1);
        }
    }
}
