//! Single-key edits, insert mode, undo/redo and search.

mod common;

use common::{RenderEvent, Session, charwise, run};
use core_actions::SEARCH_FAILED_HINT;
use core_state::Mode;
use pretty_assertions::assert_eq;

#[test]
fn delete_chars() {
    let s = run("abcdef", 1, "3x");
    assert_eq!((s.text().as_str(), s.cursor()), ("aef", 1));
    assert_eq!(s.unnamed(), charwise("bcd"));

    let s = run("abcdef", 3, "2X");
    assert_eq!((s.text().as_str(), s.cursor()), ("adef", 1));
    assert_eq!(s.unnamed(), charwise("bc"));

    let s = run("abc", 0, "X");
    assert_eq!(s.text(), "abc");
}

#[test]
fn x_on_empty_line_is_noop() {
    let s = run("a\n\nb", 2, "x");
    assert_eq!(s.text(), "a\n\nb");
    assert_eq!(s.unnamed(), None);
}

#[test]
fn replace_chars() {
    let s = run("abc", 0, "2rx");
    assert_eq!((s.text().as_str(), s.cursor()), ("xxc", 1));

    let s = run("abc", 1, "5rx");
    assert_eq!(s.text(), "abc");

    let s = run("ab cd", 2, "r<CR>");
    assert_eq!((s.text().as_str(), s.cursor()), ("ab\ncd", 3));

    let s = run("abc", 0, "r<Esc>");
    assert_eq!((s.text().as_str(), s.mode()), ("abc", Mode::Command));
}

#[test]
fn replace_mode_overtypes_and_backspace_restores() {
    let s = run("abcd", 1, "Rxy<BS><Esc>");
    assert_eq!((s.text().as_str(), s.cursor()), ("axcd", 1));
    assert_eq!(s.mode(), Mode::Command);

    let s = run("ab", 1, "Rxyz<Esc>");
    assert_eq!(s.text(), "axyz");
}

#[test]
fn replace_mode_is_one_undo_step() {
    let s = run("abcd", 0, "Rxyz<Esc>u");
    assert_eq!(s.text(), "abcd");
}

#[test]
fn tilde_toggles_and_advances() {
    let s = run("abc", 0, "~");
    assert_eq!((s.text().as_str(), s.cursor()), ("Abc", 1));
    let s = run("abc", 0, "~~~");
    assert_eq!((s.text().as_str(), s.cursor()), ("ABC", 2));
    // Parked on the last character, another `~` toggles it back.
    let s = run("abc", 0, "~~~~");
    assert_eq!(s.text(), "ABc");
}

#[test]
fn substitute_and_change_eol() {
    let s = run("abcd", 1, "2sX<Esc>");
    assert_eq!(s.text(), "aXd");
    assert_eq!(s.unnamed(), charwise("bc"));

    let s = run("abcd\nx", 1, "CZ<Esc>");
    assert_eq!(s.text(), "aZ\nx");

    let s = run("abcd\nx", 1, "D");
    assert_eq!((s.text().as_str(), s.cursor()), ("a\nx", 0));
}

#[test]
fn put_round_trip() {
    let s = run("ab", 0, "ylp");
    assert_eq!((s.text().as_str(), s.cursor()), ("aab", 1));

    let s = run("one\ntwo", 0, "yyp");
    assert_eq!((s.text().as_str(), s.cursor()), ("one\none\ntwo", 4));

    let s = run("one\ntwo", 5, "yyP");
    assert_eq!((s.text().as_str(), s.cursor()), ("one\ntwo\ntwo", 4));

    let s = run("ab", 0, "x3p");
    assert_eq!(s.text(), "baaa");
}

#[test]
fn insert_mode_typing() {
    let mut s = Session::insert("");
    s.keys("echo hi<Esc>");
    assert_eq!((s.text().as_str(), s.cursor(), s.mode()), ("echo hi", 6, Mode::Command));

    let mut s = Session::insert("abc");
    s.keys("<BS><BS>x");
    assert_eq!(s.text(), "ax");
    assert_eq!(s.unnamed(), None);

    let mut s = Session::insert("abc");
    s.keys("<Home>>");
    assert_eq!(s.text(), ">abc");
}

#[test]
fn append_and_insert_variants() {
    let s = run("  ab", 3, "I#<Esc>");
    assert_eq!(s.text(), "  #ab");
    let s = run("ab", 0, "a-<Esc>");
    assert_eq!(s.text(), "a-b");
    let s = run("ab\ncd", 0, "A;<Esc>");
    assert_eq!(s.text(), "ab;\ncd");
}

#[test]
fn insert_run_undoes_as_one() {
    let s = run("x", 0, "aabc<Esc>u");
    assert_eq!(s.text(), "x");
    let s = run("x", 0, "aabc<Esc>u<C-r>");
    assert_eq!(s.text(), "xabc");
}

#[test]
fn undo_and_redo() {
    let s = run("one two three", 0, "dwdwu");
    assert_eq!(s.text(), "two three");
    let s = run("one two three", 0, "dwdwuu");
    assert_eq!(s.text(), "one two three");
    let s = run("one two three", 0, "dwdwuu<C-r>");
    assert_eq!(s.text(), "two three");
    let s = run("one", 0, "u");
    assert_eq!(s.text(), "one");
}

#[test]
fn new_change_clears_redo() {
    let s = run("abc", 0, "xux<C-r>");
    assert_eq!(s.text(), "bc");
    assert_eq!(s.engine.undo_recorder().redo_depth(), 0);
}

#[test]
fn search_forward_and_repeat() {
    let text = "foo bar FOO baz foo";
    let s = run(text, 0, "/foo<CR>");
    assert_eq!(s.cursor(), 8);
    let s = run(text, 0, "/foo<CR>n");
    assert_eq!(s.cursor(), 16);
    let s = run(text, 0, "/foo<CR>nN");
    assert_eq!(s.cursor(), 8);
    let s = run(text, 0, "/foo<CR>/<CR>");
    assert_eq!(s.cursor(), 16);
    let s = run(text, 16, "?bar<CR>");
    assert_eq!(s.cursor(), 4);
}

#[test]
fn search_does_not_wrap() {
    let s = run("foo bar", 4, "/foo<CR>");
    assert_eq!(s.cursor(), 4);
}

#[test]
fn search_as_operator_motion_is_exclusive() {
    let s = run("one two three", 0, "d/thr<CR>");
    assert_eq!(s.text(), "three");
    assert_eq!(s.unnamed(), charwise("one two "));
}

#[test]
fn search_escape_cancels() {
    let s = run("foo foo", 0, "/fo<Esc>");
    assert_eq!((s.cursor(), s.mode()), (0, Mode::Command));
    let s = run("foo foo", 0, "d/fo<Esc>");
    assert_eq!((s.text().as_str(), s.mode()), ("foo foo", Mode::Command));
}

#[test]
fn malformed_search_reports_hint() {
    let s = run("a(b", 0, "/(<CR>");
    assert_eq!(s.cursor(), 0);
    assert!(
        s.render
            .events
            .contains(&RenderEvent::Hint(SEARCH_FAILED_HINT.to_string()))
    );
    assert_eq!(s.engine.undo_recorder().undo_depth(), 0);
}
