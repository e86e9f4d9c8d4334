//! Default vi bindings.

use crate::{Keymap, Keymaps, MappingSpec};
use tracing::warn;

/// Motions shared by command, visual and operator-pending keymaps.
const MOTIONS: &[(&str, &str)] = &[
    ("h", "vi-backward-char"),
    ("<Left>", "vi-backward-char"),
    ("l", "vi-forward-char"),
    ("<Right>", "vi-forward-char"),
    ("w", "vi-forward-word"),
    ("W", "vi-forward-blank-word"),
    ("e", "vi-forward-word-end"),
    ("E", "vi-forward-blank-word-end"),
    ("b", "vi-backward-word"),
    ("B", "vi-backward-blank-word"),
    ("ge", "vi-backward-word-end"),
    ("gE", "vi-backward-blank-word-end"),
    ("$", "vi-end-of-line"),
    ("<End>", "vi-end-of-line"),
    ("0", "vi-digit-or-beginning-of-line"),
    ("<Home>", "vi-digit-or-beginning-of-line"),
    ("^", "vi-first-non-blank"),
    ("|", "vi-goto-column"),
    ("%", "vi-match-bracket"),
    ("f", "vi-find-next-char"),
    ("t", "vi-find-next-char-skip"),
    ("F", "vi-find-prev-char"),
    ("T", "vi-find-prev-char-skip"),
    (";", "vi-repeat-find"),
    (",", "vi-rev-repeat-find"),
    ("/", "vi-search-forward"),
    ("?", "vi-search-backward"),
    ("n", "vi-repeat-search"),
    ("N", "vi-rev-repeat-search"),
];

/// Text objects for visual and operator-pending keymaps.
const TEXT_OBJECTS: &[(&str, &str)] = &[
    ("iw", "select-in-word"),
    ("aw", "select-a-word"),
    ("iW", "select-in-blank-word"),
    ("aW", "select-a-blank-word"),
    ("i\"", "select-in-shell-word"),
    ("a\"", "select-a-shell-word"),
    ("i'", "select-in-shell-word"),
    ("a'", "select-a-shell-word"),
    ("ib", "vi-select-surround"),
    ("ab", "vi-select-surround"),
    ("iB", "vi-select-surround"),
    ("aB", "vi-select-surround"),
];

/// Bracket keys usable after `i` / `a` for `vi-select-surround`.
const SURROUND_KEYS: &[&str] = &["(", ")", "[", "]", "{", "}", "<lt>", ">"];

const VICMD: &[(&str, &str)] = &[
    ("<Esc>", "vi-cmd-mode"),
    ("i", "vi-insert-mode"),
    ("I", "vi-insert-bol"),
    ("a", "vi-add-next"),
    ("A", "vi-add-eol"),
    ("v", "visual-mode"),
    ("V", "visual-line-mode"),
    ("<BS>", "vi-backward-char"),
    ("<Space>", "vi-forward-char"),
    ("d", "vi-delete"),
    ("y", "vi-yank"),
    ("c", "vi-change"),
    ("g~", "vi-oper-swap-case"),
    ("ys", "vi-add-surround"),
    ("cs", "vi-change-surround"),
    ("x", "vi-delete-char"),
    ("<Del>", "vi-delete-char"),
    ("X", "vi-backward-delete-char"),
    ("D", "vi-kill-eol"),
    ("C", "vi-change-eol"),
    ("s", "vi-substitute"),
    ("r", "vi-replace-chars"),
    ("R", "vi-replace"),
    ("~", "vi-swap-case"),
    ("p", "vi-put-after"),
    ("P", "vi-put-before"),
    ("\"", "vi-set-buffer"),
    ("Y", "vi-yank-whole-line"),
    ("u", "undo"),
    ("<C-r>", "redo"),
    ("<C-x><C-e>", "vi-edit-command-line"),
];

const VIINS: &[(&str, &str)] = &[
    ("<Esc>", "vi-cmd-mode"),
    ("<BS>", "backward-delete-char"),
    ("<C-h>", "backward-delete-char"),
    ("<Del>", "vi-delete-char"),
    ("<Left>", "vi-backward-char"),
    ("<Right>", "vi-forward-char"),
    ("<Home>", "vi-digit-or-beginning-of-line"),
    ("<End>", "vi-end-of-line"),
    ("<C-x><C-e>", "vi-edit-command-line"),
];

const VISUAL: &[(&str, &str)] = &[
    ("<Esc>", "vi-cmd-mode"),
    ("v", "visual-mode"),
    ("V", "visual-line-mode"),
    ("d", "vi-delete"),
    ("x", "vi-delete"),
    ("y", "vi-yank"),
    ("c", "vi-change"),
    ("s", "vi-change"),
    ("~", "vi-oper-swap-case"),
    ("S", "vi-add-surround"),
    ("\"", "vi-set-buffer"),
];

const VIOPP: &[(&str, &str)] = &[
    ("<Esc>", "vi-cmd-mode"),
    ("d", "vi-delete"),
    ("y", "vi-yank"),
    ("c", "vi-change"),
    ("~", "vi-oper-swap-case"),
    ("g~", "vi-oper-swap-case"),
    ("s", "vi-add-surround"),
];

fn specs(groups: &[&[(&str, &str)]], digits: bool, objects: bool) -> Vec<MappingSpec> {
    let mut out = Vec::new();
    let mut push = |notation: &str, widget: &str| match MappingSpec::parse(notation, widget) {
        Ok(spec) => out.push(spec),
        Err(err) => warn!(target: "input.map", notation, %err, "default_binding_invalid"),
    };
    for group in groups {
        for (notation, widget) in group.iter() {
            push(notation, widget);
        }
    }
    if digits {
        for d in '1'..='9' {
            push(&d.to_string(), "digit-argument");
        }
    }
    if objects {
        for (notation, widget) in TEXT_OBJECTS {
            push(notation, widget);
        }
        for key in SURROUND_KEYS {
            push(&format!("i{key}"), "vi-select-surround");
            push(&format!("a{key}"), "vi-select-surround");
        }
    }
    out
}

/// Default vi keymaps.
pub fn vi_defaults() -> Keymaps {
    Keymaps::new(
        Keymap::new(specs(&[MOTIONS, VICMD], true, false)),
        Keymap::new(specs(&[VIINS], false, false)),
        Keymap::new(specs(&[MOTIONS, VISUAL], true, true)),
        Keymap::new(specs(&[MOTIONS, VIOPP], true, true)),
    )
}
