//! Stable widget names.
//!
//! A widget is a named, zero-argument editing action. Keymaps bind key sequences to these
//! names; the dispatcher matches on the enum.

use std::fmt;
use std::str::FromStr;
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown widget `{0}`")]
pub struct UnknownWidget(pub String);

/// Dispatch family of a widget.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WidgetGroup {
    Mode,
    Count,
    Motion,
    Operator,
    TextObject,
    Edit,
    Search,
    History,
    External,
}

macro_rules! widgets {
    ($( $group:ident { $( $variant:ident => $name:literal ),+ $(,)? } )+) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum Widget {
            $( $( $variant, )+ )+
        }

        impl Widget {
            pub const ALL: &'static [Widget] = &[ $( $( Widget::$variant, )+ )+ ];

            pub fn name(self) -> &'static str {
                match self {
                    $( $( Widget::$variant => $name, )+ )+
                }
            }

            pub fn group(self) -> WidgetGroup {
                match self {
                    $( $( Widget::$variant )|+ => WidgetGroup::$group, )+
                }
            }
        }

        impl FromStr for Widget {
            type Err = UnknownWidget;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s {
                    $( $( $name => Ok(Widget::$variant), )+ )+
                    other => Err(UnknownWidget(other.to_string())),
                }
            }
        }
    };
}

widgets! {
    Mode {
        ViInsertMode => "vi-insert-mode",
        ViCmdMode => "vi-cmd-mode",
        VisualMode => "visual-mode",
        VisualLineMode => "visual-line-mode",
        ViInsertBol => "vi-insert-bol",
        ViAddNext => "vi-add-next",
        ViAddEol => "vi-add-eol",
    }
    Count {
        DigitArgument => "digit-argument",
        ViDigitOrBeginningOfLine => "vi-digit-or-beginning-of-line",
    }
    Motion {
        ViBackwardChar => "vi-backward-char",
        ViForwardChar => "vi-forward-char",
        ViForwardWord => "vi-forward-word",
        ViForwardBlankWord => "vi-forward-blank-word",
        ViForwardWordEnd => "vi-forward-word-end",
        ViForwardBlankWordEnd => "vi-forward-blank-word-end",
        ViBackwardWord => "vi-backward-word",
        ViBackwardBlankWord => "vi-backward-blank-word",
        ViBackwardWordEnd => "vi-backward-word-end",
        ViBackwardBlankWordEnd => "vi-backward-blank-word-end",
        ViEndOfLine => "vi-end-of-line",
        ViGotoColumn => "vi-goto-column",
        ViFirstNonBlank => "vi-first-non-blank",
        ViMatchBracket => "vi-match-bracket",
        ViFindNextChar => "vi-find-next-char",
        ViFindNextCharSkip => "vi-find-next-char-skip",
        ViFindPrevChar => "vi-find-prev-char",
        ViFindPrevCharSkip => "vi-find-prev-char-skip",
        ViRepeatFind => "vi-repeat-find",
        ViRevRepeatFind => "vi-rev-repeat-find",
    }
    Operator {
        ViDelete => "vi-delete",
        ViYank => "vi-yank",
        ViChange => "vi-change",
        ViOperSwapCase => "vi-oper-swap-case",
        ViAddSurround => "vi-add-surround",
    }
    TextObject {
        SelectAWord => "select-a-word",
        SelectInWord => "select-in-word",
        SelectABlankWord => "select-a-blank-word",
        SelectInBlankWord => "select-in-blank-word",
        SelectAShellWord => "select-a-shell-word",
        SelectInShellWord => "select-in-shell-word",
        ViSelectSurround => "vi-select-surround",
    }
    Edit {
        ViDeleteChar => "vi-delete-char",
        ViBackwardDeleteChar => "vi-backward-delete-char",
        ViKillEol => "vi-kill-eol",
        ViChangeEol => "vi-change-eol",
        ViPutAfter => "vi-put-after",
        ViPutBefore => "vi-put-before",
        ViSetBuffer => "vi-set-buffer",
        ViYankWholeLine => "vi-yank-whole-line",
        ViReplaceChars => "vi-replace-chars",
        ViReplace => "vi-replace",
        ViSwapCase => "vi-swap-case",
        ViSubstitute => "vi-substitute",
        ViChangeSurround => "vi-change-surround",
        SelfInsert => "self-insert",
        BackwardDeleteChar => "backward-delete-char",
    }
    Search {
        ViSearchForward => "vi-search-forward",
        ViSearchBackward => "vi-search-backward",
        ViRepeatSearch => "vi-repeat-search",
        ViRevRepeatSearch => "vi-rev-repeat-search",
    }
    History {
        Undo => "undo",
        Redo => "redo",
    }
    External {
        ViEditCommandLine => "vi-edit-command-line",
    }
}

impl Widget {
    pub fn is_known(name: &str) -> bool {
        name.parse::<Widget>().is_ok()
    }
}

impl fmt::Display for Widget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
