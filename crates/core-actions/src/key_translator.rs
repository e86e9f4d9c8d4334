//! KeyTranslator: pending keys -> widget.
//!
//! Keys accumulate until the keymap for the current mode resolves them:
//! * A unique match consumes its keys and yields the widget. Keys left over stay queued and
//!   are re-fed on the next call.
//! * An ambiguous match (`c` could still become `cs`) waits for more input; [`flush`]
//!   takes the match when input ends.
//! * A dead end drops the whole sequence, except that a single printable key in insert mode
//!   inserts itself.
//!
//! [`flush`]: KeyTranslator::flush

use crate::widget::Widget;
use core_config::Config;
use core_events::KeyEvent;
use core_keymap::{KeymapId, Keymaps, Resolution, vi_defaults};
use core_state::Mode;
use std::collections::VecDeque;
use tracing::{trace, warn};

/// Result of resolving the pending keys.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    /// Run `widget`; `keys` are the keys that named it.
    Widget { widget: Widget, keys: Vec<KeyEvent> },
    /// Keys that matched nothing and were discarded.
    Unbound(Vec<KeyEvent>),
}

#[derive(Debug, Clone)]
pub struct KeyTranslator {
    keymaps: Keymaps,
    pending: VecDeque<KeyEvent>,
}

impl Default for KeyTranslator {
    fn default() -> Self {
        Self::new(vi_defaults())
    }
}

/// Keymap consulted in `mode`.
pub fn keymap_for(mode: Mode) -> KeymapId {
    match mode {
        Mode::Insert => KeymapId::Viins,
        Mode::Command => KeymapId::Vicmd,
        Mode::Visual | Mode::VisualLine => KeymapId::Visual,
        Mode::OperatorPending => KeymapId::Viopp,
    }
}

impl KeyTranslator {
    pub fn new(keymaps: Keymaps) -> Self {
        Self {
            keymaps,
            pending: VecDeque::new(),
        }
    }

    /// Default bindings plus the `[keymap.*]` overrides from `cfg`.
    pub fn from_config(cfg: &Config) -> Self {
        let mut keymaps = vi_defaults();
        cfg.apply_keymap_overrides(&mut keymaps, Widget::is_known);
        Self::new(keymaps)
    }

    pub fn keymaps(&self) -> &Keymaps {
        &self.keymaps
    }

    pub fn push(&mut self, key: KeyEvent) {
        self.pending.push_back(key.normalized());
    }

    pub fn has_pending(&self) -> bool {
        !self.pending.is_empty()
    }

    /// Queued keys. Widgets reading argument keys consume from the front of this queue
    /// before asking the terminal.
    pub fn pending_mut(&mut self) -> &mut VecDeque<KeyEvent> {
        &mut self.pending
    }

    /// Resolve pending keys in `mode`. `None` while more keys are needed.
    pub fn next(&mut self, mode: Mode) -> Option<Translation> {
        self.resolve(mode, false)
    }

    /// Resolve at end of input: an ambiguous match is taken, an incomplete sequence dropped.
    pub fn flush(&mut self, mode: Mode) -> Option<Translation> {
        self.resolve(mode, true)
    }

    fn resolve(&mut self, mode: Mode, at_end: bool) -> Option<Translation> {
        if self.pending.is_empty() {
            return None;
        }
        let id = keymap_for(mode);
        let resolution = self.keymaps.get(id).resolve(self.pending.make_contiguous());
        match resolution {
            Resolution::Matched {
                ambiguous: true, ..
            } if !at_end => None,
            Resolution::Matched {
                consumed, widget, ..
            } => {
                let keys: Vec<KeyEvent> = self.pending.drain(..consumed).collect();
                match widget.parse::<Widget>() {
                    Ok(widget) => {
                        trace!(target: "input.map", keymap = %id, widget = %widget, "resolved");
                        Some(Translation::Widget { widget, keys })
                    }
                    Err(err) => {
                        warn!(target: "input.map", keymap = %id, %err, "binding_names_unknown_widget");
                        Some(Translation::Unbound(keys))
                    }
                }
            }
            Resolution::NeedMore if !at_end => None,
            Resolution::NeedMore => Some(self.drop_pending(id)),
            Resolution::FallbackLiteral(key) => {
                if id == KeymapId::Viins && self.pending.len() == 1 && key.as_char().is_some() {
                    self.pending.clear();
                    return Some(Translation::Widget {
                        widget: Widget::SelfInsert,
                        keys: vec![key],
                    });
                }
                Some(self.drop_pending(id))
            }
        }
    }

    fn drop_pending(&mut self, id: KeymapId) -> Translation {
        let keys: Vec<KeyEvent> = self.pending.drain(..).collect();
        trace!(target: "input.map", keymap = %id, keys = keys.len(), "unbound_sequence");
        Translation::Unbound(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core_events::parse_keys;

    fn feed(tr: &mut KeyTranslator, notation: &str) {
        for key in parse_keys(notation).unwrap() {
            tr.push(key);
        }
    }

    fn widget(t: Option<Translation>) -> Option<Widget> {
        match t {
            Some(Translation::Widget { widget, .. }) => Some(widget),
            _ => None,
        }
    }

    #[test]
    fn prefix_waits_then_resolves() {
        let mut tr = KeyTranslator::default();
        feed(&mut tr, "g");
        assert_eq!(tr.next(Mode::Command), None);
        feed(&mut tr, "e");
        assert_eq!(widget(tr.next(Mode::Command)), Some(Widget::ViBackwardWordEnd));
        assert!(!tr.has_pending());
    }

    #[test]
    fn ambiguous_change_waits_for_surround() {
        let mut tr = KeyTranslator::default();
        feed(&mut tr, "c");
        assert_eq!(tr.next(Mode::Command), None);
        feed(&mut tr, "w");
        assert_eq!(widget(tr.next(Mode::Command)), Some(Widget::ViChange));
        // `w` is left for the next mode's keymap.
        assert_eq!(widget(tr.next(Mode::OperatorPending)), Some(Widget::ViForwardWord));
    }

    #[test]
    fn flush_takes_ambiguous_match() {
        let mut tr = KeyTranslator::default();
        feed(&mut tr, "y");
        assert_eq!(tr.next(Mode::Command), None);
        assert_eq!(widget(tr.flush(Mode::Command)), Some(Widget::ViYank));
    }

    #[test]
    fn insert_mode_literal_is_self_insert() {
        let mut tr = KeyTranslator::default();
        feed(&mut tr, "q");
        match tr.next(Mode::Insert) {
            Some(Translation::Widget { widget, keys }) => {
                assert_eq!(widget, Widget::SelfInsert);
                assert_eq!(keys, vec![KeyEvent::char('q')]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn dead_end_in_command_mode_drops_sequence() {
        let mut tr = KeyTranslator::default();
        feed(&mut tr, "gq");
        assert!(matches!(
            tr.next(Mode::Command),
            Some(Translation::Unbound(keys)) if keys.len() == 2
        ));
        assert!(!tr.has_pending());
    }
}
