//! Engine: translator + state + undo history behind one `feed` call.
//!
//! Front-ends push keys one at a time. Each key may complete zero or more widgets (a
//! dead-end prefix followed by a bound key, or keys left over after a match). Widgets that
//! need argument keys read the translator's queue first and then the front-end's source.

use crate::dispatcher::{Collaborators, DispatchOutcome, dispatch};
use crate::external_editor::EditorLauncher;
use crate::hooks::{Options, RenderHook};
use crate::key_translator::{KeyTranslator, Translation};
use crate::widget::Widget;
use core_config::Config;
use core_events::{KeyEvent, KeySource};
use core_state::{EditorState, Registers, UndoEngine, UndoRecorder};
use std::collections::VecDeque;
use tracing::{debug, trace};

/// One widget run by [`Engine::feed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dispatched {
    pub widget: Widget,
    pub outcome: DispatchOutcome,
}

#[derive(Debug)]
pub struct Engine<U = UndoEngine> {
    pub state: EditorState,
    translator: KeyTranslator,
    undo: U,
    options: Options,
}

impl Engine<UndoEngine> {
    /// Session over `text` with default bindings and options.
    pub fn new(text: &str) -> Self {
        Self::with_parts(
            EditorState::new(text),
            KeyTranslator::default(),
            UndoEngine::new(),
            Options::default(),
        )
    }

    pub fn from_config(text: &str, cfg: &Config) -> Self {
        let state = EditorState::new(text)
            .with_registers(Registers::with_capacity(cfg.numbered_registers()));
        Self::with_parts(
            state,
            KeyTranslator::from_config(cfg),
            UndoEngine::new(),
            Options::from_config(cfg),
        )
    }
}

impl<U: UndoRecorder> Engine<U> {
    pub fn with_parts(
        state: EditorState,
        translator: KeyTranslator,
        undo: U,
        options: Options,
    ) -> Self {
        Self {
            state,
            translator,
            undo,
            options,
        }
    }

    pub fn undo_recorder(&self) -> &U {
        &self.undo
    }

    pub fn translator(&self) -> &KeyTranslator {
        &self.translator
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Feed one key. `source` supplies further keys to widgets that block for an argument.
    pub fn feed(
        &mut self,
        key: KeyEvent,
        source: &mut dyn KeySource,
        render: &mut dyn RenderHook,
        launcher: &mut dyn EditorLauncher,
    ) -> Vec<Dispatched> {
        self.translator.push(key);
        self.drain(false, source, render, launcher)
    }

    /// End of input: run a match that was waiting for a longer binding.
    pub fn flush(
        &mut self,
        source: &mut dyn KeySource,
        render: &mut dyn RenderHook,
        launcher: &mut dyn EditorLauncher,
    ) -> Vec<Dispatched> {
        let mut out = self.drain(true, source, render, launcher);
        // A flushed widget may leave keys that resolve normally.
        out.extend(self.drain(false, source, render, launcher));
        out
    }

    /// Feed every key from `source`, then flush.
    pub fn run(
        &mut self,
        source: &mut dyn KeySource,
        render: &mut dyn RenderHook,
        launcher: &mut dyn EditorLauncher,
    ) -> Vec<Dispatched> {
        let mut out = Vec::new();
        while let Some(key) = source.next_key() {
            out.extend(self.feed(key, source, render, launcher));
        }
        out.extend(self.flush(source, render, launcher));
        out
    }

    fn drain(
        &mut self,
        at_end: bool,
        source: &mut dyn KeySource,
        render: &mut dyn RenderHook,
        launcher: &mut dyn EditorLauncher,
    ) -> Vec<Dispatched> {
        let mut out = Vec::new();
        loop {
            let mode = self.state.mode.mode();
            let next = if at_end {
                self.translator.flush(mode)
            } else {
                self.translator.next(mode)
            };
            match next {
                None => break,
                Some(Translation::Unbound(keys)) => {
                    trace!(target: "actions.dispatch", keys = keys.len(), ?mode, "keys_ignored");
                    if self.state.mode.is_operator_pending() {
                        self.cancel_pending_operator(render);
                    }
                }
                Some(Translation::Widget { widget, keys }) => {
                    let mut chained = Chained {
                        front: self.translator.pending_mut(),
                        rest: &mut *source,
                    };
                    let mut cx = Collaborators {
                        keys: &mut chained,
                        undo: &mut self.undo,
                        render: &mut *render,
                        launcher: &mut *launcher,
                        options: &self.options,
                    };
                    let outcome = dispatch(widget, &mut self.state, &mut cx, &keys);
                    out.push(Dispatched { widget, outcome });
                }
            }
        }
        out
    }

    /// An unbound key consumes the pending operator's one key: the operator is dropped.
    fn cancel_pending_operator(&mut self, render: &mut dyn RenderHook) {
        let cursor = self.state.cursor;
        self.state.cancel_operator_pending();
        self.state.iterations.reset();
        let mode = self.state.mode.mode();
        debug!(target: "actions.dispatch", ?mode, "operator_cancelled_by_unbound_key");
        render.mode_changed(mode, self.options.shape_for(mode));
        if self.state.cursor != cursor {
            render.cursor_moved(self.state.cursor);
        }
    }
}

/// Queued keys first, then the live source.
struct Chained<'a> {
    front: &'a mut VecDeque<KeyEvent>,
    rest: &'a mut dyn KeySource,
}

impl KeySource for Chained<'_> {
    fn next_key(&mut self) -> Option<KeyEvent> {
        self.front.pop_front().or_else(|| self.rest.next_key())
    }
}
