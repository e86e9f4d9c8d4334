//! Undo integration.
//!
//! The engine only decides *when* an action is undo-worthy: widgets raise the per-invocation
//! skip flag in [`UndoFlags`], and the dispatcher hands the pre-widget buffer to an
//! [`UndoRecorder`] when the flag stayed clear and the text changed. [`UndoEngine`] is the
//! snapshot recorder used by the binary and the tests.

use core_text::Buffer;
use std::collections::hash_map::DefaultHasher;
use std::hash::Hasher;
use tracing::trace;

/// Maximum number of checkpoints retained in undo history.
pub const UNDO_HISTORY_MAX: usize = 200;

/// Per-invocation undo-skip marker.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UndoFlags {
    skip: bool,
}

impl UndoFlags {
    /// Mark the current invocation as not undo-worthy.
    pub fn skip(&mut self) {
        self.skip = true;
    }

    pub fn is_skipped(&self) -> bool {
        self.skip
    }

    pub fn reset(&mut self) {
        self.skip = false;
    }
}

/// Restorable buffer state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Checkpoint {
    pub buffer: Buffer,
    pub cursor: usize,
}

/// Storage behind undo/redo. Only `record_checkpoint` is required of a recorder that does not
/// support grouping or history navigation.
pub trait UndoRecorder {
    /// Remember `before` as the state preceding an undo-worthy change.
    fn record_checkpoint(&mut self, before: &Buffer, cursor: usize);

    /// Start coalescing: while a group is open only its first checkpoint is kept (an insert
    /// run undoes as one unit). Idempotent.
    fn begin_group(&mut self) {}

    fn end_group(&mut self) {}

    /// Step back, given the current state (pushed for redo).
    fn undo(&mut self, _current: &Buffer, _cursor: usize) -> Option<Checkpoint> {
        None
    }

    fn redo(&mut self, _current: &Buffer, _cursor: usize) -> Option<Checkpoint> {
        None
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    Closed,
    Open { recorded: bool },
}

#[derive(Clone)]
struct Snapshot {
    checkpoint: Checkpoint,
    hash: u64,
}

impl Snapshot {
    fn capture(buffer: &Buffer, cursor: usize) -> Self {
        Self {
            hash: buffer_hash(buffer),
            checkpoint: Checkpoint {
                buffer: buffer.clone(),
                cursor,
            },
        }
    }
}

/// Full-snapshot recorder with hash de-duplication and bounded history.
pub struct UndoEngine {
    undo_stack: Vec<Snapshot>,
    redo_stack: Vec<Snapshot>,
    group: Group,
    snapshots_skipped: u64,
}

impl Default for UndoEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl UndoEngine {
    pub fn new() -> Self {
        Self {
            undo_stack: Vec::new(),
            redo_stack: Vec::new(),
            group: Group::Closed,
            snapshots_skipped: 0,
        }
    }

    pub fn undo_depth(&self) -> usize {
        self.undo_stack.len()
    }

    pub fn redo_depth(&self) -> usize {
        self.redo_stack.len()
    }

    /// Checkpoints dropped because they matched the previous one or fell inside a group.
    pub fn snapshots_skipped(&self) -> u64 {
        self.snapshots_skipped
    }
}

impl UndoRecorder for UndoEngine {
    fn record_checkpoint(&mut self, before: &Buffer, cursor: usize) {
        if let Group::Open { recorded: true } = self.group {
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), "checkpoint_coalesced");
            return;
        }
        let snap = Snapshot::capture(before, cursor);
        if let Some(last) = self.undo_stack.last()
            && last.hash == snap.hash
            && last.checkpoint.buffer == snap.checkpoint.buffer
        {
            self.snapshots_skipped += 1;
            trace!(target: "state.undo", undo_depth = self.undo_stack.len(), hash = snap.hash, "snapshot_dedupe_skip");
        } else {
            trace!(target: "state.undo", undo_depth = self.undo_stack.len() + 1, hash = snap.hash, "push_snapshot");
            self.undo_stack.push(snap);
            if self.undo_stack.len() > UNDO_HISTORY_MAX {
                self.undo_stack.remove(0);
                trace!(target: "state.undo", "undo_stack_trimmed");
            }
        }
        if let Group::Open { recorded } = &mut self.group {
            *recorded = true;
        }
        if !self.redo_stack.is_empty() {
            self.redo_stack.clear();
            trace!(target: "state.undo", "redo_stack_cleared_on_new_edit");
        }
    }

    fn begin_group(&mut self) {
        if self.group == Group::Closed {
            self.group = Group::Open { recorded: false };
        }
    }

    fn end_group(&mut self) {
        self.group = Group::Closed;
    }

    fn undo(&mut self, current: &Buffer, cursor: usize) -> Option<Checkpoint> {
        let last = self.undo_stack.pop()?;
        self.redo_stack.push(Snapshot::capture(current, cursor));
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "undo_pop");
        Some(last.checkpoint)
    }

    fn redo(&mut self, current: &Buffer, cursor: usize) -> Option<Checkpoint> {
        let next = self.redo_stack.pop()?;
        self.undo_stack.push(Snapshot::capture(current, cursor));
        trace!(target: "state.undo", undo_depth = self.undo_stack.len(), redo_depth = self.redo_stack.len(), "redo_pop");
        Some(next.checkpoint)
    }
}

fn buffer_hash(buf: &Buffer) -> u64 {
    let mut h = DefaultHasher::new();
    for c in buf.chars() {
        h.write_u32(c as u32);
    }
    h.finish()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn undo_redo_round_trip() {
        let mut engine = UndoEngine::new();
        let v1 = Buffer::from("one");
        let v2 = Buffer::from("two");
        engine.record_checkpoint(&v1, 1);
        let back = engine.undo(&v2, 2).unwrap();
        assert_eq!(back.buffer, v1);
        assert_eq!(back.cursor, 1);
        assert_eq!(engine.redo_depth(), 1);
        let fwd = engine.redo(&back.buffer, back.cursor).unwrap();
        assert_eq!(fwd.buffer, v2);
        assert!(engine.undo(&fwd.buffer, 0).is_some());
        assert!(engine.undo(&v1, 0).is_none());
    }

    #[test]
    fn identical_checkpoints_are_deduped() {
        let mut engine = UndoEngine::new();
        let buf = Buffer::from("same");
        engine.record_checkpoint(&buf, 0);
        engine.record_checkpoint(&buf, 2);
        assert_eq!(engine.undo_depth(), 1);
        assert_eq!(engine.snapshots_skipped(), 1);
    }

    #[test]
    fn group_keeps_only_first_checkpoint() {
        let mut engine = UndoEngine::new();
        engine.begin_group();
        engine.record_checkpoint(&Buffer::from(""), 0);
        engine.record_checkpoint(&Buffer::from("a"), 1);
        engine.record_checkpoint(&Buffer::from("ab"), 2);
        engine.end_group();
        assert_eq!(engine.undo_depth(), 1);
        engine.record_checkpoint(&Buffer::from("abc"), 3);
        assert_eq!(engine.undo_depth(), 2);
    }

    #[test]
    fn new_checkpoint_clears_redo() {
        let mut engine = UndoEngine::new();
        engine.record_checkpoint(&Buffer::from("a"), 0);
        engine.undo(&Buffer::from("b"), 0);
        assert_eq!(engine.redo_depth(), 1);
        engine.record_checkpoint(&Buffer::from("a"), 0);
        assert_eq!(engine.redo_depth(), 0);
    }

    #[test]
    fn history_is_bounded() {
        let mut engine = UndoEngine::new();
        for i in 0..UNDO_HISTORY_MAX + 5 {
            engine.record_checkpoint(&Buffer::from(i.to_string()), 0);
        }
        assert_eq!(engine.undo_depth(), UNDO_HISTORY_MAX);
    }

    #[test]
    fn skip_flag_resets() {
        let mut flags = UndoFlags::default();
        flags.skip();
        assert!(flags.is_skipped());
        flags.reset();
        assert!(!flags.is_skipped());
    }
}
