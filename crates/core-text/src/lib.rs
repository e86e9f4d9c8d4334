//! Code-point indexed edit buffer and the pure text algorithms the vi engine runs on.
//!
//! Every index in this crate is a *char* (Unicode scalar) index into the buffer, never a
//! byte offset. The buffer may hold several lines (multi-line input); line-scoped helpers
//! treat `'\n'` as the only line separator.
//!
//! Nothing here knows about modes, registers or selections: callers feed a `Buffer` plus a
//! cursor index and receive deltas, targets or ranges back (see `motion` and `object`).

use ropey::Rope;
use std::fmt;
use std::ops::Range;

pub mod motion;
pub mod object;
pub mod token;

pub use object::ObjectScope;
pub use token::{Token, Tokenizer, Tokens};

/// The live edit buffer, backed by a `ropey::Rope`.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Buffer {
    rope: Rope,
}

impl Buffer {
    /// Number of code points in the buffer.
    pub fn len(&self) -> usize {
        self.rope.len_chars()
    }

    pub fn is_empty(&self) -> bool {
        self.rope.len_chars() == 0
    }

    /// Character under `idx`, `None` past the end.
    pub fn char_at(&self, idx: usize) -> Option<char> {
        (idx < self.len()).then(|| self.rope.char(idx))
    }

    /// Iterate all code points from the start of the buffer.
    pub fn chars(&self) -> impl Iterator<Item = char> + '_ {
        self.rope.chars()
    }

    /// Copy out `range`, clamped to the buffer bounds.
    pub fn slice(&self, range: Range<usize>) -> String {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        self.rope.slice(start..end).to_string()
    }

    /// Insert `text` at `idx` (clamped to the end). Returns the number of code points inserted.
    pub fn insert(&mut self, idx: usize, text: &str) -> usize {
        let idx = idx.min(self.len());
        self.rope.insert(idx, text);
        text.chars().count()
    }

    /// Remove `range` (clamped) and return the removed text.
    pub fn remove(&mut self, range: Range<usize>) -> String {
        let len = self.len();
        let start = range.start.min(len);
        let end = range.end.min(len).max(start);
        let removed = self.rope.slice(start..end).to_string();
        if start < end {
            self.rope.remove(start..end);
        }
        removed
    }

    /// Overwrite the character at `idx`, returning the previous one.
    pub fn replace_char(&mut self, idx: usize, ch: char) -> Option<char> {
        let prev = self.char_at(idx)?;
        if prev != ch {
            self.rope.remove(idx..idx + 1);
            let mut tmp = [0u8; 4];
            self.rope.insert(idx, ch.encode_utf8(&mut tmp));
        }
        Some(prev)
    }

    /// Replace the whole content.
    pub fn set_text(&mut self, text: &str) {
        self.rope = Rope::from_str(text);
    }

    /// Index of the first character of the line containing `pos`.
    pub fn line_start(&self, pos: usize) -> usize {
        let pos = pos.min(self.len());
        let mut chars = self.rope.chars_at(pos);
        let mut idx = pos;
        while let Some(c) = chars.prev() {
            if c == '\n' {
                break;
            }
            idx -= 1;
        }
        idx
    }

    /// Index one past the last character of the line containing `pos` (the `'\n'` itself,
    /// or the buffer length on the last line).
    pub fn line_end(&self, pos: usize) -> usize {
        let pos = pos.min(self.len());
        let mut idx = pos;
        for c in self.rope.chars_at(pos) {
            if c == '\n' {
                break;
            }
            idx += 1;
        }
        idx
    }

    /// Line bounds `[start, end)` of the line containing `pos`, newline excluded.
    pub fn line_bounds(&self, pos: usize) -> Range<usize> {
        self.line_start(pos)..self.line_end(pos)
    }

    /// First non-blank character of the line containing `pos`; the line end when the line
    /// is entirely blank.
    pub fn first_non_blank(&self, pos: usize) -> usize {
        let Range { start, end } = self.line_bounds(pos);
        let mut idx = start;
        for c in self.rope.chars_at(start) {
            if idx >= end || !token::is_blank(c) {
                break;
            }
            idx += 1;
        }
        idx
    }

    /// Convert a char index into a byte offset (clamped).
    pub fn char_to_byte(&self, idx: usize) -> usize {
        self.rope.char_to_byte(idx.min(self.len()))
    }

    /// Convert a byte offset into a char index (clamped).
    pub fn byte_to_char(&self, byte: usize) -> usize {
        self.rope.byte_to_char(byte.min(self.rope.len_bytes()))
    }
}

impl From<&str> for Buffer {
    fn from(content: &str) -> Self {
        Self {
            rope: Rope::from_str(content),
        }
    }
}

impl From<String> for Buffer {
    fn from(content: String) -> Self {
        Self::from(content.as_str())
    }
}

impl fmt::Display for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for chunk in self.rope.chunks() {
            f.write_str(chunk)?;
        }
        Ok(())
    }
}

impl fmt::Debug for Buffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Buffer").field(&self.to_string()).finish()
    }
}
