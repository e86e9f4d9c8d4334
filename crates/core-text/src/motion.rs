//! Cursor jump resolvers.
//!
//! Word jumps return a signed *delta* from the cursor; the caller applies it and clamps to
//! the bounds of the current mode. Character and bracket searches return an absolute target
//! or `None` when nothing matches (the motion is then a no-op).

use crate::Buffer;
use crate::token::{Tokenizer, tokenize};

/// `w` / `W`: start of the next token. On the last token the jump lands one past the end of
/// the buffer; command mode clamps that back onto the last character.
pub fn word_start_forward(buf: &Buffer, kind: Tokenizer, pos: usize) -> isize {
    let toks = tokenize(buf, kind, pos);
    let Some(tok) = toks.current() else {
        return 0;
    };
    if toks.is_last() {
        return buf.len() as isize - pos as isize;
    }
    (tok.len - toks.offset) as isize
}

/// `b` / `B`: start of the current word, or of the previous one when already there.
pub fn word_start_backward(buf: &Buffer, kind: Tokenizer, pos: usize) -> isize {
    let toks = tokenize(buf, kind, pos);
    if toks.is_empty() {
        return 0;
    }
    if toks.offset > 0 {
        return -(toks.offset as isize);
    }
    // Blank-only tokens (leading whitespace) are not word starts.
    let mut idx = toks.index;
    while idx > 0 {
        idx -= 1;
        if toks.tokens[idx].word_len > 0 || idx == 0 {
            return toks.tokens[idx].start as isize - pos as isize;
        }
    }
    0
}

/// `e` / `E`: end of the current word, or of the next one when already on (or past) it.
/// Always advances by at least one character unless the cursor is on the final word end.
pub fn word_end_forward(buf: &Buffer, kind: Tokenizer, pos: usize) -> isize {
    let toks = tokenize(buf, kind, pos);
    let Some(tok) = toks.current() else {
        return 0;
    };
    if toks.offset + 1 < tok.word_len {
        return (tok.word_len - toks.offset - 1) as isize;
    }
    match toks.tokens.get(toks.index + 1) {
        Some(next) => (next.start + next.word_len.max(1) - 1) as isize - pos as isize,
        None => 0,
    }
}

/// `ge` / `gE`: end of the previous word. From trailing blanks this is the end of the word
/// the blanks belong to.
pub fn word_end_backward(buf: &Buffer, kind: Tokenizer, pos: usize) -> isize {
    let toks = tokenize(buf, kind, pos);
    let Some(tok) = toks.current() else {
        return 0;
    };
    if toks.offset >= tok.word_len
        && let Some(end) = tok.word_end()
    {
        return end as isize - pos as isize;
    }
    toks.tokens[..toks.index]
        .iter()
        .rev()
        .find_map(|t| t.word_end())
        .map_or(0, |end| end as isize - pos as isize)
}

/// A remembered `f`/`F`/`t`/`T` search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CharFind {
    pub target: char,
    pub forward: bool,
    /// `t`/`T`: stop one character short of the match.
    pub till: bool,
}

impl CharFind {
    /// Same search, opposite direction (`,`).
    pub fn reversed(self) -> Self {
        Self {
            forward: !self.forward,
            ..self
        }
    }
}

/// Find the `count`-th occurrence of the target on the cursor's line. `None` when there are
/// fewer than `count` occurrences.
pub fn find_char(buf: &Buffer, pos: usize, find: CharFind, count: usize) -> Option<usize> {
    let line = buf.line_bounds(pos);
    let count = count.max(1);
    let hit = if find.forward {
        (pos + 1..line.end)
            .filter(|&i| buf.char_at(i) == Some(find.target))
            .nth(count - 1)?
    } else {
        (line.start..pos.min(line.end))
            .rev()
            .filter(|&i| buf.char_at(i) == Some(find.target))
            .nth(count - 1)?
    };
    Some(match (find.till, find.forward) {
        (true, true) => hit - 1,
        (true, false) => hit + 1,
        (false, _) => hit,
    })
}

/// `;` / `,` repetition. A till search sitting right before its target restarts one
/// character further so repeating it keeps moving.
pub fn repeat_find(buf: &Buffer, pos: usize, find: CharFind, count: usize) -> Option<usize> {
    if find.till {
        let neighbour = if find.forward {
            Some(pos + 1)
        } else {
            pos.checked_sub(1)
        };
        if let Some(n) = neighbour
            && buf.char_at(n) == Some(find.target)
        {
            return find_char(buf, n, find, count);
        }
    }
    find_char(buf, pos, find, count)
}

fn bracket_kind(c: char) -> Option<(char, char, bool)> {
    match c {
        '(' => Some(('(', ')', true)),
        '[' => Some(('[', ']', true)),
        '{' => Some(('{', '}', true)),
        ')' => Some(('(', ')', false)),
        ']' => Some(('[', ']', false)),
        '}' => Some(('{', '}', false)),
        _ => None,
    }
}

/// Partner of the bracket under `pos`, honouring nesting.
pub fn matching_bracket(buf: &Buffer, pos: usize) -> Option<usize> {
    let (open, close, forward) = bracket_kind(buf.char_at(pos)?)?;
    let mut depth = 0usize;
    let step = |i: usize| -> Option<usize> {
        if forward {
            (i + 1 < buf.len()).then_some(i + 1)
        } else {
            i.checked_sub(1)
        }
    };
    let (inc, dec) = if forward { (open, close) } else { (close, open) };
    let mut idx = pos;
    while let Some(next) = step(idx) {
        idx = next;
        match buf.char_at(idx) {
            Some(c) if c == inc => depth += 1,
            Some(c) if c == dec => {
                if depth == 0 {
                    return Some(idx);
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// `%`: on a bracket, jump to its partner. Elsewhere, find the nearest closing bracket later
/// on the line and resolve its partner (staying on the closer when it has none).
pub fn bracket_jump(buf: &Buffer, pos: usize) -> Option<usize> {
    if buf.char_at(pos).and_then(bracket_kind).is_some() {
        return matching_bracket(buf, pos);
    }
    let line_end = buf.line_end(pos);
    let closer = (pos + 1..line_end).find(|&i| matches!(buf.char_at(i), Some(')' | ']' | '}')))?;
    Some(matching_bracket(buf, closer).unwrap_or(closer))
}
