//! Text object ranges: words, quoted strings and delimited blocks.
//!
//! Every function returns a half-open `Range` of char indices, or `None` when the cursor is
//! not inside a matching object.

use crate::Buffer;
use crate::token::{Tokenizer, tokenize};
use std::ops::Range;

/// `i…` selects the contents, `a…` includes the delimiters (or trailing blanks for words).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectScope {
    Inner,
    Around,
}

/// Opening and closing character for a delimiter key. Brackets map to their pair from either
/// side; anything else is used on both sides.
pub fn delimiters(c: char) -> (char, char) {
    match c {
        '(' | ')' => ('(', ')'),
        '[' | ']' => ('[', ']'),
        '{' | '}' => ('{', '}'),
        '<' | '>' => ('<', '>'),
        other => (other, other),
    }
}

/// `iw`/`aw`/`iW`/`aW`: the token enclosing the cursor. `Around` keeps the blanks that trail
/// the word.
pub fn word_object(
    buf: &Buffer,
    kind: Tokenizer,
    pos: usize,
    scope: ObjectScope,
) -> Option<Range<usize>> {
    let toks = tokenize(buf, kind, pos);
    let tok = toks.current()?;
    let end = match scope {
        ObjectScope::Around => tok.end(),
        ObjectScope::Inner if tok.word_len == 0 => tok.end(),
        ObjectScope::Inner => tok.start + tok.word_len,
    };
    Some(tok.start..end)
}

/// Pair of `quote` characters on the cursor's line that encloses `pos`. Quotes pair up from
/// the start of the line, so the cursor may sit on either quote.
pub fn quote_pair(buf: &Buffer, pos: usize, quote: char) -> Option<(usize, usize)> {
    let line = buf.line_bounds(pos);
    let quotes: Vec<usize> = line
        .filter(|&i| buf.char_at(i) == Some(quote))
        .collect();
    quotes
        .chunks_exact(2)
        .map(|p| (p[0], p[1]))
        .find(|&(open, close)| open <= pos && pos <= close)
}

/// `i"`/`a"`: innermost single- or double-quoted string around the cursor.
pub fn quote_object(buf: &Buffer, pos: usize, scope: ObjectScope) -> Option<Range<usize>> {
    let (open, close) = ['"', '\'']
        .into_iter()
        .filter_map(|q| quote_pair(buf, pos, q))
        .max_by_key(|&(open, _)| open)?;
    Some(scope_range(open, close, scope))
}

/// Delimiter positions enclosing `pos`, honouring nesting for asymmetric pairs.
pub fn enclosing_pair(buf: &Buffer, pos: usize, open: char, close: char) -> Option<(usize, usize)> {
    if open == close {
        return quote_pair(buf, pos, open);
    }
    let mut depth = 0usize;
    let mut opener = None;
    for i in (0..=pos.min(buf.len())).rev() {
        match buf.char_at(i) {
            Some(c) if c == close && i != pos => depth += 1,
            Some(c) if c == open => {
                if depth == 0 {
                    opener = Some(i);
                    break;
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    let opener = opener?;
    let mut depth = 0usize;
    for i in opener + 1..buf.len() {
        match buf.char_at(i) {
            Some(c) if c == open => depth += 1,
            Some(c) if c == close => {
                if depth == 0 {
                    return (i >= pos).then_some((opener, i));
                }
                depth -= 1;
            }
            _ => {}
        }
    }
    None
}

/// `i(`/`a(`/`i"`… for an arbitrary delimiter key.
pub fn pair_object(
    buf: &Buffer,
    pos: usize,
    key: char,
    scope: ObjectScope,
) -> Option<Range<usize>> {
    let (open, close) = delimiters(key);
    let (o, c) = enclosing_pair(buf, pos, open, close)?;
    Some(scope_range(o, c, scope))
}

fn scope_range(open: usize, close: usize, scope: ObjectScope) -> Range<usize> {
    match scope {
        ObjectScope::Inner => open + 1..close,
        ObjectScope::Around => open..close + 1,
    }
}
