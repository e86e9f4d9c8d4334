//! Buffer tokenizers used by the word motions and word text objects.
//!
//! A token is a run of "word" characters followed by any blanks that trail it, so every
//! character of the buffer belongs to exactly one token. Two tokenizers exist:
//! * `Word`: punctuation breaks words. A run of one repeated punctuation character is its
//!   own token (`..` stays together, `.,` splits).
//! * `BlankWord`: only whitespace separates tokens (vi `W`/`B`/`E`).

use crate::Buffer;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tokenizer {
    Word,
    BlankWord,
}

/// One token: `len` code points starting at `start`, the first `word_len` of which are
/// non-blank.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub start: usize,
    pub len: usize,
    pub word_len: usize,
}

impl Token {
    fn open(start: usize) -> Self {
        Self {
            start,
            len: 0,
            word_len: 0,
        }
    }

    /// One past the last code point of the token (trailing blanks included).
    pub fn end(&self) -> usize {
        self.start + self.len
    }

    /// Index of the last non-blank character, `None` for a blank-only token.
    pub fn word_end(&self) -> Option<usize> {
        (self.word_len > 0).then(|| self.start + self.word_len - 1)
    }
}

/// Tokenized buffer plus the location of the cursor inside it.
///
/// When the cursor sits past the end of the buffer (insert mode), `index` is the last token
/// and `offset` equals that token's length.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tokens {
    pub tokens: Vec<Token>,
    pub index: usize,
    pub offset: usize,
}

impl Tokens {
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    pub fn current(&self) -> Option<&Token> {
        self.tokens.get(self.index)
    }

    pub fn is_last(&self) -> bool {
        self.index + 1 >= self.tokens.len()
    }
}

pub fn is_blank(c: char) -> bool {
    matches!(c, ' ' | '\t' | '\n' | '\r')
}

/// Punctuation that breaks `Word` tokens. Underscore is a word character.
pub fn is_punct(c: char) -> bool {
    c.is_ascii_punctuation() && c != '_'
}

pub fn tokenize(buf: &Buffer, kind: Tokenizer, pos: usize) -> Tokens {
    let mut tokens: Vec<Token> = Vec::new();
    let mut prev: Option<char> = None;
    // True once the current token can no longer be extended by a word character.
    let mut closed = false;
    let mut cursor: Option<(usize, usize)> = None;

    for (i, c) in buf.chars().enumerate() {
        if is_blank(c) {
            if tokens.is_empty() {
                tokens.push(Token::open(i));
            }
            if let Some(tok) = tokens.last_mut() {
                tok.len += 1;
            }
            closed = true;
        } else if kind == Tokenizer::Word && is_punct(c) {
            if tokens.is_empty() || prev != Some(c) {
                tokens.push(Token::open(i));
            }
            if let Some(tok) = tokens.last_mut() {
                tok.len += 1;
                tok.word_len = tok.len;
            }
            closed = true;
        } else {
            if tokens.is_empty() || closed {
                tokens.push(Token::open(i));
            }
            if let Some(tok) = tokens.last_mut() {
                tok.len += 1;
                tok.word_len = tok.len;
            }
            closed = false;
        }
        if i == pos {
            let index = tokens.len() - 1;
            cursor = Some((index, i - tokens[index].start));
        }
        prev = Some(c);
    }

    let (index, offset) = match cursor {
        Some(found) => found,
        None => match tokens.last() {
            Some(last) => (tokens.len() - 1, last.len),
            None => (0, 0),
        },
    };
    Tokens {
        tokens,
        index,
        offset,
    }
}
