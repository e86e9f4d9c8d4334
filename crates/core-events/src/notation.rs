//! vi key notation parser: `"d2w"`, `"<C-r>a"`, `"ci(<Esc>"`.

use crate::{KeyCode, KeyEvent, KeyModifiers};
use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum KeyNotationError {
    #[error("unknown key name <{0}>")]
    UnknownKey(String),
    #[error("modifier without key in <{0}>")]
    MissingKey(String),
}

/// Longest bracketed name we look for; anything longer is taken literally.
const MAX_NAME: usize = 12;

pub fn parse_keys(notation: &str) -> Result<Vec<KeyEvent>, KeyNotationError> {
    let chars: Vec<char> = notation.chars().collect();
    let mut out = Vec::with_capacity(chars.len());
    let mut i = 0;
    while i < chars.len() {
        let c = chars[i];
        if c == '<'
            && let Some(close) = bracket_end(&chars[i + 1..])
        {
            let name: String = chars[i + 1..i + 1 + close].iter().collect();
            out.push(parse_named(&name)?);
            i += close + 2;
            continue;
        }
        out.push(KeyEvent::char(c));
        i += 1;
    }
    Ok(out)
}

/// Offset of the `>` closing a bracketed key name, if the text after `<` looks like one.
fn bracket_end(rest: &[char]) -> Option<usize> {
    let close = rest.iter().take(MAX_NAME + 1).position(|&c| c == '>')?;
    let name = &rest[..close];
    (!name.is_empty() && name.iter().all(|c| !c.is_whitespace() && *c != '<')).then_some(close)
}

fn parse_named(name: &str) -> Result<KeyEvent, KeyNotationError> {
    let mut mods = KeyModifiers::empty();
    let mut rest = name;
    loop {
        let Some((prefix, tail)) = rest.split_once('-') else {
            break;
        };
        let flag = match prefix {
            "C" | "c" => KeyModifiers::CTRL,
            "A" | "a" | "M" | "m" => KeyModifiers::ALT,
            "S" | "s" => KeyModifiers::SHIFT,
            _ => break,
        };
        // `<C-->` leaves "-" as the key; a bare `<C->` has none.
        if tail.is_empty() {
            return Err(KeyNotationError::MissingKey(name.to_string()));
        }
        mods |= flag;
        rest = tail;
    }

    let mut chars = rest.chars();
    if let (Some(c), None) = (chars.next(), chars.next()) {
        let c = if mods.contains(KeyModifiers::SHIFT) {
            mods -= KeyModifiers::SHIFT;
            c.to_ascii_uppercase()
        } else {
            c
        };
        return Ok(KeyEvent::new(KeyCode::Char(c), mods));
    }

    let code = match rest.to_ascii_lowercase().as_str() {
        "esc" => KeyCode::Esc,
        "cr" | "enter" | "return" => KeyCode::Enter,
        "bs" | "backspace" => KeyCode::Backspace,
        "del" | "delete" => KeyCode::Delete,
        "tab" => KeyCode::Tab,
        "up" => KeyCode::Up,
        "down" => KeyCode::Down,
        "left" => KeyCode::Left,
        "right" => KeyCode::Right,
        "home" => KeyCode::Home,
        "end" => KeyCode::End,
        "space" => KeyCode::Char(' '),
        "lt" => KeyCode::Char('<'),
        "gt" => KeyCode::Char('>'),
        "bar" => KeyCode::Char('|'),
        "bslash" => KeyCode::Char('\\'),
        _ => return Err(KeyNotationError::UnknownKey(name.to_string())),
    };
    Ok(KeyEvent::new(code, mods))
}
