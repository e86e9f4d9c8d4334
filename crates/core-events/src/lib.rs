//! Key event types and key sources for the vi engine.
//!
//! Keys reach the engine through a [`KeySource`]: the interactive binary wraps the terminal,
//! tests and replay mode use [`ScriptedKeys`] built from vi key notation (`"d2w<Esc>"`).

use std::collections::VecDeque;
use std::fmt;

mod notation;

pub use notation::{KeyNotationError, parse_keys};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub mods: KeyModifiers,
}

/// Normalized logical keys. Printable keys, including space, are `Char`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeyCode {
    Char(char),
    Enter,
    Esc,
    Backspace,
    Delete,
    Tab,
    Up,
    Down,
    Left,
    Right,
    Home,
    End,
}

bitflags::bitflags! {
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
    pub struct KeyModifiers: u8 {
        const CTRL = 0b0000_0001;
        const ALT  = 0b0000_0010;
        const SHIFT= 0b0000_0100;
    }
}

impl KeyEvent {
    pub const fn new(code: KeyCode, mods: KeyModifiers) -> Self {
        Self { code, mods }
    }

    /// Unmodified key.
    pub const fn plain(code: KeyCode) -> Self {
        Self::new(code, KeyModifiers::empty())
    }

    pub const fn char(c: char) -> Self {
        Self::plain(KeyCode::Char(c))
    }

    pub const fn ctrl(c: char) -> Self {
        Self::new(KeyCode::Char(c), KeyModifiers::CTRL)
    }

    pub fn is_escape(&self) -> bool {
        self.code == KeyCode::Esc
    }

    /// The literal character this key types, if any. Shift is folded into the character
    /// itself; Ctrl/Alt chords are not literal input.
    pub fn as_char(&self) -> Option<char> {
        match self.code {
            KeyCode::Char(c) if !self.mods.intersects(KeyModifiers::CTRL | KeyModifiers::ALT) => {
                Some(c)
            }
            KeyCode::Tab if self.mods.is_empty() => Some('\t'),
            _ => None,
        }
    }

    /// Drop the Shift bit on printable keys (`Shift+a` arrives as `A` already).
    pub fn normalized(self) -> Self {
        match self.code {
            KeyCode::Char(_) => Self::new(self.code, self.mods - KeyModifiers::SHIFT),
            _ => self,
        }
    }
}

/// Renders in vi key notation, e.g. `x`, `<C-r>`, `<Esc>`, `<lt>`.
impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self.code {
            KeyCode::Char(c) if self.mods.is_empty() || self.mods == KeyModifiers::SHIFT => {
                return match c {
                    '<' => f.write_str("<lt>"),
                    ' ' => f.write_str("<Space>"),
                    c => write!(f, "{c}"),
                };
            }
            KeyCode::Char(' ') => "Space".to_string(),
            KeyCode::Char('<') => "lt".to_string(),
            KeyCode::Char(c) => c.to_string(),
            KeyCode::Enter => "CR".to_string(),
            KeyCode::Esc => "Esc".to_string(),
            KeyCode::Backspace => "BS".to_string(),
            KeyCode::Delete => "Del".to_string(),
            KeyCode::Tab => "Tab".to_string(),
            KeyCode::Up => "Up".to_string(),
            KeyCode::Down => "Down".to_string(),
            KeyCode::Left => "Left".to_string(),
            KeyCode::Right => "Right".to_string(),
            KeyCode::Home => "Home".to_string(),
            KeyCode::End => "End".to_string(),
        };
        f.write_str("<")?;
        if self.mods.contains(KeyModifiers::CTRL) {
            f.write_str("C-")?;
        }
        if self.mods.contains(KeyModifiers::ALT) {
            f.write_str("A-")?;
        }
        if self.mods.contains(KeyModifiers::SHIFT) && !matches!(self.code, KeyCode::Char(_)) {
            f.write_str("S-")?;
        }
        write!(f, "{name}>")
    }
}

/// Outcome of reading one argument key (find target, replacement, surround delimiter).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ArgKey {
    Key(char),
    Cancelled,
}

impl ArgKey {
    /// Escape, an exhausted source and non-literal keys all cancel. Enter is a newline.
    pub fn from_key(key: Option<KeyEvent>) -> Self {
        let Some(key) = key else {
            return Self::Cancelled;
        };
        if key.code == KeyCode::Enter && key.mods.is_empty() {
            return Self::Key('\n');
        }
        key.as_char().map_or(Self::Cancelled, Self::Key)
    }
}

/// Blocking supplier of keys. `None` means the source is exhausted (end of script, closed
/// terminal); readers treat it like an escape.
pub trait KeySource {
    fn next_key(&mut self) -> Option<KeyEvent>;
}

/// Pre-recorded keys, consumed front to back.
#[derive(Debug, Default, Clone)]
pub struct ScriptedKeys {
    queue: VecDeque<KeyEvent>,
}

impl ScriptedKeys {
    pub fn new(keys: impl IntoIterator<Item = KeyEvent>) -> Self {
        Self {
            queue: keys.into_iter().collect(),
        }
    }

    /// Build from vi key notation.
    pub fn parse(notation: &str) -> Result<Self, KeyNotationError> {
        Ok(Self::new(parse_keys(notation)?))
    }

    pub fn push(&mut self, key: KeyEvent) {
        self.queue.push_back(key);
    }

    pub fn remaining(&self) -> usize {
        self.queue.len()
    }
}

impl KeySource for ScriptedKeys {
    fn next_key(&mut self) -> Option<KeyEvent> {
        self.queue.pop_front()
    }
}
