//! Register store.
//!
//! Writes go to the armed register when one is set (`"a`), otherwise to the default register.
//! Every write except the black hole also updates the default register and unshifts the
//! numbered ring. Arming is single-shot: the next save or paste disarms it.

use std::collections::VecDeque;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegisterKind {
    #[default]
    Charwise,
    Linewise,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct RegisterContent {
    pub text: String,
    pub kind: RegisterKind,
}

impl RegisterContent {
    pub fn new(text: impl Into<String>, kind: RegisterKind) -> Self {
        Self {
            text: text.into(),
            kind,
        }
    }

    pub fn is_linewise(&self) -> bool {
        self.kind == RegisterKind::Linewise
    }
}

/// Default numbered ring capacity (`"0`..`"9`).
pub const NUMBERED_MAX: usize = 10;

pub const DEFAULT_REGISTER: char = '"';
pub const BLACK_HOLE: char = '_';

#[derive(Debug, Clone)]
pub struct Registers {
    unnamed: Option<RegisterContent>,
    numbered: VecDeque<RegisterContent>, // newest at index 0
    named: [Option<RegisterContent>; 26],
    armed: Option<char>,
    capacity: usize,
}

impl Default for Registers {
    fn default() -> Self {
        Self::with_capacity(NUMBERED_MAX)
    }
}

impl Registers {
    /// Ring capacity is clamped to `1..=10`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            unnamed: None,
            numbered: VecDeque::new(),
            named: std::array::from_fn(|_| None),
            armed: None,
            capacity: capacity.clamp(1, NUMBERED_MAX),
        }
    }

    pub fn is_valid_key(key: char) -> bool {
        key == DEFAULT_REGISTER || key == BLACK_HOLE || key.is_ascii_alphanumeric()
    }

    /// Arm `key` for the next save/paste. Keys outside the whitelist are ignored.
    pub fn arm(&mut self, key: char) -> bool {
        if !Self::is_valid_key(key) {
            debug!(target: "state.registers", key = %key.escape_debug(), "register_key_rejected");
            return false;
        }
        self.armed = Some(key);
        true
    }

    pub fn armed(&self) -> Option<char> {
        self.armed
    }

    pub fn disarm(&mut self) {
        self.armed = None;
    }

    /// Store yanked or deleted text.
    pub fn save(&mut self, text: impl Into<String>, kind: RegisterKind) {
        let target = self.armed.take();
        let text = text.into();
        if text.is_empty() || target == Some(BLACK_HOLE) {
            return;
        }
        let mut content = RegisterContent { text, kind };
        if let Some(key) = target
            && let Some(idx) = named_index(key)
        {
            let append = key.is_ascii_uppercase();
            match &mut self.named[idx] {
                Some(existing) if append => {
                    existing.text.push_str(&content.text);
                    if content.is_linewise() {
                        existing.kind = RegisterKind::Linewise;
                    }
                    content = existing.clone();
                }
                slot => *slot = Some(content.clone()),
            }
        }
        debug!(
            target: "state.registers",
            register = %target.unwrap_or(DEFAULT_REGISTER),
            kind = ?content.kind,
            chars = content.text.chars().count(),
            "register_write"
        );
        self.unshift_numbered(content.clone());
        self.unnamed = Some(content);
    }

    /// Content of the armed register (or the default one) for insertion. Disarms.
    pub fn paste(&mut self) -> Option<RegisterContent> {
        let key = self.armed.take().unwrap_or(DEFAULT_REGISTER);
        self.get(key).cloned()
    }

    /// Read a register without disarming.
    pub fn get(&self, key: char) -> Option<&RegisterContent> {
        match key {
            DEFAULT_REGISTER => self.unnamed.as_ref(),
            BLACK_HOLE => None,
            d if d.is_ascii_digit() => self.numbered.get(d as usize - '0' as usize),
            c => named_index(c).and_then(|i| self.named[i].as_ref()),
        }
    }

    pub fn unnamed(&self) -> Option<&RegisterContent> {
        self.unnamed.as_ref()
    }

    /// Numbered ring, newest first.
    pub fn numbered(&self) -> impl Iterator<Item = &RegisterContent> {
        self.numbered.iter()
    }

    /// Non-empty named registers (a-z).
    pub fn named_snapshot(&self) -> Vec<(char, &RegisterContent)> {
        self.named
            .iter()
            .enumerate()
            .filter_map(|(i, slot)| slot.as_ref().map(|c| ((b'a' + i as u8) as char, c)))
            .collect()
    }

    fn unshift_numbered(&mut self, content: RegisterContent) {
        if self.numbered.len() == self.capacity {
            self.numbered.pop_back();
        }
        self.numbered.push_front(content);
    }
}

fn named_index(c: char) -> Option<usize> {
    c.is_ascii_alphabetic()
        .then(|| (c.to_ascii_lowercase() as u8 - b'a') as usize)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_save_and_paste() {
        let mut regs = Registers::default();
        regs.save("abc", RegisterKind::Charwise);
        assert_eq!(
            regs.paste(),
            Some(RegisterContent::new("abc", RegisterKind::Charwise))
        );
        assert_eq!(regs.get('0').map(|c| c.text.as_str()), Some("abc"));
    }

    #[test]
    fn named_register_replace_and_append() {
        let mut regs = Registers::default();
        assert!(regs.arm('a'));
        regs.save("one", RegisterKind::Charwise);
        assert_eq!(regs.armed(), None, "save disarms");
        regs.arm('A');
        regs.save("two\n", RegisterKind::Linewise);
        let a = regs.get('a').unwrap();
        assert_eq!(a.text, "onetwo\n");
        assert!(a.is_linewise());
        // Default mirrors the full appended content.
        assert_eq!(regs.unnamed().unwrap().text, "onetwo\n");
        regs.arm('a');
        regs.save("three", RegisterKind::Charwise);
        assert_eq!(regs.get('A').unwrap().text, "three");
    }

    #[test]
    fn invalid_keys_are_ignored() {
        let mut regs = Registers::default();
        regs.arm('b');
        assert!(!regs.arm('%'));
        assert_eq!(regs.armed(), Some('b'));
    }

    #[test]
    fn black_hole_discards() {
        let mut regs = Registers::default();
        regs.save("keep", RegisterKind::Charwise);
        regs.arm('_');
        regs.save("gone", RegisterKind::Charwise);
        assert_eq!(regs.unnamed().unwrap().text, "keep");
        assert_eq!(regs.numbered().count(), 1);
        regs.arm('_');
        assert_eq!(regs.paste(), None);
    }

    #[test]
    fn numbered_ring_rotates_newest_first() {
        let mut regs = Registers::with_capacity(3);
        for word in ["a", "b", "c", "d"] {
            regs.save(word, RegisterKind::Charwise);
        }
        let ring: Vec<&str> = regs.numbered().map(|c| c.text.as_str()).collect();
        assert_eq!(ring, vec!["d", "c", "b"]);
        regs.arm('2');
        assert_eq!(regs.paste().unwrap().text, "b");
        assert_eq!(regs.get('3'), None);
    }

    #[test]
    fn paste_from_empty_register_is_none_and_disarms() {
        let mut regs = Registers::default();
        regs.arm('q');
        assert_eq!(regs.paste(), None);
        assert_eq!(regs.armed(), None);
    }
}
