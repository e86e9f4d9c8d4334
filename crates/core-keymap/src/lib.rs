//! core-keymap: key sequence → widget name tables for the four vi keymaps.
//!
//! Design principles:
//! - Pure and deterministic: resolution depends only on the pending key buffer.
//! - Each keymap compiles its bindings into a trie; later bindings override earlier ones
//!   on the same sequence (user overrides are appended last).
//! - Widget names are plain strings here; the action layer validates them.
//! - No side effects: logging only at TRACE for traversal steps.

use core_events::{KeyEvent, KeyNotationError, parse_keys};
use smallvec::SmallVec;
use std::fmt;
use std::str::FromStr;
use tracing::trace;

mod defaults;

pub use defaults::vi_defaults;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeymapId {
    Vicmd,
    Viins,
    Visual,
    Viopp,
}

impl KeymapId {
    pub const ALL: [KeymapId; 4] = [Self::Vicmd, Self::Viins, Self::Visual, Self::Viopp];

    pub fn name(self) -> &'static str {
        match self {
            Self::Vicmd => "vicmd",
            Self::Viins => "viins",
            Self::Visual => "visual",
            Self::Viopp => "viopp",
        }
    }
}

impl fmt::Display for KeymapId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for KeymapId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|id| id.name() == s)
            .ok_or_else(|| format!("unknown keymap {s}"))
    }
}

// -------------------------------------------------------------------------------------------------
// Mapping Specification
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MappingSpec {
    pub sequence: Vec<KeyEvent>,
    pub widget: String,
}

impl MappingSpec {
    /// Build from key notation (`"g~"`, `"<C-r>"`).
    pub fn parse(notation: &str, widget: &str) -> Result<Self, KeyNotationError> {
        Ok(Self {
            sequence: parse_keys(notation)?,
            widget: widget.to_string(),
        })
    }
}

// -------------------------------------------------------------------------------------------------
// Trie Representation
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone)]
struct Edge {
    key: KeyEvent,
    next: usize,
}

#[derive(Debug, Clone)]
struct Node {
    terminal: Option<usize>, // index into mappings vec
    edges: SmallVec<[Edge; 4]>,
}

impl Node {
    fn new() -> Self {
        Self {
            terminal: None,
            edges: SmallVec::new(),
        }
    }
}

#[derive(Debug, Clone)]
struct MappingTrie {
    nodes: Vec<Node>,
}

impl MappingTrie {
    fn build(specs: &[MappingSpec]) -> Self {
        let mut trie = MappingTrie {
            nodes: vec![Node::new()],
        };
        for (idx, m) in specs.iter().enumerate() {
            if m.sequence.is_empty() {
                continue;
            }
            let mut cur = 0usize;
            for key in &m.sequence {
                let next = if let Some(e) = trie.nodes[cur].edges.iter().find(|e| e.key == *key) {
                    e.next
                } else {
                    let new_idx = trie.nodes.len();
                    trie.nodes.push(Node::new());
                    trie.nodes[cur].edges.push(Edge {
                        key: *key,
                        next: new_idx,
                    });
                    new_idx
                };
                cur = next;
            }
            if trie.nodes[cur].terminal.is_some() {
                trace!(target: "input.map", mapping_index = idx, node = cur, "terminal_override");
            }
            trie.nodes[cur].terminal = Some(idx);
        }
        trie
    }
}

// -------------------------------------------------------------------------------------------------
// Resolution Result
// -------------------------------------------------------------------------------------------------
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The first `consumed` keys name `widget`. `ambiguous` means every pending key was
    /// consumed and a longer binding could still follow.
    Matched {
        consumed: usize,
        widget: String,
        ambiguous: bool,
    },
    /// Strict prefix of one or more bindings.
    NeedMore,
    /// No binding starts with these keys; the first key is returned for literal handling.
    FallbackLiteral(KeyEvent),
}

/// One keymap: its bindings plus the compiled trie.
#[derive(Debug, Clone)]
pub struct Keymap {
    specs: Vec<MappingSpec>,
    trie: MappingTrie,
}

impl Keymap {
    pub fn new(specs: Vec<MappingSpec>) -> Self {
        let trie = MappingTrie::build(&specs);
        Self { specs, trie }
    }

    /// Add (or override) a binding.
    pub fn bind(&mut self, sequence: Vec<KeyEvent>, widget: impl Into<String>) {
        self.specs.push(MappingSpec {
            sequence,
            widget: widget.into(),
        });
        self.trie = MappingTrie::build(&self.specs);
    }

    pub fn bind_notation(&mut self, notation: &str, widget: &str) -> Result<(), KeyNotationError> {
        self.bind(parse_keys(notation)?, widget);
        Ok(())
    }

    pub fn bindings(&self) -> &[MappingSpec] {
        &self.specs
    }

    /// Widget bound to exactly `sequence`.
    pub fn lookup(&self, sequence: &[KeyEvent]) -> Option<&str> {
        match self.resolve(sequence) {
            Resolution::Matched {
                consumed, widget, ..
            } if consumed == sequence.len() => self
                .specs
                .iter()
                .rev()
                .find(|s| s.widget == widget && s.sequence == sequence)
                .map(|s| s.widget.as_str()),
            _ => None,
        }
    }

    pub fn resolve(&self, buffer: &[KeyEvent]) -> Resolution {
        let nodes = &self.trie.nodes;
        let mut node_idx = 0usize;
        let mut walked = 0usize;
        let mut last_terminal: Option<(usize, usize)> = None; // (consumed, mapping index)
        for (i, key) in buffer.iter().enumerate() {
            let Some(edge) = nodes[node_idx].edges.iter().find(|e| e.key == *key) else {
                break;
            };
            node_idx = edge.next;
            walked = i + 1;
            trace!(target: "input.map", step = i, key = %key, node = node_idx, "advance");
            if let Some(mi) = nodes[node_idx].terminal {
                last_terminal = Some((i + 1, mi));
            }
        }
        let extendable = walked == buffer.len() && !nodes[node_idx].edges.is_empty();
        if let Some((consumed, mi)) = last_terminal {
            Resolution::Matched {
                consumed,
                widget: self.specs[mi].widget.clone(),
                ambiguous: consumed == buffer.len() && extendable,
            }
        } else if buffer.is_empty() || extendable {
            Resolution::NeedMore
        } else {
            Resolution::FallbackLiteral(buffer[0])
        }
    }
}

/// The four vi keymaps.
#[derive(Debug, Clone)]
pub struct Keymaps {
    vicmd: Keymap,
    viins: Keymap,
    visual: Keymap,
    viopp: Keymap,
}

impl Keymaps {
    pub fn new(vicmd: Keymap, viins: Keymap, visual: Keymap, viopp: Keymap) -> Self {
        Self {
            vicmd,
            viins,
            visual,
            viopp,
        }
    }

    pub fn get(&self, id: KeymapId) -> &Keymap {
        match id {
            KeymapId::Vicmd => &self.vicmd,
            KeymapId::Viins => &self.viins,
            KeymapId::Visual => &self.visual,
            KeymapId::Viopp => &self.viopp,
        }
    }

    pub fn get_mut(&mut self, id: KeymapId) -> &mut Keymap {
        match id {
            KeymapId::Vicmd => &mut self.vicmd,
            KeymapId::Viins => &mut self.viins,
            KeymapId::Visual => &mut self.visual,
            KeymapId::Viopp => &mut self.viopp,
        }
    }
}

impl Default for Keymaps {
    fn default() -> Self {
        vi_defaults()
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use core_events::KeyCode;
    use pretty_assertions::assert_eq;

    fn keys(notation: &str) -> Vec<KeyEvent> {
        parse_keys(notation).unwrap()
    }

    fn small() -> Keymap {
        Keymap::new(vec![
            MappingSpec::parse("w", "vi-forward-word").unwrap(),
            MappingSpec::parse("c", "vi-change").unwrap(),
            MappingSpec::parse("cs", "vi-change-surround").unwrap(),
            MappingSpec::parse("ge", "vi-backward-word-end").unwrap(),
        ])
    }

    #[test]
    fn single_key_match() {
        assert_eq!(
            small().resolve(&keys("w")),
            Resolution::Matched {
                consumed: 1,
                widget: "vi-forward-word".into(),
                ambiguous: false
            }
        );
    }

    #[test]
    fn exact_match_that_is_also_prefix_is_ambiguous() {
        assert_eq!(
            small().resolve(&keys("c")),
            Resolution::Matched {
                consumed: 1,
                widget: "vi-change".into(),
                ambiguous: true
            }
        );
    }

    #[test]
    fn non_extending_key_settles_shorter_match() {
        assert_eq!(
            small().resolve(&keys("cw")),
            Resolution::Matched {
                consumed: 1,
                widget: "vi-change".into(),
                ambiguous: false
            }
        );
        assert_eq!(
            small().resolve(&keys("cs")),
            Resolution::Matched {
                consumed: 2,
                widget: "vi-change-surround".into(),
                ambiguous: false
            }
        );
    }

    #[test]
    fn prefix_without_terminal_needs_more() {
        assert_eq!(small().resolve(&keys("g")), Resolution::NeedMore);
        assert_eq!(small().resolve(&[]), Resolution::NeedMore);
    }

    #[test]
    fn dead_end_falls_back_to_first_key() {
        assert_eq!(
            small().resolve(&keys("z")),
            Resolution::FallbackLiteral(KeyEvent::char('z'))
        );
        assert_eq!(
            small().resolve(&keys("gx")),
            Resolution::FallbackLiteral(KeyEvent::char('g'))
        );
    }

    #[test]
    fn later_binding_overrides() {
        let mut km = small();
        km.bind_notation("w", "vi-forward-blank-word").unwrap();
        assert_eq!(km.lookup(&keys("w")), Some("vi-forward-blank-word"));
        km.bind(vec![KeyEvent::plain(KeyCode::Esc)], "vi-cmd-mode");
        assert_eq!(km.lookup(&keys("<Esc>")), Some("vi-cmd-mode"));
        assert_eq!(km.lookup(&keys("g")), None);
    }

    #[test]
    fn keymap_ids_round_trip_names() {
        for id in KeymapId::ALL {
            assert_eq!(id.name().parse::<KeymapId>(), Ok(id));
        }
        assert!("emacs".parse::<KeymapId>().is_err());
    }
}
