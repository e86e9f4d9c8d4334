//! Configuration loading and parsing.
//!
//! Parses `vimline.toml` (or an override path provided by the binary):
//! cursor shapes per mode, numbered register ring size, external editor
//! fallback and per-keymap binding overrides. Every field has a default; a
//! missing file or a parse error yields `Config::default()`. Unknown fields
//! are ignored so the file can grow without breaking older builds.

use anyhow::Result;
use core_keymap::{KeymapId, Keymaps};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::{fs, path::PathBuf};
use tracing::{info, warn};

pub const CONFIG_FILE_NAME: &str = "vimline.toml";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CursorShape {
    #[default]
    Block,
    Beam,
    Underline,
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct CursorConfig {
    #[serde(default = "CursorConfig::default_insert")]
    pub insert: CursorShape,
    #[serde(default)]
    pub command: CursorShape,
    #[serde(default)]
    pub visual: CursorShape,
    #[serde(default = "CursorConfig::default_pending")]
    pub pending: CursorShape,
}

impl Default for CursorConfig {
    fn default() -> Self {
        Self {
            insert: Self::default_insert(),
            command: CursorShape::Block,
            visual: CursorShape::Block,
            pending: Self::default_pending(),
        }
    }
}

impl CursorConfig {
    const fn default_insert() -> CursorShape {
        CursorShape::Beam
    }
    const fn default_pending() -> CursorShape {
        CursorShape::Underline
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct RegistersConfig {
    #[serde(default = "RegistersConfig::default_numbered")]
    pub numbered: usize,
}

impl Default for RegistersConfig {
    fn default() -> Self {
        Self {
            numbered: Self::default_numbered(),
        }
    }
}

impl RegistersConfig {
    const fn default_numbered() -> usize {
        10
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct EditorConfig {
    /// Used when neither `$VISUAL` nor `$EDITOR` is set.
    #[serde(default = "EditorConfig::default_command")]
    pub command: String,
    /// Extension of the temp file handed to the editor.
    #[serde(default = "EditorConfig::default_file_type")]
    pub file_type: String,
}

impl Default for EditorConfig {
    fn default() -> Self {
        Self {
            command: Self::default_command(),
            file_type: Self::default_file_type(),
        }
    }
}

impl EditorConfig {
    fn default_command() -> String {
        "vi".to_string()
    }
    fn default_file_type() -> String {
        "sh".to_string()
    }
}

#[derive(Debug, Deserialize, Default, Clone, PartialEq, Eq)]
pub struct ConfigFile {
    #[serde(default)]
    pub cursor: CursorConfig,
    #[serde(default)]
    pub registers: RegistersConfig,
    #[serde(default)]
    pub editor: EditorConfig,
    /// `[keymap.<id>]` tables: key notation -> widget name.
    #[serde(default)]
    pub keymap: BTreeMap<String, BTreeMap<String, String>>,
}

#[derive(Debug, Clone, Default)]
pub struct Config {
    pub raw: Option<String>, // original file string (optional)
    pub file: ConfigFile,    // parsed (or default) data
    pub source: Option<PathBuf>,
}

/// Best-effort config path: `./vimline.toml`, then the platform config dir.
pub fn discover() -> PathBuf {
    let local = PathBuf::from(CONFIG_FILE_NAME);
    if local.exists() {
        return local;
    }
    if let Some(dir) = dirs::config_dir() {
        return dir.join("vimline").join(CONFIG_FILE_NAME);
    }
    local
}

pub fn load_from(path: Option<PathBuf>) -> Result<Config> {
    let path = path.unwrap_or_else(discover);
    let Ok(content) = fs::read_to_string(&path) else {
        info!(target: "config", path = %path.display(), "config_missing_using_defaults");
        return Ok(Config::default());
    };
    match toml::from_str::<ConfigFile>(&content) {
        Ok(file) => {
            info!(target: "config", path = %path.display(), "config_loaded");
            Ok(Config {
                raw: Some(content),
                file,
                source: Some(path),
            })
        }
        Err(err) => {
            warn!(target: "config", path = %path.display(), error = %err, "config_parse_failed_using_defaults");
            Ok(Config::default())
        }
    }
}

impl Config {
    /// Ring size for the numbered registers, clamped to `1..=10`.
    pub fn numbered_registers(&self) -> usize {
        self.file.registers.numbered.clamp(1, 10)
    }

    /// Append the `[keymap.*]` overrides to `maps`. Entries naming an unknown keymap, an
    /// unknown widget (per `is_widget`) or invalid key notation are skipped with a warning.
    /// Returns the number of bindings applied.
    pub fn apply_keymap_overrides(
        &self,
        maps: &mut Keymaps,
        is_widget: impl Fn(&str) -> bool,
    ) -> usize {
        let mut applied = 0;
        for (map_name, bindings) in &self.file.keymap {
            let Ok(id) = map_name.parse::<KeymapId>() else {
                warn!(target: "config", keymap = %map_name, "keymap_override_unknown_keymap");
                continue;
            };
            for (notation, widget) in bindings {
                if !is_widget(widget) {
                    warn!(target: "config", keymap = %id, %notation, %widget, "keymap_override_unknown_widget");
                    continue;
                }
                match maps.get_mut(id).bind_notation(notation, widget) {
                    Ok(()) => applied += 1,
                    Err(err) => {
                        warn!(target: "config", keymap = %id, %notation, error = %err, "keymap_override_bad_notation")
                    }
                }
            }
        }
        applied
    }
}
