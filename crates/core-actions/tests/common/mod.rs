#![allow(dead_code)] // Each test binary uses a subset of these helpers.

use core_actions::{EditorLauncher, Engine, NoEditor, RenderHook};
use core_config::{Config, CursorShape};
use core_events::ScriptedKeys;
use core_state::{Mode, RegisterContent, RegisterKind};
use core_text::Buffer;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderEvent {
    Mode(Mode, CursorShape),
    Cursor(usize),
    Edit(String, usize),
    Hint(String),
}

#[derive(Debug, Default)]
pub struct RecordingRender {
    pub events: Vec<RenderEvent>,
}

impl RenderHook for RecordingRender {
    fn mode_changed(&mut self, mode: Mode, shape: CursorShape) {
        self.events.push(RenderEvent::Mode(mode, shape));
    }

    fn cursor_moved(&mut self, cursor: usize) {
        self.events.push(RenderEvent::Cursor(cursor));
    }

    fn buffer_edited(&mut self, buffer: &Buffer, cursor: usize) {
        self.events.push(RenderEvent::Edit(buffer.to_string(), cursor));
    }

    fn hint(&mut self, message: &str) {
        self.events.push(RenderEvent::Hint(message.to_string()));
    }
}

/// Engine plus recording collaborators, driven by key notation.
pub struct Session {
    pub engine: Engine,
    pub render: RecordingRender,
    pub launcher: Box<dyn EditorLauncher>,
}

impl Session {
    /// Fresh session: insert mode, cursor after the text.
    pub fn insert(text: &str) -> Self {
        Self::from_engine(Engine::new(text))
    }

    /// Command mode with the cursor at `cursor`.
    pub fn command(text: &str, cursor: usize) -> Self {
        let mut engine = Engine::new(text);
        engine.state.enter_command();
        engine.state.cursor = cursor;
        engine.state.clamp_cursor();
        Self::from_engine(engine)
    }

    pub fn with_config(text: &str, cfg: &Config) -> Self {
        let mut engine = Engine::from_config(text, cfg);
        engine.state.enter_command();
        engine.state.cursor = 0;
        Self::from_engine(engine)
    }

    fn from_engine(engine: Engine) -> Self {
        Self {
            engine,
            render: RecordingRender::default(),
            launcher: Box::new(NoEditor),
        }
    }

    pub fn with_launcher(mut self, launcher: impl EditorLauncher + 'static) -> Self {
        self.launcher = Box::new(launcher);
        self
    }

    pub fn keys(&mut self, notation: &str) -> &mut Self {
        let mut source = ScriptedKeys::parse(notation).expect("valid key notation");
        self.engine
            .run(&mut source, &mut self.render, self.launcher.as_mut());
        self
    }

    pub fn text(&self) -> String {
        self.engine.state.buffer.to_string()
    }

    pub fn cursor(&self) -> usize {
        self.engine.state.cursor
    }

    pub fn mode(&self) -> Mode {
        self.engine.state.mode.mode()
    }

    pub fn unnamed(&self) -> Option<RegisterContent> {
        self.engine.state.registers.unnamed().cloned()
    }

    pub fn register(&self, key: char) -> Option<RegisterContent> {
        self.engine.state.registers.get(key).cloned()
    }
}

/// Command-mode session at `cursor` after replaying `keys`.
pub fn run(text: &str, cursor: usize, keys: &str) -> Session {
    let mut s = Session::command(text, cursor);
    s.keys(keys);
    s
}

pub fn charwise(text: &str) -> Option<RegisterContent> {
    Some(RegisterContent::new(text, RegisterKind::Charwise))
}

pub fn linewise(text: &str) -> Option<RegisterContent> {
    Some(RegisterContent::new(text, RegisterKind::Linewise))
}
