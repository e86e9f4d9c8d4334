use super::Collaborators;
use core_state::EditorState;
use tracing::{debug, warn};

/// `vi-edit-command-line`: replace the buffer with what the external editor saved. A failed
/// launch, an empty file or unchanged text leave the buffer alone.
pub(crate) fn handle(state: &mut EditorState, cx: &mut Collaborators<'_>) {
    state.iterations.reset();
    let current = state.buffer.to_string();
    let edited = match cx.launcher.edit(&current, &cx.options.file_type) {
        Ok(edited) => edited,
        Err(err) => {
            warn!(target: "actions.external", error = %err, "editor_launch_failed");
            cx.render.hint(&format!("editor failed: {err}"));
            state.undo.skip();
            return;
        }
    };
    // Editors terminate the last line; a single-line buffer should stay single-line.
    let edited = edited.strip_suffix('\n').unwrap_or(&edited);
    if edited.is_empty() || edited == current {
        debug!(target: "actions.external", empty = edited.is_empty(), "editor_result_ignored");
        state.undo.skip();
        return;
    }
    state.buffer.set_text(edited);
    state.exit_visual();
    state.cursor = state.buffer.len();
    state.clamp_cursor();
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::external_editor::{EditorLauncher, LaunchError};
    use crate::hooks::{NoRender, Options};
    use core_events::ScriptedKeys;
    use core_state::UndoEngine;

    struct Fixed(&'static str);

    impl EditorLauncher for Fixed {
        fn edit(&mut self, _text: &str, file_type: &str) -> Result<String, LaunchError> {
            assert_eq!(file_type, "sh");
            Ok(self.0.to_string())
        }
    }

    fn run(text: &str, launcher: &mut dyn EditorLauncher) -> EditorState {
        let mut st = EditorState::new(text);
        let mut keys = ScriptedKeys::default();
        let mut undo = UndoEngine::new();
        let options = Options::default();
        let mut cx = Collaborators {
            keys: &mut keys,
            undo: &mut undo,
            render: &mut NoRender,
            launcher,
            options: &options,
        };
        handle(&mut st, &mut cx);
        st
    }

    #[test]
    fn replaces_buffer_and_drops_final_newline() {
        let st = run("echo hi", &mut Fixed("echo bye\n"));
        assert_eq!(st.buffer.to_string(), "echo bye");
        assert_eq!(st.cursor, 8);
        assert!(!st.undo.is_skipped());
    }

    #[test]
    fn empty_or_unchanged_result_is_ignored() {
        let st = run("echo hi", &mut Fixed(""));
        assert_eq!(st.buffer.to_string(), "echo hi");
        assert!(st.undo.is_skipped());
        let st = run("echo hi", &mut Fixed("echo hi\n"));
        assert!(st.undo.is_skipped());
    }

    #[test]
    fn launch_failure_keeps_buffer() {
        let st = run("echo hi", &mut crate::external_editor::NoEditor);
        assert_eq!(st.buffer.to_string(), "echo hi");
        assert!(st.undo.is_skipped());
    }
}
