//! Vi widgets and the machinery that drives them: key translation, dispatch, the render and
//! external-editor seams.

pub mod dispatcher;
pub mod engine;
pub mod external_editor;
pub mod hooks;
pub mod key_translator;
pub mod widget;

pub use dispatcher::{Collaborators, DispatchOutcome, SEARCH_FAILED_HINT, dispatch};
pub use engine::{Dispatched, Engine};
pub use external_editor::{EditorLauncher, ExternalEditor, LaunchError, NoEditor};
pub use hooks::{NoRender, Options, RenderHook};
pub use key_translator::{KeyTranslator, Translation, keymap_for};
pub use widget::{UnknownWidget, Widget, WidgetGroup};
