//! vimline entrypoint: an interactive vi-mode prompt, or a headless replay of scripted keys.
use anyhow::{Context, Result};
use clap::Parser;
use core_actions::{Engine, ExternalEditor, NoRender};
use core_config::{Config, load_from};
use core_events::{KeyCode, KeySource, ScriptedKeys};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::sync::Once;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;

mod key_map;
mod terminal;

use key_map::is_abort;
use terminal::{CookedWhileEditing, LineView, RawMode, TerminalKeys};

const LOG_FILE_NAME: &str = "vimline.log";
const PROMPT: &str = "$ ";

/// CLI arguments.
#[derive(Parser, Debug)]
#[command(name = "vimline", version, about = "vi-mode line editor")]
struct Args {
    /// Configuration file (overrides discovery of `vimline.toml`).
    #[arg(long = "config")]
    config: Option<PathBuf>,
    /// Directory for `vimline.log`.
    #[arg(long = "log-dir", default_value = ".")]
    log_dir: PathBuf,
    /// Initial buffer contents.
    #[arg(long = "text", default_value = "")]
    text: String,
    /// Replay these keys (vi notation, e.g. `<Esc>0dw`) instead of reading the terminal.
    #[arg(long = "keys")]
    keys: Option<String>,
}

fn main() -> Result<ExitCode> {
    let args = Args::parse();
    let _log_guard = configure_logging(&args.log_dir);
    install_panic_hook();

    let config = load_from(args.config.clone())?;
    info!(
        target: "runtime",
        config = config.source.as_ref().map(|p| p.display().to_string()).as_deref(),
        replay = args.keys.is_some(),
        "startup"
    );

    match args.keys.as_deref() {
        Some(keys) => {
            let report = replay(&config, &args.text, keys)?;
            print!("{report}");
            Ok(ExitCode::SUCCESS)
        }
        None => match interactive(&config, &args.text)? {
            Some(line) => {
                println!("{line}");
                Ok(ExitCode::SUCCESS)
            }
            None => Ok(ExitCode::FAILURE),
        },
    }
}

/// File logging; stdout belongs to the editor. A second initialisation is ignored.
fn configure_logging(log_dir: &Path) -> Option<WorkerGuard> {
    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE_NAME);
    let (nb_writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_writer(nb_writer)
        .with_ansi(false)
        .try_init()
        .ok()
        .map(|()| guard)
}

fn install_panic_hook() {
    static HOOK: Once = Once::new();
    HOOK.call_once(|| {
        let default_panic = std::panic::take_hook();
        std::panic::set_hook(Box::new(move |info| {
            tracing::error!(target: "runtime.panic", ?info, "panic");
            default_panic(info);
        }));
    });
}

fn launcher(config: &Config) -> ExternalEditor {
    ExternalEditor::from_env(&config.file.editor.command)
}

/// Run `keys` against `text` without a terminal and describe the final state.
fn replay(config: &Config, text: &str, keys: &str) -> Result<String> {
    let mut source = ScriptedKeys::parse(keys).context("invalid --keys notation")?;
    let mut engine = Engine::from_config(text, config);
    let dispatched = engine.run(&mut source, &mut NoRender, &mut launcher(config));
    info!(target: "runtime", widgets = dispatched.len(), "replay_complete");

    let state = &engine.state;
    let register = state
        .registers
        .unnamed()
        .map(|c| format!("{:?} ({:?})", c.text, c.kind))
        .unwrap_or_else(|| "-".to_string());
    Ok(format!(
        "buffer: {:?}\ncursor: {}\nmode: {:?}\nregister: {register}\n",
        state.buffer.to_string(),
        state.cursor,
        state.mode.mode(),
    ))
}

/// Raw-mode prompt. `Some(line)` on Enter, `None` when aborted.
fn interactive(config: &Config, text: &str) -> Result<Option<String>> {
    let mut engine = Engine::from_config(text, config);
    let mut raw = RawMode::enter().context("enable raw mode")?;
    let mut view = LineView::new(PROMPT, &engine.state.buffer, engine.state.cursor);
    let mut launcher = CookedWhileEditing::new(launcher(config));
    let mut keys = TerminalKeys;
    view.redraw();

    let accepted = loop {
        let Some(key) = keys.next_key() else {
            warn!(target: "runtime", "input_closed");
            break None;
        };
        if is_abort(&key) {
            info!(target: "runtime", "line_aborted");
            break None;
        }
        if key.code == KeyCode::Enter && key.mods.is_empty() && !engine.translator().has_pending() {
            engine.flush(&mut keys, &mut view, &mut launcher);
            info!(target: "runtime", chars = engine.state.buffer.len(), "line_accepted");
            break Some(engine.state.buffer.to_string());
        }
        engine.feed(key, &mut keys, &mut view, &mut launcher);
    };
    view.finish();
    raw.leave()?;
    Ok(accepted)
}
