//! Replay a scripted key-event stream against a shortcut set
//!
//! Debugging tool for shortcut configurations: loads a YAML shortcut set,
//! registers every entry with a recording handler, then drives the
//! dispatcher with a JSON event script on a simulated clock so sequence
//! timeouts replay deterministically.
//!
//! ```text
//! replay --shortcuts samples/shortcuts.yaml --script samples/script.json
//! ```

use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Deserialize;
use tracing_subscriber::EnvFilter;

use keyroute::{config, DispatchResult, FocusTarget, KeyEvent, ShortcutEngine};

#[derive(Parser)]
#[command(
    name = "replay",
    about = "Replay a scripted key-event stream against a shortcut set"
)]
struct Args {
    /// Shortcut set (YAML)
    #[arg(long)]
    shortcuts: PathBuf,

    /// Scripted key events (JSON array)
    #[arg(long)]
    script: PathBuf,
}

/// One scripted key-down event
#[derive(Debug, Deserialize)]
struct ScriptedEvent {
    /// Key name ("g", "escape", "enter", ...)
    key: String,
    #[serde(default)]
    ctrl: bool,
    #[serde(default)]
    shift: bool,
    #[serde(default)]
    alt: bool,
    #[serde(default)]
    meta: bool,
    /// Focus role the event targets ("none", "text_input", ...)
    #[serde(default)]
    target: FocusTarget,
    /// Milliseconds elapsed since the previous event
    #[serde(default)]
    delay_ms: u64,
    /// Switch the active context before dispatching this event
    #[serde(default)]
    set_context: Option<String>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();

    let args = Args::parse();

    let parsed = config::load_shortcuts_file(&args.shortcuts)
        .with_context(|| format!("loading shortcuts from {}", args.shortcuts.display()))?;
    let script = std::fs::read_to_string(&args.script)
        .with_context(|| format!("reading script from {}", args.script.display()))?;
    let events: Vec<ScriptedEvent> =
        serde_json::from_str(&script).context("parsing event script")?;

    let mut engine = ShortcutEngine::new();
    let fired: Rc<RefCell<Vec<String>>> = Rc::new(RefCell::new(Vec::new()));

    for entry in parsed {
        let log = Rc::clone(&fired);
        let id = entry
            .id
            .clone()
            .unwrap_or_else(|| entry.trigger.signature());
        let (definition, context, priority) =
            entry.bind(Box::new(move || log.borrow_mut().push(id.clone())));
        engine.register_scoped(definition, context, priority);
    }
    println!(
        "{} shortcuts registered from {}",
        engine.registry().len(),
        args.shortcuts.display()
    );

    let mut now = Instant::now();
    for (index, scripted) in events.iter().enumerate() {
        now += Duration::from_millis(scripted.delay_ms);
        if let Some(context) = &scripted.set_context {
            engine.set_active_context(context.clone());
        }

        let key = config::parse_key_code(&scripted.key.to_lowercase())?;
        let event = KeyEvent {
            key,
            ctrl: scripted.ctrl,
            shift: scripted.shift,
            alt: scripted.alt,
            meta: scripted.meta,
            target: scripted.target,
        };

        let result = engine.dispatch_at(&event, now);
        let outcome = match result {
            DispatchResult::Fired { prevent_default } => {
                let ids = fired.borrow_mut().drain(..).collect::<Vec<_>>().join(", ");
                if ids.is_empty() {
                    // Built-in help keys fire without a registered handler
                    format!(
                        "fired built-in (help {})",
                        if engine.help_visible() { "shown" } else { "hidden" }
                    )
                } else if prevent_default {
                    format!("fired {ids}")
                } else {
                    format!("fired {ids} (default kept)")
                }
            }
            DispatchResult::AwaitMore => {
                format!(
                    "pending sequence [{}]",
                    engine.pending_sequence().unwrap_or_default()
                )
            }
            DispatchResult::NoMatch => "no match".to_string(),
        };
        println!(
            "#{index:<3} {:<10} ctx={:<12} {outcome}",
            scripted.key,
            engine.active_context()
        );
    }

    Ok(())
}
