//! File watching for the development server.
//!
//! Every relevant change drops the whole cached module. Events that arrive
//! within the debounce window are coalesced into a single regeneration.

use std::path::PathBuf;
use std::sync::mpsc::{self, Receiver, RecvTimeoutError};
use std::time::Duration;

use notify::{Event, EventKind, RecursiveMode, Watcher};
use tracing::{debug, error, info, warn};

use crate::error::{ModuleError, Result};
use crate::plugin::{ChangeOutcome, ContentPlugin, GeneratedModule};

pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(100);

/// Receives the outcome of each regeneration.
pub trait ReloadSink {
    /// Called with the freshly generated module after sources changed.
    fn full_reload(&mut self, module: &GeneratedModule);

    /// Called when regeneration failed. Watching continues.
    fn reload_failed(&mut self, error: &ModuleError);
}

/// Drains `rx` until every sender is gone.
///
/// Access events and paths outside the source roots are ignored.
pub fn process_events<S: ReloadSink>(
    plugin: &mut ContentPlugin,
    rx: &Receiver<notify::Result<Event>>,
    sink: &mut S,
    debounce: Duration,
) -> Result<()> {
    loop {
        let Ok(first) = rx.recv() else {
            return Ok(());
        };
        let mut pending = apply(plugin, first);
        let mut disconnected = false;
        loop {
            match rx.recv_timeout(debounce) {
                Ok(next) => pending |= apply(plugin, next),
                Err(RecvTimeoutError::Timeout) => break,
                Err(RecvTimeoutError::Disconnected) => {
                    disconnected = true;
                    break;
                }
            }
        }
        if pending {
            regenerate(plugin, sink);
        }
        if disconnected {
            return Ok(());
        }
    }
}

/// Watches every existing source root and blocks, reporting reloads to `sink`.
pub fn watch<S: ReloadSink>(
    plugin: &mut ContentPlugin,
    sink: &mut S,
    debounce: Duration,
) -> Result<()> {
    let (tx, rx) = mpsc::channel();
    let mut watcher = notify::recommended_watcher(tx).map_err(|source| ModuleError::Watch {
        path: plugin.sources().root.clone(),
        source,
    })?;

    let roots: Vec<PathBuf> = plugin
        .sources()
        .watch_roots()
        .iter()
        .map(|root| root.to_path_buf())
        .collect();
    for root in &roots {
        if !root.is_dir() {
            warn!(path = %root.display(), "source directory does not exist, not watching");
            continue;
        }
        watcher
            .watch(root, RecursiveMode::Recursive)
            .map_err(|source| ModuleError::Watch {
                path: root.clone(),
                source,
            })?;
        info!(path = %root.display(), "watching");
    }

    process_events(plugin, &rx, sink, debounce)
}

fn apply(plugin: &mut ContentPlugin, event: notify::Result<Event>) -> bool {
    let event = match event {
        Ok(event) => event,
        Err(err) => {
            warn!(error = %err, "file watcher error");
            return false;
        }
    };
    if matches!(event.kind, EventKind::Access(_)) {
        return false;
    }
    let mut reload = false;
    for path in &event.paths {
        if plugin.handle_change(path) == ChangeOutcome::FullReload {
            debug!(path = %path.display(), kind = ?event.kind, "source changed");
            reload = true;
        }
    }
    reload
}

fn regenerate<S: ReloadSink>(plugin: &mut ContentPlugin, sink: &mut S) {
    match plugin.module() {
        Ok(module) => sink.full_reload(module),
        Err(err) => {
            error!(error = %err, "failed to regenerate virtual module");
            sink.reload_failed(&err);
        }
    }
}
