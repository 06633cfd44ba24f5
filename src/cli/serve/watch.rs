//! Rebuild on source changes.
//!
//! ```text
//! notify → Debouncer (timing, dedup) → relevance filter → reload config → build
//! ```

use anyhow::{Context, Result};
use crossbeam::channel::{self, Receiver};
use notify::{RecursiveMode, Watcher};
use rustc_hash::FxHashSet;
use std::{
    path::{Path, PathBuf},
    time::{Duration, Instant},
};

use crate::{
    cli::build::build_site,
    config::{SiteConfig, cfg, clear_clean_flag, reload_config},
    debug, logger,
    utils::path::normalize_path,
};

const DEBOUNCE_MS: u64 = 300;
const REBUILD_COOLDOWN_MS: u64 = 800;

/// Check if path is a temp/backup file (editor artifacts)
fn is_temp_file(path: &Path) -> bool {
    let name = path.file_name().and_then(|n| n.to_str()).unwrap_or("");
    let ext = path.extension().and_then(|e| e.to_str()).unwrap_or("");

    matches!(ext, "bck" | "bak" | "backup" | "swp" | "swo" | "tmp")
        || name.ends_with('~')
        || name.starts_with('.')
}

/// Pure debouncer: collects changed paths until events settle.
struct Debouncer {
    changes: FxHashSet<PathBuf>,
    last_event: Option<Instant>,
    last_build: Option<Instant>,
}

impl Debouncer {
    fn new() -> Self {
        Self {
            changes: FxHashSet::default(),
            last_event: None,
            last_build: None,
        }
    }

    fn add_event(&mut self, event: &notify::Event) {
        use notify::EventKind;

        match event.kind {
            EventKind::Create(_) | EventKind::Remove(_) => {}
            // Ignore metadata-only changes (mtime/atime/chmod noise)
            EventKind::Modify(notify::event::ModifyKind::Metadata(_)) => return,
            EventKind::Modify(_) => {}
            _ => return,
        }

        for path in &event.paths {
            if is_temp_file(path) {
                continue;
            }
            self.changes.insert(normalize_path(path));
            self.last_event = Some(Instant::now());
        }
    }

    fn is_ready(&self) -> bool {
        let Some(last_event) = self.last_event else {
            return false;
        };
        if last_event.elapsed() < Duration::from_millis(DEBOUNCE_MS) {
            return false;
        }
        if let Some(last_build) = self.last_build
            && last_build.elapsed() < Duration::from_millis(REBUILD_COOLDOWN_MS)
        {
            return false;
        }
        !self.changes.is_empty()
    }

    fn take_if_ready(&mut self) -> Option<Vec<PathBuf>> {
        if !self.is_ready() {
            return None;
        }
        self.last_event = None;
        self.last_build = Some(Instant::now());
        Some(self.changes.drain().collect())
    }

    /// Sleep until the next moment the batch could be ready.
    fn sleep_duration(&self) -> Duration {
        let Some(last_event) = self.last_event else {
            return Duration::from_secs(86400);
        };

        let debounce_remaining =
            Duration::from_millis(DEBOUNCE_MS).saturating_sub(last_event.elapsed());
        let cooldown_remaining = self
            .last_build
            .map(|t| Duration::from_millis(REBUILD_COOLDOWN_MS).saturating_sub(t.elapsed()))
            .unwrap_or(Duration::ZERO);

        debounce_remaining
            .max(cooldown_remaining)
            .max(Duration::from_millis(1))
    }
}

/// Whether a changed path affects the generated site.
///
/// Anything inside the output directory is the build's own writing.
fn is_relevant(path: &Path, config: &SiteConfig) -> bool {
    if path.starts_with(&config.build.output) {
        return false;
    }
    path.starts_with(&config.build.public)
        || config.source_files().iter().any(|source| source == path)
}

/// Watch the project root until shutdown is signalled.
pub fn run(shutdown_rx: &Receiver<()>) -> Result<()> {
    let root = cfg().get_root().to_path_buf();
    let (notify_tx, notify_rx) = channel::unbounded::<notify::Result<notify::Event>>();

    let mut watcher = notify::recommended_watcher(move |res| {
        let _ = notify_tx.send(res);
    })
    .context("Failed to create file watcher")?;
    watcher
        .watch(&root, RecursiveMode::Recursive)
        .with_context(|| format!("Failed to watch {}", root.display()))?;
    debug!("watch"; "watching {}", root.display());

    let mut debouncer = Debouncer::new();
    loop {
        channel::select! {
            recv(shutdown_rx) -> _ => return Ok(()),
            recv(notify_rx) -> msg => match msg {
                Ok(Ok(event)) => debouncer.add_event(&event),
                Ok(Err(e)) => crate::log!("watch"; "notify error: {}", e),
                Err(_) => return Ok(()),
            },
            default(debouncer.sleep_duration()) => {
                if let Some(changes) = debouncer.take_if_ready() {
                    on_change(&changes);
                }
            }
        }
    }
}

/// Rebuild after a settled batch of changes.
fn on_change(changes: &[PathBuf]) {
    let config = cfg();
    let relevant: Vec<_> = changes
        .iter()
        .filter(|path| is_relevant(path, &config))
        .collect();
    let Some(first) = relevant.first() else {
        return;
    };
    for path in &relevant {
        debug!("watch"; "changed: {}", path.display());
    }

    let config_changed = match reload_config() {
        // Reloading re-applies `--clean`; only a failed build may clean again
        Ok(true) => {
            if crate::core::is_healthy() {
                clear_clean_flag();
            }
            true
        }
        Ok(false) => false,
        Err(e) => {
            logger::status_error("config error, keeping previous config", &format!("{e:#}"));
            return;
        }
    };

    let config = cfg();
    if !config_changed && relevant.iter().all(|path| **path == config.config_path) {
        logger::status_unchanged("folio.toml unchanged");
        return;
    }

    match build_site(&config, true) {
        Ok(_) => {
            crate::core::record_build_success();
            clear_clean_flag();
            let what = if config_changed {
                "folio.toml".to_string()
            } else if relevant.len() == 1 {
                config.root_relative(first).display().to_string()
            } else {
                format!("{} files", relevant.len())
            };
            logger::status_success(&format!("rebuilt: {what}"));
        }
        Err(e) => {
            crate::core::record_build_failure(format!("{e:#}"));
            logger::status_error("build failed", &format!("{e:#}"));
        }
    }
}
