// Tastier - A single-pass compiler for a stack-based virtual machine
// Copyright (C) 2026  Marcel Joachim Kloubert <marcel@kloubert.dev>
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.  See the
// GNU Affero General Public License for more details.
//
// You should have received a copy of the GNU Affero General Public License
// along with this program.  If not, see <https://www.gnu.org/licenses/>.


//! Source file watching for recompile-on-save.
//!
//! Editors save in different ways: some truncate and rewrite the file, most
//! write a temporary file and rename it over the original. Watching the
//! parent directory and filtering by file name catches both.

use std::io;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver};
use std::time::Duration;

use notify::{Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher};
use thiserror::Error;

/// Changes arriving within this window after the first one are collapsed.
const DEBOUNCE_DURATION: Duration = Duration::from_millis(100);

/// Errors that can occur while watching a source file.
#[derive(Debug, Error)]
pub enum WatchError {
    /// The platform watcher could not be created.
    #[error("failed to create watcher: {0}")]
    Create(#[source] notify::Error),

    /// The source path could not be resolved.
    #[error("cannot resolve {path}: {source}")]
    Resolve {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The directory holding the source could not be watched.
    #[error("failed to watch {path}: {source}")]
    Watch {
        path: PathBuf,
        #[source]
        source: notify::Error,
    },

    /// The watcher reported an error while running.
    #[error("watch error: {0}")]
    Event(#[source] notify::Error),

    /// The watcher stopped delivering events.
    #[error("watch channel closed")]
    Disconnected,
}

/// Watches one source file for changes.
pub struct SourceWatcher {
    _watcher: RecommendedWatcher,
    rx: Receiver<Result<Event, notify::Error>>,
    path: PathBuf,
}

impl SourceWatcher {
    /// Start watching `path`.
    pub fn new(path: &Path) -> Result<Self, WatchError> {
        let (tx, rx) = mpsc::channel();
        let mut watcher = notify::recommended_watcher(tx).map_err(WatchError::Create)?;

        let canonical = path.canonicalize().map_err(|source| WatchError::Resolve {
            path: path.to_path_buf(),
            source,
        })?;
        let directory = canonical.parent().unwrap_or(canonical.as_path()).to_path_buf();
        watcher
            .watch(&directory, RecursiveMode::NonRecursive)
            .map_err(|source| WatchError::Watch {
                path: directory.clone(),
                source,
            })?;
        log::debug!("watching {}", canonical.display());

        Ok(Self {
            _watcher: watcher,
            rx,
            path: canonical,
        })
    }

    /// The watched path, canonicalized.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Block until the watched file changes.
    pub fn wait_for_change(&self) -> Result<(), WatchError> {
        loop {
            let event = self
                .rx
                .recv()
                .map_err(|_| WatchError::Disconnected)?
                .map_err(WatchError::Event)?;

            if !self.is_relevant(&event) {
                continue;
            }

            std::thread::sleep(DEBOUNCE_DURATION);
            while self.rx.try_recv().is_ok() {}
            return Ok(());
        }
    }

    fn is_relevant(&self, event: &Event) -> bool {
        if !matches!(event.kind, EventKind::Modify(_) | EventKind::Create(_)) {
            return false;
        }
        event.paths.iter().any(|p| same_file(p, &self.path))
    }
}

/// Whether `candidate` names the same file as the canonical `watched` path.
///
/// A renamed-over file may not be resolvable yet, so a matching directory
/// and file name is enough.
fn same_file(candidate: &Path, watched: &Path) -> bool {
    let candidate = candidate
        .canonicalize()
        .unwrap_or_else(|_| candidate.to_path_buf());
    if candidate == watched {
        return true;
    }
    candidate.file_name().is_some()
        && candidate.file_name() == watched.file_name()
        && candidate.parent() == watched.parent()
}
