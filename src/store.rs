// src/store.rs
//! Rendered page snapshots. Saving one lets a later run (or a test) replay the
//! exact HTML the browser produced without starting Chrome again.

use std::{fs, path::{Path, PathBuf}};

use crate::config::consts::{SNAPSHOT_FILE, STORE_DIR};
use crate::error::ScrapeError;
use crate::file::{ensure_parent, resolve_out_path};

pub fn default_snapshot_path() -> PathBuf {
    PathBuf::from(STORE_DIR).join(SNAPSHOT_FILE)
}

/// Write `html` to `path` (a directory gets `page.html`). Returns the file written.
pub fn save_snapshot(path: &Path, html: &str) -> Result<PathBuf, ScrapeError> {
    let path = resolve_out_path(path, SNAPSHOT_FILE);
    ensure_parent(&path)?;
    fs::write(&path, html).map_err(ScrapeError::io(&path))?;
    Ok(path)
}

pub fn load_snapshot(path: &Path) -> Result<String, ScrapeError> {
    fs::read_to_string(path).map_err(ScrapeError::io(path))
}
