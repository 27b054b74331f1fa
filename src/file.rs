// src/file.rs

use std::{
    fs::{self, File},
    io::BufWriter,
    path::{Path, PathBuf},
};

use tracing::debug;

use crate::config::options::ExportOptions;
use crate::csv::write_cases;
use crate::error::ScrapeError;
use crate::specs::cases::CaseRecord;

/// Write the export file described by `export` (path, separator, header policy).
/// Creates missing parent directories and truncates an existing file.
/// Returns the final path written to.
pub fn write_export(export: &ExportOptions, cases: &[CaseRecord]) -> Result<PathBuf, ScrapeError> {
    let path = export.out_path();
    ensure_parent(&path)?;

    let file = File::create(&path).map_err(ScrapeError::io(&path))?;
    write_cases(BufWriter::new(file), cases, export.format.delim(), export.include_headers)
        .map_err(|source| ScrapeError::Csv { path: path.clone(), source })?;

    debug!(rows = cases.len(), "wrote {}", path.display());
    Ok(path)
}

/// `hint` naming a directory (existing, or ending in a separator) resolves to
/// `<hint>/<default_name>`; anything else is taken verbatim.
pub fn resolve_out_path(hint: &Path, default_name: &str) -> PathBuf {
    if looks_like_dir_hint(hint) || hint.is_dir() {
        hint.join(default_name)
    } else {
        hint.to_path_buf()
    }
}

pub fn ensure_parent(path: &Path) -> Result<(), ScrapeError> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => ensure_directory(parent),
        _ => Ok(()),
    }
}

pub fn ensure_directory(dir: &Path) -> Result<(), ScrapeError> {
    if dir.exists() && !dir.is_dir() {
        return Err(ScrapeError::NotADirectory(dir.to_path_buf()));
    }
    if !dir.exists() {
        fs::create_dir_all(dir).map_err(ScrapeError::io(dir))?;
    }
    Ok(())
}

pub fn looks_like_dir_hint(p: &Path) -> bool {
    let s = p.to_string_lossy();
    s.ends_with('/') || s.ends_with('\\')
}
