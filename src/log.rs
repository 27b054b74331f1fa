// src/log.rs
use std::{fs::OpenOptions, path::Path, sync::Mutex};

use tracing_subscriber::{EnvFilter, fmt, prelude::*};

use crate::{error::ScrapeError, file::ensure_parent};

const DEFAULT_FILTER: &str = "clb_scrape=info,warn";
const VERBOSE_FILTER: &str = "clb_scrape=debug,info";

/// Install the global subscriber: stderr always, plus an append-only plain-text
/// file when `log_file` is given. `RUST_LOG` wins over `verbose` when set.
pub fn init(verbose: bool, log_file: Option<&Path>) -> Result<(), ScrapeError> {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if verbose { VERBOSE_FILTER } else { DEFAULT_FILTER }));

    let file_layer = match log_file {
        Some(path) => {
            ensure_parent(path)?;
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .map_err(ScrapeError::io(path))?;
            Some(fmt::layer().with_ansi(false).with_writer(Mutex::new(file)))
        }
        None => None,
    };

    // A second init (tests, embedding) keeps the first subscriber.
    let _ = tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(file_layer)
        .try_init();
    Ok(())
}
