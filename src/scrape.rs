// src/scrape.rs
use std::path::PathBuf;

use tracing::{info, warn};

use crate::{
    config::options::{AppOptions, ScrapeOptions},
    core::browser::{ChromeSource, PageSource, SnapshotSource, Wait},
    error::ScrapeError,
    file,
    progress::{Progress, Stage},
    specs::cases::{self, CaseRecord},
    store,
};

/// What a run produced.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RunSummary {
    pub path: PathBuf,
    pub cases: usize,
}

/// The page source chosen by the options: a saved snapshot or a live browser.
pub enum Source {
    Chrome(ChromeSource),
    Snapshot(SnapshotSource),
}

impl Source {
    pub async fn open(opts: &AppOptions) -> Result<Self, ScrapeError> {
        match &opts.scrape.from_html {
            Some(path) => Ok(Source::Snapshot(SnapshotSource::new(path))),
            None => ChromeSource::start(&opts.browser).await.map(Source::Chrome),
        }
    }
}

impl PageSource for Source {
    fn name(&self) -> &'static str {
        match self {
            Source::Chrome(s) => s.name(),
            Source::Snapshot(s) => s.name(),
        }
    }

    async fn fetch(&mut self, url: &str, wait: &Wait) -> Result<String, ScrapeError> {
        match self {
            Source::Chrome(s) => s.fetch(url, wait).await,
            Source::Snapshot(s) => s.fetch(url, wait).await,
        }
    }

    async fn close(self) -> Result<(), ScrapeError> {
        match self {
            Source::Chrome(s) => s.close().await,
            Source::Snapshot(s) => s.close().await,
        }
    }
}

/// Fetch the configured page, optionally keep a snapshot, and extract cases.
pub async fn collect_cases<S: PageSource>(
    source: &mut S,
    scrape: &ScrapeOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<Vec<CaseRecord>, ScrapeError> {
    if let Some(p) = progress.as_deref_mut() {
        p.stage(Stage::Load);
    }
    let wait = Wait::from_options(scrape);
    let html = source.fetch(&scrape.url, &wait).await?;

    if let Some(path) = &scrape.save_html {
        let saved = store::save_snapshot(path, &html)?;
        info!("page snapshot saved to {}", saved.display());
        if let Some(p) = progress.as_deref_mut() {
            p.log(&format!("Snapshot: {}", saved.display()));
        }
    }

    if let Some(p) = progress.as_deref_mut() {
        p.stage(Stage::Parse);
    }
    let found = cases::extract_cases(&html);
    if found.is_empty() {
        warn!(
            "no `{}` elements in the {} page; the page may not have finished rendering or its structure changed",
            cases::CASE_ITEM,
            source.name()
        );
    } else {
        info!("extracted {} cases", found.len());
    }
    Ok(found)
}

/// Full run with a live browser or snapshot, as the options say.
pub async fn run(
    opts: &AppOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary, ScrapeError> {
    opts.validate()?;

    if let Some(p) = progress.as_deref_mut() {
        p.begin(Stage::ALL.len());
        p.stage(Stage::Open);
    }
    let source = match Source::open(opts).await {
        Ok(s) => s,
        Err(e) => {
            if let Some(p) = progress.as_deref_mut() {
                p.finish();
            }
            return Err(e);
        }
    };
    run_with(source, opts, progress).await
}

/// Run against an already-open source. The source is closed whether or not
/// collecting succeeded; a close failure after a good fetch is only logged.
pub async fn run_with<S: PageSource>(
    mut source: S,
    opts: &AppOptions,
    mut progress: Option<&mut (dyn Progress + '_)>,
) -> Result<RunSummary, ScrapeError> {
    let collected = collect_cases(&mut source, &opts.scrape, progress.as_deref_mut()).await;
    let closed = source.close().await;

    let mut found = match collected {
        Ok(found) => found,
        Err(e) => {
            if let Err(close_err) = closed {
                warn!("closing page source also failed: {close_err}");
            }
            if let Some(p) = progress.as_deref_mut() {
                p.finish();
            }
            return Err(e);
        }
    };
    if let Err(e) = closed {
        warn!("closing page source failed: {e}");
    }

    if opts.export.collapse_ws {
        found.iter_mut().for_each(CaseRecord::collapse_ws);
    }

    if let Some(p) = progress.as_deref_mut() {
        p.stage(Stage::Write);
    }
    let written = file::write_export(&opts.export, &found);

    if let Some(p) = progress.as_deref_mut() {
        p.finish();
    }
    let path = written?;
    info!("wrote {} cases to {}", found.len(), path.display());

    Ok(RunSummary { path, cases: found.len() })
}
