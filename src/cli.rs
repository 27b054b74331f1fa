// src/cli.rs
use std::path::PathBuf;

use clap::Parser;
use color_eyre::eyre::{Result, WrapErr};

use crate::config::options::{AppOptions, ExportFormat};
use crate::error::ScrapeError;
use crate::progress::{Progress, Stage};
use crate::{log, scrape, store};

/// Scrape the China Labour Bulletin strike map case list into CSV.
///
/// Settings are layered: built-in defaults, then `--config <file.toml>`,
/// then the flags below.
#[derive(Parser, Debug)]
#[command(name = "clb_scrape", version)]
pub struct Args {
    /// TOML file with [browser], [scrape] and [export] tables
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Page to load
    #[arg(long)]
    pub url: Option<String>,

    /// Output file, or a directory to hold case_history.<ext>
    #[arg(short, long)]
    pub out: Option<PathBuf>,

    #[arg(long, value_enum)]
    pub format: Option<ExportFormat>,

    /// Omit the header row
    #[arg(long, overrides_with = "headers")]
    pub no_headers: bool,

    /// Write the header row even if the config file turns it off
    #[arg(long, overrides_with = "no_headers")]
    pub headers: bool,

    /// Collapse whitespace runs inside text fields
    #[arg(long, overrides_with = "no_collapse_ws")]
    pub collapse_ws: bool,

    /// Keep text fields as rendered
    #[arg(long, overrides_with = "collapse_ws")]
    pub no_collapse_ws: bool,

    /// chromedriver binary to spawn
    #[arg(long, env = "CLB_CHROMEDRIVER")]
    pub chromedriver: Option<PathBuf>,

    /// Use a running WebDriver server instead of spawning chromedriver
    #[arg(long)]
    pub webdriver_url: Option<String>,

    /// Port for the spawned chromedriver
    #[arg(long)]
    pub port: Option<u16>,

    /// Show the browser window
    #[arg(long, overrides_with = "headless")]
    pub no_headless: bool,

    /// Run Chrome headless even if the config file turns it off
    #[arg(long, overrides_with = "no_headless")]
    pub headless: bool,

    /// Extra Chrome argument (repeatable)
    #[arg(long = "chrome-arg", value_name = "ARG", allow_hyphen_values = true)]
    pub chrome_args: Vec<String>,

    /// Seconds to let the page render (poll budget with --wait-for)
    #[arg(short, long, value_name = "SECS")]
    pub wait: Option<u64>,

    /// Poll for this CSS selector instead of sleeping the full wait
    #[arg(long, value_name = "CSS")]
    pub wait_for: Option<String>,

    /// Parse a saved page instead of starting a browser
    #[arg(long, value_name = "FILE")]
    pub from_html: Option<PathBuf>,

    /// Save the rendered page (default .store/page.html)
    #[arg(long, value_name = "PATH", num_args = 0..=1)]
    pub save_html: Option<Option<PathBuf>>,

    /// Debug-level logging
    #[arg(short, long)]
    pub verbose: bool,

    /// Also append log lines to this file
    #[arg(long, value_name = "FILE")]
    pub log_file: Option<PathBuf>,
}

impl Args {
    /// Defaults, then the config file (if any), then flags.
    pub fn to_options(&self) -> Result<AppOptions, ScrapeError> {
        let mut opts = match &self.config {
            Some(path) => AppOptions::load(path)?,
            None => AppOptions::default(),
        };
        self.apply(&mut opts);
        Ok(opts)
    }

    fn apply(&self, opts: &mut AppOptions) {
        let b = &mut opts.browser;
        if let Some(v) = &self.chromedriver { b.chromedriver = v.clone(); }
        if let Some(v) = &self.webdriver_url { b.webdriver_url = Some(v.clone()); }
        if let Some(v) = self.port { b.port = v; }
        if let Some(v) = flag(self.headless, self.no_headless) { b.headless = v; }
        b.extra_args.extend(self.chrome_args.iter().cloned());

        let s = &mut opts.scrape;
        if let Some(v) = &self.url { s.url = v.clone(); }
        if let Some(v) = self.wait { s.wait_secs = v; }
        if let Some(v) = &self.wait_for { s.wait_for = Some(v.clone()); }
        if let Some(v) = &self.from_html { s.from_html = Some(v.clone()); }
        if let Some(v) = &self.save_html {
            s.save_html = Some(v.clone().unwrap_or_else(store::default_snapshot_path));
        }

        let e = &mut opts.export;
        if let Some(v) = self.format { e.format = v; }
        if let Some(v) = &self.out { e.out = Some(v.clone()); }
        if let Some(v) = flag(self.headers, self.no_headers) { e.include_headers = v; }
        if let Some(v) = flag(self.collapse_ws, self.no_collapse_ws) { e.collapse_ws = v; }
    }
}

/// `--x` / `--no-x` pair; clap keeps only the last one given.
fn flag(on: bool, off: bool) -> Option<bool> {
    match (on, off) {
        (true, _) => Some(true),
        (_, true) => Some(false),
        _ => None,
    }
}

/// Stage lines on stderr, so stdout only carries the result.
#[derive(Default)]
pub struct CliProgress {
    total: usize,
    step: usize,
}

impl Progress for CliProgress {
    fn begin(&mut self, total: usize) {
        self.total = total;
        self.step = 0;
    }

    fn stage(&mut self, stage: Stage) {
        self.step += 1;
        eprintln!("[{}/{}] {}…", self.step, self.total.max(self.step), stage.label());
    }

    fn log(&mut self, msg: &str) {
        eprintln!("      {msg}");
    }
}

pub fn run() -> Result<()> {
    run_with_args(Args::parse())
}

pub fn run_with_args(args: Args) -> Result<()> {
    log::init(args.verbose, args.log_file.as_deref()).wrap_err("could not set up logging")?;
    let opts = args.to_options().wrap_err("could not load options")?;

    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .wrap_err("could not start async runtime")?;

    let mut progress = CliProgress::default();
    let summary = rt
        .block_on(scrape::run(&opts, Some(&mut progress)))
        .wrap_err_with(|| format!("scrape of {} failed", opts.scrape.url))?;

    println!("Data saved to {} ({} cases)", summary.path.display(), summary.cases);
    Ok(())
}
