// src/config/options.rs
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use super::consts::*;
use crate::error::ScrapeError;

#[derive(Clone, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AppOptions {
    pub browser: BrowserOptions,
    pub scrape: ScrapeOptions,
    pub export: ExportOptions,
}

impl AppOptions {
    /// Read options from a TOML file. Missing keys keep their defaults.
    pub fn load(path: &Path) -> Result<Self, ScrapeError> {
        let text = std::fs::read_to_string(path).map_err(ScrapeError::io(path))?;
        Self::from_toml(&text).map_err(|source| ScrapeError::Config {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn from_toml(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }

    /// Reject options that would only fail later, after the browser is up.
    pub fn validate(&self) -> Result<(), ScrapeError> {
        if self.scrape.url.trim().is_empty() && self.scrape.from_html.is_none() {
            return Err(ScrapeError::MissingUrl);
        }
        if let Some(css) = &self.scrape.wait_for {
            scraper::Selector::parse(css).map_err(|_| ScrapeError::Selector(css.clone()))?;
        }
        Ok(())
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct BrowserOptions {
    /// chromedriver binary to spawn
    pub chromedriver: PathBuf,
    /// Connect to a running WebDriver instead of spawning one
    pub webdriver_url: Option<String>,
    pub port: u16,
    pub headless: bool,
    pub extra_args: Vec<String>,
    pub startup_timeout_secs: u64,
}

impl Default for BrowserOptions {
    fn default() -> Self {
        Self {
            chromedriver: PathBuf::from(DEFAULT_CHROMEDRIVER),
            webdriver_url: None,
            port: DEFAULT_WEBDRIVER_PORT,
            headless: true,
            extra_args: Vec::new(),
            startup_timeout_secs: DRIVER_STARTUP_SECS,
        }
    }
}

impl BrowserOptions {
    /// Chrome command line: headless flag first, fixed args, then user extras.
    pub fn chrome_args(&self) -> Vec<String> {
        let mut args = Vec::with_capacity(1 + CHROME_ARGS.len() + self.extra_args.len());
        if self.headless {
            args.push(s!(HEADLESS_ARG));
        }
        args.extend(CHROME_ARGS.iter().map(|a| s!(*a)));
        args.extend(self.extra_args.iter().cloned());
        args
    }

    pub fn local_url(&self) -> String {
        format!("http://127.0.0.1:{}", self.port)
    }

    pub fn startup_timeout(&self) -> Duration {
        Duration::from_secs(self.startup_timeout_secs)
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ScrapeOptions {
    pub url: String,
    /// Fixed render delay, or the polling budget when `wait_for` is set
    pub wait_secs: u64,
    pub wait_for: Option<String>,
    /// Parse a saved page instead of driving a browser
    pub from_html: Option<PathBuf>,
    pub save_html: Option<PathBuf>,
}

impl Default for ScrapeOptions {
    fn default() -> Self {
        Self {
            url: s!(DEFAULT_URL),
            wait_secs: RENDER_WAIT_SECS,
            wait_for: None,
            from_html: None,
            save_html: None,
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum ExportFormat {
    #[default]
    Csv,
    Tsv,
}

impl ExportFormat {
    pub fn ext(&self) -> &'static str {
        match self { ExportFormat::Csv => "csv", ExportFormat::Tsv => "tsv" }
    }
    pub fn delim(&self) -> u8 {
        match self { ExportFormat::Csv => b',', ExportFormat::Tsv => b'\t' }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ExportOptions {
    pub format: ExportFormat,
    /// File or directory; `None` means `case_history.<ext>` in the working dir
    pub out: Option<PathBuf>,
    pub include_headers: bool,
    pub collapse_ws: bool,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            format: ExportFormat::Csv,
            out: None,
            include_headers: true,
            collapse_ws: false,
        }
    }
}

impl ExportOptions {
    pub fn default_file_name(&self) -> String {
        join!(DEFAULT_FILE_STEM, ".", self.format.ext())
    }

    /// Final file path. A directory (existing, or hinted by a trailing
    /// separator) gets the default file name; a user extension is kept as-is.
    pub fn out_path(&self) -> PathBuf {
        let name = self.default_file_name();
        match &self.out {
            None => PathBuf::from(name),
            Some(p) => crate::file::resolve_out_path(p, &name),
        }
    }
}
