// src/error.rs
use std::{io, path::PathBuf, process::ExitStatus};

use thiserror::Error;
use thirtyfour::error::WebDriverError;

#[derive(Debug, Error)]
pub enum ScrapeError {
    #[error("failed to launch chromedriver `{}`", path.display())]
    DriverLaunch {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("chromedriver `{}` exited during startup ({status})", path.display())]
    DriverExited { path: PathBuf, status: ExitStatus },

    #[error("port {0} is already taken; stop whatever listens there or pick another --port")]
    PortInUse(u16),

    #[error("chromedriver did not accept connections on port {port} within {secs}s")]
    DriverStartup { port: u16, secs: u64 },

    #[error("webdriver session failed")]
    WebDriver(#[from] WebDriverError),

    #[error("I/O error on {}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("path exists but is not a directory: {}", .0.display())]
    NotADirectory(PathBuf),

    #[error("invalid config file {}", path.display())]
    Config {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    #[error("failed to write table to {}", path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: ::csv::Error,
    },

    #[error("invalid CSS selector `{0}`")]
    Selector(String),

    #[error("no page URL configured")]
    MissingUrl,
}

impl ScrapeError {
    pub(crate) fn io(path: impl Into<PathBuf>) -> impl FnOnce(io::Error) -> Self {
        let path = path.into();
        move |source| ScrapeError::Io { path, source }
    }
}
