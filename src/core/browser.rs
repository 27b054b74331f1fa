// src/core/browser.rs
//! Where rendered page HTML comes from.
//!
//! `ChromeSource` drives a headless Chrome through chromedriver and hands back
//! the page source once the page has had time to render.
//! `SnapshotSource` replays a page saved earlier, so parsing and export can run
//! without a browser.

use std::{
    path::{Path, PathBuf},
    process::Stdio,
    time::Duration,
};

use thirtyfour::{By, ChromiumLikeCapabilities, DesiredCapabilities, WebDriver};
use tokio::{
    net::TcpStream,
    process::{Child, Command},
    time::{Instant, sleep},
};
use tracing::{debug, info, warn};

use crate::config::consts::{DRIVER_PROBE_MS, RENDER_POLL_MS};
use crate::config::options::{BrowserOptions, ScrapeOptions};
use crate::error::ScrapeError;
use crate::store;

/// How to decide the page has rendered.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Wait {
    /// Sleep unconditionally.
    Fixed(Duration),
    /// Poll for a selector; on timeout carry on with whatever is there.
    Until { selector: String, timeout: Duration },
}

impl Wait {
    pub fn from_options(scrape: &ScrapeOptions) -> Self {
        let budget = Duration::from_secs(scrape.wait_secs);
        match &scrape.wait_for {
            Some(css) => Wait::Until { selector: css.clone(), timeout: budget },
            None => Wait::Fixed(budget),
        }
    }
}

#[allow(async_fn_in_trait)]
pub trait PageSource {
    /// Short name for logs.
    fn name(&self) -> &'static str;

    /// Load `url`, wait per `wait`, and return the rendered HTML.
    async fn fetch(&mut self, url: &str, wait: &Wait) -> Result<String, ScrapeError>;

    /// Release the browser (or whatever backs the source).
    async fn close(self) -> Result<(), ScrapeError>;
}

/* ---------- Chrome over WebDriver ---------- */

pub struct ChromeSource {
    driver: WebDriver,
    // Present only when we spawned chromedriver ourselves
    child: Option<Child>,
}

impl ChromeSource {
    pub async fn start(opts: &BrowserOptions) -> Result<Self, ScrapeError> {
        let (server_url, child) = match &opts.webdriver_url {
            Some(url) => {
                info!("connecting to WebDriver at {url}");
                (url.clone(), None)
            }
            None => {
                // A listener already on the port would take our session instead.
                if port_open(opts.port).await {
                    return Err(ScrapeError::PortInUse(opts.port));
                }
                let mut child = spawn_chromedriver(opts)?;
                wait_for_port(&mut child, &opts.chromedriver, opts.port, opts.startup_timeout())
                    .await?;
                (opts.local_url(), Some(child))
            }
        };

        let mut caps = DesiredCapabilities::chrome();
        for arg in opts.chrome_args() {
            caps.add_arg(&arg)?;
        }
        debug!(args = ?opts.chrome_args(), "chrome capabilities");

        // `child` is kill_on_drop, so an early return here also stops the driver.
        let driver = WebDriver::new(&server_url, caps).await?;
        info!("browser session open via {server_url}");
        Ok(Self { driver, child })
    }

    async fn wait_until(&self, selector: &str, timeout: Duration) -> Result<(), ScrapeError> {
        let deadline = Instant::now() + timeout;
        loop {
            if !self.driver.find_all(By::Css(selector)).await?.is_empty() {
                debug!("`{selector}` present");
                return Ok(());
            }
            if Instant::now() >= deadline {
                warn!("`{selector}` not present after {}s; parsing the page as rendered so far", timeout.as_secs());
                return Ok(());
            }
            sleep(Duration::from_millis(RENDER_POLL_MS)).await;
        }
    }
}

impl PageSource for ChromeSource {
    fn name(&self) -> &'static str { "chrome" }

    async fn fetch(&mut self, url: &str, wait: &Wait) -> Result<String, ScrapeError> {
        info!("loading {url}");
        self.driver.goto(url).await?;

        match wait {
            Wait::Fixed(d) => {
                debug!("waiting {}s for client-side rendering", d.as_secs());
                sleep(*d).await;
            }
            Wait::Until { selector, timeout } => self.wait_until(selector, *timeout).await?,
        }

        let html = self.driver.source().await?;
        debug!(bytes = html.len(), "page source captured");
        Ok(html)
    }

    async fn close(self) -> Result<(), ScrapeError> {
        let quit = self.driver.quit().await;
        if let Some(mut child) = self.child {
            if let Err(e) = child.kill().await {
                warn!("could not stop chromedriver: {e}");
            }
        }
        quit.map_err(ScrapeError::from)
    }
}

fn spawn_chromedriver(opts: &BrowserOptions) -> Result<Child, ScrapeError> {
    info!("starting {} on port {}", opts.chromedriver.display(), opts.port);
    Command::new(&opts.chromedriver)
        .arg(format!("--port={}", opts.port))
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .kill_on_drop(true)
        .spawn()
        .map_err(|source| ScrapeError::DriverLaunch {
            path: opts.chromedriver.clone(),
            source,
        })
}

async fn port_open(port: u16) -> bool {
    TcpStream::connect(("127.0.0.1", port)).await.is_ok()
}

/// Probe the port until chromedriver accepts connections.
/// Fails at once if the spawned process has already exited.
async fn wait_for_port(
    child: &mut Child,
    path: &Path,
    port: u16,
    timeout: Duration,
) -> Result<(), ScrapeError> {
    let deadline = Instant::now() + timeout;
    loop {
        let exited = child.try_wait().map_err(|source| ScrapeError::DriverLaunch {
            path: path.to_path_buf(),
            source,
        })?;
        if let Some(status) = exited {
            return Err(ScrapeError::DriverExited { path: path.to_path_buf(), status });
        }
        if port_open(port).await {
            return Ok(());
        }
        if Instant::now() >= deadline {
            return Err(ScrapeError::DriverStartup { port, secs: timeout.as_secs() });
        }
        sleep(Duration::from_millis(DRIVER_PROBE_MS)).await;
    }
}

/* ---------- Saved page ---------- */

pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PageSource for SnapshotSource {
    fn name(&self) -> &'static str { "snapshot" }

    async fn fetch(&mut self, url: &str, _wait: &Wait) -> Result<String, ScrapeError> {
        debug!("replaying {} in place of {url}", self.path.display());
        store::load_snapshot(&self.path)
    }

    async fn close(self) -> Result<(), ScrapeError> {
        Ok(())
    }
}
