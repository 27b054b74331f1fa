// src/config/consts.rs

// Target page (strike map, one month, one event pinned)
pub const DEFAULT_URL: &str = "https://maps.clb.org.hk/?i18n_language=en_US&map=3&startDate=2024-12&endDate=2024-12&eventId=2024120511353422735";

// Browser
pub const DEFAULT_CHROMEDRIVER: &str = "chromedriver";
pub const DEFAULT_WEBDRIVER_PORT: u16 = 9515;
pub const DRIVER_STARTUP_SECS: u64 = 10;
pub const DRIVER_PROBE_MS: u64 = 100;
pub const HEADLESS_ARG: &str = "--headless";
pub const CHROME_ARGS: &[&str] = &["--disable-gpu"];

// Render wait
pub const RENDER_WAIT_SECS: u64 = 5;
pub const RENDER_POLL_MS: u64 = 250;

// Local cache
pub const STORE_DIR: &str = ".store";
pub const SNAPSHOT_FILE: &str = "page.html";

// Export
pub const DEFAULT_FILE_STEM: &str = "case_history";
