// src/core/mod.rs

pub mod browser;
pub mod sanitize;

pub use browser::{ChromeSource, PageSource, SnapshotSource, Wait};
