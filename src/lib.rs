// src/lib.rs

#[macro_use]
pub mod macros;

pub mod cli;
pub mod config;
pub mod core;
pub mod error;
pub mod log;
pub mod specs;

pub mod csv;
pub mod file;
pub mod progress;
pub mod scrape;
pub mod store;

pub use error::ScrapeError;
pub use specs::cases::CaseRecord;
