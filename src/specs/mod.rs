// src/specs/mod.rs
//! # Page specs
//!
//! A spec knows where the data lives in one page's rendered HTML and how to
//! pull it out. It does no I/O: the caller hands in the page source (from the
//! browser or a saved snapshot) and gets plain records back.
//!
//! ## Conventions
//! - Selectors are compiled once (`selector!`) and matched with `scraper`.
//! - Missing markup is not an error. An absent element or attribute becomes an
//!   empty cell so one odd entry never drops a whole record.
//! - Records come back in document order.
//!
//! ## Typical call chain
//! ```text
//! cli → scrape::run → PageSource::fetch → specs::cases::extract_cases
//!                                       ↘ csv / file export
//! ```
pub mod cases;
