// src/progress.rs

/// Steps of a single scrape run, in the order they happen.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Stage {
    Open,
    Load,
    Parse,
    Write,
}

impl Stage {
    pub const ALL: [Stage; 4] = [Stage::Open, Stage::Load, Stage::Parse, Stage::Write];

    pub fn label(self) -> &'static str {
        match self {
            Stage::Open => "Opening page source",
            Stage::Load => "Loading page and waiting for render",
            Stage::Parse => "Extracting cases",
            Stage::Write => "Writing output",
        }
    }
}

/// Lightweight progress reporting for a scrape run.
/// Frontends implement this to surface status to users.
pub trait Progress {
    /// Called at the start with the number of stages to expect.
    fn begin(&mut self, _total: usize) {}

    /// Called when the run enters a new stage.
    fn stage(&mut self, _stage: Stage) {}

    /// Free-form status line for human eyes.
    fn log(&mut self, _msg: &str) {}

    /// Called at the end, successful or not.
    fn finish(&mut self) {}
}

/// A no-op progress sink.
pub struct NullProgress;
impl Progress for NullProgress {}
