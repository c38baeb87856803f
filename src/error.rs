use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures raised by the simulation core.
#[derive(Debug, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum SimError {
    /// A requested feature exists in the API but has no behavior yet.
    #[error("{feature} is not implemented")]
    Unsupported { feature: &'static str },
}

/// Failures surfaced by the terminal front end.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("terminal I/O failed: {0}")]
    Io(#[from] io::Error),
    #[error(transparent)]
    Sim(#[from] SimError),
    #[error("failed to open log file {}: {source}", .path.display())]
    LogFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
