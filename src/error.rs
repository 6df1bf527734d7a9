use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Errors from loading options and from the command-line tool.
/// Formatting itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("failed to read standard input: {0}")]
    Stdin(#[source] io::Error),
    #[error("failed to write output: {0}")]
    Write(#[source] io::Error),
    #[error("invalid render options: {0}")]
    Options(#[source] serde_json::Error),
    #[error("failed to serialize document tree: {0}")]
    Serialize(#[source] serde_json::Error),
}
