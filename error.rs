use std::io;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort a run.
///
/// Every variant is fatal at the point of detection: the run stops, a
/// diagnostic goes to stderr, and no partial listing is written.
#[derive(Error, Debug)]
pub enum Error {
    /// The corpus file is missing, unreadable, or shorter than its
    /// reported size.
    #[error("unable to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A reservation failed for the corpus buffer, a record block, or
    /// the bucket array.
    #[error("unable to allocate {what} ({requested} bytes)")]
    OutOfMemory {
        what: &'static str,
        requested: usize,
    },

    /// The command line was rejected before any processing began.
    #[error("{0}")]
    Usage(String),

    /// The ranked listing could not be written to stdout.
    #[error("unable to write results: {0}")]
    Output(#[from] io::Error),
}

impl Error {
    /// Process exit status for this failure.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::Usage(_) => 2,
            _ => 1,
        }
    }
}
