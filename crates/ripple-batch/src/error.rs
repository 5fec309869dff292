use std::{io, path::PathBuf};

/// Fatal errors that abort a batch run.
///
/// Rejected generation attempts are not errors; see
/// [`RejectReason`](ripple_generator::RejectReason).
#[derive(Debug, derive_more::Display, derive_more::Error)]
pub enum BatchError {
    /// A dataset or checkpoint file could not be read.
    #[display("failed to read {}: {source}", path.display())]
    Read {
        /// File being read.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A dataset or checkpoint file could not be written.
    #[display("failed to write {}: {source}", path.display())]
    Write {
        /// File being written.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// A dataset or checkpoint file holds malformed JSON.
    #[display("malformed JSON in {}: {source}", path.display())]
    Parse {
        /// File being parsed.
        path: PathBuf,
        /// Underlying parse error.
        source: serde_json::Error,
    },
    /// A value could not be serialized.
    #[display("failed to serialize {}: {source}", path.display())]
    Serialize {
        /// Destination file.
        path: PathBuf,
        /// Underlying serialization error.
        source: serde_json::Error,
    },
    /// The interrupt handler could not be installed.
    #[display("failed to install signal handler: {_0}")]
    Signal(ctrlc::Error),
    /// The batch configuration is unusable.
    #[display("invalid configuration: {_0}")]
    Config(#[error(not(source))] String),
}
