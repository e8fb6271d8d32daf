//! Task-level error type. Converted to a `Failure` result at the task boundary.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Classification of a failed HTTP transfer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportKind {
    /// URL could not be parsed or uses an unsupported scheme.
    InvalidUrl,
    /// DNS failure, refused connection, or connection dropped mid-transfer.
    Connection,
    /// Connect timeout, stall timeout, or total transfer cap reached.
    Timeout,
    /// Server answered with a non-2xx status.
    Http(u32),
    Other,
}

impl fmt::Display for TransportKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransportKind::InvalidUrl => f.write_str("invalid URL"),
            TransportKind::Connection => f.write_str("connection failed"),
            TransportKind::Timeout => f.write_str("timed out"),
            TransportKind::Http(code) => write!(f, "HTTP {}", code),
            TransportKind::Other => f.write_str("transfer failed"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TaskError {
    /// Download failed: unreachable host, bad status, timeout.
    #[error("{kind}: {detail}")]
    Transport {
        url: String,
        kind: TransportKind,
        detail: String,
    },

    /// Referenced input file does not exist.
    #[error("file not found: {}", path.display())]
    NotFound { path: PathBuf },

    /// Input is not the expected JSON shape (or could not be read at all).
    #[error("malformed data in {input}: {reason}")]
    Malformed { input: String, reason: String },

    /// Output file could not be created or written.
    #[error("cannot write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

impl TaskError {
    pub(crate) fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        TaskError::Write {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn malformed(input: impl Into<String>, reason: impl fmt::Display) -> Self {
        TaskError::Malformed {
            input: input.into(),
            reason: reason.to_string(),
        }
    }
}
