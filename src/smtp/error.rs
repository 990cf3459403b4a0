use thiserror::Error;

use crate::result::Status;

use super::conversation::Conclusion;

/// Transport failures during a probe. Never leaves the crate: each one becomes
/// a "Timeout" or "Connection Error" result at the probe boundary.
#[derive(Debug, Error)]
pub(crate) enum ProbeError {
    #[error("probe deadline elapsed")]
    Timeout,
    #[error("could not resolve {host}: {source}")]
    Resolve {
        host: String,
        #[source]
        source: std::io::Error,
    },
    #[error("no address found for {host}")]
    NoAddress { host: String },
    #[error("connection to {addr} failed: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },
    #[error("I/O error: {source}")]
    Io {
        #[source]
        source: std::io::Error,
    },
    #[error("connection closed by remote host")]
    Closed,
    #[error("{option} contains a line break")]
    LineBreak { option: &'static str },
}

impl ProbeError {
    pub(crate) fn io(source: std::io::Error) -> Self {
        if is_timeout(&source) {
            Self::Timeout
        } else {
            Self::Io { source }
        }
    }
}

pub(crate) fn is_timeout(err: &std::io::Error) -> bool {
    matches!(
        err.kind(),
        std::io::ErrorKind::TimedOut | std::io::ErrorKind::WouldBlock
    )
}

impl From<ProbeError> for Conclusion {
    fn from(err: ProbeError) -> Self {
        match err {
            ProbeError::Timeout => Conclusion::new(Status::Timeout, None),
            other => Conclusion::new(Status::ConnectionError, Some(other.to_string())),
        }
    }
}
