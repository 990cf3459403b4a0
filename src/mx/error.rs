use thiserror::Error;
use trust_dns_resolver::error::{ResolveError, ResolveErrorKind};

/// Failure to obtain mail exchangers for a domain.
///
/// The validation pipeline folds every variant into "no MX records"; the
/// distinction only matters to callers of [`check_mx`](crate::mx::check_mx).
#[derive(Debug, Error)]
pub enum MxError {
    #[error("domain is empty")]
    EmptyDomain,
    #[error("domain '{domain}' is not a valid IDNA name")]
    InvalidDomain {
        domain: String,
        #[source]
        source: idna::Errors,
    },
    #[error("system resolver configuration unavailable: {source}")]
    ResolverInit {
        #[source]
        source: std::io::Error,
    },
    #[error("no MX records published for '{domain}'")]
    NoRecords { domain: String },
    #[error("MX lookup for '{domain}' failed: {source}")]
    Lookup {
        domain: String,
        #[source]
        source: ResolveError,
    },
}

impl MxError {
    pub(crate) fn resolver_init(source: std::io::Error) -> Self {
        Self::ResolverInit { source }
    }

    pub(crate) fn from_resolve(domain: &str, source: ResolveError) -> Self {
        match source.kind() {
            ResolveErrorKind::NoRecordsFound { .. } => Self::NoRecords {
                domain: domain.to_string(),
            },
            _ => Self::Lookup {
                domain: domain.to_string(),
                source,
            },
        }
    }

    pub fn is_no_records(&self) -> bool {
        matches!(self, Self::NoRecords { .. })
    }
}
