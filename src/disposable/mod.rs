//! Disposable / temporary mailbox provider detection.
//!
//! The pipeline only depends on [`DisposableDomainChecker`]; [`DenyList`] is the
//! default implementation backed by a compiled-in domain set.

mod list;

use list::DISPOSABLE_DOMAINS;

/// Classifies an address against known disposable providers.
pub trait DisposableDomainChecker {
    /// Returns a label identifying the matched provider, or `None` when the
    /// address is not on the deny-list.
    fn classify(&self, address: &str) -> Option<String>;
}

impl<F> DisposableDomainChecker for F
where
    F: Fn(&str) -> Option<String>,
{
    fn classify(&self, address: &str) -> Option<String> {
        self(address)
    }
}

/// Built-in deny-list, optionally extended with caller-supplied domains.
#[derive(Debug, Clone, Default)]
pub struct DenyList {
    extra: Vec<String>,
}

impl DenyList {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds domains on top of the built-in set.
    pub fn with_domains<I, S>(mut self, domains: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.extra.extend(
            domains
                .into_iter()
                .map(|d| normalize(d.as_ref()))
                .filter(|d| !d.is_empty()),
        );
        self
    }

    fn lookup(&self, domain: &str) -> Option<String> {
        if let Some(hit) = DISPOSABLE_DOMAINS.get_key(domain) {
            return Some((*hit).to_string());
        }
        self.extra.iter().find(|d| d.as_str() == domain).cloned()
    }
}

impl DisposableDomainChecker for DenyList {
    fn classify(&self, address: &str) -> Option<String> {
        let domain = address.rsplit_once('@').map(|(_, d)| d)?;
        let domain = normalize(domain);

        // le domaine lui-même puis chaque domaine parent (x.mailinator.com)
        let mut candidate = domain.as_str();
        loop {
            if let Some(label) = self.lookup(candidate) {
                return Some(label);
            }
            match candidate.split_once('.') {
                Some((_, parent)) if parent.contains('.') => candidate = parent,
                _ => return None,
            }
        }
    }
}

fn normalize(domain: &str) -> String {
    domain.trim().trim_end_matches('.').to_ascii_lowercase()
}
