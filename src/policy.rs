//! Providers whose MX hosts are not worth probing.
//!
//! Large mailbox providers throttle or blackhole `RCPT TO` probes coming from
//! unknown senders, so any answer they give is noise. Matching hosts are
//! reported as unknown instead of being probed.

/// Host fragments of providers known to block SMTP probes.
pub const BLOCKING_PROVIDERS: &[&str] = &[
    "google.com",
    "googlemail.com",
    "outlook.com",
    "hotmail.com",
    "yahoo.",
    "yahoodns.net",
    "icloud.com",
    "aol.com",
];

/// Case-insensitive substring match of MX hostnames against provider fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderPolicy {
    fragments: Vec<String>,
}

impl Default for ProviderPolicy {
    fn default() -> Self {
        Self {
            fragments: BLOCKING_PROVIDERS.iter().map(|f| f.to_string()).collect(),
        }
    }
}

impl ProviderPolicy {
    /// A policy that never skips.
    pub fn none() -> Self {
        Self {
            fragments: Vec::new(),
        }
    }

    pub fn with_fragments<I, S>(mut self, fragments: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.fragments.extend(
            fragments
                .into_iter()
                .map(|f| f.as_ref().trim().to_ascii_lowercase())
                .filter(|f| !f.is_empty()),
        );
        self
    }

    pub fn fragments(&self) -> &[String] {
        &self.fragments
    }

    /// Returns the fragment `mx_host` matched, if the live probe should be skipped.
    pub fn skip_reason(&self, mx_host: &str) -> Option<&str> {
        let host = mx_host.to_ascii_lowercase();
        self.fragments
            .iter()
            .find(|fragment| host.contains(fragment.to_ascii_lowercase().as_str()))
            .map(String::as_str)
    }

    pub fn should_skip(&self, mx_host: &str) -> bool {
        self.skip_reason(mx_host).is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skips_major_providers() {
        let policy = ProviderPolicy::default();
        assert!(policy.should_skip("gmail-smtp-in.l.google.com"));
        assert!(policy.should_skip("example-com.mail.protection.outlook.com"));
        assert!(policy.should_skip("mta5.am0.yahoodns.net"));
        assert!(policy.should_skip("mx1.mail.YAHOO.com"));
        assert_eq!(policy.skip_reason("mx01.mail.icloud.com"), Some("icloud.com"));
    }

    #[test]
    fn probes_everything_else() {
        let policy = ProviderPolicy::default();
        assert!(!policy.should_skip("mx.example.com"));
        assert!(!policy.should_skip("mail.protonmail.ch"));
        assert!(!ProviderPolicy::none().should_skip("gmail-smtp-in.l.google.com"));
    }

    #[test]
    fn extra_fragments() {
        let policy = ProviderPolicy::none().with_fragments([" Mimecast.COM ", ""]);
        assert_eq!(policy.fragments(), ["mimecast.com".to_string()]);
        assert!(policy.should_skip("eu-smtp-inbound-1.mimecast.com"));
    }
}
