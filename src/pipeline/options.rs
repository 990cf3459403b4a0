use std::time::Duration;

use crate::smtp::ProbeOptions;

/// Per-call knobs of [`Validator::validate`](crate::Validator::validate).
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "with-serde", serde(default))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidateOptions {
    /// Total budget of the SMTP probe, in milliseconds.
    pub timeout_ms: u64,
    pub regex_check: bool,
    pub fake_email_check: bool,
    pub port: u16,
    pub helo_domain: Option<String>,
    pub envelope_sender: Option<String>,
}

impl Default for ValidateOptions {
    fn default() -> Self {
        Self {
            timeout_ms: 5_000,
            regex_check: true,
            fake_email_check: true,
            port: 25,
            helo_domain: None,
            envelope_sender: None,
        }
    }
}

impl ValidateOptions {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }

    pub(crate) fn probe_options(&self) -> ProbeOptions {
        ProbeOptions {
            port: self.port,
            timeout: self.timeout(),
            helo_domain: self.helo_domain.clone(),
            envelope_sender: self.envelope_sender.clone(),
        }
    }
}
