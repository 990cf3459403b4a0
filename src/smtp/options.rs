use std::borrow::Cow;
use std::time::Duration;

/// Controls how [`probe`](crate::smtp::probe) talks to a mail exchanger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOptions {
    pub port: u16,
    /// Budget for the whole conversation: connect, every read and write.
    pub timeout: Duration,
    pub helo_domain: Option<String>,
    pub envelope_sender: Option<String>,
}

impl Default for ProbeOptions {
    fn default() -> Self {
        Self {
            port: 25,
            timeout: Duration::from_millis(5_000),
            helo_domain: None,
            envelope_sender: None,
        }
    }
}

impl ProbeOptions {
    /// Returns the name sent with `HELO`. Defaults to the domain of the
    /// probed address.
    pub fn helo_domain<'a>(&'a self, domain: &'a str) -> Cow<'a, str> {
        self.helo_domain
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(Cow::Borrowed)
            .unwrap_or(Cow::Borrowed(domain))
    }

    /// Returns the `MAIL FROM` address. Defaults to the probed address itself.
    pub fn envelope_sender<'a>(&'a self, address: &'a str) -> Cow<'a, str> {
        self.envelope_sender
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(Cow::Borrowed)
            .unwrap_or(Cow::Borrowed(address))
    }
}
