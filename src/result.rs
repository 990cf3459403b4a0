use std::fmt;

/// Tri-state deliverability verdict.
///
/// With `with-serde` it serialises as JSON `true`, `false` or `null`.
#[cfg_attr(
    feature = "with-serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(into = "Option<bool>", from = "Option<bool>")
)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Verdict {
    /// The SMTP server affirmatively accepted the recipient.
    Valid,
    /// Conclusive negative determination.
    Invalid,
    /// No conclusion could be reached (timeout, blocking, greylisting, ...).
    Unknown,
}

impl Verdict {
    pub fn is_conclusive(self) -> bool {
        !matches!(self, Self::Unknown)
    }
}

impl From<Verdict> for Option<bool> {
    fn from(verdict: Verdict) -> Self {
        match verdict {
            Verdict::Valid => Some(true),
            Verdict::Invalid => Some(false),
            Verdict::Unknown => None,
        }
    }
}

impl From<Option<bool>> for Verdict {
    fn from(value: Option<bool>) -> Self {
        match value {
            Some(true) => Self::Valid,
            Some(false) => Self::Invalid,
            None => Self::Unknown,
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Valid => f.write_str("true"),
            Self::Invalid => f.write_str("false"),
            Self::Unknown => f.write_str("unknown"),
        }
    }
}

/// Label explaining how a [`ValidationResult`] was reached.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Status {
    #[cfg_attr(feature = "with-serde", serde(rename = "Invalid Syntax"))]
    InvalidSyntax,
    #[cfg_attr(feature = "with-serde", serde(rename = "Disposable Email Detected"))]
    DisposableEmail,
    #[cfg_attr(feature = "with-serde", serde(rename = "No MX Records (Domain Dead)"))]
    NoMxRecords,
    #[cfg_attr(
        feature = "with-serde",
        serde(rename = "Skipped SMTP (Provider blocks pings)")
    )]
    SkippedSmtp,
    #[cfg_attr(feature = "with-serde", serde(rename = "Deliverable"))]
    Deliverable,
    #[cfg_attr(feature = "with-serde", serde(rename = "User Unknown"))]
    UserUnknown,
    #[cfg_attr(feature = "with-serde", serde(rename = "Server Reject (Greylist/Spam)"))]
    ServerReject,
    #[cfg_attr(feature = "with-serde", serde(rename = "Timeout"))]
    Timeout,
    #[cfg_attr(feature = "with-serde", serde(rename = "Connection Error"))]
    ConnectionError,
}

impl Status {
    /// The verdict implied by this status.
    pub fn verdict(self) -> Verdict {
        match self {
            Self::Deliverable => Verdict::Valid,
            Self::InvalidSyntax | Self::DisposableEmail | Self::NoMxRecords | Self::UserUnknown => {
                Verdict::Invalid
            }
            Self::SkippedSmtp | Self::ServerReject | Self::Timeout | Self::ConnectionError => {
                Verdict::Unknown
            }
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::InvalidSyntax => "Invalid Syntax",
            Self::DisposableEmail => "Disposable Email Detected",
            Self::NoMxRecords => "No MX Records (Domain Dead)",
            Self::SkippedSmtp => "Skipped SMTP (Provider blocks pings)",
            Self::Deliverable => "Deliverable",
            Self::UserUnknown => "User Unknown",
            Self::ServerReject => "Server Reject (Greylist/Spam)",
            Self::Timeout => "Timeout",
            Self::ConnectionError => "Connection Error",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Final outcome of validating one address.
///
/// `is_valid` is always `status.verdict()`; both are kept so serialised output
/// carries the verdict explicitly.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationResult {
    pub is_valid: Verdict,
    pub status: Status,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub reason: Option<String>,
    #[cfg_attr(feature = "with-serde", serde(skip_serializing_if = "Option::is_none"))]
    pub mx_record: Option<String>,
}

impl ValidationResult {
    pub fn new(status: Status) -> Self {
        Self {
            is_valid: status.verdict(),
            status,
            reason: None,
            mx_record: None,
        }
    }

    pub fn with_reason(mut self, reason: impl Into<String>) -> Self {
        self.reason = Some(reason.into());
        self
    }

    pub fn with_mx_record(mut self, host: impl Into<String>) -> Self {
        self.mx_record = Some(host.into());
        self
    }
}

impl fmt::Display for ValidationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.is_valid, self.status)?;
        if let Some(mx) = &self.mx_record {
            write!(f, " [{mx}]")?;
        }
        if let Some(reason) = &self.reason {
            write!(f, " - {reason}")?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn verdict_follows_status() {
        assert_eq!(ValidationResult::new(Status::Deliverable).is_valid, Verdict::Valid);
        assert_eq!(ValidationResult::new(Status::NoMxRecords).is_valid, Verdict::Invalid);
        assert_eq!(ValidationResult::new(Status::Timeout).is_valid, Verdict::Unknown);
        assert!(!Verdict::Unknown.is_conclusive());
    }

    #[test]
    fn display_includes_mx_and_reason() {
        let result = ValidationResult::new(Status::ServerReject)
            .with_mx_record("mx.example.com")
            .with_reason("451 4.7.1 try again later");
        insta::assert_snapshot!(
            result.to_string(),
            @"unknown: Server Reject (Greylist/Spam) [mx.example.com] - 451 4.7.1 try again later"
        );
    }

    #[test]
    fn display_bare_status() {
        let result = ValidationResult::new(Status::InvalidSyntax);
        insta::assert_snapshot!(result.to_string(), @"false: Invalid Syntax");
    }

    #[cfg(feature = "with-serde")]
    #[test]
    fn serializes_verdict_as_nullable_bool() {
        let result = ValidationResult::new(Status::Timeout).with_mx_record("mx.example.com");
        let json = serde_json::to_string(&result).expect("serialize");
        assert_eq!(
            json,
            r#"{"is_valid":null,"status":"Timeout","mx_record":"mx.example.com"}"#
        );
    }
}
