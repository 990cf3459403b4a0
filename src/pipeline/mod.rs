//! Validation pipeline: syntax → disposable → MX → provider policy → SMTP probe.
//!
//! Each step either concludes (and the remaining steps are never run) or hands
//! over to the next one. Every outcome is a [`ValidationResult`]; only setting
//! up the system resolver can fail.

mod options;

pub use options::ValidateOptions;

use tracing::{debug, info};

use crate::disposable::{DenyList, DisposableDomainChecker};
use crate::mx::{Error as MxError, MxResolver, SystemResolver, select_best};
use crate::policy::ProviderPolicy;
use crate::result::{Status, ValidationResult};
use crate::smtp;
use crate::validator::check_syntax;

/// Validates `email` with default options, the system resolver and the
/// built-in disposable deny-list.
pub fn validate(email: &str) -> Result<ValidationResult, MxError> {
    validate_with_options(email, &ValidateOptions::default())
}

/// Identical to [`validate`], with caller-supplied options.
pub fn validate_with_options(
    email: &str,
    options: &ValidateOptions,
) -> Result<ValidationResult, MxError> {
    let validator = Validator::from_system_conf()?;
    Ok(validator.validate(email, options))
}

/// Runs the validation pipeline with pluggable collaborators.
///
/// A `Validator` holds no per-call state: share it across threads to validate
/// several addresses concurrently.
#[derive(Debug, Clone)]
pub struct Validator<D = DenyList, R = SystemResolver> {
    disposable: D,
    resolver: R,
    policy: ProviderPolicy,
}

impl Validator {
    pub fn from_system_conf() -> Result<Self, MxError> {
        Ok(Self::new(DenyList::new(), SystemResolver::from_system_conf()?))
    }
}

impl<D, R> Validator<D, R>
where
    D: DisposableDomainChecker,
    R: MxResolver,
{
    pub fn new(disposable: D, resolver: R) -> Self {
        Self {
            disposable,
            resolver,
            policy: ProviderPolicy::default(),
        }
    }

    pub fn with_policy(mut self, policy: ProviderPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn policy(&self) -> &ProviderPolicy {
        &self.policy
    }

    #[tracing::instrument(level = "debug", skip(self, options))]
    pub fn validate(&self, email: &str, options: &ValidateOptions) -> ValidationResult {
        let result = self.run(email, options);
        info!(
            is_valid = %result.is_valid,
            status = %result.status,
            mx = result.mx_record.as_deref().unwrap_or("-"),
            "validation finished"
        );
        result
    }

    fn run(&self, email: &str, options: &ValidateOptions) -> ValidationResult {
        if options.regex_check {
            let report = check_syntax(email);
            if !report.ok {
                debug!(reasons = ?report.reasons, "syntax check failed");
                let result = ValidationResult::new(Status::InvalidSyntax);
                return match report.summary() {
                    Some(reason) => result.with_reason(reason),
                    None => result,
                };
            }
        }

        if options.fake_email_check {
            if let Some(label) = self.disposable.classify(email) {
                debug!(provider = label.as_str(), "disposable provider matched");
                return ValidationResult::new(Status::DisposableEmail).with_reason(label);
            }
        }

        let domain = email.rsplit_once('@').map(|(_, d)| d).unwrap_or("");
        let records = match self.resolver.lookup_mx(domain) {
            Ok(records) => records,
            Err(err) => {
                // erreur du résolveur et liste vide sont traitées pareil
                debug!(domain, error = %err, "MX lookup failed");
                Vec::new()
            }
        };
        let Some(best) = select_best(&records) else {
            return ValidationResult::new(Status::NoMxRecords)
                .with_reason(format!("no mail exchanger found for '{domain}'"));
        };
        let mx_host = best.exchange.as_str();
        debug!(domain, mx = mx_host, priority = best.priority, "mail exchanger selected");

        if let Some(fragment) = self.policy.skip_reason(mx_host) {
            return ValidationResult::new(Status::SkippedSmtp)
                .with_reason(format!(
                    "{mx_host} matches '{fragment}', provider blocks SMTP probes"
                ))
                .with_mx_record(mx_host);
        }

        smtp::probe(mx_host, email, &options.probe_options())
    }
}

#[cfg(test)]
mod tests;
