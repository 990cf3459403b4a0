//! Pattern-based address syntax check.

mod domain;
mod local;
mod types;

pub use types::SyntaxReport;

use domain::check_domain;
use local::is_local_part;

/// Returns `true` when `email` matches the accepted address pattern.
pub fn is_valid_syntax(email: &str) -> bool {
    check_syntax(email).ok
}

/// Same rules as [`is_valid_syntax`], keeping the reasons of a failure.
///
/// The input is checked as-is: surrounding whitespace makes it invalid.
pub fn check_syntax(email: &str) -> SyntaxReport {
    let mut reasons = Vec::new();

    if email.starts_with('.') {
        reasons.push("address must not start with '.'".to_string());
    }
    if email.contains("..") {
        reasons.push("address must not contain consecutive dots".to_string());
    }

    let parts: Vec<&str> = email.split('@').collect();
    if parts.len() != 2 {
        reasons.push("must contain exactly one '@'".to_string());
        return SyntaxReport::from_reasons(reasons);
    }
    let (local, domain) = (parts[0], parts[1]);

    if !is_local_part(local) {
        reasons.push(format!("invalid local part '{local}'"));
    }
    check_domain(domain, &mut reasons);

    SyntaxReport::from_reasons(reasons)
}
