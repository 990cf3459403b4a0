use std::sync::LazyLock;

use regex::Regex;

static DOMAIN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^(?:[A-Za-z0-9][A-Za-z0-9\-]*\.)+[A-Za-z]{2,}$").expect("domain pattern compiles")
});

/// Valide le domaine (labels + TLD alphabétique d'au moins deux lettres).
/// Push des raisons invalidantes dans `reasons`.
pub(crate) fn check_domain(domain: &str, reasons: &mut Vec<String>) {
    if domain.is_empty() {
        reasons.push("domain is empty".to_string());
        return;
    }
    if DOMAIN.is_match(domain) {
        return;
    }

    match domain.rsplit_once('.') {
        None => reasons.push(format!("domain '{domain}' has no top-level domain")),
        Some((_, tld)) if tld.len() < 2 || !tld.chars().all(|c| c.is_ascii_alphabetic()) => {
            reasons.push(format!(
                "top-level domain '{tld}' must be at least two letters"
            ));
        }
        Some(_) => reasons.push(format!("domain '{domain}' has invalid labels")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn reasons_for(domain: &str) -> Vec<String> {
        let mut reasons = vec![];
        check_domain(domain, &mut reasons);
        reasons
    }

    #[test]
    fn basic_domain_ok() {
        assert!(reasons_for("example.com").is_empty());
        assert!(reasons_for("mail.sub-domain.example.co").is_empty());
        assert!(reasons_for("1and1.info").is_empty());
    }

    #[test]
    fn missing_tld() {
        let reasons = reasons_for("ekansh");
        assert_eq!(reasons.len(), 1);
        assert!(reasons[0].contains("no top-level domain"), "{reasons:?}");
    }

    #[test]
    fn numeric_or_short_tld() {
        assert!(reasons_for("example.c").iter().any(|r| r.contains("two letters")));
        assert!(reasons_for("example.123").iter().any(|r| r.contains("two letters")));
    }

    #[test]
    fn label_starting_with_hyphen() {
        let reasons = reasons_for("-bad.example.com");
        assert!(reasons.iter().any(|r| r.contains("invalid labels")), "{reasons:?}");
    }
}
