use std::sync::LazyLock;

use regex::Regex;

/// atext réduit: `[A-Za-z0-9_'+-.]`, dernier caractère sans `'` ni `.`
static LOCAL_PART: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9_'+\-.]*[A-Za-z0-9_+\-]$").expect("local part pattern compiles")
});

/// Checks the local part alone. Dot placement across the whole address
/// (leading dot, `..`) is handled by the caller.
pub(crate) fn is_local_part(s: &str) -> bool {
    LOCAL_PART.is_match(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_forms() {
        assert!(is_local_part("a"));
        assert!(is_local_part("first.last"));
        assert!(is_local_part("o'neil+tag"));
        assert!(is_local_part("under_score-"));
    }

    #[test]
    fn rejects_bad_endings_and_chars() {
        assert!(!is_local_part(""));
        assert!(!is_local_part("abc."));
        assert!(!is_local_part("abc'"));
        assert!(!is_local_part("a b"));
        assert!(!is_local_part("a!b"));
    }
}
