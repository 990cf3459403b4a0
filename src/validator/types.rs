/// Outcome of [`check_syntax`](crate::validator::check_syntax): every rule the
/// address broke, in evaluation order.
#[cfg_attr(feature = "with-serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxReport {
    pub ok: bool,
    pub reasons: Vec<String>,
}

impl SyntaxReport {
    pub(crate) fn from_reasons(reasons: Vec<String>) -> Self {
        Self {
            ok: reasons.is_empty(),
            reasons,
        }
    }

    /// Reasons joined for display, `None` when the address is valid.
    pub fn summary(&self) -> Option<String> {
        if self.ok {
            None
        } else {
            Some(self.reasons.join("; "))
        }
    }
}
