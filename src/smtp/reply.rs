use std::sync::LazyLock;

use regex::Regex;

/// Permanent failure codes that usually mean "no such mailbox".
pub const HARD_BOUNCE_CODES: &[u16] = &[510, 511, 513, 550, 551, 553];

/// Wording of anti-spam / reputation rejections. A 5xx carrying one of these
/// is about the probing connection, not the recipient.
static BLOCK_KEYWORDS: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)junk|spam|openspf|spoofing|host|rbl.*blocked")
        .expect("block keyword pattern compiles")
});

/// One line of an SMTP reply: `<code><'-'|' '><text>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReplyLine<'a> {
    raw: &'a str,
    code: Option<u16>,
    continuation: bool,
}

impl<'a> ReplyLine<'a> {
    pub fn parse(raw: &'a str) -> Self {
        let bytes = raw.as_bytes();
        let code = bytes
            .get(..3)
            .filter(|digits| digits.iter().all(u8::is_ascii_digit))
            .and_then(|_| raw[..3].parse::<u16>().ok());
        let continuation = code.is_some() && bytes.get(3) == Some(&b'-');
        Self {
            raw,
            code,
            continuation,
        }
    }

    /// Numeric reply code, `None` when the line does not start with three digits.
    pub fn code(&self) -> Option<u16> {
        self.code
    }

    /// `true` for the last line of a reply (space after the code, or code only).
    pub fn is_final(&self) -> bool {
        self.code.is_some() && !self.continuation
    }

    pub fn is_continuation(&self) -> bool {
        self.continuation
    }

    pub fn raw(&self) -> &'a str {
        self.raw
    }

    pub fn text(&self) -> &'a str {
        match self.code {
            Some(_) => self.raw.get(4..).unwrap_or(""),
            None => self.raw,
        }
    }

    /// Permanent "recipient does not exist" rejection that is not anti-spam wording.
    pub fn is_hard_bounce(&self) -> bool {
        self.code.is_some_and(|code| HARD_BOUNCE_CODES.contains(&code))
            && !BLOCK_KEYWORDS.is_match(self.raw)
    }
}

/// Classifies a raw reply line, see [`ReplyLine::is_hard_bounce`].
pub fn is_hard_bounce(line: &str) -> bool {
    ReplyLine::parse(line).is_hard_bounce()
}
