use crate::result::Status;

use super::reply::ReplyLine;

/// Position in the fixed `HELO` → `MAIL FROM` → `RCPT TO` script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Step {
    AwaitGreeting,
    AwaitHeloAck,
    AwaitMailAck,
    AwaitRcptAck,
}

/// Terminal verdict of a conversation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conclusion {
    pub status: Status,
    pub reason: Option<String>,
}

impl Conclusion {
    pub(crate) fn new(status: Status, reason: Option<String>) -> Self {
        Self { status, reason }
    }
}

/// What the transport must do after feeding one line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transition {
    /// Keep reading.
    Continue,
    /// Write this command (without CRLF), then keep reading.
    Send(String),
    /// Stop: the conversation reached a verdict.
    Finish(Conclusion),
}

/// SMTP client dialogue, decoupled from the socket.
///
/// Feed it reply lines in arrival order with [`Conversation::on_line`]. Once a
/// [`Transition::Finish`] has been returned the conversation is over and any
/// further line is ignored.
#[derive(Debug, Clone)]
pub struct Conversation {
    step: Step,
    finished: bool,
    helo_domain: String,
    mail_from: String,
    recipient: String,
}

impl Conversation {
    pub fn new(
        helo_domain: impl Into<String>,
        mail_from: impl Into<String>,
        recipient: impl Into<String>,
    ) -> Self {
        Self {
            step: Step::AwaitGreeting,
            finished: false,
            helo_domain: helo_domain.into(),
            mail_from: mail_from.into(),
            recipient: recipient.into(),
        }
    }

    pub fn step(&self) -> Step {
        self.step
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    pub fn on_line(&mut self, raw: &str) -> Transition {
        if self.finished || raw.is_empty() {
            return Transition::Continue;
        }

        let line = ReplyLine::parse(raw);
        if line.is_continuation() {
            return Transition::Continue;
        }

        if line.is_hard_bounce() {
            return self.finish(Status::UserUnknown, raw);
        }
        let code = match line.code() {
            Some(code @ (220 | 250)) => code,
            _ => return self.finish(Status::ServerReject, raw),
        };

        match (self.step, code) {
            (Step::AwaitGreeting, 220) => {
                self.step = Step::AwaitHeloAck;
                Transition::Send(format!("HELO {}", self.helo_domain))
            }
            (Step::AwaitHeloAck, 250) => {
                self.step = Step::AwaitMailAck;
                Transition::Send(format!("MAIL FROM:<{}>", self.mail_from))
            }
            (Step::AwaitMailAck, 250) => {
                self.step = Step::AwaitRcptAck;
                Transition::Send(format!("RCPT TO:<{}>", self.recipient))
            }
            (Step::AwaitRcptAck, 250) => {
                self.finished = true;
                Transition::Finish(Conclusion::new(Status::Deliverable, None))
            }
            (Step::AwaitRcptAck, _) => self.finish(Status::UserUnknown, raw),
            // 220/250 hors séquence: on attend la réponse attendue
            _ => Transition::Continue,
        }
    }

    fn finish(&mut self, status: Status, raw: &str) -> Transition {
        self.finished = true;
        Transition::Finish(Conclusion::new(status, Some(raw.to_string())))
    }
}
