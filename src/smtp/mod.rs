//! SMTP deliverability probe.
//!
//! [`probe`] connects to one mail exchanger, walks the fixed
//! `HELO` → `MAIL FROM` → `RCPT TO` script and classifies the final reply.
//! Framing ([`LineBuffer`]) and the dialogue ([`Conversation`]) are plain
//! values so they can be driven without a socket.

mod conversation;
mod error;
mod options;
mod probe;
mod reader;
mod reply;
mod resolve;
mod session;

pub use conversation::{Conclusion, Conversation, Step, Transition};
pub use options::ProbeOptions;
pub use probe::probe;
pub use reader::LineBuffer;
pub use reply::{HARD_BOUNCE_CODES, ReplyLine, is_hard_bounce};
