use std::time::{Duration, Instant};

use tracing::{debug, warn};

use crate::result::{Status, ValidationResult};

use super::conversation::{Conclusion, Conversation, Transition};
use super::error::ProbeError;
use super::options::ProbeOptions;
use super::session::SmtpSession;

/// Runs the `HELO` / `MAIL FROM` / `RCPT TO` handshake against `mx_host` for
/// `address` and classifies the server's answer. No message is sent.
///
/// Never fails: timeouts and transport errors are reported as unknown
/// results. The returned result always carries `mx_host`.
pub fn probe(mx_host: &str, address: &str, options: &ProbeOptions) -> ValidationResult {
    let domain = address.rsplit_once('@').map(|(_, d)| d).unwrap_or(address);
    let helo_domain = options.helo_domain(domain);
    let mail_from = options.envelope_sender(address);
    if let Err(conclusion) = check_arguments(address, &helo_domain, &mail_from) {
        warn!(host = mx_host, reason = ?conclusion.reason, "SMTP probe not started");
        return into_result(mx_host, conclusion);
    }
    let conversation = Conversation::new(helo_domain, mail_from, address);
    let now = Instant::now();
    let deadline = now
        .checked_add(options.timeout)
        .unwrap_or_else(|| now + Duration::from_secs(u32::MAX.into()));

    let conclusion = match converse(mx_host, options.port, deadline, conversation) {
        Ok(conclusion) => conclusion,
        Err(err) => {
            warn!(host = mx_host, error = %err, "SMTP probe aborted");
            Conclusion::from(err)
        }
    };
    debug!(host = mx_host, status = %conclusion.status, "SMTP probe finished");
    into_result(mx_host, conclusion)
}

fn into_result(mx_host: &str, conclusion: Conclusion) -> ValidationResult {
    let result = ValidationResult::new(conclusion.status).with_mx_record(mx_host);
    match conclusion.reason {
        Some(reason) => result.with_reason(reason),
        None => result,
    }
}

/// Every command argument must fit on one line: a CR or LF would let the
/// caller inject extra commands.
fn check_arguments(address: &str, helo_domain: &str, mail_from: &str) -> Result<(), Conclusion> {
    if has_line_break(address) {
        return Err(Conclusion::new(
            Status::InvalidSyntax,
            Some("address contains a line break".to_string()),
        ));
    }
    for (option, value) in [("HELO domain", helo_domain), ("envelope sender", mail_from)] {
        if has_line_break(value) {
            return Err(ProbeError::LineBreak { option }.into());
        }
    }
    Ok(())
}

fn has_line_break(value: &str) -> bool {
    value.contains(['\r', '\n'])
}

fn converse(
    host: &str,
    port: u16,
    deadline: Instant,
    mut conversation: Conversation,
) -> Result<Conclusion, ProbeError> {
    let mut session = SmtpSession::connect(host, port, deadline)?;
    loop {
        for line in session.read_lines()? {
            match conversation.on_line(&line) {
                Transition::Continue => {}
                Transition::Send(command) => session.send_command(&command)?,
                Transition::Finish(conclusion) => {
                    session.close();
                    return Ok(conclusion);
                }
            }
        }
    }
}
