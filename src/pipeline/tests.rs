use std::io::{BufRead, BufReader, Write};
use std::net::TcpListener;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::thread;

use super::*;
use crate::disposable::DenyList;
use crate::mx::MxRecord;
use crate::result::Verdict;

/// Resolver stub counting how often it is consulted.
struct CountingResolver {
    records: Result<Vec<MxRecord>, ()>,
    calls: AtomicUsize,
}

impl CountingResolver {
    fn with(records: Vec<MxRecord>) -> Self {
        Self {
            records: Ok(records),
            calls: AtomicUsize::new(0),
        }
    }

    fn failing() -> Self {
        Self {
            records: Err(()),
            calls: AtomicUsize::new(0),
        }
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl MxResolver for CountingResolver {
    fn lookup_mx(&self, domain: &str) -> Result<Vec<MxRecord>, MxError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        match &self.records {
            Ok(records) => Ok(records.clone()),
            Err(()) => Err(MxError::NoRecords {
                domain: domain.to_string(),
            }),
        }
    }
}

fn options() -> ValidateOptions {
    ValidateOptions {
        timeout_ms: 2_000,
        ..ValidateOptions::default()
    }
}

#[test]
fn invalid_syntax_stops_before_everything() {
    let resolver = CountingResolver::with(vec![MxRecord::new(10, "mx.example.com")]);
    let disposable_calls = AtomicUsize::new(0);
    let disposable = |_: &str| -> Option<String> {
        disposable_calls.fetch_add(1, Ordering::SeqCst);
        None
    };
    let validator = Validator::new(disposable, &resolver);

    let result = validator.validate("a@b", &options());
    assert_eq!(result.is_valid, Verdict::Invalid);
    assert_eq!(result.status, Status::InvalidSyntax);
    assert!(result.reason.is_some());
    assert_eq!(result.mx_record, None);
    assert_eq!(disposable_calls.load(Ordering::SeqCst), 0);
    assert_eq!(resolver.calls(), 0);
}

#[test]
fn disposable_address_never_reaches_dns() {
    let resolver = CountingResolver::with(vec![MxRecord::new(10, "mx.mailinator.com")]);
    let validator = Validator::new(DenyList::new(), &resolver);

    let result = validator.validate("someone@mailinator.com", &options());
    assert_eq!(result.status, Status::DisposableEmail);
    assert_eq!(result.is_valid, Verdict::Invalid);
    assert_eq!(result.reason.as_deref(), Some("mailinator.com"));
    assert_eq!(resolver.calls(), 0);
}

#[test]
fn disposable_check_can_be_disabled() {
    let resolver = CountingResolver::with(Vec::new());
    let validator = Validator::new(DenyList::new(), &resolver);
    let options = ValidateOptions {
        fake_email_check: false,
        ..options()
    };

    let result = validator.validate("someone@mailinator.com", &options);
    assert_eq!(result.status, Status::NoMxRecords);
    assert_eq!(resolver.calls(), 1);
}

#[test]
fn no_mx_records_means_dead_domain() {
    let resolver = CountingResolver::with(Vec::new());
    let validator = Validator::new(DenyList::new(), &resolver);

    let result = validator.validate("user@example.com", &options());
    assert_eq!(result.is_valid, Verdict::Invalid);
    assert_eq!(result.status, Status::NoMxRecords);
    assert_eq!(result.mx_record, None);
}

#[test]
fn resolver_error_is_treated_as_no_records() {
    let resolver = CountingResolver::failing();
    let validator = Validator::new(DenyList::new(), &resolver);

    let result = validator.validate("user@example.com", &options());
    assert_eq!(result.status, Status::NoMxRecords);
    assert_eq!(resolver.calls(), 1);
}

#[test]
fn regex_check_disabled_lets_odd_input_through_to_dns() {
    let resolver = CountingResolver::with(Vec::new());
    let validator = Validator::new(DenyList::new(), &resolver);
    let options = ValidateOptions {
        regex_check: false,
        ..options()
    };

    let result = validator.validate("no-at-sign", &options);
    assert_eq!(result.status, Status::NoMxRecords);
    assert_eq!(resolver.calls(), 1);
}

#[test]
fn provider_skip_uses_best_record_without_probing() {
    // port 1: un sondage réel échouerait en "Connection Error"
    let resolver = CountingResolver::with(vec![
        MxRecord::new(20, "backup.example.net"),
        MxRecord::new(1, "mx-eu.mail.am0.yahoo.com"),
    ]);
    let validator = Validator::new(DenyList::new(), &resolver);
    let options = ValidateOptions {
        port: 1,
        ..options()
    };

    let result = validator.validate("someone@example.com", &options);
    assert_eq!(result.is_valid, Verdict::Unknown);
    assert_eq!(result.status, Status::SkippedSmtp);
    assert_eq!(result.mx_record.as_deref(), Some("mx-eu.mail.am0.yahoo.com"));
    assert!(result.reason.as_deref().is_some_and(|r| r.contains("yahoo.")));
}

#[test]
fn empty_policy_probes_big_providers() {
    let resolver = CountingResolver::with(vec![MxRecord::new(1, "127.0.0.1")]);
    let validator = Validator::new(DenyList::new(), &resolver).with_policy(
        ProviderPolicy::none().with_fragments(["unrelated.example"]),
    );
    let port = {
        let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
        listener.local_addr().expect("addr").port()
    };
    let options = ValidateOptions {
        port,
        ..options()
    };

    let result = validator.validate("someone@example.com", &options);
    assert_eq!(result.status, Status::ConnectionError);
    assert_eq!(result.mx_record.as_deref(), Some("127.0.0.1"));
}

#[test]
fn probe_result_is_returned_with_mx() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind mock server");
    let port = listener.local_addr().expect("addr").port();
    let server = thread::spawn(move || {
        let (mut stream, _) = listener.accept().expect("accept");
        let mut reader = BufReader::new(stream.try_clone().expect("clone"));
        stream.write_all(b"220 mock ESMTP\r\n").expect("greeting");
        let mut commands = Vec::new();
        for reply in ["250 hi\r\n", "250 ok\r\n", "250 accepted\r\n"] {
            let mut line = String::new();
            reader.read_line(&mut line).expect("command");
            commands.push(line.trim_end().to_string());
            stream.write_all(reply.as_bytes()).expect("reply");
        }
        commands
    });

    let resolver = CountingResolver::with(vec![
        MxRecord::new(50, "10.255.255.1"),
        MxRecord::new(5, "127.0.0.1"),
    ]);
    let validator = Validator::new(DenyList::new(), &resolver);
    let options = ValidateOptions {
        port,
        ..options()
    };

    let result = validator.validate("user@example.org", &options);
    assert_eq!(result.is_valid, Verdict::Valid);
    assert_eq!(result.status, Status::Deliverable);
    assert_eq!(result.mx_record.as_deref(), Some("127.0.0.1"));

    let commands = server.join().expect("server thread");
    assert_eq!(
        commands,
        [
            "HELO example.org",
            "MAIL FROM:<user@example.org>",
            "RCPT TO:<user@example.org>"
        ]
    );
}

#[test]
fn validator_is_shareable_across_threads() {
    let resolver = CountingResolver::with(Vec::new());
    let validator = Validator::new(DenyList::new(), &resolver);
    let options = options();

    thread::scope(|scope| {
        for i in 0..4 {
            let validator = &validator;
            let options = &options;
            scope.spawn(move || {
                let result = validator.validate(&format!("user{i}@example.com"), options);
                assert_eq!(result.status, Status::NoMxRecords);
            });
        }
    });
    assert_eq!(resolver.calls(), 4);
}

#[test]
fn injected_commands_never_reach_the_server() {
    let listener = TcpListener::bind(("127.0.0.1", 0)).expect("bind");
    let port = listener.local_addr().expect("addr").port();
    let resolver = CountingResolver::with(vec![MxRecord::new(10, "127.0.0.1")]);
    let validator = Validator::new(DenyList::new(), &resolver);
    let options = ValidateOptions {
        regex_check: false,
        port,
        ..options()
    };

    let result = validator.validate(
        "a\r\nDATA\r\nSubject: hi\r\n\r\nbody\r\n.\r\nx@example.com",
        &options,
    );
    assert_eq!(result.is_valid, Verdict::Invalid);
    assert_eq!(result.status, Status::InvalidSyntax);
    assert_eq!(resolver.calls(), 1);

    listener.set_nonblocking(true).expect("nonblocking");
    assert!(listener.accept().is_err(), "a connection was opened");
}
