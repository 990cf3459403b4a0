#![forbid(unsafe_code)]
//! mailreach_lib — validation d'adresses e-mail et sonde SMTP de délivrabilité.
//!
//! The pipeline checks syntax, rejects disposable providers, resolves the
//! domain's preferred mail exchanger and, unless the provider is known to block
//! probes, asks that server whether it would accept the recipient, stopping
//! before any message is sent. The outcome is a tri-state [`Verdict`].
//!
//! ```no_run
//! use mailreach_lib::{Verdict, validate};
//!
//! let result = validate("someone@example.com")?;
//! if result.is_valid == Verdict::Unknown {
//!     println!("could not tell: {}", result.status);
//! }
//! # Ok::<(), mailreach_lib::MxError>(())
//! ```

pub mod disposable;
pub mod mx;
pub mod pipeline;
pub mod policy;
pub mod result;
pub mod smtp;
pub mod validator;

pub use disposable::{DenyList, DisposableDomainChecker};
pub use mx::{Error as MxError, MxRecord, MxResolver, MxStatus, SystemResolver, check_mx};
pub use pipeline::{ValidateOptions, Validator, validate, validate_with_options};
pub use policy::ProviderPolicy;
pub use result::{Status, ValidationResult, Verdict};
pub use smtp::{ProbeOptions, probe};
pub use validator::{SyntaxReport, check_syntax, is_valid_syntax};
