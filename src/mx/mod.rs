//! DNS MX resolution.
//!
//! The pipeline talks to DNS through [`MxResolver`]; [`SystemResolver`] is the
//! default, synchronous implementation using the system resolver configuration.
//! [`check_mx`] is a standalone diagnostic returning every record.

mod error;
mod resolver;
mod types;

pub use error::MxError as Error;
pub use resolver::{MxResolver, SystemResolver, check_mx, select_best};
pub use types::{MxRecord, MxStatus};
