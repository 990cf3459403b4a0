use std::io;
use std::net::{IpAddr, SocketAddr, ToSocketAddrs};
use std::sync::mpsc::{self, RecvTimeoutError};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use super::error::ProbeError;

/// Resolves `host` to socket addresses without outliving `deadline`.
///
/// IP literals are returned directly. Names go through the system resolver on
/// a worker thread; if it has not answered when the budget runs out the
/// lookup is abandoned and reported as a timeout.
pub(crate) fn resolve_host(
    host: &str,
    port: u16,
    deadline: Instant,
) -> Result<Vec<SocketAddr>, ProbeError> {
    if let Ok(ip) = host.parse::<IpAddr>() {
        return Ok(vec![SocketAddr::new(ip, port)]);
    }
    resolve_with(host, port, deadline, system_lookup)
}

fn system_lookup(host: &str, port: u16) -> io::Result<Vec<SocketAddr>> {
    Ok((host, port).to_socket_addrs()?.collect())
}

pub(crate) fn resolve_with<F>(
    host: &str,
    port: u16,
    deadline: Instant,
    lookup: F,
) -> Result<Vec<SocketAddr>, ProbeError>
where
    F: FnOnce(&str, u16) -> io::Result<Vec<SocketAddr>> + Send + 'static,
{
    let budget = remaining(deadline)?;
    let (tx, rx) = mpsc::channel();
    let name = host.to_string();
    thread::Builder::new()
        .name("mx-resolve".into())
        .spawn(move || {
            // le récepteur a pu abandonner
            let _ = tx.send(lookup(&name, port));
        })
        .map_err(ProbeError::io)?;

    match rx.recv_timeout(budget) {
        Ok(Ok(addrs)) if addrs.is_empty() => Err(ProbeError::NoAddress {
            host: host.to_string(),
        }),
        Ok(Ok(addrs)) => Ok(addrs),
        Ok(Err(source)) => Err(ProbeError::Resolve {
            host: host.to_string(),
            source,
        }),
        Err(RecvTimeoutError::Timeout) => {
            debug!(host, "address lookup exceeded the probe budget");
            Err(ProbeError::Timeout)
        }
        Err(RecvTimeoutError::Disconnected) => Err(ProbeError::NoAddress {
            host: host.to_string(),
        }),
    }
}

/// Time left before `deadline`; an exhausted budget is a timeout.
pub(crate) fn remaining(deadline: Instant) -> Result<Duration, ProbeError> {
    let left = deadline.saturating_duration_since(Instant::now());
    if left.is_zero() {
        Err(ProbeError::Timeout)
    } else {
        Ok(left)
    }
}
