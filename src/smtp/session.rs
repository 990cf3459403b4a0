use std::io::{ErrorKind, Read, Write};
use std::net::{Shutdown, TcpStream};
use std::time::Instant;

use tracing::{debug, trace};

use super::error::{ProbeError, is_timeout};
use super::reader::LineBuffer;
use super::resolve::{remaining, resolve_host};

/// One TCP connection to a mail exchanger, bounded by a single deadline.
///
/// The stream is released exactly once: either by [`SmtpSession::close`] or,
/// on early return, by `Drop`. Closing twice is a no-op.
pub(crate) struct SmtpSession {
    stream: Option<TcpStream>,
    buffer: LineBuffer,
    deadline: Instant,
}

impl SmtpSession {
    pub(crate) fn connect(host: &str, port: u16, deadline: Instant) -> Result<Self, ProbeError> {
        let addrs = resolve_host(host, port, deadline)?;

        let mut last_err = None;
        for addr in &addrs {
            let budget = remaining(deadline)?;
            match TcpStream::connect_timeout(addr, budget) {
                Ok(stream) => {
                    debug!(%addr, "connected");
                    return Ok(Self {
                        stream: Some(stream),
                        buffer: LineBuffer::new(),
                        deadline,
                    });
                }
                Err(err) if is_timeout(&err) => return Err(ProbeError::Timeout),
                Err(err) => {
                    debug!(%addr, error = %err, "connect failed");
                    last_err = Some(ProbeError::Connect {
                        addr: addr.to_string(),
                        source: err,
                    });
                }
            }
        }
        Err(last_err.unwrap_or_else(|| ProbeError::NoAddress {
            host: host.to_string(),
        }))
    }

    pub(crate) fn send_command(&mut self, command: &str) -> Result<(), ProbeError> {
        let budget = remaining(self.deadline)?;
        let stream = self.stream_mut()?;
        stream.set_write_timeout(Some(budget)).map_err(ProbeError::io)?;

        let mut line = command.as_bytes().to_vec();
        line.extend_from_slice(b"\r\n");
        stream.write_all(&line).map_err(ProbeError::io)?;
        stream.flush().map_err(ProbeError::io)?;
        debug!(command, "C");
        Ok(())
    }

    /// Blocks until more bytes arrive and returns the lines they completed
    /// (possibly none).
    pub(crate) fn read_lines(&mut self) -> Result<Vec<String>, ProbeError> {
        let mut chunk = [0u8; 1024];
        loop {
            let budget = remaining(self.deadline)?;
            let stream = self.stream_mut()?;
            stream.set_read_timeout(Some(budget)).map_err(ProbeError::io)?;
            match stream.read(&mut chunk) {
                Ok(0) => return Err(ProbeError::Closed),
                Ok(read) => {
                    let lines = self.buffer.feed(&chunk[..read]);
                    for line in &lines {
                        trace!(line = line.as_str(), "S");
                    }
                    return Ok(lines);
                }
                Err(err) if err.kind() == ErrorKind::Interrupted => continue,
                Err(err) => return Err(ProbeError::io(err)),
            }
        }
    }

    /// Shuts the connection down. Only the first call has an effect.
    pub(crate) fn close(&mut self) {
        if let Some(stream) = self.stream.take() {
            // le pair a pu fermer avant nous
            let _ = stream.shutdown(Shutdown::Both);
            debug!("connection closed");
        }
    }

    fn stream_mut(&mut self) -> Result<&mut TcpStream, ProbeError> {
        self.stream.as_mut().ok_or(ProbeError::Closed)
    }
}

impl Drop for SmtpSession {
    fn drop(&mut self) {
        self.close();
    }
}
