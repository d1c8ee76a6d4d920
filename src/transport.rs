//! Non-blocking line transport over TCP.
//!
//! Owns one socket and an accumulation buffer. After registration the
//! socket is switched to non-blocking mode; `poll_line` makes at most
//! one read attempt per call, which is what gives the scheduler its
//! one-resume-per-tick semantics.

use std::io::{self, ErrorKind, Read, Write};
use std::net::TcpStream;

use bytes::BytesMut;
use tracing::trace;

/// Maximum length of one inbound line, terminator included.
pub const MAX_LINE_LEN: usize = 8191;

const READ_CHUNK: usize = 4096;

pub(crate) struct Transport {
    stream: TcpStream,
    buf: BytesMut,
}

impl Transport {
    /// Blocking TCP connect. The one blocking call in the crate; it
    /// happens before the connection enters the scheduler.
    pub(crate) fn connect(host: &str, port: u16) -> io::Result<Self> {
        let stream = TcpStream::connect((host, port))?;
        Ok(Self {
            stream,
            buf: BytesMut::with_capacity(READ_CHUNK),
        })
    }

    pub(crate) fn set_nonblocking(&mut self) -> io::Result<()> {
        self.stream.set_nonblocking(true)
    }

    /// One non-blocking read attempt for a complete line.
    ///
    /// Returns `Ok(None)` when no complete line is available yet. A
    /// buffered line is returned without touching the socket, so lines
    /// queued behind it are delivered one per call. EOF and oversized
    /// unterminated lines are errors.
    pub(crate) fn poll_line(&mut self) -> io::Result<Option<String>> {
        if let Some(line) = self.take_line() {
            return Ok(Some(line));
        }

        let mut chunk = [0u8; READ_CHUNK];
        match self.stream.read(&mut chunk) {
            Ok(0) => Err(io::Error::new(
                ErrorKind::UnexpectedEof,
                "connection closed by peer",
            )),
            Ok(n) => {
                self.buf.extend_from_slice(&chunk[..n]);
                match self.take_line() {
                    Some(line) => Ok(Some(line)),
                    None if self.buf.len() > MAX_LINE_LEN => Err(io::Error::new(
                        ErrorKind::InvalidData,
                        format!("line exceeds {MAX_LINE_LEN} bytes"),
                    )),
                    None => Ok(None),
                }
            }
            Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Pop one complete line off the buffer, terminators stripped.
    /// Invalid UTF-8 is replaced rather than rejected.
    fn take_line(&mut self) -> Option<String> {
        let pos = self.buf.iter().position(|&b| b == b'\n')?;
        let line = self.buf.split_to(pos + 1);
        let end = line
            .iter()
            .rposition(|&b| b != b'\r' && b != b'\n')
            .map_or(0, |i| i + 1);
        Some(String::from_utf8_lossy(&line[..end]).into_owned())
    }

    /// Write one line, `\r\n` appended. Short writes and `WouldBlock`
    /// are retried until the whole frame is out.
    pub(crate) fn send_line(&mut self, line: &str) -> io::Result<()> {
        trace!(line, "sending");
        let mut frame = Vec::with_capacity(line.len() + 2);
        frame.extend_from_slice(line.as_bytes());
        frame.extend_from_slice(b"\r\n");

        let mut written = 0;
        while written < frame.len() {
            match self.stream.write(&frame[written..]) {
                Ok(0) => {
                    return Err(io::Error::new(
                        ErrorKind::WriteZero,
                        "socket refused the write",
                    ))
                }
                Ok(n) => written += n,
                Err(e) if matches!(e.kind(), ErrorKind::WouldBlock | ErrorKind::Interrupted) => {}
                Err(e) => return Err(e),
            }
        }
        Ok(())
    }
}
